//! Physical model traits and types
//!
//! This module defines the core API for physical models:
//! - `PhysicalModel`: trait for every right-hand side the solvers can integrate
//! - `MassDistribution`: masses and geometry a model is built on
//! - `TunableParameter`: parameters a model may expose for runtime tuning

use std::fmt;

use nalgebra::DVector;

use crate::error::ParameterError;

// =================================================================================================
// Tunable parameters (Type-safe Identifiers)
// =================================================================================================

/// Parameters a model may allow to be changed after construction
///
/// The physical constants a model is built with are immutable. Only the
/// parameters listed here can be updated through
/// [`PhysicalModel::set_parameter`], and only on models that opt in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TunableParameter {
    /// Total mass of the ocean carried by the tide particles (kg)
    OceanMass,
}

impl fmt::Display for TunableParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TunableParameter::OceanMass => write!(f, "ocean_mass"),
        }
    }
}

// =================================================================================================
// Mass distribution
// =================================================================================================

/// Masses and geometry behind a model's state vector
///
/// Derived quantities (centre of mass, energy, tide positions) need to know
/// how the mass is split between the bodies. The ocean mass is shared evenly
/// between `tide_particles` points glued to the Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassDistribution {
    /// Gravitational constant G (m³ kg⁻¹ s⁻²)
    pub gravitational_constant: f64,

    /// Mass of the solid Earth (kg)
    pub earth_mass: f64,

    /// Mass of the Moon (kg)
    pub moon_mass: f64,

    /// Total ocean mass carried by the tides (kg), 0 for tide-less models
    pub ocean_mass: f64,

    /// Number of tide particles, 0 for tide-less models
    pub tide_particles: usize,

    /// Radius of the Earth (m)
    pub earth_radius: f64,
}

impl MassDistribution {
    /// Mass of one tide particle (0 when the model has no tides)
    pub fn tide_mass(&self) -> f64 {
        if self.tide_particles == 0 {
            0.0
        } else {
            self.ocean_mass / self.tide_particles as f64
        }
    }

    /// Total mass of the system
    pub fn total_mass(&self) -> f64 {
        self.earth_mass + self.moon_mass + self.tide_mass() * self.tide_particles as f64
    }
}

// =================================================================================================
// Physical Model Trait
// =================================================================================================

/// Core trait for all physical models
///
/// A physical model describes a first-order ODE system `dy/dt = f(t, y)`.
/// It provides:
/// - the right-hand side `f` ([`compute_physics`](Self::compute_physics))
/// - the initial conditions
/// - the ordering of the state components (field names)
///
/// Models know nothing about numerical methods: any [`Solver`](crate::solver::Solver)
/// can integrate any model.
///
/// # Thread Safety
///
/// Models must be `Send + Sync` so scenarios can be moved between threads.
///
/// # Example
///
/// ```rust
/// use nalgebra::DVector;
/// use tides_rs::physics::{MassDistribution, PhysicalModel};
///
/// struct Decay;
///
/// impl PhysicalModel for Decay {
///     fn dimension(&self) -> usize { 1 }
///     fn compute_physics(&self, _t: f64, y: &DVector<f64>) -> DVector<f64> { -y }
///     fn setup_initial_state(&self) -> DVector<f64> { DVector::from_element(1, 1.0) }
///     fn name(&self) -> &str { "Decay" }
/// }
///
/// assert_eq!(Decay.field_names(), vec!["y0".to_string()]);
/// ```
pub trait PhysicalModel: Send + Sync {
    /// Number of state components
    fn dimension(&self) -> usize;

    /// Right-hand side of the ODE system at time `t`
    ///
    /// # Panics
    ///
    /// Implementations panic when `state.len() != self.dimension()`.
    fn compute_physics(&self, t: f64, state: &DVector<f64>) -> DVector<f64>;

    /// Initial conditions, of length [`dimension`](Self::dimension)
    fn setup_initial_state(&self) -> DVector<f64>;

    /// Name of every state component, in state-vector order
    ///
    /// The default labels components `y0`, `y1`, ... which suits abstract
    /// test systems; physical models override it.
    fn field_names(&self) -> Vec<String> {
        (0..self.dimension()).map(|i| format!("y{i}")).collect()
    }

    /// Masses and geometry, for models describing celestial bodies
    fn mass_distribution(&self) -> Option<MassDistribution> {
        None
    }

    /// Name of the model (used to display and logging)
    fn name(&self) -> &str;

    /// Description of the model (option)
    fn description(&self) -> Option<&str> {
        None
    }

    /// Current value of a tunable parameter, `None` if unsupported
    fn parameter(&self, _parameter: TunableParameter) -> Option<f64> {
        None
    }

    /// Update a tunable parameter
    ///
    /// The default rejects every parameter.
    fn set_parameter(
        &mut self,
        parameter: TunableParameter,
        _value: f64,
    ) -> Result<(), ParameterError> {
        Err(ParameterError::Unsupported {
            model: self.name().to_string(),
            parameter: parameter.to_string(),
        })
    }
}

// =================================================================================================
// Tests
// =================================================================================================

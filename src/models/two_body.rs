//! Two-body model: Earth and Moon as point masses
//!
//! # State Layout
//!
//! ```text
//! [x_E, vx_E, y_E, vy_E, x_M, vx_M, y_M, vy_M]
//! ```
//!
//! # Equations
//!
//! ```text
//! a_E = −G m_M (r_E − r_M) / |r_E − r_M|³
//! a_M = −G m_E (r_M − r_E) / |r_E − r_M|³
//! ```
//!
//! Started on the default circular orbit the Moon closes its orbit after one
//! sidereal month.

use nalgebra::DVector;

use crate::models::tidal::{ORBITAL_DIMENSION, ORBITAL_FIELDS, Orbits, initial_orbits};
use crate::physics::{MassDistribution, PhysicalConstants, PhysicalModel};

/// Earth–Moon point-mass model
#[derive(Debug, Clone, PartialEq)]
pub struct TwoBody {
    constants: PhysicalConstants,
    initial_state: DVector<f64>,
}

impl TwoBody {
    /// State width
    pub const DIMENSION: usize = ORBITAL_DIMENSION;

    /// Create the model on the default circular orbit
    pub fn new(constants: PhysicalConstants) -> Self {
        Self {
            constants,
            initial_state: DVector::from_row_slice(&initial_orbits(&constants)),
        }
    }

    /// Replace the initial conditions
    ///
    /// # Panics
    ///
    /// Panics if `initial_state` does not have [`Self::DIMENSION`] components.
    pub fn with_initial_conditions(mut self, initial_state: DVector<f64>) -> Self {
        assert_eq!(
            initial_state.len(),
            Self::DIMENSION,
            "TwoBody expects {} initial conditions",
            Self::DIMENSION
        );
        self.initial_state = initial_state;
        self
    }

    /// Constants the model was built with
    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }
}

impl Default for TwoBody {
    fn default() -> Self {
        Self::new(PhysicalConstants::default())
    }
}

impl PhysicalModel for TwoBody {
    fn dimension(&self) -> usize {
        Self::DIMENSION
    }

    fn compute_physics(&self, _t: f64, state: &DVector<f64>) -> DVector<f64> {
        assert_eq!(
            state.len(),
            Self::DIMENSION,
            "TwoBody state must have {} components",
            Self::DIMENSION
        );

        let orbits = Orbits::from_state(state);
        let mut derivative = DVector::zeros(Self::DIMENSION);
        orbits.write_derivative(
            orbits.earth_acceleration(&self.constants),
            orbits.moon_acceleration_from_earth(&self.constants),
            &mut derivative,
        );
        derivative
    }

    fn setup_initial_state(&self) -> DVector<f64> {
        self.initial_state.clone()
    }

    fn field_names(&self) -> Vec<String> {
        ORBITAL_FIELDS.iter().map(|name| name.to_string()).collect()
    }

    fn mass_distribution(&self) -> Option<MassDistribution> {
        Some(MassDistribution {
            gravitational_constant: self.constants.gravitational_constant,
            earth_mass: self.constants.earth_mass,
            moon_mass: self.constants.moon_mass,
            ocean_mass: 0.0,
            tide_particles: 0,
            earth_radius: self.constants.earth_radius,
        })
    }

    fn name(&self) -> &str {
        "Two-Body Earth-Moon"
    }

    fn description(&self) -> Option<&str> {
        Some("Earth and Moon as point masses under mutual gravity")
    }
}

// =================================================================================================
// Tests
// =================================================================================================

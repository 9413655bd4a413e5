//! Four-body model with tidal friction
//!
//! Extends the frictionless four-body model with the Earth's spin. The tide
//! particles rub against the rotating Earth with a quadratic drag, which
//! slows the spin down (the day gets longer) and drags the tides ahead of
//! the Moon.
//!
//! # State Layout
//!
//! ```text
//! [x_E, vx_E, y_E, vy_E, x_M, vx_M, y_M, vy_M,
//!  phi1, vphi1, phi2, vphi2, phi_E, vphi_E]
//! ```
//!
//! # Friction
//!
//! With Δωᵢ = φ̇ᵢ − φ̇_E:
//!
//! ```text
//! φ̈ᵢ  = (frictionless tangential term) − r_E k |Δωᵢ| Δωᵢ
//! φ̈_E = 5/4 · r_E · m_O / m_E · k · Σᵢ |Δωᵢ| Δωᵢ
//! ```
//!
//! The ocean mass m_O is the one parameter that can be tuned after
//! construction (see [`TunableParameter::OceanMass`]).

use std::f64::consts::PI;

use nalgebra::DVector;

use crate::error::ParameterError;
use crate::models::tidal::{
    ORBITAL_DIMENSION, ORBITAL_FIELDS, Orbits, initial_orbits, moon_acceleration,
    quadratic_drag, tide_angular_acceleration,
};
use crate::physics::{MassDistribution, PhysicalConstants, PhysicalModel, TunableParameter};

pub const PHI_1: usize = ORBITAL_DIMENSION;
pub const VPHI_1: usize = ORBITAL_DIMENSION + 1;
pub const PHI_2: usize = ORBITAL_DIMENSION + 2;
pub const VPHI_2: usize = ORBITAL_DIMENSION + 3;
pub const PHI_E: usize = ORBITAL_DIMENSION + 4;
pub const VPHI_E: usize = ORBITAL_DIMENSION + 5;

/// Earth–Moon model with two tide particles and friction against Earth's spin
#[derive(Debug, Clone, PartialEq)]
pub struct FourBodyComplex {
    constants: PhysicalConstants,
    ocean_mass: f64,
    initial_state: DVector<f64>,
}

impl FourBodyComplex {
    /// State width
    pub const DIMENSION: usize = ORBITAL_DIMENSION + 6;

    /// Create the model on the default orbit with the nominal ocean mass
    ///
    /// The tides start on the Earth–Moon axis rotating with the Moon; the
    /// Earth starts at φ_E = 0 spinning once per day.
    pub fn new(constants: PhysicalConstants) -> Self {
        let omega_moon = constants.moon_angular_velocity();

        let mut initial = initial_orbits(&constants).to_vec();
        initial.extend_from_slice(&[
            0.0,
            omega_moon,
            PI,
            omega_moon,
            0.0,
            constants.earth_angular_velocity(),
        ]);

        Self {
            constants,
            ocean_mass: constants.ocean_mass,
            initial_state: DVector::from_vec(initial),
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
            "FourBodyComplex expects {} initial conditions",
            Self::DIMENSION
        );
        self.initial_state = initial_state;
        self
    }

    /// Current ocean mass (kg)
    pub fn ocean_mass(&self) -> f64 {
        self.ocean_mass
    }

    /// Constants the model was built with
    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }
}

impl Default for FourBodyComplex {
    fn default() -> Self {
        Self::new(PhysicalConstants::default())
    }
}

impl PhysicalModel for FourBodyComplex {
    fn dimension(&self) -> usize {
        Self::DIMENSION
    }

    fn compute_physics(&self, _t: f64, state: &DVector<f64>) -> DVector<f64> {
        assert_eq!(
            state.len(),
            Self::DIMENSION,
            "FourBodyComplex state must have {} components",
            Self::DIMENSION
        );

        let constants = &self.constants;
        let orbits = Orbits::from_state(state);
        let (phi1, phi2) = (state[PHI_1], state[PHI_2]);
        let spin = state[VPHI_E];

        // ====== Orbital motion ======

        let earth_acceleration = orbits.earth_acceleration(constants);
        let moon_acceleration =
            moon_acceleration(&orbits, constants, 0.5 * self.ocean_mass, [phi1, phi2]);

        let mut derivative = DVector::zeros(Self::DIMENSION);
        orbits.write_derivative(earth_acceleration, moon_acceleration, &mut derivative);

        // ====== Tides ======

        let drag1 = quadratic_drag(state[VPHI_1] - spin);
        let drag2 = quadratic_drag(state[VPHI_2] - spin);
        let friction = constants.earth_radius * constants.friction_coefficient;

        derivative[PHI_1] = state[VPHI_1];
        derivative[VPHI_1] =
            tide_angular_acceleration(&orbits, constants, earth_acceleration, phi1)
                - friction * drag1;
        derivative[PHI_2] = state[VPHI_2];
        derivative[VPHI_2] =
            tide_angular_acceleration(&orbits, constants, earth_acceleration, phi2)
                - friction * drag2;

        // ====== Earth spin ======

        derivative[PHI_E] = spin;
        derivative[VPHI_E] =
            1.25 * friction * self.ocean_mass / constants.earth_mass * (drag1 + drag2);

        derivative
    }

    fn setup_initial_state(&self) -> DVector<f64> {
        self.initial_state.clone()
    }

    fn field_names(&self) -> Vec<String> {
        ORBITAL_FIELDS
            .iter()
            .chain(["phi1", "vphi1", "phi2", "vphi2", "phi_E", "vphi_E"].iter())
            .map(|name| name.to_string())
            .collect()
    }

    fn mass_distribution(&self) -> Option<MassDistribution> {
        Some(MassDistribution {
            gravitational_constant: self.constants.gravitational_constant,
            earth_mass: self.constants.earth_mass,
            moon_mass: self.constants.moon_mass,
            ocean_mass: self.ocean_mass,
            tide_particles: 2,
            earth_radius: self.constants.earth_radius,
        })
    }

    fn name(&self) -> &str {
        "Four-Body Earth-Moon (tidal friction)"
    }

    fn description(&self) -> Option<&str> {
        Some("Earth, Moon and two tide particles with quadratic friction against Earth's spin")
    }

    fn parameter(&self, parameter: TunableParameter) -> Option<f64> {
        match parameter {
            TunableParameter::OceanMass => Some(self.ocean_mass),
        }
    }

    fn set_parameter(
        &mut self,
        parameter: TunableParameter,
        value: f64,
    ) -> Result<(), ParameterError> {
        match parameter {
            TunableParameter::OceanMass => {
                if !(value.is_finite() && value > 0.0) {
                    return Err(ParameterError::InvalidValue {
                        parameter: parameter.to_string(),
                        value,
                    });
                }
                self.ocean_mass = value;
                Ok(())
            }
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

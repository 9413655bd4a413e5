//! Four-body model without friction
//!
//! Earth, Moon and two tide particles ("high tides") glued to the Earth's
//! surface at angles φ₁ and φ₂. Each particle carries half the ocean mass,
//! pulls on the Moon and is pulled along the surface by it. There is no
//! coupling to the Earth's spin.
//!
//! # State Layout
//!
//! ```text
//! [x_E, vx_E, y_E, vy_E, x_M, vx_M, y_M, vy_M, phi1, vphi1, phi2, vphi2]
//! ```

use std::f64::consts::PI;

use nalgebra::DVector;

use crate::models::tidal::{
    ORBITAL_DIMENSION, ORBITAL_FIELDS, Orbits, initial_orbits, moon_acceleration,
    tide_angular_acceleration,
};
use crate::physics::{MassDistribution, PhysicalConstants, PhysicalModel};

pub const PHI_1: usize = ORBITAL_DIMENSION;
pub const VPHI_1: usize = ORBITAL_DIMENSION + 1;
pub const PHI_2: usize = ORBITAL_DIMENSION + 2;
pub const VPHI_2: usize = ORBITAL_DIMENSION + 3;

/// Earth–Moon model with two frictionless tide particles
#[derive(Debug, Clone, PartialEq)]
pub struct FourBodySimple {
    constants: PhysicalConstants,
    initial_state: DVector<f64>,
}

impl FourBodySimple {
    /// State width
    pub const DIMENSION: usize = ORBITAL_DIMENSION + 4;

    /// Create the model on the default orbit
    ///
    /// The tides start on the Earth–Moon axis (φ = 0 and φ = π) and rotate
    /// with the Moon.
    pub fn new(constants: PhysicalConstants) -> Self {
        let omega = constants.moon_angular_velocity();

        let mut initial = initial_orbits(&constants).to_vec();
        initial.extend_from_slice(&[0.0, omega, PI, omega]);

        Self {
            constants,
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
            "FourBodySimple expects {} initial conditions",
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

impl Default for FourBodySimple {
    fn default() -> Self {
        Self::new(PhysicalConstants::default())
    }
}

impl PhysicalModel for FourBodySimple {
    fn dimension(&self) -> usize {
        Self::DIMENSION
    }

    fn compute_physics(&self, _t: f64, state: &DVector<f64>) -> DVector<f64> {
        assert_eq!(
            state.len(),
            Self::DIMENSION,
            "FourBodySimple state must have {} components",
            Self::DIMENSION
        );

        let orbits = Orbits::from_state(state);
        let (phi1, phi2) = (state[PHI_1], state[PHI_2]);

        let earth_acceleration = orbits.earth_acceleration(&self.constants);
        let moon_acceleration = moon_acceleration(
            &orbits,
            &self.constants,
            0.5 * self.constants.ocean_mass,
            [phi1, phi2],
        );

        let mut derivative = DVector::zeros(Self::DIMENSION);
        orbits.write_derivative(earth_acceleration, moon_acceleration, &mut derivative);

        derivative[PHI_1] = state[VPHI_1];
        derivative[VPHI_1] =
            tide_angular_acceleration(&orbits, &self.constants, earth_acceleration, phi1);
        derivative[PHI_2] = state[VPHI_2];
        derivative[VPHI_2] =
            tide_angular_acceleration(&orbits, &self.constants, earth_acceleration, phi2);

        derivative
    }

    fn setup_initial_state(&self) -> DVector<f64> {
        self.initial_state.clone()
    }

    fn field_names(&self) -> Vec<String> {
        ORBITAL_FIELDS
            .iter()
            .chain(["phi1", "vphi1", "phi2", "vphi2"].iter())
            .map(|name| name.to_string())
            .collect()
    }

    fn mass_distribution(&self) -> Option<MassDistribution> {
        Some(MassDistribution {
            gravitational_constant: self.constants.gravitational_constant,
            earth_mass: self.constants.earth_mass,
            moon_mass: self.constants.moon_mass,
            ocean_mass: self.constants.ocean_mass,
            tide_particles: 2,
            earth_radius: self.constants.earth_radius,
        })
    }

    fn name(&self) -> &str {
        "Four-Body Earth-Moon (frictionless tides)"
    }

    fn description(&self) -> Option<&str> {
        Some("Earth, Moon and two tide particles without friction")
    }
}

// =================================================================================================
// Tests
// =================================================================================================

//! N-body model: N tide particles with friction
//!
//! Generalises the four-body friction model to N particles spread evenly
//! over the Earth's surface, each carrying m_O / N.
//!
//! # State Layout
//!
//! The Earth's spin comes right after the orbital block, followed by one
//! (angle, angular velocity) pair per particle:
//!
//! ```text
//! [x_E, vx_E, y_E, vy_E, x_M, vx_M, y_M, vy_M, phi_E, vphi_E,
//!  phi1, vphi1, ..., phiN, vphiN]
//! ```
//!
//! # Spin coupling
//!
//! ```text
//! φ̈_E = 5/2 · r_E · m_O / (N m_E) · k · Σᵢ |Δωᵢ| Δωᵢ
//! ```
//!
//! For N = 2 this reduces exactly to [`FourBodyComplex`](crate::models::FourBodyComplex).

use std::f64::consts::PI;

use nalgebra::DVector;

use crate::error::ParameterError;
use crate::models::tidal::{
    ORBITAL_DIMENSION, ORBITAL_FIELDS, Orbits, initial_orbits, moon_acceleration,
    quadratic_drag, tide_angular_acceleration,
};
use crate::physics::{MassDistribution, PhysicalConstants, PhysicalModel, TunableParameter};

pub const PHI_E: usize = ORBITAL_DIMENSION;
pub const VPHI_E: usize = ORBITAL_DIMENSION + 1;

/// Index of the first tide angle
pub const FIRST_TIDE: usize = ORBITAL_DIMENSION + 2;

/// Earth–Moon model with N tide particles and tidal friction
#[derive(Debug, Clone, PartialEq)]
pub struct NBody {
    constants: PhysicalConstants,
    tides: usize,
    ocean_mass: f64,
    initial_state: DVector<f64>,
}

impl NBody {
    /// Number of tide particles used by [`Default`]
    pub const DEFAULT_TIDES: usize = 10;

    /// Create the model with `tides` particles
    ///
    /// Particle i starts at angle 2π·i/N rotating with the Moon.
    ///
    /// # Panics
    ///
    /// Panics if `tides` is zero.
    pub fn new(constants: PhysicalConstants, tides: usize) -> Self {
        assert!(tides > 0, "NBody needs at least one tide particle");

        let omega_moon = constants.moon_angular_velocity();

        let mut initial = Vec::with_capacity(FIRST_TIDE + 2 * tides);
        initial.extend_from_slice(&initial_orbits(&constants));
        initial.extend_from_slice(&[0.0, constants.earth_angular_velocity()]);
        for i in 0..tides {
            initial.push(2.0 * PI * i as f64 / tides as f64);
            initial.push(omega_moon);
        }

        Self {
            constants,
            tides,
            ocean_mass: constants.ocean_mass,
            initial_state: DVector::from_vec(initial),
        }
    }

    /// Replace the initial conditions
    ///
    /// # Panics
    ///
    /// Panics if `initial_state` does not have [`dimension`](PhysicalModel::dimension) components.
    pub fn with_initial_conditions(mut self, initial_state: DVector<f64>) -> Self {
        assert_eq!(
            initial_state.len(),
            self.dimension(),
            "NBody with {} tides expects {} initial conditions",
            self.tides,
            self.dimension()
        );
        self.initial_state = initial_state;
        self
    }

    /// Number of tide particles
    pub fn tides(&self) -> usize {
        self.tides
    }

    /// Current ocean mass (kg)
    pub fn ocean_mass(&self) -> f64 {
        self.ocean_mass
    }

    /// Constants the model was built with
    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    /// Index of tide `i`'s angle (0-based)
    fn tide_index(i: usize) -> usize {
        FIRST_TIDE + 2 * i
    }
}

impl Default for NBody {
    fn default() -> Self {
        Self::new(PhysicalConstants::default(), Self::DEFAULT_TIDES)
    }
}

impl PhysicalModel for NBody {
    fn dimension(&self) -> usize {
        FIRST_TIDE + 2 * self.tides
    }

    fn compute_physics(&self, _t: f64, state: &DVector<f64>) -> DVector<f64> {
        assert_eq!(
            state.len(),
            self.dimension(),
            "NBody state must have {} components",
            self.dimension()
        );

        let constants = &self.constants;
        let orbits = Orbits::from_state(state);
        let spin = state[VPHI_E];
        let tide_mass = self.ocean_mass / self.tides as f64;
        let friction = constants.earth_radius * constants.friction_coefficient;

        let earth_acceleration = orbits.earth_acceleration(constants);
        let moon_acceleration = moon_acceleration(
            &orbits,
            constants,
            tide_mass,
            (0..self.tides).map(|i| state[Self::tide_index(i)]),
        );

        let mut derivative = DVector::zeros(self.dimension());
        orbits.write_derivative(earth_acceleration, moon_acceleration, &mut derivative);

        let mut total_drag = 0.0;
        for i in 0..self.tides {
            let phi = Self::tide_index(i);
            let vphi = phi + 1;
            let drag = quadratic_drag(state[vphi] - spin);
            total_drag += drag;

            derivative[phi] = state[vphi];
            derivative[vphi] =
                tide_angular_acceleration(&orbits, constants, earth_acceleration, state[phi])
                    - friction * drag;
        }

        derivative[PHI_E] = spin;
        derivative[VPHI_E] =
            2.5 * friction * tide_mass / constants.earth_mass * total_drag;

        derivative
    }

    fn setup_initial_state(&self) -> DVector<f64> {
        self.initial_state.clone()
    }

    fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = ORBITAL_FIELDS.iter().map(|name| name.to_string()).collect();
        names.push("phi_E".to_string());
        names.push("vphi_E".to_string());
        for i in 1..=self.tides {
            names.push(format!("phi{i}"));
            names.push(format!("vphi{i}"));
        }
        names
    }

    fn mass_distribution(&self) -> Option<MassDistribution> {
        Some(MassDistribution {
            gravitational_constant: self.constants.gravitational_constant,
            earth_mass: self.constants.earth_mass,
            moon_mass: self.constants.moon_mass,
            ocean_mass: self.ocean_mass,
            tide_particles: self.tides,
            earth_radius: self.constants.earth_radius,
        })
    }

    fn name(&self) -> &str {
        "N-Body Earth-Moon (tidal friction)"
    }

    fn description(&self) -> Option<&str> {
        Some("Earth, Moon and N evenly spread tide particles with quadratic friction")
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

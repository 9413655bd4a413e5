//! Gravitational and tidal kernels shared by the Earth–Moon models
//!
//! Every model starts its state vector with the same eight orbital
//! components (Earth then Moon, each as x, vx, y, vy). The helpers here read
//! that block and compute the pieces of the right-hand side the models have
//! in common.
//!
//! Tide particles sit on the Earth's surface at angle φ:
//!
//! ```text
//! x_F = x_E + r_E cos φ
//! y_F = y_E + r_E sin φ
//! ```

use std::f64::consts::PI;

use nalgebra::DVector;

use crate::physics::PhysicalConstants;

// =================================================================================================
// Orbital block layout
// =================================================================================================

pub const X_E: usize = 0;
pub const VX_E: usize = 1;
pub const Y_E: usize = 2;
pub const VY_E: usize = 3;
pub const X_M: usize = 4;
pub const VX_M: usize = 5;
pub const Y_M: usize = 6;
pub const VY_M: usize = 7;

/// Length of the orbital block
pub const ORBITAL_DIMENSION: usize = 8;

/// Field names of the orbital block, in state order
pub const ORBITAL_FIELDS: [&str; ORBITAL_DIMENSION] =
    ["x_E", "vx_E", "y_E", "vy_E", "x_M", "vx_M", "y_M", "vy_M"];

// =================================================================================================
// Orbital state
// =================================================================================================

/// Positions and velocities of the Earth and the Moon
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Orbits {
    pub x_e: f64,
    pub vx_e: f64,
    pub y_e: f64,
    pub vy_e: f64,
    pub x_m: f64,
    pub vx_m: f64,
    pub y_m: f64,
    pub vy_m: f64,
}

impl Orbits {
    /// Read the orbital block at the start of a state vector
    pub fn from_state(state: &DVector<f64>) -> Self {
        Self {
            x_e: state[X_E],
            vx_e: state[VX_E],
            y_e: state[Y_E],
            vy_e: state[VY_E],
            x_m: state[X_M],
            vx_m: state[VX_M],
            y_m: state[Y_M],
            vy_m: state[VY_M],
        }
    }

    /// 1 / |r_M − r_E|³
    pub fn earth_moon_inverse_cube(&self) -> f64 {
        inverse_cube(self.x_m - self.x_e, self.y_m - self.y_e)
    }

    /// Acceleration of the Earth caused by the Moon
    ///
    /// The tides do not pull back on the Earth in any of the models.
    pub fn earth_acceleration(&self, constants: &PhysicalConstants) -> (f64, f64) {
        let factor = -constants.gravitational_constant
            * constants.moon_mass
            * self.earth_moon_inverse_cube();
        (factor * (self.x_e - self.x_m), factor * (self.y_e - self.y_m))
    }

    /// Acceleration of the Moon caused by the Earth alone
    pub fn moon_acceleration_from_earth(&self, constants: &PhysicalConstants) -> (f64, f64) {
        let factor = -constants.gravitational_constant
            * constants.earth_mass
            * self.earth_moon_inverse_cube();
        (factor * (self.x_m - self.x_e), factor * (self.y_m - self.y_e))
    }

    /// Write velocities and accelerations of the orbital block into `derivative`
    pub fn write_derivative(
        &self,
        earth_acceleration: (f64, f64),
        moon_acceleration: (f64, f64),
        derivative: &mut DVector<f64>,
    ) {
        derivative[X_E] = self.vx_e;
        derivative[VX_E] = earth_acceleration.0;
        derivative[Y_E] = self.vy_e;
        derivative[VY_E] = earth_acceleration.1;
        derivative[X_M] = self.vx_m;
        derivative[VX_M] = moon_acceleration.0;
        derivative[Y_M] = self.vy_m;
        derivative[VY_M] = moon_acceleration.1;
    }
}

// =================================================================================================
// Kernels
// =================================================================================================

/// 1 / (dx² + dy²)^(3/2)
pub(crate) fn inverse_cube(dx: f64, dy: f64) -> f64 {
    let squared = dx * dx + dy * dy;
    1.0 / (squared * squared.sqrt())
}

/// Offset from the Moon to a tide particle at angle `phi`
///
/// Returns `(dx, dy, 1/d³)` with `dx = r_E cos φ + x_E − x_M`.
pub(crate) fn tide_moon_offset(orbits: &Orbits, earth_radius: f64, phi: f64) -> (f64, f64, f64) {
    let (sin_phi, cos_phi) = phi.sin_cos();
    let dx = earth_radius * cos_phi + orbits.x_e - orbits.x_m;
    let dy = earth_radius * sin_phi + orbits.y_e - orbits.y_m;
    (dx, dy, inverse_cube(dx, dy))
}

/// Acceleration of the Moon from the Earth plus every tide particle
///
/// Each particle at angle φ carries `tide_mass` and pulls the Moon towards
/// (x_E + r_E cos φ, y_E + r_E sin φ).
pub(crate) fn moon_acceleration(
    orbits: &Orbits,
    constants: &PhysicalConstants,
    tide_mass: f64,
    angles: impl IntoIterator<Item = f64>,
) -> (f64, f64) {
    let (mut ax, mut ay) = orbits.moon_acceleration_from_earth(constants);
    let pull = constants.gravitational_constant * tide_mass;

    for phi in angles {
        let (dx, dy, inverse_d3) = tide_moon_offset(orbits, constants.earth_radius, phi);
        ax += pull * dx * inverse_d3;
        ay += pull * dy * inverse_d3;
    }

    (ax, ay)
}

/// Angular acceleration of a frictionless tide particle at angle `phi`
///
/// Tangential projection of the Moon's pull on the particle, relative to the
/// accelerating Earth centre, divided by r_E:
///
/// ```text
/// φ̈ = 1/r_E · (a_Ex sin φ − a_Ey cos φ
///              − G m_M (dy cos φ − dx sin φ) / d_F³)
/// ```
pub(crate) fn tide_angular_acceleration(
    orbits: &Orbits,
    constants: &PhysicalConstants,
    earth_acceleration: (f64, f64),
    phi: f64,
) -> f64 {
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (dx, dy, inverse_d3) = tide_moon_offset(orbits, constants.earth_radius, phi);

    let moon_pull = constants.gravitational_constant
        * constants.moon_mass
        * (dy * cos_phi - dx * sin_phi)
        * inverse_d3;

    (earth_acceleration.0 * sin_phi - earth_acceleration.1 * cos_phi - moon_pull)
        / constants.earth_radius
}

/// Quadratic friction term |Δω|·Δω
///
/// Odd in Δω: the drag always opposes the relative rotation.
pub(crate) fn quadratic_drag(relative_angular_velocity: f64) -> f64 {
    relative_angular_velocity.abs() * relative_angular_velocity
}

/// Default orbital block: circular orbits about the barycentre
///
/// The Earth starts at (−r_C, 0) and the Moon at (r_M − r_C, 0), both moving
/// along +y/−y with the Moon's mean angular velocity.
pub(crate) fn initial_orbits(constants: &PhysicalConstants) -> [f64; ORBITAL_DIMENSION] {
    let r_c = constants.barycenter_offset();
    let omega = 2.0 * PI / constants.moon_period;
    let moon_radius = constants.moon_distance - r_c;

    [
        -r_c,
        0.0,
        0.0,
        -omega * r_c,
        moon_radius,
        0.0,
        0.0,
        omega * moon_radius,
    ]
}

// =================================================================================================
// Tests
// =================================================================================================

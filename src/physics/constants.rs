//! Physical constants of the Earth–Moon system
//!
//! [`PhysicalConstants`] is an immutable configuration value handed to every
//! model constructor. Defaults are the Earth–Moon values; any subset can be
//! overridden from YAML:
//!
//! ```rust
//! use tides_rs::physics::PhysicalConstants;
//!
//! let constants = PhysicalConstants::from_yaml_str("friction_coefficient: 4.0e-12").unwrap();
//! assert_eq!(constants.friction_coefficient, 4.0e-12);
//! assert_eq!(constants.moon_mass, PhysicalConstants::default().moon_mass);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// =================================================================================================
// Time units
// =================================================================================================

/// Seconds in one day
pub const SECONDS_PER_DAY: f64 = 24.0 * 60.0 * 60.0;

/// Days in one year (Julian-ish, as used for the day-length drift)
pub const DAYS_PER_YEAR: f64 = 365.24;

/// Seconds in one year
pub const SECONDS_PER_YEAR: f64 = DAYS_PER_YEAR * SECONDS_PER_DAY;

/// Default integration window: 60 days starting at t = 0
pub const DEFAULT_TIME_BOUNDARIES: (f64, f64) = (0.0, 60.0 * SECONDS_PER_DAY);

// =================================================================================================
// Physical constants
// =================================================================================================

/// Constants of the Earth–Moon system (SI units)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalConstants {
    /// Gravitational constant G (m³ kg⁻¹ s⁻²)
    pub gravitational_constant: f64,

    /// Mass of the Earth (kg)
    pub earth_mass: f64,

    /// Nominal mass of the ocean moved by the tides (kg)
    pub ocean_mass: f64,

    /// Radius of the Earth (m)
    pub earth_radius: f64,

    /// Mass of the Moon (kg)
    pub moon_mass: f64,

    /// Mean Earth–Moon distance (m)
    pub moon_distance: f64,

    /// Sidereal orbital period of the Moon (s)
    pub moon_period: f64,

    /// Initial rotation period of the Earth (s)
    pub earth_rotation_period: f64,

    /// Friction coefficient k between tides and Earth
    pub friction_coefficient: f64,

    /// Observed day-length increase per century (s)
    pub day_lengthening_per_century: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            gravitational_constant: 6.67430e-11,
            earth_mass: 5.9721986e24,
            ocean_mass: 0.0014e24,
            earth_radius: 6.3675e6,
            moon_mass: 7.3459e22,
            moon_distance: 3.836e8,
            moon_period: 27.32166140 * SECONDS_PER_DAY,
            earth_rotation_period: SECONDS_PER_DAY,
            friction_coefficient: 2e-12,
            day_lengthening_per_century: 0.0021,
        }
    }
}

impl PhysicalConstants {
    /// Parse constants from YAML, then validate them
    ///
    /// Fields absent from the document keep their default value.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let constants: Self = serde_yaml::from_str(yaml)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Serialize to YAML
    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check that every constant is finite and strictly positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("gravitational_constant", self.gravitational_constant),
            ("earth_mass", self.earth_mass),
            ("ocean_mass", self.ocean_mass),
            ("earth_radius", self.earth_radius),
            ("moon_mass", self.moon_mass),
            ("moon_distance", self.moon_distance),
            ("moon_period", self.moon_period),
            ("earth_rotation_period", self.earth_rotation_period),
            ("friction_coefficient", self.friction_coefficient),
            ("day_lengthening_per_century", self.day_lengthening_per_century),
        ];

        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name });
            }
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        Ok(())
    }

    /// Distance from the Earth's centre to the Earth–Moon barycentre
    ///
    /// r_C = r_M · m_M / (m_M + m_E)
    pub fn barycenter_offset(&self) -> f64 {
        self.moon_distance * self.moon_mass / (self.moon_mass + self.earth_mass)
    }

    /// Mean orbital angular velocity of the Moon (rad/s)
    pub fn moon_angular_velocity(&self) -> f64 {
        2.0 * PI / self.moon_period
    }

    /// Initial spin angular velocity of the Earth (rad/s)
    pub fn earth_angular_velocity(&self) -> f64 {
        2.0 * PI / self.earth_rotation_period
    }
}

// =================================================================================================
// Tests
// =================================================================================================

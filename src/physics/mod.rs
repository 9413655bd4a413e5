//! Physical models
//!
//! This module provides the trait every model implements and the constants
//! the Earth–Moon models are built from.
//!
//! # Architecture
//!
//! Physical models are **separate from numerical solvers**:
//! - The model provides the **equations** (gravity, tidal friction)
//! - The solver provides the **method** to solve them (Euler, RK4, adaptive)
//!
//! This separation allows:
//! - Same model with different solvers
//! - Same solver with different models (two-body, four-body, n-body)
//!
//! # Example
//!
//! ```rust
//! use tides_rs::models::TwoBody;
//! use tides_rs::physics::{PhysicalConstants, PhysicalModel};
//!
//! let model = TwoBody::new(PhysicalConstants::default());
//!
//! // Initial state and the derivative at t = 0
//! let initial_state = model.setup_initial_state();
//! let derivative = model.compute_physics(0.0, &initial_state);
//! assert_eq!(derivative.len(), model.dimension());
//! ```
//!
//! # Available Models
//!
//! - **TwoBody**: Earth and Moon as point masses
//! - **FourBodySimple**: two frictionless tide particles on the Earth's surface
//! - **FourBodyComplex**: two tide particles with friction against the spinning Earth
//! - **NBody**: N tide particles with friction

pub mod constants;
pub mod traits;

pub use constants::{
    DAYS_PER_YEAR,
    DEFAULT_TIME_BOUNDARIES,
    PhysicalConstants,
    SECONDS_PER_DAY,
    SECONDS_PER_YEAR,
};
pub use traits::{MassDistribution, PhysicalModel, TunableParameter};

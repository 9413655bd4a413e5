//! Earth–Moon models
//!
//! All models implement the [`PhysicalModel`](crate::physics::PhysicalModel) trait.
//! The solver calls `compute_physics` at each stage; models are responsible
//! for the physics (gravity, tidal friction), the solver for the time integration.
//!
//! Every state vector starts with the same orbital block
//! `[x_E, vx_E, y_E, vy_E, x_M, vx_M, y_M, vy_M]`.
//!
//! # Available Models
//!
//! ## [`TwoBody`]: point masses
//!
//! Earth and Moon under mutual gravity. The baseline for orbit closure and
//! energy conservation checks.
//!
//! ## [`FourBodySimple`]: frictionless tides
//!
//! Two tide particles on the Earth's surface, each half the ocean mass. They
//! pull on the Moon and follow it around, with no friction.
//!
//! ## [`FourBodyComplex`]: tidal friction
//!
//! Adds the Earth's spin. Friction between tides and the spinning Earth
//! lengthens the day. The ocean mass is tunable.
//!
//! ## [`NBody`]: N tides with friction
//!
//! Same physics as `FourBodyComplex` with any number of evenly spread tide
//! particles (10 by default).
//!
//! # Custom initial conditions
//!
//! Every model accepts `with_initial_conditions`, e.g. to launch the Moon 30 %
//! too fast and watch the orbit turn elliptic.

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod four_body_complex;
pub mod four_body_simple;
pub mod n_body;
pub mod tidal;
pub mod two_body;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use four_body_complex::FourBodyComplex;
pub use four_body_simple::FourBodySimple;
pub use n_body::NBody;
pub use two_body::TwoBody;

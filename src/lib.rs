//! tides-rs: Earth–Moon Tidal Friction Simulation
//!
//! Numerical integration of the gravitational and tidal dynamics of an
//! Earth–Moon system, from two point masses up to a ring of N tide
//! particles dragged by the spinning Earth. Built with Rust for performance
//! and safety.
//!
//! # Architecture
//!
//! tides-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - Physical models define equations (what to solve)
//!    - Numerical solvers provide methods (how to solve)
//!
//! 2. **Extensibility and Type Safety**
//!    - Trait-based design for easy extension
//!    - Named solution fields instead of raw column indices
//!    - Typed errors for every fallible step
//!
//! # Quick Start
//!
//! ```rust
//! use tides_rs::prelude::*;
//!
//! # fn main() -> Result<(), SimulationError> {
//! // 1. Configure physical model and time window
//! let model = Box::new(FourBodyComplex::new(PhysicalConstants::default()));
//! let boundaries = TimeBoundaries::new(0.0, 30.0 * SECONDS_PER_DAY, 500);
//!
//! // 2. Build and run the simulation
//! let mut simulation = Simulation::new(model, boundaries, Box::new(RK4Solver::new()));
//! let solution = simulation.solve()?;
//!
//! // 3. Access results
//! println!("Samples: {}", solution.len());
//! let day_length = simulation.derived()?.day_length()?;
//! println!("Final day length: {:.3} s", day_length[day_length.len() - 1]);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: Constants and the model trait
//! - [`models`]: Two-body, four-body and N-body Earth–Moon models
//! - [`solver`]: Numerical solvers (Euler, RK4, adaptive)
//! - [`simulation`]: Named solutions and derived quantities
//! - [`fitting`]: Ocean mass calibration against the observed day lengthening
//! - [`error`]: Error types

// Core modules
pub mod error;
pub mod physics;

pub mod models;
pub mod solver;

pub mod fitting;
pub mod simulation;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //!
    //! use tides_rs::prelude::*;
    //! ```
    pub use crate::error::{FitError, SimulationError, SolverError};
    pub use crate::fitting::{FitConfig, FitReport, OceanMassFitter};
    pub use crate::models::{FourBodyComplex, FourBodySimple, NBody, TwoBody};
    pub use crate::physics::{
        PhysicalConstants,
        PhysicalModel,
        SECONDS_PER_DAY,
        SECONDS_PER_YEAR,
        TunableParameter,
    };
    pub use crate::simulation::{Body, DerivedQuantities, Simulation, Solution};
    pub use crate::solver::{
        AdaptiveSolver,
        EulerSolver,
        RK4Solver,
        Scenario,
        SimulationResult,
        Solver,
        TimeBoundaries,
    };
}

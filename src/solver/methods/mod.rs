//! Numerical methods for solving differential equations
//!
//! This module contains concrete implementations of the [`Solver`](crate::solver::Solver) trait.
//!
//! # Architecture
//!
//! The separation between the abstract solver interface (`solver::traits`) and
//! concrete implementations (`solver::methods`) keeps the trait closed while
//! new methods are added here.
//!
//! # Available Methods
//!
//! ## Fixed-step explicit methods
//!
//! Sample the half-open grid `t₀ + k·h`, `k = 0..n`.
//!
//! - **[`EulerSolver`]**: Forward Euler method
//!   - Order: First-order O(h)
//!   - Cost: 1 function evaluation per step
//!   - Use: reference method, quick exploratory runs
//!
//! - **[`RK4Solver`]**: Classical fourth-order Runge-Kutta
//!   - Order: Fourth-order O(h⁴)
//!   - Cost: 4 function evaluations per step
//!   - Use: **default for the Earth–Moon models**
//!
//! ## Adaptive methods
//!
//! Sample the closed grid over `[t₀, t₁]`.
//!
//! - **[`AdaptiveSolver`]**: wraps any [`AdaptiveIntegrator`]
//!   - Built-in: [`IvpIntegrator`], Radau IIA (default) or DOP853 from the `ivp` crate
//!
//! # Design Philosophy
//!
//! Each solver is:
//! - **Self-contained**: No shared mutable state
//! - **Stateless**: Can be reused for multiple simulations
//! - **Checked**: every new state is tested for NaN and infinity

pub mod adaptive;
pub mod euler;
pub mod rk4;

// Re-exports for convenience
pub use adaptive::{
    AdaptiveIntegrator, AdaptiveSolver, IntegrationMethod, IntegratorOutput, IvpIntegrator,
};
pub use euler::EulerSolver;
pub use rk4::RK4Solver;

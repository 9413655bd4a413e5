//! Runge-Kutta 4 (RK4) numerical solver
//!
//! # Mathematical Background
//!
//! The classical fourth-order Runge-Kutta method uses a weighted average of
//! four slope estimates per step:
//!
//! ```text
//! k₁ = h · f(t, y)
//! k₂ = h · f(t + h/2, y + k₁/2)
//! k₃ = h · f(t + h/2, y + k₂/2)
//! k₄ = h · f(t + h,   y + k₃)
//!
//! y' = y + (k₁ + 2k₂ + 2k₃ + k₄) / 6
//! ```
//!
//! # Characteristics
//!
//! - **Order**: Fourth-order accurate (error ~ O(h⁴))
//! - **Complexity**: 4 function evaluations per step
//! - **Memory**: O(1) besides the stored trajectory
//!
//! # When to Use
//!
//! - Default choice for the Earth–Moon models on a fixed grid
//! - Two months of orbit with 150 samples keeps the energy error well below 1 %
//!
//! # When NOT to Use
//!
//! - Need error control or samples exactly at the interval end → use
//!   [`AdaptiveSolver`](crate::solver::AdaptiveSolver)
//!
//! # Comparison with Euler
//!
//! | Method | Order | Evals/Step | Error |
//! |--------|-------|------------|-------|
//! | Euler  | 1     | 1          | O(h)  |
//! | RK4    | 4     | 4          | O(h⁴) |

use nalgebra::DMatrix;

use crate::error::SolverError;
use crate::solver::{Scenario, SimulationResult, Solver, validate_state};

// =================================================================================================
// RK4 Solver
// =================================================================================================

/// Classical fourth-order Runge-Kutta solver
///
/// # Algorithm
///
/// 1. Build the half-open grid t_k = t₀ + k·h, k = 0..n, h = (t₁ − t₀)/n
/// 2. Store the initial state as sample 0
/// 3. For k = 1..n, starting from (t_{k-1}, y_{k-1}):
///    - **Stage 1**: k₁ = h·f(t, y), increment from the slope at the beginning
///    - **Stage 2**: k₂ = h·f(t + h/2, y + k₁/2), midpoint increment using k₁
///    - **Stage 3**: k₃ = h·f(t + h/2, y + k₂/2), midpoint increment using k₂
///    - **Stage 4**: k₄ = h·f(t + h, y + k₃), increment at the end using k₃
///    - **Update**: y_k = y + (k₁ + 2k₂ + 2k₃ + k₄)/6
///
/// The stages hold increments rather than slopes, so the rounding of every
/// sample matches trajectories produced with that formulation.
///
/// # Error Analysis
///
/// - **Local truncation error**: O(h⁵) per step
/// - **Global error**: O(h⁴)
///
/// **Practical implication**: halving h reduces the error by a factor of 16.
///
/// # Example
///
/// ```rust
/// use tides_rs::models::FourBodyComplex;
/// use tides_rs::solver::{RK4Solver, Scenario, Solver, TimeBoundaries};
///
/// let scenario = Scenario::new(
///     Box::new(FourBodyComplex::default()),
///     TimeBoundaries::new(0.0, 86_400.0, 200),
/// );
/// let result = RK4Solver::new().solve(&scenario).unwrap();
/// assert_eq!(result.dimension(), 14);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RK4Solver;

impl RK4Solver {
    /// Create a new RK4 solver
    ///
    /// # Example
    ///
    /// ```rust
    /// use tides_rs::solver::{RK4Solver, Solver};
    ///
    /// let solver = RK4Solver::new();
    /// assert_eq!(solver.name(), "Runge Kutta (RK4)");
    /// ```
    pub fn new() -> Self {
        Self
    }
}

impl Solver for RK4Solver {
    fn solve(&self, scenario: &Scenario) -> Result<SimulationResult, SolverError> {
        // ====== Step 1: Validation ======

        scenario.validate()?;

        // ====== Step 2: Setup ======

        let boundaries = &scenario.boundaries;
        let h = boundaries.step_size();
        let half = h / 2.0;
        let time_points = boundaries.fixed_step_grid();

        let mut state = scenario.initial_state();

        let mut states = DMatrix::zeros(time_points.len(), state.len());
        states.set_row(0, &state.transpose());

        // ====== Step 3: Time Integration ======

        let model = &scenario.model;

        for k in 1..time_points.len() {
            let t = time_points[k - 1];

            // ====== RK4 Stages ======

            let k1 = model.compute_physics(t, &state) * h;
            let k2 = model.compute_physics(t + half, &(&state + &k1 / 2.0)) * h;
            let k3 = model.compute_physics(t + half, &(&state + &k2 / 2.0)) * h;
            let k4 = model.compute_physics(t + h, &(&state + &k3)) * h;

            // ====== RK4 Update ======

            // Simpson weights: 1/6 at the ends, 1/3 at the midpoints
            state += (k1 + k2 * 2.0 + k3 * 2.0 + k4) / 6.0;

            // ====== Validation and Storage ======

            validate_state(&state, k, time_points[k])?;
            states.set_row(k, &state.transpose());
        }

        // ====== Step 4: Build Result ======

        let steps = time_points.len() - 1;
        log::debug!(
            "{} on `{}`: {} steps of {:.3e} s",
            self.name(),
            scenario.model_name(),
            steps,
            h
        );

        let mut result = SimulationResult::new(time_points, states);
        result.add_metadata("solver", "Runge-Kutta 4");
        result.add_metadata("time steps", &steps.to_string());
        result.add_metadata("dt", &h.to_string());
        result.add_metadata("function evaluations", &(4 * steps).to_string());

        Ok(result)
    }

    fn name(&self) -> &str {
        "Runge Kutta (RK4)"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

//! Forward Euler numerical solver
//!
//! # Mathematical Background
//!
//! The Forward Euler method is the simplest explicit time-stepping scheme
//! for solving ordinary differential equations (ODEs):
//!
//! ```text
//! dy/dt = f(t, y)
//! ```
//!
//! The scheme approximates the solution at time t_{k} = t_{k-1} + h using:
//!
//! ```text
//! y_k = y_{k-1} + h · f(t_{k-1}, y_{k-1})
//! ```
//!
//! # Characteristics
//!
//! - **Order**: First-order accurate (error ~ O(h))
//! - **Stability**: Conditionally stable; on orbits it spirals outwards
//! - **Complexity**: 1 function evaluation per step
//! - **Memory**: O(1) besides the stored trajectory
//!
//! # When to Use
//!
//! - Reference low-order method for comparisons
//! - Quick exploratory runs
//!
//! # When NOT to Use
//!
//! - Orbital problems over more than a few days: energy drifts steadily
//!   upward → use RK4 or the adaptive solver
//!
//! # Example
//!
//! ```rust
//! use tides_rs::models::TwoBody;
//! use tides_rs::solver::{EulerSolver, Scenario, Solver, TimeBoundaries};
//!
//! let scenario = Scenario::new(Box::new(TwoBody::default()), TimeBoundaries::default_window(100));
//! let result = EulerSolver::new().solve(&scenario).unwrap();
//! assert_eq!(result.len(), 100);
//! ```

use nalgebra::DMatrix;

use crate::error::SolverError;
use crate::solver::{Scenario, SimulationResult, Solver, validate_state};

// =================================================================================================
// Forward Euler Solver
// =================================================================================================

/// Forward Euler time-stepping solver
///
/// # Algorithm
///
/// 1. Build the half-open grid t_k = t₀ + k·h, k = 0..n, h = (t₁ − t₀)/n
/// 2. Store the initial state as sample 0
/// 3. For k = 1..n: y_k = y_{k-1} + h·f(t_{k-1}, y_{k-1}), check it is finite, store it
///
/// `n` samples therefore cost `n − 1` steps; a single sample returns the
/// initial state untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerSolver;

impl EulerSolver {
    /// Create a new Euler solver
    ///
    /// # Example
    ///
    /// ```rust
    /// use tides_rs::solver::{EulerSolver, Solver};
    ///
    /// let solver = EulerSolver::new();
    /// assert_eq!(solver.name(), "Forward Euler");
    /// ```
    pub fn new() -> Self {
        Self
    }
}

impl Solver for EulerSolver {
    fn solve(&self, scenario: &Scenario) -> Result<SimulationResult, SolverError> {
        // ====== Step 1: Validation ======

        scenario.validate()?;

        // ====== Step 2: Setup ======

        let boundaries = &scenario.boundaries;
        let h = boundaries.step_size();
        let time_points = boundaries.fixed_step_grid();

        let mut state = scenario.initial_state();

        // Pre-size the trajectory: one row per sample
        let mut states = DMatrix::zeros(time_points.len(), state.len());
        states.set_row(0, &state.transpose());

        // ====== Step 3: Time Integration ======

        for k in 1..time_points.len() {
            let t = time_points[k - 1];

            // y_k = y_{k-1} + h · f(t_{k-1}, y_{k-1})
            let derivative = scenario.model.compute_physics(t, &state);
            state += derivative * h;

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
        result.add_metadata("solver", "Forward Euler");
        result.add_metadata("time steps", &steps.to_string());
        result.add_metadata("dt", &h.to_string());
        result.add_metadata("function evaluations", &steps.to_string());

        Ok(result)
    }

    fn name(&self) -> &str {
        "Forward Euler"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::PhysicalModel;
    use crate::solver::TimeBoundaries;
    use nalgebra::DVector;

    // ====== Mock Models for Testing ======

    /// Mock model: exponential decay dy/dt = -k * y
    ///
    /// Analytical solution: y(t) = y_0 * exp(-k * t)
    struct ExponentialDecay {
        points: usize,
        decay_rate: f64,
    }

    impl PhysicalModel for ExponentialDecay {
        fn dimension(&self) -> usize {
            self.points
        }

        fn compute_physics(&self, _t: f64, state: &DVector<f64>) -> DVector<f64> {
            state * -self.decay_rate
        }

        fn setup_initial_state(&self) -> DVector<f64> {
            DVector::from_element(self.points, 1.0)
        }

        fn name(&self) -> &str {
            "Exponential Decay"
        }
    }

    /// Mock model: constant growth dy/dt = c
    struct ConstantGrowth {
        points: usize,
        growth_rate: f64,
    }

    impl PhysicalModel for ConstantGrowth {
        fn dimension(&self) -> usize {
            self.points
        }

        fn compute_physics(&self, _t: f64, _state: &DVector<f64>) -> DVector<f64> {
            DVector::from_element(self.points, self.growth_rate)
        }

        fn setup_initial_state(&self) -> DVector<f64> {
            DVector::zeros(self.points)
        }

        fn name(&self) -> &str {
            "Constant Growth"
        }
    }

    /// Mock model: dy/dt = t, records nothing but the time it is called at
    struct Ramp;

    impl PhysicalModel for Ramp {
        fn dimension(&self) -> usize {
            1
        }

        fn compute_physics(&self, t: f64, _state: &DVector<f64>) -> DVector<f64> {
            DVector::from_element(1, t)
        }

        fn setup_initial_state(&self) -> DVector<f64> {
            DVector::zeros(1)
        }

        fn name(&self) -> &str {
            "Ramp"
        }
    }

    fn scenario(model: impl PhysicalModel + 'static, start: f64, end: f64, n: usize) -> Scenario {
        Scenario::new(Box::new(model), TimeBoundaries::new(start, end, n))
    }

    // ====== Solver creation tests ======

    #[test]
    fn test_euler_solver_creation() {
        assert_eq!(EulerSolver::new().name(), "Forward Euler");
        assert_eq!(EulerSolver.name(), "Forward Euler");
    }

    // ====== Boundary tests ======

    #[test]
    fn test_euler_rejects_invalid_boundaries() {
        let model = ConstantGrowth { points: 2, growth_rate: 1.0 };
        let result = EulerSolver::new().solve(&scenario(model, 1.0, 0.0, 10));
        assert!(matches!(result, Err(SolverError::InvalidTimeBoundaries { .. })));

        let model = ConstantGrowth { points: 2, growth_rate: 1.0 };
        let result = EulerSolver::new().solve(&scenario(model, 0.0, 1.0, 0));
        assert_eq!(result, Err(SolverError::NoDataPoints));
    }

    #[test]
    fn test_euler_single_point_returns_initial_state() {
        let model = ConstantGrowth { points: 3, growth_rate: 5.0 };
        let result = EulerSolver::new().solve(&scenario(model, 2.0, 4.0, 1)).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result.time_points, vec![2.0]);
        assert_eq!(result.state_at(0), DVector::zeros(3));
    }

    // ====== Trajectory Tests ======

    #[test]
    fn test_euler_trajectory_length_and_grid() {
        let model = ConstantGrowth { points: 5, growth_rate: 1.0 };
        let result = EulerSolver::new().solve(&scenario(model, 0.0, 20.0, 100)).unwrap();

        assert_eq!(result.len(), 100);
        assert_eq!(result.states.nrows(), 100);
        assert_eq!(result.states.ncols(), 5);
        assert_eq!(result.time_points[0], 0.0);

        // Half-open grid: the last sample is one step short of the end
        let last = *result.time_points.last().unwrap();
        assert!((last - 19.8).abs() < 1e-10);
        for pair in result.time_points.windows(2) {
            assert!((pair[1] - pair[0] - 0.2).abs() < 1e-10);
        }
    }

    // ====== Numerical accuracy tests ======

    #[test]
    fn test_euler_constant_growth_is_exact() {
        let model = ConstantGrowth { points: 5, growth_rate: 2.0 };
        let result = EulerSolver::new().solve(&scenario(model, 0.0, 10.0, 100)).unwrap();

        // y(t) = 2t at every sample
        for (k, &t) in result.time_points.iter().enumerate() {
            assert!((result.states[(k, 0)] - 2.0 * t).abs() < 1e-10);
        }
    }

    #[test]
    fn test_euler_uses_left_endpoint_time() {
        // dy/dt = t: Euler gives y_k = h² · k(k-1)/2 from t0 = 0
        let result = EulerSolver::new().solve(&scenario(Ramp, 0.0, 4.0, 4)).unwrap();
        let expected = [0.0, 0.0, 1.0, 3.0];

        for (k, value) in expected.iter().enumerate() {
            assert!((result.states[(k, 0)] - value).abs() < 1e-12, "sample {k}");
        }
    }

    #[test]
    fn test_euler_exponential_decay() {
        let decay_rate = 0.1;
        let model = ExponentialDecay { points: 5, decay_rate };
        let result = EulerSolver::new().solve(&scenario(model, 0.0, 10.0, 1000)).unwrap();

        let t_final = *result.time_points.last().unwrap();
        let expected = (-decay_rate * t_final).exp();
        let actual = result.final_state().unwrap()[0];

        // First-order: error ~ h = 0.01
        assert!((actual - expected).abs() < 1e-3);
    }

    // ====== Metadata Tests ======

    #[test]
    fn test_euler_metadata() {
        let model = ConstantGrowth { points: 5, growth_rate: 1.0 };
        let result = EulerSolver::new().solve(&scenario(model, 0.0, 100.0, 500)).unwrap();

        assert_eq!(result.metadata.get("solver"), Some(&"Forward Euler".to_string()));
        assert_eq!(result.metadata.get("time steps"), Some(&"499".to_string()));
        assert_eq!(result.metadata.get("function evaluations"), Some(&"499".to_string()));

        let dt: f64 = result.metadata["dt"].parse().unwrap();
        assert!((dt - 0.2).abs() < 1e-10);
    }

    // ====== Validation Tests ======

    #[test]
    fn test_euler_detects_nan() {
        struct NaNModel;

        impl PhysicalModel for NaNModel {
            fn dimension(&self) -> usize {
                2
            }

            fn compute_physics(&self, _t: f64, _state: &DVector<f64>) -> DVector<f64> {
                DVector::from_vec(vec![0.0, f64::NAN])
            }

            fn setup_initial_state(&self) -> DVector<f64> {
                DVector::from_element(2, 1.0)
            }

            fn name(&self) -> &str {
                "NaN Model"
            }
        }

        let error = EulerSolver::new().solve(&scenario(NaNModel, 0.0, 10.0, 10)).unwrap_err();
        assert_eq!(
            error,
            SolverError::NonFiniteState {
                step: 1,
                time: 1.0,
                component: 1,
            }
        );
    }
}

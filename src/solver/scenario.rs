//! Simulation scenario definition
//!
//! A scenario combines a physical model with the time boundaries to
//! integrate it over.

use std::fmt;

use crate::error::SolverError;
use crate::physics::PhysicalModel;
use crate::solver::TimeBoundaries;

/// Simulation scenario
///
/// Defines a specific case to simulate:
/// - Physical model (equations and initial conditions)
/// - Time boundaries (interval and sampling)
///
/// # Design
///
/// The same scenario can be solved with different numerical methods.
/// This is the "WHAT to solve" (not "HOW to solve").
///
/// # Examples
///
/// ```rust
/// use tides_rs::models::TwoBody;
/// use tides_rs::solver::{EulerSolver, RK4Solver, Scenario, Solver, TimeBoundaries};
///
/// let scenario = Scenario::new(Box::new(TwoBody::default()), TimeBoundaries::default_window(50));
///
/// // Solve with different methods
/// let euler = EulerSolver::new().solve(&scenario).unwrap();
/// let rk4 = RK4Solver::new().solve(&scenario).unwrap();
/// assert_eq!(euler.len(), rk4.len());
/// ```
pub struct Scenario {
    /// Physical model (equations)
    pub model: Box<dyn PhysicalModel>,

    /// Time interval and sampling
    pub boundaries: TimeBoundaries,
}

impl Scenario {
    /// Create a scenario
    pub fn new(model: Box<dyn PhysicalModel>, boundaries: TimeBoundaries) -> Self {
        Self { model, boundaries }
    }

    /// Check the time boundaries
    pub fn validate(&self) -> Result<(), SolverError> {
        self.boundaries.validate()
    }

    /// Get model name
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Width of the model's state vector
    pub fn dimension(&self) -> usize {
        self.model.dimension()
    }

    /// Initial state, checked against the model's dimension
    ///
    /// # Panics
    ///
    /// Panics if the model's initial state does not match its dimension.
    pub fn initial_state(&self) -> nalgebra::DVector<f64> {
        let initial = self.model.setup_initial_state();
        assert_eq!(
            initial.len(),
            self.dimension(),
            "initial state of `{}` has {} components, expected {}",
            self.model_name(),
            initial.len(),
            self.dimension()
        );
        initial
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.model_name())
            .field("dimension", &self.dimension())
            .field("boundaries", &self.boundaries)
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================

#[cfg(test)]
mod tests {
    use nalgebra::DVector;

    use super::*;

    // Mocking a Physical model
    struct MockModel {
        initial: usize,
    }

    impl PhysicalModel for MockModel {
        fn dimension(&self) -> usize {
            10
        }

        fn compute_physics(&self, _t: f64, state: &DVector<f64>) -> DVector<f64> {
            state.clone()
        }

        fn setup_initial_state(&self) -> DVector<f64> {
            DVector::zeros(self.initial)
        }

        fn name(&self) -> &str {
            "MockModel"
        }
    }

    #[test]
    fn test_scenario_creation() {
        let model = Box::new(MockModel { initial: 10 });
        let scenario = Scenario::new(model, TimeBoundaries::new(0.0, 1.0, 10));

        assert_eq!(scenario.model_name(), "MockModel");
        assert_eq!(scenario.dimension(), 10);
        assert!(scenario.validate().is_ok());
        assert_eq!(scenario.initial_state().len(), 10);
        assert!(format!("{scenario:?}").contains("MockModel"));
    }

    #[test]
    fn test_scenario_validation_forwards_boundaries() {
        let model = Box::new(MockModel { initial: 10 });
        let scenario = Scenario::new(model, TimeBoundaries::new(0.0, 1.0, 0));
        assert_eq!(scenario.validate(), Err(SolverError::NoDataPoints));
    }

    #[test]
    #[should_panic(expected = "initial state of `MockModel` has 3 components, expected 10")]
    fn test_inconsistent_initial_state_panics() {
        let model = Box::new(MockModel { initial: 3 });
        let scenario = Scenario::new(model, TimeBoundaries::new(0.0, 1.0, 10));
        let _ = scenario.initial_state();
    }
}

//! Numerical solver trait and result type
//!
//! # Stability Guarantee
//!
//! - `Solver` trait: object safe, stateless between calls
//! - `SimulationResult`: one row per sampled time point, fields won't be removed

use std::collections::HashMap;

use nalgebra::{DMatrix, DVector};

use crate::error::SolverError;
use crate::solver::Scenario;

// =================================================================================================
// Solver trait
// =================================================================================================

/// A numerical method integrating a [`Scenario`]
///
/// Solvers hold no state between calls: the same solver can be reused for
/// any number of scenarios, and the same scenario can be solved by any
/// number of solvers.
///
/// # Contract
///
/// On success the result holds exactly `scenario.boundaries.data_points`
/// samples, the first of which is the model's initial state at
/// `scenario.boundaries.start`.
pub trait Solver {
    /// Integrate the scenario over its time boundaries
    fn solve(&self, scenario: &Scenario) -> Result<SimulationResult, SolverError>;

    /// Human readable name of the method
    fn name(&self) -> &str;
}

// =================================================================================================
// Simulation result
// =================================================================================================

/// Sampled trajectory returned by a solver
///
/// `states` has one row per time point and one column per state component.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// Sampled times (s)
    pub time_points: Vec<f64>,

    /// State at each sampled time, row `k` ↔ `time_points[k]`
    pub states: DMatrix<f64>,

    /// Free-form solver diagnostics (step size, function evaluations, ...)
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    /// Create a result
    ///
    /// # Panics
    ///
    /// Panics if the number of rows of `states` differs from the number of
    /// time points.
    pub fn new(time_points: Vec<f64>, states: DMatrix<f64>) -> Self {
        assert_eq!(
            time_points.len(),
            states.nrows(),
            "SimulationResult needs one state row per time point"
        );
        Self {
            time_points,
            states,
            metadata: HashMap::new(),
        }
    }

    /// Number of sampled time points
    pub fn len(&self) -> usize {
        self.time_points.len()
    }

    /// True if no point was sampled
    pub fn is_empty(&self) -> bool {
        self.time_points.is_empty()
    }

    /// Number of state components
    pub fn dimension(&self) -> usize {
        self.states.ncols()
    }

    /// State at sample `k`
    pub fn state_at(&self, k: usize) -> DVector<f64> {
        self.states.row(k).transpose()
    }

    /// Last sampled state
    pub fn final_state(&self) -> Option<DVector<f64>> {
        self.len().checked_sub(1).map(|k| self.state_at(k))
    }

    /// Time series of component `j`
    pub fn component(&self, j: usize) -> Vec<f64> {
        self.states.column(j).iter().copied().collect()
    }

    /// Attach a diagnostic entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SimulationResult {
        SimulationResult::new(
            vec![0.0, 1.0, 2.0],
            DMatrix::from_row_slice(3, 2, &[1.0, 10.0, 2.0, 20.0, 3.0, 30.0]),
        )
    }

    #[test]
    fn test_accessors() {
        let result = sample();
        assert_eq!(result.len(), 3);
        assert!(!result.is_empty());
        assert_eq!(result.dimension(), 2);
        assert_eq!(result.state_at(1), DVector::from_vec(vec![2.0, 20.0]));
        assert_eq!(result.final_state(), Some(DVector::from_vec(vec![3.0, 30.0])));
        assert_eq!(result.component(1), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_metadata() {
        let mut result = sample();
        result.add_metadata("solver", "Test");
        assert_eq!(result.metadata.get("solver"), Some(&"Test".to_string()));
    }

    #[test]
    #[should_panic(expected = "one state row per time point")]
    fn test_mismatched_rows_panics() {
        let _ = SimulationResult::new(vec![0.0], DMatrix::zeros(2, 3));
    }
}

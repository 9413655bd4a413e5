//! Simulation facade
//!
//! A [`Simulation`] ties a model, a time window and a solver together,
//! runs the integration on demand and keeps the labelled [`Solution`].
//!
//! # Example
//!
//! ```rust
//! use tides_rs::models::TwoBody;
//! use tides_rs::simulation::Simulation;
//! use tides_rs::solver::{RK4Solver, TimeBoundaries};
//!
//! let mut simulation = Simulation::new(
//!     Box::new(TwoBody::default()),
//!     TimeBoundaries::default_window(100),
//!     Box::new(RK4Solver::new()),
//! );
//!
//! let solution = simulation.solve().unwrap();
//! assert_eq!(solution.get("x_M").unwrap().len(), 100);
//! ```

pub mod derived;
pub mod solution;

pub use derived::{Body, DerivedQuantities, PlanarSeries};
pub use solution::{Solution, TIME_FIELD};

use std::fmt;

use crate::error::SimulationError;
use crate::physics::PhysicalModel;
use crate::solver::{Scenario, Solver, TimeBoundaries};

/// Model + time window + solver, with the last successful solution
pub struct Simulation {
    scenario: Scenario,
    solver: Box<dyn Solver>,
    solution: Option<Solution>,
}

impl Simulation {
    /// Create an unsolved simulation
    pub fn new(
        model: Box<dyn PhysicalModel>,
        boundaries: TimeBoundaries,
        solver: Box<dyn Solver>,
    ) -> Self {
        Self {
            scenario: Scenario::new(model, boundaries),
            solver,
            solution: None,
        }
    }

    /// Integrate the model and store the solution
    ///
    /// Every call integrates again from the model's initial state, so
    /// solving twice with unchanged inputs yields the same solution. A
    /// failed solve discards any previous solution.
    pub fn solve(&mut self) -> Result<&Solution, SimulationError> {
        self.solution = None;

        log::debug!(
            "Solving `{}` with {} over {}",
            self.scenario.model_name(),
            self.solver.name(),
            self.scenario.boundaries
        );

        let result = self.solver.solve(&self.scenario)?;
        let solution = Solution::from_result(&result, self.scenario.model.field_names());

        log::debug!(
            "Solved `{}`: {} samples",
            self.scenario.model_name(),
            solution.len()
        );

        Ok(&*self.solution.insert(solution))
    }

    /// Last solution, if `solve()` succeeded since the last change
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// Like [`solution`](Self::solution), failing with [`SimulationError::NotSolved`]
    pub fn require_solution(&self) -> Result<&Solution, SimulationError> {
        self.solution.as_ref().ok_or(SimulationError::NotSolved)
    }

    /// Derived physical quantities of the last solution
    pub fn derived(&self) -> Result<DerivedQuantities<'_>, SimulationError> {
        let solution = self.require_solution()?;
        let model = &self.scenario.model;
        let masses = model
            .mass_distribution()
            .ok_or_else(|| SimulationError::NoMassDistribution {
                model: model.name().to_string(),
            })?;

        Ok(DerivedQuantities::new(solution, masses, model.name()))
    }

    /// Model being integrated
    pub fn model(&self) -> &dyn PhysicalModel {
        self.scenario.model.as_ref()
    }

    /// Mutable access to the model (e.g. to tune a parameter)
    ///
    /// The stored solution no longer describes the model after a change,
    /// so it is dropped.
    pub fn model_mut(&mut self) -> &mut dyn PhysicalModel {
        self.solution = None;
        self.scenario.model.as_mut()
    }

    /// Time window
    pub fn boundaries(&self) -> &TimeBoundaries {
        &self.scenario.boundaries
    }

    /// Replace the time window, dropping the stored solution
    pub fn set_boundaries(&mut self, boundaries: TimeBoundaries) {
        self.solution = None;
        self.scenario.boundaries = boundaries;
    }

    /// Name of the solver
    pub fn solver_name(&self) -> &str {
        self.solver.name()
    }
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("model", &self.scenario.model_name())
            .field("boundaries", &self.scenario.boundaries)
            .field("solver", &self.solver.name())
            .field("solved", &self.solution.is_some())
            .finish()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

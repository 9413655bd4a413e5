//! Adaptive step-size solver
//!
//! # Design
//!
//! The adaptive solver is split in two:
//!
//! - [`AdaptiveIntegrator`]: a black box that integrates `dy/dt = f(t, y)` with
//!   its own error control and returns the state at each requested time.
//! - [`AdaptiveSolver`]: the [`Solver`] wrapper that builds the evaluation grid
//!   from the scenario's boundaries, calls the integrator and packages the
//!   result like every other solver.
//!
//! [`IvpIntegrator`] is the built-in integrator, backed by the `ivp` crate.
//! Its default method is Radau IIA, an implicit fifth-order method that
//! copes with the stiff coupling between the Earth and its tidal bulges.
//! Any other integrator can be plugged in by implementing the trait.
//!
//! # Sampling
//!
//! Unlike the fixed-step methods, the adaptive solver samples the *closed*
//! interval: `data_points` evenly spaced points with the first at `start`
//! and the last exactly at `end`.
//!
//! # Example
//!
//! ```rust
//! use tides_rs::models::TwoBody;
//! use tides_rs::solver::{AdaptiveSolver, Scenario, Solver, TimeBoundaries};
//!
//! let boundaries = TimeBoundaries::default_window(61);
//! let scenario = Scenario::new(Box::new(TwoBody::default()), boundaries);
//!
//! let result = AdaptiveSolver::radau().solve(&scenario).unwrap();
//! assert_eq!(result.len(), 61);
//! assert_eq!(*result.time_points.last().unwrap(), boundaries.end);
//! ```

use std::cell::Cell;

use ivp::prelude::{IVP, Method, Options, solve_ivp};
use nalgebra::{DMatrix, DVector};

use crate::error::SolverError;
use crate::solver::{Scenario, SimulationResult, Solver, validate_state};

// =================================================================================================
// Integrator contract
// =================================================================================================

/// States produced by an [`AdaptiveIntegrator`]
#[derive(Debug, Clone, PartialEq)]
pub struct IntegratorOutput {
    /// State at each requested time, same length as the evaluation grid
    pub states: Vec<DVector<f64>>,

    /// Steps that met the tolerance
    pub accepted_steps: usize,

    /// Steps that were retried with a smaller step size
    pub rejected_steps: usize,

    /// Right-hand side evaluations
    pub function_evaluations: usize,
}

/// Black-box adaptive integrator
///
/// # Contract
///
/// - `t_eval` is strictly increasing and `t_eval[0]` is the initial time
/// - on success, `states.len() == t_eval.len()` and `states[0] == initial`
/// - a state leaving the finite domain yields [`SolverError::NonFiniteState`]
pub trait AdaptiveIntegrator {
    /// Integrate `rhs` from `initial` at `t_eval[0]`, reporting the state at each `t_eval`
    fn integrate(
        &self,
        rhs: &dyn Fn(f64, &DVector<f64>) -> DVector<f64>,
        initial: &DVector<f64>,
        t_eval: &[f64],
    ) -> Result<IntegratorOutput, SolverError>;

    /// Human readable name of the method
    fn name(&self) -> &str;
}

// =================================================================================================
// ivp-backed integrator
// =================================================================================================

/// Default relative tolerance, the usual `solve_ivp` default
pub const DEFAULT_RTOL: f64 = 1e-3;

/// Default absolute tolerance, the usual `solve_ivp` default
pub const DEFAULT_ATOL: f64 = 1e-6;

/// Integration methods offered by [`IvpIntegrator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegrationMethod {
    /// Implicit Radau IIA of order 5, suited to stiff systems
    #[default]
    Radau,

    /// Explicit Dormand-Prince 8(5,3), for smooth non-stiff problems at tight tolerances
    Dop853,
}

impl IntegrationMethod {
    fn ivp_method(self) -> Method {
        match self {
            IntegrationMethod::Radau => Method::RADAU,
            IntegrationMethod::Dop853 => Method::DOP853,
        }
    }

    /// Name reported in results and logs
    pub fn name(self) -> &'static str {
        match self {
            IntegrationMethod::Radau => "Radau",
            IntegrationMethod::Dop853 => "DOP853",
        }
    }
}

/// [`AdaptiveIntegrator`] delegating to [`ivp::solve_ivp`](ivp::prelude::solve_ivp)
///
/// # Example
///
/// ```rust
/// use tides_rs::solver::{AdaptiveIntegrator, IntegrationMethod, IvpIntegrator};
///
/// let integrator = IvpIntegrator::new(IntegrationMethod::Dop853).with_tolerances(1e-9, 1e-12);
/// assert_eq!(integrator.name(), "DOP853");
/// assert_eq!(IvpIntegrator::default().name(), "Radau");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IvpIntegrator {
    /// Method handed to `solve_ivp`
    pub method: IntegrationMethod,

    /// Relative tolerance
    pub rtol: f64,

    /// Absolute tolerance
    pub atol: f64,
}

impl Default for IvpIntegrator {
    fn default() -> Self {
        Self::radau()
    }
}

impl IvpIntegrator {
    /// Integrator with the given method and default tolerances
    pub fn new(method: IntegrationMethod) -> Self {
        Self {
            method,
            rtol: DEFAULT_RTOL,
            atol: DEFAULT_ATOL,
        }
    }

    /// Radau IIA with default tolerances
    pub fn radau() -> Self {
        Self::new(IntegrationMethod::Radau)
    }

    /// Replace both tolerances
    pub fn with_tolerances(mut self, rtol: f64, atol: f64) -> Self {
        self.rtol = rtol;
        self.atol = atol;
        self
    }

    fn validate_tolerances(&self) -> Result<(), SolverError> {
        if !(self.rtol.is_finite() && self.rtol > 0.0) {
            return Err(SolverError::InvalidTolerance {
                message: format!("relative tolerance must be positive, got {}", self.rtol),
            });
        }
        if !(self.atol.is_finite() && self.atol >= 0.0) {
            return Err(SolverError::InvalidTolerance {
                message: format!("absolute tolerance must be non-negative, got {}", self.atol),
            });
        }
        Ok(())
    }

    fn failure(&self, message: String) -> SolverError {
        SolverError::IntegrationFailed {
            method: self.name().to_string(),
            message,
        }
    }
}

/// Exposes a right-hand side closure through the slice-based `ivp` interface
///
/// The first non-finite derivative is remembered, since `ode` cannot fail.
struct RhsAdapter<'a> {
    rhs: &'a dyn Fn(f64, &DVector<f64>) -> DVector<f64>,
    non_finite: Cell<Option<(f64, usize)>>,
}

impl IVP for RhsAdapter<'_> {
    fn ode(&self, t: f64, y: &[f64], dydt: &mut [f64]) {
        let derivative = (self.rhs)(t, &DVector::from_column_slice(y));

        if self.non_finite.get().is_none() {
            if let Some(component) = derivative.iter().position(|v| !v.is_finite()) {
                self.non_finite.set(Some((t, component)));
            }
        }

        dydt.copy_from_slice(derivative.as_slice());
    }
}

impl AdaptiveIntegrator for IvpIntegrator {
    fn integrate(
        &self,
        rhs: &dyn Fn(f64, &DVector<f64>) -> DVector<f64>,
        initial: &DVector<f64>,
        t_eval: &[f64],
    ) -> Result<IntegratorOutput, SolverError> {
        self.validate_tolerances()?;

        let (t0, t_end) = match t_eval {
            [] => return Err(SolverError::NoDataPoints),
            [_] => {
                return Ok(IntegratorOutput {
                    states: vec![initial.clone()],
                    accepted_steps: 0,
                    rejected_steps: 0,
                    function_evaluations: 0,
                });
            }
            [first, .., last] => (*first, *last),
        };

        let adapter = RhsAdapter {
            rhs,
            non_finite: Cell::new(None),
        };
        let options = Options::builder()
            .method(self.method.ivp_method())
            .rtol(self.rtol)
            .atol(self.atol)
            .t_eval(t_eval.to_vec())
            .build();

        let outcome = solve_ivp(&adapter, t0, t_end, initial.as_slice(), options);

        // A non-finite derivative explains whatever the library reports next
        if let Some((time, component)) = adapter.non_finite.get() {
            let step = t_eval.iter().position(|&t| t >= time).unwrap_or(t_eval.len() - 1);
            return Err(SolverError::NonFiniteState {
                step,
                time,
                component,
            });
        }

        let solution = outcome.map_err(|err| self.failure(format!("{err:?}")))?;

        let states: Vec<DVector<f64>> = solution
            .iter()
            .map(|(_, y)| DVector::from_column_slice(y))
            .collect();

        if states.len() != t_eval.len() {
            return Err(self.failure(format!(
                "stopped after {} of {} evaluation times with status {:?}",
                states.len(),
                t_eval.len(),
                solution.status
            )));
        }
        for (k, state) in states.iter().enumerate() {
            validate_state(state, k, t_eval[k])?;
        }

        let accepted_steps = solution.naccpt as usize;
        let rejected_steps = solution.nrejct as usize;
        if rejected_steps > accepted_steps {
            log::warn!(
                "{} rejected {rejected_steps} of {} steps",
                self.name(),
                accepted_steps + rejected_steps
            );
        }

        Ok(IntegratorOutput {
            states,
            accepted_steps,
            rejected_steps,
            function_evaluations: solution.nfev as usize,
        })
    }

    fn name(&self) -> &str {
        self.method.name()
    }
}

// =================================================================================================
// Adaptive Solver
// =================================================================================================

/// [`Solver`] driving an [`AdaptiveIntegrator`] over the evaluation grid
#[derive(Debug, Clone)]
pub struct AdaptiveSolver<I: AdaptiveIntegrator = IvpIntegrator> {
    integrator: I,
}

impl AdaptiveSolver {
    /// Solver backed by Radau IIA with default tolerances
    pub fn radau() -> Self {
        Self::new(IvpIntegrator::radau())
    }
}

impl Default for AdaptiveSolver {
    fn default() -> Self {
        Self::radau()
    }
}

impl<I: AdaptiveIntegrator> AdaptiveSolver<I> {
    /// Wrap an integrator
    pub fn new(integrator: I) -> Self {
        Self { integrator }
    }

    /// The wrapped integrator
    pub fn integrator(&self) -> &I {
        &self.integrator
    }
}

impl<I: AdaptiveIntegrator> Solver for AdaptiveSolver<I> {
    fn solve(&self, scenario: &Scenario) -> Result<SimulationResult, SolverError> {
        // ====== Step 1: Validation ======

        scenario.validate()?;

        // ====== Step 2: Integration ======

        let time_points = scenario.boundaries.evaluation_grid();
        let initial = scenario.initial_state();
        let model = &scenario.model;

        let output = self.integrator.integrate(
            &|t, y| model.compute_physics(t, y),
            &initial,
            &time_points,
        )?;

        assert_eq!(
            output.states.len(),
            time_points.len(),
            "{} returned {} states for {} evaluation times",
            self.integrator.name(),
            output.states.len(),
            time_points.len()
        );

        // ====== Step 3: Build Result ======

        let mut states = DMatrix::zeros(time_points.len(), initial.len());
        for (k, state) in output.states.iter().enumerate() {
            states.set_row(k, &state.transpose());
        }

        log::debug!(
            "{} on `{}`: {} accepted, {} rejected steps, {} evaluations",
            self.integrator.name(),
            scenario.model_name(),
            output.accepted_steps,
            output.rejected_steps,
            output.function_evaluations
        );

        let mut result = SimulationResult::new(time_points, states);
        result.add_metadata("solver", self.integrator.name());
        result.add_metadata("accepted steps", &output.accepted_steps.to_string());
        result.add_metadata("rejected steps", &output.rejected_steps.to_string());
        result.add_metadata(
            "function evaluations",
            &output.function_evaluations.to_string(),
        );

        Ok(result)
    }

    fn name(&self) -> &str {
        self.integrator.name()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

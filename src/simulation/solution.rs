//! Named solution table
//!
//! A [`Solution`] is the solver output relabelled with the model's field
//! names: one column per state component plus the time column `"t"`.

use std::collections::HashMap;

use nalgebra::DVector;

use crate::error::SimulationError;
use crate::solver::SimulationResult;

/// Name of the time column
pub const TIME_FIELD: &str = "t";

/// Time series of every state component, addressable by name
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    time: Vec<f64>,
    field_names: Vec<String>,
    columns: Vec<Vec<f64>>,
    index: HashMap<String, usize>,
}

impl Solution {
    /// Label a solver result with the model's field names
    ///
    /// # Panics
    ///
    /// Panics if the number of names differs from the number of state
    /// components in `result`, or if two fields share a name.
    pub fn from_result(result: &SimulationResult, field_names: Vec<String>) -> Self {
        assert_eq!(
            result.dimension(),
            field_names.len(),
            "solver returned {} components but the model names {} fields",
            result.dimension(),
            field_names.len()
        );

        let index: HashMap<String, usize> = field_names
            .iter()
            .enumerate()
            .map(|(j, name)| (name.clone(), j))
            .collect();
        assert_eq!(index.len(), field_names.len(), "field names must be unique");
        assert!(
            !index.contains_key(TIME_FIELD),
            "`{TIME_FIELD}` is reserved for the time column"
        );

        let columns = (0..field_names.len()).map(|j| result.component(j)).collect();

        Self {
            time: result.time_points.clone(),
            field_names,
            columns,
            index,
        }
    }

    /// Sampled times
    pub fn t(&self) -> &[f64] {
        &self.time
    }

    /// Series of a field, or the time column for `"t"`
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        if name == TIME_FIELD {
            return Some(&self.time);
        }
        self.index.get(name).map(|&j| self.columns[j].as_slice())
    }

    /// Like [`get`](Self::get), failing with [`SimulationError::UnknownField`]
    pub fn field(&self, name: &str) -> Result<&[f64], SimulationError> {
        self.get(name)
            .ok_or_else(|| SimulationError::UnknownField(name.to_string()))
    }

    /// Field names in state order (without `"t"`)
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// Every key: `"t"` followed by the field names
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(TIME_FIELD).chain(self.field_names.iter().map(String::as_str))
    }

    /// `(name, series)` for every field, in state order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.field_names
            .iter()
            .zip(self.columns.iter())
            .map(|(name, column)| (name.as_str(), column.as_slice()))
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// True if there are no samples
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Full state vector at sample `k`
    pub fn state_at(&self, k: usize) -> DVector<f64> {
        DVector::from_iterator(self.columns.len(), self.columns.iter().map(|column| column[k]))
    }
}

// =================================================================================================
// Tests
// =================================================================================================

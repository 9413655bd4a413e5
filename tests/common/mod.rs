//! Common utilities for integration tests

#![allow(dead_code)]

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
#[allow(unused_imports)]
pub use mock_models::{ConstantGrowth, ExponentialDecay, HarmonicOscillator};
#[allow(unused_imports)]
pub use test_helpers::{
    assert_vectors_close,
    create_scenario,
    final_time_and_state,
    relative_error,
};

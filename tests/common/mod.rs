//! Common utilities for integration tests

#![allow(dead_code)]

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_models::{ConstantEquilibrium, UniformResistance};
pub use test_helpers::{
    balanced_config,
    balanced_ore,
    furnace_gas,
    layered_particle,
    relative_error,
    solid_plus_gas_mass,
};

//! Configuration errors
//!
//! Every error in this crate is a configuration error: something about the
//! chemical model is ill-defined and the run must stop before any particle is
//! touched. Numerical edge cases (vanishing diffusivity, fully converted
//! layers, ...) are floored locally and never surface here.

use thiserror::Error;

/// Fatal configuration error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Reactant species has no equilibrium correlation
    #[error("unsupported reactant species '{0}' (expected CO or H2)")]
    UnsupportedSpecies(String),

    /// Particle refers to a material type that was never registered
    #[error("material type {material_type} is not registered ({available} available)")]
    MissingMaterial {
        material_type: usize,
        available: usize,
    },

    /// Non-physical constant (negative molar mass, zero density, NaN, ...)
    #[error("invalid parameter '{name}' in {context}: {reason}")]
    InvalidParameter {
        context: String,
        name: String,
        reason: String,
    },

    /// Shell layout of a particle is inconsistent
    #[error("invalid particle layout: {0}")]
    InvalidLayout(String),
}

impl ConfigError {
    /// Shorthand for [`ConfigError::InvalidParameter`]
    pub fn invalid(
        context: impl Into<String>,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidParameter {
            context: context.into(),
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Reject values that are not finite and strictly positive
pub(crate) fn require_positive(context: &str, name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            context,
            name,
            format!("must be finite and > 0, got {value}"),
        ))
    }
}

/// Reject values that are not finite and non-negative
pub(crate) fn require_non_negative(context: &str, name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            context,
            name,
            format!("must be finite and >= 0, got {value}"),
        ))
    }
}

//! Shrinking-core numerics and orchestration
//!
//! # Core Concepts
//!
//! The solver turns the resistances supplied by the physics models into
//! interface rates, then into shell mass changes:
//!
//! 1. **Configuration** ([`CouplingConfiguration`]) - gas species, molar masses,
//!    time stepping, floors
//! 2. **Activation** ([`LayerActivationPolicy`]) - retires consumed cores
//! 3. **Reaction** ([`ReactionSolver`]) - closed-form flux balance for 1, 2 or 3
//!    active interfaces
//! 4. **Update** ([`StateUpdater`]) - shell masses, radii, aggregates, gas sources
//! 5. **Pipeline** ([`ShrinkCore`]) - gates, validates and runs a coupling pass
//!
//! # Workflow Diagram
//!
//! ```text
//!                 ┌──────────────────┐
//!  timestep ─────►│  CouplingGate    │── closed ──► no-op
//!                 └────────┬─────────┘
//!                          │ open
//!                 ┌────────▼─────────┐
//!                 │ LayerActivation  │  retire cores below min_layer_radius
//!                 └────────┬─────────┘
//!                          │
//!                 ┌────────▼─────────┐    ┌──────────────────┐
//!                 │ ResistanceModel  │◄───│ EquilibriumModel │
//!                 └────────┬─────────┘    └──────────────────┘
//!                          │ A, B, M
//!                 ┌────────▼─────────┐
//!                 │ ReactionSolver   │  dY, dmA
//!                 └────────┬─────────┘
//!                          │
//!                 ┌────────▼─────────┐
//!                 │ StateUpdater     │  masses, radii, gas sources
//!                 └──────────────────┘
//! ```
//!
//! # Quick Start Example
//!
//! ```rust
//! use shrinkcore_rs::models::ReducingGas;
//! use shrinkcore_rs::physics::{GasCoupling, LayerVector, MaterialTable};
//! use shrinkcore_rs::solver::{CouplingConfiguration, ShrinkCore};
//!
//! let config = CouplingConfiguration::iron_ore(ReducingGas::Hydrogen);
//! let core = ShrinkCore::new(config, vec![MaterialTable::hematite_ore()], 0).unwrap();
//!
//! let chemistry = core.initialize_particle(
//!     5e-3, LayerVector::new(1.0, 0.99, 0.98, 0.97), LayerVector::from_element(0.25), 0,
//! ).unwrap();
//! let gas = GasCoupling {
//!     temperature: 1100.0, molecular_diffusivity: 8e-4, kinematic_viscosity: 2e-4,
//!     reynolds: 50.0, bulk_mole_fraction: 0.9, partial_pressure: 101_325.0,
//! };
//!
//! let outcome = core.react(&chemistry, &gas).unwrap();
//! assert!(outcome.chemistry.mass() < chemistry.mass());
//! ```
//!
//! # Error Handling
//!
//! Configuration errors are returned as [`ConfigError`](crate::error::ConfigError)
//! before any particle is touched. Divisions that could vanish are floored by
//! [`SMALL`](crate::physics::SMALL) and never raise.

// =================================================================================================
// Module Declarations
// =================================================================================================

mod activation;
mod configuration;
mod gate;
mod pipeline;
mod reaction;
mod update;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Deciding *when* to hand particles off to Rayon is an execution concern, not
// a physics concern, so it lives here rather than in the pipeline.
//
// The threshold is stored in an AtomicUsize so that it can be changed at
// runtime (benchmarks, tests) without a mutex on every pass. Relaxed ordering
// is sufficient: the value is a performance hint, not a synchronisation point.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default particle count above which [`ShrinkCore::step()`] switches to
/// parallel iteration.
///
/// One particle update costs a few hundred flops, so Rayon's dispatch overhead
/// only pays off for a few hundred particles and more.
const DEFAULT_PARALLEL_THRESHOLD: usize = 255;

/// Runtime-configurable parallel-execution threshold.
///
/// Read via [`parallel_threshold()`], written via [`set_parallel_threshold()`].
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// [`ShrinkCore::step()`] iterates sequentially over passes with at most this
/// many particles, and switches to Rayon above it, but only when the crate is
/// compiled with the `parallel` feature.
///
/// # Example
///
/// ```rust
/// use shrinkcore_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`. A zero threshold would dispatch even a
/// single-particle pass to the thread pool.
///
/// # Example
///
/// ```rust
/// use shrinkcore_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// RAII guard that saves the current threshold on construction and restores
/// it on drop.
///
/// Only compiled in test builds.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
}

#[cfg(test)]
impl ThresholdGuard {
    /// Set the threshold to `new_value` and return a guard that will
    /// restore the previous value on drop.
    pub(crate) fn save(new_value: usize) -> Self {
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        // Bypass the public setter so that restoring never panics
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use activation::LayerActivationPolicy;
pub use configuration::CouplingConfiguration;
pub use gate::CouplingGate;
pub use pipeline::{Particle, PassSummary, ReactionOutcome, ReactionReport, ShrinkCore};
pub use reaction::{ActiveInterfaces, ReactionSolver};
pub use update::StateUpdater;

// =================================================================================================
// Tests
// =================================================================================================

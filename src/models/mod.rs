//! Physical correlations of the shrinking-core model
//!
//! # Available Models
//!
//! ## [`ValipourEquilibrium`] — equilibrium of the three reduction steps
//!
//! Implements [`EquilibriumModel`](crate::physics::EquilibriumModel) for CO or H₂
//! as reducing gas. The species is fixed at construction through [`ReducingGas`];
//! any other species is rejected with a configuration error.
//!
//! ## [`ResistanceNetwork`] — reaction, pore diffusion and film resistances
//!
//! Implements [`ResistanceModel`](crate::physics::ResistanceModel). The resistances
//! are recomputed from the current shell radii every coupling step and fed to
//! the flux balance of the solver.

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod equilibrium;
pub mod resistance;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use equilibrium::{ReducingGas, ValipourEquilibrium};
pub use resistance::ResistanceNetwork;

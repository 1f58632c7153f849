//! Particle physics
//!
//! State containers, constants and model traits of a layered reacting particle.
//!
//! # Core Concepts
//!
//! - **Particle chemistry**: shell masses, relative radii and aggregates of one particle
//! - **Gas coupling**: read-only gas state at the particle position
//! - **Gas sources**: reactant/product mass accumulators drained by the fluid side
//! - **Material table**: per-interface and per-shell constants of a material type
//!
//! # Architecture
//!
//! Physical correlations are **separate from the flux balance**:
//! - [`EquilibriumModel`] and [`ResistanceModel`] provide the resistances (physics)
//! - the solver module turns them into interface rates and mass updates (numerics)
//!
//! # Example
//!
//! ```rust
//! use shrinkcore_rs::physics::{LayerVector, MaterialTable, ParticleChemistry};
//!
//! let ore = MaterialTable::hematite_ore();
//! let chemistry = ParticleChemistry::new(
//!     1e-3,
//!     LayerVector::new(1.0, 0.998, 0.995, 0.99),
//!     LayerVector::from_element(0.3),
//!     &ore.bulk_density,
//!     1.0,
//!     0,
//! ).unwrap();
//!
//! assert_eq!(chemistry.active_layers(), 3);
//! assert!(chemistry.mass() > 0.0);
//! ```

pub mod constants;
pub mod data;
pub mod material;
pub mod traits;

pub use constants::{GAS_CONSTANT, MAX_LAYERS, N_SHELLS, SMALL};
pub use data::{GasCoupling, GasSources, InterfaceVector, LayerVector, ParticleChemistry};
pub use material::{MaterialTable, Stoichiometry};
pub use traits::{EquilibriumModel, ResistanceModel, Resistances};

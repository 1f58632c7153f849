//! shrinkcore-rs: Multi-layer shrinking-core reaction solver
//!
//! Per-particle gas-solid reaction model for layered particles such as iron
//! ore pellets reduced by CO or H₂. Each particle is a stack of concentric
//! shells (Fe / FeO / Fe₃O₄ / Fe₂O₃); every coupling interval the solver
//! computes how much reactant gas is consumed at each reaction front, how the
//! shell masses and radii change, and when a shell disappears.
//!
//! # Architecture
//!
//! shrinkcore-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - Physical correlations (equilibrium, resistances) live in [`models`]
//!      behind the traits of [`physics`]
//!    - The flux balance and the state update live in [`solver`]
//!
//! 2. **Allocation-free, data-parallel particle updates**
//!    - Fixed-size shell vectors with an explicit active-layer count
//!    - Independent particles, processed with Rayon above a runtime threshold
//!
//! # Quick Start
//!
//! ```rust
//! use shrinkcore_rs::prelude::*;
//!
//! # fn main() -> Result<(), ConfigError> {
//! // 1. Configure gas, time stepping and materials
//! let config = CouplingConfiguration::iron_ore(ReducingGas::CarbonMonoxide)
//!     .with_timestep(1e-3)
//!     .with_coupling_every(1);
//! let mut core = ShrinkCore::new(config, vec![MaterialTable::hematite_ore()], 0)?;
//!
//! // 2. Create particles
//! let chemistry = core.initialize_particle(
//!     1e-3,
//!     LayerVector::new(1.0, 0.998, 0.995, 0.99),
//!     LayerVector::from_element(0.3),
//!     0,
//! )?;
//! let gas = GasCoupling {
//!     temperature: 1173.15,
//!     molecular_diffusivity: 2e-4,
//!     kinematic_viscosity: 1.5e-4,
//!     reynolds: 10.0,
//!     bulk_mole_fraction: 0.9,
//!     partial_pressure: 101_325.0,
//! };
//! let mut particles = vec![Particle::new(chemistry, gas)];
//!
//! // 3. Run coupling passes
//! for timestep in 0..100 {
//!     core.step(timestep, &mut particles)?;
//! }
//!
//! // 4. Drain gas sources
//! println!("CO consumed: {:.3e} kg", -particles[0].sources.reactant);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: Particle state, material tables, model traits
//! - [`models`]: Equilibrium and resistance correlations
//! - [`solver`]: Flux balance, state update, coupling pipeline
//! - [`error`]: Configuration errors

// Core modules
pub mod error;
pub mod physics;

pub mod models;
pub mod solver;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use shrinkcore_rs::prelude::*;
    //! ```
    pub use crate::error::ConfigError;
    pub use crate::models::{ReducingGas, ResistanceNetwork, ValipourEquilibrium};
    pub use crate::physics::{
        EquilibriumModel,
        GasCoupling,
        GasSources,
        InterfaceVector,
        LayerVector,
        MaterialTable,
        ParticleChemistry,
        ResistanceModel,
        Resistances,
        Stoichiometry,
    };
    pub use crate::solver::{
        CouplingConfiguration,
        Particle,
        PassSummary,
        ReactionOutcome,
        ShrinkCore,
    };
}

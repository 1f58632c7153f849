//! Coupling readiness gate
//!
//! The fluid side delivers the first gas fields only after one full coupling
//! interval has passed since the core was created. Until then every pass is a
//! no-op. The gate flips once and stays open.

use log::info;

/// One-shot "coupling established" signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CouplingGate {
    created_at: u64,
    coupling_every: u64,
    established: bool,
}

impl CouplingGate {
    /// # Arguments
    ///
    /// * `created_at` - Engine timestep at which the core was created
    /// * `coupling_every` - Engine steps between two fluid coupling exchanges
    pub fn new(created_at: u64, coupling_every: u64) -> Self {
        Self {
            created_at,
            coupling_every,
            established: false,
        }
    }

    /// First timestep at which the gate is open
    pub fn opens_at(&self) -> u64 {
        self.created_at
            .saturating_add(self.coupling_every)
            .saturating_add(2)
    }

    pub fn is_established(&self) -> bool {
        self.established
    }

    /// Update the gate for `timestep` and report whether coupling is established
    ///
    /// Opens once `timestep > created_at + coupling_every + 1`.
    pub fn poll(&mut self, timestep: u64) -> bool {
        if !self.established && timestep >= self.opens_at() {
            self.established = true;
            info!(
                "coupling established at timestep {timestep} (created at {}, coupling every {})",
                self.created_at, self.coupling_every
            );
        }
        self.established
    }
}

//! Irreversible retirement of fully reduced shells
//!
//! The core is considered consumed once the innermost interface comes closer
//! to the particle centre than `min_layer_radius`, or once the core has been
//! drained down to the mass floor by the state update. The active-layer count
//! then drops by one and the shell masses are rebuilt from the current radii.
//! The check repeats until no further layer qualifies, so several layers can
//! retire in the same call. Layers never come back.

use log::debug;

use crate::physics::data::ParticleChemistry;

/// Radius- and mass-floor retirement policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerActivationPolicy {
    min_layer_radius: f64,
    mass_floor: f64,
}

impl LayerActivationPolicy {
    /// # Arguments
    ///
    /// * `min_layer_radius` - Absolute radius \[m\] of the physical particle
    /// * `mass_floor` - Core mass \[kg\] at or below which the core counts as drained
    pub fn new(min_layer_radius: f64, mass_floor: f64) -> Self {
        Self {
            min_layer_radius,
            mass_floor,
        }
    }

    pub fn min_layer_radius(&self) -> f64 {
        self.min_layer_radius
    }

    pub fn mass_floor(&self) -> f64 {
        self.mass_floor
    }

    /// True when the innermost active interface lies below the radius floor
    /// or the core holds no more than the mass floor
    pub fn should_retire(&self, chemistry: &ParticleChemistry) -> bool {
        let core = chemistry.active_layers();
        core > 0
            && (chemistry.core_radius() < self.min_layer_radius
                || chemistry.layer_mass()[core] <= self.mass_floor)
    }

    /// Retire every interface below the floor, innermost first
    ///
    /// Returns the number of layers retired by this call.
    pub fn apply(&self, chemistry: &mut ParticleChemistry) -> usize {
        let mut retired = 0;

        while self.should_retire(chemistry) {
            let core_radius = chemistry.core_radius();
            let core_mass = chemistry.layer_mass()[chemistry.active_layers()];
            chemistry.retire_core();
            retired += 1;

            debug!(
                "retired layer {} (core radius {:.3e} m, mass {:.3e} kg), {} active",
                chemistry.active_layers() + 1,
                core_radius,
                core_mass,
                chemistry.active_layers()
            );
        }

        retired
    }
}

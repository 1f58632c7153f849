//! Flux balance of the shrinking-core model
//!
//! # Mathematical Background
//!
//! At quasi-steady state the molar flux of reactant gas is continuous from the
//! bulk, through the film and the product shells, to every active reaction
//! front. Writing `dY[j]` for the consumption rate at interface j (in mole
//! fraction per unit resistance) and
//!
//! ```text
//! S    = M + B[0]
//! d[j] = X_bulk − x_eq[j]
//! ```
//!
//! the rates solve the symmetric system
//!
//! ```text
//! ┌ S+A0     S          S            ┐ ┌dY0┐   ┌d0┐
//! │ S        S+B1+A1    S+B1         │ │dY1│ = │d1│
//! └ S        S+B1       S+B1+A2+B2   ┘ └dY2┘   └d2┘
//! ```
//!
//! truncated to the leading 1×1 or 2×2 block when fewer interfaces are active.
//! Each case has a closed-form solution; no matrix is ever assembled.
//!
//! # Mass flow
//!
//! Rates are converted to reactant mass consumed over one coupling interval:
//!
//! ```text
//! dmA[j] = dY[j] · p/(R·T) · M_A · 4π·r² · Δt · substeps
//! ```

use std::f64::consts::PI;

use crate::physics::constants::{GAS_CONSTANT, SMALL};
use crate::physics::data::{GasCoupling, InterfaceVector};
use crate::physics::traits::Resistances;

// =================================================================================================
// Active interface dispatch
// =================================================================================================

/// Number of reacting interfaces, as a closed set of cases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveInterfaces {
    /// Fully reduced, nothing reacts
    Inert,
    /// Only FeO → Fe
    One,
    /// FeO → Fe and Fe₃O₄ → FeO
    Two,
    /// All three reduction steps
    Three,
}

impl ActiveInterfaces {
    /// Case for an active-layer count; counts above three map to [`ActiveInterfaces::Three`]
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => ActiveInterfaces::Inert,
            1 => ActiveInterfaces::One,
            2 => ActiveInterfaces::Two,
            _ => ActiveInterfaces::Three,
        }
    }

    /// Number of active interfaces
    pub fn count(self) -> usize {
        match self {
            ActiveInterfaces::Inert => 0,
            ActiveInterfaces::One => 1,
            ActiveInterfaces::Two => 2,
            ActiveInterfaces::Three => 3,
        }
    }
}

// =================================================================================================
// Reaction solver
// =================================================================================================

/// Closed-form solver of the interface flux balance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactionSolver {
    reactant_molar_mass: f64,
    coupling_interval: f64,
}

impl ReactionSolver {
    /// # Arguments
    ///
    /// * `reactant_molar_mass` - M_A \[kg/mol\]
    /// * `coupling_interval` - `Δt × substeps` \[s\]
    pub fn new(reactant_molar_mass: f64, coupling_interval: f64) -> Self {
        Self { reactant_molar_mass, coupling_interval }
    }

    /// Interface rates `dY`, zero for inactive interfaces
    ///
    /// # Example
    ///
    /// ```rust
    /// use shrinkcore_rs::physics::{InterfaceVector, Resistances};
    /// use shrinkcore_rs::solver::{ActiveInterfaces, ReactionSolver};
    ///
    /// let r = Resistances::uniform(1, 1.0);
    /// let x_eq = InterfaceVector::new(0.1, 0.0, 0.0);
    /// let dy = ReactionSolver::conversion_rates(ActiveInterfaces::One, &r, 0.4, &x_eq);
    ///
    /// assert!((dy[0] - 0.1).abs() < 1e-12);
    /// ```
    pub fn conversion_rates(
        active: ActiveInterfaces,
        resistances: &Resistances,
        bulk_mole_fraction: f64,
        equilibrium: &InterfaceVector,
    ) -> InterfaceVector {
        let a = &resistances.reaction;
        let b = &resistances.diffusion;
        let m = resistances.mass_transfer;
        let d = equilibrium.map(|x_eq| bulk_mole_fraction - x_eq);

        match active {
            ActiveInterfaces::Inert => InterfaceVector::zeros(),
            ActiveInterfaces::One => {
                let w = (a[0] + b[0] + m).max(SMALL);
                InterfaceVector::new(d[0] / w, 0.0, 0.0)
            }
            ActiveInterfaces::Two => {
                let s = m + b[0];
                let w = ((a[1] + b[1]) * (a[0] + s) + a[0] * s).max(SMALL);

                InterfaceVector::new(
                    ((a[1] + b[1] + s) * d[0] - s * d[1]) / w,
                    ((a[0] + s) * d[1] - s * d[0]) / w,
                    0.0,
                )
            }
            ActiveInterfaces::Three => {
                let s = m + b[0];
                let (a0, a1, a2) = (a[0], a[1], a[2]);
                let (b1, b2) = (b[1], b[2]);
                let (d0, d1, d2) = (d[0], d[1], d[2]);

                // Determinant of the 3×3 system
                let w = ((a2 + b2) * (a0 * (a1 + b1 + s) + (a1 + b1) * s)
                    + a1 * (a0 * (b1 + s) + b1 * s))
                    .max(SMALL);

                let y0 = (((a2 + b2) * (a1 + b1 + s) + a1 * (b1 + s)) * d0
                    - a1 * s * d2
                    - (a2 + b2) * s * d1)
                    / w;
                let y1 = (((a2 + b2 + b1) * (a0 + s) + a0 * s) * d1
                    - (b1 * (a0 + s) + a0 * s) * d2
                    - (a2 + b2) * s * d0)
                    / w;
                let y2 = ((a0 * (a1 + b1 + s) + s * (a1 + b1)) * d2
                    - (a0 * (b1 + s) + b1 * s) * d1
                    - a1 * s * d0)
                    / w;

                InterfaceVector::new(y0, y1, y2)
            }
        }
    }

    /// Reactant mass \[kg\] consumed at each interface over one coupling interval
    ///
    /// `radius` is the physical (not coarse-grained) particle radius.
    pub fn reactant_mass_flow(&self, rates: &InterfaceVector, gas: &GasCoupling, radius: f64) -> InterfaceVector {
        let molar_concentration = gas.partial_pressure / (GAS_CONSTANT * gas.temperature);
        let surface = 4.0 * PI * radius * radius;

        rates * (molar_concentration * self.reactant_molar_mass * surface * self.coupling_interval)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

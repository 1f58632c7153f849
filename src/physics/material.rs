//! Material constant tables
//!
//! One [`MaterialTable`] per particle material type. Values are read-only once
//! the pipeline is built, so tables are shared by reference across threads.
//!
//! Shell order follows the reduction sequence of iron ore, outermost first:
//!
//! | shell | phase     | interface below it            |
//! |-------|-----------|-------------------------------|
//! | 0     | Fe        | 0: FeO → Fe                   |
//! | 1     | FeO       | 1: Fe₃O₄ → FeO                |
//! | 2     | Fe₃O₄     | 2: Fe₂O₃ → Fe₃O₄              |
//! | 3     | Fe₂O₃     | (core)                        |

use crate::error::{require_non_negative, require_positive, ConfigError};
use crate::physics::constants::MAX_LAYERS;
use crate::physics::data::{InterfaceVector, LayerVector};

/// Per-interface and per-shell constants of one material type
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialTable {
    /// Name used in error messages and logs
    pub name: String,

    /// Pre-exponential rate factor k₀ per interface \[m/s\]
    pub pre_exponential: InterfaceVector,

    /// Activation energy Eₐ per interface \[J/mol\]
    pub activation_energy: InterfaceVector,

    /// Molar mass per shell \[kg/mol\]
    pub molar_mass: LayerVector,

    /// Bulk (non-porous) density per shell \[kg/m³\]
    pub bulk_density: LayerVector,

    /// Mean pore diameter \[m\]
    pub pore_diameter: f64,

    /// Pore tortuosity \[-\]
    pub tortuosity: f64,
}

impl MaterialTable {
    /// Hematite ore reduced by CO, rate data from the CFDEM iron ore cases
    ///
    /// ```
    /// use shrinkcore_rs::physics::MaterialTable;
    ///
    /// let ore = MaterialTable::hematite_ore();
    /// assert!(ore.validate().is_ok());
    /// ```
    pub fn hematite_ore() -> Self {
        Self {
            name: "hematite ore".to_string(),
            pre_exponential: InterfaceVector::new(17.0, 25.0, 2700.0),
            activation_energy: InterfaceVector::new(69_488.0, 73_674.0, 113_859.0),
            molar_mass: LayerVector::new(0.055_845, 0.071_844, 0.231_533, 0.159_688),
            bulk_density: LayerVector::new(7870.0, 5740.0, 5170.0, 5240.0),
            pore_diameter: 5e-7,
            tortuosity: 3.0,
        }
    }

    /// Check every constant is physical
    ///
    /// Activation energies may be zero (temperature-independent rate), every
    /// other constant must be strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let context = format!("material '{}'", self.name);

        for j in 0..MAX_LAYERS {
            require_positive(&context, &format!("pre_exponential[{j}]"), self.pre_exponential[j])?;
            require_non_negative(&context, &format!("activation_energy[{j}]"), self.activation_energy[j])?;
        }

        for (layer, (&molar_mass, &density)) in self.molar_mass.iter()
            .zip(self.bulk_density.iter())
            .enumerate() {
            require_positive(&context, &format!("molar_mass[{layer}]"), molar_mass)?;
            require_positive(&context, &format!("bulk_density[{layer}]"), density)?;
        }

        require_positive(&context, "pore_diameter", self.pore_diameter)?;
        require_positive(&context, "tortuosity", self.tortuosity)?;

        Ok(())
    }
}

/// Stoichiometric coefficients of the three interface reactions
///
/// At interface `j` one mole of reactant gas consumes `reactant[j]` moles of
/// shell `j + 1` and forms `product[j]` moles of shell `j`:
///
/// ```text
/// j = 0:   FeO    + CO → Fe       + CO₂     (1, 1)
/// j = 1:   Fe₃O₄  + CO → 3 FeO    + CO₂     (1, 3)
/// j = 2: 3 Fe₂O₃  + CO → 2 Fe₃O₄  + CO₂     (3, 2)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stoichiometry {
    /// Moles of the inner shell consumed per mole of reactant gas
    pub reactant: InterfaceVector,

    /// Moles of the outer shell formed per mole of reactant gas
    pub product: InterfaceVector,
}

impl Stoichiometry {
    /// Coefficients of the stepwise reduction of hematite
    pub fn iron_oxide() -> Self {
        Self {
            reactant: InterfaceVector::new(1.0, 1.0, 3.0),
            product: InterfaceVector::new(1.0, 3.0, 2.0),
        }
    }

    /// All coefficients must be strictly positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        for j in 0..MAX_LAYERS {
            require_positive("stoichiometry", &format!("reactant[{j}]"), self.reactant[j])?;
            require_positive("stoichiometry", &format!("product[{j}]"), self.product[j])?;
        }
        Ok(())
    }
}

impl Default for Stoichiometry {
    fn default() -> Self {
        Self::iron_oxide()
    }
}

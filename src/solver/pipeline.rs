//! Per-particle shrinking-core pipeline
//!
//! One coupling pass runs, for every particle it is given:
//!
//! ```text
//! LayerActivationPolicy → ResistanceModel (+ EquilibriumModel) → ReactionSolver → StateUpdater
//! ```
//!
//! Particles are independent, so a pass over a large slice is spread over the
//! rayon thread pool once it exceeds [`parallel_threshold()`](crate::solver::parallel_threshold).
//!
//! # Error Handling
//!
//! Every configuration problem (unknown material type, invalid constants,
//! unsupported species) is reported by [`ShrinkCore::new`] or at the start of
//! [`ShrinkCore::step`], before any particle is mutated. Numerical edge cases
//! are floored and never produce an error.

use log::{debug, trace, warn};

use crate::error::ConfigError;
use crate::models::{ResistanceNetwork, ValipourEquilibrium};
use crate::physics::data::{GasCoupling, GasSources, InterfaceVector, LayerVector, ParticleChemistry};
use crate::physics::material::MaterialTable;
use crate::physics::traits::{EquilibriumModel, ResistanceModel, Resistances};
use crate::solver::activation::LayerActivationPolicy;
use crate::solver::configuration::CouplingConfiguration;
use crate::solver::gate::CouplingGate;
use crate::solver::reaction::{ActiveInterfaces, ReactionSolver};
use crate::solver::update::StateUpdater;

// =================================================================================================
// Particle record
// =================================================================================================

/// Everything the pipeline reads and writes for one particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Shell state, mutated every coupling pass
    pub chemistry: ParticleChemistry,

    /// Gas state at the particle position, refreshed by the fluid side
    pub gas: GasCoupling,

    /// Gas-phase source accumulators, drained by the fluid side
    pub sources: GasSources,
}

impl Particle {
    pub fn new(chemistry: ParticleChemistry, gas: GasCoupling) -> Self {
        Self {
            chemistry,
            gas,
            sources: GasSources::default(),
        }
    }
}

// =================================================================================================
// Results
// =================================================================================================

/// Intermediate quantities of one particle update
///
/// Zero everywhere when the particle was inert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactionReport {
    /// Active interfaces after retirement
    pub active: ActiveInterfaces,

    /// Layers retired at the start of this update
    pub retired_layers: usize,

    /// Fractional conversion per interface
    pub conversion: InterfaceVector,

    /// Equilibrium mole fraction per interface
    pub equilibrium: InterfaceVector,

    /// Reaction, diffusion and film resistances
    pub resistances: Resistances,

    /// Interface rates dY
    pub rates: InterfaceVector,

    /// Reactant mass consumed per interface \[kg\], capped so that no shell
    /// drops below the mass floor
    pub reactant_flow: InterfaceVector,

    /// Mass lost per shell \[kg\]
    pub layer_flow: LayerVector,
}

impl ReactionReport {
    fn inert(retired_layers: usize) -> Self {
        Self {
            active: ActiveInterfaces::Inert,
            retired_layers,
            conversion: InterfaceVector::zeros(),
            equilibrium: InterfaceVector::zeros(),
            resistances: Resistances::uniform(0, 0.0),
            rates: InterfaceVector::zeros(),
            reactant_flow: InterfaceVector::zeros(),
            layer_flow: LayerVector::zeros(),
        }
    }
}

/// Result of [`ShrinkCore::react`]
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionOutcome {
    /// Updated shell state
    pub chemistry: ParticleChemistry,

    /// Gas source increments of this update
    pub sources: GasSources,

    /// Intermediate quantities
    pub report: ReactionReport,
}

/// Aggregate statistics of one coupling pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PassSummary {
    /// Whether coupling was established for this pass
    pub established: bool,

    /// Particles handed to the pass
    pub particles: usize,

    /// Particles with at least one active interface after retirement
    pub reacting: usize,

    /// Particles without any active interface after retirement
    pub inert: usize,

    /// Layers retired during the pass
    pub retired_layers: usize,

    /// Reactant gas consumed \[kg\]
    pub reactant_consumed: f64,

    /// Product gas released \[kg\]
    pub product_released: f64,
}

impl PassSummary {
    fn gated(particles: usize) -> Self {
        Self {
            particles,
            ..Self::default()
        }
    }

    fn single(outcome: &ReactionOutcome) -> Self {
        let reacting = outcome.report.active != ActiveInterfaces::Inert;
        Self {
            established: true,
            particles: 1,
            reacting: usize::from(reacting),
            inert: usize::from(!reacting),
            retired_layers: outcome.report.retired_layers,
            reactant_consumed: -outcome.sources.reactant,
            product_released: outcome.sources.product,
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            established: self.established || other.established,
            particles: self.particles + other.particles,
            reacting: self.reacting + other.reacting,
            inert: self.inert + other.inert,
            retired_layers: self.retired_layers + other.retired_layers,
            reactant_consumed: self.reactant_consumed + other.reactant_consumed,
            product_released: self.product_released + other.product_released,
        }
    }
}

// =================================================================================================
// Pipeline
// =================================================================================================

/// Multi-layer shrinking-core reaction pipeline
///
/// # Example
///
/// ```rust
/// use shrinkcore_rs::prelude::*;
///
/// let config = CouplingConfiguration::iron_ore(ReducingGas::CarbonMonoxide)
///     .with_coupling_every(10);
/// let mut core = ShrinkCore::new(config, vec![MaterialTable::hematite_ore()], 0).unwrap();
///
/// let chemistry = core.initialize_particle(
///     1e-3,
///     LayerVector::new(1.0, 0.998, 0.995, 0.99),
///     LayerVector::from_element(0.3),
///     0,
/// ).unwrap();
/// let gas = GasCoupling {
///     temperature: 1173.15,
///     molecular_diffusivity: 2e-4,
///     kinematic_viscosity: 1.5e-4,
///     reynolds: 10.0,
///     bulk_mole_fraction: 0.9,
///     partial_pressure: 101_325.0,
/// };
/// let mut particles = vec![Particle::new(chemistry, gas)];
///
/// // Before the gate opens nothing happens
/// let summary = core.step(5, &mut particles).unwrap();
/// assert!(!summary.established);
///
/// let summary = core.step(20, &mut particles).unwrap();
/// assert!(summary.established);
/// assert!(particles[0].sources.reactant < 0.0);
/// ```
pub struct ShrinkCore {
    config: CouplingConfiguration,
    materials: Vec<MaterialTable>,
    equilibrium: Box<dyn EquilibriumModel>,
    resistance: Box<dyn ResistanceModel>,
    solver: ReactionSolver,
    updater: StateUpdater,
    activation: LayerActivationPolicy,
    gate: CouplingGate,
}

impl ShrinkCore {
    /// Build the pipeline with the Valipour equilibrium and the standard resistance network
    ///
    /// # Arguments
    ///
    /// * `config` - Gas species, molar masses and time stepping
    /// * `materials` - One table per material type, indexed by `material_type`
    /// * `created_at` - Engine timestep at which the pipeline is created
    ///
    /// # Errors
    ///
    /// Any invalid configuration value or material constant.
    pub fn new(
        config: CouplingConfiguration,
        materials: Vec<MaterialTable>,
        created_at: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let equilibrium = ValipourEquilibrium::new(config.reactant, config.reducing_gas_content)?;
        debug!(
            "Valipour equilibrium for {} at reducing-gas content {}",
            equilibrium.gas(),
            equilibrium.content()
        );
        let resistance = ResistanceNetwork::new(config.reactant_molar_mass)?;

        Self::with_models(config, materials, created_at, Box::new(equilibrium), Box::new(resistance))
    }

    /// Build the pipeline around custom equilibrium and resistance models
    pub fn with_models(
        config: CouplingConfiguration,
        materials: Vec<MaterialTable>,
        created_at: u64,
        equilibrium: Box<dyn EquilibriumModel>,
        resistance: Box<dyn ResistanceModel>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        if materials.is_empty() {
            return Err(ConfigError::invalid(
                "shrink core",
                "materials",
                "at least one material table is required",
            ));
        }
        for material in &materials {
            material.validate()?;
        }

        debug!(
            "shrink core: reactant {} -> {}, {} material(s), equilibrium '{}', resistance '{}'",
            config.reactant,
            config.reactant.product_formula(),
            materials.len(),
            equilibrium.name(),
            resistance.name()
        );

        let core = Self {
            solver: ReactionSolver::new(config.reactant_molar_mass, config.coupling_interval()),
            updater: StateUpdater::new(
                config.reactant_molar_mass,
                config.product_molar_mass,
                config.stoichiometry,
                config.mass_floor,
            ),
            activation: LayerActivationPolicy::new(config.min_layer_radius, config.mass_floor),
            gate: CouplingGate::new(created_at, config.coupling_every),
            config,
            materials,
            equilibrium,
            resistance,
        };
        debug!(
            "shrink core: retiring cores below {:.1e} m or {:.1e} kg",
            core.activation.min_layer_radius(),
            core.activation.mass_floor()
        );

        Ok(core)
    }

    // ========================================== Queries ==========================================

    pub fn config(&self) -> &CouplingConfiguration {
        &self.config
    }

    pub fn gate(&self) -> &CouplingGate {
        &self.gate
    }

    /// Material table of `material_type`
    pub fn material(&self, material_type: usize) -> Result<&MaterialTable, ConfigError> {
        self.materials.get(material_type).ok_or(ConfigError::MissingMaterial {
            material_type,
            available: self.materials.len(),
        })
    }

    /// Initial shell state of a new particle of `material_type`
    ///
    /// The coarse-graining factor is taken from the configuration.
    pub fn initialize_particle(
        &self,
        radius: f64,
        relative_radius: LayerVector,
        porosity: LayerVector,
        material_type: usize,
    ) -> Result<ParticleChemistry, ConfigError> {
        let material = self.material(material_type)?;
        ParticleChemistry::new(
            radius,
            relative_radius,
            porosity,
            &material.bulk_density,
            self.config.coarse_graining,
            material_type,
        )
    }

    // ======================================== Reaction =========================================

    /// Compute one coupling interval for a single particle without mutating it
    ///
    /// Ignores the coupling gate.
    pub fn react(&self, chemistry: &ParticleChemistry, gas: &GasCoupling) -> Result<ReactionOutcome, ConfigError> {
        let material = self.material(chemistry.material_type())?;
        Ok(self.react_with(chemistry, gas, material))
    }

    fn react_with(&self, chemistry: &ParticleChemistry, gas: &GasCoupling, material: &MaterialTable) -> ReactionOutcome {
        let gas = if gas.is_physical() {
            *gas
        } else {
            warn!("non-physical gas state {gas:?}, clamping to physical range");
            gas.clamped()
        };

        let mut next = chemistry.clone();
        let retired_layers = self.activation.apply(&mut next);

        if next.is_inert() {
            return ReactionOutcome {
                chemistry: next,
                sources: GasSources::default(),
                report: ReactionReport::inert(retired_layers),
            };
        }

        let count = next.active_layers();
        let active = ActiveInterfaces::from_count(count);
        let conversion = next.conversion();
        let equilibrium = self.equilibrium.equilibrium_fractions(count, gas.temperature);
        let resistances = self.resistance.resistances(&next, &gas, material, self.equilibrium.as_ref());

        let rates = ReactionSolver::conversion_rates(active, &resistances, gas.bulk_mole_fraction, &equilibrium);
        let demand = self.solver.reactant_mass_flow(&rates, &gas, next.physical_radius());
        let reactant_flow = self.updater.limit_reactant_flow(&next, &demand, &material.molar_mass);
        if reactant_flow != demand {
            trace!("reactant flow {:?} capped to {:?} by the mass floor", demand.as_slice(), reactant_flow.as_slice());
        }
        let layer_flow = self.updater.layer_mass_flow(&reactant_flow, count, &material.molar_mass);

        trace!(
            "active {count}: f={:?} x_eq={:?} A={:?} B={:?} M={:.4e} D_eff={:?} dY={:?} dmA={:?}",
            conversion.as_slice(),
            equilibrium.as_slice(),
            resistances.reaction.as_slice(),
            resistances.diffusion.as_slice(),
            resistances.mass_transfer,
            resistances.effective_diffusivity.as_slice(),
            rates.as_slice(),
            reactant_flow.as_slice()
        );

        let sources = self.updater.apply(&mut next, &reactant_flow, &material.molar_mass);

        ReactionOutcome {
            chemistry: next,
            sources,
            report: ReactionReport {
                active,
                retired_layers,
                conversion,
                equilibrium,
                resistances,
                rates,
                reactant_flow,
                layer_flow,
            },
        }
    }

    fn advance(&self, particle: &mut Particle) -> PassSummary {
        // Material types were checked before the pass started
        let Some(material) = self.materials.get(particle.chemistry.material_type()) else {
            return PassSummary::gated(1);
        };

        let outcome = self.react_with(&particle.chemistry, &particle.gas, material);
        let summary = PassSummary::single(&outcome);

        particle.chemistry = outcome.chemistry;
        particle.sources += outcome.sources;

        summary
    }

    fn advance_sequential(&self, particles: &mut [Particle]) -> PassSummary {
        particles
            .iter_mut()
            .map(|particle| self.advance(particle))
            .fold(PassSummary::default(), PassSummary::merge)
    }

    #[cfg(feature = "parallel")]
    fn advance_all(&self, particles: &mut [Particle]) -> PassSummary {
        if particles.len() > crate::solver::parallel_threshold() {
            use rayon::prelude::*;

            particles
                .par_iter_mut()
                .map(|particle| self.advance(particle))
                .reduce(PassSummary::default, PassSummary::merge)
        } else {
            self.advance_sequential(particles)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn advance_all(&self, particles: &mut [Particle]) -> PassSummary {
        self.advance_sequential(particles)
    }

    /// Run one coupling pass over `particles`
    ///
    /// Does nothing until the coupling gate opens. Every particle's material
    /// type is checked before the first one is touched.
    pub fn step(&mut self, timestep: u64, particles: &mut [Particle]) -> Result<PassSummary, ConfigError> {
        if !self.gate.poll(timestep) {
            return Ok(PassSummary::gated(particles.len()));
        }

        for particle in particles.iter() {
            self.material(particle.chemistry.material_type())?;
        }

        let summary = self.advance_all(particles);
        let summary = PassSummary { established: true, ..summary };

        debug!(
            "timestep {timestep}: {} particles, {} reacting, {} inert, {} layers retired, {:.4e} kg {} consumed",
            summary.particles,
            summary.reacting,
            summary.inert,
            summary.retired_layers,
            summary.reactant_consumed,
            self.config.reactant
        );

        Ok(summary)
    }
}

impl std::fmt::Debug for ShrinkCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShrinkCore")
            .field("config", &self.config)
            .field("materials", &self.materials.len())
            .field("equilibrium", &self.equilibrium.name())
            .field("resistance", &self.resistance.name())
            .field("gate", &self.gate)
            .finish()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

//! Model traits and the solvent inputs handed to them.
//!
//! Models are pure functions of (T, P), the record they evaluate and whatever
//! solvent inputs they declared through [`SolventNeeds`]. They never look up
//! other records themselves: the engine fetches the declared inputs (through
//! its memoized entry points) and passes them in as [`SolventInputs`].
//!
//! Implementations must be thread-safe (Send + Sync) so a registry can be
//! shared by engines on several worker threads.

use crate::error::{ModelError, ModelResult};
use crate::properties::{
    ElectroPropertiesSolvent, PropertiesSolvent, ThermoPropertiesReaction,
    ThermoPropertiesSubstance,
};
use tf_db::{Reaction, Substance};

/// Phase in which a water model evaluates the solvent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SolventState {
    #[default]
    Liquid,
    Vapor,
}

/// Which solvent inputs a model reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolventNeeds {
    /// Bulk properties (density and derivatives)
    pub properties: bool,
    /// Dielectric properties and Born functions
    pub electro: bool,
    /// Standard thermodynamic properties of the solvent substance
    pub thermo: bool,
    /// The same inputs, additionally at the solvent's reference (Tr, Pr)
    pub reference_state: bool,
}

impl SolventNeeds {
    pub const NONE: Self = Self {
        properties: false,
        electro: false,
        thermo: false,
        reference_state: false,
    };

    pub fn any(&self) -> bool {
        self.properties || self.electro || self.thermo
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            properties: self.properties || other.properties,
            electro: self.electro || other.electro,
            thermo: self.thermo || other.thermo,
            reference_state: self.reference_state || other.reference_state,
        }
    }
}

/// Solvent inputs at a single (T, P).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolventSnapshot {
    /// Temperature [K]
    pub t: f64,
    /// Pressure [Pa]
    pub p: f64,
    pub properties: Option<PropertiesSolvent>,
    pub electro: Option<ElectroPropertiesSolvent>,
    pub thermo: Option<ThermoPropertiesSubstance>,
}

impl SolventSnapshot {
    pub fn properties(&self) -> ModelResult<&PropertiesSolvent> {
        self.properties.as_ref().ok_or(ModelError::MissingInput {
            what: "solvent properties",
        })
    }

    pub fn electro(&self) -> ModelResult<&ElectroPropertiesSolvent> {
        self.electro.as_ref().ok_or(ModelError::MissingInput {
            what: "solvent electro properties",
        })
    }

    pub fn thermo(&self) -> ModelResult<&ThermoPropertiesSubstance> {
        self.thermo.as_ref().ok_or(ModelError::MissingInput {
            what: "solvent thermodynamic properties",
        })
    }
}

/// Everything a model may read about the solvent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolventInputs {
    pub current: SolventSnapshot,
    pub reference: Option<SolventSnapshot>,
}

impl SolventInputs {
    /// Inputs for a model that declared no solvent needs.
    pub fn none(t: f64, p: f64) -> Self {
        Self {
            current: SolventSnapshot {
                t,
                p,
                ..Default::default()
            },
            reference: None,
        }
    }

    pub fn reference(&self) -> ModelResult<&SolventSnapshot> {
        self.reference.as_ref().ok_or(ModelError::MissingInput {
            what: "solvent reference state",
        })
    }
}

/// Generic equation of state of a substance: produces the baseline properties.
pub trait SubstanceEos: Send + Sync {
    fn name(&self) -> &str;

    fn solvent_needs(&self, _substance: &Substance) -> SolventNeeds {
        SolventNeeds::NONE
    }

    fn properties(
        &self,
        t: f64,
        p: f64,
        substance: &Substance,
        solvent: &SolventInputs,
    ) -> ModelResult<ThermoPropertiesSubstance>;
}

/// Temperature or pressure correction applied on top of a baseline.
pub trait SubstanceCorrection: Send + Sync {
    fn name(&self) -> &str;

    fn solvent_needs(&self, _substance: &Substance) -> SolventNeeds {
        SolventNeeds::NONE
    }

    fn correct(
        &self,
        t: f64,
        p: f64,
        substance: &Substance,
        base: ThermoPropertiesSubstance,
        solvent: &SolventInputs,
    ) -> ModelResult<ThermoPropertiesSubstance>;
}

/// Water (solvent) equation of state.
pub trait WaterEos: Send + Sync {
    fn name(&self) -> &str;

    fn thermo_properties(
        &self,
        t: f64,
        p: f64,
        substance: &Substance,
        state: SolventState,
    ) -> ModelResult<ThermoPropertiesSubstance>;

    fn solvent_properties(
        &self,
        t: f64,
        p: f64,
        substance: &Substance,
        state: SolventState,
    ) -> ModelResult<PropertiesSolvent>;
}

/// Dielectric model of the solvent.
pub trait SolventElectroModel: Send + Sync {
    fn name(&self) -> &str;

    fn electro_properties(
        &self,
        t: f64,
        p: f64,
        substance: &Substance,
        properties: &PropertiesSolvent,
    ) -> ModelResult<ElectroPropertiesSolvent>;
}

/// Temperature model of a reaction: produces the baseline reaction properties.
pub trait ReactionTemperatureModel: Send + Sync {
    fn name(&self) -> &str;

    fn solvent_needs(&self, _reaction: &Reaction) -> SolventNeeds {
        SolventNeeds::NONE
    }

    fn properties(
        &self,
        t: f64,
        p: f64,
        reaction: &Reaction,
        solvent: &SolventInputs,
    ) -> ModelResult<ThermoPropertiesReaction>;
}

/// Pressure correction of reaction properties.
pub trait ReactionPressureModel: Send + Sync {
    fn name(&self) -> &str;

    fn solvent_needs(&self, _reaction: &Reaction) -> SolventNeeds {
        SolventNeeds::NONE
    }

    fn correct(
        &self,
        t: f64,
        p: f64,
        reaction: &Reaction,
        base: ThermoPropertiesReaction,
        solvent: &SolventInputs,
    ) -> ModelResult<ThermoPropertiesReaction>;
}

/// Validation helpers for model inputs and outputs.
pub mod validation {
    use super::*;
    use tf_core::numeric::{ensure_finite, ensure_positive};

    /// Ensure temperature is positive and finite.
    pub fn validate_temperature(t: f64) -> ModelResult<f64> {
        Ok(ensure_positive(t, "temperature")?)
    }

    /// Ensure pressure is positive and finite.
    pub fn validate_pressure(p: f64) -> ModelResult<f64> {
        Ok(ensure_positive(p, "pressure")?)
    }

    /// Ensure density is positive and finite.
    pub fn validate_density(rho: f64) -> ModelResult<f64> {
        if !rho.is_finite() || rho <= 0.0 {
            return Err(ModelError::NonPhysical {
                what: "density must be positive and finite",
            });
        }
        Ok(rho)
    }

    /// Ensure every field of a property set is finite.
    pub fn validate_substance(tps: &ThermoPropertiesSubstance) -> ModelResult<()> {
        for (_, value) in tps.values() {
            ensure_finite(value, "substance property")?;
        }
        Ok(())
    }

    pub fn validate_reaction(tpr: &ThermoPropertiesReaction) -> ModelResult<()> {
        for (_, value) in tpr.values() {
            ensure_finite(value, "reaction property")?;
        }
        Ok(())
    }

    /// Coefficients of `len` entries, or a `MissingParameter` naming the record.
    pub fn require_coefficients<'a>(
        coefficients: &'a [f64],
        len: usize,
        what: &'static str,
        symbol: &str,
    ) -> ModelResult<&'a [f64]> {
        if coefficients.len() < len {
            return Err(ModelError::MissingParameter {
                what,
                symbol: symbol.to_string(),
            });
        }
        Ok(&coefficients[..len])
    }
}

//! Substances defined through a reaction, and reactions summed from their reactants.

use crate::engine::ThermoEngine;
use crate::error::{EngineError, EngineResult};
use tf_db::Substance;
use tf_models::{Status, ThermoPropertiesReaction, ThermoPropertiesSubstance};

impl ThermoEngine {
    /// Properties of `substance` solved from its reaction:
    /// `G_X = (ΔrG − Σ_{j≠X} ν_j G_j) / ν_X`, likewise for every field.
    pub(crate) fn from_reaction(
        &self,
        t: f64,
        p: f64,
        substance: &Substance,
    ) -> EngineResult<ThermoPropertiesSubstance> {
        let symbol = substance.symbol.as_str();
        let reaction_symbol = substance
            .reaction_symbol
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| EngineError::ReactionNotDefined {
                symbol: symbol.to_string(),
            })?;
        let reaction = self.database().get_reaction(reaction_symbol)?;

        let stoichiometry = |reason| EngineError::InvalidStoichiometry {
            symbol: symbol.to_string(),
            reaction: reaction_symbol.to_string(),
            reason,
        };
        let own = match reaction.coefficient(symbol) {
            None => return Err(stoichiometry("substance is not a reactant")),
            Some(c) if c == 0.0 => return Err(stoichiometry("coefficient is zero")),
            Some(c) if !c.is_finite() => return Err(stoichiometry("coefficient is not finite")),
            Some(c) => c,
        };

        let tpr = self.reaction_properties_si(t, p, reaction_symbol)?;
        let mut tps = ThermoPropertiesSubstance::from(&tpr);
        for (other, &coeff) in &reaction.reactants {
            if other == symbol {
                continue;
            }
            let component = self.substance_properties_si(t, p, other)?;
            tps.add_scaled(&component, -coeff);
        }
        tps.scale(1.0 / own);
        Ok(tps)
    }

    pub(crate) fn compute_reaction_from_reactants(
        &self,
        t: f64,
        p: f64,
        symbol: &str,
    ) -> EngineResult<ThermoPropertiesReaction> {
        let reaction = self.database().get_reaction(symbol)?;
        let mut tpr = ThermoPropertiesReaction::default();

        let header = format!("Calculated from the reaction components: {symbol}");
        for field in ThermoPropertiesReaction::FIELDS {
            tpr.annotate(field, Status::Calculated, &header);
        }

        for (component, &coeff) in &reaction.reactants {
            let tps = self.substance_properties_si(t, p, component)?;
            accumulate(&mut tpr, &tps, coeff);

            let failed =
                |a: Option<&tf_models::Annotation>| a.is_some_and(|a| a.status == Status::Failed);
            for &(field, source, label) in COMPONENT_PROVENANCE {
                let status = if failed(tps.annotation(source)) || failed(tpr.annotation(field)) {
                    Status::Failed
                } else {
                    Status::Calculated
                };
                tpr.annotate(field, status, format!("{label} of component {component}"));
            }
        }

        tpr.sync_equilibrium_constant(t);
        tracing::debug!(symbol, log_k = tpr.log_equilibrium_constant, "reaction from reactants");
        Ok(tpr)
    }
}

/// Reaction field, the component field it is built from, and its label.
/// Both equilibrium constants follow from ΔrG.
const COMPONENT_PROVENANCE: &[(&str, &str, &str)] = &[
    ("gibbs_energy", "gibbs_energy", "G0"),
    ("enthalpy", "enthalpy", "H0"),
    ("entropy", "entropy", "S0"),
    ("heat_capacity_cp", "heat_capacity_cp", "Cp"),
    ("heat_capacity_cv", "heat_capacity_cv", "Cv"),
    ("volume", "volume", "V0"),
    ("helmholtz_energy", "helmholtz_energy", "A0"),
    ("internal_energy", "internal_energy", "U0"),
    ("ln_equilibrium_constant", "gibbs_energy", "G0"),
    ("log_equilibrium_constant", "gibbs_energy", "G0"),
];

/// `tpr += coeff × tps` over the fields the two sets share.
fn accumulate(tpr: &mut ThermoPropertiesReaction, tps: &ThermoPropertiesSubstance, coeff: f64) {
    tpr.gibbs_energy += coeff * tps.gibbs_energy;
    tpr.enthalpy += coeff * tps.enthalpy;
    tpr.entropy += coeff * tps.entropy;
    tpr.heat_capacity_cp += coeff * tps.heat_capacity_cp;
    tpr.heat_capacity_cv += coeff * tps.heat_capacity_cv;
    tpr.volume += coeff * tps.volume;
    tpr.helmholtz_energy += coeff * tps.helmholtz_energy;
    tpr.internal_energy += coeff * tps.internal_energy;
}

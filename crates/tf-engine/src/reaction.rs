//! Reaction property evaluation: temperature model, then pressure correction.

use crate::engine::{ThermoEngine, lookup};
use crate::error::{EngineError, EngineResult, NO_CODE, Site};
use tf_models::ThermoPropertiesReaction;

impl ThermoEngine {
    pub(crate) fn compute_reaction(
        &self,
        t: f64,
        p: f64,
        symbol: &str,
    ) -> EngineResult<ThermoPropertiesReaction> {
        let reaction = self.database().get_reaction(symbol)?;
        let models = self.models();

        let code_t = reaction
            .method_t
            .ok_or_else(|| EngineError::unsupported(Site::Reaction, NO_CODE, symbol))?;
        let model_t = lookup(models.reaction_t(code_t), Site::Reaction, code_t, symbol)?;
        let model_p = match reaction.method_p {
            Some(code) => lookup(models.reaction_p(code), Site::Reaction, code, symbol)?,
            None => None,
        };
        tracing::debug!(
            symbol,
            method_t = %code_t,
            method_p = ?reaction.method_p,
            "reaction evaluation"
        );

        let mut needs = model_t.map(|m| m.solvent_needs(reaction)).unwrap_or_default();
        if let Some(m) = model_p {
            needs = needs.union(m.solvent_needs(reaction));
        }
        let inputs = self.solvent_inputs(t, p, needs)?;

        let mut tpr = match model_t {
            Some(model) => model
                .properties(t, p, reaction, &inputs)
                .map_err(EngineError::model(model.name(), symbol))?,
            None => ThermoPropertiesReaction::default(),
        };
        if let Some(model) = model_p {
            tpr = model
                .correct(t, p, reaction, tpr, &inputs)
                .map_err(EngineError::model(model.name(), symbol))?;
        }
        tpr.sync_equilibrium_constant(t);
        Ok(tpr)
    }
}

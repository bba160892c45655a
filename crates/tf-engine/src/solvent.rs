//! Solvent bulk and dielectric property evaluation.

use crate::engine::{ThermoEngine, lookup};
use crate::error::{EngineError, EngineResult, NO_CODE, Site};
use crate::preferences::ThermoPreferences;
use tf_models::{ElectroPropertiesSolvent, PropertiesSolvent};

impl ThermoEngine {
    pub(crate) fn compute_solvent(
        &self,
        t: f64,
        p: f64,
        symbol: &str,
    ) -> EngineResult<PropertiesSolvent> {
        let pref = ThermoPreferences::new(self.database().get_substance(symbol)?);
        if !pref.is_h2o_solvent {
            tracing::debug!(symbol, "not a solvent: zero solvent properties");
            return Ok(PropertiesSolvent::default());
        }

        let code = pref
            .method_t
            .ok_or_else(|| EngineError::unsupported(Site::Solvent, NO_CODE, symbol))?;
        let Some(model) = lookup(self.models().water(code), Site::Solvent, code, symbol)? else {
            return Ok(PropertiesSolvent::default());
        };
        tracing::debug!(symbol, method_t = %code, model = model.name(), "solvent properties");
        model
            .solvent_properties(t, p, pref.substance, pref.solvent_state)
            .map_err(EngineError::model(model.name(), symbol))
    }

    pub(crate) fn compute_electro(
        &self,
        t: f64,
        p: f64,
        symbol: &str,
    ) -> EngineResult<ElectroPropertiesSolvent> {
        let pref = ThermoPreferences::new(self.database().get_substance(symbol)?);
        if !pref.is_h2o_solvent {
            tracing::debug!(symbol, "not a solvent: zero electro properties");
            return Ok(ElectroPropertiesSolvent::default());
        }

        let code = pref
            .method_gen_eos
            .ok_or_else(|| EngineError::unsupported(Site::Solvent, NO_CODE, symbol))?;
        let Some(model) = lookup(self.models().electro(code), Site::Solvent, code, symbol)? else {
            return Ok(ElectroPropertiesSolvent::default());
        };
        let properties = self.solvent_properties_si(t, p, symbol)?;
        tracing::debug!(symbol, method = %code, model = model.name(), "solvent electro properties");
        model
            .electro_properties(t, p, pref.substance, &properties)
            .map_err(EngineError::model(model.name(), symbol))
    }
}

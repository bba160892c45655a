//! Substance property evaluation: dispatch by record classification and method codes.

use crate::conventions::{AqueousConvention, WaterConvention, to_berman_brown, to_steam_tables};
use crate::engine::{ThermoEngine, lookup};
use crate::error::{EngineError, EngineResult, NO_CODE, Site};
use crate::preferences::ThermoPreferences;
use tf_db::MethodGenEos;
use tf_models::ThermoPropertiesSubstance;

impl ThermoEngine {
    pub(crate) fn compute_substance(
        &self,
        t: f64,
        p: f64,
        symbol: &str,
    ) -> EngineResult<ThermoPropertiesSubstance> {
        let db = self.database();
        let pref = ThermoPreferences::new(db.get_substance(symbol)?);

        if pref.is_hydrogen {
            tracing::debug!(symbol, "hydrogen ion: zero properties");
            return Ok(ThermoPropertiesSubstance::default());
        }
        if pref.is_reac_dc {
            tracing::debug!(symbol, "reaction-derived substance");
            return self.from_reaction(t, p, pref.substance);
        }

        let mut tps = if pref.uses_water_model() {
            self.water_substance(t, p, &pref)?
        } else {
            self.direct_substance(t, p, &pref)?
        };
        self.apply_conventions(&pref, &mut tps)?;
        Ok(tps)
    }

    /// Generic EoS baseline, then the optional temperature and pressure corrections.
    fn direct_substance(
        &self,
        t: f64,
        p: f64,
        pref: &ThermoPreferences<'_>,
    ) -> EngineResult<ThermoPropertiesSubstance> {
        let substance = pref.substance;
        let symbol = substance.symbol.as_str();
        let models = self.models();

        let code = pref
            .method_gen_eos
            .ok_or_else(|| EngineError::unsupported(Site::Substance, NO_CODE, symbol))?;
        let eos = lookup(models.generic_eos(code), Site::Substance, code, symbol)?;
        let corr_t = match pref.method_t {
            Some(code) => lookup(models.substance_t(code), Site::Substance, code, symbol)?,
            None => None,
        };
        let corr_p = match pref.method_p {
            Some(code) => lookup(models.substance_p(code), Site::Substance, code, symbol)?,
            None => None,
        };
        tracing::debug!(
            symbol,
            eos = %code,
            method_t = ?pref.method_t,
            method_p = ?pref.method_p,
            "direct substance evaluation"
        );

        let mut needs = eos.map(|m| m.solvent_needs(substance)).unwrap_or_default();
        for corr in [corr_t, corr_p].into_iter().flatten() {
            needs = needs.union(corr.solvent_needs(substance));
        }
        let inputs = self.solvent_inputs(t, p, needs)?;

        let mut tps = match eos {
            Some(model) => model
                .properties(t, p, substance, &inputs)
                .map_err(EngineError::model(model.name(), symbol))?,
            None => ThermoPropertiesSubstance::default(),
        };
        for corr in [corr_t, corr_p].into_iter().flatten() {
            tps = corr
                .correct(t, p, substance, tps, &inputs)
                .map_err(EngineError::model(corr.name(), symbol))?;
        }
        Ok(tps)
    }

    /// Solvent water or water vapor: the water model selected by the temperature code.
    fn water_substance(
        &self,
        t: f64,
        p: f64,
        pref: &ThermoPreferences<'_>,
    ) -> EngineResult<ThermoPropertiesSubstance> {
        let substance = pref.substance;
        let symbol = substance.symbol.as_str();
        let models = self.models();

        if let Some(code) = pref.method_t
            && let Some(handler) = models.water(code)
        {
            tracing::debug!(symbol, method_t = %code, state = ?pref.solvent_state, "water model");
            return match lookup(Some(handler), Site::Substance, code, symbol)? {
                Some(model) => model
                    .thermo_properties(t, p, substance, pref.solvent_state)
                    .map_err(EngineError::model(model.name(), symbol)),
                None => Ok(ThermoPropertiesSubstance::default()),
            };
        }

        if pref.method_gen_eos == Some(MethodGenEos::CpIntegration) {
            tracing::debug!(symbol, "water without a water model: Cp integration");
            let code = MethodGenEos::CpIntegration;
            let Some(model) = lookup(models.generic_eos(code), Site::Substance, code, symbol)?
            else {
                return Ok(ThermoPropertiesSubstance::default());
            };
            let inputs = self.solvent_inputs(t, p, model.solvent_needs(substance))?;
            return model
                .properties(t, p, substance, &inputs)
                .map_err(EngineError::model(model.name(), symbol));
        }

        let code = pref.method_t.map(|c| c.to_string());
        Err(EngineError::unsupported(
            Site::Substance,
            code.as_deref().unwrap_or(NO_CODE),
            symbol,
        ))
    }

    fn apply_conventions(
        &self,
        pref: &ThermoPreferences<'_>,
        tps: &mut ThermoPropertiesSubstance,
    ) -> EngineResult<()> {
        let conventions = self.conventions();
        let substance = pref.substance;
        if pref.is_h2o_solvent {
            if conventions.water == WaterConvention::SteamTables {
                tracing::debug!(symbol = %substance.symbol, "steam-table reference");
                to_steam_tables(tps);
            }
        } else if conventions.aqueous == AqueousConvention::BermanBrown {
            let s_el = self.database().elemental_entropy(&substance.formula)?;
            tracing::debug!(symbol = %substance.symbol, s_el, "Berman-Brown convention");
            to_berman_brown(tps, substance.reference_t, s_el);
        }
        Ok(())
    }
}

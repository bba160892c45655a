//! The engine: record store + model registry + memoized evaluators.

use crate::config::EngineConfig;
use crate::conventions::Conventions;
use crate::error::{EngineError, EngineResult, Site};
use crate::memo::{Memo, MemoStats};
use crate::stack::{EvalStack, FrameKind};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tf_core::numeric::ensure_positive;
use tf_core::{Pressure, Temperature, kelvin_of, pascal_of};
use tf_db::{Database, FormulaMap};
use tf_models::{
    ElectroPropertiesSolvent, Handler, ModelRegistry, PropertiesSolvent, SolventInputs,
    SolventNeeds, SolventSnapshot, ThermoPropertiesReaction, ThermoPropertiesSubstance,
};

/// Hit/miss counters of every evaluator cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub substance: MemoStats,
    pub reaction: MemoStats,
    pub reaction_from_reactants: MemoStats,
    pub solvent: MemoStats,
    pub electro: MemoStats,
}

/// Computes standard thermodynamic properties of the records in a database.
///
/// Every public evaluator is memoized on (T, P, symbol) for the lifetime of
/// the engine. The engine is single-threaded (its caches use `RefCell`); run
/// one engine per thread over a shared `Arc<Database>` and a cloned registry.
pub struct ThermoEngine {
    db: Arc<Database>,
    models: ModelRegistry,
    config: EngineConfig,
    substances: Memo<ThermoPropertiesSubstance>,
    reactions: Memo<ThermoPropertiesReaction>,
    reactions_from_reactants: Memo<ThermoPropertiesReaction>,
    solvents: Memo<PropertiesSolvent>,
    electro: Memo<ElectroPropertiesSolvent>,
    pub(crate) stack: EvalStack,
}

impl ThermoEngine {
    /// Engine with the built-in models and default configuration.
    pub fn new(db: Arc<Database>) -> Self {
        Self::with_config(db, ModelRegistry::default(), EngineConfig::default())
    }

    pub fn with_models(db: Arc<Database>, models: ModelRegistry) -> Self {
        Self::with_config(db, models, EngineConfig::default())
    }

    pub fn with_config(db: Arc<Database>, models: ModelRegistry, config: EngineConfig) -> Self {
        let stack = EvalStack::new(config.max_depth);
        Self {
            db,
            models,
            config,
            substances: Memo::new("substance"),
            reactions: Memo::new("reaction"),
            reactions_from_reactants: Memo::new("reaction_from_reactants"),
            solvents: Memo::new("solvent"),
            electro: Memo::new("electro"),
            stack,
        }
    }

    // ---------- public evaluators ----------

    /// Standard properties of a substance at (T, P).
    pub fn substance_properties(
        &self,
        t: Temperature,
        p: Pressure,
        symbol: &str,
    ) -> EngineResult<ThermoPropertiesSubstance> {
        let (t, p) = state_point(t, p)?;
        self.substance_properties_si(t, p, symbol)
    }

    /// Standard properties of a reaction at (T, P).
    pub fn reaction_properties(
        &self,
        t: Temperature,
        p: Pressure,
        symbol: &str,
    ) -> EngineResult<ThermoPropertiesReaction> {
        let (t, p) = state_point(t, p)?;
        self.reaction_properties_si(t, p, symbol)
    }

    /// Reaction properties summed from the properties of its reactants.
    pub fn reaction_properties_from_reactants(
        &self,
        t: Temperature,
        p: Pressure,
        symbol: &str,
    ) -> EngineResult<ThermoPropertiesReaction> {
        let (t, p) = state_point(t, p)?;
        self.reaction_properties_from_reactants_si(t, p, symbol)
    }

    /// Bulk properties of a solvent; all zero for a substance that is not a solvent.
    pub fn solvent_properties(
        &self,
        t: Temperature,
        p: Pressure,
        symbol: &str,
    ) -> EngineResult<PropertiesSolvent> {
        let (t, p) = state_point(t, p)?;
        self.solvent_properties_si(t, p, symbol)
    }

    /// Dielectric properties of a solvent; all zero for a substance that is not a solvent.
    pub fn electro_solvent_properties(
        &self,
        t: Temperature,
        p: Pressure,
        symbol: &str,
    ) -> EngineResult<ElectroPropertiesSolvent> {
        let (t, p) = state_point(t, p)?;
        self.electro_solvent_properties_si(t, p, symbol)
    }

    // ---------- memoized, guarded entry points (T in K, P in Pa) ----------

    pub(crate) fn substance_properties_si(
        &self,
        t: f64,
        p: f64,
        symbol: &str,
    ) -> EngineResult<ThermoPropertiesSubstance> {
        self.substances.get_or_try_insert(t, p, symbol, || {
            let _frame = self.stack.enter(FrameKind::Substance, symbol, t, p)?;
            self.compute_substance(t, p, symbol)
        })
    }

    pub(crate) fn reaction_properties_si(
        &self,
        t: f64,
        p: f64,
        symbol: &str,
    ) -> EngineResult<ThermoPropertiesReaction> {
        self.reactions.get_or_try_insert(t, p, symbol, || {
            let _frame = self.stack.enter(FrameKind::Reaction, symbol, t, p)?;
            self.compute_reaction(t, p, symbol)
        })
    }

    pub(crate) fn reaction_properties_from_reactants_si(
        &self,
        t: f64,
        p: f64,
        symbol: &str,
    ) -> EngineResult<ThermoPropertiesReaction> {
        self.reactions_from_reactants
            .get_or_try_insert(t, p, symbol, || {
                let _frame = self
                    .stack
                    .enter(FrameKind::ReactionFromReactants, symbol, t, p)?;
                self.compute_reaction_from_reactants(t, p, symbol)
            })
    }

    pub(crate) fn solvent_properties_si(
        &self,
        t: f64,
        p: f64,
        symbol: &str,
    ) -> EngineResult<PropertiesSolvent> {
        self.solvents.get_or_try_insert(t, p, symbol, || {
            let _frame = self.stack.enter(FrameKind::Solvent, symbol, t, p)?;
            self.compute_solvent(t, p, symbol)
        })
    }

    pub(crate) fn electro_solvent_properties_si(
        &self,
        t: f64,
        p: f64,
        symbol: &str,
    ) -> EngineResult<ElectroPropertiesSolvent> {
        self.electro.get_or_try_insert(t, p, symbol, || {
            let _frame = self.stack.enter(FrameKind::Electro, symbol, t, p)?;
            self.compute_electro(t, p, symbol)
        })
    }

    // ---------- solvent inputs for models ----------

    /// Fetch the solvent inputs a model declared, at (t, p) and optionally at
    /// the solvent record's reference state.
    pub(crate) fn solvent_inputs(
        &self,
        t: f64,
        p: f64,
        needs: SolventNeeds,
    ) -> EngineResult<SolventInputs> {
        if !needs.any() {
            return Ok(SolventInputs::none(t, p));
        }
        let current = self.solvent_snapshot(t, p, needs)?;
        let reference = if needs.reference_state {
            let solvent = self.db.get_substance(&self.config.solvent_symbol)?;
            Some(self.solvent_snapshot(solvent.reference_t, solvent.reference_p, needs)?)
        } else {
            None
        };
        Ok(SolventInputs { current, reference })
    }

    fn solvent_snapshot(&self, t: f64, p: f64, needs: SolventNeeds) -> EngineResult<SolventSnapshot> {
        let symbol = self.config.solvent_symbol.as_str();
        tracing::debug!(solvent = symbol, t, p, ?needs, "gathering solvent inputs");
        Ok(SolventSnapshot {
            t,
            p,
            properties: needs
                .properties
                .then(|| self.solvent_properties_si(t, p, symbol))
                .transpose()?,
            electro: needs
                .electro
                .then(|| self.electro_solvent_properties_si(t, p, symbol))
                .transpose()?,
            thermo: needs
                .thermo
                .then(|| self.substance_properties_si(t, p, symbol))
                .transpose()?,
        })
    }

    // ---------- settings and accessors ----------

    pub fn solvent_symbol(&self) -> &str {
        &self.config.solvent_symbol
    }

    /// Select the solvent used by solute models. Clears every cache.
    pub fn set_solvent_symbol(&mut self, symbol: impl Into<String>) {
        self.config.solvent_symbol = symbol.into();
        self.clear_caches();
    }

    pub fn conventions(&self) -> Conventions {
        self.config.conventions
    }

    /// Change the reference-state conventions. Clears every cache.
    pub fn set_conventions(&mut self, conventions: Conventions) {
        self.config.conventions = conventions;
        self.clear_caches();
    }

    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.config.max_depth = max_depth;
        self.stack.set_max_depth(max_depth);
    }

    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn parse_substance_formula(&self, formula: &str) -> EngineResult<FormulaMap> {
        Ok(self.db.parse_substance_formula(formula)?)
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            substance: self.substances.stats(),
            reaction: self.reactions.stats(),
            reaction_from_reactants: self.reactions_from_reactants.stats(),
            solvent: self.solvents.stats(),
            electro: self.electro.stats(),
        }
    }

    pub fn clear_caches(&self) {
        self.substances.clear();
        self.reactions.clear();
        self.reactions_from_reactants.clear();
        self.solvents.clear();
        self.electro.clear();
    }
}

impl fmt::Debug for ThermoEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThermoEngine")
            .field("substances", &self.db.num_substances())
            .field("reactions", &self.db.num_reactions())
            .field("models", &self.models)
            .field("config", &self.config)
            .finish()
    }
}

fn state_point(t: Temperature, p: Pressure) -> EngineResult<(f64, f64)> {
    let t = ensure_positive(kelvin_of(t), "temperature")?;
    let p = ensure_positive(pascal_of(p), "pressure")?;
    Ok((t, p))
}

/// Model behind a registry entry: `Some` for a model, `None` for an accepted
/// no-op, `UnsupportedMethod` when the code has no entry.
pub(crate) fn lookup<'r, M: ?Sized>(
    handler: Option<&'r Handler<M>>,
    site: Site,
    code: impl fmt::Display,
    symbol: &str,
) -> EngineResult<Option<&'r Arc<M>>> {
    match handler {
        Some(Handler::Model(model)) => Ok(Some(model)),
        Some(Handler::NoOp { reason }) => {
            tracing::warn!(%site, %code, symbol, reason, "method code accepted without evaluation");
            Ok(None)
        }
        None => Err(EngineError::unsupported(site, code, symbol)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tf_core::{bar, celsius, k};
    use tf_db::Substance;

    #[test]
    fn non_physical_state_point_is_rejected() {
        let engine = ThermoEngine::new(Arc::new(Database::new()));
        assert!(matches!(
            engine.substance_properties(k(-1.0), bar(1.0), "A"),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            engine.substance_properties(celsius(25.0), bar(0.0), "A"),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn unknown_symbol_is_record_not_found() {
        let engine = ThermoEngine::new(Arc::new(Database::new()));
        assert!(matches!(
            engine.substance_properties(k(298.15), bar(1.0), "Nope"),
            Err(EngineError::RecordNotFound { .. })
        ));
        assert!(matches!(
            engine.reaction_properties(k(298.15), bar(1.0), "Nope"),
            Err(EngineError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn setting_solvent_clears_caches() {
        let mut db = Database::new();
        db.add_substance(Substance::new("H+"));
        let mut engine = ThermoEngine::new(Arc::new(db));
        engine
            .substance_properties(k(298.15), bar(1.0), "H+")
            .unwrap();
        assert_eq!(engine.cache_stats().substance.entries, 1);

        engine.set_solvent_symbol("H2O");
        assert_eq!(engine.solvent_symbol(), "H2O");
        assert_eq!(engine.cache_stats().substance.entries, 0);
    }

    #[test]
    fn no_needs_means_no_solvent_lookup() {
        // No solvent record exists; a model without needs must not require one.
        let engine = ThermoEngine::new(Arc::new(Database::new()));
        let inputs = engine.solvent_inputs(300.0, 1e5, SolventNeeds::NONE).unwrap();
        assert_eq!(inputs, SolventInputs::none(300.0, 1e5));
    }

    #[test]
    fn lookup_distinguishes_model_noop_and_missing() {
        let reg = ModelRegistry::default();
        let model = lookup(
            reg.generic_eos(tf_db::MethodGenEos::CpIntegration),
            Site::Substance,
            "CTPM_CPT",
            "A",
        )
        .unwrap();
        assert!(model.is_some());

        let noop = lookup(
            reg.reaction_p(tf_db::MethodCorrP::Null),
            Site::Reaction,
            "CPM_NUL",
            "R",
        )
        .unwrap();
        assert!(noop.is_none());

        assert!(matches!(
            lookup(
                reg.water(tf_db::MethodCorrT::WaterHgk),
                Site::Substance,
                "CTM_WAT",
                "H2O@"
            ),
            Err(EngineError::UnsupportedMethod { .. })
        ));
    }
}

//! Classification of a substance record for dispatch.

use crate::error::EngineResult;
use tf_db::{
    AggregateState, CalculationType, Database, MethodCorrP, MethodCorrT, MethodGenEos, Substance,
    SubstanceClass,
};
use tf_models::SolventState;

/// Symbol (or name) of the aqueous proton, the zero reference of ionic properties.
pub const HYDROGEN_ION: &str = "H+";

/// Flags derived from a substance record that steer property evaluation.
#[derive(Debug, Clone, Copy)]
pub struct ThermoPreferences<'a> {
    pub substance: &'a Substance,
    pub method_gen_eos: Option<MethodGenEos>,
    pub method_t: Option<MethodCorrT>,
    pub method_p: Option<MethodCorrP>,
    pub is_hydrogen: bool,
    pub is_h2o_vapor: bool,
    pub is_h2o_solvent: bool,
    pub solvent_state: SolventState,
    pub is_reac_dc: bool,
}

impl<'a> ThermoPreferences<'a> {
    pub fn new(substance: &'a Substance) -> Self {
        let method_gen_eos = substance.method_gen_eos;
        let method_p = substance.method_p;
        Self {
            substance,
            method_gen_eos,
            method_t: substance.method_t,
            method_p,
            is_hydrogen: substance.symbol == HYDROGEN_ION || substance.name == HYDROGEN_ION,
            is_h2o_vapor: method_gen_eos == Some(MethodGenEos::HkfGems)
                && method_p == Some(MethodCorrP::GasCorrespondingStates),
            is_h2o_solvent: substance.substance_class == SubstanceClass::AqueousSolvent,
            solvent_state: if substance.aggregate_state == AggregateState::Gas {
                SolventState::Vapor
            } else {
                SolventState::Liquid
            },
            is_reac_dc: substance.calculation_type == CalculationType::ReactionDerived,
        }
    }

    /// Evaluated with a water equation of state rather than the generic EoS chain.
    pub fn uses_water_model(&self) -> bool {
        self.is_h2o_solvent || self.is_h2o_vapor
    }
}

/// Look up a substance and classify it.
pub fn resolve<'a>(db: &'a Database, symbol: &str) -> EngineResult<ThermoPreferences<'a>> {
    Ok(ThermoPreferences::new(db.get_substance(symbol)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn resolve_unknown_symbol_fails() {
        let mut db = Database::new();
        db.add_substance(Substance::new("Quartz"));
        assert!(resolve(&db, "Quartz").is_ok());
        assert!(matches!(
            resolve(&db, "Calcite"),
            Err(EngineError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn hydrogen_by_symbol_or_name() {
        let proton = Substance::new("H+");
        assert!(ThermoPreferences::new(&proton).is_hydrogen);

        let mut named = Substance::new("Hydron");
        named.name = "H+".into();
        assert!(ThermoPreferences::new(&named).is_hydrogen);

        assert!(!ThermoPreferences::new(&Substance::new("Na+")).is_hydrogen);
    }

    #[test]
    fn water_vapor_needs_hkf_and_gas_correction() {
        let mut vapor = Substance::new("H2O");
        vapor.aggregate_state = AggregateState::Gas;
        vapor.method_gen_eos = Some(MethodGenEos::HkfGems);
        vapor.method_p = Some(MethodCorrP::GasCorrespondingStates);
        let pref = ThermoPreferences::new(&vapor);
        assert!(pref.is_h2o_vapor);
        assert!(!pref.is_h2o_solvent);
        assert_eq!(pref.solvent_state, SolventState::Vapor);
        assert!(pref.uses_water_model());

        vapor.method_p = Some(MethodCorrP::IdealGas);
        assert!(!ThermoPreferences::new(&vapor).is_h2o_vapor);
    }

    #[test]
    fn solvent_and_reaction_derived_flags() {
        let mut water = Substance::new("H2O@");
        water.substance_class = SubstanceClass::AqueousSolvent;
        water.aggregate_state = AggregateState::Aqueous;
        let pref = ThermoPreferences::new(&water);
        assert!(pref.is_h2o_solvent);
        assert_eq!(pref.solvent_state, SolventState::Liquid);
        assert!(!pref.is_reac_dc);

        let mut derived = Substance::new("X");
        derived.calculation_type = CalculationType::ReactionDerived;
        assert!(ThermoPreferences::new(&derived).is_reac_dc);
    }
}

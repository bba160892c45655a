//! Shared fixtures for the engine integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tf_db::{
    AggregateState, CalculationType, Database, Element, MethodCorrP, MethodCorrT, MethodGenEos,
    Reaction, ReferenceProperties, Substance, SubstanceClass,
};
use tf_models::{
    ModelRegistry, ModelResult, PropertiesSolvent, SolventInputs, SolventState, SubstanceEos,
    ThermoPropertiesSubstance, WaterEos,
};

pub const SOLVENT: &str = "H2O@";

/// Water model with simple closed forms; counts its invocations.
#[derive(Debug, Default, Clone)]
pub struct StubWater {
    pub calls: Arc<AtomicUsize>,
}

impl StubWater {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl WaterEos for StubWater {
    fn name(&self) -> &str {
        "stub water"
    }

    fn thermo_properties(
        &self,
        t: f64,
        p: f64,
        _substance: &Substance,
        state: SolventState,
    ) -> ModelResult<ThermoPropertiesSubstance> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let offset = match state {
            SolventState::Liquid => 0.0,
            SolventState::Vapor => 44_000.0,
        };
        let mut tps = ThermoPropertiesSubstance {
            gibbs_energy: -237_181.0 + offset - 69.95 * (t - 298.15),
            enthalpy: -285_881.0 + offset,
            entropy: 69.95,
            heat_capacity_cp: 75.35,
            heat_capacity_cv: 74.5,
            volume: 1.807e-5,
            ..Default::default()
        };
        tps.update_pv_terms(p);
        Ok(tps)
    }

    fn solvent_properties(
        &self,
        t: f64,
        _p: f64,
        _substance: &Substance,
        _state: SolventState,
    ) -> ModelResult<PropertiesSolvent> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(PropertiesSolvent {
            density: 997.05 - 0.25 * (t - 298.15),
            density_t: -0.25,
            alpha: 2.57e-4,
            beta: 4.52e-10,
            ..Default::default()
        })
    }
}

/// Generic EoS returning the reference properties unchanged; counts its invocations.
#[derive(Debug, Default, Clone)]
pub struct CountingEos {
    pub calls: Arc<AtomicUsize>,
}

impl CountingEos {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SubstanceEos for CountingEos {
    fn name(&self) -> &str {
        "counting"
    }

    fn properties(
        &self,
        t: f64,
        p: f64,
        substance: &Substance,
        _solvent: &SolventInputs,
    ) -> ModelResult<ThermoPropertiesSubstance> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let r = &substance.reference;
        let mut tps = ThermoPropertiesSubstance {
            gibbs_energy: r.gibbs_energy - r.entropy * (t - substance.reference_t),
            enthalpy: r.enthalpy,
            entropy: r.entropy,
            heat_capacity_cp: r.heat_capacity_cp,
            volume: r.volume,
            ..Default::default()
        };
        tps.update_pv_terms(p);
        Ok(tps)
    }
}

pub fn solvent() -> Substance {
    let mut water = Substance::new(SOLVENT);
    water.formula = "H2O@".into();
    water.aggregate_state = AggregateState::Aqueous;
    water.substance_class = SubstanceClass::AqueousSolvent;
    water.method_gen_eos = Some(MethodGenEos::WaterJohnsonNortonGems);
    water.method_t = Some(MethodCorrT::WaterHgk);
    water
}

pub fn mineral(symbol: &str, formula: &str, g: f64, h: f64, s: f64, cp: f64) -> Substance {
    let mut m = Substance::new(symbol);
    m.formula = formula.into();
    m.method_gen_eos = Some(MethodGenEos::CpIntegration);
    m.method_p = Some(MethodCorrP::ConstantVolume);
    m.reference = ReferenceProperties {
        gibbs_energy: g,
        enthalpy: h,
        entropy: s,
        heat_capacity_cp: cp,
        volume: 2.0e-5,
    };
    m
}

pub fn sodium() -> Substance {
    let mut na = Substance::new("Na+");
    na.formula = "Na+".into();
    na.charge = 1.0;
    na.aggregate_state = AggregateState::Aqueous;
    na.substance_class = SubstanceClass::AqueousSolute;
    na.method_gen_eos = Some(MethodGenEos::HkfGems);
    na.reference = ReferenceProperties {
        gibbs_energy: -261_881.0,
        enthalpy: -240_300.0,
        entropy: 58.41,
        heat_capacity_cp: 38.1,
        volume: -1.11e-6,
    };
    na.hkf_coefficients = vec![0.1839, -228.5, 3.256, -27_260.0, 18.18, -29_810.0, 33_060.0];
    na
}

pub fn proton() -> Substance {
    let mut h = Substance::new("H+");
    h.formula = "H+".into();
    h.charge = 1.0;
    h.aggregate_state = AggregateState::Aqueous;
    h.method_gen_eos = Some(MethodGenEos::HkfGems);
    h
}

/// X is defined by `X = A + B` with constant log K: reactants {X: 1, A: -1, B: -1}.
pub fn closure_reaction() -> Reaction {
    let mut r = Reaction::new("R_X");
    r.reactants.insert("X".into(), 1.0);
    r.reactants.insert("A".into(), -1.0);
    r.reactants.insert("B".into(), -1.0);
    r.method_t = Some(MethodCorrT::LogKConstant);
    r.reference.log_k = -2.5;
    r
}

pub fn derived(symbol: &str, reaction: &str) -> Substance {
    let mut x = Substance::new(symbol);
    x.calculation_type = CalculationType::ReactionDerived;
    x.reaction_symbol = Some(reaction.into());
    x
}

pub fn elements() -> Vec<Element> {
    [("O", 205.152 / 2.0), ("Si", 18.81), ("Ca", 41.59), ("C", 5.74)]
        .into_iter()
        .map(|(symbol, entropy)| Element {
            symbol: symbol.into(),
            name: symbol.into(),
            atomic_mass: 0.0,
            entropy,
            valence: 0,
        })
        .collect()
}

/// Solvent, two minerals, the closure reaction with its derived substance X, Na+ and H+.
pub fn database() -> Database {
    let mut db = Database::new();
    for element in elements() {
        db.add_element(element);
    }
    db.add_substance(solvent());
    db.add_substance(mineral("A", "SiO2", -856_288.0, -910_700.0, 41.46, 44.6));
    db.add_substance(mineral("B", "CaO", -603_500.0, -635_100.0, 38.1, 42.1));
    db.add_substance(derived("X", "R_X"));
    db.add_reaction(closure_reaction());
    db.add_substance(sodium());
    db.add_substance(proton());
    db
}

pub fn registry_with_water(water: &StubWater) -> ModelRegistry {
    let mut models = ModelRegistry::default();
    models.register_water(MethodCorrT::WaterHgk, water.clone());
    models
}

pub fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * (1.0 + a.abs().max(b.abs()))
}

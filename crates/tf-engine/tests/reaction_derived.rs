mod common;

use common::*;
use std::sync::Arc;
use tf_core::{bar, k};
use tf_db::{MethodCorrT, Reaction};
use tf_engine::{EngineConfig, EngineError, ThermoEngine};
use tf_models::{ModelRegistry, Status, ThermoPropertiesReaction, ThermoPropertiesSubstance};

fn engine_for(db: tf_db::Database) -> ThermoEngine {
    ThermoEngine::with_models(Arc::new(db), registry_with_water(&StubWater::default()))
}

fn substance_fields(tps: &ThermoPropertiesSubstance) -> [(&'static str, f64); 8] {
    [
        ("G", tps.gibbs_energy),
        ("H", tps.enthalpy),
        ("S", tps.entropy),
        ("Cp", tps.heat_capacity_cp),
        ("Cv", tps.heat_capacity_cv),
        ("V", tps.volume),
        ("A", tps.helmholtz_energy),
        ("U", tps.internal_energy),
    ]
}

fn reaction_fields(tpr: &ThermoPropertiesReaction) -> [(&'static str, f64); 8] {
    [
        ("G", tpr.gibbs_energy),
        ("H", tpr.enthalpy),
        ("S", tpr.entropy),
        ("Cp", tpr.heat_capacity_cp),
        ("Cv", tpr.heat_capacity_cv),
        ("V", tpr.volume),
        ("A", tpr.helmholtz_energy),
        ("U", tpr.internal_energy),
    ]
}

#[test]
fn derived_substance_closes_its_reaction() {
    let engine = engine_for(database());
    for (t, p) in [(298.15, 1.0), (373.15, 100.0), (523.15, 100.0)] {
        let (t, p) = (k(t), bar(p));
        let x = engine.substance_properties(t, p, "X").unwrap();
        let a = engine.substance_properties(t, p, "A").unwrap();
        let b = engine.substance_properties(t, p, "B").unwrap();
        let r = engine.reaction_properties(t, p, "R_X").unwrap();

        // {X: 1, A: -1, B: -1}: X = ΔrX + A + B for every scalar field
        let fields = substance_fields(&x)
            .into_iter()
            .zip(reaction_fields(&r))
            .zip(substance_fields(&a))
            .zip(substance_fields(&b));
        for ((((name, x), (_, r)), (_, a)), (_, b)) in fields {
            assert!(close(x, r + a + b, 1e-12), "{name}: {x} != {}", r + a + b);
        }

        let summed = engine.reaction_properties_from_reactants(t, p, "R_X").unwrap();
        for ((name, s), (_, r)) in reaction_fields(&summed).into_iter().zip(reaction_fields(&r)) {
            assert!(close(s, r, 1e-9), "{name}: {s} != {r}");
        }
        assert!(close(summed.ln_equilibrium_constant, r.ln_equilibrium_constant, 1e-9));
        assert!(close(summed.log_equilibrium_constant, r.log_equilibrium_constant, 1e-9));
    }
}

#[test]
fn own_coefficient_divides_the_result() {
    let mut db = database();
    let mut r = Reaction::new("R_2X");
    r.reactants.insert("X2".into(), 2.0);
    r.reactants.insert("A".into(), -1.0);
    r.method_t = Some(MethodCorrT::LogKConstant);
    r.reference.log_k = 1.0;
    db.add_reaction(r);
    db.add_substance(derived("X2", "R_2X"));
    let engine = engine_for(db);

    let (t, p) = (k(298.15), bar(1.0));
    let x2 = engine.substance_properties(t, p, "X2").unwrap();
    let a = engine.substance_properties(t, p, "A").unwrap();
    let r = engine.reaction_properties(t, p, "R_2X").unwrap();
    assert!(close(x2.gibbs_energy, (r.gibbs_energy + a.gibbs_energy) / 2.0, 1e-12));
}

#[test]
fn derived_substance_needs_a_reaction() {
    let mut db = database();
    let mut orphan = derived("Orphan", "");
    db.add_substance(orphan.clone());
    orphan.symbol = "Orphan2".into();
    orphan.reaction_symbol = None;
    db.add_substance(orphan);
    let engine = engine_for(db);

    for symbol in ["Orphan", "Orphan2"] {
        assert!(matches!(
            engine.substance_properties(k(298.15), bar(1.0), symbol),
            Err(EngineError::ReactionNotDefined { symbol: s }) if s == symbol
        ));
    }
}

#[test]
fn missing_defining_reaction_is_not_found() {
    let mut db = database();
    db.add_substance(derived("Ghost", "R_missing"));
    let engine = engine_for(db);
    assert!(matches!(
        engine.substance_properties(k(298.15), bar(1.0), "Ghost"),
        Err(EngineError::RecordNotFound { .. })
    ));
}

#[test]
fn invalid_own_coefficient() {
    let mut db = database();
    let mut zero = Reaction::new("R_zero");
    zero.reactants.insert("Z".into(), 0.0);
    zero.reactants.insert("A".into(), -1.0);
    zero.method_t = Some(MethodCorrT::LogKConstant);
    db.add_reaction(zero);
    db.add_substance(derived("Z", "R_zero"));
    // defined by a reaction it does not take part in
    db.add_substance(derived("Y", "R_X"));
    let engine = engine_for(db);

    assert!(matches!(
        engine.substance_properties(k(298.15), bar(1.0), "Z"),
        Err(EngineError::InvalidStoichiometry { reason: "coefficient is zero", .. })
    ));
    assert!(matches!(
        engine.substance_properties(k(298.15), bar(1.0), "Y"),
        Err(EngineError::InvalidStoichiometry { ref reaction, .. }) if reaction == "R_X"
    ));
}

#[test]
fn mutually_derived_substances_are_a_cycle() {
    let mut db = database();
    for (own, other) in [("P", "Q"), ("Q", "P")] {
        let mut r = Reaction::new(format!("R_{own}"));
        r.reactants.insert(own.into(), 1.0);
        r.reactants.insert(other.into(), -1.0);
        r.method_t = Some(MethodCorrT::LogKConstant);
        db.add_reaction(r);
        db.add_substance(derived(own, &format!("R_{own}")));
    }
    let engine = engine_for(db);

    match engine.substance_properties(k(298.15), bar(1.0), "P") {
        Err(EngineError::CyclicDependency { chain }) => {
            assert_eq!(chain, vec!["substance P", "substance Q", "substance P"]);
        }
        other => panic!("expected a cycle, got {other:?}"),
    }
    // nothing from the failed evaluation was cached
    assert_eq!(engine.cache_stats().substance.entries, 0);
}

#[test]
fn depth_limit_is_enforced() {
    let config = EngineConfig {
        max_depth: 1,
        ..Default::default()
    };
    let engine = ThermoEngine::with_config(Arc::new(database()), ModelRegistry::default(), config);
    assert!(matches!(
        engine.substance_properties(k(298.15), bar(1.0), "X"),
        Err(EngineError::DepthExceeded { limit: 1, ref symbol }) if symbol == "R_X"
    ));
    // a direct substance fits in one frame
    assert!(engine.substance_properties(k(298.15), bar(1.0), "A").is_ok());
}

#[test]
fn from_reactants_records_provenance() {
    let engine = engine_for(database());
    let r = engine
        .reaction_properties_from_reactants(k(298.15), bar(1.0), "R_X")
        .unwrap();

    let note = r.annotation("gibbs_energy").unwrap();
    assert_eq!(note.status, Status::Calculated);
    assert!(note.message.starts_with("Calculated from the reaction components: R_X"));
    for component in ["A", "B", "X"] {
        assert!(note.message.contains(&format!("G0 of component {component}")));
    }

    let enthalpy = r.annotation("enthalpy").unwrap();
    assert!(enthalpy.message.contains("H0 of component A"));
    assert!(!enthalpy.message.contains("G0 of component"));

    // equilibrium constants are traced back to the components' G0
    for field in ["ln_equilibrium_constant", "log_equilibrium_constant"] {
        let note = r.annotation(field).unwrap();
        assert_eq!(note.status, Status::Calculated);
        for component in ["A", "B", "X"] {
            assert!(note.message.contains(&format!("G0 of component {component}")));
        }
    }

    let expected_ln_k = -r.gibbs_energy / (8.31451 * 298.15);
    assert!(close(r.ln_equilibrium_constant, expected_ln_k, 1e-12));
}

mod common;

use common::*;
use proptest::prelude::*;
use std::sync::Arc;
use tf_core::{k, pa};
use tf_db::MethodGenEos;
use tf_engine::ThermoEngine;
use tf_models::ModelRegistry;

fn counting_engine() -> (ThermoEngine, CountingEos, StubWater) {
    let eos = CountingEos::default();
    let water = StubWater::default();
    let mut models = registry_with_water(&water);
    models.register_generic_eos(MethodGenEos::CpIntegration, eos.clone());
    (
        ThermoEngine::with_models(Arc::new(database()), models),
        eos,
        water,
    )
}

#[test]
fn each_state_point_is_computed_once() {
    let (engine, eos, _) = counting_engine();
    for _ in 0..5 {
        engine.substance_properties(k(300.0), pa(2e5), "A").unwrap();
    }
    assert_eq!(eos.calls(), 1);

    engine.substance_properties(k(300.0), pa(3e5), "A").unwrap();
    engine.substance_properties(k(310.0), pa(2e5), "A").unwrap();
    engine.substance_properties(k(300.0), pa(2e5), "B").unwrap();
    assert_eq!(eos.calls(), 4);

    let stats = engine.cache_stats().substance;
    assert_eq!(stats.misses, 4);
    assert_eq!(stats.hits, 4);
    assert_eq!(stats.entries, 4);
}

#[test]
fn shared_reactants_are_reused_across_evaluations() {
    let (engine, eos, _) = counting_engine();
    let (t, p) = (k(400.0), pa(1e6));
    engine.substance_properties(t, p, "X").unwrap();
    engine.reaction_properties_from_reactants(t, p, "R_X").unwrap();
    engine.substance_properties(t, p, "A").unwrap();
    // A and B, once each
    assert_eq!(eos.calls(), 2);
    assert_eq!(engine.cache_stats().reaction.misses, 1);
}

#[test]
fn solvent_inputs_are_shared_between_solutes() {
    let (engine, _, water) = counting_engine();
    let (t, p) = (k(350.0), pa(5e5));
    engine.substance_properties(t, p, "Na+").unwrap();
    let after_first = water.calls();
    engine.electro_solvent_properties(t, p, SOLVENT).unwrap();
    engine.solvent_properties(t, p, SOLVENT).unwrap();
    assert_eq!(water.calls(), after_first);
    // current state and reference state
    assert_eq!(after_first, 2);
}

#[test]
fn clearing_caches_forces_recomputation() {
    let (engine, eos, _) = counting_engine();
    engine.substance_properties(k(300.0), pa(1e5), "A").unwrap();
    engine.clear_caches();
    assert_eq!(engine.cache_stats().substance.entries, 0);
    engine.substance_properties(k(300.0), pa(1e5), "A").unwrap();
    assert_eq!(eos.calls(), 2);
}

#[test]
fn engines_do_not_share_caches() {
    let db = Arc::new(database());
    let eos = CountingEos::default();
    let mut models = ModelRegistry::default();
    models.register_generic_eos(MethodGenEos::CpIntegration, eos.clone());
    let first = ThermoEngine::with_models(Arc::clone(&db), models.clone());
    let second = ThermoEngine::with_models(db, models);
    first.substance_properties(k(300.0), pa(1e5), "A").unwrap();
    second.substance_properties(k(300.0), pa(1e5), "A").unwrap();
    assert_eq!(eos.calls(), 2);
}

proptest! {
    #[test]
    fn memoized_results_equal_fresh_results(
        t in 273.16f64..800.0,
        p in 1.0e5f64..1.0e8,
        symbol in prop::sample::select(vec!["A", "B", "X", "Na+", "H+", SOLVENT]),
    ) {
        let (warm, _, _) = counting_engine();
        // warm the caches with neighbouring evaluations first
        for s in ["A", "B", "X", "Na+"] {
            warm.substance_properties(k(t), pa(p), s).unwrap();
        }
        let cached = warm.substance_properties(k(t), pa(p), symbol).unwrap();
        let again = warm.substance_properties(k(t), pa(p), symbol).unwrap();

        let (fresh, _, _) = counting_engine();
        let direct = fresh.substance_properties(k(t), pa(p), symbol).unwrap();

        prop_assert_eq!(&cached, &again);
        prop_assert_eq!(&cached, &direct);
    }
}

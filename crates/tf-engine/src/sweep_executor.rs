//! Sweep execution: substance properties across a temperature or pressure range.
//!
//! Points that fail to evaluate are kept as `None` so the independent values
//! stay aligned with the results.

use crate::config::EngineConfig;
use crate::engine::ThermoEngine;
use crate::sweeps::{SweepDefinition, SweepError};
use rayon::prelude::*;
use std::sync::Arc;
use tf_core::{Quantity, pa, k};
use tf_db::Database;
use tf_models::{ModelRegistry, ThermoPropertiesSubstance};

/// Result of a substance property sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    pub symbol: String,
    /// Quantity that varies across the sweep
    pub swept: Quantity,
    /// Temperature of every point [K]
    pub temperatures: Vec<f64>,
    /// Pressure of every point [Pa]
    pub pressures: Vec<f64>,
    /// Computed properties (None for failed points)
    pub states: Vec<Option<ThermoPropertiesSubstance>>,
    pub num_successful: usize,
    pub num_failed: usize,
}

impl SweepResult {
    fn new(symbol: &str, swept: Quantity, points: Vec<(f64, f64)>, states: Vec<Option<ThermoPropertiesSubstance>>) -> Self {
        let num_successful = states.iter().filter(|s| s.is_some()).count();
        let (temperatures, pressures) = points.into_iter().unzip();
        Self {
            symbol: symbol.to_string(),
            swept,
            temperatures,
            pressures,
            num_failed: states.len() - num_successful,
            states,
            num_successful,
        }
    }

    /// Values of the swept quantity.
    pub fn independent_values(&self) -> &[f64] {
        match self.swept {
            Quantity::Temperature => &self.temperatures,
            Quantity::Pressure => &self.pressures,
        }
    }

    /// `(T, P, properties)` of every successful point.
    pub fn successful_points(&self) -> impl Iterator<Item = (f64, f64, &ThermoPropertiesSubstance)> {
        self.temperatures
            .iter()
            .zip(&self.pressures)
            .zip(&self.states)
            .filter_map(|((&t, &p), s)| s.as_ref().map(|s| (t, p, s)))
    }

    /// Get independent values corresponding to successful states
    pub fn successful_independent_values(&self) -> Vec<f64> {
        self.independent_values()
            .iter()
            .zip(&self.states)
            .filter_map(|(val, state)| state.as_ref().map(|_| *val))
            .collect()
    }

    pub fn gibbs_energy(&self) -> Vec<f64> {
        self.field(|s| s.gibbs_energy)
    }

    pub fn enthalpy(&self) -> Vec<f64> {
        self.field(|s| s.enthalpy)
    }

    pub fn entropy(&self) -> Vec<f64> {
        self.field(|s| s.entropy)
    }

    pub fn heat_capacity_cp(&self) -> Vec<f64> {
        self.field(|s| s.heat_capacity_cp)
    }

    pub fn volume(&self) -> Vec<f64> {
        self.field(|s| s.volume)
    }

    fn field(&self, get: impl Fn(&ThermoPropertiesSubstance) -> f64) -> Vec<f64> {
        self.states.iter().flatten().map(get).collect()
    }
}

/// State points of a sweep with the other coordinate held fixed.
fn state_points(sweep_def: &SweepDefinition, fixed: f64) -> Vec<(f64, f64)> {
    let values = sweep_def.generate_points();
    match sweep_def.quantity {
        Quantity::Temperature => values.into_iter().map(|t| (t, fixed)).collect(),
        Quantity::Pressure => values.into_iter().map(|p| (fixed, p)).collect(),
    }
}

fn evaluate(engine: &ThermoEngine, symbol: &str, t: f64, p: f64) -> Option<ThermoPropertiesSubstance> {
    match engine.substance_properties(k(t), pa(p), symbol) {
        Ok(tps) => Some(tps),
        Err(err) => {
            tracing::warn!(symbol, t, p, error = %err, "sweep point failed");
            None
        }
    }
}

fn execute(engine: &ThermoEngine, symbol: &str, sweep_def: &SweepDefinition, fixed: f64) -> SweepResult {
    let points = state_points(sweep_def, fixed);
    let states = points
        .iter()
        .map(|&(t, p)| evaluate(engine, symbol, t, p))
        .collect();
    SweepResult::new(symbol, sweep_def.quantity, points, states)
}

/// Execute a temperature sweep at fixed pressure [Pa].
pub fn execute_temperature_sweep_at_pressure(
    engine: &ThermoEngine,
    symbol: &str,
    sweep_def: &SweepDefinition,
    fixed_pressure_pa: f64,
) -> Result<SweepResult, SweepError> {
    sweep_def.expect_quantity(Quantity::Temperature)?;
    Ok(execute(engine, symbol, sweep_def, fixed_pressure_pa))
}

/// Execute a pressure sweep at fixed temperature [K].
pub fn execute_pressure_sweep_at_temperature(
    engine: &ThermoEngine,
    symbol: &str,
    sweep_def: &SweepDefinition,
    fixed_temperature_k: f64,
) -> Result<SweepResult, SweepError> {
    sweep_def.expect_quantity(Quantity::Pressure)?;
    Ok(execute(engine, symbol, sweep_def, fixed_temperature_k))
}

/// Execute a sweep on the rayon pool, one engine per worker.
///
/// Either quantity may be swept: `fixed` is the pressure [Pa] of a
/// temperature sweep or the temperature [K] of a pressure sweep. Workers share the database and the registry's models.
pub fn execute_sweep_parallel(
    db: &Arc<Database>,
    models: &ModelRegistry,
    config: &EngineConfig,
    symbol: &str,
    sweep_def: &SweepDefinition,
    fixed: f64,
) -> Result<SweepResult, SweepError> {
    sweep_def.validate()?;
    let points = state_points(sweep_def, fixed);
    let states = points
        .par_iter()
        .map_init(
            || ThermoEngine::with_config(Arc::clone(db), models.clone(), config.clone()),
            |engine, &(t, p)| evaluate(engine, symbol, t, p),
        )
        .collect();
    Ok(SweepResult::new(symbol, sweep_def.quantity, points, states))
}

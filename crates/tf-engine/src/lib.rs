//! tf-engine: memoized evaluation of substance, solvent and reaction properties.
//!
//! The [`ThermoEngine`] ties a read-only [`tf_db::Database`] to a
//! [`tf_models::ModelRegistry`]. For every record it resolves which models
//! apply (by classification and method codes), gathers the solvent inputs
//! those models declared, runs them, and normalizes the result to the
//! configured reference conventions.
//!
//! # Architecture
//!
//! - `substance`, `solvent`, `reaction`, `reac_dc`: the evaluators, as
//!   `ThermoEngine` methods. They call each other only through the memoized
//!   entry points, so shared sub-results (the solvent at (T, P), reactant
//!   properties) are computed once.
//! - `memo`: per-engine caches keyed by bit-exact (T, P) and symbol.
//! - `stack`: evaluation stack; reports cyclic record references and bounds
//!   nesting depth.
//! - `sweeps`, `sweep_executor`: property sweeps, sequential or on rayon.
//!
//! An engine is single-threaded. For parallel work, build one engine per
//! thread over a shared `Arc<Database>` and a cloned registry.

pub mod config;
pub mod conventions;
pub mod engine;
pub mod error;
pub mod memo;
pub mod preferences;
mod reac_dc;
mod reaction;
mod solvent;
mod stack;
mod substance;
pub mod sweep_executor;
pub mod sweeps;

pub use config::EngineConfig;
pub use conventions::{AqueousConvention, Conventions, UnknownConvention, WaterConvention};
pub use engine::{CacheStats, ThermoEngine};
pub use error::{EngineError, EngineResult, NO_CODE, Site};
pub use memo::MemoStats;
pub use preferences::{ThermoPreferences, resolve};
pub use sweep_executor::{
    SweepResult, execute_pressure_sweep_at_temperature, execute_sweep_parallel,
    execute_temperature_sweep_at_pressure,
};
pub use sweeps::{SweepDefinition, SweepError, SweepType};

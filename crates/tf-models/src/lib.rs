//! tf-models: thermodynamic models for substances, solvents and reactions.
//!
//! Provides:
//! - property sets (substance, reaction, solvent bulk and dielectric properties)
//! - model traits, one per dispatch axis, and the solvent inputs passed to them
//! - the `ModelRegistry` mapping method codes to model implementations
//! - built-in models: Cp integration, HKF solutes, molar-volume pressure
//!   corrections, the Johnson-Norton dielectric model, log K(T) and ΔrV(T)
//!
//! # Architecture
//!
//! Models never look up records or call back into an engine. A model declares
//! the solvent inputs it needs ([`SolventNeeds`]); the caller computes them and
//! passes them in. Codes without a built-in model (water equations of state,
//! other fluid EoS, Landau transitions, ...) are left for clients to register.

pub mod cp_integration;
pub mod error;
pub mod hkf;
pub mod johnson_norton;
pub mod logk;
pub mod model;
pub mod molar_volume;
pub mod properties;
pub mod reaction_volume;
pub mod registry;

// Re-exports for ergonomics
pub use cp_integration::CpIntegration;
pub use error::{ModelError, ModelResult};
pub use hkf::HkfSolute;
pub use johnson_norton::JohnsonNorton;
pub use logk::{LogKForm, LogKFunctionOfT};
pub use model::{
    ReactionPressureModel, ReactionTemperatureModel, SolventElectroModel, SolventInputs,
    SolventNeeds, SolventSnapshot, SolventState, SubstanceCorrection, SubstanceEos, WaterEos,
};
pub use molar_volume::{Berman88Volume, ConstantMolarVolume, IdealGasVolume};
pub use properties::{
    Annotation, Annotations, ElectroPropertiesSolvent, PropertiesSolvent, Status,
    ThermoPropertiesReaction, ThermoPropertiesSubstance,
};
pub use reaction_volume::ReactionVolumeFunctionOfT;
pub use registry::{Handler, ModelRegistry};

//! Record definitions for substances, reactions and elements.
//!
//! Records are plain data: they are deserialized from a dataset file (or built
//! in code), inserted into a [`Database`](crate::Database) and never mutated
//! afterwards. Units are molar SI throughout: J/mol, J/(mol·K), m³/mol, K, Pa.

use crate::method::{MethodCorrP, MethodCorrT, MethodGenEos};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tf_core::constants::{REFERENCE_P, REFERENCE_T};

/// Current dataset file format version.
pub const LATEST_VERSION: u32 = 1;

/// Top-level layout of a dataset file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DatasetFile {
    #[serde(default = "latest_version")]
    pub version: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub substances: Vec<Substance>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

fn latest_version() -> u32 {
    LATEST_VERSION
}

fn default_reference_t() -> f64 {
    REFERENCE_T
}

fn default_reference_p() -> f64 {
    REFERENCE_P
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateState {
    Gas,
    Liquid,
    #[default]
    Solid,
    Aqueous,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubstanceClass {
    #[default]
    Normal,
    AqueousSolvent,
    AqueousSolute,
    GasFluid,
}

/// How a substance's properties are obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationType {
    /// From the substance's own equation-of-state models.
    #[default]
    Direct,
    /// From the properties of the reaction that defines it.
    ReactionDerived,
}

/// Standard molar properties of a substance at its reference T and P.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReferenceProperties {
    /// Gibbs energy of formation [J/mol]
    pub gibbs_energy: f64,
    /// Enthalpy of formation [J/mol]
    pub enthalpy: f64,
    /// Absolute entropy [J/(mol·K)]
    pub entropy: f64,
    /// Isobaric heat capacity [J/(mol·K)]
    pub heat_capacity_cp: f64,
    /// Molar volume [m³/mol]
    pub volume: f64,
}

/// A chemical substance (species) record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Substance {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub formula: String,
    #[serde(default)]
    pub charge: f64,
    #[serde(default)]
    pub aggregate_state: AggregateState,
    #[serde(default)]
    pub substance_class: SubstanceClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_gen_eos: Option<MethodGenEos>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_t: Option<MethodCorrT>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_p: Option<MethodCorrP>,
    #[serde(default)]
    pub calculation_type: CalculationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction_symbol: Option<String>,
    /// Reference temperature [K]
    #[serde(default = "default_reference_t")]
    pub reference_t: f64,
    /// Reference pressure [Pa]
    #[serde(default = "default_reference_p")]
    pub reference_p: f64,
    #[serde(default)]
    pub reference: ReferenceProperties,
    /// Cp = a0 + a1·T + a2/T² + a3/√T + a4·T² [J/(mol·K)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cp_coefficients: Vec<f64>,
    /// HKF a1, a2, a3, a4, c1, c2, ω in calorie/bar units as tabulated
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hkf_coefficients: Vec<f64>,
    /// Molar volume coefficients for the selected pressure correction
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volume_coefficients: Vec<f64>,
    /// Parameters for models registered by clients, keyed by parameter set name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, Vec<f64>>,
}

impl Substance {
    /// Minimal record with a symbol and defaults elsewhere.
    pub fn new(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        Self {
            name: symbol.clone(),
            symbol,
            reference_t: REFERENCE_T,
            reference_p: REFERENCE_P,
            ..Default::default()
        }
    }

    pub fn is_reaction_derived(&self) -> bool {
        self.calculation_type == CalculationType::ReactionDerived
    }

    /// Named client parameter set, if present.
    pub fn parameter(&self, key: &str) -> Option<&[f64]> {
        self.parameters.get(key).map(Vec::as_slice)
    }
}

/// Standard properties of a reaction at its reference T and P.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReactionReference {
    /// Decimal logarithm of the equilibrium constant
    pub log_k: f64,
    /// Reaction Gibbs energy [J/mol]
    pub gibbs_energy: f64,
    /// Reaction enthalpy [J/mol]
    pub enthalpy: f64,
    /// Reaction entropy [J/(mol·K)]
    pub entropy: f64,
    /// Reaction heat capacity [J/(mol·K)]
    pub heat_capacity_cp: f64,
    /// Reaction volume [m³/mol]
    pub volume: f64,
}

/// A reaction record with signed stoichiometry (products positive, reactants negative).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Reaction {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub equation: String,
    pub reactants: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_t: Option<MethodCorrT>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_p: Option<MethodCorrP>,
    /// Reference temperature [K]
    #[serde(default = "default_reference_t")]
    pub reference_t: f64,
    /// Reference pressure [Pa]
    #[serde(default = "default_reference_p")]
    pub reference_p: f64,
    #[serde(default)]
    pub reference: ReactionReference,
    /// log K = A0 + A1·T + A2/T + A3·ln T + A4/T² + A5·T² + A6/√T
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub logk_coefficients: Vec<f64>,
    /// ΔV = V0 + V1·(T − Tr) + V2·(T − Tr)² [m³/mol]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volume_coefficients: Vec<f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, Vec<f64>>,
}

impl Reaction {
    pub fn new(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        Self {
            name: symbol.clone(),
            symbol,
            reference_t: REFERENCE_T,
            reference_p: REFERENCE_P,
            ..Default::default()
        }
    }

    /// Stoichiometric coefficient of a substance, if it takes part.
    pub fn coefficient(&self, substance: &str) -> Option<f64> {
        self.reactants.get(substance).copied()
    }

    pub fn parameter(&self, key: &str) -> Option<&[f64]> {
        self.parameters.get(key).map(Vec::as_slice)
    }
}

/// A chemical element record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Element {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    /// Atomic mass [g/mol]
    #[serde(default)]
    pub atomic_mass: f64,
    /// Standard entropy per atom of the element in its reference state [J/(mol·K)]
    #[serde(default)]
    pub entropy: f64,
    #[serde(default)]
    pub valence: i32,
}

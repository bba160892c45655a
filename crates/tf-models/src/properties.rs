//! Property sets produced by the models.
//!
//! Molar SI units throughout: J/mol, J/(mol·K), m³/mol. Solvent bulk
//! properties are in kg/m³ with derivatives per K and per Pa.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tf_core::constants::{LN_TO_LG, R_CONSTANT};

/// Provenance of a computed value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Calculated,
    Assigned,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub status: Status,
    pub message: String,
}

/// Field name → provenance note.
pub type Annotations = BTreeMap<String, Annotation>;

macro_rules! property_set {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$fmeta:meta])* $field:ident, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            $( $(#[$fmeta])* #[serde(default)] pub $field: f64, )+
            #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
            pub annotations: Annotations,
        }

        impl $name {
            pub const FIELDS: &'static [&'static str] = &[ $( stringify!($field), )+ ];

            /// `self += factor × other`, field by field.
            pub fn add_scaled(&mut self, other: &Self, factor: f64) {
                $( self.$field += other.$field * factor; )+
            }

            pub fn scale(&mut self, factor: f64) {
                $( self.$field *= factor; )+
            }

            pub fn is_finite(&self) -> bool {
                true $( && self.$field.is_finite() )+
            }

            /// `(name, value)` for every numeric field, in declaration order.
            pub fn values(&self) -> Vec<(&'static str, f64)> {
                vec![ $( (stringify!($field), self.$field), )+ ]
            }

            /// Attach a provenance note to a field; repeated notes are joined with `; `.
            pub fn annotate(&mut self, field: &str, status: Status, message: impl AsRef<str>) {
                let entry = self.annotations.entry(field.to_string()).or_default();
                entry.status = status;
                if !entry.message.is_empty() {
                    entry.message.push_str("; ");
                }
                entry.message.push_str(message.as_ref());
            }

            pub fn annotation(&self, field: &str) -> Option<&Annotation> {
                self.annotations.get(field)
            }
        }
    };
}

property_set! {
    /// Standard molar thermodynamic properties of a substance at (T, P).
    pub struct ThermoPropertiesSubstance {
        /// Apparent molar Gibbs energy [J/mol]
        gibbs_energy,
        /// Apparent molar enthalpy [J/mol]
        enthalpy,
        /// Molar entropy [J/(mol·K)]
        entropy,
        /// Isobaric heat capacity [J/(mol·K)]
        heat_capacity_cp,
        /// Isochoric heat capacity [J/(mol·K)]
        heat_capacity_cv,
        /// Molar volume [m³/mol]
        volume,
        /// Apparent molar Helmholtz energy [J/mol]
        helmholtz_energy,
        /// Apparent molar internal energy [J/mol]
        internal_energy,
    }
}

property_set! {
    /// Standard molar properties of a reaction at (T, P).
    pub struct ThermoPropertiesReaction {
        gibbs_energy,
        enthalpy,
        entropy,
        heat_capacity_cp,
        heat_capacity_cv,
        volume,
        helmholtz_energy,
        internal_energy,
        /// Natural logarithm of the equilibrium constant
        ln_equilibrium_constant,
        /// Decimal logarithm of the equilibrium constant
        log_equilibrium_constant,
    }
}

impl ThermoPropertiesSubstance {
    /// Recompute A = G − PV and U = H − PV at pressure `p` [Pa].
    pub fn update_pv_terms(&mut self, p: f64) {
        self.helmholtz_energy = self.gibbs_energy - p * self.volume;
        self.internal_energy = self.enthalpy - p * self.volume;
    }
}

impl ThermoPropertiesReaction {
    pub fn update_pv_terms(&mut self, p: f64) {
        self.helmholtz_energy = self.gibbs_energy - p * self.volume;
        self.internal_energy = self.enthalpy - p * self.volume;
    }

    /// Recompute ln K and log K from the reaction Gibbs energy at `t` [K].
    pub fn sync_equilibrium_constant(&mut self, t: f64) {
        self.ln_equilibrium_constant = -self.gibbs_energy / (R_CONSTANT * t);
        self.log_equilibrium_constant = self.ln_equilibrium_constant * LN_TO_LG;
    }
}

impl From<&ThermoPropertiesReaction> for ThermoPropertiesSubstance {
    fn from(r: &ThermoPropertiesReaction) -> Self {
        Self {
            gibbs_energy: r.gibbs_energy,
            enthalpy: r.enthalpy,
            entropy: r.entropy,
            heat_capacity_cp: r.heat_capacity_cp,
            heat_capacity_cv: r.heat_capacity_cv,
            volume: r.volume,
            helmholtz_energy: r.helmholtz_energy,
            internal_energy: r.internal_energy,
            annotations: r.annotations.clone(),
        }
    }
}

/// Bulk properties of the solvent at (T, P).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertiesSolvent {
    /// Density [kg/m³]
    pub density: f64,
    /// ∂ρ/∂T [kg/(m³·K)]
    pub density_t: f64,
    /// ∂ρ/∂P [kg/(m³·Pa)]
    pub density_p: f64,
    pub density_tt: f64,
    pub density_tp: f64,
    pub density_pp: f64,
    /// Isobaric expansivity [1/K]
    pub alpha: f64,
    /// Isothermal compressibility [1/Pa]
    pub beta: f64,
    pub alpha_t: f64,
    pub alpha_p: f64,
    pub beta_t: f64,
    pub beta_p: f64,
}

/// Dielectric properties of the solvent and the Born functions derived from them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectroPropertiesSolvent {
    /// Relative permittivity
    pub epsilon: f64,
    /// ∂ε/∂T [1/K]
    pub epsilon_t: f64,
    /// ∂ε/∂P [1/Pa]
    pub epsilon_p: f64,
    pub epsilon_tt: f64,
    pub epsilon_tp: f64,
    pub epsilon_pp: f64,
    /// Born function Z = −1/ε
    pub born_z: f64,
    /// Born function Y = ∂Z/∂T [1/K]
    pub born_y: f64,
    /// Born function Q = ∂Z/∂P [1/Pa]
    pub born_q: f64,
    /// Born function X = ∂Y/∂T [1/K²]
    pub born_x: f64,
    /// Born function U = ∂Q/∂T [1/(Pa·K)]
    pub born_u: f64,
    /// Born function N = ∂Q/∂P [1/Pa²]
    pub born_n: f64,
}

impl ElectroPropertiesSolvent {
    /// Fill the Born functions from ε and its derivatives.
    pub fn with_born_functions(mut self) -> Self {
        let e = self.epsilon;
        let e2 = e * e;
        self.born_z = -1.0 / e;
        self.born_y = self.epsilon_t / e2;
        self.born_q = self.epsilon_p / e2;
        self.born_x = (self.epsilon_tt - 2.0 * self.epsilon_t * self.epsilon_t / e) / e2;
        self.born_u = (self.epsilon_tp - 2.0 * self.epsilon_t * self.epsilon_p / e) / e2;
        self.born_n = (self.epsilon_pp - 2.0 * self.epsilon_p * self.epsilon_p / e) / e2;
        self
    }
}

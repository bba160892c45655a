//! Result data types.

use serde::{Deserialize, Serialize};
use tf_models::ThermoPropertiesSubstance;

/// One exported state point: the columns of the CSV table, in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyRow {
    /// Temperature [K]
    pub temperature: f64,
    /// Pressure [Pa]
    pub pressure: f64,
    pub heat_capacity_cp: f64,
    pub heat_capacity_cv: f64,
    /// Density [kg/m³]; zero when not applicable
    pub density: f64,
    pub enthalpy: f64,
    pub entropy: f64,
    pub gibbs_energy: f64,
    pub helmholtz_energy: f64,
    pub internal_energy: f64,
    pub volume: f64,
}

impl PropertyRow {
    pub const COLUMNS: usize = 11;

    pub fn from_properties(t: f64, p: f64, tps: &ThermoPropertiesSubstance, density: f64) -> Self {
        Self {
            temperature: t,
            pressure: p,
            heat_capacity_cp: tps.heat_capacity_cp,
            heat_capacity_cv: tps.heat_capacity_cv,
            density,
            enthalpy: tps.enthalpy,
            entropy: tps.entropy,
            gibbs_energy: tps.gibbs_energy,
            helmholtz_energy: tps.helmholtz_energy,
            internal_energy: tps.internal_energy,
            volume: tps.volume,
        }
    }

    pub fn values(&self) -> [f64; Self::COLUMNS] {
        [
            self.temperature,
            self.pressure,
            self.heat_capacity_cp,
            self.heat_capacity_cv,
            self.density,
            self.enthalpy,
            self.entropy,
            self.gibbs_energy,
            self.helmholtz_energy,
            self.internal_energy,
            self.volume,
        ]
    }

    pub fn from_values(v: [f64; Self::COLUMNS]) -> Self {
        let [
            temperature,
            pressure,
            heat_capacity_cp,
            heat_capacity_cv,
            density,
            enthalpy,
            entropy,
            gibbs_energy,
            helmholtz_energy,
            internal_energy,
            volume,
        ] = v;
        Self {
            temperature,
            pressure,
            heat_capacity_cp,
            heat_capacity_cv,
            density,
            enthalpy,
            entropy,
            gibbs_energy,
            helmholtz_energy,
            internal_energy,
            volume,
        }
    }
}

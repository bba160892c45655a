//! Pressure corrections for condensed phases and ideal gases.

use crate::error::ModelResult;
use crate::model::validation::{validate_pressure, validate_substance, validate_temperature};
use crate::model::{SolventInputs, SubstanceCorrection};
use crate::properties::ThermoPropertiesSubstance;
use tf_core::constants::R_CONSTANT;
use tf_db::Substance;

/// Molar volume independent of T and P (`CPM_CON`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantMolarVolume;

impl SubstanceCorrection for ConstantMolarVolume {
    fn name(&self) -> &str {
        "Constant molar volume"
    }

    fn correct(
        &self,
        _t: f64,
        p: f64,
        substance: &Substance,
        mut tps: ThermoPropertiesSubstance,
        _solvent: &SolventInputs,
    ) -> ModelResult<ThermoPropertiesSubstance> {
        let p = validate_pressure(p)?;
        let v0 = substance.reference.volume;
        let vp = v0 * (p - substance.reference_p);

        tps.volume = v0;
        tps.gibbs_energy += vp;
        tps.enthalpy += vp;
        tps.update_pv_terms(p);
        Ok(tps)
    }
}

/// Molar volume from the ideal gas law (`CPM_OFF`).
#[derive(Debug, Clone, Copy, Default)]
pub struct IdealGasVolume;

impl SubstanceCorrection for IdealGasVolume {
    fn name(&self) -> &str {
        "Ideal gas law volume"
    }

    fn correct(
        &self,
        t: f64,
        p: f64,
        substance: &Substance,
        mut tps: ThermoPropertiesSubstance,
        _solvent: &SolventInputs,
    ) -> ModelResult<ThermoPropertiesSubstance> {
        let t = validate_temperature(t)?;
        let p = validate_pressure(p)?;
        let ln_p = (p / substance.reference_p).ln();

        tps.volume = R_CONSTANT * t / p;
        tps.gibbs_energy += R_CONSTANT * t * ln_p;
        tps.entropy -= R_CONSTANT * ln_p;
        tps.update_pv_terms(p);
        validate_substance(&tps)?;
        Ok(tps)
    }
}

/// Berman (1988) molar volume polynomial for minerals (`CPM_VBE`).
///
/// V = V0·[1 + v1·ΔP + v2·ΔP² + v3·ΔT + v4·ΔT²] with `volume_coefficients`
/// `[v1, v2, v3, v4]` in 1/Pa, 1/Pa², 1/K, 1/K². Missing coefficients are zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Berman88Volume;

impl SubstanceCorrection for Berman88Volume {
    fn name(&self) -> &str {
        "Berman 1988 molar volume"
    }

    fn correct(
        &self,
        t: f64,
        p: f64,
        substance: &Substance,
        mut tps: ThermoPropertiesSubstance,
        _solvent: &SolventInputs,
    ) -> ModelResult<ThermoPropertiesSubstance> {
        let t = validate_temperature(t)?;
        let p = validate_pressure(p)?;
        let v = |i: usize| substance.volume_coefficients.get(i).copied().unwrap_or(0.0);
        let (v1, v2, v3, v4) = (v(0), v(1), v(2), v(3));
        let v0 = substance.reference.volume;
        let dp = p - substance.reference_p;
        let dt = t - substance.reference_t;

        let thermal = 1.0 + v3 * dt + v4 * dt * dt;
        let g_corr = v0 * (thermal * dp + 0.5 * v1 * dp * dp + v2 * dp.powi(3) / 3.0);
        let s_corr = -v0 * (v3 + 2.0 * v4 * dt) * dp;

        tps.volume = v0 * (thermal + v1 * dp + v2 * dp * dp);
        tps.gibbs_energy += g_corr;
        tps.entropy += s_corr;
        tps.enthalpy += g_corr + t * s_corr;
        tps.update_pv_terms(p);
        validate_substance(&tps)?;
        Ok(tps)
    }
}

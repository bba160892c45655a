//! Reaction properties from log K as a function of temperature.
//!
//! log K = A0 + A1·T + A2/T + A3·ln T + A4/T² + A5·T² + A6/√T
//!
//! The polynomial codes (`CTM_LGX`, `CTM_LGK`) read A0..A6 from
//! `logk_coefficients`; the extrapolation codes (`CTM_EK0`..`CTM_EK3`) derive
//! them from the reaction's reference properties.

use crate::error::{ModelError, ModelResult};
use crate::model::validation::{validate_reaction, validate_temperature};
use crate::model::{ReactionTemperatureModel, SolventInputs};
use crate::properties::ThermoPropertiesReaction;
use std::f64::consts::LN_10;
use tf_core::constants::R_CONSTANT;
use tf_db::Reaction;

/// How the log K coefficients of a reaction are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKForm {
    /// Coefficients given on the record
    Polynomial,
    /// ΔrS = 0: log K = A2/T
    ZeroEntropy,
    /// log K = A0
    ConstantLogK,
    /// Constant ΔrH: log K = A0 + A2/T
    ConstantEnthalpy,
    /// Constant ΔrCp: log K = A0 + A2/T + A3·ln T
    ConstantHeatCapacity,
}

#[derive(Debug, Clone, Copy)]
pub struct LogKFunctionOfT {
    form: LogKForm,
}

impl LogKFunctionOfT {
    pub fn new(form: LogKForm) -> Self {
        Self { form }
    }

    /// A0..A6 for a reaction.
    pub fn coefficients(&self, reaction: &Reaction) -> ModelResult<[f64; 7]> {
        let mut a = [0.0; 7];
        let rln10 = R_CONSTANT * LN_10;
        let t0 = reaction.reference_t;
        let r = &reaction.reference;

        match self.form {
            LogKForm::Polynomial => {
                if reaction.logk_coefficients.is_empty() {
                    return Err(ModelError::MissingParameter {
                        what: "logk_coefficients",
                        symbol: reaction.symbol.clone(),
                    });
                }
                for (slot, value) in a.iter_mut().zip(&reaction.logk_coefficients) {
                    *slot = *value;
                }
            }
            LogKForm::ConstantLogK => {
                a[0] = reference_log_k(reaction);
            }
            LogKForm::ZeroEntropy => {
                a[2] = reference_log_k(reaction) * t0;
            }
            LogKForm::ConstantEnthalpy => {
                a[2] = -r.enthalpy / rln10;
                a[0] = reference_log_k(reaction) - a[2] / t0;
            }
            LogKForm::ConstantHeatCapacity => {
                a[3] = r.heat_capacity_cp / rln10;
                a[2] = -(r.enthalpy - r.heat_capacity_cp * t0) / rln10;
                a[0] = reference_log_k(reaction) - a[2] / t0 - a[3] * t0.ln();
            }
        }
        Ok(a)
    }
}

/// log K at the reference temperature; taken from ΔrG° when log K is not given.
fn reference_log_k(reaction: &Reaction) -> f64 {
    let r = &reaction.reference;
    if r.log_k == 0.0 && r.gibbs_energy != 0.0 {
        -r.gibbs_energy / (R_CONSTANT * reaction.reference_t * LN_10)
    } else {
        r.log_k
    }
}

impl ReactionTemperatureModel for LogKFunctionOfT {
    fn name(&self) -> &str {
        match self.form {
            LogKForm::Polynomial => "log K = f(T)",
            LogKForm::ZeroEntropy => "log K extrapolation, zero entropy",
            LogKForm::ConstantLogK => "log K extrapolation, constant log K",
            LogKForm::ConstantEnthalpy => "log K extrapolation, constant enthalpy",
            LogKForm::ConstantHeatCapacity => "log K extrapolation, constant heat capacity",
        }
    }

    fn properties(
        &self,
        t: f64,
        p: f64,
        reaction: &Reaction,
        _solvent: &SolventInputs,
    ) -> ModelResult<ThermoPropertiesReaction> {
        let t = validate_temperature(t)?;
        let [a0, a1, a2, a3, a4, a5, a6] = self.coefficients(reaction)?;
        let rln10 = R_CONSTANT * LN_10;
        let sqrt_t = t.sqrt();

        let log_k = a0 + a1 * t + a2 / t + a3 * t.ln() + a4 / (t * t) + a5 * t * t + a6 / sqrt_t;
        let gibbs = -rln10 * t * log_k;
        let enthalpy = rln10
            * (a1 * t * t - a2 + a3 * t - 2.0 * a4 / t + 2.0 * a5 * t.powi(3) - 0.5 * a6 * sqrt_t);
        let heat_capacity = rln10
            * (2.0 * a1 * t + a3 + 2.0 * a4 / (t * t) + 6.0 * a5 * t * t - 0.25 * a6 / sqrt_t);

        let mut tpr = ThermoPropertiesReaction {
            gibbs_energy: gibbs,
            enthalpy,
            entropy: (enthalpy - gibbs) / t,
            heat_capacity_cp: heat_capacity,
            heat_capacity_cv: heat_capacity,
            volume: reaction.reference.volume,
            log_equilibrium_constant: log_k,
            ln_equilibrium_constant: log_k * LN_10,
            ..Default::default()
        };
        tpr.update_pv_terms(p);

        validate_reaction(&tpr)?;
        Ok(tpr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tf_db::ReactionReference;

    fn reaction() -> Reaction {
        let mut r = Reaction::new("CO2aq");
        r.reference = ReactionReference {
            log_k: -1.47,
            gibbs_energy: 8_391.0,
            enthalpy: -19_750.0,
            entropy: -94.4,
            heat_capacity_cp: 205.0,
            volume: 0.0,
        };
        r
    }

    fn eval(form: LogKForm, r: &Reaction, t: f64) -> ThermoPropertiesReaction {
        LogKFunctionOfT::new(form)
            .properties(t, 1e5, r, &SolventInputs::none(t, 1e5))
            .unwrap()
    }

    #[test]
    fn extrapolations_reproduce_reference_log_k() {
        let r = reaction();
        for form in [
            LogKForm::ZeroEntropy,
            LogKForm::ConstantLogK,
            LogKForm::ConstantEnthalpy,
            LogKForm::ConstantHeatCapacity,
        ] {
            let tpr = eval(form, &r, r.reference_t);
            assert!(
                (tpr.log_equilibrium_constant - r.reference.log_k).abs() < 1e-10,
                "{form:?}"
            );
        }
    }

    #[test]
    fn constant_enthalpy_keeps_enthalpy() {
        let r = reaction();
        let tpr = eval(LogKForm::ConstantEnthalpy, &r, 400.0);
        assert!((tpr.enthalpy - r.reference.enthalpy).abs() < 1e-6);
        assert!(tpr.heat_capacity_cp.abs() < 1e-12);
    }

    #[test]
    fn constant_heat_capacity_keeps_cp() {
        let r = reaction();
        let tpr = eval(LogKForm::ConstantHeatCapacity, &r, 450.0);
        assert!((tpr.heat_capacity_cp - 205.0).abs() < 1e-9);
        let at_ref = eval(LogKForm::ConstantHeatCapacity, &r, r.reference_t);
        assert!((at_ref.enthalpy - r.reference.enthalpy).abs() < 1e-6);
    }

    #[test]
    fn gibbs_energy_consistent_with_log_k() {
        let mut r = reaction();
        r.logk_coefficients = vec![-10.0, 0.01, 2000.0, 0.0, -1.0e5];
        let t = 350.0;
        let tpr = eval(LogKForm::Polynomial, &r, t);
        let expected = -R_CONSTANT * t * tpr.ln_equilibrium_constant;
        assert!((tpr.gibbs_energy - expected).abs() < 1e-6);
        assert!((tpr.entropy - (tpr.enthalpy - tpr.gibbs_energy) / t).abs() < 1e-9);
    }

    #[test]
    fn enthalpy_is_van_t_hoff_derivative() {
        let mut r = reaction();
        r.logk_coefficients = vec![-10.0, 0.01, 2000.0, 1.5, -1.0e5, 1e-6, 3.0];
        let t = 400.0;
        let h = 1e-3;
        let lnk = |t: f64| eval(LogKForm::Polynomial, &r, t).ln_equilibrium_constant;
        let dlnk = (lnk(t + h) - lnk(t - h)) / (2.0 * h);
        let tpr = eval(LogKForm::Polynomial, &r, t);
        assert!((tpr.enthalpy - R_CONSTANT * t * t * dlnk).abs() < 1e-3 * tpr.enthalpy.abs().max(1.0));
    }

    #[test]
    fn polynomial_without_coefficients_is_missing_parameter() {
        let r = reaction();
        let err = LogKFunctionOfT::new(LogKForm::Polynomial)
            .properties(300.0, 1e5, &r, &SolventInputs::none(300.0, 1e5))
            .unwrap_err();
        assert!(matches!(err, ModelError::MissingParameter { .. }));
    }

    #[test]
    fn log_k_falls_back_to_gibbs_energy() {
        let mut r = reaction();
        r.reference.log_k = 0.0;
        let tpr = eval(LogKForm::ConstantLogK, &r, 298.15);
        assert!((tpr.gibbs_energy - 8_391.0).abs() < 1e-6);
    }
}

//! Empirical heat capacity integration (`CTPM_CPT`).
//!
//! Cp(T) = a0 + a1·T + a2/T² + a3/√T + a4·T², integrated from the record's
//! reference temperature. A record without coefficients is taken to have a
//! constant Cp equal to its reference Cp.

use crate::error::ModelResult;
use crate::model::validation::{validate_substance, validate_temperature};
use crate::model::{SolventInputs, SubstanceEos};
use crate::properties::ThermoPropertiesSubstance;
use tf_db::Substance;

#[derive(Debug, Clone, Copy, Default)]
pub struct CpIntegration;

/// Heat capacity polynomial with its two integrals between Tr and T.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CpPolynomial {
    a: [f64; 5],
}

impl CpPolynomial {
    pub(crate) fn from_substance(substance: &Substance) -> Self {
        let mut a = [0.0; 5];
        if substance.cp_coefficients.is_empty() {
            a[0] = substance.reference.heat_capacity_cp;
        } else {
            for (slot, value) in a.iter_mut().zip(&substance.cp_coefficients) {
                *slot = *value;
            }
        }
        Self { a }
    }

    pub(crate) fn cp(&self, t: f64) -> f64 {
        let [a0, a1, a2, a3, a4] = self.a;
        a0 + a1 * t + a2 / (t * t) + a3 / t.sqrt() + a4 * t * t
    }

    /// ∫ Cp dT from `tr` to `t`.
    pub(crate) fn integral_cp(&self, tr: f64, t: f64) -> f64 {
        let [a0, a1, a2, a3, a4] = self.a;
        a0 * (t - tr) + 0.5 * a1 * (t * t - tr * tr) - a2 * (1.0 / t - 1.0 / tr)
            + 2.0 * a3 * (t.sqrt() - tr.sqrt())
            + a4 / 3.0 * (t.powi(3) - tr.powi(3))
    }

    /// ∫ Cp/T dT from `tr` to `t`.
    pub(crate) fn integral_cp_over_t(&self, tr: f64, t: f64) -> f64 {
        let [a0, a1, a2, a3, a4] = self.a;
        a0 * (t / tr).ln() + a1 * (t - tr) - 0.5 * a2 * (1.0 / (t * t) - 1.0 / (tr * tr))
            - 2.0 * a3 * (1.0 / t.sqrt() - 1.0 / tr.sqrt())
            + 0.5 * a4 * (t * t - tr * tr)
    }
}

impl SubstanceEos for CpIntegration {
    fn name(&self) -> &str {
        "Empirical Cp integration"
    }

    fn properties(
        &self,
        t: f64,
        p: f64,
        substance: &Substance,
        _solvent: &SolventInputs,
    ) -> ModelResult<ThermoPropertiesSubstance> {
        let t = validate_temperature(t)?;
        let tr = validate_temperature(substance.reference_t)?;
        let r = &substance.reference;
        let poly = CpPolynomial::from_substance(substance);

        let int_cp = poly.integral_cp(tr, t);
        let int_cp_t = poly.integral_cp_over_t(tr, t);

        let mut tps = ThermoPropertiesSubstance {
            heat_capacity_cp: poly.cp(t),
            enthalpy: r.enthalpy + int_cp,
            entropy: r.entropy + int_cp_t,
            gibbs_energy: r.gibbs_energy - r.entropy * (t - tr) + int_cp - t * int_cp_t,
            volume: r.volume,
            ..Default::default()
        };
        tps.heat_capacity_cv = tps.heat_capacity_cp;
        tps.update_pv_terms(p);

        validate_substance(&tps)?;
        Ok(tps)
    }
}

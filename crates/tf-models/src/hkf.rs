//! Revised HKF equation of state for aqueous solutes (`CTPM_HKF`, `CTPM_HKFR`).
//!
//! Tanger & Helgeson (1988) formulation with a constant Born coefficient ω
//! (no g-function). Coefficients are read from `hkf_coefficients` as
//! `[a1, a2, a3, a4, c1, c2, ω]`, unscaled, in calorie/bar units:
//! a1 cal/(mol·bar), a2 cal/mol, a3 cal·K/(mol·bar), a4 cal·K/mol,
//! c1 cal/(mol·K), c2 cal·K/mol, ω cal/mol.
//!
//! Born functions come from the solvent at (T, P) and at the solvent's
//! reference state; that reference snapshot also supplies (Tr, Pr).

use crate::error::ModelResult;
use crate::model::validation::{
    require_coefficients, validate_pressure, validate_substance, validate_temperature,
};
use crate::model::{SolventInputs, SolventNeeds, SubstanceEos};
use crate::properties::ThermoPropertiesSubstance;
use tf_core::constants::{CAL_TO_J, PA_PER_BAR};
use tf_db::Substance;

/// Singular temperature of the solvent [K]
const THETA: f64 = 228.0;
/// Solvent pressure parameter [bar]
const PSI: f64 = 2600.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct HkfSolute;

impl SubstanceEos for HkfSolute {
    fn name(&self) -> &str {
        "HKF solute"
    }

    fn solvent_needs(&self, _substance: &Substance) -> SolventNeeds {
        SolventNeeds {
            electro: true,
            reference_state: true,
            ..SolventNeeds::NONE
        }
    }

    fn properties(
        &self,
        t: f64,
        p: f64,
        substance: &Substance,
        solvent: &SolventInputs,
    ) -> ModelResult<ThermoPropertiesSubstance> {
        let t = validate_temperature(t)?;
        let p_pa = validate_pressure(p)?;
        let coeffs = require_coefficients(
            &substance.hkf_coefficients,
            7,
            "hkf_coefficients",
            &substance.symbol,
        )?;
        let [a1, a2, a3, a4, c1, c2, w] = [
            coeffs[0], coeffs[1], coeffs[2], coeffs[3], coeffs[4], coeffs[5], coeffs[6],
        ];

        let eps = solvent.current.electro()?;
        let reference = solvent.reference()?;
        let eps_r = reference.electro()?;

        // reference terms and Born functions at the same (Tr, Pr)
        let tr = validate_temperature(reference.t)?;
        let pr = validate_pressure(reference.p)? / PA_PER_BAR;
        let pb = p_pa / PA_PER_BAR;

        let (z, y, x) = (eps.born_z, eps.born_y, eps.born_x);
        // Q is stored per Pa
        let q = eps.born_q * PA_PER_BAR;
        let (zr, yr) = (eps_r.born_z, eps_r.born_y);

        let gr = substance.reference.gibbs_energy / CAL_TO_J;
        let hr = substance.reference.enthalpy / CAL_TO_J;
        let sr = substance.reference.entropy / CAL_TO_J;

        let ln_psi = ((PSI + pb) / (PSI + pr)).ln();
        let pressure_term = a3 * (pb - pr) + a4 * ln_psi;
        let t_th = t - THETA;
        let tr_th = tr - THETA;

        let volume =
            a1 + a2 / (PSI + pb) + (a3 + a4 / (PSI + pb)) / t_th - w * q;

        let heat_capacity =
            c1 + c2 / (t_th * t_th) - 2.0 * t / t_th.powi(3) * pressure_term + w * t * x;

        let entropy = sr + c1 * (t / tr).ln()
            - c2 / THETA
                * (1.0 / t_th - 1.0 / tr_th + (1.0 / THETA) * ((tr * t_th) / (t * tr_th)).ln())
            + pressure_term / (t_th * t_th)
            + w * (y - yr);

        let enthalpy = hr + c1 * (t - tr) - c2 * (1.0 / t_th - 1.0 / tr_th)
            + a1 * (pb - pr)
            + a2 * ln_psi
            + (2.0 * t - THETA) / (t_th * t_th) * pressure_term
            - w * (z + 1.0)
            + w * t * y
            + w * (zr + 1.0)
            - w * tr * yr;

        let gibbs = gr - sr * (t - tr) - c1 * (t * (t / tr).ln() - t + tr)
            + a1 * (pb - pr)
            + a2 * ln_psi
            - c2 * ((1.0 / t_th - 1.0 / tr_th) * ((THETA - t) / THETA)
                - t / (THETA * THETA) * ((tr * t_th) / (t * tr_th)).ln())
            + pressure_term / t_th
            - w * (z + 1.0)
            + w * (zr + 1.0)
            + w * yr * (t - tr);

        let mut tps = ThermoPropertiesSubstance {
            gibbs_energy: gibbs * CAL_TO_J,
            enthalpy: enthalpy * CAL_TO_J,
            entropy: entropy * CAL_TO_J,
            heat_capacity_cp: heat_capacity * CAL_TO_J,
            // cal/bar → m³
            volume: volume * CAL_TO_J / PA_PER_BAR,
            ..Default::default()
        };
        tps.heat_capacity_cv = tps.heat_capacity_cp;
        tps.update_pv_terms(p_pa);

        validate_substance(&tps)?;
        Ok(tps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use crate::model::SolventSnapshot;
    use crate::properties::ElectroPropertiesSolvent;
    use tf_db::ReferenceProperties;

    fn electro(epsilon: f64, epsilon_t: f64) -> ElectroPropertiesSolvent {
        ElectroPropertiesSolvent {
            epsilon,
            epsilon_t,
            epsilon_p: 3.7e-9,
            epsilon_tt: 1.3e-3,
            ..Default::default()
        }
        .with_born_functions()
    }

    fn sodium() -> Substance {
        let mut s = Substance::new("Na+");
        s.formula = "Na+".into();
        s.charge = 1.0;
        s.reference = ReferenceProperties {
            gibbs_energy: -261_881.0,
            enthalpy: -240_300.0,
            entropy: 58.41,
            heat_capacity_cp: 38.1,
            volume: -1.11e-6,
        };
        s.hkf_coefficients = vec![0.1839, -228.5, 3.256, -27_260.0, 18.18, -29_810.0, 33_060.0];
        s
    }

    fn inputs(t: f64, p: f64, current: ElectroPropertiesSolvent) -> SolventInputs {
        SolventInputs {
            current: SolventSnapshot {
                t,
                p,
                electro: Some(current),
                ..Default::default()
            },
            reference: Some(SolventSnapshot {
                t: 298.15,
                p: 1e5,
                electro: Some(electro(78.24, -0.3589)),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn reference_state_reproduces_reference_values() {
        let s = sodium();
        let model = HkfSolute;
        let tps = model
            .properties(298.15, 1e5, &s, &inputs(298.15, 1e5, electro(78.24, -0.3589)))
            .unwrap();
        assert!((tps.gibbs_energy - s.reference.gibbs_energy).abs() < 1e-6);
        assert!((tps.enthalpy - s.reference.enthalpy).abs() < 1e-6);
        assert!((tps.entropy - s.reference.entropy).abs() < 1e-9);
    }

    #[test]
    fn reference_state_comes_from_the_solvent_snapshot() {
        // record reference differs from the solvent's; the solvent's wins
        let mut s = sodium();
        s.reference_t = 273.15;
        s.reference_p = 5e5;
        let at_ref = electro(78.24, -0.3589);
        let tps = HkfSolute
            .properties(298.15, 1e5, &s, &inputs(298.15, 1e5, at_ref))
            .unwrap();
        assert!((tps.gibbs_energy - s.reference.gibbs_energy).abs() < 1e-6);
        assert!((tps.enthalpy - s.reference.enthalpy).abs() < 1e-6);
        assert!((tps.entropy - s.reference.entropy).abs() < 1e-9);
    }

    #[test]
    fn declares_electro_needs_at_both_states() {
        let needs = HkfSolute.solvent_needs(&sodium());
        assert!(needs.electro && needs.reference_state);
        assert!(!needs.properties);
    }

    #[test]
    fn missing_reference_state_is_reported() {
        let s = sodium();
        let mut solvent = inputs(298.15, 1e5, electro(78.24, -0.3589));
        solvent.reference = None;
        let err = HkfSolute
            .properties(298.15, 1e5, &s, &solvent)
            .unwrap_err();
        assert!(matches!(err, ModelError::MissingInput { .. }));
    }

    #[test]
    fn short_coefficients_are_reported() {
        let mut s = sodium();
        s.hkf_coefficients.truncate(3);
        let err = HkfSolute
            .properties(298.15, 1e5, &s, &inputs(298.15, 1e5, electro(78.24, -0.3589)))
            .unwrap_err();
        assert!(matches!(err, ModelError::MissingParameter { .. }));
    }

    #[test]
    fn entropy_is_minus_dg_dt_at_fixed_born_functions() {
        // With ε held fixed, Y = 0 contributes nothing and S must equal −∂G/∂T.
        let s = sodium();
        let model = HkfSolute;
        let fixed = ElectroPropertiesSolvent {
            epsilon: 60.0,
            ..Default::default()
        }
        .with_born_functions();
        let mut solvent = inputs(350.0, 5e6, fixed);
        solvent.reference = Some(SolventSnapshot {
            t: 298.15,
            p: 1e5,
            electro: Some(fixed),
            ..Default::default()
        });
        let g = |t: f64| model.properties(t, 5e6, &s, &solvent).unwrap().gibbs_energy;
        let h = 1e-3;
        let dg = (g(350.0 + h) - g(350.0 - h)) / (2.0 * h);
        let tps = model.properties(350.0, 5e6, &s, &solvent).unwrap();
        assert!((tps.entropy + dg).abs() < 1e-3);
    }
}

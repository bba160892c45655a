//! Johnson & Norton (1991) dielectric constant of water (`CTPM_WJNR`, `CTPM_WJNG`).
//!
//! ε = Σ k_i(T̂)·ρ̂^i for i = 0..4, with T̂ = T / 298.15 K and ρ̂ in g/cm³.
//! Derivatives follow by the chain rule from the density derivatives of the
//! solvent bulk properties; the Born functions are derived from ε.

use crate::error::ModelResult;
use crate::model::SolventElectroModel;
use crate::model::validation::{validate_density, validate_temperature};
use crate::properties::{ElectroPropertiesSolvent, PropertiesSolvent};
use tf_db::Substance;

const T_REF: f64 = 298.15;

const A: [f64; 10] = [
    14.703_335_93,
    212.846_273_3,
    -115.444_517_3,
    19.552_109_15,
    -83.303_479_80,
    32.132_400_48,
    -6.694_098_645,
    -37.862_020_45,
    68.873_596_46,
    -27.294_016_52,
];

/// kg/m³ → g/cm³
const DENSITY_SCALE: f64 = 1.0e-3;

#[derive(Debug, Clone, Copy, Default)]
pub struct JohnsonNorton;

/// k_i(T̂) and its first and second derivatives with respect to T̂.
fn k_functions(t: f64) -> ([f64; 5], [f64; 5], [f64; 5]) {
    let [a1, a2, a3, a4, a5, a6, a7, a8, a9, a10] = A;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let k = [
        1.0,
        a1 / t,
        a2 / t + a3 + a4 * t,
        a5 / t + a6 * t + a7 * t2,
        a8 / t2 + a9 / t + a10,
    ];
    let k_t = [
        0.0,
        -a1 / t2,
        -a2 / t2 + a4,
        -a5 / t2 + a6 + 2.0 * a7 * t,
        -2.0 * a8 / t3 - a9 / t2,
    ];
    let k_tt = [
        0.0,
        2.0 * a1 / t3,
        2.0 * a2 / t3,
        2.0 * a5 / t3 + 2.0 * a7,
        6.0 * a8 / t4 + 2.0 * a9 / t3,
    ];
    (k, k_t, k_tt)
}

impl SolventElectroModel for JohnsonNorton {
    fn name(&self) -> &str {
        "Johnson-Norton 1991"
    }

    fn electro_properties(
        &self,
        t: f64,
        _p: f64,
        _substance: &Substance,
        ps: &PropertiesSolvent,
    ) -> ModelResult<ElectroPropertiesSolvent> {
        let t = validate_temperature(t)?;
        let rho = validate_density(ps.density)? * DENSITY_SCALE;
        let rho_t = ps.density_t * DENSITY_SCALE;
        let rho_p = ps.density_p * DENSITY_SCALE;
        let rho_tt = ps.density_tt * DENSITY_SCALE;
        let rho_tp = ps.density_tp * DENSITY_SCALE;
        let rho_pp = ps.density_pp * DENSITY_SCALE;

        let (k, k_that, k_tthat) = k_functions(t / T_REF);

        let mut e = ElectroPropertiesSolvent::default();
        for i in 0..5 {
            let n = i as f64;
            // d/dT of k_i(T/T_REF)
            let k_t = k_that[i] / T_REF;
            let k_tt = k_tthat[i] / (T_REF * T_REF);

            let r = rho.powi(i as i32);
            let r1 = if i >= 1 { n * rho.powi(i as i32 - 1) } else { 0.0 };
            let r2 = if i >= 2 {
                n * (n - 1.0) * rho.powi(i as i32 - 2)
            } else {
                0.0
            };

            e.epsilon += k[i] * r;
            e.epsilon_t += k_t * r + k[i] * r1 * rho_t;
            e.epsilon_p += k[i] * r1 * rho_p;
            e.epsilon_tt +=
                k_tt * r + 2.0 * k_t * r1 * rho_t + k[i] * (r2 * rho_t * rho_t + r1 * rho_tt);
            e.epsilon_tp += k_t * r1 * rho_p + k[i] * (r2 * rho_t * rho_p + r1 * rho_tp);
            e.epsilon_pp += k[i] * (r2 * rho_p * rho_p + r1 * rho_pp);
        }

        Ok(e.with_born_functions())
    }
}

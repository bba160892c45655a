//! Pressure correction of reaction properties with ΔrV a function of T
//! (`CPM_VKE`, `CPM_VBE`).
//!
//! ΔrV = V0 + V1·(T − Tr) + V2·(T − Tr)², from `volume_coefficients`
//! (or the reference ΔrV when none are given), held constant in P.

use crate::error::ModelResult;
use crate::model::validation::{validate_pressure, validate_reaction, validate_temperature};
use crate::model::{ReactionPressureModel, SolventInputs};
use crate::properties::ThermoPropertiesReaction;
use tf_db::Reaction;

#[derive(Debug, Clone, Copy, Default)]
pub struct ReactionVolumeFunctionOfT;

impl ReactionPressureModel for ReactionVolumeFunctionOfT {
    fn name(&self) -> &str {
        "Reaction volume = f(T)"
    }

    fn correct(
        &self,
        t: f64,
        p: f64,
        reaction: &Reaction,
        mut tpr: ThermoPropertiesReaction,
        _solvent: &SolventInputs,
    ) -> ModelResult<ThermoPropertiesReaction> {
        let t = validate_temperature(t)?;
        let p = validate_pressure(p)?;

        let coeff = |i: usize| reaction.volume_coefficients.get(i).copied().unwrap_or(0.0);
        let v0 = if reaction.volume_coefficients.is_empty() {
            reaction.reference.volume
        } else {
            coeff(0)
        };
        let (v1, v2) = (coeff(1), coeff(2));

        let dt = t - reaction.reference_t;
        let dp = p - reaction.reference_p;
        let dv = v0 + v1 * dt + v2 * dt * dt;
        let dv_dt = v1 + 2.0 * v2 * dt;

        tpr.volume = dv;
        tpr.gibbs_energy += dv * dp;
        tpr.enthalpy += (dv - t * dv_dt) * dp;
        tpr.entropy -= dv_dt * dp;
        tpr.update_pv_terms(p);
        tpr.sync_equilibrium_constant(t);

        validate_reaction(&tpr)?;
        Ok(tpr)
    }
}

//! Method code → model lookup tables.
//!
//! One table per dispatch axis. A code maps either to a model or to an
//! accepted no-op; a code that is absent from its table is unsupported and
//! the engine reports it as such. Clients add their own implementations with
//! the `register_*` methods, replacing any built-in entry for the same code.

use crate::cp_integration::CpIntegration;
use crate::hkf::HkfSolute;
use crate::johnson_norton::JohnsonNorton;
use crate::logk::{LogKForm, LogKFunctionOfT};
use crate::model::{
    ReactionPressureModel, ReactionTemperatureModel, SolventElectroModel, SubstanceCorrection,
    SubstanceEos, WaterEos,
};
use crate::molar_volume::{Berman88Volume, ConstantMolarVolume, IdealGasVolume};
use crate::reaction_volume::ReactionVolumeFunctionOfT;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use tf_db::{MethodCorrP, MethodCorrT, MethodGenEos};

/// Registry entry for one method code.
pub enum Handler<M: ?Sized> {
    Model(Arc<M>),
    /// Accepted code that leaves the properties unchanged
    NoOp { reason: &'static str },
}

impl<M: ?Sized> Clone for Handler<M> {
    fn clone(&self) -> Self {
        match self {
            Self::Model(m) => Self::Model(Arc::clone(m)),
            Self::NoOp { reason } => Self::NoOp { reason: *reason },
        }
    }
}

type Table<K, M> = HashMap<K, Handler<M>>;

/// Lookup tables for every dispatch axis. Cheap to clone (entries are `Arc`s).
#[derive(Clone)]
pub struct ModelRegistry {
    generic_eos: Table<MethodGenEos, dyn SubstanceEos>,
    substance_t: Table<MethodCorrT, dyn SubstanceCorrection>,
    substance_p: Table<MethodCorrP, dyn SubstanceCorrection>,
    water: Table<MethodCorrT, dyn WaterEos>,
    electro: Table<MethodGenEos, dyn SolventElectroModel>,
    reaction_t: Table<MethodCorrT, dyn ReactionTemperatureModel>,
    reaction_p: Table<MethodCorrP, dyn ReactionPressureModel>,
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::with_builtin_models()
    }
}

impl ModelRegistry {
    /// A registry with no entries at all.
    pub fn empty() -> Self {
        Self {
            generic_eos: HashMap::new(),
            substance_t: HashMap::new(),
            substance_p: HashMap::new(),
            water: HashMap::new(),
            electro: HashMap::new(),
            reaction_t: HashMap::new(),
            reaction_p: HashMap::new(),
        }
    }

    /// The models shipped with this crate, plus the documented no-op codes.
    pub fn with_builtin_models() -> Self {
        let mut reg = Self::empty();

        reg.register_generic_eos(MethodGenEos::CpIntegration, CpIntegration);
        // one HKF solute model serves both HKF codes
        let hkf: Arc<dyn SubstanceEos> = Arc::new(HkfSolute);
        for code in [MethodGenEos::HkfGems, MethodGenEos::HkfReaktoro] {
            reg.generic_eos.insert(code, Handler::Model(Arc::clone(&hkf)));
        }

        reg.register_substance_p(MethodCorrP::ConstantVolume, ConstantMolarVolume);
        reg.register_substance_p(MethodCorrP::IdealGas, IdealGasVolume);
        reg.register_substance_p(MethodCorrP::Berman88, Berman88Volume);

        let johnson_norton: Arc<dyn SolventElectroModel> = Arc::new(JohnsonNorton);
        for code in [
            MethodGenEos::WaterJohnsonNortonReaktoro,
            MethodGenEos::WaterJohnsonNortonGems,
        ] {
            reg.electro
                .insert(code, Handler::Model(Arc::clone(&johnson_norton)));
        }

        for (code, form) in [
            (MethodCorrT::LogKPolynomialExtended, LogKForm::Polynomial),
            (MethodCorrT::LogKPolynomial, LogKForm::Polynomial),
            (MethodCorrT::LogKZeroEntropy, LogKForm::ZeroEntropy),
            (MethodCorrT::LogKConstant, LogKForm::ConstantLogK),
            (MethodCorrT::LogKConstantEnthalpy, LogKForm::ConstantEnthalpy),
            (MethodCorrT::LogKConstantHeatCapacity, LogKForm::ConstantHeatCapacity),
        ] {
            reg.register_reaction_t(code, LogKFunctionOfT::new(form));
        }
        reg.register_reaction_t_no_op(
            MethodCorrT::DensityInterpolation,
            "density/temperature interpolation is not evaluated",
        );

        reg.register_reaction_p(MethodCorrP::VolumeFunctionOfT, ReactionVolumeFunctionOfT);
        reg.register_reaction_p(MethodCorrP::Berman88, ReactionVolumeFunctionOfT);
        reg.register_reaction_p_no_op(MethodCorrP::Null, "no pressure correction");
        reg.register_reaction_p_no_op(
            MethodCorrP::ConstantVolume,
            "constant reaction volume is not applied",
        );

        reg
    }

    pub fn register_generic_eos(&mut self, code: MethodGenEos, model: impl SubstanceEos + 'static) {
        self.generic_eos.insert(code, Handler::Model(Arc::new(model)));
    }

    pub fn register_substance_t(
        &mut self,
        code: MethodCorrT,
        model: impl SubstanceCorrection + 'static,
    ) {
        self.substance_t.insert(code, Handler::Model(Arc::new(model)));
    }

    pub fn register_substance_p(
        &mut self,
        code: MethodCorrP,
        model: impl SubstanceCorrection + 'static,
    ) {
        self.substance_p.insert(code, Handler::Model(Arc::new(model)));
    }

    pub fn register_water(&mut self, code: MethodCorrT, model: impl WaterEos + 'static) {
        self.water.insert(code, Handler::Model(Arc::new(model)));
    }

    pub fn register_electro(&mut self, code: MethodGenEos, model: impl SolventElectroModel + 'static) {
        self.electro.insert(code, Handler::Model(Arc::new(model)));
    }

    pub fn register_reaction_t(
        &mut self,
        code: MethodCorrT,
        model: impl ReactionTemperatureModel + 'static,
    ) {
        self.reaction_t.insert(code, Handler::Model(Arc::new(model)));
    }

    pub fn register_reaction_p(
        &mut self,
        code: MethodCorrP,
        model: impl ReactionPressureModel + 'static,
    ) {
        self.reaction_p.insert(code, Handler::Model(Arc::new(model)));
    }

    pub fn register_reaction_t_no_op(&mut self, code: MethodCorrT, reason: &'static str) {
        self.reaction_t.insert(code, Handler::NoOp { reason });
    }

    pub fn register_reaction_p_no_op(&mut self, code: MethodCorrP, reason: &'static str) {
        self.reaction_p.insert(code, Handler::NoOp { reason });
    }

    pub fn generic_eos(&self, code: MethodGenEos) -> Option<&Handler<dyn SubstanceEos>> {
        self.generic_eos.get(&code)
    }

    pub fn substance_t(&self, code: MethodCorrT) -> Option<&Handler<dyn SubstanceCorrection>> {
        self.substance_t.get(&code)
    }

    pub fn substance_p(&self, code: MethodCorrP) -> Option<&Handler<dyn SubstanceCorrection>> {
        self.substance_p.get(&code)
    }

    pub fn water(&self, code: MethodCorrT) -> Option<&Handler<dyn WaterEos>> {
        self.water.get(&code)
    }

    pub fn electro(&self, code: MethodGenEos) -> Option<&Handler<dyn SolventElectroModel>> {
        self.electro.get(&code)
    }

    pub fn reaction_t(&self, code: MethodCorrT) -> Option<&Handler<dyn ReactionTemperatureModel>> {
        self.reaction_t.get(&code)
    }

    pub fn reaction_p(&self, code: MethodCorrP) -> Option<&Handler<dyn ReactionPressureModel>> {
        self.reaction_p.get(&code)
    }
}

fn sorted_codes<K: Ord + Copy + Hash, M: ?Sized>(table: &Table<K, M>) -> Vec<K> {
    let mut codes: Vec<K> = table.keys().copied().collect();
    codes.sort();
    codes
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("generic_eos", &sorted_codes(&self.generic_eos))
            .field("substance_t", &sorted_codes(&self.substance_t))
            .field("substance_p", &sorted_codes(&self.substance_p))
            .field("water", &sorted_codes(&self.water))
            .field("electro", &sorted_codes(&self.electro))
            .field("reaction_t", &sorted_codes(&self.reaction_t))
            .field("reaction_p", &sorted_codes(&self.reaction_p))
            .finish()
    }
}

//! Calculation method codes stored on substance and reaction records.
//!
//! Each record declares up to three codes: a generic equation of state, a
//! temperature correction and a pressure correction. The engine dispatches on
//! them; this module only names them. Codes serialize as the upper-case tags
//! used in thermodynamic datasets (`CTPM_HKF`, `CTM_LGK`, `CPM_CON`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! method_codes {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $code:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $code)] $variant, )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// Dataset tag of this code.
            pub fn code(&self) -> &'static str {
                match self {
                    $( $name::$variant => $code, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }

        impl FromStr for $name {
            type Err = UnknownMethodCode;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let tag = s.trim().to_uppercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|m| m.code() == tag)
                    .ok_or_else(|| UnknownMethodCode {
                        family: stringify!($name),
                        code: s.to_string(),
                    })
            }
        }
    };
}

/// A method tag that does not name any known code of its family.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {family} code `{code}`")]
pub struct UnknownMethodCode {
    pub family: &'static str,
    pub code: String,
}

method_codes! {
    /// Generic equation-of-state family of a substance (or dielectric model of a solvent).
    pub enum MethodGenEos {
        /// Empirical heat capacity integration
        CpIntegration => "CTPM_CPT",
        /// HKF solute model (GEMS variant)
        HkfGems => "CTPM_HKF",
        /// HKF solute model (Reaktoro variant)
        HkfReaktoro => "CTPM_HKFR",
        /// Johnson-Norton 1991 dielectric model (Reaktoro variant)
        WaterJohnsonNortonReaktoro => "CTPM_WJNR",
        /// Johnson-Norton 1991 dielectric model (GEMS variant)
        WaterJohnsonNortonGems => "CTPM_WJNG",
        /// Sverjensky et al. 2014 dielectric model
        WaterSverjensky2014 => "CTPM_WSV14",
        /// Fernandez et al. 1997 dielectric model
        WaterFernandez1997 => "CTPM_WF97",
    }
}

method_codes! {
    /// Temperature-correction family of a substance, solvent or reaction.
    pub enum MethodCorrT {
        /// Landau-type heat capacity peak (Holland-Powell)
        LandauHollandPowell => "CTM_CHP",
        /// Water HGK (GEMS)
        WaterHgk => "CTM_WAT",
        /// Water HGK (Reaktoro)
        WaterHgkReaktoro => "CTM_WAR",
        /// Water Wagner-Pruss 1995 (Reaktoro)
        WaterWagnerPruss => "CTM_WWP",
        /// Water Zhang-Duan 2005
        WaterZhangDuan2005 => "CTM_WZD",
        /// log K = f(T) extended polynomial
        LogKPolynomialExtended => "CTM_LGX",
        /// log K = f(T) polynomial
        LogKPolynomial => "CTM_LGK",
        /// One-term extrapolation, zero reaction entropy
        LogKZeroEntropy => "CTM_EK0",
        /// One-term extrapolation, constant log K
        LogKConstant => "CTM_EK1",
        /// Two-term extrapolation, constant reaction enthalpy
        LogKConstantEnthalpy => "CTM_EK2",
        /// Three-term extrapolation, constant reaction heat capacity
        LogKConstantHeatCapacity => "CTM_EK3",
        /// Marshall-Franck density model
        DensityMarshallFranck => "CTM_DKR",
        /// Modified Ryzhenko-Bryzgalin model
        RyzhenkoBryzgalin => "CTM_MRB",
        /// Interpolation over a density/temperature grid
        DensityInterpolation => "CTM_IKZ",
    }
}

method_codes! {
    /// Pressure-correction family of a substance or reaction.
    pub enum MethodCorrP {
        /// Akinfiev-Diamond 2003 model for aqueous non-electrolytes
        AkinfievDiamond => "CPM_AKI",
        /// Murnaghan EoS (Holland-Powell 1998)
        MurnaghanHp98 => "CPM_CEH",
        /// Berman 1988 molar volume polynomial
        Berman88 => "CPM_VBE",
        /// Birch-Murnaghan (Gottschalk)
        BirchMurnaghanGottschalk => "CPM_VBM",
        /// CORK fluid model
        Cork => "CPM_CORK",
        /// Peng-Robinson-Stryjek-Vera
        Prsv => "CPM_PRSV",
        /// Churakov-Gottschalk fluid model
        ChurakovGottschalk => "CPM_EMP",
        /// Soave-Redlich-Kwong
        Srk => "CPM_SRK",
        /// Peng-Robinson 1978
        Pr78 => "CPM_PR78",
        /// Fixed temperature/pressure (STP) fluid model
        FixedStp => "CPM_STP",
        /// Molar volume independent of T and P
        ConstantVolume => "CPM_CON",
        /// Ideal gas law molar volume
        IdealGas => "CPM_OFF",
        /// Gas-phase corresponding states (water vapor marker)
        GasCorrespondingStates => "CPM_GAS",
        /// Reaction volume as a function of temperature
        VolumeFunctionOfT => "CPM_VKE",
        /// No pressure correction
        Null => "CPM_NUL",
    }
}

// tf-core/src/units.rs

use uom::si::f64::{
    Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature,
};
use uom::si::pressure::pascal;
use uom::si::thermodynamic_temperature::kelvin;

// Public canonical unit types (SI, f64)
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn bar(v: f64) -> Pressure {
    use uom::si::pressure::bar;
    Pressure::new::<bar>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn celsius(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

/// Temperature in kelvin as a bare number.
#[inline]
pub fn kelvin_of(t: Temperature) -> f64 {
    t.get::<kelvin>()
}

/// Pressure in pascal as a bare number.
#[inline]
pub fn pascal_of(p: Pressure) -> f64 {
    p.get::<pascal>()
}

pub mod constants {
    /// Universal gas constant [J/(mol·K)]
    pub const R_CONSTANT: f64 = 8.31451;

    /// Thermochemical calorie [J]
    pub const CAL_TO_J: f64 = 4.184;

    /// Conversion from natural to decimal logarithm (1 / ln 10)
    pub const LN_TO_LG: f64 = 0.434_294_481_903_251_8;

    /// Standard reference temperature [K]
    pub const REFERENCE_T: f64 = 298.15;

    /// Standard reference pressure [Pa]
    pub const REFERENCE_P: f64 = 1.0e5;

    /// Pascal per bar
    pub const PA_PER_BAR: f64 = 1.0e5;
}

//! Unit-aware text input for state conditions.
//!
//! Command-line and file inputs give temperatures and pressures as text with an
//! optional unit tag (`"25 C"`, `"1 bar"`, `"298.15"`). Parsing converts to the
//! canonical SI value used by the engine: kelvin and pascal.

use std::fmt;
use thiserror::Error;

/// Dimension/quantity family for a numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Temperature (canonical: Kelvin)
    Temperature,
    /// Absolute pressure (canonical: Pa)
    Pressure,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "Temperature"),
            Self::Pressure => write!(f, "Absolute Pressure"),
        }
    }
}

/// Error in unit parsing or conversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// Input text did not parse to a number + optional unit
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Unit not recognized for this quantity
    #[error("Unknown unit '{unit}' for {quantity}")]
    UnknownUnit { unit: String, quantity: Quantity },
    /// Value out of physical range (e.g., negative absolute temperature)
    #[error("Value {value} out of range: {reason}")]
    OutOfRange { value: f64, reason: &'static str },
}

/// Unit tag, scale and offset: `si = value * scale + offset`.
type UnitRow = (&'static [&'static str], f64, f64);

const TEMPERATURE_UNITS: &[UnitRow] = &[
    (&["", "k", "kelvin"], 1.0, 0.0),
    (&["c", "°c", "celsius"], 1.0, 273.15),
    (&["f", "°f", "fahrenheit"], 5.0 / 9.0, 459.67 * 5.0 / 9.0),
];

const PRESSURE_UNITS: &[UnitRow] = &[
    (&["", "pa", "pascal"], 1.0, 0.0),
    (&["kpa"], 1e3, 0.0),
    (&["mpa"], 1e6, 0.0),
    (&["gpa"], 1e9, 0.0),
    (&["bar"], 1e5, 0.0),
    (&["kbar"], 1e8, 0.0),
    (&["atm"], 101_325.0, 0.0),
];

impl Quantity {
    fn units(self) -> &'static [UnitRow] {
        match self {
            Self::Temperature => TEMPERATURE_UNITS,
            Self::Pressure => PRESSURE_UNITS,
        }
    }

    fn range_reason(self) -> &'static str {
        match self {
            Self::Temperature => "Absolute temperature must be > 0 K",
            Self::Pressure => "Absolute pressure must be > 0 Pa",
        }
    }
}

/// Parse a quantity value from user input text, returning canonical SI.
///
/// A bare number is taken in the canonical unit (K or Pa). Both state
/// quantities are absolute, so the result must be strictly positive.
pub fn parse_quantity(raw_text: &str, quantity: Quantity) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(raw_text.trim())?;
    let tag = unit.to_lowercase();

    let (_, scale, offset) = quantity
        .units()
        .iter()
        .find(|(tags, _, _)| tags.contains(&tag.as_str()))
        .ok_or(UnitError::UnknownUnit { unit, quantity })?;

    let si = value * scale + offset;
    if si <= 0.0 {
        return Err(UnitError::OutOfRange {
            value: si,
            reason: quantity.range_reason(),
        });
    }
    Ok(si)
}

/// Split `"1.5 kbar"` into `(1.5, "kbar")`; an exponent such as `1e5` stays
/// with the number.
fn split_value_and_unit(input: &str) -> Result<(f64, String), UnitError> {
    let bytes = input.as_bytes();
    let mut end = 0;
    while end < bytes.len() {
        let c = bytes[end] as char;
        let exponent = matches!(c, 'e' | 'E')
            && bytes
                .get(end + 1)
                .is_some_and(|&n| n.is_ascii_digit() || n == b'-' || n == b'+');
        if !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+') || exponent) {
            break;
        }
        end += 1;
    }

    let (number, unit) = input.split_at(end);
    let value = number
        .trim()
        .parse::<f64>()
        .map_err(|_| UnitError::ParseError(format!("Could not parse numeric value from '{input}'")))?;
    Ok((value, unit.trim().to_string()))
}

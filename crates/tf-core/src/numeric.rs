use crate::TfError;

pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, TfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(TfError::NonFinite { what, value: v })
    }
}

/// Require a strictly positive, finite value (absolute temperature, pressure, density).
pub fn ensure_positive(v: f64, what: &'static str) -> Result<f64, TfError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(TfError::OutOfRange { what, value: v })
    }
}

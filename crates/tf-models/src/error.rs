//! Model evaluation errors.

use tf_core::TfError;
use thiserror::Error;

/// Result type for model evaluations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while a model evaluates a record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Non-physical values (negative density, zero dielectric constant, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Value out of the model's valid range.
    #[error("Value out of range for {what}: {value}")]
    OutOfRange { what: &'static str, value: f64 },

    /// A solvent input the model relies on was not supplied.
    #[error("Missing solvent input: {what}")]
    MissingInput { what: &'static str },

    /// The record lacks coefficients the model needs.
    #[error("Missing parameter {what} on record `{symbol}`")]
    MissingParameter { what: &'static str, symbol: String },
}

impl From<TfError> for ModelError {
    fn from(err: TfError) -> Self {
        match err {
            TfError::NonFinite { what, .. } => ModelError::NonPhysical { what },
            TfError::OutOfRange { what, value } => ModelError::OutOfRange { what, value },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ModelError::NonPhysical { what: "density" };
        assert!(err.to_string().contains("density"));

        let err = ModelError::MissingParameter {
            what: "hkf_coefficients",
            symbol: "Na+".into(),
        };
        assert!(err.to_string().contains("Na+"));
    }

    #[test]
    fn tf_error_converts() {
        let tf_err = TfError::OutOfRange {
            what: "temperature",
            value: -1.0,
        };
        let model_err: ModelError = tf_err.into();
        assert!(matches!(model_err, ModelError::OutOfRange { value, .. } if value == -1.0));
    }
}

//! Sweep point generation.
//!
//! A sweep varies temperature or pressure between two bounds given as text
//! with units; the points are produced in canonical SI (K or Pa).

use std::fmt;
use tf_core::{Quantity, UnitError, parse_quantity};
use thiserror::Error;

/// Spacing of the points between the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepType {
    #[default]
    Linear,
    /// Equal ratios between neighbours; used for pressure over decades
    Logarithmic,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SweepError {
    #[error("Invalid sweep start: {0}")]
    Start(UnitError),
    #[error("Invalid sweep end: {0}")]
    End(UnitError),
    #[error("A sweep needs at least 2 points, got {0}")]
    TooFewPoints(usize),
    #[error("Sweep bounds coincide")]
    EmptyRange,
    #[error("Sweep over {found} where {expected} was expected")]
    WrongQuantity { expected: Quantity, found: Quantity },
}

/// One end of a sweep, as typed and in SI.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepBound {
    pub raw: String,
    pub si: f64,
}

impl SweepBound {
    fn parse(raw: String, quantity: Quantity) -> Result<Self, UnitError> {
        let si = parse_quantity(&raw, quantity)?;
        Ok(Self { raw, si })
    }
}

/// A temperature or pressure sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepDefinition {
    pub quantity: Quantity,
    pub start: SweepBound,
    pub end: SweepBound,
    pub num_points: usize,
    pub sweep_type: SweepType,
}

impl SweepDefinition {
    /// Create a sweep from text bounds such as `"25 C"` and `"300 C"`.
    pub fn from_text(
        start: impl Into<String>,
        end: impl Into<String>,
        quantity: Quantity,
        num_points: usize,
        sweep_type: SweepType,
    ) -> Result<Self, SweepError> {
        let start = SweepBound::parse(start.into(), quantity).map_err(SweepError::Start)?;
        let end = SweepBound::parse(end.into(), quantity).map_err(SweepError::End)?;

        let sweep = Self {
            quantity,
            start,
            end,
            num_points,
            sweep_type,
        };
        sweep.validate()?;
        Ok(sweep)
    }

    /// Check a definition whose fields may have been set directly.
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.num_points < 2 {
            return Err(SweepError::TooFewPoints(self.num_points));
        }
        if self.start.si == self.end.si {
            return Err(SweepError::EmptyRange);
        }
        Ok(())
    }

    pub(crate) fn expect_quantity(&self, expected: Quantity) -> Result<(), SweepError> {
        if self.quantity == expected {
            self.validate()
        } else {
            Err(SweepError::WrongQuantity {
                expected,
                found: self.quantity,
            })
        }
    }

    /// All points of the sweep; the first and last equal the bounds exactly.
    ///
    /// Bounds are positive absolute quantities, so the logarithmic spacing is
    /// always defined. Fewer than two points yield at most the start bound.
    pub fn generate_points(&self) -> Vec<f64> {
        let (a, b) = (self.start.si, self.end.si);
        let last = self.num_points.saturating_sub(1);
        let interpolate = |frac: f64| match self.sweep_type {
            SweepType::Linear => a + frac * (b - a),
            SweepType::Logarithmic => (a.ln() + frac * (b.ln() - a.ln())).exp(),
        };

        (0..self.num_points)
            .map(|i| match i {
                0 => a,
                i if i == last => b,
                i => interpolate(i as f64 / last as f64),
            })
            .collect()
    }
}

impl fmt::Display for SweepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Logarithmic => write!(f, "logarithmic"),
        }
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} to {}, {} {} points",
            self.quantity, self.start.raw, self.end.raw, self.num_points, self.sweep_type
        )
    }
}

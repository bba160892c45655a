//! tf-core: stable foundation for the thermodynamic engine workspace.
//!
//! Contains:
//! - units (uom SI types, constructors and physical constants)
//! - quantity (text input with unit suffixes for temperature and pressure)
//! - numeric (finite and positive checks on state inputs)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod quantity;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{TfError, TfResult};
pub use numeric::*;
pub use quantity::{Quantity, UnitError, parse_quantity};
pub use units::*;

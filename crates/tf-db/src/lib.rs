//! tf-db: substance, reaction and element records and the dataset file format.
//!
//! Contains:
//! - schema (record types and the dataset file layout)
//! - method (calculation method codes attached to records)
//! - formula (chemical formula parsing)
//! - database (the read-only record store used by the engine)
//! - validate (dataset consistency checks)

pub mod database;
pub mod formula;
pub mod method;
pub mod schema;
pub mod validate;

pub use database::Database;
pub use formula::{CHARGE_SYMBOL, FormulaMap, parse_formula};
pub use method::{MethodCorrP, MethodCorrT, MethodGenEos, UnknownMethodCode};
pub use schema::*;
pub use validate::{ValidationError, validate_dataset};

use std::fmt;
use std::path::Path;

pub type DbResult<T> = Result<T, DbError>;

/// Kind of record looked up in a [`Database`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Substance,
    Reaction,
    Element,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Substance => write!(f, "substance"),
            Self::Reaction => write!(f, "reaction"),
            Self::Element => write!(f, "element"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DbError {
    #[error("No {kind} record with symbol `{symbol}`")]
    NotFound { kind: RecordKind, symbol: String },

    #[error("Malformed formula `{formula}`: {reason}")]
    Formula {
        formula: String,
        reason: &'static str,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse and validate a YAML dataset held in memory.
pub fn from_yaml_str(content: &str) -> DbResult<Database> {
    let dataset: DatasetFile = serde_yaml::from_str(content)?;
    into_database(dataset)
}

/// Parse and validate a JSON dataset held in memory.
pub fn from_json_str(content: &str) -> DbResult<Database> {
    let dataset: DatasetFile = serde_json::from_str(content)?;
    into_database(dataset)
}

pub fn load_yaml(path: &Path) -> DbResult<Database> {
    let content = std::fs::read_to_string(path)?;
    let db = from_yaml_str(&content)?;
    tracing::debug!(
        path = %path.display(),
        substances = db.num_substances(),
        reactions = db.num_reactions(),
        "loaded dataset"
    );
    Ok(db)
}

pub fn load_json(path: &Path) -> DbResult<Database> {
    let content = std::fs::read_to_string(path)?;
    let db = from_json_str(&content)?;
    tracing::debug!(
        path = %path.display(),
        substances = db.num_substances(),
        reactions = db.num_reactions(),
        "loaded dataset"
    );
    Ok(db)
}

/// Load a dataset, choosing the format by file extension (`.json`, otherwise YAML).
pub fn load(path: &Path) -> DbResult<Database> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_yaml(path),
    }
}

pub fn save_yaml(path: &Path, db: &Database, name: &str) -> DbResult<()> {
    let dataset = db.to_dataset(name);
    validate_dataset(&dataset)?;
    let content = serde_yaml::to_string(&dataset)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn save_json(path: &Path, db: &Database, name: &str) -> DbResult<()> {
    let dataset = db.to_dataset(name);
    validate_dataset(&dataset)?;
    let content = serde_json::to_string_pretty(&dataset)?;
    std::fs::write(path, content)?;
    Ok(())
}

fn into_database(dataset: DatasetFile) -> DbResult<Database> {
    validate_dataset(&dataset)?;
    Ok(Database::from_dataset(dataset))
}

//! Engine errors.

use std::fmt;
use tf_core::TfError;
use tf_db::{DbError, RecordKind};
use tf_models::ModelError;
use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

/// Where in the dispatch an error was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    Substance,
    Solvent,
    Reaction,
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Substance => write!(f, "substance"),
            Self::Solvent => write!(f, "solvent"),
            Self::Reaction => write!(f, "reaction"),
        }
    }
}

/// Method code reported when a record carries none.
pub const NO_CODE: &str = "<none>";

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("No {kind} record with symbol `{symbol}`")]
    RecordNotFound { kind: RecordKind, symbol: String },

    #[error("Reaction-derived substance `{symbol}` has no defining reaction")]
    ReactionNotDefined { symbol: String },

    #[error("Unsupported method {code} for {site} `{symbol}`")]
    UnsupportedMethod {
        site: Site,
        code: String,
        symbol: String,
    },

    #[error("Invalid stoichiometry of `{symbol}` in reaction `{reaction}`: {reason}")]
    InvalidStoichiometry {
        symbol: String,
        reaction: String,
        reason: &'static str,
    },

    #[error("Cyclic dependency: {}", chain.join(" -> "))]
    CyclicDependency { chain: Vec<String> },

    #[error("Evaluation depth limit of {limit} exceeded at `{symbol}`")]
    DepthExceeded { limit: usize, symbol: String },

    #[error("Model `{model}` failed for `{symbol}`: {source}")]
    Model {
        model: String,
        symbol: String,
        #[source]
        source: ModelError,
    },

    #[error("Invalid state point: {0}")]
    InvalidInput(#[from] TfError),

    #[error("Database error: {0}")]
    Database(DbError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<DbError> for EngineError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { kind, symbol } => EngineError::RecordNotFound { kind, symbol },
            other => EngineError::Database(other),
        }
    }
}

impl EngineError {
    pub(crate) fn unsupported(site: Site, code: impl fmt::Display, symbol: &str) -> Self {
        EngineError::UnsupportedMethod {
            site,
            code: code.to_string(),
            symbol: symbol.to_string(),
        }
    }

    pub(crate) fn model(model: &str, symbol: &str) -> impl FnOnce(ModelError) -> Self {
        let model = model.to_string();
        let symbol = symbol.to_string();
        move |source| EngineError::Model {
            model,
            symbol,
            source,
        }
    }
}

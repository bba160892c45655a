//! Engine configuration file format.

use crate::conventions::Conventions;
use crate::error::EngineResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_SOLVENT: &str = "H2O@";
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Per-engine settings, loadable from YAML or JSON.
///
/// ```yaml
/// solvent_symbol: H2O@
/// conventions:
///   aqueous: Berman-Brown
///   water: steam-tables
/// max_depth: 64
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Symbol of the solvent record used by solute models
    pub solvent_symbol: String,
    pub conventions: Conventions,
    /// Maximum nesting of record evaluations
    pub max_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            solvent_symbol: DEFAULT_SOLVENT.to_string(),
            conventions: Conventions::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load from a file, choosing the format by extension (`.json`, otherwise YAML).
    pub fn load(path: &Path) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    pub fn save_yaml(&self, path: &Path) -> EngineResult<()> {
        std::fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }
}

//! Formatting settings
//!
//! Settings can be built in code or loaded from a YAML or JSON file. Every
//! field has a default, so a settings file only needs the keys it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::templates::DocumentTemplate;
use crate::models::PitchLanguage;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid YAML settings: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings files must end in .yaml, .yml or .json
    #[error("unsupported settings file extension: {0:?}")]
    UnsupportedExtension(String),
}

/// Configuration options for LilyPond output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatSettings {
    /// Target LilyPond version (e.g., "2.24.0")
    pub lilypond_version: String,

    /// Note name language
    pub language: PitchLanguage,

    /// Spaces per nesting level
    pub indent: usize,

    pub template: DocumentTemplate,

    pub title: Option<String>,
    pub composer: Option<String>,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            lilypond_version: "2.24.0".to_string(),
            language: PitchLanguage::Nederlands,
            indent: 4,
            template: DocumentTemplate::Minimal,
            title: None,
            composer: None,
        }
    }
}

impl FormatSettings {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load settings from a file, picking the format by extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        let source = fs::read_to_string(path)?;
        let settings = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&source)?,
            "json" => Self::from_json_str(&source)?,
            _ => return Err(ConfigError::UnsupportedExtension(extension)),
        };
        log::debug!("loaded format settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

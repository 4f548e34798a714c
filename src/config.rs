//! YAML configuration file support for the quiz pipeline.
//!
//! A single file names the trained artifacts, the display catalogs, and
//! the runtime knobs, so deployments can swap models without recompiling.
//!
//! ## Example
//!
//! ```yaml
//! version: "1.0"
//! name: "default character quiz"
//!
//! model_path: "data/model.bin"
//! graph_path: "data/graph.bin"
//! statements_path: "data/statements.json"
//! characters_path: "data/characters_works.json"
//!
//! question_count: 10
//!
//! matcher:
//!   unresolved_warn_ratio: 0.5
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use cq_match::MatchConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration for the quiz matching pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct QuizConfig {
    /// Configuration format version.
    pub version: String,

    /// Optional configuration name/description.
    #[serde(default)]
    pub name: Option<String>,

    /// Embedding model artifact (bincode + zstd).
    pub model_path: PathBuf,

    /// Relationship graph artifact (bincode + zstd).
    pub graph_path: PathBuf,

    /// Statement catalog (JSON, axis id → statement text).
    pub statements_path: PathBuf,

    /// Character/work catalog (JSON, character name → work).
    pub characters_path: PathBuf,

    /// Number of statements presented per quiz round.
    #[serde(default = "QuizConfig::default_question_count")]
    pub question_count: usize,

    /// Matching engine configuration.
    #[serde(default)]
    pub matcher: MatchConfig,
}

impl QuizConfig {
    pub(crate) fn default_question_count() -> usize {
        10
    }

    /// Load a YAML configuration file from the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: QuizConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        match self.version.as_str() {
            "1.0" | "1" => {}
            v => return Err(ConfigError::UnsupportedVersion(v.to_string())),
        }
        if self.question_count == 0 {
            return Err(ConfigError::Validation(
                "question_count must be greater than zero".into(),
            ));
        }
        self.matcher
            .validate()
            .map_err(|err| ConfigError::Validation(err.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
version: "1.0"
model_path: "data/model.bin"
graph_path: "data/graph.bin"
statements_path: "data/statements.json"
characters_path: "data/characters_works.json"
"#;

    #[test]
    fn minimal_config_gets_defaults() {
        let cfg = QuizConfig::from_yaml(MINIMAL).expect("valid config");
        assert_eq!(cfg.question_count, 10);
        assert_eq!(cfg.matcher, MatchConfig::default());
        assert!(cfg.name.is_none());
    }

    #[test]
    fn unsupported_version_rejected() {
        let yaml = MINIMAL.replace("\"1.0\"", "\"2.0\"");
        let err = QuizConfig::from_yaml(&yaml).expect_err("must reject");
        assert!(matches!(err, ConfigError::UnsupportedVersion(v) if v == "2.0"));
    }

    #[test]
    fn zero_question_count_rejected() {
        let yaml = format!("{MINIMAL}question_count: 0\n");
        let err = QuizConfig::from_yaml(&yaml).expect_err("must reject");
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn matcher_section_is_validated() {
        let yaml = format!("{MINIMAL}matcher:\n  unresolved_warn_ratio: 2.5\n");
        let err = QuizConfig::from_yaml(&yaml).expect_err("must reject");
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}

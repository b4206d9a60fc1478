//! Configuration management for the answer scorer
//!
//! Loads the scoring policy, matching thresholds and concept table location
//! from TOML files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::{ConceptMatcher, Evaluator, MatchingConfig, ScoringPolicy};
use crate::concepts::ConceptTable;
use crate::exercises::LoadError;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringPolicy,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub concepts: ConceptsConfig,
}

/// Where concept groups come from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConceptsConfig {
    /// TOML file with extra `[[concepts]]` groups, merged over the built-in table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// A relative `concepts.file` is resolved against the config file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;

        if let Some(file) = config.concepts.file.take() {
            let resolved = match path.parent() {
                Some(base) if file.is_relative() => base.join(file),
                _ => file,
            };
            config.concepts.file = Some(resolved);
        }
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from default config location or return defaults
    pub fn load_or_default() -> Self {
        let config_paths = [
            "config/scorer.toml",
            "../config/scorer.toml",
            "answer-scorer/config/scorer.toml",
        ];

        for path in &config_paths {
            if Path::new(path).is_file() {
                match Self::from_file(path) {
                    Ok(config) => {
                        tracing::info!("Loaded configuration from {}", path);
                        return config;
                    }
                    Err(e) => tracing::warn!("Ignoring invalid configuration {}: {}", path, e),
                }
            }
        }

        tracing::info!("Using default configuration");
        Self::default()
    }

    /// Save configuration to a TOML file
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Build the concept table: built-in groups plus the configured file, if any
    pub fn concept_table(&self) -> Result<Arc<ConceptTable>, LoadError> {
        match &self.concepts.file {
            Some(path) => Ok(Arc::new(ConceptTable::load_extended(path)?)),
            None => Ok(ConceptTable::builtin()),
        }
    }

    /// Build an evaluator from this configuration
    pub fn evaluator(&self) -> Result<Evaluator, LoadError> {
        let matcher = ConceptMatcher::new(self.concept_table()?, self.matching.clone());
        Ok(Evaluator::new(matcher, self.scoring.clone()))
    }
}

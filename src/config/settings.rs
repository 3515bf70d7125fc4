//! Configuration settings for the takeoff analysis core.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub vocabulary: VocabularySettings,
    pub extraction: ExtractionSettings,
    pub cost: CostSettings,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations or use defaults.
    pub fn load() -> Result<Self> {
        let config_paths = [
            PathBuf::from("takeoff.toml"),
            PathBuf::from("config.toml"),
            dirs::config_dir()
                .map(|p| p.join("takeoff/config.toml"))
                .unwrap_or_default(),
            dirs::home_dir()
                .map(|p| p.join(".takeoff/config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("extraction.quantity_confidence", self.extraction.quantity_confidence),
            ("extraction.unit_confidence", self.extraction.unit_confidence),
            ("extraction.term_confidence", self.extraction.term_confidence),
            ("extraction.operation_confidence", self.extraction.operation_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within [0.0, 1.0], got {}",
                    name, value
                ))
                .into());
            }
        }

        if self.cost.location.is_empty() {
            return Err(ConfigError::MissingField("cost.location".to_string()).into());
        }
        if self.cost.overhead_multiplier <= 0.0 {
            return Err(
                ConfigError::Invalid("cost.overhead_multiplier must be > 0".to_string()).into(),
            );
        }

        Ok(())
    }
}

/// Vocabulary source settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularySettings {
    /// Path to a persisted vocabulary export. When unset, the built-in
    /// construction seed vocabulary is used.
    pub path: Option<PathBuf>,
}

/// Per-label default confidences for rule-based extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    /// Confidence assigned to numeric quantity matches.
    pub quantity_confidence: f32,
    /// Confidence assigned to unit-of-measure matches.
    pub unit_confidence: f32,
    /// Confidence assigned to material and equipment matches.
    pub term_confidence: f32,
    /// Confidence assigned to operation-verb matches.
    pub operation_confidence: f32,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            quantity_confidence: 0.9,
            unit_confidence: 0.85,
            term_confidence: 0.8,
            operation_confidence: 0.9,
        }
    }
}

/// Cost estimation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CostSettings {
    /// Default regional location tag (urban_high, urban_medium, suburban,
    /// rural, remote).
    pub location: String,
    /// Overhead-and-profit multiplier applied to the direct cost total.
    pub overhead_multiplier: f64,
}

impl Default for CostSettings {
    fn default() -> Self {
        Self {
            location: "suburban".to_string(),
            overhead_multiplier: 1.25,
        }
    }
}

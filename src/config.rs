use crate::{Result, TranscriptError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the SRT transcript converter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Subtitle block conversion settings
    pub conversion: ConversionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// File name suffix that marks a subtitle file (matched literally)
    pub source_extension: String,

    /// Extension given to generated transcripts
    pub target_extension: String,

    /// Token that identifies a timestamp line
    pub timestamp_marker: String,

    /// Number of lines after a timestamp taken as caption text
    pub caption_lines: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            source_extension: ".srt".to_string(),
            target_extension: "txt".to_string(),
            timestamp_marker: "-->".to_string(),
            caption_lines: 2,
        }
    }
}

impl Config {
    /// Load configuration from the first config file found in the working directory
    pub fn load() -> Result<Self> {
        let config_paths = ["srt2txt.toml", "config/srt2txt.toml"];

        for path in &config_paths {
            let path = Path::new(path);
            if !path.is_file() {
                continue;
            }
            match Self::from_file(path) {
                Ok(config) => {
                    tracing::info!("📄 Loaded configuration from: {}", path.display());
                    return Ok(config);
                }
                Err(e) => {
                    tracing::warn!("Skipping config file {}: {}", path.display(), e);
                }
            }
        }

        Err(TranscriptError::Config("No configuration file found".to_string()))
    }

    /// Parse a single TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TranscriptError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| TranscriptError::Config(e.to_string()))
    }
}

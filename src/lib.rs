//! SRT Transcript - subtitle to plain-text conversion
//!
//! Turns SubRip (`.srt`) files into `[time range] caption` transcripts,
//! either one file at a time or across a whole directory tree.

pub mod config;
pub mod output;
pub mod processing;
pub mod transcript;

use std::path::PathBuf;

// Re-export main types for easy access
pub use crate::config::{Config, ConversionConfig};
pub use crate::output::OutputResolver;
pub use crate::processing::{BatchConverter, BatchResult, ConversionResult, InputKind};
pub use crate::transcript::{SrtTranscriber, SubtitleBlock};

/// Result type for transcript operations
pub type Result<T> = std::result::Result<T, TranscriptError>;

/// Error types for transcript operations
#[derive(thiserror::Error, Debug)]
pub enum TranscriptError {
    #[error("Failed to read '{}': {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{}': {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create output directory '{}': {source}", .path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

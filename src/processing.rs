use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::config::{Config, ConversionConfig};
use crate::output::OutputResolver;
use crate::transcript::SrtTranscriber;

/// What the input argument turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Directory,
    SrtFile,
    Invalid,
}

/// Outcome for a single subtitle file
#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub blocks: usize,
    pub error_message: Option<String>,
}

impl ConversionResult {
    pub fn is_success(&self) -> bool {
        self.error_message.is_none()
    }
}

/// Overall batch results
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub input_kind: InputKind,
    pub converted: Vec<ConversionResult>,
    pub failed: Vec<ConversionResult>,
    pub total_time: Duration,
}

impl BatchResult {
    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }
}

/// Sequential batch converter: one file at a time, in walk order
pub struct BatchConverter {
    config: ConversionConfig,
    transcriber: SrtTranscriber,
    resolver: OutputResolver,
}

impl BatchConverter {
    pub fn new(config: &Config, resolver: OutputResolver) -> Self {
        Self {
            config: config.conversion.clone(),
            transcriber: SrtTranscriber::new(&config.conversion),
            resolver,
        }
    }

    pub fn classify(&self, input: &Path) -> InputKind {
        if input.is_dir() {
            InputKind::Directory
        } else if input.is_file() && self.has_source_extension(input) {
            InputKind::SrtFile
        } else {
            InputKind::Invalid
        }
    }

    /// Convert `input` without per-file reporting
    pub fn convert(&self, input: &Path) -> BatchResult {
        self.convert_with(input, |_| {})
    }

    /// Convert `input`, calling `report` after each file as soon as it is done
    pub fn convert_with<F>(&self, input: &Path, mut report: F) -> BatchResult
    where
        F: FnMut(&ConversionResult),
    {
        let start_time = Instant::now();
        let input_kind = self.classify(input);

        let sources = match input_kind {
            InputKind::Directory => {
                info!("🔍 Discovering subtitle files in {}", input.display());
                self.discover_subtitles(input)
            }
            InputKind::SrtFile => vec![input.to_path_buf()],
            InputKind::Invalid => {
                debug!("Input is neither a directory nor a subtitle file: {}", input.display());
                Vec::new()
            }
        };

        let mut converted = Vec::new();
        let mut failed = Vec::new();

        for source in sources {
            let result = self.convert_file(&source);
            report(&result);
            if result.is_success() {
                converted.push(result);
            } else {
                failed.push(result);
            }
        }

        let batch = BatchResult {
            input_kind,
            converted,
            failed,
            total_time: start_time.elapsed(),
        };

        if input_kind != InputKind::Invalid {
            info!(
                "🎉 Converted {}/{} subtitle files in {:.2}s",
                batch.converted.len(),
                batch.total(),
                batch.total_time.as_secs_f64()
            );
        }

        batch
    }

    /// Convert one file. Failures are logged and recorded, never returned.
    pub fn convert_file(&self, source: &Path) -> ConversionResult {
        let destination = self.resolver.resolve(source);
        debug!("📝 {} -> {}", source.display(), destination.display());

        match self.transcriber.transcribe_file(source, &destination) {
            Ok(blocks) => ConversionResult {
                source: source.to_path_buf(),
                destination,
                blocks,
                error_message: None,
            },
            Err(e) => {
                error!(
                    "Error occurred while processing file '{}' (output '{}'): {}",
                    source.display(),
                    destination.display(),
                    e
                );
                ConversionResult {
                    source: source.to_path_buf(),
                    destination,
                    blocks: 0,
                    error_message: Some(e.to_string()),
                }
            }
        }
    }

    /// Recursively collect subtitle files in walk order
    pub fn discover_subtitles(&self, directory: &Path) -> Vec<PathBuf> {
        let mut subtitles = Vec::new();

        for entry in WalkDir::new(directory) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", directory.display(), e);
                    continue;
                }
            };

            // `Path::is_file` follows symlinks, so linked subtitle files are converted
            if entry.path().is_file()
                && entry
                    .file_name()
                    .to_string_lossy()
                    .ends_with(self.config.source_extension.as_str())
            {
                subtitles.push(entry.into_path());
            }
        }

        debug!("Found {} subtitle files", subtitles.len());
        subtitles
    }

    fn has_source_extension(&self, path: &Path) -> bool {
        path.to_string_lossy()
            .ends_with(self.config.source_extension.as_str())
    }
}

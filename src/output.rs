//! Output path resolution for generated transcripts

use crate::{Result, TranscriptError};
use std::path::{is_separator, Path, PathBuf};
use tracing::debug;

/// Destination rule decided once per run from the `--output` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputResolver {
    /// Write next to each input file
    SameDirectory { extension: String },

    /// Write into a fixed directory, keeping each input's file stem
    Directory { dir: PathBuf, extension: String },

    /// Write every transcript to the same file
    File(PathBuf),
}

impl OutputResolver {
    /// Build the rule for a run. In directory mode the directory is created here,
    /// before any file is converted.
    pub fn new(output: Option<&Path>, extension: &str) -> Result<Self> {
        let extension = extension.trim_start_matches('.').to_string();

        let Some(output) = output else {
            return Ok(Self::SameDirectory { extension });
        };

        if !Self::is_directory_argument(output) {
            debug!("Output argument is a file: {}", output.display());
            return Ok(Self::File(output.to_path_buf()));
        }

        std::fs::create_dir_all(output).map_err(|source| TranscriptError::CreateOutputDir {
            path: output.to_path_buf(),
            source,
        })?;
        debug!("Output argument is a directory: {}", output.display());

        Ok(Self::Directory {
            dir: output.to_path_buf(),
            extension,
        })
    }

    /// An existing directory, a trailing separator, or a final segment without an
    /// extension all mean directory mode. An extensionless file name is therefore
    /// treated as a directory.
    pub fn is_directory_argument(output: &Path) -> bool {
        if output.is_dir() {
            return true;
        }
        let ends_with_separator = output
            .to_str()
            .and_then(|s| s.chars().last())
            .map(is_separator)
            .unwrap_or(false);
        ends_with_separator || output.extension().is_none()
    }

    /// Destination transcript path for one subtitle file
    pub fn resolve(&self, input: &Path) -> PathBuf {
        match self {
            Self::SameDirectory { extension } => input.with_extension(extension),
            Self::Directory { dir, extension } => match input.file_name() {
                Some(name) => dir.join(Path::new(name).with_extension(extension)),
                None => dir.join(input.with_extension(extension)),
            },
            Self::File(path) => path.clone(),
        }
    }

    pub fn is_directory_mode(&self) -> bool {
        matches!(self, Self::Directory { .. })
    }
}

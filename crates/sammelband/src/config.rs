//! Service configuration.
//!
//! The upload and converted-output directories are plain values created once
//! at process start and passed into each pipeline invocation; nothing reads
//! them from global state afterwards.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::Result;

/// Directories the conversion pipelines work in.
///
/// `upload_dir` holds per-request staged inputs (deleted by the cleanup
/// stage); `converted_dir` receives RTF conversion outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    #[serde(default = "default_converted_dir")]
    pub converted_dir: PathBuf,
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_converted_dir() -> PathBuf {
    PathBuf::from("converted_files")
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            converted_dir: default_converted_dir(),
        }
    }
}

impl ServiceConfig {
    /// Build a configuration from environment variables, falling back to the
    /// defaults (`uploads/`, `converted_files/`) with a logged warning for
    /// values that are set but empty.
    ///
    /// Recognized variables:
    /// - `SAMMELBAND_UPLOAD_DIR`
    /// - `SAMMELBAND_CONVERTED_DIR`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("SAMMELBAND_UPLOAD_DIR") {
            if dir.trim().is_empty() {
                tracing::warn!("SAMMELBAND_UPLOAD_DIR is set but empty, using default upload directory");
            } else {
                config.upload_dir = PathBuf::from(dir);
            }
        }

        if let Ok(dir) = std::env::var("SAMMELBAND_CONVERTED_DIR") {
            if dir.trim().is_empty() {
                tracing::warn!("SAMMELBAND_CONVERTED_DIR is set but empty, using default converted directory");
            } else {
                config.converted_dir = PathBuf::from(dir);
            }
        }

        config
    }

    /// Place both directories under one base directory.
    pub fn with_base_dir(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            upload_dir: base.join("uploads"),
            converted_dir: base.join("converted_files"),
        }
    }

    /// Create both directories if they do not exist yet. Called once at
    /// startup; the configuration is read-only afterwards.
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.upload_dir)?;
        std::fs::create_dir_all(&self.converted_dir)?;
        Ok(())
    }
}

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use iiot_core::FactSnapshot;
use thiserror::Error;
use tracing::{debug, warn};

use super::FactSource;

#[derive(Debug, Error)]
pub enum FileSourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML snapshot: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported snapshot format: {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
}

impl Format {
    fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("toml") {
            Some(Format::Toml)
        } else if extension.eq_ignore_ascii_case("json") {
            Some(Format::Json)
        } else {
            None
        }
    }
}

/// Source reading a snapshot file exported by the telemetry backend.
///
/// The file is re-read on every [`FactSource::read`], so a backend that
/// rewrites it is picked up on the next refresh.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: Format,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, FileSourceError> {
        let path = path.into();
        let format =
            Format::from_path(&path).ok_or_else(|| FileSourceError::UnsupportedFormat(path.clone()))?;
        Ok(Self { path, format })
    }
}

#[async_trait]
impl FactSource for FileSource {
    type Error = FileSourceError;

    async fn read(&self) -> Result<FactSnapshot, Self::Error> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FileSourceError::Io {
                path: self.path.clone(),
                source,
            })?;

        let mut snapshot: FactSnapshot = match self.format {
            Format::Toml => toml::from_str(&content)?,
            Format::Json => serde_json::from_str(&content)?,
        };

        if snapshot.captured_at.is_none() {
            snapshot.captured_at = Some(jiff::Timestamp::now());
        }

        let unknown = snapshot.unknown_labels();
        if unknown > 0 {
            warn!(path = ?self.path, unknown, "snapshot has unrecognized status or severity labels");
        }

        debug!(
            path = ?self.path,
            devices = snapshot.devices.len(),
            samples = snapshot.telemetry.len(),
            alerts = snapshot.alerts.len(),
            "snapshot file read"
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert!(FileSource::new("facts.toml").is_ok());
        assert!(FileSource::new("facts.JSON").is_ok());
        assert!(matches!(
            FileSource::new("facts.yaml"),
            Err(FileSourceError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            FileSource::new("facts"),
            Err(FileSourceError::UnsupportedFormat(_))
        ));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let source = FileSource::new("/nonexistent/iiot/facts.toml").unwrap();
        let err = source.read().await.unwrap_err();
        assert!(matches!(err, FileSourceError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/iiot/facts.toml"));
    }
}

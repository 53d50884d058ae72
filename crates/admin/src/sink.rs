//! Delivery of generated exports.
//!
//! The controller produces a payload and a filename; an `ExportSink` decides
//! what saving it means (a download, a file on disk, an upload).

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("export rejected: {0}")]
    Rejected(String),
}

/// Host capability that persists a payload as a downloadable file.
pub trait ExportSink {
    fn deliver(&self, payload: &[u8], filename: &str, mime_type: &str) -> Result<(), SinkError>;
}

/// Writes each export into a directory.
///
/// Path separators in the filename (localized dates such as `18/10/2026`)
/// are replaced with `-`.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where `filename` lands inside the directory.
    pub fn target(&self, filename: &str) -> PathBuf {
        let safe: String = filename
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
            .collect();
        self.dir.join(safe)
    }
}

impl ExportSink for DirectorySink {
    fn deliver(&self, payload: &[u8], filename: &str, mime_type: &str) -> Result<(), SinkError> {
        if filename.trim().is_empty() {
            return Err(SinkError::Rejected("empty filename".to_string()));
        }
        std::fs::create_dir_all(&self.dir)?;
        let target = self.target(filename);
        std::fs::write(&target, payload)?;
        tracing::info!(
            path = %target.display(),
            mime_type,
            bytes = payload.len(),
            "export written"
        );
        Ok(())
    }
}

/// A delivered export, as captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub filename: String,
    pub mime_type: String,
    pub payload: Vec<u8>,
}

/// Keeps deliveries in memory, for hosts that hand bytes on themselves.
#[derive(Debug, Default)]
pub struct MemorySink {
    deliveries: Mutex<Vec<Delivery>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ExportSink for MemorySink {
    fn deliver(&self, payload: &[u8], filename: &str, mime_type: &str) -> Result<(), SinkError> {
        self.deliveries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Delivery {
                filename: filename.to_string(),
                mime_type: mime_type.to_string(),
                payload: payload.to_vec(),
            });
        Ok(())
    }
}

//! Manifest reader/writer capability

use std::fs;
use std::path::{Path, PathBuf};

use super::Manifest;
use crate::error::{self, Result};

/// Reads and writes the project manifest
pub trait ManifestStore {
    /// Location of the manifest, for messages
    fn location(&self) -> &Path;

    /// Raw bytes currently in the manifest
    fn read_raw(&self) -> Result<Vec<u8>>;

    /// Parsed manifest
    fn read(&self) -> Result<Manifest> {
        let raw = self.read_raw()?;
        let origin = self.location().display().to_string();
        let content = String::from_utf8(raw)
            .map_err(|e| error::manifest_parse_failed(origin.as_str(), e.to_string()))?;
        Manifest::from_json(&origin, &content)
    }

    /// Replace the manifest with a serialized document
    fn write(&mut self, manifest: &Manifest) -> Result<()> {
        let content = manifest.to_json()?;
        self.write_raw(content.as_bytes())
    }

    /// Replace the manifest with exact bytes (used to restore a backup)
    fn write_raw(&mut self, raw: &[u8]) -> Result<()>;
}

/// Manifest stored as a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonManifestFile {
    path: PathBuf,
}

impl JsonManifestFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ManifestStore for JsonManifestFile {
    fn location(&self) -> &Path {
        &self.path
    }

    fn read_raw(&self) -> Result<Vec<u8>> {
        fs::read(&self.path)
            .map_err(|e| error::manifest_read_failed(self.path.display().to_string(), e.to_string()))
    }

    /// Temp file in the same directory, then renamed over the manifest
    fn write_raw(&mut self, raw: &[u8]) -> Result<()> {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| super::MANIFEST_FILE.to_string());
        let tmp_path = self.path.with_file_name(format!("{file_name}.tmp"));

        fs::write(&tmp_path, raw)
            .map_err(|e| error::manifest_write_failed(tmp_path.display().to_string(), e.to_string()))?;

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            error::manifest_write_failed(self.path.display().to_string(), e.to_string())
        })
    }
}

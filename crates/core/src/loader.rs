//! Loading YAML and JSON documents
//!
//! Site snapshots, request contexts and options files all share one loader;
//! the format is picked from the file extension.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Document loading errors
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Unsupported document type: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),
}

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(DocumentFormat::Json),
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Parse a document held in memory
    pub fn parse<T: DeserializeOwned>(&self, source: &str) -> Result<T, LoadError> {
        match self {
            DocumentFormat::Json => Ok(serde_json::from_str(source)?),
            DocumentFormat::Yaml => Ok(serde_yaml::from_str(source)?),
        }
    }
}

/// Read and parse a document from disk
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let format = DocumentFormat::from_path(path)?;
    let source = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), ?format, "loading document");
    format.parse(&source)
}

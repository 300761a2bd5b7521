// src/file/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use thiserror::Error;

pub mod snapshot;

pub use snapshot::RecommendationSnapshot;

pub const ALLOWED_EXTENSIONS: [&str; 3] = ["csv", "xlsx", "xls"];
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StagedFileError {
    #[error("Invalid file format. Please upload CSV or Excel files only.")]
    InvalidFormat,
    #[error("File too large. Maximum size is 16MB.")]
    TooLarge,
}

/// A file the user picked, before any validation.
#[derive(Debug, Clone, PartialEq)]
pub struct FileCandidate {
    pub name: String,
    pub size_bytes: u64,
    pub path: PathBuf,
}

impl FileCandidate {
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Could not read file: {}", path.display()))?;
        let name = path
            .file_name()
            .ok_or_else(|| anyhow!("Not a file: {}", path.display()))?
            .to_string_lossy()
            .into_owned();

        Ok(Self {
            name,
            size_bytes: metadata.len(),
            path: path.to_path_buf(),
        })
    }
}

/// A validated upload candidate, ready to be submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedFile {
    pub name: String,
    pub size_bytes: u64,
    pub extension: String,
    pub path: PathBuf,
}

impl StagedFile {
    pub fn validate(candidate: FileCandidate) -> std::result::Result<Self, StagedFileError> {
        let extension = candidate
            .name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
            .ok_or(StagedFileError::InvalidFormat)?;

        if candidate.size_bytes > MAX_UPLOAD_BYTES {
            return Err(StagedFileError::TooLarge);
        }

        Ok(Self {
            name: candidate.name,
            size_bytes: candidate.size_bytes,
            extension,
            path: candidate.path,
        })
    }
}

/// Human readable size, e.g. `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let mut exponent = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && exponent < UNITS.len() - 1 {
        value /= 1024.0;
        exponent += 1;
    }

    // Two decimals at most, without trailing zeros
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exponent])
}

/// Where exported reports land when the user does not pick a location.
pub fn default_download_path(file_name: &str) -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(file_name)
}

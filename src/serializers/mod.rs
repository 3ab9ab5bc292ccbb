// src/serializers/mod.rs
//
// File formats for the catalog
//
// RULES:
// - Encoding is deterministic and preserves input order
// - Decoding is all-or-nothing: one bad record rejects the file
// - Bad extension / missing file are reported before any parsing
// - Serializers never touch the repository

pub mod csv_serializer;
pub mod json_serializer;
pub mod load_errors;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::Entry;
use crate::error::{AppError, AppResult};

pub use csv_serializer::CsvSerializer;
pub use json_serializer::JsonSerializer;
pub use load_errors::{LoadErrors, RecordError, RecordFailure};

/// Repository -> file boundary
#[cfg_attr(test, mockall::automock)]
pub trait EntrySerializer: Send + Sync {
    fn format(&self) -> FileFormat;
    fn save(&self, entries: &[Entry], path: &Path) -> AppResult<()>;
    fn load(&self, path: &Path) -> AppResult<Vec<Entry>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Json,
}

impl FileFormat {
    /// File extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Json => "json",
        }
    }

    /// Case-insensitive lookup ("csv", "JSON", ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(FileFormat::Csv),
            "json" => Some(FileFormat::Json),
            _ => None,
        }
    }

    pub fn serializer(&self) -> Box<dyn EntrySerializer> {
        match self {
            FileFormat::Csv => Box::new(CsvSerializer::new()),
            FileFormat::Json => Box::new(JsonSerializer::new()),
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Csv => write!(f, "CSV"),
            FileFormat::Json => write!(f, "JSON"),
        }
    }
}

/// Checks run before a load reads anything.
///
/// The file name must carry exactly one suffix and it must be the format's
/// extension (`films.csv` is fine, `films.tar.csv` and `films` are not).
pub fn check_load_path(path: &Path, format: FileFormat) -> AppResult<()> {
    let expected = format.extension();
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    let single_extension = match file_name.rsplit_once('.') {
        Some((stem, extension)) => {
            extension.eq_ignore_ascii_case(expected) && !stem.contains('.')
        }
        None => false,
    };

    if !single_extension {
        log::warn!("Rejected {} file with bad extension: {}", format, path.display());
        return Err(AppError::InvalidExtension { expected });
    }

    if !path.is_file() {
        log::warn!("{} file not found: {}", format, path.display());
        return Err(AppError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

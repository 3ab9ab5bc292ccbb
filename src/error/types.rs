// src/error/types.rs
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::domain::DomainError;
use crate::serializers::LoadErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid entry: {0}")]
    Domain(#[from] DomainError),

    /// The edited entry would take the identity of another stored entry
    #[error("'{title}' would overwrite another entry already in the catalog")]
    IdentityConflict { title: String },

    /// The edit changes nothing that is allowed to change
    #[error("No changes were made to '{title}'")]
    NoChange { title: String },

    #[error("Invalid file format: the file must have a single .{expected} extension")]
    InvalidExtension { expected: &'static str },

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// One or more records failed; nothing was loaded
    #[error("{0}")]
    InvalidLoad(LoadErrors),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    /// Business-rule rejections of an edit
    pub fn is_edit_rejection(&self) -> bool {
        matches!(self, AppError::IdentityConflict { .. } | AppError::NoChange { .. })
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<LoadErrors> for AppError {
    fn from(errors: LoadErrors) -> Self {
        AppError::InvalidLoad(errors)
    }
}

pub type AppResult<T> = Result<T, AppError>;

// src/config.rs
//
// Catalog configuration
//
// PRINCIPLES:
// - Explicit values, no hidden globals
// - Environment overrides are read once, at construction
// - Directory creation only happens when asked for

use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::serializers::FileFormat;

/// Overrides the data directory
pub const DATA_DIR_VAR: &str = "FILMHUB_DATA_DIR";
/// Overrides the default file format ("csv" or "json")
pub const FORMAT_VAR: &str = "FILMHUB_FORMAT";

const APP_DIR_NAME: &str = "filmhub";
const CATALOG_FILE_STEM: &str = "catalog";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub data_dir: PathBuf,
    pub default_format: FileFormat,
}

impl CatalogConfig {
    pub fn new(data_dir: impl Into<PathBuf>, default_format: FileFormat) -> Self {
        Self {
            data_dir: data_dir.into(),
            default_format,
        }
    }

    /// Read the process environment.
    ///
    /// Path structure without override: {APP_DATA}/filmhub/catalog.<ext>
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an explicit variable source
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match lookup(DATA_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .ok_or_else(|| {
                    AppError::Other("Could not determine app data directory".to_string())
                })?
                .join(APP_DIR_NAME),
        };

        let default_format = match lookup(FORMAT_VAR) {
            Some(name) => FileFormat::from_name(&name).unwrap_or_else(|| {
                log::warn!("Ignoring {FORMAT_VAR}={name}, falling back to JSON");
                FileFormat::Json
            }),
            None => FileFormat::Json,
        };

        Ok(Self::new(data_dir, default_format))
    }

    /// `<data_dir>/catalog.<ext>` for the default format
    pub fn default_catalog_path(&self) -> PathBuf {
        self.catalog_path(self.default_format)
    }

    pub fn catalog_path(&self, format: FileFormat) -> PathBuf {
        self.data_dir
            .join(format!("{CATALOG_FILE_STEM}.{}", format.extension()))
    }

    /// Create the data directory if needed
    pub fn ensure_data_dir(&self) -> AppResult<&Path> {
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(self.data_dir.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_overrides() {
        let config = CatalogConfig::from_lookup(lookup_from(&[
            (DATA_DIR_VAR, "/tmp/films"),
            (FORMAT_VAR, "CSV"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/films"));
        assert_eq!(config.default_format, FileFormat::Csv);
        assert_eq!(
            config.default_catalog_path(),
            PathBuf::from("/tmp/films/catalog.csv")
        );
    }

    #[test]
    fn test_unknown_format_falls_back_to_json() {
        let config = CatalogConfig::from_lookup(lookup_from(&[
            (DATA_DIR_VAR, "/tmp/films"),
            (FORMAT_VAR, "xml"),
        ]))
        .unwrap();
        assert_eq!(config.default_format, FileFormat::Json);
        assert_eq!(
            config.catalog_path(FileFormat::Json),
            PathBuf::from("/tmp/films/catalog.json")
        );
    }

    #[test]
    fn test_ensure_data_dir_creates_nested() {
        let dir = tempdir().unwrap();
        let config = CatalogConfig::new(dir.path().join("a").join("b"), FileFormat::Json);
        let created = config.ensure_data_dir().unwrap();
        assert!(created.is_dir());
    }
}

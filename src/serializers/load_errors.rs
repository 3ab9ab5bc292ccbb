// src/serializers/load_errors.rs
//
// Per-record failure accounting shared by every format.
//
// A load scans the whole file, collects one line per failing record and
// only then decides: any failure rejects the file as a whole.

use std::collections::HashSet;

use thiserror::Error;

use super::FileFormat;
use crate::domain::{DomainError, Entry, EntryIdentity};
use crate::error::AppResult;

const LOAD_ERROR_HEADER: &str = "Unable to load file. Invalid entries found:";
const MISSING_TITLE: &str = "missing title";

/// Why a single record was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("malformed {0} record")]
    Malformed(FileFormat),

    #[error("invalid or incomplete data ({0})")]
    Invalid(#[from] DomainError),

    #[error("entry already present")]
    Duplicate,
}

/// A record that failed to become an Entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    /// Raw title, when the record got far enough to have one
    pub title: Option<String>,
    pub error: RecordError,
}

impl RecordFailure {
    pub fn malformed(format: FileFormat) -> Self {
        Self {
            title: None,
            error: RecordError::Malformed(format),
        }
    }

    pub fn invalid(title: &str, error: DomainError) -> Self {
        Self {
            title: Some(title.to_string()),
            error: RecordError::Invalid(error),
        }
    }
}

/// Aggregated per-record failures of one load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadErrors {
    lines: Vec<String>,
}

impl LoadErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single fatal problem that is not tied to a record
    pub fn single(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
        }
    }

    /// Record a failing record, e.g. "Row 3 (Heat): entry already present"
    pub fn record(&mut self, position: &str, failure: &RecordFailure) {
        let line = match (&failure.error, failure.title.as_deref()) {
            (RecordError::Malformed(_), _) => format!("{position}: {}", failure.error),
            (_, Some(title)) if !title.trim().is_empty() => {
                format!("{position} ({title}): {}", failure.error)
            }
            _ => format!("{position} ({MISSING_TITLE}): {}", failure.error),
        };
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

impl std::fmt::Display for LoadErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{LOAD_ERROR_HEADER}")?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Collects parsed records in file order and rejects repeated identities
#[derive(Debug, Default)]
pub(crate) struct RecordCollector {
    entries: Vec<Entry>,
    seen: HashSet<EntryIdentity>,
    errors: LoadErrors,
}

impl RecordCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn accept(&mut self, position: &str, parsed: Result<Entry, RecordFailure>) {
        match parsed {
            Ok(entry) => {
                if self.seen.insert(entry.identity()) {
                    self.entries.push(entry);
                } else {
                    let failure = RecordFailure {
                        title: Some(entry.title().to_string()),
                        error: RecordError::Duplicate,
                    };
                    log::warn!("{position}: duplicate of an earlier record ({})", entry.identity());
                    self.errors.record(position, &failure);
                }
            }
            Err(failure) => {
                log::warn!("{position}: rejected ({})", failure.error);
                self.errors.record(position, &failure);
            }
        }
    }

    /// All records, or every failure if there was at least one
    pub(crate) fn finish(self) -> AppResult<Vec<Entry>> {
        if self.errors.is_empty() {
            Ok(self.entries)
        } else {
            Err(self.errors.into())
        }
    }
}

// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod entry;
pub mod sorting;
pub mod status;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Entry Domain
pub use entry::{
    parse_rating, rating_display, Entry, EntryFields, EntryIdentity, ViewStatus, MAX_RATING,
    UNRATED_LABEL,
};

// Sorting
pub use sorting::{sort_entries, SortKey};

// Operation outcome for save/load
pub use status::Status;

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Field-level validation errors.
/// Raised when an Entry is constructed or mutated with an invalid value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("The {field} cannot be empty")]
    EmptyField { field: &'static str },

    #[error("The release year must be in YYYY format, got '{value}'")]
    InvalidYearFormat { value: String },

    #[error("The rating must be between 0 and {max}, got {value}")]
    RatingOutOfRange { value: i64, max: u8 },

    #[error("The rating must be an integer between 0 and 5 or 'unrated', got '{value}'")]
    InvalidRating { value: String },

    #[error("The view status cannot be missing")]
    MissingViewStatus,

    #[error("Unknown view status: '{value}'")]
    UnknownViewStatus { value: String },
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

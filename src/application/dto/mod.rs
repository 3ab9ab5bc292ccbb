// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs are simple, serializable structs
// - Incoming DTOs are parsed into requests, never trusted as entities

use serde::{Deserialize, Serialize};

use crate::domain::{Entry, SortKey, ViewStatus};
use crate::error::AppResult;
use crate::services::{
    CreateEntryRequest, FilterCriteria, HistoryState, SearchField, UpdateEntryRequest,
};

// ============================================================================
// ENTRY DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDto {
    pub title: String,
    pub creator: String,
    pub release_year: String,
    pub category: String,
    pub rating: u8,
    pub rating_display: String,
    /// Internal name, e.g. "TO_WATCH"
    pub view_status: String,
    /// Human label, e.g. "To watch"
    pub view_status_label: String,
}

/// Add/edit form content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryFormDto {
    pub title: String,
    pub creator: String,
    pub release_year: String,
    pub category: String,
    pub rating: i64,
    /// Name or label; empty means not chosen
    pub view_status: Option<String>,
}

impl EntryFormDto {
    fn parse_view_status(&self) -> AppResult<Option<ViewStatus>> {
        match self.view_status.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => Ok(Some(ViewStatus::parse(value)?)),
        }
    }

    pub fn into_create_request(self) -> AppResult<CreateEntryRequest> {
        let view_status = self.parse_view_status()?;
        Ok(CreateEntryRequest {
            title: self.title,
            creator: self.creator,
            release_year: self.release_year,
            category: self.category,
            rating: self.rating,
            view_status,
        })
    }

    pub fn into_update_request(self) -> AppResult<UpdateEntryRequest> {
        let view_status = self.parse_view_status()?;
        Ok(UpdateEntryRequest {
            title: self.title,
            creator: self.creator,
            release_year: self.release_year,
            category: self.category,
            rating: self.rating,
            view_status,
        })
    }
}

// ============================================================================
// QUERY DTOs
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryDto {
    pub text: Option<String>,
    #[serde(default)]
    pub field: SearchField,
    #[serde(default)]
    pub criteria: FilterCriteria,
    /// Sort key such as "title-asc"; unknown keys leave the order alone
    pub sort: Option<String>,
}

impl QueryDto {
    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort.as_deref().and_then(SortKey::from_key)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortOptionDto {
    pub key: String,
    pub label: String,
}

/// Values for the filter and sort drop-downs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOptionsDto {
    pub categories: Vec<String>,
    pub creators: Vec<String>,
    pub years: Vec<String>,
    pub view_statuses: Vec<String>,
    pub sort_options: Vec<SortOptionDto>,
}

// ============================================================================
// HISTORY DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStateDto {
    pub can_undo: bool,
    pub can_redo: bool,
    pub undo_description: Option<String>,
    pub redo_description: Option<String>,
}

// ============================================================================
// CONVERSION HELPERS
// ============================================================================

impl From<&Entry> for EntryDto {
    fn from(entry: &Entry) -> Self {
        Self {
            title: entry.title().to_string(),
            creator: entry.creator().to_string(),
            release_year: entry.release_year().to_string(),
            category: entry.category().to_string(),
            rating: entry.rating(),
            rating_display: entry.rating_display(),
            view_status: entry.view_status().name().to_string(),
            view_status_label: entry.view_status_display().to_string(),
        }
    }
}

impl TryFrom<&EntryDto> for Entry {
    type Error = crate::error::AppError;

    fn try_from(dto: &EntryDto) -> AppResult<Self> {
        Ok(Entry::new(
            dto.title.clone(),
            dto.creator.clone(),
            dto.release_year.clone(),
            dto.category.clone(),
            i64::from(dto.rating),
            ViewStatus::parse(&dto.view_status)?,
        )?)
    }
}

impl From<HistoryState> for HistoryStateDto {
    fn from(state: HistoryState) -> Self {
        Self {
            can_undo: state.can_undo,
            can_redo: state.can_redo,
            undo_description: state.undo_description,
            redo_description: state.redo_description,
        }
    }
}

impl From<SortKey> for SortOptionDto {
    fn from(key: SortKey) -> Self {
        Self {
            key: key.key().to_string(),
            label: key.label().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::error::AppError;

    #[test]
    fn test_entry_dto_round_trip() {
        let entry = Entry::new("Heat", "M. Mann", "1995", "Crime", 0, ViewStatus::ToWatch).unwrap();
        let dto = EntryDto::from(&entry);
        assert_eq!(dto.rating_display, "unrated");
        assert_eq!(dto.view_status, "TO_WATCH");
        assert_eq!(dto.view_status_label, "To watch");

        let back = Entry::try_from(&dto).unwrap();
        assert!(back.same_fields(&entry));
    }

    #[test]
    fn test_form_view_status() {
        let form = EntryFormDto {
            view_status: Some("watching".to_string()),
            ..Default::default()
        };
        let request = form.into_create_request().unwrap();
        assert_eq!(request.view_status, Some(ViewStatus::Watching));

        let blank = EntryFormDto {
            view_status: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(blank.into_update_request().unwrap().view_status, None);

        let bad = EntryFormDto {
            view_status: Some("seen".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            bad.into_create_request(),
            Err(AppError::Domain(DomainError::UnknownViewStatus { .. }))
        ));
    }

    #[test]
    fn test_query_sort_key() {
        let query = QueryDto {
            sort: Some("Rating-Desc".to_string()),
            ..Default::default()
        };
        assert_eq!(query.sort_key(), Some(SortKey::RatingDesc));
        assert_eq!(QueryDto::default().sort_key(), None);
    }
}

// src/services/filter.rs
//
// Query building blocks for the catalog facade

use serde::{Deserialize, Serialize};

use crate::domain::{Entry, ViewStatus};

/// Which text field a free-text search looks at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    #[default]
    Title,
    Creator,
}

/// Optional filters, all of which must match.
/// `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Exact match, ignoring case
    pub category: Option<String>,
    /// Substring match, ignoring case
    pub creator: Option<String>,
    pub release_year: Option<String>,
    pub view_status: Option<ViewStatus>,
    /// 0 selects unrated entries
    pub rating: Option<u8>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        *self == FilterCriteria::default()
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        let category_ok = self
            .category
            .as_ref()
            .map_or(true, |c| entry.category().to_lowercase() == c.to_lowercase());
        let creator_ok = self
            .creator
            .as_ref()
            .map_or(true, |c| entry.creator().to_lowercase().contains(&c.to_lowercase()));
        let year_ok = self
            .release_year
            .as_ref()
            .map_or(true, |y| entry.release_year() == y);
        let status_ok = self.view_status.map_or(true, |s| entry.view_status() == s);
        let rating_ok = self.rating.map_or(true, |r| entry.rating() == r);

        category_ok && creator_ok && year_ok && status_ok && rating_ok
    }

    /// Keep the matching entries, in order
    pub fn apply(&self, entries: Vec<Entry>) -> Vec<Entry> {
        if self.is_empty() {
            return entries;
        }
        entries.into_iter().filter(|e| self.matches(e)).collect()
    }
}

// src/domain/sorting.rs
//
// Sort strategies
//
// Eight stateless orders over entries, selected by key.
// All of them are stable: entries with equal keys keep their input order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::entry::Entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    TitleAsc,
    TitleDesc,
    CreatorAsc,
    CreatorDesc,
    RatingAsc,
    RatingDesc,
    YearAsc,
    YearDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 8] = [
        SortKey::TitleAsc,
        SortKey::TitleDesc,
        SortKey::CreatorAsc,
        SortKey::CreatorDesc,
        SortKey::RatingAsc,
        SortKey::RatingDesc,
        SortKey::YearAsc,
        SortKey::YearDesc,
    ];

    /// Stable machine key, e.g. "title-asc"
    pub fn key(&self) -> &'static str {
        match self {
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
            SortKey::CreatorAsc => "creator-asc",
            SortKey::CreatorDesc => "creator-desc",
            SortKey::RatingAsc => "rating-asc",
            SortKey::RatingDesc => "rating-desc",
            SortKey::YearAsc => "year-asc",
            SortKey::YearDesc => "year-desc",
        }
    }

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::TitleAsc => "Title (A-Z)",
            SortKey::TitleDesc => "Title (Z-A)",
            SortKey::CreatorAsc => "Creator (A-Z)",
            SortKey::CreatorDesc => "Creator (Z-A)",
            SortKey::RatingAsc => "Rating (1-5)",
            SortKey::RatingDesc => "Rating (5-1)",
            SortKey::YearAsc => "Release year (ASC)",
            SortKey::YearDesc => "Release year (DESC)",
        }
    }

    /// Case-insensitive lookup by key; unknown keys select no strategy
    pub fn from_key(key: &str) -> Option<Self> {
        let wanted = key.trim();
        Self::ALL
            .into_iter()
            .find(|sort_key| sort_key.key().eq_ignore_ascii_case(wanted))
    }

    pub fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        match self {
            SortKey::TitleAsc => compare_ignore_case(a.title(), b.title()),
            SortKey::TitleDesc => compare_ignore_case(b.title(), a.title()),
            SortKey::CreatorAsc => compare_ignore_case(a.creator(), b.creator()),
            SortKey::CreatorDesc => compare_ignore_case(b.creator(), a.creator()),
            SortKey::RatingAsc => a.rating().cmp(&b.rating()),
            SortKey::RatingDesc => b.rating().cmp(&a.rating()),
            // four-digit strings order the same as the numbers
            SortKey::YearAsc => a.release_year().cmp(b.release_year()),
            SortKey::YearDesc => b.release_year().cmp(a.release_year()),
        }
    }

    /// Sort in place (stable)
    pub fn sort(&self, entries: &mut [Entry]) {
        entries.sort_by(|a, b| self.compare(a, b));
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Returns a sorted copy; `None` returns the entries unchanged
pub fn sort_entries(entries: &[Entry], key: Option<SortKey>) -> Vec<Entry> {
    let mut sorted = entries.to_vec();
    if let Some(key) = key {
        key.sort(&mut sorted);
    }
    sorted
}

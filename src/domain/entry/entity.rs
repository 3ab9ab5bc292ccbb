use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::invariants::{
    rating_display, validate_category, validate_creator, validate_rating, validate_release_year,
    validate_title, validate_view_status,
};
use crate::domain::{DomainError, DomainResult};

/// A single film in the personal catalog.
///
/// Every field is validated on construction and by every setter, so an
/// `Entry` value is always valid. Equality and hashing only look at the
/// identity triple (title, creator, release year), compared case-insensitively.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    title: String,
    creator: String,
    release_year: String,
    category: String,
    /// 0 = unrated, 1..=5 = stars
    rating: u8,
    view_status: ViewStatus,
}

/// Viewing state of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewStatus {
    ToWatch,
    Watching,
    Watched,
}

/// Raw, unvalidated field values.
/// This is what commands and serializers hold before an Entry exists.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntryFields {
    pub title: String,
    pub creator: String,
    pub release_year: String,
    pub category: String,
    pub rating: i64,
    pub view_status: Option<ViewStatus>,
}

/// Case-folded identity triple of an entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryIdentity {
    pub title: String,
    pub creator: String,
    pub release_year: String,
}

impl Entry {
    /// Create a new Entry.
    /// Fails on the first invalid field; no partially-built entry escapes.
    pub fn new(
        title: impl Into<String>,
        creator: impl Into<String>,
        release_year: impl Into<String>,
        category: impl Into<String>,
        rating: i64,
        view_status: ViewStatus,
    ) -> DomainResult<Self> {
        Self::from_fields(EntryFields {
            title: title.into(),
            creator: creator.into(),
            release_year: release_year.into(),
            category: category.into(),
            rating,
            view_status: Some(view_status),
        })
    }

    /// Build an Entry from raw field values
    pub fn from_fields(fields: EntryFields) -> DomainResult<Self> {
        validate_title(&fields.title)?;
        validate_creator(&fields.creator)?;
        validate_release_year(&fields.release_year)?;
        validate_category(&fields.category)?;
        let rating = validate_rating(fields.rating)?;
        let view_status = validate_view_status(fields.view_status)?;

        Ok(Self {
            title: fields.title,
            creator: fields.creator,
            release_year: fields.release_year,
            category: fields.category,
            rating,
            view_status,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn creator(&self) -> &str {
        &self.creator
    }

    pub fn release_year(&self) -> &str {
        &self.release_year
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn view_status(&self) -> ViewStatus {
        self.view_status
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> DomainResult<()> {
        let title = title.into();
        validate_title(&title)?;
        self.title = title;
        Ok(())
    }

    pub fn set_creator(&mut self, creator: impl Into<String>) -> DomainResult<()> {
        let creator = creator.into();
        validate_creator(&creator)?;
        self.creator = creator;
        Ok(())
    }

    pub fn set_release_year(&mut self, release_year: impl Into<String>) -> DomainResult<()> {
        let release_year = release_year.into();
        validate_release_year(&release_year)?;
        self.release_year = release_year;
        Ok(())
    }

    pub fn set_category(&mut self, category: impl Into<String>) -> DomainResult<()> {
        let category = category.into();
        validate_category(&category)?;
        self.category = category;
        Ok(())
    }

    pub fn set_rating(&mut self, rating: i64) -> DomainResult<()> {
        self.rating = validate_rating(rating)?;
        Ok(())
    }

    pub fn set_view_status(&mut self, view_status: Option<ViewStatus>) -> DomainResult<()> {
        self.view_status = validate_view_status(view_status)?;
        Ok(())
    }

    /// "unrated" for 0, otherwise the digit
    pub fn rating_display(&self) -> String {
        rating_display(self.rating)
    }

    /// Human label of the view status
    pub fn view_status_display(&self) -> &'static str {
        self.view_status.label()
    }

    /// Identity triple, case-folded
    pub fn identity(&self) -> EntryIdentity {
        EntryIdentity {
            title: self.title.to_lowercase(),
            creator: self.creator.to_lowercase(),
            release_year: self.release_year.to_lowercase(),
        }
    }

    /// True when category, rating and view status match.
    /// Category is compared ignoring case.
    pub fn same_details(&self, other: &Entry) -> bool {
        self.category.to_lowercase() == other.category.to_lowercase()
            && self.rating == other.rating
            && self.view_status == other.view_status
    }

    /// Field-by-field equality, unlike `==` which only compares identity
    pub fn same_fields(&self, other: &Entry) -> bool {
        self.title == other.title
            && self.creator == other.creator
            && self.release_year == other.release_year
            && self.category == other.category
            && self.rating == other.rating
            && self.view_status == other.view_status
    }

    /// Raw field values of this entry
    pub fn to_fields(&self) -> EntryFields {
        EntryFields {
            title: self.title.clone(),
            creator: self.creator.clone(),
            release_year: self.release_year.clone(),
            category: self.category.clone(),
            rating: i64::from(self.rating),
            view_status: Some(self.view_status),
        }
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Entry {}

impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, {}) [{}] {} - {}",
            self.title,
            self.creator,
            self.release_year,
            self.category,
            self.rating_display(),
            self.view_status.label()
        )
    }
}

impl ViewStatus {
    pub const ALL: [ViewStatus; 3] = [
        ViewStatus::ToWatch,
        ViewStatus::Watching,
        ViewStatus::Watched,
    ];

    /// Internal name, used by both file formats
    pub fn name(&self) -> &'static str {
        match self {
            ViewStatus::ToWatch => "TO_WATCH",
            ViewStatus::Watching => "WATCHING",
            ViewStatus::Watched => "WATCHED",
        }
    }

    /// Human label
    pub fn label(&self) -> &'static str {
        match self {
            ViewStatus::ToWatch => "To watch",
            ViewStatus::Watching => "Watching",
            ViewStatus::Watched => "Watched",
        }
    }

    /// Case-insensitive lookup by human label
    pub fn from_label(label: &str) -> DomainResult<Self> {
        let wanted = label.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::UnknownViewStatus {
                value: label.to_string(),
            })
    }

    /// Accepts the internal name or the human label, ignoring case
    pub fn parse(value: &str) -> DomainResult<Self> {
        let wanted = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.name().eq_ignore_ascii_case(wanted))
            .map_or_else(|| Self::from_label(wanted), Ok)
    }
}

impl std::fmt::Display for ViewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::fmt::Display for EntryIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.title, self.creator, self.release_year)
    }
}

use std::sync::LazyLock;

use regex::Regex;

use super::entity::ViewStatus;
use crate::domain::{DomainError, DomainResult};

/// Highest star rating; 0 means unrated
pub const MAX_RATING: u8 = 5;

/// Display label of rating 0
pub const UNRATED_LABEL: &str = "unrated";

static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("release year pattern is valid"));

fn validate_not_blank(value: &str, field: &'static str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyField { field });
    }
    Ok(())
}

pub(crate) fn validate_title(title: &str) -> DomainResult<()> {
    validate_not_blank(title, "title")
}

pub(crate) fn validate_creator(creator: &str) -> DomainResult<()> {
    validate_not_blank(creator, "creator")
}

pub(crate) fn validate_category(category: &str) -> DomainResult<()> {
    validate_not_blank(category, "category")
}

/// Exactly four ASCII digits
pub(crate) fn validate_release_year(release_year: &str) -> DomainResult<()> {
    if !YEAR_PATTERN.is_match(release_year) {
        return Err(DomainError::InvalidYearFormat {
            value: release_year.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn validate_rating(rating: i64) -> DomainResult<u8> {
    u8::try_from(rating)
        .ok()
        .filter(|value| *value <= MAX_RATING)
        .ok_or(DomainError::RatingOutOfRange {
            value: rating,
            max: MAX_RATING,
        })
}

pub(crate) fn validate_view_status(view_status: Option<ViewStatus>) -> DomainResult<ViewStatus> {
    view_status.ok_or(DomainError::MissingViewStatus)
}

/// "unrated" for 0, otherwise the digit
pub fn rating_display(rating: u8) -> String {
    if rating == 0 {
        UNRATED_LABEL.to_string()
    } else {
        rating.to_string()
    }
}

/// Parse a rating as written in a file or form.
///
/// Accepts "unrated" (any case), "0", or an integer in 0..=5.
pub fn parse_rating(value: &str) -> DomainResult<u8> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case(UNRATED_LABEL) || trimmed == "0" {
        return Ok(0);
    }

    let parsed: i64 = trimmed.parse().map_err(|_| DomainError::InvalidRating {
        value: trimmed.to_string(),
    })?;
    validate_rating(parsed)
}

/// Entry invariants:
///
/// 1. Title, creator and category are never blank
/// 2. Release year is exactly four digits
/// 3. Rating is within 0..=5, 0 meaning unrated
/// 4. View status is always present
/// 5. Identity is (title, creator, year), case-insensitive
/// 6. Category, rating and view status never affect identity

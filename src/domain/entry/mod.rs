pub mod entity;
pub mod invariants;

pub use entity::{Entry, EntryFields, EntryIdentity, ViewStatus};
pub use invariants::{parse_rating, rating_display, MAX_RATING, UNRATED_LABEL};

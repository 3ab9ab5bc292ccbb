// events/types.rs
//
// All catalog events.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use crate::serializers::FileFormat;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// ENTRY EVENTS
// ============================================================================

/// Emitted when a new entry is added through the facade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub title: String,
    pub creator: String,
    pub release_year: String,
}

impl EntryAdded {
    pub fn new(title: String, creator: String, release_year: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            title,
            creator,
            release_year,
        }
    }
}

impl DomainEvent for EntryAdded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "EntryAdded" }
}

/// Emitted when an edit through the facade replaced an entry in place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub previous_title: String,
    pub title: String,
}

impl EntryUpdated {
    pub fn new(previous_title: String, title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            previous_title,
            title,
        }
    }
}

impl DomainEvent for EntryUpdated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "EntryUpdated" }
}

/// Emitted when an entry is removed through the facade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryRemoved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub title: String,
    pub creator: String,
}

impl EntryRemoved {
    pub fn new(title: String, creator: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            title,
            creator,
        }
    }
}

impl DomainEvent for EntryRemoved {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "EntryRemoved" }
}

// ============================================================================
// CATALOG EVENTS
// ============================================================================

/// Emitted after a load replaced the whole catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogLoaded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub path: PathBuf,
    pub format: FileFormat,
    pub entry_count: usize,
}

impl CatalogLoaded {
    pub fn new(path: PathBuf, format: FileFormat, entry_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            path,
            format,
            entry_count,
        }
    }
}

impl DomainEvent for CatalogLoaded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "CatalogLoaded" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSaved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub path: PathBuf,
    pub format: FileFormat,
    pub entry_count: usize,
}

impl CatalogSaved {
    pub fn new(path: PathBuf, format: FileFormat, entry_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            path,
            format,
            entry_count,
        }
    }
}

impl DomainEvent for CatalogSaved {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "CatalogSaved" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogCleared {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub removed_count: usize,
}

impl CatalogCleared {
    pub fn new(removed_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            removed_count,
        }
    }
}

impl DomainEvent for CatalogCleared {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "CatalogCleared" }
}

// ============================================================================
// HISTORY EVENTS
// ============================================================================

/// Emitted after every recorded mutation, undo, redo, load and clear
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl HistoryChanged {
    pub fn new(can_undo: bool, can_redo: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            can_undo,
            can_redo,
        }
    }
}

impl DomainEvent for HistoryChanged {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "HistoryChanged" }
}

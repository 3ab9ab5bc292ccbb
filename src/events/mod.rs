// events/mod.rs
//
// Internal Event System - Public API

pub mod bus;
pub mod types;

// ============================================================================
// PUBLIC EXPORTS - Event Types and Bus Only
// ============================================================================

pub use types::DomainEvent;

pub use types::{
    // Catalog
    CatalogCleared,
    CatalogLoaded,
    CatalogSaved,
    // Entry
    EntryAdded,
    EntryRemoved,
    EntryUpdated,
    // History
    HistoryChanged,
};

pub use bus::{EventBus, EventLogEntry};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}

// src/lib.rs
// FilmHub - Local-first personal film catalog
//
// Architecture:
// - Domain-centric: entries validate themselves, nothing invalid is ever stored
// - Repository owns the collection; serializers own the file formats
// - Every mutation is a reversible command recorded by the history manager
// - Event-driven: the facade announces applied changes on the event bus
// - Application Layer: DTO boundary for whatever shell renders the catalog

// ============================================================================
// CATALOG ENGINE
// ============================================================================

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod history;
pub mod repositories;
pub mod serializers;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    parse_rating,
    rating_display,
    sort_entries,
    DomainError,
    DomainResult,
    Entry,
    EntryFields,
    EntryIdentity,
    SortKey,
    Status,
    ViewStatus,
    MAX_RATING,
    UNRATED_LABEL,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    CatalogCleared,
    CatalogLoaded,
    CatalogSaved,
    DomainEvent,
    EntryAdded,
    EntryRemoved,
    EntryUpdated,
    EventBus,
    EventLogEntry,
    HistoryChanged,
};

// ============================================================================
// PUBLIC API - Persistence
// ============================================================================

pub use repositories::{EntryRepository, InMemoryEntryRepository};
pub use serializers::{
    CsvSerializer, EntrySerializer, FileFormat, JsonSerializer, LoadErrors, RecordError,
    RecordFailure,
};

// ============================================================================
// PUBLIC API - History & Services
// ============================================================================

pub use config::CatalogConfig;
pub use history::{CatalogCommand, HistoryManager};
pub use services::{
    CatalogService, CreateEntryRequest, FilterCriteria, HistoryState, SearchField,
    UpdateEntryRequest,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, ErrorResponse, ErrorType};

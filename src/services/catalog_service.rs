// src/services/catalog_service.rs
//
// Catalog facade
//
// RULES:
// - Every mutation goes through the history manager
// - Queries run search -> filter -> sort on copies
// - save/load report a Status, they never return an error
// - Events are emitted only after a change actually applied

use std::path::Path;
use std::sync::Arc;

use crate::config::CatalogConfig;
use crate::domain::{Entry, EntryFields, SortKey, Status, ViewStatus};
use crate::error::{AppError, AppResult};
use crate::events::{
    CatalogCleared, CatalogLoaded, CatalogSaved, EntryAdded, EntryRemoved, EntryUpdated,
    EventBus, HistoryChanged,
};
use crate::history::{CatalogCommand, HistoryManager};
use crate::repositories::{EntryRepository, InMemoryEntryRepository};
use crate::serializers::FileFormat;

use super::filter::{FilterCriteria, SearchField};

#[derive(Debug, Clone, Default)]
pub struct CreateEntryRequest {
    pub title: String,
    pub creator: String,
    pub release_year: String,
    pub category: String,
    pub rating: i64,
    pub view_status: Option<ViewStatus>,
}

/// Full replacement values for the selected entry
#[derive(Debug, Clone, Default)]
pub struct UpdateEntryRequest {
    pub title: String,
    pub creator: String,
    pub release_year: String,
    pub category: String,
    pub rating: i64,
    pub view_status: Option<ViewStatus>,
}

impl From<CreateEntryRequest> for EntryFields {
    fn from(request: CreateEntryRequest) -> Self {
        Self {
            title: request.title,
            creator: request.creator,
            release_year: request.release_year,
            category: request.category,
            rating: request.rating,
            view_status: request.view_status,
        }
    }
}

impl From<UpdateEntryRequest> for EntryFields {
    fn from(request: UpdateEntryRequest) -> Self {
        Self {
            title: request.title,
            creator: request.creator,
            release_year: request.release_year,
            category: request.category,
            rating: request.rating,
            view_status: request.view_status,
        }
    }
}

/// Undo/redo availability, for enabling menu items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryState {
    pub can_undo: bool,
    pub can_redo: bool,
    pub undo_description: Option<String>,
    pub redo_description: Option<String>,
}

pub struct CatalogService {
    repository: Box<dyn EntryRepository>,
    history: HistoryManager,
    event_bus: Arc<EventBus>,
    config: CatalogConfig,
}

impl CatalogService {
    pub fn new(
        repository: Box<dyn EntryRepository>,
        event_bus: Arc<EventBus>,
        config: CatalogConfig,
    ) -> Self {
        Self {
            repository,
            history: HistoryManager::new(),
            event_bus,
            config,
        }
    }

    /// Empty in-memory catalog with the built-in serializers
    pub fn in_memory(event_bus: Arc<EventBus>, config: CatalogConfig) -> Self {
        Self::new(Box::new(InMemoryEntryRepository::new()), event_bus, config)
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn list_entries(&self) -> Vec<Entry> {
        self.repository.list()
    }

    pub fn len(&self) -> usize {
        self.repository.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repository.is_empty()
    }

    /// Blank text returns the whole catalog
    pub fn search(&self, text: Option<&str>, field: SearchField) -> Vec<Entry> {
        match field {
            SearchField::Title => self.repository.find_by_title(text),
            SearchField::Creator => self.repository.find_by_creator(text),
        }
    }

    pub fn filter(&self, entries: Vec<Entry>, criteria: &FilterCriteria) -> Vec<Entry> {
        criteria.apply(entries)
    }

    pub fn sort(&self, entries: &[Entry], key: Option<SortKey>) -> Vec<Entry> {
        self.repository.sort(entries, key)
    }

    /// search -> filter -> sort
    pub fn query(
        &self,
        text: Option<&str>,
        field: SearchField,
        criteria: &FilterCriteria,
        key: Option<SortKey>,
    ) -> Vec<Entry> {
        let found = self.search(text, field);
        let filtered = self.filter(found, criteria);
        self.sort(&filtered, key)
    }

    pub fn unique_categories(&self) -> Vec<String> {
        self.repository.unique_categories()
    }

    pub fn unique_creators(&self) -> Vec<String> {
        self.repository.unique_creators()
    }

    pub fn unique_years(&self) -> Vec<String> {
        self.repository.unique_years()
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Ok(false) when an entry with the same identity already exists
    pub fn add_entry(&mut self, request: CreateEntryRequest) -> AppResult<bool> {
        let added = self
            .history
            .run(CatalogCommand::add(request.into()), self.repository.as_mut())?;

        if added {
            if let Some(entry) = self.history.last_applied().and_then(CatalogCommand::produced) {
                self.event_bus.emit(EntryAdded::new(
                    entry.title().to_string(),
                    entry.creator().to_string(),
                    entry.release_year().to_string(),
                ));
            }
            self.emit_history_changed();
        }
        Ok(added)
    }

    /// Ok(false) when `selected` is no longer in the catalog
    pub fn edit_entry(&mut self, selected: &Entry, request: UpdateEntryRequest) -> AppResult<bool> {
        let edited = self.history.run(
            CatalogCommand::edit(selected.clone(), request.into()),
            self.repository.as_mut(),
        )?;

        if edited {
            if let Some(entry) = self.history.last_applied().and_then(CatalogCommand::produced) {
                self.event_bus.emit(EntryUpdated::new(
                    selected.title().to_string(),
                    entry.title().to_string(),
                ));
            }
            self.emit_history_changed();
        }
        Ok(edited)
    }

    pub fn remove_entry(&mut self, entry: &Entry) -> bool {
        let removed = self
            .history
            .run(CatalogCommand::remove(entry.clone()), self.repository.as_mut())
            .unwrap_or_else(|e| {
                log::warn!("Remove of '{}' failed: {}", entry.title(), e);
                false
            });

        if removed {
            self.event_bus.emit(EntryRemoved::new(
                entry.title().to_string(),
                entry.creator().to_string(),
            ));
            self.emit_history_changed();
        }
        removed
    }

    /// Empty the catalog. Not undoable, so history is dropped too.
    pub fn clear(&mut self) {
        let removed_count = self.repository.len();
        self.repository.clear();
        self.history.clear();
        log::info!("Catalog cleared ({removed_count} entries)");
        self.event_bus.emit(CatalogCleared::new(removed_count));
        self.emit_history_changed();
    }

    // ------------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------------

    /// Entry events are not emitted here, only `HistoryChanged`.
    /// The stacks move even when the inverse step fails.
    pub fn undo(&mut self) -> AppResult<bool> {
        let outcome = self.history.undo(self.repository.as_mut());
        if !matches!(outcome, Ok(false)) {
            self.emit_history_changed();
        }
        outcome
    }

    pub fn redo(&mut self) -> AppResult<bool> {
        let outcome = self.history.redo(self.repository.as_mut());
        if !matches!(outcome, Ok(false)) {
            self.emit_history_changed();
        }
        outcome
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn describe_undo(&self) -> Option<String> {
        self.history.describe_undo()
    }

    pub fn describe_redo(&self) -> Option<String> {
        self.history.describe_redo()
    }

    pub fn history_state(&self) -> HistoryState {
        HistoryState {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            undo_description: self.describe_undo(),
            redo_description: self.describe_redo(),
        }
    }

    fn emit_history_changed(&self) {
        self.event_bus
            .emit(HistoryChanged::new(self.can_undo(), self.can_redo()));
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    pub fn save(&self, path: &Path, format: FileFormat) -> Status {
        match self.repository.save_as(path, format) {
            Ok(()) => {
                self.event_bus.emit(CatalogSaved::new(
                    path.to_path_buf(),
                    format,
                    self.repository.len(),
                ));
                Status::ok(format!("Catalog saved as {format} to: {}", path.display()))
            }
            Err(e) => {
                log::warn!("Save to {} failed: {e}", path.display());
                Status::failed(format!("Error while saving the catalog: {e}"))
            }
        }
    }

    /// Replace the catalog with the file's content; history is dropped on success
    pub fn load(&mut self, path: &Path, format: FileFormat) -> Status {
        match self.repository.load_from(path, format) {
            Ok(count) => {
                self.history.clear();
                log::info!("Catalog loaded from {} ({count} entries)", path.display());
                self.event_bus
                    .emit(CatalogLoaded::new(path.to_path_buf(), format, count));
                self.emit_history_changed();
                Status::ok(format!("Catalog loaded from: {}", path.display()))
            }
            Err(e) => {
                log::warn!("Load from {} failed: {e}", path.display());
                Status::failed(format!("Error while loading the catalog: {e}"))
            }
        }
    }

    /// `save` with the format given by name ("csv", "JSON", ...)
    pub fn save_named(&self, path: &Path, format: &str) -> Status {
        match FileFormat::from_name(format) {
            Some(format) => self.save(path, format),
            None => Self::unsupported_format(format),
        }
    }

    pub fn load_named(&mut self, path: &Path, format: &str) -> Status {
        match FileFormat::from_name(format) {
            Some(format) => self.load(path, format),
            None => Self::unsupported_format(format),
        }
    }

    fn unsupported_format(name: &str) -> Status {
        let error = AppError::UnsupportedFormat(name.to_string());
        log::warn!("{error}");
        Status::failed(error.to_string())
    }

    /// Save to the configured catalog file, creating its directory
    pub fn save_default(&self) -> Status {
        if let Err(e) = self.config.ensure_data_dir() {
            return Status::failed(format!("Error while saving the catalog: {e}"));
        }
        let format = self.config.default_format;
        self.save(&self.config.catalog_path(format), format)
    }

    pub fn load_default(&mut self) -> Status {
        let format = self.config.default_format;
        let path = self.config.catalog_path(format);
        self.load(&path, format)
    }
}

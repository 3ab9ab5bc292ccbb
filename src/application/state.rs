// src/application/state.rs
//
// Composition root. The shell builds one AppState at startup and hands it
// to every command handler.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::CatalogConfig;
use crate::error::{AppError, AppResult};
use crate::events::EventBus;
use crate::services::CatalogService;

/// Application state shared with the shell.
/// The catalog sits behind a mutex: its check-then-act sequences
/// (edit, undo, redo) must not interleave.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub catalog: Arc<Mutex<CatalogService>>,
}

impl AppState {
    pub fn new(config: CatalogConfig) -> Self {
        let event_bus = Arc::new(EventBus::new());
        let catalog = CatalogService::in_memory(Arc::clone(&event_bus), config);
        Self {
            event_bus,
            catalog: Arc::new(Mutex::new(catalog)),
        }
    }

    pub fn from_env() -> AppResult<Self> {
        Ok(Self::new(CatalogConfig::from_env()?))
    }

    pub fn catalog(&self) -> AppResult<MutexGuard<'_, CatalogService>> {
        self.catalog
            .lock()
            .map_err(|_| AppError::Other("Catalog lock poisoned".to_string()))
    }
}

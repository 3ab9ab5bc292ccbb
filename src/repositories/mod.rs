// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - The repository owns the only authoritative collection
// - Identity uniqueness is enforced here, field validity in the domain
// - NO event emission
// - NO history: undo/redo lives one layer up
// - File formats are delegated to serializers

pub mod entry_repository;

pub use entry_repository::{EntryRepository, InMemoryEntryRepository};

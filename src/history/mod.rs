// src/history/mod.rs
//
// Undo/redo for catalog mutations

pub mod command;
pub mod manager;

pub use command::CatalogCommand;
pub use manager::HistoryManager;

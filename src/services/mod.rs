// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod catalog_service;
pub mod filter;


pub use catalog_service::{CatalogService, CreateEntryRequest, HistoryState, UpdateEntryRequest};

pub use filter::{FilterCriteria, SearchField};

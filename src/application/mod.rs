// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - This layer sits above the catalog engine
// - It provides the boundary between a UI shell and the services
// - It translates between DTOs and domain entities

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::AppState;

// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Boundary between the command line and the services
// - Translates domain entities into DTOs
// - Turns every error into a message the user can act on

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType};
pub use state::AppState;

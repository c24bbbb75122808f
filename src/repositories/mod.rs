// src/repositories/mod.rs
//
// Repository layer
//
// RULES:
// - Repositories are dumb data mappers
// - No business logic, no validation
// - Constraint failures are converted into the error taxonomy here
// - Explicit SQL only

pub mod episode_repository;
pub mod title_repository;

pub use episode_repository::{EpisodeRepository, SqliteEpisodeRepository};
pub use title_repository::{SqliteTitleRepository, TitleRepository};

// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod import_service;
pub mod library_service;
pub mod title_service;
pub mod watch_service;


// Re-export all services and their types
pub use import_service::{EpisodeImport, EpisodeImportRecord, ImportReport, ImportService};

pub use library_service::{Adoption, Discovery, LibraryService, Lookup};

pub use title_service::TitleService;

pub use watch_service::{MarkOutcome, WatchService};

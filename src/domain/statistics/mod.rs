pub mod entity;

pub use entity::{LibraryStatistics, WatchProgress};

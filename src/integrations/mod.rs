// src/integrations/mod.rs
//
// External collaborators
//
// The core only talks to the outside world through these traits.
// `CatalogSnapshot` and `IndexSelector` are the offline implementations the
// command line uses; live catalog clients plug in behind the same traits.

pub mod catalog;
pub mod selector;
pub mod snapshot;

pub use catalog::{CatalogInfo, EpisodeStub, Link, RemoteCatalog, TitleStub};
pub use selector::{IndexSelector, Selector};
pub use snapshot::{CatalogSnapshot, SnapshotTitle};

#[cfg(test)]
pub use catalog::MockRemoteCatalog;
#[cfg(test)]
pub use selector::MockSelector;

pub mod entity;
pub mod invariants;

pub use entity::{Rating, Title};
pub use invariants::validate_title;

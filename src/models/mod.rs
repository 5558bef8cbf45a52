//! Core data models for the ranking tracker.

mod character;
mod ids;
mod kind;
mod record;

pub use character::*;
pub use ids::*;
pub use kind::*;
pub use record::*;

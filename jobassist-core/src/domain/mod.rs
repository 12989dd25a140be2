//! Core domain entities
//!
//! Pure data structures with no I/O or external dependencies.

mod identity;
pub mod result;

pub use identity::{generate_id, Identity};

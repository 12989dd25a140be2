//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - JSON files under the app directory for the KeyValueStore port
//! - An in-memory map for tests and embedding

pub mod json_file;
pub mod memory;

//! Infrastructure adapters for Curio.
//!
//! This crate implements the ports defined in `curio-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod catalog;
pub mod collections;
pub mod config_store;
pub mod filesystem;

// Re-export commonly used adapters
pub use catalog::FsCatalog;
pub use collections::YamlCollectionSource;
pub use config_store::YamlConfigStore;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};

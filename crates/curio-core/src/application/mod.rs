//! Application layer for Curio.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (SelectionService, SyncService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! selection rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    Overview, SelectionService, SyncOptions, SyncReport, SyncService, ToggleOutcome,
    ToggleRequest, ToggleTarget,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Catalog, CollectionSource, ConfigStore, Filesystem};

pub use error::ApplicationError;

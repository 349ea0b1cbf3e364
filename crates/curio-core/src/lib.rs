//! Curio Core - Hexagonal Architecture Implementation
//!
//! Domain and application layers for the Curio artifact selector: decide
//! which prompts, instructions and chat modes are enabled, explain why, and
//! plan how a project directory is brought in line.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            curio-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (SelectionService, SyncService)      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Catalog, CollectionSource, ConfigStore,│
//! │              Filesystem)                │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     curio-adapters (Infrastructure)     │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │   (resolve, delta, SyncPlan, budget)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use curio_core::domain::{CatalogSnapshot, Collection, ConfigDocument, Section, resolve};
//!
//! let mut document = ConfigDocument::default();
//! document.set_flag(Section::Collections, "testing", true);
//!
//! let catalog = CatalogSnapshot::new().with_section(Section::Prompts, ["write-tests"]);
//! let resolution = resolve(&document, &catalog, |name| {
//!     Ok::<_, String>(Collection::from_item_paths(name, ["prompts/write-tests.prompt.md"]))
//! });
//!
//! assert!(resolution.is_enabled(Section::Prompts, "write-tests"));
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        SelectionService, SyncOptions, SyncService, ToggleRequest, ToggleTarget,
        ports::{Catalog, CollectionSource, ConfigStore, Filesystem},
    };
    pub use crate::domain::{
        ArtifactKey, CatalogSnapshot, Collection, ConfigDocument, LoadedConfig, Reason,
        Resolution, Section,
    };
    pub use crate::error::{CurioError, CurioResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

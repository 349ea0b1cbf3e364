//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "toggle a collection" or "apply the selection".

pub mod selection_service;
pub mod sync_service;

pub use selection_service::{
    ItemOverview, Overview, SectionOverview, SelectionService, ToggleOutcome, ToggleRequest,
    ToggleTarget,
};
pub use sync_service::{SyncOptions, SyncReport, SyncService};

//! Application ports (traits) for external dependencies.
//!
//! Ports define what the application needs from the outside world.
//! Adapters in `curio-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: called by services, implemented by infrastructure
//!   - `Filesystem`: file operations at the destination
//!   - `Catalog`: artifact library enumeration and reads
//!   - `CollectionSource`: collection manifests
//!   - `ConfigStore`: the configuration document
//!
//! - **Driving (Input) Ports**: the services themselves, called by the CLI

pub mod output;

pub use output::{Catalog, CollectionSource, ConfigStore, Filesystem};

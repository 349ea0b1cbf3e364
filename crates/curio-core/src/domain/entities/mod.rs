pub mod catalog;
pub mod collection;
pub mod document;

pub use crate::domain::DomainError;
pub use catalog::CatalogSnapshot;
pub use collection::Collection;
pub use document::{ConfigDocument, LoadedConfig, ProjectSettings};

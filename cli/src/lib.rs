//! Catalog loading and command implementations for the `contentcore` binary.

mod catalog;
mod commands;

pub use catalog::{Catalog, CatalogContentType, CatalogError, CatalogField};
pub use commands::{inspect, list_types, normalize, template};

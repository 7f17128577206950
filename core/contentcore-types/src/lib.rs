//! Core type definitions for contentcore.
//!
//! This crate defines the small, schema-agnostic types shared by the
//! dynamic content engine:
//! - Portal, content type and field definition identifiers
//! - [`TimeSpan`], the signed duration used by `TimeSpan` fields
//!
//! Everything that knows about schemas or records lives in
//! `contentcore-model`.

mod ids;
mod timespan;

pub use ids::{ContentTypeId, FieldDefinitionId, PortalId};
pub use timespan::TimeSpan;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("invalid time span: {0}")]
    InvalidTimeSpan(String),

    #[error("time span out of range: {0}")]
    TimeSpanOverflow(String),
}

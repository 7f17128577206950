//! Error types for the content model.

use contentcore_types::ContentTypeId;
use thiserror::Error;

use crate::DataType;

/// Result type for content model operations.
pub type ContentResult<T> = Result<T, ContentError>;

/// Structural errors raised while building schemas or decoding, encoding
/// and editing records.
///
/// Values that fail to parse for their field's data type are not errors;
/// they are replaced by the type's fallback value.
#[derive(Debug, Error)]
pub enum ContentError {
    /// A required input was empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The document's content type id did not resolve in the record's portal.
    #[error("unknown content type: {0}")]
    UnknownContentType(ContentTypeId),

    /// The document has no `content` object.
    #[error("document has no content")]
    MissingContent,

    /// A field name is not declared by the content type.
    #[error("invalid field: {0:?}")]
    InvalidField(String),

    /// Encoding or editing was attempted before a content type was bound.
    #[error("no content type bound to record")]
    NoSchemaBound,

    /// The document names a different content type than the one the record
    /// is bound to.
    #[error("content type mismatch: record is bound to {bound}, document declares {found}")]
    ContentTypeMismatch {
        bound: ContentTypeId,
        found: ContentTypeId,
    },

    /// Two field definitions share a name (case-insensitive).
    #[error("duplicate field: {0:?}")]
    DuplicateField(String),

    /// A value of the wrong data type was assigned to a field.
    #[error("field {field:?} expects {expected} but got {found}")]
    FieldTypeMismatch {
        field: String,
        expected: DataType,
        found: DataType,
    },

    /// A Float field was given NaN or an infinity, which JSON cannot carry.
    #[error("field {0:?} cannot hold a non-finite float")]
    NonFiniteFloat(String),

    /// The document is not valid JSON of the expected shape.
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
}

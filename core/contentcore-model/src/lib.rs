//! Dynamic content model for contentcore.
//!
//! Defines the schema-driven record types and their JSON codec:
//! - [`ContentTypeSchema`]: a content type and its ordered [`FieldDefinition`]s
//! - [`DataType`]: the fixed set of underlying field data types
//! - [`Value`] / [`FieldValue`]: a field's native value, tied to its definition
//! - [`TypedRecord`]: a content item that decodes from and encodes to the
//!   `{"contentTypeId", "content": {"field": [...]}}` document shape
//! - [`SchemaResolver`]: injected lookup used when a document names its
//!   content type by id; [`SchemaRegistry`] is the in-memory implementation
//!
//! Value coercion never fails: text that does not parse for a field's data
//! type is replaced by that type's fallback value. Only structural problems
//! with a document are reported as [`ContentError`]s.

mod coerce;
mod error;
mod field;
mod record;
mod resolver;
mod schema;
mod value;

pub use error::{ContentError, ContentResult};
pub use field::FieldValue;
pub use record::TypedRecord;
pub use resolver::{SchemaRegistry, SchemaResolver};
pub use schema::{ContentTypeSchema, DataType, FieldDefinition, SchemaStatus};
pub use value::Value;

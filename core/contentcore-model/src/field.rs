use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::sync::Arc;

use crate::{ContentError, ContentResult, DataType, FieldDefinition, Value};

/// A field of a record: its definition paired with a value of the
/// definition's data type.
///
/// Serializes to the wire entry `{"name": ..., "value": ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
    definition: Arc<FieldDefinition>,
    value: Value,
}

impl FieldValue {
    /// Pairs a definition with a value, rejecting a value of another type
    /// and non-finite floats.
    pub fn new(definition: Arc<FieldDefinition>, value: Value) -> ContentResult<Self> {
        check_type(&definition, &value)?;
        Ok(Self { definition, value })
    }

    /// A field holding its data type's unset placeholder.
    pub fn zero(definition: Arc<FieldDefinition>) -> Self {
        let value = Value::zero(definition.data_type);
        Self { definition, value }
    }

    pub fn definition(&self) -> &FieldDefinition {
        &self.definition
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn data_type(&self) -> DataType {
        self.definition.data_type
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Replaces the value, keeping the field's type invariant.
    pub fn set(&mut self, value: Value) -> ContentResult<()> {
        check_type(&self.definition, &value)?;
        self.value = value;
        Ok(())
    }

    /// Builds a field from a value the caller already produced for
    /// `definition.data_type`.
    pub(crate) fn from_coerced(definition: Arc<FieldDefinition>, value: Value) -> Self {
        debug_assert_eq!(definition.data_type, value.data_type());
        Self { definition, value }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entry = serializer.serialize_struct("field", 2)?;
        entry.serialize_field("name", self.name())?;
        entry.serialize_field("value", &self.value)?;
        entry.end()
    }
}

fn check_type(definition: &FieldDefinition, value: &Value) -> ContentResult<()> {
    if value.data_type() != definition.data_type {
        return Err(ContentError::FieldTypeMismatch {
            field: definition.name.clone(),
            expected: definition.data_type,
            found: value.data_type(),
        });
    }
    match value {
        Value::Float(x) if !x.is_finite() => {
            Err(ContentError::NonFiniteFloat(definition.name.clone()))
        }
        _ => Ok(()),
    }
}

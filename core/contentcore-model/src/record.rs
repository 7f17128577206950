use contentcore_types::{ContentTypeId, PortalId};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::coerce::{self, Coercion};
use crate::{
    ContentError, ContentResult, ContentTypeSchema, FieldDefinition, FieldValue, SchemaResolver,
    Value,
};

/// A dynamic content item: a set of typed fields belonging to one content
/// type, convertible to and from its JSON document.
///
/// The document shape is fixed:
///
/// ```json
/// {"contentTypeId": 1, "content": {"field": [{"name": "Age", "value": "42"}]}}
/// ```
///
/// Decoding replaces the whole field map or leaves the record untouched;
/// there is no partial result. Encoding never mutates the record.
#[derive(Clone)]
pub struct TypedRecord {
    portal_id: PortalId,
    schema: Option<Arc<ContentTypeSchema>>,
    resolver: Option<Arc<dyn SchemaResolver>>,
    fields: Vec<FieldValue>,
}

impl TypedRecord {
    /// Creates an empty record for `portal_id` with no content type yet.
    /// The content type is resolved through `resolver` on the first decode.
    pub fn new(portal_id: PortalId, resolver: Arc<dyn SchemaResolver>) -> Self {
        Self {
            portal_id,
            schema: None,
            resolver: Some(resolver),
            fields: Vec::new(),
        }
    }

    /// Creates a record bound to `schema` with one unset field per
    /// definition, in declaration order. The record lives in the schema's
    /// portal.
    pub fn with_schema(schema: Arc<ContentTypeSchema>) -> Self {
        let fields = schema
            .fields()
            .iter()
            .map(|d| FieldValue::zero(Arc::clone(d)))
            .collect();
        Self {
            portal_id: schema.portal_id(),
            schema: Some(schema),
            resolver: None,
            fields,
        }
    }

    /// Attaches a resolver for documents naming other content types.
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn SchemaResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Moves the record to another portal scope for later lookups.
    #[must_use]
    pub fn in_portal(mut self, portal_id: PortalId) -> Self {
        self.portal_id = portal_id;
        self
    }

    pub fn portal_id(&self) -> PortalId {
        self.portal_id
    }

    pub fn schema(&self) -> Option<&Arc<ContentTypeSchema>> {
        self.schema.as_ref()
    }

    pub fn content_type_id(&self) -> Option<ContentTypeId> {
        self.schema.as_ref().map(|s| s.id())
    }

    /// Fields in map order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldValue> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Looks up a field by name, ignoring case.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.definition().matches_name(name))
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.field(name).map(FieldValue::value)
    }

    /// Assigns `value` to the field `name`.
    ///
    /// The field must be declared by the bound content type and `value`
    /// must be of its data type. A declared field missing from the map is
    /// added at the end.
    pub fn set_value(&mut self, name: &str, value: Value) -> ContentResult<()> {
        let definition = self.definition(name)?;
        match self.fields.iter_mut().find(|f| f.name() == definition.name) {
            Some(field) => field.set(value),
            None => {
                self.fields.push(FieldValue::new(definition, value)?);
                Ok(())
            }
        }
    }

    /// Coerces `raw` to the field's data type and assigns it, using the
    /// same rules and fallbacks as decoding.
    pub fn set_text(&mut self, name: &str, raw: &str) -> ContentResult<()> {
        let definition = self.definition(name)?;
        let value = coerce_field(&definition, raw);
        self.set_value(&definition.name, value)
    }

    /// Replaces the record's content with the fields of a JSON document.
    ///
    /// The document's `contentTypeId` is looked up in the record's portal,
    /// drafts included. On error the record is left unchanged.
    pub fn from_document(&mut self, text: &str) -> ContentResult<()> {
        if text.trim().is_empty() {
            return Err(ContentError::InvalidArgument("document text is empty"));
        }

        let document: DocumentIn = serde_json::from_str(text)?;
        let schema = self.resolve_schema(document.content_type_id)?;
        let content = document.content.ok_or(ContentError::MissingContent)?;
        let entries = content.field.unwrap_or_default();

        let mut fields: Vec<FieldValue> = Vec::with_capacity(entries.len());
        for entry in &entries {
            let name = entry.name.as_deref().unwrap_or_default();
            let definition = schema
                .field(name)
                .ok_or_else(|| ContentError::InvalidField(name.to_string()))?;
            let value = coerce_field(definition, &raw_text(entry.value.as_deref()));
            let field = FieldValue::from_coerced(Arc::clone(definition), value);

            // Repeated names keep the first slot and the last value.
            match fields.iter_mut().find(|f| f.name() == definition.name) {
                Some(existing) => *existing = field,
                None => fields.push(field),
            }
        }

        debug!(
            content_type_id = %schema.id(),
            portal_id = %self.portal_id,
            field_count = fields.len(),
            "Decoded content document"
        );
        self.schema = Some(schema);
        self.fields = fields;
        Ok(())
    }

    /// Encodes the record as a JSON document string.
    pub fn to_document(&self) -> ContentResult<String> {
        let document = self.document_out()?;
        let text = serde_json::to_string(&document)?;
        debug!(
            content_type_id = %document.content_type_id,
            field_count = self.fields.len(),
            "Encoded content document"
        );
        Ok(text)
    }

    /// Encodes the record as a JSON value with the document shape.
    pub fn to_value(&self) -> ContentResult<serde_json::Value> {
        Ok(serde_json::to_value(self.document_out()?)?)
    }

    fn document_out(&self) -> ContentResult<DocumentOut<'_>> {
        let schema = self.schema.as_ref().ok_or(ContentError::NoSchemaBound)?;
        Ok(DocumentOut {
            content_type_id: schema.id(),
            content: ContentOut {
                field: &self.fields,
            },
        })
    }

    fn definition(&self, name: &str) -> ContentResult<Arc<FieldDefinition>> {
        let schema = self.schema.as_ref().ok_or(ContentError::NoSchemaBound)?;
        schema
            .field(name)
            .cloned()
            .ok_or_else(|| ContentError::InvalidField(name.to_string()))
    }

    /// The bound schema answers for its own id; anything else goes through
    /// the resolver. A record never switches to a second content type.
    fn resolve_schema(&self, id: ContentTypeId) -> ContentResult<Arc<ContentTypeSchema>> {
        if let Some(bound) = self.schema.as_ref().filter(|s| s.id() == id) {
            return Ok(Arc::clone(bound));
        }

        let resolved = self
            .resolver
            .as_ref()
            .and_then(|r| r.resolve(id, self.portal_id, true))
            .ok_or(ContentError::UnknownContentType(id))?;

        match &self.schema {
            Some(bound) => Err(ContentError::ContentTypeMismatch {
                bound: bound.id(),
                found: resolved.id(),
            }),
            None => Ok(resolved),
        }
    }
}

impl fmt::Debug for TypedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedRecord")
            .field("portal_id", &self.portal_id)
            .field("content_type_id", &self.content_type_id())
            .field("has_resolver", &self.resolver.is_some())
            .field("fields", &self.fields)
            .finish()
    }
}

fn coerce_field(definition: &FieldDefinition, raw: &str) -> Value {
    let coercion = coerce::coerce(definition.data_type, raw);
    if let Coercion::Fallback(fallback) = &coercion {
        warn!(
            field = %definition.name,
            data_type = %definition.data_type,
            fallback = %fallback,
            "Field value did not parse, using fallback"
        );
    }
    coercion.into_value()
}

/// Wire values are read as text. Numbers and booleans use their JSON
/// spelling, so out-of-range numbers reach the coercer untouched; null, a
/// missing value and nested JSON read as empty.
fn raw_text(value: Option<&RawValue>) -> Cow<'_, str> {
    let Some(raw) = value else {
        return Cow::Borrowed("");
    };
    let text = raw.get().trim();
    match text.as_bytes().first() {
        Some(b'"') => serde_json::from_str::<String>(text)
            .map(Cow::Owned)
            .unwrap_or_default(),
        Some(b'-' | b'0'..=b'9') => Cow::Borrowed(text),
        _ if text == "true" || text == "false" => Cow::Borrowed(text),
        _ => Cow::Borrowed(""),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentIn {
    content_type_id: ContentTypeId,
    #[serde(default)]
    content: Option<ContentIn>,
}

#[derive(Deserialize)]
struct ContentIn {
    #[serde(default)]
    field: Option<Vec<FieldIn>>,
}

#[derive(Deserialize)]
struct FieldIn {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    value: Option<Box<RawValue>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentOut<'a> {
    content_type_id: ContentTypeId,
    content: ContentOut<'a>,
}

#[derive(Serialize)]
struct ContentOut<'a> {
    field: &'a [FieldValue],
}

use contentcore_types::{ContentTypeId, FieldDefinitionId, PortalId};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::{ContentError, ContentResult};

/// A dynamic content type: an id, a display name and the ordered list of
/// fields its records carry.
///
/// Field names are unique ignoring case. Schemas are shared between records
/// through `Arc` and never change once built; the registry swaps in a new
/// copy when a draft is published.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentTypeSchema {
    id: ContentTypeId,
    name: String,
    portal_id: PortalId,
    status: SchemaStatus,
    fields: Vec<Arc<FieldDefinition>>,
}

impl ContentTypeSchema {
    /// Creates a published, host-level content type.
    ///
    /// Fails with [`ContentError::DuplicateField`] if two definitions share
    /// a name ignoring case.
    pub fn new(
        id: ContentTypeId,
        name: impl Into<String>,
        fields: impl IntoIterator<Item = FieldDefinition>,
    ) -> ContentResult<Self> {
        let mut defs: Vec<Arc<FieldDefinition>> = Vec::new();
        for field in fields {
            if defs.iter().any(|d| d.matches_name(&field.name)) {
                return Err(ContentError::DuplicateField(field.name));
            }
            defs.push(Arc::new(field));
        }

        Ok(Self {
            id,
            name: name.into(),
            portal_id: PortalId::HOST,
            status: SchemaStatus::Published,
            fields: defs,
        })
    }

    /// Scopes the content type to a single portal.
    #[must_use]
    pub fn with_portal(mut self, portal_id: PortalId) -> Self {
        self.portal_id = portal_id;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: SchemaStatus) -> Self {
        self.status = status;
        self
    }

    pub fn id(&self) -> ContentTypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn portal_id(&self) -> PortalId {
        self.portal_id
    }

    pub fn status(&self) -> SchemaStatus {
        self.status
    }

    pub fn is_published(&self) -> bool {
        self.status == SchemaStatus::Published
    }

    /// Field definitions in declaration order.
    pub fn fields(&self) -> &[Arc<FieldDefinition>] {
        &self.fields
    }

    /// Looks up a field definition by name, ignoring case.
    pub fn field(&self, name: &str) -> Option<&Arc<FieldDefinition>> {
        self.fields.iter().find(|d| d.matches_name(name))
    }

    /// Whether a lookup from `portal_id` may see this content type.
    ///
    /// Host-level types are visible from every portal. Drafts are only
    /// visible when the caller asks for them.
    pub fn is_visible_to(&self, portal_id: PortalId, include_drafts: bool) -> bool {
        let in_scope = self.portal_id == portal_id || self.portal_id.is_host();
        in_scope && (include_drafts || self.is_published())
    }

    pub(crate) fn set_status(&mut self, status: SchemaStatus) {
        self.status = status;
    }
}

/// Authoring state of a content type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaStatus {
    /// Still being authored; only visible to lookups that include drafts.
    Draft,
    #[default]
    Published,
}

/// A named, typed field of a content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FieldDefinitionId>,
    pub name: String,
    pub data_type: DataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            id: None,
            name: name.into(),
            data_type,
            label: None,
            description: None,
        }
    }

    /// Shorthand for a Boolean field.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, DataType::Boolean)
    }

    /// Shorthand for a base64-carried binary field.
    pub fn bytes(name: impl Into<String>) -> Self {
        Self::new(name, DataType::Bytes)
    }

    pub fn date_time(name: impl Into<String>) -> Self {
        Self::new(name, DataType::DateTime)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, DataType::Float)
    }

    pub fn guid(name: impl Into<String>) -> Self {
        Self::new(name, DataType::Guid)
    }

    /// Shorthand for a 32-bit integer field.
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, DataType::Integer)
    }

    pub fn time_span(name: impl Into<String>) -> Self {
        Self::new(name, DataType::TimeSpan)
    }

    /// Shorthand for an absolute URI field.
    pub fn uri(name: impl Into<String>) -> Self {
        Self::new(name, DataType::Uri)
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, DataType::String)
    }

    #[must_use]
    pub fn with_id(mut self, id: FieldDefinitionId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Case-insensitive name comparison.
    pub fn matches_name(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }
}

/// The underlying data type of a field.
///
/// Names parse case-insensitively; anything unrecognized is treated as
/// [`DataType::String`], so a schema never fails to load because of an
/// unfamiliar type name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean,
    Bytes,
    DateTime,
    Float,
    Guid,
    Integer,
    TimeSpan,
    Uri,
    #[default]
    String,
}

impl DataType {
    /// Every data type, in discriminant order.
    pub const ALL: [DataType; 9] = [
        DataType::Boolean,
        DataType::Bytes,
        DataType::DateTime,
        DataType::Float,
        DataType::Guid,
        DataType::Integer,
        DataType::TimeSpan,
        DataType::Uri,
        DataType::String,
    ];

    /// Canonical name.
    pub const fn name(&self) -> &'static str {
        match self {
            DataType::Boolean => "Boolean",
            DataType::Bytes => "Bytes",
            DataType::DateTime => "DateTime",
            DataType::Float => "Float",
            DataType::Guid => "Guid",
            DataType::Integer => "Integer",
            DataType::TimeSpan => "TimeSpan",
            DataType::Uri => "Uri",
            DataType::String => "String",
        }
    }

    /// Position in [`DataType::ALL`] and in the coercion table.
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let data_type = match s.trim().to_ascii_lowercase().as_str() {
            "boolean" | "bool" => DataType::Boolean,
            "bytes" | "binary" => DataType::Bytes,
            "datetime" | "date_time" | "date" => DataType::DateTime,
            "float" | "double" | "decimal" => DataType::Float,
            "guid" | "uuid" => DataType::Guid,
            "integer" | "int" | "int32" => DataType::Integer,
            "timespan" | "time_span" | "duration" => DataType::TimeSpan,
            "uri" | "url" => DataType::Uri,
            _ => DataType::String,
        };
        Ok(data_type)
    }
}

impl Serialize for DataType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        let Ok(data_type) = name.parse::<DataType>();
        Ok(data_type)
    }
}

pub(crate) fn names_match(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

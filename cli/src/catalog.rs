//! Content type catalog (catalog.toml) loaded by the CLI.

use contentcore_model::{
    ContentError, ContentTypeSchema, DataType, FieldDefinition, SchemaRegistry, SchemaStatus,
};
use contentcore_types::{ContentTypeId, PortalId};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("content type {id}: {source}")]
    Schema { id: i32, source: ContentError },

    #[error("content type id {0} is declared more than once")]
    DuplicateContentType(i32),
}

/// Top-level catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub content_types: Vec<CatalogContentType>,
}

/// One content type entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogContentType {
    pub id: i32,
    pub name: String,
    /// Owning portal; omitted means the host portal (shared by all).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portal: Option<i32>,
    #[serde(default)]
    pub status: SchemaStatus,
    #[serde(default)]
    pub fields: Vec<CatalogField>,
}

/// One field of a content type. Unknown `data_type` names load as String.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogField {
    pub name: String,
    pub data_type: DataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Catalog {
    pub fn from_toml(text: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml(&text)?;
        debug!(
            path = %path.display(),
            content_types = catalog.content_types.len(),
            "Loaded content type catalog"
        );
        Ok(catalog)
    }

    /// Builds a registry, rejecting repeated content type ids and invalid
    /// field lists.
    pub fn into_registry(self) -> Result<SchemaRegistry, CatalogError> {
        let mut registry = SchemaRegistry::new();
        for entry in self.content_types {
            let id = entry.id;
            if registry.get(ContentTypeId::new(id)).is_some() {
                return Err(CatalogError::DuplicateContentType(id));
            }
            let schema = entry
                .into_schema()
                .map_err(|source| CatalogError::Schema { id, source })?;
            registry.register(schema);
        }
        Ok(registry)
    }
}

impl CatalogContentType {
    fn into_schema(self) -> Result<ContentTypeSchema, ContentError> {
        let fields = self.fields.into_iter().map(CatalogField::into_definition);
        let portal = self.portal.map_or(PortalId::HOST, PortalId::new);
        Ok(ContentTypeSchema::new(ContentTypeId::new(self.id), self.name, fields)?
            .with_portal(portal)
            .with_status(self.status))
    }
}

impl CatalogField {
    fn into_definition(self) -> FieldDefinition {
        FieldDefinition {
            id: None,
            name: self.name,
            data_type: self.data_type,
            label: self.label,
            description: self.description,
        }
    }
}

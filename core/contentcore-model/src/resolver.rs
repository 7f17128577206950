use contentcore_types::{ContentTypeId, PortalId};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::{ContentTypeSchema, SchemaStatus};

/// Looks up content types by id on behalf of a [`TypedRecord`](crate::TypedRecord).
///
/// Records receive a resolver at construction instead of reaching for a
/// process-wide registry. Resolution is a side-effect-free query: it returns
/// the matching schema or `None`, and never invents a default.
///
/// Any `Fn(ContentTypeId, PortalId, bool) -> Option<Arc<ContentTypeSchema>>`
/// is a resolver.
pub trait SchemaResolver: Send + Sync {
    /// Finds the content type `content_type_id` as seen from `portal_id`.
    /// Draft content types are only returned when `include_drafts` is set.
    fn resolve(
        &self,
        content_type_id: ContentTypeId,
        portal_id: PortalId,
        include_drafts: bool,
    ) -> Option<Arc<ContentTypeSchema>>;
}

impl<F> SchemaResolver for F
where
    F: Fn(ContentTypeId, PortalId, bool) -> Option<Arc<ContentTypeSchema>> + Send + Sync,
{
    fn resolve(
        &self,
        content_type_id: ContentTypeId,
        portal_id: PortalId,
        include_drafts: bool,
    ) -> Option<Arc<ContentTypeSchema>> {
        self(content_type_id, portal_id, include_drafts)
    }
}

/// In-memory set of content types keyed by id.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<ContentTypeId, Arc<ContentTypeSchema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a content type, returning the one it replaced (same id), if any.
    pub fn register(
        &mut self,
        schema: impl Into<Arc<ContentTypeSchema>>,
    ) -> Option<Arc<ContentTypeSchema>> {
        let schema = schema.into();
        debug!(
            content_type_id = %schema.id(),
            portal_id = %schema.portal_id(),
            status = ?schema.status(),
            "Registering content type"
        );
        self.schemas.insert(schema.id(), schema)
    }

    /// Marks a draft content type as published. Returns false if the id is
    /// unknown.
    ///
    /// Records already holding the draft keep their copy.
    pub fn publish(&mut self, content_type_id: ContentTypeId) -> bool {
        let Some(schema) = self.schemas.get_mut(&content_type_id) else {
            return false;
        };
        Arc::make_mut(schema).set_status(SchemaStatus::Published);
        debug!(content_type_id = %content_type_id, "Content type published");
        true
    }

    pub fn remove(&mut self, content_type_id: ContentTypeId) -> Option<Arc<ContentTypeSchema>> {
        self.schemas.remove(&content_type_id)
    }

    /// Unscoped lookup by id, drafts included.
    pub fn get(&self, content_type_id: ContentTypeId) -> Option<&Arc<ContentTypeSchema>> {
        self.schemas.get(&content_type_id)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// All content types in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ContentTypeSchema>> {
        self.schemas.values()
    }

    /// Content types a portal can see, in id order.
    pub fn visible_to(
        &self,
        portal_id: PortalId,
        include_drafts: bool,
    ) -> impl Iterator<Item = &Arc<ContentTypeSchema>> {
        self.schemas
            .values()
            .filter(move |s| s.is_visible_to(portal_id, include_drafts))
    }
}

impl SchemaResolver for SchemaRegistry {
    fn resolve(
        &self,
        content_type_id: ContentTypeId,
        portal_id: PortalId,
        include_drafts: bool,
    ) -> Option<Arc<ContentTypeSchema>> {
        self.schemas
            .get(&content_type_id)
            .filter(|s| s.is_visible_to(portal_id, include_drafts))
            .cloned()
    }
}

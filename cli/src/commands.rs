use anyhow::{Context, Result};
use contentcore_model::{SchemaRegistry, SchemaResolver, TypedRecord};
use contentcore_types::{ContentTypeId, PortalId};
use std::fmt::Write;
use std::sync::Arc;

/// Decodes `input` and returns the re-encoded document.
pub fn normalize(registry: Arc<SchemaRegistry>, portal_id: PortalId, input: &str) -> Result<String> {
    let record = decode(registry, portal_id, input)?;
    record.to_document().context("failed to encode document")
}

/// Decodes `input` and lists its fields as `name<TAB>type<TAB>value` lines.
pub fn inspect(registry: Arc<SchemaRegistry>, portal_id: PortalId, input: &str) -> Result<String> {
    let record = decode(registry, portal_id, input)?;
    let mut out = String::new();
    for field in record.fields() {
        writeln!(out, "{}\t{}\t{}", field.name(), field.data_type(), field.value())?;
    }
    Ok(out)
}

/// The document of a freshly created record of `content_type_id`, every
/// field holding its unset value.
pub fn template(
    registry: &SchemaRegistry,
    portal_id: PortalId,
    content_type_id: ContentTypeId,
) -> Result<String> {
    let schema = registry
        .resolve(content_type_id, portal_id, true)
        .with_context(|| format!("content type {content_type_id} not found in portal {portal_id}"))?;
    let record = TypedRecord::with_schema(schema).in_portal(portal_id);
    record.to_document().context("failed to encode template")
}

/// One `id<TAB>name<TAB>status<TAB>field count` line per content type the
/// portal can see, drafts included.
pub fn list_types(registry: &SchemaRegistry, portal_id: PortalId) -> Result<String> {
    let mut out = String::new();
    for schema in registry.visible_to(portal_id, true) {
        let status = if schema.is_published() { "published" } else { "draft" };
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            schema.id(),
            schema.name(),
            status,
            schema.fields().len()
        )?;
    }
    Ok(out)
}

fn decode(registry: Arc<SchemaRegistry>, portal_id: PortalId, input: &str) -> Result<TypedRecord> {
    let mut record = TypedRecord::new(portal_id, registry);
    record.from_document(input).context("failed to decode document")?;
    Ok(record)
}

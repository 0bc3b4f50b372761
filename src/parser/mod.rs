//! JSON decoding for glTF documents
//!
//! Decoding runs in four steps:
//!
//! 1. the text is parsed into a JSON value ([`Error::MalformedInput`] on
//!    failure);
//! 2. the configured schema validator checks the value
//!    ([`Error::SchemaViolation`] on the first diagnostic);
//! 3. a structural pass fills every registry in array order, giving each
//!    entity the decimal string of its index as id, and keeps extension
//!    JSON verbatim;
//! 4. an extension pass walks every property and moves fragments with a
//!    registered decoder into the typed channel.
//!
//! Invariant checks run last unless disabled in the [`ParserConfig`].

mod animation;
mod camera;
mod core;
mod material;
mod mesh;

use std::io::Read;

use serde_json::Value;

use crate::config::ParserConfig;
use crate::error::{Error, Result};
use crate::extension::ExtensionDeserializer;
use crate::model::Document;
use crate::property::Extensible;
use crate::schema::GLTF_SCHEMA_URI;
use crate::validator;

pub(crate) use core::{Object, read_property};
pub(crate) use material::read_texture_info;

/// Parse a glTF document from JSON text
pub fn parse_document(json: &str, config: &ParserConfig) -> Result<Document> {
    let root: Value =
        serde_json::from_str(json).map_err(|e| Error::MalformedInput(e.to_string()))?;
    parse_value(&root, config)
}

/// Parse a glTF document from a reader producing JSON text
pub fn parse_document_from_reader<R: Read>(reader: R, config: &ParserConfig) -> Result<Document> {
    let root: Value = serde_json::from_reader(reader)?;
    parse_value(&root, config)
}

/// Build a document from an already-parsed JSON value
pub fn parse_value(root: &Value, config: &ParserConfig) -> Result<Document> {
    if let Some(schema) = config.schema() {
        schema.validate(root, GLTF_SCHEMA_URI).map_err(|diagnostics| {
            match diagnostics.into_iter().next() {
                Some(first) => Error::schema(first.path, first.description),
                None => Error::schema("#", "schema validation failed"),
            }
        })?;
    }

    let mut document = core::read_document(root)?;
    resolve_extensions(&mut document, config.deserializer())?;

    if config.check_invariants() {
        validator::validate_document(&document)?;
    }

    log::debug!(
        "Parsed glTF document: {} nodes, {} meshes, {} materials, {} accessors",
        document.nodes.len(),
        document.meshes.len(),
        document.materials.len(),
        document.accessors.len()
    );

    Ok(document)
}

/// Resolve extension fragments on every property of the document
fn resolve_extensions(document: &mut Document, deserializer: &ExtensionDeserializer) -> Result<()> {
    if deserializer.is_empty() {
        return Ok(());
    }
    document.visit_properties_mut(&mut |context, property| deserializer.resolve(context, property))
}

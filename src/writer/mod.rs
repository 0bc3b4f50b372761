//! JSON encoding for glTF documents
//!
//! The writer checks every document invariant first, so a document that
//! encodes successfully always decodes back. Entity ids are replaced by the
//! positions of the referenced entities in their registries, members equal to
//! their glTF default are omitted, and typed extension payloads are handed to
//! the configured [`ExtensionSerializer`].

mod animation;
mod camera;
mod core;
mod material;
mod mesh;

use std::io::Write;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::config::WriterConfig;
use crate::container::{Identified, IndexedContainer};
use crate::error::{Error, Result};
use crate::extension::{EncodeContext, ExtensionSerializer};
use crate::model::Document;
use crate::property::{Property, PropertyContext};
use crate::validator;

pub(crate) use material::write_texture_info;

/// Encode a document to JSON text
pub fn write_document(document: &Document, config: &WriterConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_document_to(document, config, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| Error::InvalidDocument(e.to_string()))
}

/// Encode a document as JSON text into `writer`
pub fn write_document_to<W: Write>(document: &Document, config: &WriterConfig, writer: W) -> Result<()> {
    let root = write_value(document, config)?;

    if config.pretty() {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        root.serialize(&mut serializer)?;
    } else {
        serde_json::to_writer(writer, &root)?;
    }
    Ok(())
}

/// Encode a document to a JSON value
pub fn write_value(document: &Document, config: &WriterConfig) -> Result<Value> {
    validator::validate_document(document)?;

    let writer = DocumentWriter {
        document,
        serializer: config.serializer(),
    };
    let root = writer.write_root()?;

    log::debug!(
        "Wrote glTF document: {} nodes, {} meshes, {} materials, {} accessors",
        document.nodes.len(),
        document.meshes.len(),
        document.materials.len(),
        document.accessors.len()
    );

    Ok(Value::Object(root))
}

/// Shared state of one encode call
pub(crate) struct DocumentWriter<'a> {
    pub(crate) document: &'a Document,
    pub(crate) serializer: &'a ExtensionSerializer,
}

impl DocumentWriter<'_> {
    fn write_root(&self) -> Result<Map<String, Value>> {
        let document = self.document;
        let mut root = Map::new();
        root.insert("asset".into(), self.write_asset()?);

        macro_rules! write_collection {
            ($($key:literal => $field:ident, $write:ident;)+) => {
                $(
                    if !document.$field.is_empty() {
                        let items = document
                            .$field
                            .iter()
                            .map(|entity| self.$write(entity))
                            .collect::<Result<Vec<_>>>()?;
                        root.insert($key.into(), Value::Array(items));
                    }
                )+
            };
        }

        write_collection! {
            "accessors" => accessors, write_accessor;
            "animations" => animations, write_animation;
            "buffers" => buffers, write_buffer;
            "bufferViews" => buffer_views, write_buffer_view;
            "cameras" => cameras, write_camera;
            "images" => images, write_image;
            "materials" => materials, write_material;
            "meshes" => meshes, write_mesh;
            "nodes" => nodes, write_node;
            "samplers" => samplers, write_sampler;
            "scenes" => scenes, write_scene;
            "skins" => skins, write_skin;
            "textures" => textures, write_texture;
        }

        if let Some(id) = &document.default_scene_id {
            root.insert("scene".into(), index(&document.scenes, id)?);
        }
        if !document.extensions_used.is_empty() {
            root.insert("extensionsUsed".into(), name_array(&document.extensions_used));
        }
        if !document.extensions_required.is_empty() {
            root.insert(
                "extensionsRequired".into(),
                name_array(&document.extensions_required),
            );
        }

        self.write_property(&mut root, &document.property, PropertyContext::Document)?;
        Ok(root)
    }

    /// Emit `extensions` and `extras` of a property
    pub(crate) fn write_property(
        &self,
        object: &mut Map<String, Value>,
        property: &Property,
        context: PropertyContext,
    ) -> Result<()> {
        write_property(object, property, context, self.document, self.serializer)
    }
}

/// Emit `extensions` and `extras` of `property` into `object`
///
/// Typed payloads go through the serializer first. An extension name must
/// not be produced by both a payload and the opaque channel, and every
/// emitted name must be declared in `extensionsUsed`.
pub(crate) fn write_property(
    object: &mut Map<String, Value>,
    property: &Property,
    context: PropertyContext,
    document: &Document,
    serializer: &ExtensionSerializer,
) -> Result<()> {
    let mut extensions = Map::new();
    let encode_context = EncodeContext {
        document,
        serializer,
    };

    for payload in property.payloads() {
        let (name, value) = serializer.serialize(payload, context, &encode_context)?;
        if property.has_unregistered_extension(&name) {
            return Err(Error::ExtensionCollision(name));
        }
        if !document.is_extension_used(&name) {
            return Err(Error::UndeclaredExtension(name));
        }
        extensions.insert(name, value);
    }

    for (name, value) in &property.extensions {
        if !document.is_extension_used(name) {
            return Err(Error::UndeclaredExtension(name.clone()));
        }
        extensions.insert(name.clone(), value.clone());
    }

    if !extensions.is_empty() {
        object.insert("extensions".into(), Value::Object(extensions));
    }
    if let Some(extras) = &property.extras {
        object.insert("extras".into(), extras.clone());
    }
    Ok(())
}

/// Position of `id` in `container`, as a JSON number
pub(crate) fn index<T: Identified>(container: &IndexedContainer<T>, id: &str) -> Result<Value> {
    Ok(Value::from(container.index_of(id)?))
}

pub(crate) fn index_array<T: Identified>(container: &IndexedContainer<T>, ids: &[String]) -> Result<Value> {
    ids.iter()
        .map(|id| index(container, id))
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
}

/// Insert `key` only when the value is present
pub(crate) fn insert_opt(object: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        object.insert(key.into(), value);
    }
}

fn name_array<'n>(names: impl IntoIterator<Item = &'n String>) -> Value {
    Value::Array(names.into_iter().cloned().map(Value::String).collect())
}

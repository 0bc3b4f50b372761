//! # libgltf
//!
//! A pure Rust document model and serialization engine for glTF 2.0.
//!
//! A [`Document`] holds every glTF entity in ordered registries addressed by
//! stable string ids. On the wire glTF refers to entities by array position;
//! the encoder and decoder translate between the two, so ids survive edits
//! while output always uses valid indices.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Lossless JSON round trip, pretty or compact
//! - Forward-compatible extensions: unknown extensions are kept verbatim and
//!   written back unchanged
//! - Typed extension payloads dispatched through data-driven handler tables
//!   keyed by extension and owner
//! - Built-in `KHR_materials_pbrSpecularGlossiness`, `KHR_materials_unlit`,
//!   `KHR_draco_mesh_compression` and `KHR_texture_transform` (feature
//!   `khr`, on by default)
//! - Schema and invariant validation on decode and encode
//! - GLB binary container support
//!
//! ## Example
//!
//! ```
//! use libgltf::{AppendIdPolicy, Document, Node, Scene};
//!
//! # fn main() -> libgltf::Result<()> {
//! let mut document = Document::new();
//! document.append_node(Node::new("root"), AppendIdPolicy::ThrowOnEmpty)?;
//!
//! let mut scene = Scene::new("main");
//! scene.nodes.push("root".to_string());
//! document.set_default_scene(scene, AppendIdPolicy::ThrowOnEmpty)?;
//!
//! let json = document.to_json()?;
//! let decoded = Document::from_json(&json)?;
//!
//! // Decoded ids are the decimal array positions
//! assert_eq!(decoded.default_scene()?.nodes, vec!["0".to_string()]);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod container;
pub mod error;
pub mod extension;
#[cfg(feature = "khr")]
pub mod extensions;
pub mod glb;
pub mod math;
pub mod model;
pub mod parser;
pub mod property;
pub mod schema;
mod validator;
pub mod writer;

pub use config::{ParserConfig, WriterConfig};
pub use container::{AppendIdPolicy, Identified, IndexedContainer};
pub use error::{Error, Result};
pub use extension::{
    CustomExtension, ExtensionDeserializer, ExtensionPayload, ExtensionSerializer, PayloadKind,
    TypedExtension,
};
pub use math::{Color3, Color4, Matrix4, Quaternion, Vector2, Vector3};
pub use model::{
    Accessor, AccessorSparse, AccessorType, AlphaMode, Animation, AnimationChannel,
    AnimationSampler, AnimationTarget, Asset, Buffer, BufferView, BufferViewTarget, Camera,
    ComponentType, Document, Image, Interpolation, MagFilter, Material, Mesh, MeshMode,
    MeshPrimitive, MinFilter, MorphTarget, Node, NormalTextureInfo, OcclusionTextureInfo,
    Orthographic, PbrMetallicRoughness, Perspective, Projection, ProjectionType, Sampler, Scene,
    Skin, SparseIndices, SparseValues, TargetPath, Texture, TextureInfo, TransformationType,
    WrapMode,
};
pub use property::{Extensible, Property, PropertyContext};

use std::io::{Read, Write};

impl Document {
    /// Decode a document from JSON text
    ///
    /// Uses [`ParserConfig::default`], which resolves every built-in
    /// extension and keeps all others opaque.
    pub fn from_json(json: &str) -> Result<Self> {
        parser::parse_document(json, &ParserConfig::default())
    }

    /// Decode a document from JSON text with a custom configuration
    ///
    /// # Example
    ///
    /// ```
    /// use libgltf::{Document, ParserConfig};
    ///
    /// let json = r#"{
    ///     "asset": {"version": "2.0"},
    ///     "extensionsUsed": ["KHR_materials_unlit"],
    ///     "materials": [{"extensions": {"KHR_materials_unlit": {}}}]
    /// }"#;
    ///
    /// // Without decoders the extension stays in the opaque channel
    /// let document = Document::from_json_with_config(json, &ParserConfig::new())?;
    /// let material = document.materials.get("0")?;
    /// assert!(material.property.has_unregistered_extension("KHR_materials_unlit"));
    /// # Ok::<(), libgltf::Error>(())
    /// ```
    pub fn from_json_with_config(json: &str, config: &ParserConfig) -> Result<Self> {
        parser::parse_document(json, config)
    }

    /// Decode a document from a reader producing JSON text
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        parser::parse_document_from_reader(reader, &ParserConfig::default())
    }

    /// Encode the document as pretty-printed JSON text
    pub fn to_json(&self) -> Result<String> {
        writer::write_document(self, &WriterConfig::default())
    }

    /// Encode the document with a custom configuration
    pub fn to_json_with_config(&self, config: &WriterConfig) -> Result<String> {
        writer::write_document(self, config)
    }

    /// Encode the document as JSON text into `writer`
    pub fn to_writer<W: Write>(&self, writer: W, config: &WriterConfig) -> Result<()> {
        writer::write_document_to(self, config, writer)
    }

    /// Encode the document into a GLB envelope
    ///
    /// `bin` becomes the binary chunk, the data of the buffer without a
    /// `uri`. The JSON chunk is always compact.
    pub fn to_glb(&self, config: &WriterConfig, bin: Option<&[u8]>) -> Result<Vec<u8>> {
        let compact = config.clone().with_pretty(false);
        let json = writer::write_document(self, &compact)?;
        glb::write_glb(Vec::new(), &json, bin)
    }

    /// Decode a document from a GLB envelope
    ///
    /// Returns the document together with the binary chunk, if any.
    pub fn from_glb<R: Read>(reader: R, config: &ParserConfig) -> Result<(Self, Option<Vec<u8>>)> {
        let container = glb::read_glb(reader)?;
        let document = parser::parse_document(&container.json, config)?;
        Ok((document, container.bin))
    }
}

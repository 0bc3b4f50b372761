//! The document aggregate

use std::collections::BTreeSet;

use crate::container::{AppendIdPolicy, IndexedContainer};
use crate::error::{Error, Result};
use crate::property::{Property, impl_extensible};

use super::animation::Animation;
use super::camera::Camera;
use super::core::{Accessor, Asset, Buffer, BufferView, Node, Scene, Skin};
use super::material::{Image, Material, Sampler, Texture};
use super::mesh::Mesh;

/// A complete glTF document
///
/// Holds one registry per entity kind plus document-level metadata. All
/// cross-entity references are ids; they are checked against the
/// registries when the document is validated or written, so entities may
/// be appended in any order.
///
/// # Example
///
/// ```
/// use libgltf::{AppendIdPolicy, Document, Node, Scene};
///
/// let mut document = Document::new();
/// document.append_node(Node::new("root"), AppendIdPolicy::ThrowOnEmpty)?;
///
/// let mut scene = Scene::new("main");
/// scene.nodes.push("root".to_string());
/// document.set_default_scene(scene, AppendIdPolicy::ThrowOnEmpty)?;
///
/// assert_eq!(document.default_scene()?.id, "main");
/// # Ok::<(), libgltf::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Asset metadata
    pub asset: Asset,
    /// Accessors registry
    pub accessors: IndexedContainer<Accessor>,
    /// Animations registry
    pub animations: IndexedContainer<Animation>,
    /// Buffers registry
    pub buffers: IndexedContainer<Buffer>,
    /// Buffer views registry
    pub buffer_views: IndexedContainer<BufferView>,
    /// Cameras registry
    pub cameras: IndexedContainer<Camera>,
    /// Images registry
    pub images: IndexedContainer<Image>,
    /// Materials registry
    pub materials: IndexedContainer<Material>,
    /// Meshes registry
    pub meshes: IndexedContainer<Mesh>,
    /// Nodes registry
    pub nodes: IndexedContainer<Node>,
    /// Samplers registry
    pub samplers: IndexedContainer<Sampler>,
    /// Scenes registry
    pub scenes: IndexedContainer<Scene>,
    /// Skins registry
    pub skins: IndexedContainer<Skin>,
    /// Textures registry
    pub textures: IndexedContainer<Texture>,
    /// Names of every extension used anywhere in the document
    pub extensions_used: BTreeSet<String>,
    /// Names of extensions a loader must support; a subset of
    /// `extensions_used`
    pub extensions_required: BTreeSet<String>,
    /// Id of the scene to display by default
    pub default_scene_id: Option<String>,
    /// Root-level extensions and extras
    pub property: Property,
}

macro_rules! appenders {
    ($($(#[$meta:meta])* $method:ident => $field:ident : $ty:ty),+ $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $method(&mut self, entity: $ty, policy: AppendIdPolicy) -> Result<&$ty> {
                self.$field.append(entity, policy)
            }
        )+
    };
}

impl Document {
    /// Create an empty document targeting glTF 2.0
    pub fn new() -> Self {
        Self::default()
    }

    appenders! {
        /// Append an accessor
        append_accessor => accessors: Accessor,
        /// Append an animation
        append_animation => animations: Animation,
        /// Append a buffer
        append_buffer => buffers: Buffer,
        /// Append a buffer view
        append_buffer_view => buffer_views: BufferView,
        /// Append a camera
        append_camera => cameras: Camera,
        /// Append an image
        append_image => images: Image,
        /// Append a material
        append_material => materials: Material,
        /// Append a mesh
        append_mesh => meshes: Mesh,
        /// Append a node
        append_node => nodes: Node,
        /// Append a sampler
        append_sampler => samplers: Sampler,
        /// Append a scene
        append_scene => scenes: Scene,
        /// Append a skin
        append_skin => skins: Skin,
        /// Append a texture
        append_texture => textures: Texture,
    }

    /// Append a scene and make it the default
    pub fn set_default_scene(&mut self, scene: Scene, policy: AppendIdPolicy) -> Result<&Scene> {
        let id = self.scenes.append(scene, policy)?.id.clone();
        self.default_scene_id = Some(id.clone());
        self.scenes.get(&id)
    }

    /// Whether a default scene id is set
    ///
    /// The id is not required to resolve; see [`Document::default_scene`].
    pub fn has_default_scene(&self) -> bool {
        self.default_scene_id.is_some()
    }

    /// The scene to display by default
    ///
    /// Falls back to the first scene when no default is set.
    ///
    /// # Errors
    ///
    /// * [`Error::NotFound`] if the default id does not resolve
    /// * [`Error::DefaultSceneNotFound`] if there is no default and no scene
    pub fn default_scene(&self) -> Result<&Scene> {
        match &self.default_scene_id {
            Some(id) => self.scenes.get(id),
            None => self.scenes.get_at(0).ok_or(Error::DefaultSceneNotFound),
        }
    }

    /// Whether `name` is listed in `extensionsUsed`
    pub fn is_extension_used(&self, name: &str) -> bool {
        self.extensions_used.contains(name)
    }

    /// Whether `name` is listed in `extensionsRequired`
    pub fn is_extension_required(&self, name: &str) -> bool {
        self.extensions_required.contains(name)
    }

    /// List an extension in `extensionsUsed`, and in `extensionsRequired`
    /// when `required` is set
    pub fn declare_extension(&mut self, name: impl Into<String>, required: bool) {
        let name = name.into();
        if required {
            self.extensions_required.insert(name.clone());
        }
        self.extensions_used.insert(name);
    }

    /// Check every document invariant
    ///
    /// Runs the same checks as the writer does before producing output.
    pub fn validate(&self) -> Result<()> {
        crate::validator::validate_document(self)
    }
}

impl_extensible!(Document => Document, |this, visitor| {
    this.asset.visit_properties_mut(visitor)?;

    macro_rules! visit_all {
        ($($field:ident),+) => {
            $(
                for entity in this.$field.iter_mut() {
                    entity.visit_properties_mut(visitor)?;
                }
            )+
        };
    }

    visit_all!(
        accessors,
        animations,
        buffers,
        buffer_views,
        cameras,
        images,
        materials,
        meshes,
        nodes,
        samplers,
        scenes,
        skins,
        textures
    );
    Ok(())
});

//! Data structures representing glTF documents
//!
//! Entities reference each other by stable string id. Ids are translated to
//! positional indices only when a document is written, so entities can be
//! built and edited in any order.

/// Implement [`Identified`](crate::container::Identified) for a type with an
/// `id: String` field
macro_rules! identified {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::container::Identified for $ty {
                fn id(&self) -> &str {
                    &self.id
                }

                fn set_id(&mut self, id: String) {
                    self.id = id;
                }
            }
        )+
    };
}

// Declare all submodules
mod animation;
mod camera;
mod core;
mod document;
mod material;
mod mesh;

// Re-export all public types from core module
pub use core::{
    Accessor, AccessorSparse, AccessorType, Asset, Buffer, BufferView, BufferViewTarget,
    ComponentType, Node, Scene, Skin, SparseIndices, SparseValues, TransformationType,
};

// Re-export all public types from material module
pub use material::{
    AlphaMode, Image, MagFilter, Material, MinFilter, NormalTextureInfo, OcclusionTextureInfo,
    PbrMetallicRoughness, Sampler, Texture, TextureInfo, WrapMode,
};

// Re-export all public types from mesh module
pub use mesh::{Mesh, MeshMode, MeshPrimitive, MorphTarget};

// Re-export all public types from camera module
pub use camera::{Camera, Orthographic, Perspective, Projection, ProjectionType};

// Re-export all public types from animation module
pub use animation::{
    Animation, AnimationChannel, AnimationSampler, AnimationTarget, Interpolation, TargetPath,
};

pub use document::Document;

//! Built-in Khronos extensions
//!
//! Each submodule defines one typed payload together with its encode and
//! decode functions. [`khr_serializer`] and [`khr_deserializer`] register all
//! of them for the owner contexts the extension specifications allow.

pub mod draco_mesh_compression;
pub mod pbr_specular_glossiness;
pub mod texture_transform;
pub mod unlit;

pub use draco_mesh_compression::DracoMeshCompression;
pub use pbr_specular_glossiness::PbrSpecularGlossiness;
pub use texture_transform::TextureTransform;
pub use unlit::Unlit;

use crate::extension::{ExtensionDeserializer, ExtensionSerializer, PayloadKind};
use crate::property::PropertyContext;

/// Owner contexts of `KHR_texture_transform`
const TEXTURE_INFO_CONTEXTS: [PropertyContext; 3] = [
    PropertyContext::TextureInfo,
    PropertyContext::NormalTextureInfo,
    PropertyContext::OcclusionTextureInfo,
];

/// Encoders for every built-in extension
pub fn khr_serializer() -> ExtensionSerializer {
    let mut serializer = ExtensionSerializer::new();
    serializer
        .register(
            PayloadKind::PbrSpecularGlossiness,
            pbr_specular_glossiness::EXTENSION_NAME,
            PropertyContext::Material,
            pbr_specular_glossiness::encode,
        )
        .register(
            PayloadKind::Unlit,
            unlit::EXTENSION_NAME,
            PropertyContext::Material,
            unlit::encode,
        )
        .register(
            PayloadKind::DracoMeshCompression,
            draco_mesh_compression::EXTENSION_NAME,
            PropertyContext::MeshPrimitive,
            draco_mesh_compression::encode,
        );
    for context in TEXTURE_INFO_CONTEXTS {
        serializer.register(
            PayloadKind::TextureTransform,
            texture_transform::EXTENSION_NAME,
            context,
            texture_transform::encode,
        );
    }
    serializer
}

/// Decoders for every built-in extension
pub fn khr_deserializer() -> ExtensionDeserializer {
    let mut deserializer = ExtensionDeserializer::new();
    deserializer
        .register(
            pbr_specular_glossiness::EXTENSION_NAME,
            PropertyContext::Material,
            pbr_specular_glossiness::decode,
        )
        .register(unlit::EXTENSION_NAME, PropertyContext::Material, unlit::decode)
        .register(
            draco_mesh_compression::EXTENSION_NAME,
            PropertyContext::MeshPrimitive,
            draco_mesh_compression::decode,
        );
    for context in TEXTURE_INFO_CONTEXTS {
        deserializer.register(
            texture_transform::EXTENSION_NAME,
            context,
            texture_transform::decode,
        );
    }
    deserializer
}

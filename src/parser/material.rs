//! Readers for materials, textures, images and samplers

use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{
    AlphaMode, Image, MagFilter, Material, MinFilter, NormalTextureInfo, OcclusionTextureInfo,
    PbrMetallicRoughness, Sampler, Texture, TextureInfo, WrapMode,
};

use super::core::Object;

/// Read a `textureInfo` object
pub(crate) fn read_texture_info(value: &Value, path: &str) -> Result<TextureInfo> {
    let object = Object::new(value, path)?;
    texture_info(&object)
}

fn texture_info(object: &Object<'_>) -> Result<TextureInfo> {
    Ok(TextureInfo {
        texture_id: object.required_index("index")?,
        tex_coord: object.u32("texCoord")?.unwrap_or(0),
        property: object.property()?,
    })
}

fn optional_texture_info(object: &Object<'_>, key: &str) -> Result<Option<TextureInfo>> {
    object
        .object(key)?
        .map(|info| texture_info(&info))
        .transpose()
}

fn read_pbr(object: &Object<'_>) -> Result<PbrMetallicRoughness> {
    let defaults = PbrMetallicRoughness::default();
    Ok(PbrMetallicRoughness {
        base_color_factor: object
            .color4("baseColorFactor")?
            .unwrap_or(defaults.base_color_factor),
        base_color_texture: optional_texture_info(object, "baseColorTexture")?,
        metallic_factor: object
            .f32("metallicFactor")?
            .unwrap_or(defaults.metallic_factor),
        roughness_factor: object
            .f32("roughnessFactor")?
            .unwrap_or(defaults.roughness_factor),
        metallic_roughness_texture: optional_texture_info(object, "metallicRoughnessTexture")?,
        property: object.property()?,
    })
}

pub(crate) fn read_material(id: String, object: &Object<'_>) -> Result<Material> {
    let defaults = Material::default();

    let normal_texture = match object.object("normalTexture")? {
        None => None,
        Some(info) => Some(NormalTextureInfo {
            texture_id: info.required_index("index")?,
            tex_coord: info.u32("texCoord")?.unwrap_or(0),
            scale: info.f32("scale")?.unwrap_or(1.0),
            property: info.property()?,
        }),
    };

    let occlusion_texture = match object.object("occlusionTexture")? {
        None => None,
        Some(info) => Some(OcclusionTextureInfo {
            texture_id: info.required_index("index")?,
            tex_coord: info.u32("texCoord")?.unwrap_or(0),
            strength: info.f32("strength")?.unwrap_or(1.0),
            property: info.property()?,
        }),
    };

    let alpha_mode = match object.string("alphaMode")? {
        None => AlphaMode::Opaque,
        Some(name) => AlphaMode::parse(&name).ok_or_else(|| {
            Error::invalid_at(
                &object.child_path("alphaMode"),
                &format!("unknown alpha mode '{}'", name),
            )
        })?,
    };

    Ok(Material {
        id,
        name: object.string("name")?,
        pbr_metallic_roughness: object
            .object("pbrMetallicRoughness")?
            .map(|pbr| read_pbr(&pbr))
            .transpose()?
            .unwrap_or_default(),
        normal_texture,
        occlusion_texture,
        emissive_texture: optional_texture_info(object, "emissiveTexture")?,
        emissive_factor: object
            .color3("emissiveFactor")?
            .unwrap_or(defaults.emissive_factor),
        alpha_mode,
        alpha_cutoff: object.f32("alphaCutoff")?.unwrap_or(defaults.alpha_cutoff),
        double_sided: object.bool("doubleSided")?.unwrap_or(false),
        property: object.property()?,
    })
}

pub(crate) fn read_texture(id: String, object: &Object<'_>) -> Result<Texture> {
    Ok(Texture {
        id,
        name: object.string("name")?,
        sampler_id: object.index("sampler")?,
        image_id: object.index("source")?,
        property: object.property()?,
    })
}

pub(crate) fn read_image(id: String, object: &Object<'_>) -> Result<Image> {
    Ok(Image {
        id,
        name: object.string("name")?,
        uri: object.string("uri")?,
        mime_type: object.string("mimeType")?,
        buffer_view_id: object.index("bufferView")?,
        property: object.property()?,
    })
}

fn filter_code<T>(object: &Object<'_>, key: &str, parse: fn(u64) -> Option<T>) -> Result<Option<T>> {
    match object.u64(key)? {
        None => Ok(None),
        Some(code) => parse(code).map(Some).ok_or_else(|| {
            Error::invalid_at(&object.child_path(key), &format!("unknown sampler code {}", code))
        }),
    }
}

pub(crate) fn read_sampler(id: String, object: &Object<'_>) -> Result<Sampler> {
    Ok(Sampler {
        id,
        name: object.string("name")?,
        mag_filter: filter_code(object, "magFilter", MagFilter::from_code)?,
        min_filter: filter_code(object, "minFilter", MinFilter::from_code)?,
        wrap_s: filter_code(object, "wrapS", WrapMode::from_code)?.unwrap_or_default(),
        wrap_t: filter_code(object, "wrapT", WrapMode::from_code)?.unwrap_or_default(),
        property: object.property()?,
    })
}

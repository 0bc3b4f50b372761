//! Writers for materials, textures, images and samplers

use serde_json::{Map, Value};

use crate::error::Result;
use crate::extension::ExtensionSerializer;
use crate::math::{self, Color3, Color4};
use crate::model::{
    AlphaMode, Document, Image, Material, NormalTextureInfo, OcclusionTextureInfo,
    PbrMetallicRoughness, Sampler, Texture, TextureInfo, WrapMode,
};
use crate::property::PropertyContext;

use super::{DocumentWriter, index, insert_opt, write_property};

/// Encode a texture reference
pub(crate) fn write_texture_info(
    info: &TextureInfo,
    document: &Document,
    serializer: &ExtensionSerializer,
) -> Result<Value> {
    let mut object = Map::new();
    object.insert("index".into(), index(&document.textures, &info.texture_id)?);
    if info.tex_coord != 0 {
        object.insert("texCoord".into(), Value::from(info.tex_coord));
    }
    write_property(
        &mut object,
        &info.property,
        PropertyContext::TextureInfo,
        document,
        serializer,
    )?;
    Ok(Value::Object(object))
}

impl DocumentWriter<'_> {
    fn write_texture_info(&self, info: &TextureInfo) -> Result<Value> {
        write_texture_info(info, self.document, self.serializer)
    }

    fn write_normal_texture(&self, info: &NormalTextureInfo) -> Result<Value> {
        let mut object = Map::new();
        object.insert(
            "index".into(),
            index(&self.document.textures, &info.texture_id)?,
        );
        if info.tex_coord != 0 {
            object.insert("texCoord".into(), Value::from(info.tex_coord));
        }
        if info.scale != 1.0 {
            object.insert("scale".into(), math::number(info.scale));
        }
        self.write_property(&mut object, &info.property, PropertyContext::NormalTextureInfo)?;
        Ok(Value::Object(object))
    }

    fn write_occlusion_texture(&self, info: &OcclusionTextureInfo) -> Result<Value> {
        let mut object = Map::new();
        object.insert(
            "index".into(),
            index(&self.document.textures, &info.texture_id)?,
        );
        if info.tex_coord != 0 {
            object.insert("texCoord".into(), Value::from(info.tex_coord));
        }
        if info.strength != 1.0 {
            object.insert("strength".into(), math::number(info.strength));
        }
        self.write_property(
            &mut object,
            &info.property,
            PropertyContext::OcclusionTextureInfo,
        )?;
        Ok(Value::Object(object))
    }

    fn write_pbr(&self, pbr: &PbrMetallicRoughness) -> Result<Value> {
        let mut object = Map::new();
        if pbr.base_color_factor != Color4::WHITE {
            object.insert("baseColorFactor".into(), pbr.base_color_factor.to_json());
        }
        if let Some(texture) = &pbr.base_color_texture {
            object.insert("baseColorTexture".into(), self.write_texture_info(texture)?);
        }
        if pbr.metallic_factor != 1.0 {
            object.insert("metallicFactor".into(), math::number(pbr.metallic_factor));
        }
        if pbr.roughness_factor != 1.0 {
            object.insert("roughnessFactor".into(), math::number(pbr.roughness_factor));
        }
        if let Some(texture) = &pbr.metallic_roughness_texture {
            object.insert(
                "metallicRoughnessTexture".into(),
                self.write_texture_info(texture)?,
            );
        }
        self.write_property(&mut object, &pbr.property, PropertyContext::PbrMetallicRoughness)?;
        Ok(Value::Object(object))
    }

    pub(super) fn write_material(&self, material: &Material) -> Result<Value> {
        let mut object = Map::new();
        insert_opt(&mut object, "name", material.name.clone().map(Value::String));
        if !material.pbr_metallic_roughness.is_default() {
            object.insert(
                "pbrMetallicRoughness".into(),
                self.write_pbr(&material.pbr_metallic_roughness)?,
            );
        }
        if let Some(texture) = &material.normal_texture {
            object.insert("normalTexture".into(), self.write_normal_texture(texture)?);
        }
        if let Some(texture) = &material.occlusion_texture {
            object.insert("occlusionTexture".into(), self.write_occlusion_texture(texture)?);
        }
        if let Some(texture) = &material.emissive_texture {
            object.insert("emissiveTexture".into(), self.write_texture_info(texture)?);
        }
        if material.emissive_factor != Color3::BLACK {
            object.insert("emissiveFactor".into(), material.emissive_factor.to_json());
        }
        if material.alpha_mode != AlphaMode::Opaque {
            object.insert("alphaMode".into(), Value::from(material.alpha_mode.as_str()));
        }
        if material.alpha_cutoff != 0.5 {
            object.insert("alphaCutoff".into(), math::number(material.alpha_cutoff));
        }
        if material.double_sided {
            object.insert("doubleSided".into(), Value::Bool(true));
        }
        self.write_property(&mut object, &material.property, PropertyContext::Material)?;
        Ok(Value::Object(object))
    }

    pub(super) fn write_texture(&self, texture: &Texture) -> Result<Value> {
        let document = self.document;
        let mut object = Map::new();
        insert_opt(&mut object, "name", texture.name.clone().map(Value::String));
        if let Some(id) = &texture.sampler_id {
            object.insert("sampler".into(), index(&document.samplers, id)?);
        }
        if let Some(id) = &texture.image_id {
            object.insert("source".into(), index(&document.images, id)?);
        }
        self.write_property(&mut object, &texture.property, PropertyContext::Texture)?;
        Ok(Value::Object(object))
    }

    pub(super) fn write_image(&self, image: &Image) -> Result<Value> {
        let mut object = Map::new();
        insert_opt(&mut object, "name", image.name.clone().map(Value::String));
        insert_opt(&mut object, "uri", image.uri.clone().map(Value::String));
        insert_opt(&mut object, "mimeType", image.mime_type.clone().map(Value::String));
        if let Some(id) = &image.buffer_view_id {
            object.insert("bufferView".into(), index(&self.document.buffer_views, id)?);
        }
        self.write_property(&mut object, &image.property, PropertyContext::Image)?;
        Ok(Value::Object(object))
    }

    pub(super) fn write_sampler(&self, sampler: &Sampler) -> Result<Value> {
        let mut object = Map::new();
        insert_opt(&mut object, "name", sampler.name.clone().map(Value::String));
        insert_opt(
            &mut object,
            "magFilter",
            sampler.mag_filter.map(|f| Value::from(f.code())),
        );
        insert_opt(
            &mut object,
            "minFilter",
            sampler.min_filter.map(|f| Value::from(f.code())),
        );
        if sampler.wrap_s != WrapMode::Repeat {
            object.insert("wrapS".into(), Value::from(sampler.wrap_s.code()));
        }
        if sampler.wrap_t != WrapMode::Repeat {
            object.insert("wrapT".into(), Value::from(sampler.wrap_t.code()));
        }
        self.write_property(&mut object, &sampler.property, PropertyContext::Sampler)?;
        Ok(Value::Object(object))
    }
}

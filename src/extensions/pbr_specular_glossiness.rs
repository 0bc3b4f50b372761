//! `KHR_materials_pbrSpecularGlossiness`: specular-glossiness workflow

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::extension::{DecodeContext, EncodeContext, ExtensionPayload, typed_extension};
use crate::math::{self, Color3, Color4};
use crate::model::TextureInfo;
use crate::parser::Object;
use crate::property::{Property, PropertyContext};

/// Name of the extension
pub const EXTENSION_NAME: &str = "KHR_materials_pbrSpecularGlossiness";

/// Specular-glossiness material parameters
#[derive(Debug, Clone, PartialEq)]
pub struct PbrSpecularGlossiness {
    /// Reflected diffuse color
    pub diffuse_factor: Color4,
    /// Diffuse color map
    pub diffuse_texture: Option<TextureInfo>,
    /// Specular color
    pub specular_factor: Color3,
    /// Glossiness, 1.0 being fully glossy
    pub glossiness_factor: f32,
    /// Specular color (RGB) and glossiness (A) map
    pub specular_glossiness_texture: Option<TextureInfo>,
    /// Extensions and extras of the extension object
    pub property: Property,
}

impl Default for PbrSpecularGlossiness {
    fn default() -> Self {
        Self {
            diffuse_factor: Color4::WHITE,
            diffuse_texture: None,
            specular_factor: Color3::WHITE,
            glossiness_factor: 1.0,
            specular_glossiness_texture: None,
            property: Property::default(),
        }
    }
}

typed_extension!(PbrSpecularGlossiness);

pub(crate) fn encode(payload: &ExtensionPayload, context: &EncodeContext<'_>) -> Result<Value> {
    let ExtensionPayload::PbrSpecularGlossiness(material) = payload else {
        return Err(Error::ExtensionNotFound(EXTENSION_NAME.into()));
    };

    let mut object = Map::new();
    if material.diffuse_factor != Color4::WHITE {
        object.insert("diffuseFactor".into(), material.diffuse_factor.to_json());
    }
    if let Some(texture) = &material.diffuse_texture {
        object.insert("diffuseTexture".into(), context.write_texture_info(texture)?);
    }
    if material.specular_factor != Color3::WHITE {
        object.insert("specularFactor".into(), material.specular_factor.to_json());
    }
    if material.glossiness_factor != 1.0 {
        object.insert(
            "glossinessFactor".into(),
            math::number(material.glossiness_factor),
        );
    }
    if let Some(texture) = &material.specular_glossiness_texture {
        object.insert(
            "specularGlossinessTexture".into(),
            context.write_texture_info(texture)?,
        );
    }
    context.write_property(&mut object, &material.property, PropertyContext::ExtensionObject)?;
    Ok(Value::Object(object))
}

pub(crate) fn decode(value: &Value, context: &DecodeContext<'_>) -> Result<ExtensionPayload> {
    let object = Object::new(value, context.path)?;
    let texture = |key: &str| -> Result<Option<TextureInfo>> {
        object
            .get(key)
            .map(|info| context.read_texture_info(info, &object.child_path(key)))
            .transpose()
    };

    let defaults = PbrSpecularGlossiness::default();
    Ok(ExtensionPayload::PbrSpecularGlossiness(PbrSpecularGlossiness {
        diffuse_factor: object
            .color4("diffuseFactor")?
            .unwrap_or(defaults.diffuse_factor),
        diffuse_texture: texture("diffuseTexture")?,
        specular_factor: object
            .color3("specularFactor")?
            .unwrap_or(defaults.specular_factor),
        glossiness_factor: object
            .f32("glossinessFactor")?
            .unwrap_or(defaults.glossiness_factor),
        specular_glossiness_texture: texture("specularGlossinessTexture")?,
        property: context.read_property(value, PropertyContext::ExtensionObject)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ParserConfig, WriterConfig};
    use crate::extensions::TextureTransform;
    use crate::parser::parse_document;
    use crate::property::Extensible;
    use crate::writer::write_value;
    use serde_json::json;

    const DOCUMENT: &str = r#"{
        "asset": {"version": "2.0"},
        "extensionsUsed": ["KHR_materials_pbrSpecularGlossiness", "KHR_texture_transform"],
        "images": [{"uri": "diffuse.png"}],
        "textures": [{"source": 0}],
        "materials": [{
            "extensions": {
                "KHR_materials_pbrSpecularGlossiness": {
                    "diffuseFactor": [0.5, 0.5, 0.5, 1],
                    "glossinessFactor": 0.25,
                    "diffuseTexture": {
                        "index": 0,
                        "extensions": {"KHR_texture_transform": {"rotation": 0.5}}
                    }
                }
            }
        }]
    }"#;

    #[test]
    fn test_nested_texture_transform_is_resolved() {
        let document = parse_document(DOCUMENT, &ParserConfig::with_all_extensions()).unwrap();
        let material = document.materials.get("0").unwrap();
        let spec_gloss = material.extension::<PbrSpecularGlossiness>().unwrap();

        assert_eq!(spec_gloss.diffuse_factor, Color4::new(0.5, 0.5, 0.5, 1.0));
        assert_eq!(spec_gloss.specular_factor, Color3::WHITE);
        assert_eq!(spec_gloss.glossiness_factor, 0.25);

        let diffuse = spec_gloss.diffuse_texture.as_ref().unwrap();
        assert_eq!(diffuse.texture_id, "0");
        assert_eq!(diffuse.extension::<TextureTransform>().unwrap().rotation, 0.5);
    }

    #[test]
    fn test_encode_omits_defaults() {
        let document = parse_document(DOCUMENT, &ParserConfig::with_all_extensions()).unwrap();
        let value = write_value(&document, &WriterConfig::with_all_extensions()).unwrap();
        assert_eq!(
            value["materials"][0]["extensions"][EXTENSION_NAME],
            json!({
                "diffuseFactor": [0.5, 0.5, 0.5, 1.0],
                "glossinessFactor": 0.25,
                "diffuseTexture": {
                    "index": 0,
                    "extensions": {"KHR_texture_transform": {"rotation": 0.5}}
                }
            })
        );
    }
}

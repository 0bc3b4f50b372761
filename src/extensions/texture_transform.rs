//! `KHR_texture_transform`: UV offset, rotation and scale for a texture
//! reference

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::extension::{DecodeContext, EncodeContext, ExtensionPayload, typed_extension};
use crate::math::{self, Vector2};
use crate::parser::Object;
use crate::property::{Property, PropertyContext};

/// Name of the extension
pub const EXTENSION_NAME: &str = "KHR_texture_transform";

/// UV transform applied before sampling
#[derive(Debug, Clone, PartialEq)]
pub struct TextureTransform {
    /// UV offset
    pub offset: Vector2,
    /// Counter-clockwise rotation in radians
    pub rotation: f32,
    /// UV scale
    pub scale: Vector2,
    /// Overrides the texture coordinate set of the owning reference
    pub tex_coord: Option<u32>,
    /// Extensions and extras of the extension object
    pub property: Property,
}

impl Default for TextureTransform {
    fn default() -> Self {
        Self {
            offset: Vector2::ZERO,
            rotation: 0.0,
            scale: Vector2::ONE,
            tex_coord: None,
            property: Property::default(),
        }
    }
}

typed_extension!(TextureTransform);

pub(crate) fn encode(payload: &ExtensionPayload, context: &EncodeContext<'_>) -> Result<Value> {
    let ExtensionPayload::TextureTransform(transform) = payload else {
        return Err(Error::ExtensionNotFound(EXTENSION_NAME.into()));
    };

    let mut object = Map::new();
    if transform.offset != Vector2::ZERO {
        object.insert("offset".into(), transform.offset.to_json());
    }
    if transform.rotation != 0.0 {
        object.insert("rotation".into(), math::number(transform.rotation));
    }
    if transform.scale != Vector2::ONE {
        object.insert("scale".into(), transform.scale.to_json());
    }
    if let Some(tex_coord) = transform.tex_coord {
        object.insert("texCoord".into(), Value::from(tex_coord));
    }
    context.write_property(&mut object, &transform.property, PropertyContext::ExtensionObject)?;
    Ok(Value::Object(object))
}

pub(crate) fn decode(value: &Value, context: &DecodeContext<'_>) -> Result<ExtensionPayload> {
    let object = Object::new(value, context.path)?;
    let defaults = TextureTransform::default();
    Ok(ExtensionPayload::TextureTransform(TextureTransform {
        offset: object.vector2("offset")?.unwrap_or(defaults.offset),
        rotation: object.f32("rotation")?.unwrap_or(defaults.rotation),
        scale: object.vector2("scale")?.unwrap_or(defaults.scale),
        tex_coord: object.u32("texCoord")?,
        property: context.read_property(value, PropertyContext::ExtensionObject)?,
    }))
}

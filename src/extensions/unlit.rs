//! `KHR_materials_unlit`: constant shading

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::extension::{DecodeContext, EncodeContext, ExtensionPayload, typed_extension};
use crate::property::{Property, PropertyContext};

/// Name of the extension
pub const EXTENSION_NAME: &str = "KHR_materials_unlit";

/// Marks a material as unlit; the extension carries no parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Unlit {
    /// Extensions and extras of the extension object
    pub property: Property,
}

typed_extension!(Unlit);

pub(crate) fn encode(payload: &ExtensionPayload, context: &EncodeContext<'_>) -> Result<Value> {
    let ExtensionPayload::Unlit(unlit) = payload else {
        return Err(Error::ExtensionNotFound(EXTENSION_NAME.into()));
    };
    let mut object = Map::new();
    context.write_property(&mut object, &unlit.property, PropertyContext::ExtensionObject)?;
    Ok(Value::Object(object))
}

pub(crate) fn decode(value: &Value, context: &DecodeContext<'_>) -> Result<ExtensionPayload> {
    Ok(ExtensionPayload::Unlit(Unlit {
        property: context.read_property(value, PropertyContext::ExtensionObject)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ParserConfig, WriterConfig};
    use crate::parser::parse_document;
    use crate::property::Extensible;
    use crate::writer::write_value;
    use serde_json::json;

    #[test]
    fn test_unlit_material_round_trip() {
        let json = r#"{
            "asset": {"version": "2.0"},
            "extensionsUsed": ["KHR_materials_unlit"],
            "materials": [{"extensions": {"KHR_materials_unlit": {}}}]
        }"#;
        let document = parse_document(json, &ParserConfig::with_all_extensions()).unwrap();
        let material = document.materials.get("0").unwrap();
        assert!(material.has_extension::<Unlit>());
        assert!(material.property.extensions.is_empty());

        let value = write_value(&document, &WriterConfig::with_all_extensions()).unwrap();
        assert_eq!(
            value["materials"][0]["extensions"],
            json!({"KHR_materials_unlit": {}})
        );
    }
}

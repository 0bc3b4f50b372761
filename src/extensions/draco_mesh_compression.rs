//! `KHR_draco_mesh_compression`: Draco-compressed primitive geometry

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::extension::{DecodeContext, EncodeContext, ExtensionPayload, typed_extension};
use crate::parser::Object;
use crate::property::{Property, PropertyContext};

/// Name of the extension
pub const EXTENSION_NAME: &str = "KHR_draco_mesh_compression";

/// Location of the compressed stream and its attribute mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DracoMeshCompression {
    /// Id of the [`BufferView`](crate::BufferView) holding the compressed data
    pub buffer_view_id: String,
    /// Primitive attribute semantic to Draco attribute id
    pub attributes: BTreeMap<String, u32>,
    /// Extensions and extras of the extension object
    pub property: Property,
}

typed_extension!(DracoMeshCompression);

pub(crate) fn encode(payload: &ExtensionPayload, context: &EncodeContext<'_>) -> Result<Value> {
    let ExtensionPayload::DracoMeshCompression(draco) = payload else {
        return Err(Error::ExtensionNotFound(EXTENSION_NAME.into()));
    };

    let mut object = Map::new();
    object.insert(
        "bufferView".into(),
        Value::from(context.document.buffer_views.index_of(&draco.buffer_view_id)?),
    );
    let attributes = draco
        .attributes
        .iter()
        .map(|(semantic, id)| (semantic.clone(), Value::from(*id)))
        .collect::<Map<_, _>>();
    object.insert("attributes".into(), Value::Object(attributes));
    context.write_property(&mut object, &draco.property, PropertyContext::ExtensionObject)?;
    Ok(Value::Object(object))
}

pub(crate) fn decode(value: &Value, context: &DecodeContext<'_>) -> Result<ExtensionPayload> {
    let object = Object::new(value, context.path)?;
    let buffer_view_id = object.required_index("bufferView")?;

    let members = object.required_object("attributes")?;
    let mut attributes = BTreeMap::new();
    for semantic in members.members().keys() {
        let id = members
            .u32(semantic)?
            .ok_or_else(|| Error::missing_member(members.path(), semantic))?;
        attributes.insert(semantic.clone(), id);
    }

    Ok(ExtensionPayload::DracoMeshCompression(DracoMeshCompression {
        buffer_view_id,
        attributes,
        property: context.read_property(value, PropertyContext::ExtensionObject)?,
    }))
}

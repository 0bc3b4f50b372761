//! Readers for meshes and primitives

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::model::{Mesh, MeshMode, MeshPrimitive, MorphTarget};

use super::core::Object;

fn read_attributes(object: &Object<'_>) -> Result<BTreeMap<String, String>> {
    let Some(attributes) = object.object("attributes")? else {
        return Ok(BTreeMap::new());
    };
    let mut map = BTreeMap::new();
    for name in attributes.members().keys() {
        map.insert(name.clone(), attributes.required_index(name)?);
    }
    Ok(map)
}

const TARGET_SEMANTICS: [&str; 3] = ["POSITION", "NORMAL", "TANGENT"];

fn read_target(object: &Object<'_>) -> Result<MorphTarget> {
    for name in object
        .members()
        .keys()
        .filter(|name| !TARGET_SEMANTICS.contains(&name.as_str()))
    {
        log::debug!("Skipping morph target attribute {} at {}", name, object.path());
    }

    Ok(MorphTarget {
        position_id: object.index("POSITION")?,
        normal_id: object.index("NORMAL")?,
        tangent_id: object.index("TANGENT")?,
    })
}

fn read_primitive(object: &Object<'_>) -> Result<MeshPrimitive> {
    let mode = match object.u64("mode")? {
        None => MeshMode::Triangles,
        Some(code) => MeshMode::from_code(code).ok_or_else(|| {
            Error::invalid_at(&object.child_path("mode"), &format!("unknown primitive mode {}", code))
        })?,
    };

    let mut targets = Vec::new();
    for (index, target) in object.array("targets")?.iter().enumerate() {
        let path = format!("{}/{}", object.child_path("targets"), index);
        targets.push(read_target(&Object::new(target, path)?)?);
    }

    Ok(MeshPrimitive {
        attributes: read_attributes(object)?,
        indices_id: object.index("indices")?,
        material_id: object.index("material")?,
        mode,
        targets,
        property: object.property()?,
    })
}

pub(crate) fn read_mesh(id: String, object: &Object<'_>) -> Result<Mesh> {
    let mut primitives = Vec::new();
    for (index, primitive) in object.array("primitives")?.iter().enumerate() {
        let path = format!("{}/{}", object.child_path("primitives"), index);
        primitives.push(read_primitive(&Object::new(primitive, path)?)?);
    }

    Ok(Mesh {
        id,
        name: object.string("name")?,
        primitives,
        weights: object.floats("weights")?.unwrap_or_default(),
        property: object.property()?,
    })
}

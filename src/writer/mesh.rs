//! Writer for meshes

use serde_json::{Map, Value};

use crate::error::Result;
use crate::math;
use crate::model::{Mesh, MeshMode, MeshPrimitive};
use crate::property::PropertyContext;

use super::{DocumentWriter, index};

impl DocumentWriter<'_> {
    fn write_primitive(&self, primitive: &MeshPrimitive) -> Result<Value> {
        let document = self.document;
        let mut object = Map::new();

        let mut attributes = Map::new();
        for (semantic, id) in &primitive.attributes {
            attributes.insert(semantic.clone(), index(&document.accessors, id)?);
        }
        object.insert("attributes".into(), Value::Object(attributes));

        if let Some(id) = &primitive.indices_id {
            object.insert("indices".into(), index(&document.accessors, id)?);
        }
        if let Some(id) = &primitive.material_id {
            object.insert("material".into(), index(&document.materials, id)?);
        }
        if primitive.mode != MeshMode::Triangles {
            object.insert("mode".into(), Value::from(primitive.mode.code()));
        }

        if !primitive.targets.is_empty() {
            let mut targets = Vec::with_capacity(primitive.targets.len());
            for target in &primitive.targets {
                let mut members = Map::new();
                for (semantic, id) in target.attributes() {
                    members.insert(semantic.into(), index(&document.accessors, id)?);
                }
                targets.push(Value::Object(members));
            }
            object.insert("targets".into(), Value::Array(targets));
        }

        self.write_property(&mut object, &primitive.property, PropertyContext::MeshPrimitive)?;
        Ok(Value::Object(object))
    }

    pub(super) fn write_mesh(&self, mesh: &Mesh) -> Result<Value> {
        let mut object = Map::new();
        if let Some(name) = &mesh.name {
            object.insert("name".into(), Value::String(name.clone()));
        }
        let primitives = mesh
            .primitives
            .iter()
            .map(|primitive| self.write_primitive(primitive))
            .collect::<Result<Vec<_>>>()?;
        object.insert("primitives".into(), Value::Array(primitives));
        if !mesh.weights.is_empty() {
            object.insert("weights".into(), math::number_array(&mesh.weights));
        }
        self.write_property(&mut object, &mesh.property, PropertyContext::Mesh)?;
        Ok(Value::Object(object))
    }
}

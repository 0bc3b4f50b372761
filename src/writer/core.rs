//! Writers for asset metadata, binary data and the scene graph

use serde_json::{Map, Value};

use crate::error::Result;
use crate::math::{self, Quaternion, Vector3};
use crate::model::{
    Accessor, AccessorSparse, Buffer, BufferView, Node, Scene, Skin, TransformationType,
};
use crate::property::PropertyContext;

use super::{DocumentWriter, index, index_array, insert_opt};

impl DocumentWriter<'_> {
    pub(super) fn write_asset(&self) -> Result<Value> {
        let asset = &self.document.asset;
        let mut object = Map::new();
        insert_opt(&mut object, "copyright", asset.copyright.clone().map(Value::String));
        insert_opt(&mut object, "generator", asset.generator.clone().map(Value::String));
        object.insert("version".into(), Value::String(asset.version.clone()));
        insert_opt(&mut object, "minVersion", asset.min_version.clone().map(Value::String));
        self.write_property(&mut object, &asset.property, PropertyContext::Asset)?;
        Ok(Value::Object(object))
    }

    pub(super) fn write_buffer(&self, buffer: &Buffer) -> Result<Value> {
        let mut object = Map::new();
        insert_opt(&mut object, "name", buffer.name.clone().map(Value::String));
        insert_opt(&mut object, "uri", buffer.uri.clone().map(Value::String));
        object.insert("byteLength".into(), Value::from(buffer.byte_length));
        self.write_property(&mut object, &buffer.property, PropertyContext::Buffer)?;
        Ok(Value::Object(object))
    }

    pub(super) fn write_buffer_view(&self, view: &BufferView) -> Result<Value> {
        let mut object = Map::new();
        insert_opt(&mut object, "name", view.name.clone().map(Value::String));
        object.insert("buffer".into(), index(&self.document.buffers, &view.buffer_id)?);
        object.insert("byteOffset".into(), Value::from(view.byte_offset));
        object.insert("byteLength".into(), Value::from(view.byte_length));
        insert_opt(&mut object, "byteStride", view.byte_stride.map(Value::from));
        insert_opt(&mut object, "target", view.target.map(|t| Value::from(t.code())));
        self.write_property(&mut object, &view.property, PropertyContext::BufferView)?;
        Ok(Value::Object(object))
    }

    pub(super) fn write_accessor(&self, accessor: &Accessor) -> Result<Value> {
        let views = &self.document.buffer_views;
        let mut object = Map::new();
        insert_opt(&mut object, "name", accessor.name.clone().map(Value::String));
        if let Some(id) = &accessor.buffer_view_id {
            object.insert("bufferView".into(), index(views, id)?);
        }
        if accessor.byte_offset != 0 {
            object.insert("byteOffset".into(), Value::from(accessor.byte_offset));
        }
        object.insert(
            "componentType".into(),
            Value::from(accessor.component_type.code()),
        );
        if accessor.normalized {
            object.insert("normalized".into(), Value::Bool(true));
        }
        object.insert("count".into(), Value::from(accessor.count));
        object.insert("type".into(), Value::from(accessor.accessor_type.as_str()));
        if !accessor.max.is_empty() {
            object.insert("max".into(), math::number_array(&accessor.max));
        }
        if !accessor.min.is_empty() {
            object.insert("min".into(), math::number_array(&accessor.min));
        }
        if let Some(sparse) = &accessor.sparse {
            object.insert("sparse".into(), self.write_sparse(sparse)?);
        }
        self.write_property(&mut object, &accessor.property, PropertyContext::Accessor)?;
        Ok(Value::Object(object))
    }

    fn write_sparse(&self, sparse: &AccessorSparse) -> Result<Value> {
        let views = &self.document.buffer_views;

        let mut indices = Map::new();
        indices.insert(
            "bufferView".into(),
            index(views, &sparse.indices.buffer_view_id)?,
        );
        if sparse.indices.byte_offset != 0 {
            indices.insert("byteOffset".into(), Value::from(sparse.indices.byte_offset));
        }
        indices.insert(
            "componentType".into(),
            Value::from(sparse.indices.component_type.code()),
        );
        self.write_property(
            &mut indices,
            &sparse.indices.property,
            PropertyContext::AccessorSparse,
        )?;

        let mut values = Map::new();
        values.insert(
            "bufferView".into(),
            index(views, &sparse.values.buffer_view_id)?,
        );
        if sparse.values.byte_offset != 0 {
            values.insert("byteOffset".into(), Value::from(sparse.values.byte_offset));
        }
        self.write_property(
            &mut values,
            &sparse.values.property,
            PropertyContext::AccessorSparse,
        )?;

        let mut object = Map::new();
        object.insert("count".into(), Value::from(sparse.count));
        object.insert("indices".into(), Value::Object(indices));
        object.insert("values".into(), Value::Object(values));
        self.write_property(&mut object, &sparse.property, PropertyContext::AccessorSparse)?;
        Ok(Value::Object(object))
    }

    pub(super) fn write_node(&self, node: &Node) -> Result<Value> {
        let document = self.document;
        let mut object = Map::new();
        insert_opt(&mut object, "name", node.name.clone().map(Value::String));
        if let Some(id) = &node.camera_id {
            object.insert("camera".into(), index(&document.cameras, id)?);
        }
        if !node.children.is_empty() {
            object.insert("children".into(), index_array(&document.nodes, &node.children)?);
        }
        if let Some(id) = &node.skin_id {
            object.insert("skin".into(), index(&document.skins, id)?);
        }
        if let Some(id) = &node.mesh_id {
            object.insert("mesh".into(), index(&document.meshes, id)?);
        }

        match node.transformation_type() {
            TransformationType::Identity => {}
            TransformationType::Matrix => {
                object.insert("matrix".into(), node.matrix.to_json());
            }
            TransformationType::Trs => {
                if node.translation != Vector3::ZERO {
                    object.insert("translation".into(), node.translation.to_json());
                }
                if node.rotation != Quaternion::IDENTITY {
                    object.insert("rotation".into(), node.rotation.to_json());
                }
                if node.scale != Vector3::ONE {
                    object.insert("scale".into(), node.scale.to_json());
                }
            }
        }

        if !node.weights.is_empty() {
            object.insert("weights".into(), math::number_array(&node.weights));
        }
        self.write_property(&mut object, &node.property, PropertyContext::Node)?;
        Ok(Value::Object(object))
    }

    pub(super) fn write_scene(&self, scene: &Scene) -> Result<Value> {
        let mut object = Map::new();
        insert_opt(&mut object, "name", scene.name.clone().map(Value::String));
        if !scene.nodes.is_empty() {
            object.insert("nodes".into(), index_array(&self.document.nodes, &scene.nodes)?);
        }
        self.write_property(&mut object, &scene.property, PropertyContext::Scene)?;
        Ok(Value::Object(object))
    }

    pub(super) fn write_skin(&self, skin: &Skin) -> Result<Value> {
        let document = self.document;
        let mut object = Map::new();
        insert_opt(&mut object, "name", skin.name.clone().map(Value::String));
        if let Some(id) = &skin.inverse_bind_matrices_id {
            object.insert("inverseBindMatrices".into(), index(&document.accessors, id)?);
        }
        if let Some(id) = &skin.skeleton_id {
            object.insert("skeleton".into(), index(&document.nodes, id)?);
        }
        object.insert("joints".into(), index_array(&document.nodes, &skin.joint_ids)?);
        self.write_property(&mut object, &skin.property, PropertyContext::Skin)?;
        Ok(Value::Object(object))
    }
}

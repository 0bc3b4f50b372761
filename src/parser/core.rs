//! JSON access helpers and readers for core glTF types

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::container::AppendIdPolicy;
use crate::error::{Error, Result};
use crate::math::{Color3, Color4, Matrix4, Quaternion, Vector2, Vector3};
use crate::model::{
    Accessor, AccessorSparse, AccessorType, Asset, Buffer, BufferView, BufferViewTarget,
    ComponentType, Document, Node, Scene, Skin, SparseIndices, SparseValues,
};
use crate::property::Property;

/// A JSON object plus the path it was found at
///
/// Every accessor reports type mismatches as [`Error::InvalidDocument`]
/// naming the offending member's path.
pub(crate) struct Object<'a> {
    members: &'a Map<String, Value>,
    path: String,
}

impl<'a> Object<'a> {
    pub(crate) fn new(value: &'a Value, path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        match value {
            Value::Object(members) => Ok(Self { members, path }),
            _ => Err(Error::invalid_at(&path, "expected an object")),
        }
    }

    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn members(&self) -> &'a Map<String, Value> {
        self.members
    }

    pub(crate) fn child_path(&self, key: &str) -> String {
        format!("{}/{}", self.path, key)
    }

    pub(crate) fn get(&self, key: &str) -> Option<&'a Value> {
        self.members.get(key)
    }

    fn invalid(&self, key: &str, expected: &str) -> Error {
        Error::invalid_at(&self.child_path(key), expected)
    }

    pub(crate) fn string(&self, key: &str) -> Result<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.invalid(key, "expected a string")),
        }
    }

    pub(crate) fn required_string(&self, key: &str) -> Result<String> {
        self.string(key)?
            .ok_or_else(|| Error::missing_member(&self.path, key))
    }

    pub(crate) fn u64(&self, key: &str) -> Result<Option<u64>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .map(Some)
                .ok_or_else(|| self.invalid(key, "expected a non-negative integer")),
        }
    }

    pub(crate) fn required_u64(&self, key: &str) -> Result<u64> {
        self.u64(key)?
            .ok_or_else(|| Error::missing_member(&self.path, key))
    }

    pub(crate) fn u32(&self, key: &str) -> Result<Option<u32>> {
        match self.u64(key)? {
            None => Ok(None),
            Some(value) => u32::try_from(value)
                .map(Some)
                .map_err(|_| self.invalid(key, "integer out of range")),
        }
    }

    pub(crate) fn f32(&self, key: &str) -> Result<Option<f32>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_f64()
                .map(|n| Some(n as f32))
                .ok_or_else(|| self.invalid(key, "expected a number")),
        }
    }

    pub(crate) fn required_f32(&self, key: &str) -> Result<f32> {
        self.f32(key)?
            .ok_or_else(|| Error::missing_member(&self.path, key))
    }

    pub(crate) fn bool(&self, key: &str) -> Result<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(self.invalid(key, "expected a boolean")),
        }
    }

    /// An index member, translated to the id the referenced entity gets
    pub(crate) fn index(&self, key: &str) -> Result<Option<String>> {
        Ok(self.u64(key)?.map(|index| index.to_string()))
    }

    pub(crate) fn required_index(&self, key: &str) -> Result<String> {
        self.index(key)?
            .ok_or_else(|| Error::missing_member(&self.path, key))
    }

    pub(crate) fn array(&self, key: &str) -> Result<&'a [Value]> {
        match self.get(key) {
            None => Ok(&[]),
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(self.invalid(key, "expected an array")),
        }
    }

    pub(crate) fn index_array(&self, key: &str) -> Result<Vec<String>> {
        self.array(key)?
            .iter()
            .map(|item| {
                item.as_u64()
                    .map(|index| index.to_string())
                    .ok_or_else(|| self.invalid(key, "expected an array of indices"))
            })
            .collect()
    }

    pub(crate) fn floats(&self, key: &str) -> Result<Option<Vec<f32>>> {
        if self.get(key).is_none() {
            return Ok(None);
        }
        self.array(key)?
            .iter()
            .map(|item| {
                item.as_f64()
                    .map(|n| n as f32)
                    .ok_or_else(|| self.invalid(key, "expected an array of numbers"))
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    fn fixed<T>(
        &self,
        key: &str,
        len: usize,
        build: fn(&[f32]) -> Option<T>,
    ) -> Result<Option<T>> {
        match self.floats(key)? {
            None => Ok(None),
            Some(values) => build(&values).map(Some).ok_or_else(|| {
                self.invalid(key, &format!("expected an array of {} numbers", len))
            }),
        }
    }

    pub(crate) fn vector2(&self, key: &str) -> Result<Option<Vector2>> {
        self.fixed(key, 2, Vector2::from_slice)
    }

    pub(crate) fn vector3(&self, key: &str) -> Result<Option<Vector3>> {
        self.fixed(key, 3, Vector3::from_slice)
    }

    pub(crate) fn quaternion(&self, key: &str) -> Result<Option<Quaternion>> {
        self.fixed(key, 4, Quaternion::from_slice)
    }

    pub(crate) fn matrix4(&self, key: &str) -> Result<Option<Matrix4>> {
        self.fixed(key, 16, Matrix4::from_slice)
    }

    pub(crate) fn color3(&self, key: &str) -> Result<Option<Color3>> {
        self.fixed(key, 3, Color3::from_slice)
    }

    pub(crate) fn color4(&self, key: &str) -> Result<Option<Color4>> {
        self.fixed(key, 4, Color4::from_slice)
    }

    pub(crate) fn object(&self, key: &str) -> Result<Option<Object<'a>>> {
        self.get(key)
            .map(|value| Object::new(value, self.child_path(key)))
            .transpose()
    }

    pub(crate) fn required_object(&self, key: &str) -> Result<Object<'a>> {
        self.object(key)?
            .ok_or_else(|| Error::missing_member(&self.path, key))
    }

    /// Capture `extensions` and `extras` verbatim
    pub(crate) fn property(&self) -> Result<Property> {
        let mut property = Property::new();
        if let Some(extensions) = self.object("extensions")? {
            property.extensions = extensions
                .members
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect::<BTreeMap<_, _>>();
        }
        property.extras = self.get("extras").cloned();
        Ok(property)
    }
}

/// Read `extensions` and `extras` of any JSON object
pub(crate) fn read_property(value: &Value, path: &str) -> Result<Property> {
    Object::new(value, path)?.property()
}

/// Iterate over a top-level array, yielding each element as an object
pub(crate) fn each_object<'a>(
    root: &Object<'a>,
    key: &str,
) -> Result<impl Iterator<Item = Result<(String, Object<'a>)>>> {
    let path = root.child_path(key);
    let items = root.array(key)?;
    Ok(items.iter().enumerate().map(move |(index, item)| {
        Object::new(item, format!("{}/{}", path, index)).map(|object| (index.to_string(), object))
    }))
}

/// Structural pass: build a document with ids synthesized from indices
pub(crate) fn read_document(root: &Value) -> Result<Document> {
    let root = Object::new(root, "#")?;
    let mut document = Document::new();
    let policy = AppendIdPolicy::ThrowOnEmpty;

    document.asset = read_asset(&root.required_object("asset")?)?;

    for entry in each_object(&root, "accessors")? {
        let (id, object) = entry?;
        document.append_accessor(read_accessor(id, &object)?, policy)?;
    }
    for entry in each_object(&root, "animations")? {
        let (id, object) = entry?;
        document.append_animation(super::animation::read_animation(id, &object)?, policy)?;
    }
    for entry in each_object(&root, "buffers")? {
        let (id, object) = entry?;
        document.append_buffer(read_buffer(id, &object)?, policy)?;
    }
    for entry in each_object(&root, "bufferViews")? {
        let (id, object) = entry?;
        document.append_buffer_view(read_buffer_view(id, &object)?, policy)?;
    }
    for entry in each_object(&root, "cameras")? {
        let (id, object) = entry?;
        document.append_camera(super::camera::read_camera(id, &object)?, policy)?;
    }
    for entry in each_object(&root, "images")? {
        let (id, object) = entry?;
        document.append_image(super::material::read_image(id, &object)?, policy)?;
    }
    for entry in each_object(&root, "materials")? {
        let (id, object) = entry?;
        document.append_material(super::material::read_material(id, &object)?, policy)?;
    }
    for entry in each_object(&root, "meshes")? {
        let (id, object) = entry?;
        document.append_mesh(super::mesh::read_mesh(id, &object)?, policy)?;
    }
    for entry in each_object(&root, "nodes")? {
        let (id, object) = entry?;
        document.append_node(read_node(id, &object)?, policy)?;
    }
    for entry in each_object(&root, "samplers")? {
        let (id, object) = entry?;
        document.append_sampler(super::material::read_sampler(id, &object)?, policy)?;
    }
    for entry in each_object(&root, "scenes")? {
        let (id, object) = entry?;
        document.append_scene(read_scene(id, &object)?, policy)?;
    }
    for entry in each_object(&root, "skins")? {
        let (id, object) = entry?;
        document.append_skin(read_skin(id, &object)?, policy)?;
    }
    for entry in each_object(&root, "textures")? {
        let (id, object) = entry?;
        document.append_texture(super::material::read_texture(id, &object)?, policy)?;
    }

    document.default_scene_id = root.index("scene")?;
    document.extensions_used = read_name_set(&root, "extensionsUsed")?;
    document.extensions_required = read_name_set(&root, "extensionsRequired")?;
    document.property = root.property()?;

    Ok(document)
}

fn read_name_set(root: &Object<'_>, key: &str) -> Result<std::collections::BTreeSet<String>> {
    root.array(key)?
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| Error::invalid_at(&root.child_path(key), "expected an array of strings"))
        })
        .collect()
}

fn read_asset(object: &Object<'_>) -> Result<Asset> {
    Ok(Asset {
        copyright: object.string("copyright")?,
        generator: object.string("generator")?,
        version: object.required_string("version")?,
        min_version: object.string("minVersion")?,
        property: object.property()?,
    })
}

fn read_buffer(id: String, object: &Object<'_>) -> Result<Buffer> {
    Ok(Buffer {
        id,
        name: object.string("name")?,
        uri: object.string("uri")?,
        byte_length: object.required_u64("byteLength")?,
        property: object.property()?,
    })
}

fn read_buffer_view(id: String, object: &Object<'_>) -> Result<BufferView> {
    let target = match object.u64("target")? {
        None => None,
        Some(code) => Some(BufferViewTarget::from_code(code).ok_or_else(|| {
            Error::invalid_at(&object.child_path("target"), "unknown buffer view target")
        })?),
    };

    Ok(BufferView {
        id,
        name: object.string("name")?,
        buffer_id: object.required_index("buffer")?,
        byte_offset: object.u64("byteOffset")?.unwrap_or(0),
        byte_length: object.required_u64("byteLength")?,
        byte_stride: object.u32("byteStride")?,
        target,
        property: object.property()?,
    })
}

fn read_component_type(object: &Object<'_>) -> Result<ComponentType> {
    let code = object.required_u64("componentType")?;
    ComponentType::from_code(code).ok_or_else(|| {
        Error::invalid_at(
            &object.child_path("componentType"),
            &format!("unknown component type {}", code),
        )
    })
}

fn read_accessor(id: String, object: &Object<'_>) -> Result<Accessor> {
    let type_name = object.required_string("type")?;
    let accessor_type = AccessorType::parse(&type_name).ok_or_else(|| {
        Error::invalid_at(
            &object.child_path("type"),
            &format!("unknown accessor type '{}'", type_name),
        )
    })?;

    let sparse = object
        .object("sparse")?
        .map(|sparse| read_sparse(&sparse))
        .transpose()?;

    Ok(Accessor {
        id,
        name: object.string("name")?,
        buffer_view_id: object.index("bufferView")?,
        byte_offset: object.u64("byteOffset")?.unwrap_or(0),
        component_type: read_component_type(object)?,
        normalized: object.bool("normalized")?.unwrap_or(false),
        count: object.required_u64("count")?,
        accessor_type,
        max: object.floats("max")?.unwrap_or_default(),
        min: object.floats("min")?.unwrap_or_default(),
        sparse,
        property: object.property()?,
    })
}

fn read_sparse(object: &Object<'_>) -> Result<AccessorSparse> {
    let indices = object.required_object("indices")?;
    let values = object.required_object("values")?;

    Ok(AccessorSparse {
        count: object.required_u64("count")?,
        indices: SparseIndices {
            buffer_view_id: indices.required_index("bufferView")?,
            byte_offset: indices.u64("byteOffset")?.unwrap_or(0),
            component_type: read_component_type(&indices)?,
            property: indices.property()?,
        },
        values: SparseValues {
            buffer_view_id: values.required_index("bufferView")?,
            byte_offset: values.u64("byteOffset")?.unwrap_or(0),
            property: values.property()?,
        },
        property: object.property()?,
    })
}

fn read_node(id: String, object: &Object<'_>) -> Result<Node> {
    let defaults = Node::default();
    Ok(Node {
        id,
        name: object.string("name")?,
        camera_id: object.index("camera")?,
        children: object.index_array("children")?,
        skin_id: object.index("skin")?,
        mesh_id: object.index("mesh")?,
        matrix: object.matrix4("matrix")?.unwrap_or(defaults.matrix),
        translation: object.vector3("translation")?.unwrap_or(defaults.translation),
        rotation: object.quaternion("rotation")?.unwrap_or(defaults.rotation),
        scale: object.vector3("scale")?.unwrap_or(defaults.scale),
        weights: object.floats("weights")?.unwrap_or_default(),
        property: object.property()?,
    })
}

fn read_scene(id: String, object: &Object<'_>) -> Result<Scene> {
    Ok(Scene {
        id,
        name: object.string("name")?,
        nodes: object.index_array("nodes")?,
        property: object.property()?,
    })
}

fn read_skin(id: String, object: &Object<'_>) -> Result<Skin> {
    Ok(Skin {
        id,
        name: object.string("name")?,
        inverse_bind_matrices_id: object.index("inverseBindMatrices")?,
        skeleton_id: object.index("skeleton")?,
        joint_ids: object.index_array("joints")?,
        property: object.property()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_accessors() {
        let value = json!({
            "name": "n",
            "count": 3,
            "factor": 0.5,
            "flag": true,
            "children": [2, 0],
            "translation": [1, 2, 3],
            "bad": "x"
        });
        let object = Object::new(&value, "#/nodes/0").unwrap();

        assert_eq!(object.string("name").unwrap().as_deref(), Some("n"));
        assert_eq!(object.required_u64("count").unwrap(), 3);
        assert_eq!(object.f32("factor").unwrap(), Some(0.5));
        assert_eq!(object.bool("flag").unwrap(), Some(true));
        assert_eq!(object.index_array("children").unwrap(), vec!["2", "0"]);
        assert_eq!(
            object.vector3("translation").unwrap(),
            Some(Vector3::new(1.0, 2.0, 3.0))
        );
        assert!(object.index("missing").unwrap().is_none());

        let err = object.u64("bad").unwrap_err();
        assert_eq!(
            err.to_string(),
            "[E2003] Invalid document: #/nodes/0/bad: expected a non-negative integer"
        );
        assert!(object.quaternion("translation").is_err());
        assert!(object.required_string("missing").is_err());
    }

    #[test]
    fn test_read_property_captures_raw_values() {
        let value = json!({
            "extensions": {"EXT_a": {"x": 1}},
            "extras": [1, 2]
        });
        let property = read_property(&value, "#").unwrap();
        assert_eq!(property.extensions["EXT_a"], json!({"x": 1}));
        assert_eq!(property.extras, Some(json!([1, 2])));
    }

    #[test]
    fn test_read_document_synthesizes_ids() {
        let root = json!({
            "asset": {"version": "2.0"},
            "nodes": [{"children": [1]}, {"mesh": 0}],
            "meshes": [{"primitives": [{"attributes": {}}]}],
            "scene": 0,
            "scenes": [{"nodes": [0]}]
        });
        let document = read_document(&root).unwrap();
        assert_eq!(document.nodes.len(), 2);
        assert_eq!(document.nodes.get("0").unwrap().children, vec!["1"]);
        assert_eq!(document.nodes.get("1").unwrap().mesh_id.as_deref(), Some("0"));
        assert_eq!(document.default_scene_id.as_deref(), Some("0"));
    }

    #[test]
    fn test_sparse_offsets_read_from_sub_objects() {
        let root = json!({
            "asset": {"version": "2.0"},
            "accessors": [{
                "componentType": 5126,
                "count": 4,
                "type": "VEC3",
                "sparse": {
                    "count": 1,
                    "indices": {"bufferView": 0, "byteOffset": 8, "componentType": 5123},
                    "values": {"bufferView": 1, "byteOffset": 16}
                }
            }]
        });
        let document = read_document(&root).unwrap();
        let sparse = document.accessors.get("0").unwrap().sparse.clone().unwrap();
        assert_eq!(sparse.indices.byte_offset, 8);
        assert_eq!(sparse.indices.component_type, ComponentType::UnsignedShort);
        assert_eq!(sparse.values.byte_offset, 16);
        assert_eq!(sparse.values.buffer_view_id, "1");
    }
}

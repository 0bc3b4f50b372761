//! Schema validation service
//!
//! Decoding hands the raw JSON value to a [`SchemaValidator`] before any
//! entity is built. The built-in [`CoreSchema`] applies the structural rules
//! of the glTF 2.0 schema that matter to this crate: required members,
//! member types, enumerations and fixed array lengths. Callers with a full
//! JSON-schema engine can plug it in through
//! [`ParserConfig::with_schema`](crate::ParserConfig::with_schema).

use std::collections::HashSet;

use serde_json::{Map, Value};

/// URI of the root glTF schema document
pub const GLTF_SCHEMA_URI: &str = "glTF.schema.json";

/// One schema failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDiagnostic {
    /// JSON pointer to the failing value, e.g. `#/nodes/0/matrix`
    pub path: String,
    /// What the rule expected
    pub description: String,
}

impl SchemaDiagnostic {
    /// Create a diagnostic
    pub fn new(path: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
        }
    }
}

/// A service that validates a JSON document against a schema
pub trait SchemaValidator: Send + Sync {
    /// Validate `document` against the schema identified by `schema_uri`
    ///
    /// Returns every diagnostic found; an empty error list is treated as a
    /// generic failure.
    fn validate(&self, document: &Value, schema_uri: &str) -> Result<(), Vec<SchemaDiagnostic>>;
}

/// Built-in structural rules of the glTF 2.0 schema
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreSchema;

const COLLECTIONS: [&str; 13] = [
    "accessors",
    "animations",
    "buffers",
    "bufferViews",
    "cameras",
    "images",
    "materials",
    "meshes",
    "nodes",
    "samplers",
    "scenes",
    "skins",
    "textures",
];

const COMPONENT_TYPES: [u64; 6] = [5120, 5121, 5122, 5123, 5125, 5126];
const ACCESSOR_TYPES: [&str; 7] = ["SCALAR", "VEC2", "VEC3", "VEC4", "MAT2", "MAT3", "MAT4"];
const TARGET_PATHS: [&str; 4] = ["translation", "rotation", "scale", "weights"];
const INTERPOLATIONS: [&str; 3] = ["LINEAR", "STEP", "CUBICSPLINE"];
const CAMERA_TYPES: [&str; 2] = ["perspective", "orthographic"];
const ALPHA_MODES: [&str; 3] = ["OPAQUE", "MASK", "BLEND"];
const MAG_FILTERS: [u64; 2] = [9728, 9729];
const MIN_FILTERS: [u64; 6] = [9728, 9729, 9984, 9985, 9986, 9987];
const WRAP_MODES: [u64; 3] = [33071, 33648, 10497];
const BUFFER_VIEW_TARGETS: [u64; 2] = [34962, 34963];

struct Checker {
    diagnostics: Vec<SchemaDiagnostic>,
}

impl Checker {
    fn fail(&mut self, path: &str, description: impl Into<String>) {
        self.diagnostics
            .push(SchemaDiagnostic::new(path, description));
    }

    fn required<'v>(&mut self, object: &'v Map<String, Value>, path: &str, key: &str) -> Option<&'v Value> {
        let value = object.get(key);
        if value.is_none() {
            self.fail(path, format!("missing required member '{}'", key));
        }
        value
    }

    fn integer(&mut self, value: &Value, path: &str) -> Option<u64> {
        let integer = value.as_u64();
        if integer.is_none() {
            self.fail(path, "expected a non-negative integer");
        }
        integer
    }

    fn integer_member(&mut self, object: &Map<String, Value>, path: &str, key: &str, required: bool) {
        let value = if required {
            self.required(object, path, key)
        } else {
            object.get(key)
        };
        if let Some(value) = value {
            self.integer(value, &format!("{}/{}", path, key));
        }
    }

    fn code_member(&mut self, object: &Map<String, Value>, path: &str, key: &str, allowed: &[u64], required: bool) {
        let value = if required {
            self.required(object, path, key)
        } else {
            object.get(key)
        };
        let member_path = format!("{}/{}", path, key);
        if let Some(code) = value.and_then(|value| self.integer(value, &member_path))
            && !allowed.contains(&code)
        {
            self.fail(&member_path, format!("{} is not one of the allowed values", code));
        }
    }

    fn name_member(&mut self, object: &Map<String, Value>, path: &str, key: &str, allowed: &[&str], required: bool) {
        let value = if required {
            self.required(object, path, key)
        } else {
            object.get(key)
        };
        let member_path = format!("{}/{}", path, key);
        match value {
            None => {}
            Some(Value::String(name)) if allowed.contains(&name.as_str()) => {}
            Some(Value::String(name)) => {
                self.fail(&member_path, format!("'{}' is not one of the allowed values", name))
            }
            Some(_) => self.fail(&member_path, "expected a string"),
        }
    }

    fn number_array(&mut self, object: &Map<String, Value>, path: &str, key: &str, len: Option<usize>) {
        let Some(value) = object.get(key) else {
            return;
        };
        let member_path = format!("{}/{}", path, key);
        let Some(items) = value.as_array() else {
            self.fail(&member_path, "expected an array");
            return;
        };
        if items.iter().any(|item| !item.is_number()) {
            self.fail(&member_path, "expected an array of numbers");
        } else if let Some(len) = len
            && items.len() != len
        {
            self.fail(&member_path, format!("expected exactly {} items", len));
        }
    }

    /// Non-empty array of objects; returns the objects with their paths
    fn object_array<'v>(
        &mut self,
        object: &'v Map<String, Value>,
        path: &str,
        key: &str,
        required: bool,
    ) -> Vec<(String, &'v Map<String, Value>)> {
        let value = if required {
            self.required(object, path, key)
        } else {
            object.get(key)
        };
        let Some(value) = value else {
            return Vec::new();
        };
        let member_path = format!("{}/{}", path, key);
        let Some(items) = value.as_array() else {
            self.fail(&member_path, "expected an array");
            return Vec::new();
        };
        if items.is_empty() {
            self.fail(&member_path, "expected at least 1 item");
        }

        let mut objects = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let item_path = format!("{}/{}", member_path, index);
            match item.as_object() {
                Some(item) => {
                    self.extensions(item, &item_path);
                    objects.push((item_path, item));
                }
                None => self.fail(&item_path, "expected an object"),
            }
        }
        objects
    }

    fn extensions(&mut self, object: &Map<String, Value>, path: &str) {
        let Some(extensions) = object.get("extensions") else {
            return;
        };
        let extensions_path = format!("{}/extensions", path);
        match extensions.as_object() {
            Some(members) => {
                for (name, value) in members {
                    if !value.is_object() {
                        self.fail(&format!("{}/{}", extensions_path, name), "expected an object");
                    }
                }
            }
            None => self.fail(&extensions_path, "expected an object"),
        }
    }

    fn name_set(&mut self, root: &Map<String, Value>, key: &str) {
        let Some(value) = root.get(key) else {
            return;
        };
        let path = format!("#/{}", key);
        let Some(items) = value.as_array() else {
            self.fail(&path, "expected an array");
            return;
        };
        let mut seen = HashSet::new();
        for item in items {
            match item.as_str() {
                Some(name) if !seen.insert(name) => {
                    self.fail(&path, format!("duplicate item '{}'", name))
                }
                Some(_) => {}
                None => self.fail(&path, "expected an array of strings"),
            }
        }
    }

    fn check_root(&mut self, root: &Map<String, Value>) {
        self.extensions(root, "#");

        match self.required(root, "#", "asset") {
            Some(Value::Object(asset)) => {
                match asset.get("version") {
                    Some(Value::String(_)) => {}
                    Some(_) => self.fail("#/asset/version", "expected a string"),
                    None => self.fail("#/asset", "missing required member 'version'"),
                }
            }
            Some(_) => self.fail("#/asset", "expected an object"),
            None => {}
        }

        if let Some(scene) = root.get("scene") {
            self.integer(scene, "#/scene");
        }
        self.name_set(root, "extensionsUsed");
        self.name_set(root, "extensionsRequired");

        for key in COLLECTIONS {
            for (path, object) in self.object_array(root, "#", key, false) {
                self.check_entity(key, object, &path);
            }
        }
    }

    fn check_entity(&mut self, collection: &str, object: &Map<String, Value>, path: &str) {
        match collection {
            "accessors" => {
                self.code_member(object, path, "componentType", &COMPONENT_TYPES, true);
                self.integer_member(object, path, "count", true);
                self.name_member(object, path, "type", &ACCESSOR_TYPES, true);
                self.integer_member(object, path, "bufferView", false);
                self.integer_member(object, path, "byteOffset", false);
                self.number_array(object, path, "min", None);
                self.number_array(object, path, "max", None);
                if let Some(sparse) = object.get("sparse") {
                    self.check_sparse(sparse, &format!("{}/sparse", path));
                }
            }
            "animations" => {
                for (channel_path, channel) in self.object_array(object, path, "channels", true) {
                    self.integer_member(channel, &channel_path, "sampler", true);
                    match self.required(channel, &channel_path, "target") {
                        Some(Value::Object(target)) => {
                            let target_path = format!("{}/target", channel_path);
                            self.integer_member(target, &target_path, "node", false);
                            self.name_member(target, &target_path, "path", &TARGET_PATHS, true);
                        }
                        Some(_) => self.fail(&format!("{}/target", channel_path), "expected an object"),
                        None => {}
                    }
                }
                for (sampler_path, sampler) in self.object_array(object, path, "samplers", true) {
                    self.integer_member(sampler, &sampler_path, "input", true);
                    self.integer_member(sampler, &sampler_path, "output", true);
                    self.name_member(sampler, &sampler_path, "interpolation", &INTERPOLATIONS, false);
                }
            }
            "buffers" => {
                self.integer_member(object, path, "byteLength", true);
            }
            "bufferViews" => {
                self.integer_member(object, path, "buffer", true);
                self.integer_member(object, path, "byteLength", true);
                self.integer_member(object, path, "byteOffset", false);
                self.integer_member(object, path, "byteStride", false);
                self.code_member(object, path, "target", &BUFFER_VIEW_TARGETS, false);
            }
            "cameras" => {
                self.name_member(object, path, "type", &CAMERA_TYPES, true);
            }
            "images" => {
                self.integer_member(object, path, "bufferView", false);
            }
            "materials" => {
                self.name_member(object, path, "alphaMode", &ALPHA_MODES, false);
                self.number_array(object, path, "emissiveFactor", Some(3));
                if let Some(Value::Object(pbr)) = object.get("pbrMetallicRoughness") {
                    let pbr_path = format!("{}/pbrMetallicRoughness", path);
                    self.number_array(pbr, &pbr_path, "baseColorFactor", Some(4));
                }
            }
            "meshes" => {
                for (primitive_path, primitive) in self.object_array(object, path, "primitives", true) {
                    match self.required(primitive, &primitive_path, "attributes") {
                        Some(Value::Object(_)) => {}
                        Some(_) => self.fail(&format!("{}/attributes", primitive_path), "expected an object"),
                        None => {}
                    }
                    self.integer_member(primitive, &primitive_path, "mode", false);
                }
            }
            "nodes" => {
                self.number_array(object, path, "matrix", Some(16));
                self.number_array(object, path, "translation", Some(3));
                self.number_array(object, path, "rotation", Some(4));
                self.number_array(object, path, "scale", Some(3));
                self.number_array(object, path, "weights", None);
            }
            "samplers" => {
                self.code_member(object, path, "magFilter", &MAG_FILTERS, false);
                self.code_member(object, path, "minFilter", &MIN_FILTERS, false);
                self.code_member(object, path, "wrapS", &WRAP_MODES, false);
                self.code_member(object, path, "wrapT", &WRAP_MODES, false);
            }
            "skins" => {
                match self.required(object, path, "joints") {
                    Some(Value::Array(joints)) if joints.is_empty() => {
                        self.fail(&format!("{}/joints", path), "expected at least 1 item")
                    }
                    Some(Value::Array(_)) | None => {}
                    Some(_) => self.fail(&format!("{}/joints", path), "expected an array"),
                }
            }
            _ => {}
        }
    }

    fn check_sparse(&mut self, sparse: &Value, path: &str) {
        let Some(sparse) = sparse.as_object() else {
            self.fail(path, "expected an object");
            return;
        };
        self.integer_member(sparse, path, "count", true);
        if let Some(indices) = self.required(sparse, path, "indices") {
            let indices_path = format!("{}/indices", path);
            match indices.as_object() {
                Some(indices) => {
                    self.integer_member(indices, &indices_path, "bufferView", true);
                    self.code_member(indices, &indices_path, "componentType", &[5121, 5123, 5125], true);
                }
                None => self.fail(&indices_path, "expected an object"),
            }
        }
        if let Some(values) = self.required(sparse, path, "values") {
            let values_path = format!("{}/values", path);
            match values.as_object() {
                Some(values) => self.integer_member(values, &values_path, "bufferView", true),
                None => self.fail(&values_path, "expected an object"),
            }
        }
    }
}

impl SchemaValidator for CoreSchema {
    fn validate(&self, document: &Value, _schema_uri: &str) -> Result<(), Vec<SchemaDiagnostic>> {
        let mut checker = Checker {
            diagnostics: Vec::new(),
        };
        match document.as_object() {
            Some(root) => checker.check_root(root),
            None => checker.fail("#", "expected an object"),
        }

        if checker.diagnostics.is_empty() {
            Ok(())
        } else {
            log::debug!("Schema validation found {} issue(s)", checker.diagnostics.len());
            Err(checker.diagnostics)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn first(document: Value) -> SchemaDiagnostic {
        CoreSchema
            .validate(&document, GLTF_SCHEMA_URI)
            .unwrap_err()
            .remove(0)
    }

    #[test]
    fn test_minimal_document_passes() {
        assert!(
            CoreSchema
                .validate(&json!({"asset": {"version": "2.0"}}), GLTF_SCHEMA_URI)
                .is_ok()
        );
    }

    #[test]
    fn test_missing_asset() {
        let diagnostic = first(json!({}));
        assert_eq!(diagnostic.path, "#");
        assert_eq!(diagnostic.description, "missing required member 'asset'");

        let diagnostic = first(json!({"asset": {}}));
        assert_eq!(diagnostic.path, "#/asset");
    }

    #[test]
    fn test_enumerations() {
        let diagnostic = first(json!({
            "asset": {"version": "2.0"},
            "accessors": [{"componentType": 5124, "count": 1, "type": "SCALAR"}]
        }));
        assert_eq!(diagnostic.path, "#/accessors/0/componentType");

        let diagnostic = first(json!({
            "asset": {"version": "2.0"},
            "samplers": [{"wrapS": 1}]
        }));
        assert_eq!(diagnostic.path, "#/samplers/0/wrapS");
    }

    #[test]
    fn test_fixed_array_lengths() {
        let diagnostic = first(json!({
            "asset": {"version": "2.0"},
            "nodes": [{"translation": [1, 2]}]
        }));
        assert_eq!(diagnostic.path, "#/nodes/0/translation");
        assert_eq!(diagnostic.description, "expected exactly 3 items");
    }

    #[test]
    fn test_empty_collection_rejected() {
        let diagnostic = first(json!({"asset": {"version": "2.0"}, "nodes": []}));
        assert_eq!(diagnostic.path, "#/nodes");
    }

    #[test]
    fn test_duplicate_extension_names() {
        let diagnostic = first(json!({
            "asset": {"version": "2.0"},
            "extensionsUsed": ["EXT_a", "EXT_a"]
        }));
        assert_eq!(diagnostic.path, "#/extensionsUsed");
    }

    #[test]
    fn test_extension_members_must_be_objects() {
        let diagnostic = first(json!({
            "asset": {"version": "2.0"},
            "nodes": [{"extensions": {"EXT_a": 3}}]
        }));
        assert_eq!(diagnostic.path, "#/nodes/0/extensions/EXT_a");
    }
}

//! Schema rules applied to raw JSON before mapping

use std::sync::Arc;

use libgltf::schema::{CoreSchema, GLTF_SCHEMA_URI, SchemaDiagnostic, SchemaValidator};
use libgltf::{Document, Error, ParserConfig};
use serde_json::Value;

fn schema_error(json: &str) -> (String, String) {
    match Document::from_json(json).unwrap_err() {
        Error::SchemaViolation { path, description } => (path, description),
        other => panic!("expected a schema violation, got {:?}", other),
    }
}

#[test]
fn test_asset_is_required() {
    let (path, description) = schema_error("{}");
    assert_eq!(path, "#");
    assert_eq!(description, "missing required member 'asset'");
}

#[test]
fn test_root_must_be_object() {
    let (path, _) = schema_error("[1, 2]");
    assert_eq!(path, "#");
}

#[test]
fn test_malformed_json_is_not_a_schema_error() {
    let err = Document::from_json(r#"{"asset": {"version": "2.0"},}"#).unwrap_err();
    assert!(matches!(err, Error::MalformedInput(_)));
}

#[test]
fn test_accessor_component_type() {
    let (path, description) = schema_error(
        r#"{"asset": {"version": "2.0"},
            "accessors": [{"componentType": 7, "count": 1, "type": "SCALAR"}]}"#,
    );
    assert_eq!(path, "#/accessors/0/componentType");
    assert_eq!(description, "7 is not one of the allowed values");
}

#[test]
fn test_accessor_type_name() {
    let (path, description) = schema_error(
        r#"{"asset": {"version": "2.0"},
            "accessors": [{"componentType": 5126, "count": 1, "type": "VEC5"}]}"#,
    );
    assert_eq!(path, "#/accessors/0/type");
    assert_eq!(description, "'VEC5' is not one of the allowed values");
}

#[test]
fn test_translation_length() {
    let (path, description) = schema_error(
        r#"{"asset": {"version": "2.0"}, "nodes": [{"translation": [1, 2]}]}"#,
    );
    assert_eq!(path, "#/nodes/0/translation");
    assert_eq!(description, "expected exactly 3 items");
}

#[test]
fn test_mesh_needs_primitives() {
    let (path, description) = schema_error(
        r#"{"asset": {"version": "2.0"}, "meshes": [{"primitives": []}]}"#,
    );
    assert_eq!(path, "#/meshes/0/primitives");
    assert_eq!(description, "expected at least 1 item");
}

#[test]
fn test_duplicate_extension_names() {
    let (path, description) = schema_error(
        r#"{"asset": {"version": "2.0"}, "extensionsUsed": ["EXT_a", "EXT_a"]}"#,
    );
    assert_eq!(path, "#/extensionsUsed");
    assert!(description.contains("EXT_a"));
}

#[test]
fn test_schema_message_format() {
    let err = Document::from_json("{}").unwrap_err();
    assert_eq!(
        err.to_string(),
        "[E2002] Schema violation at # due to missing required member 'asset'"
    );
}

#[test]
fn test_schema_can_be_skipped() {
    // A negative index passes without the schema but cannot be mapped
    let json = r#"{"asset": {"version": "2.0"}, "scene": -1}"#;
    assert!(matches!(
        Document::from_json(json),
        Err(Error::SchemaViolation { .. })
    ));

    let config = ParserConfig::with_all_extensions().without_schema();
    let err = Document::from_json_with_config(json, &config).unwrap_err();
    assert!(matches!(err, Error::InvalidDocument(_)));
}

struct RejectEverything;

impl SchemaValidator for RejectEverything {
    fn validate(&self, _: &Value, schema_uri: &str) -> Result<(), Vec<SchemaDiagnostic>> {
        Err(vec![SchemaDiagnostic::new("#", format!("rejected by {}", schema_uri))])
    }
}

#[test]
fn test_custom_validator_receives_schema_uri() {
    let config = ParserConfig::new().with_schema(Arc::new(RejectEverything));
    let err = Document::from_json_with_config(r#"{"asset": {"version": "2.0"}}"#, &config)
        .unwrap_err();
    match err {
        Error::SchemaViolation { description, .. } => {
            assert_eq!(description, format!("rejected by {}", GLTF_SCHEMA_URI));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_core_schema_reports_every_issue() {
    let value: Value = serde_json::from_str(
        r#"{"asset": {}, "nodes": [{"scale": [1]}, {"rotation": [0, 0, 0]}]}"#,
    )
    .unwrap();
    let diagnostics = CoreSchema.validate(&value, GLTF_SCHEMA_URI).unwrap_err();
    assert_eq!(diagnostics.len(), 3);
}

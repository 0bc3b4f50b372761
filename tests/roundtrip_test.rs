//! Decode-after-encode round trips

mod common;

use libgltf::{
    Document, Extensible, Interpolation, ParserConfig, Projection, TransformationType, Vector3,
    WriterConfig,
};
use serde_json::json;

#[test]
fn test_round_trip_is_lossless() {
    let decoded = common::with_positional_ids(&common::sample_document());

    for pretty in [true, false] {
        let config = WriterConfig::default().with_pretty(pretty);
        let json = decoded.to_json_with_config(&config).unwrap();
        let again = Document::from_json(&json).unwrap();
        assert_eq!(again, decoded, "pretty = {}", pretty);
    }
}

#[test]
fn test_ids_become_positions() {
    let decoded = common::with_positional_ids(&common::sample_document());

    // "root" was the third node appended
    let root = decoded.nodes.get("2").unwrap();
    assert_eq!(root.children, vec!["0".to_string(), "1".to_string()]);
    assert_eq!(decoded.default_scene().unwrap().nodes, vec!["2".to_string()]);

    let primitive = &decoded.meshes.get("0").unwrap().primitives[0];
    assert_eq!(primitive.attribute("POSITION"), Some("0"));
    assert_eq!(primitive.indices_id.as_deref(), Some("1"));

    for (position, node) in decoded.nodes.iter().enumerate() {
        assert_eq!(decoded.nodes.index_of(&node.id).unwrap(), position);
    }
}

#[test]
fn test_values_survive() {
    let decoded = common::with_positional_ids(&common::sample_document());

    let cube = decoded.nodes.get("0").unwrap();
    assert_eq!(cube.translation, Vector3::new(0.0, 1.0, 0.0));
    assert_eq!(cube.transformation_type(), TransformationType::Trs);

    let material = decoded.materials.get("0").unwrap();
    assert_eq!(material.name.as_deref(), Some("Painted metal"));
    assert_eq!(material.pbr_metallic_roughness.metallic_factor, 0.25);
    assert_eq!(material.property.extras, Some(json!({"author": "tests"})));

    match &decoded.cameras.get("0").unwrap().projection {
        Projection::Perspective(perspective) => {
            assert_eq!(perspective.zfar, Some(100.0));
            assert_eq!(perspective.aspect_ratio, Some(1.5));
        }
        other => panic!("unexpected projection {:?}", other),
    }

    let animation = decoded.animations.get("0").unwrap();
    assert_eq!(
        animation.samplers.get("0").unwrap().interpolation,
        Interpolation::Step
    );
    assert_eq!(animation.channels.get("0").unwrap().target.node_id, "0");
}

#[test]
fn test_unknown_extension_is_preserved() {
    let json = r#"{
        "asset": {"version": "2.0"},
        "extensionsUsed": ["EXT_future"],
        "nodes": [{"extensions": {"EXT_future": {"payload": [1, 2, {"deep": true}]}}}]
    }"#;
    let document = Document::from_json(json).unwrap();
    let node = document.nodes.get("0").unwrap();
    assert!(node.property.has_unregistered_extension("EXT_future"));

    let output: serde_json::Value =
        serde_json::from_str(&document.to_json().unwrap()).unwrap();
    assert_eq!(
        output["nodes"][0]["extensions"]["EXT_future"],
        json!({"payload": [1, 2, {"deep": true}]})
    );
}

#[test]
fn test_extras_everywhere() {
    let json = r#"{
        "asset": {"version": "2.0", "extras": {"pipeline": 3}},
        "extras": "root",
        "scenes": [{"extras": [1, 2]}],
        "materials": [{"pbrMetallicRoughness": {"extras": null, "metallicFactor": 0}}]
    }"#;
    let document = Document::from_json(json).unwrap();
    assert_eq!(document.property.extras, Some(json!("root")));
    assert_eq!(document.asset.property.extras, Some(json!({"pipeline": 3})));

    let again = Document::from_json(&document.to_json().unwrap()).unwrap();
    assert_eq!(again, document);
}

#[test]
fn test_unknown_top_level_fields_ignored() {
    let json = r#"{"asset": {"version": "2.0"}, "vendorData": {"x": 1}}"#;
    assert_eq!(Document::from_json(json).unwrap(), Document::new());
}

#[test]
fn test_decode_without_extension_handlers() {
    let json = r#"{
        "asset": {"version": "2.0"},
        "extensionsUsed": ["KHR_materials_unlit"],
        "materials": [{"extensions": {"KHR_materials_unlit": {}}}]
    }"#;
    let document = Document::from_json_with_config(json, &ParserConfig::new()).unwrap();
    let material = document.materials.get("0").unwrap();
    assert!(material.property.has_unregistered_extension("KHR_materials_unlit"));
    assert_eq!(material.property().payloads().count(), 0);

    // Opaque entries need no encoder
    let output = document
        .to_json_with_config(&WriterConfig::new())
        .unwrap();
    assert!(output.contains("KHR_materials_unlit"));
}

#[test]
fn test_from_reader() {
    let json = br#"{"asset": {"version": "2.0", "generator": "bytes"}}"#;
    let document = Document::from_reader(&json[..]).unwrap();
    assert_eq!(document.asset.generator.as_deref(), Some("bytes"));
}

//! Canonical output of the encoder

use libgltf::writer::write_document;
use libgltf::{AppendIdPolicy, Document, Error, Node, Scene, WriterConfig};

#[test]
fn test_empty_document() {
    let json = Document::new().to_json().unwrap();
    assert_eq!(json, "{\n    \"asset\": {\n        \"version\": \"2.0\"\n    }\n}");
}

#[test]
fn test_default_scene() {
    let mut document = Document::new();
    document
        .set_default_scene(Scene::new("0"), AppendIdPolicy::ThrowOnEmpty)
        .unwrap();

    let json = document.to_json().unwrap();
    assert_eq!(
        json,
        "{\n    \"asset\": {\n        \"version\": \"2.0\"\n    },\n    \"scene\": 0,\n    \"scenes\": [\n        {}\n    ]\n}"
    );
}

#[test]
fn test_dangling_default_scene() {
    let mut document = Document::new();
    document
        .append_scene(Scene::new("foo"), AppendIdPolicy::ThrowOnEmpty)
        .unwrap();
    document.default_scene_id = Some("bar".into());

    let err = document.to_json().unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert_eq!(err.to_string(), "key bar not in container");
}

#[test]
fn test_compact_has_no_whitespace() {
    let mut document = Document::new();
    document
        .append_node(Node::new("n"), AppendIdPolicy::ThrowOnEmpty)
        .unwrap();

    let config = WriterConfig::new().with_pretty(false);
    let json = write_document(&document, &config).unwrap();
    assert_eq!(json, r#"{"asset":{"version":"2.0"},"nodes":[{}]}"#);
}

#[test]
fn test_keys_are_sorted() {
    let mut document = Document::new();
    document.asset.generator = Some("gen".into());
    document.asset.copyright = Some("c".into());
    document
        .append_node(Node::new("n"), AppendIdPolicy::ThrowOnEmpty)
        .unwrap();
    document
        .append_scene(Scene::new("s"), AppendIdPolicy::ThrowOnEmpty)
        .unwrap();

    let json = document
        .to_json_with_config(&WriterConfig::new().with_pretty(false))
        .unwrap();
    assert_eq!(
        json,
        r#"{"asset":{"copyright":"c","generator":"gen","version":"2.0"},"nodes":[{}],"scenes":[{}]}"#
    );
}

#[test]
fn test_to_writer_matches_to_json() {
    let document = Document::new();
    let mut buffer = Vec::new();
    document
        .to_writer(&mut buffer, &WriterConfig::default())
        .unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), document.to_json().unwrap());
}

#[test]
fn test_floats_use_shortest_form() {
    let mut document = Document::new();
    let mut node = Node::new("n");
    node.weights = vec![0.1, 0.5, 1.0];
    document
        .append_node(node, AppendIdPolicy::ThrowOnEmpty)
        .unwrap();

    let json = document
        .to_json_with_config(&WriterConfig::new().with_pretty(false))
        .unwrap();
    assert!(json.contains(r#""weights":[0.1,0.5,1.0]"#), "{}", json);
}

//! Dangling ids are rejected before encoding and after decoding

use libgltf::{
    AppendIdPolicy, Document, Error, Material, Mesh, MeshPrimitive, Node, Scene, Skin,
    TextureInfo,
};

fn missing_key(document: &Document) -> String {
    match document.to_json().unwrap_err() {
        Error::NotFound(id) => id,
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_dangling_child() {
    let mut document = Document::new();
    let mut node = Node::new("parent");
    node.children.push("orphan".into());
    document.append_node(node, AppendIdPolicy::ThrowOnEmpty).unwrap();

    assert_eq!(missing_key(&document), "orphan");
}

#[test]
fn test_dangling_scene_node() {
    let mut document = Document::new();
    let mut scene = Scene::new("s");
    scene.nodes.push("ghost".into());
    document.append_scene(scene, AppendIdPolicy::ThrowOnEmpty).unwrap();

    let err = document.to_json().unwrap_err();
    assert_eq!(err.to_string(), "key ghost not in container");
    assert!(err.is_invariant_violation());
}

#[test]
fn test_dangling_primitive_attribute() {
    let mut document = Document::new();
    let mut primitive = MeshPrimitive::default();
    primitive.attributes.insert("POSITION".into(), "nowhere".into());
    let mut mesh = Mesh::new("m");
    mesh.primitives.push(primitive);
    document.append_mesh(mesh, AppendIdPolicy::ThrowOnEmpty).unwrap();

    assert_eq!(missing_key(&document), "nowhere");
}

#[test]
fn test_dangling_skin_joint() {
    let mut document = Document::new();
    let mut skin = Skin::new("rig");
    skin.joint_ids.push("bone".into());
    document.append_skin(skin, AppendIdPolicy::ThrowOnEmpty).unwrap();

    assert_eq!(missing_key(&document), "bone");
}

#[test]
fn test_dangling_material_texture() {
    let mut document = Document::new();
    let mut material = Material::new("m");
    material.pbr_metallic_roughness.metallic_roughness_texture = Some(TextureInfo::new("rough"));
    document.append_material(material, AppendIdPolicy::ThrowOnEmpty).unwrap();

    assert_eq!(missing_key(&document), "rough");
}

#[test]
fn test_out_of_range_index_on_decode() {
    let json = r#"{"asset": {"version": "2.0"}, "nodes": [{"children": [4]}]}"#;
    let err = Document::from_json(json).unwrap_err();
    assert_eq!(err.to_string(), "key 4 not in container");
}

#[test]
fn test_invariant_checks_can_be_disabled_on_decode() {
    let json = r#"{"asset": {"version": "2.0"}, "nodes": [{"children": [4]}]}"#;
    let config = libgltf::ParserConfig::with_all_extensions().with_invariant_checks(false);
    let document = Document::from_json_with_config(json, &config).unwrap();
    assert_eq!(document.nodes.get("0").unwrap().children, vec!["4".to_string()]);

    // The encoder always checks
    assert!(matches!(document.to_json(), Err(Error::NotFound(_))));
}

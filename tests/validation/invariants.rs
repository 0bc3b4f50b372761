//! Document invariants beyond reference resolution

use libgltf::{
    Accessor, AccessorSparse, AnimationSampler, AppendIdPolicy, Buffer, BufferView, Camera,
    ComponentType, Document, Error, Image, Matrix4, Mesh, Node, Orthographic, Perspective,
    Projection, Skin, Vector3,
};

fn invariant_message(document: &Document) -> String {
    match document.to_json().unwrap_err() {
        Error::InvariantViolation(message) => message,
        other => panic!("expected an invariant violation, got {:?}", other),
    }
}

#[test]
fn test_matrix_and_trs_conflict() {
    let mut document = Document::new();
    let mut node = Node::new("both");
    let mut values = Matrix4::IDENTITY.values;
    values[12] = 2.0;
    node.matrix = Matrix4::from(values);
    node.scale = Vector3::new(2.0, 2.0, 2.0);
    document.append_node(node, AppendIdPolicy::ThrowOnEmpty).unwrap();

    let err = document.to_json().unwrap_err();
    assert!(matches!(err, Error::InvariantViolation(_)));
    assert!(err.to_string().contains("Node both doesn't have a valid transform type"));
}

#[test]
fn test_matrix_and_trs_conflict_on_decode() {
    let json = r#"{
        "asset": {"version": "2.0"},
        "nodes": [{
            "matrix": [1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 5, 0, 0, 1],
            "translation": [1, 0, 0]
        }]
    }"#;
    let err = Document::from_json(json).unwrap_err();
    assert!(err.to_string().contains("Node 0 doesn't have a valid transform type"));
}

#[test]
fn test_perspective_far_plane() {
    let mut document = Document::new();
    let mut perspective = Perspective::new(1.0, 10.0);
    perspective.zfar = Some(5.0);
    document
        .append_camera(
            Camera::new("c", Projection::Perspective(perspective)),
            AppendIdPolicy::ThrowOnEmpty,
        )
        .unwrap();

    let err = document.to_json().unwrap_err();
    assert!(matches!(err, Error::InvariantViolation(_)));
}

#[test]
fn test_infinite_perspective_is_valid() {
    let mut document = Document::new();
    document
        .append_camera(
            Camera::new("c", Projection::Perspective(Perspective::new(1.0, 0.01))),
            AppendIdPolicy::ThrowOnEmpty,
        )
        .unwrap();
    assert!(document.to_json().is_ok());
}

#[test]
fn test_orthographic_zero_magnification() {
    let mut document = Document::new();
    document
        .append_camera(
            Camera::new(
                "c",
                Projection::Orthographic(Orthographic::new(0.0, 1.0, 0.1, 10.0)),
            ),
            AppendIdPolicy::ThrowOnEmpty,
        )
        .unwrap();

    let err = document.to_json().unwrap_err();
    assert!(err.to_string().contains("orthographic"));
}

#[test]
fn test_image_needs_mime_type_with_buffer_view() {
    let json = r#"{
        "asset": {"version": "2.0"},
        "buffers": [{"byteLength": 4}],
        "bufferViews": [{"buffer": 0, "byteLength": 4}],
        "images": [{"bufferView": 0}]
    }"#;
    let err = Document::from_json(json).unwrap_err();
    assert_eq!(
        err.to_string(),
        "[E3005] Invariant violation: Invalid image: 0. Images must have either a uri or a bufferView and a mimeType."
    );
}

#[test]
fn test_image_with_two_sources() {
    let mut document = Document::new();
    let mut image = Image::new("img");
    image.uri = Some("a.png".into());
    image.buffer_view_id = Some("view".into());
    image.mime_type = Some("image/png".into());
    document.append_image(image, AppendIdPolicy::ThrowOnEmpty).unwrap();

    // Reference checks run first, so give the view something to point at
    let mut buffer = libgltf::Buffer::new("buf");
    buffer.byte_length = 4;
    document.append_buffer(buffer, AppendIdPolicy::ThrowOnEmpty).unwrap();
    let mut view = libgltf::BufferView::new("view");
    view.buffer_id = "buf".into();
    view.byte_length = 4;
    document.append_buffer_view(view, AppendIdPolicy::ThrowOnEmpty).unwrap();

    let err = document.to_json().unwrap_err();
    assert!(err.to_string().contains("but not both"));
}

#[test]
fn test_required_extension_must_be_used() {
    let mut document = Document::new();
    document.extensions_required.insert("EXT_only_required".into());

    let err = document.to_json().unwrap_err();
    assert!(matches!(err, Error::MissingExtensionDeclaration(ref name) if name == "EXT_only_required"));
}

#[test]
fn test_declare_required_extension() {
    let mut document = Document::new();
    document.declare_extension("EXT_needed", true);
    assert!(document.is_extension_used("EXT_needed"));
    assert!(document.is_extension_required("EXT_needed"));
    assert!(document.to_json().is_ok());
}

#[test]
fn test_default_scene_fallback() {
    let mut document = Document::new();
    assert!(matches!(
        document.default_scene(),
        Err(Error::DefaultSceneNotFound)
    ));

    document
        .append_scene(libgltf::Scene::new("first"), AppendIdPolicy::ThrowOnEmpty)
        .unwrap();
    assert!(!document.has_default_scene());
    assert_eq!(document.default_scene().unwrap().id, "first");
}

#[test]
fn test_mesh_without_primitives() {
    let mut document = Document::new();
    document
        .append_mesh(Mesh::new("bare"), AppendIdPolicy::ThrowOnEmpty)
        .unwrap();

    assert_eq!(invariant_message(&document), "Mesh bare has no primitives");
}

#[test]
fn test_skin_without_joints() {
    let mut document = Document::new();
    document
        .append_skin(Skin::new("rig"), AppendIdPolicy::ThrowOnEmpty)
        .unwrap();

    assert_eq!(invariant_message(&document), "Skin rig has no joints");
}

#[test]
fn test_animation_without_channels() {
    let mut document = Document::new();
    for id in ["time", "value"] {
        document
            .append_accessor(Accessor::new(id), AppendIdPolicy::ThrowOnEmpty)
            .unwrap();
    }
    let mut animation = libgltf::Animation::new("idle");
    animation
        .samplers
        .append(
            AnimationSampler::new("s", "time", "value"),
            AppendIdPolicy::ThrowOnEmpty,
        )
        .unwrap();
    document
        .append_animation(animation, AppendIdPolicy::ThrowOnEmpty)
        .unwrap();

    assert_eq!(invariant_message(&document), "Animation idle has no channels");

    let mut document = Document::new();
    document
        .append_animation(libgltf::Animation::new("empty"), AppendIdPolicy::ThrowOnEmpty)
        .unwrap();
    assert!(invariant_message(&document).starts_with("Animation empty has no"));
}

#[test]
fn test_sparse_indices_component_type() {
    let mut document = Document::new();
    let mut buffer = Buffer::new("buf");
    buffer.byte_length = 16;
    document.append_buffer(buffer, AppendIdPolicy::ThrowOnEmpty).unwrap();
    let mut view = BufferView::new("view");
    view.buffer_id = "buf".into();
    view.byte_length = 16;
    document.append_buffer_view(view, AppendIdPolicy::ThrowOnEmpty).unwrap();

    let mut sparse = AccessorSparse::default();
    sparse.count = 1;
    sparse.indices.buffer_view_id = "view".into();
    sparse.indices.component_type = ComponentType::Float;
    sparse.values.buffer_view_id = "view".into();
    let mut accessor = Accessor::new("displaced");
    accessor.count = 4;
    accessor.sparse = Some(sparse);
    document
        .append_accessor(accessor, AppendIdPolicy::ThrowOnEmpty)
        .unwrap();

    assert!(
        invariant_message(&document)
            .starts_with("Accessor displaced has sparse indices of component type 5126")
    );

    // Every unsigned type encodes and decodes again
    for component_type in [
        ComponentType::UnsignedByte,
        ComponentType::UnsignedShort,
        ComponentType::UnsignedInt,
    ] {
        document
            .accessors
            .get_mut("displaced")
            .unwrap()
            .sparse
            .as_mut()
            .unwrap()
            .indices
            .component_type = component_type;
        let decoded = Document::from_json(&document.to_json().unwrap()).unwrap();
        let sparse = decoded.accessors.get("0").unwrap().sparse.clone().unwrap();
        assert_eq!(sparse.indices.component_type, component_type);
    }
}

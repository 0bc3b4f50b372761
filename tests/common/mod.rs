//! Shared fixtures for integration tests

#![allow(dead_code)]

use libgltf::{
    Accessor, AccessorType, AlphaMode, Animation, AnimationChannel, AnimationSampler,
    AnimationTarget, AppendIdPolicy, Buffer, BufferView, BufferViewTarget, Camera, Color4,
    ComponentType, Document, Image, Interpolation, Material, Mesh, MeshPrimitive, Node,
    Perspective, Projection, Quaternion, Sampler, Scene, Skin, TargetPath, Texture, TextureInfo,
    Vector3, WrapMode,
};
use serde_json::json;

/// A document touching every registry, with ids that are not array positions
pub fn sample_document() -> Document {
    let mut document = Document::new();
    document.asset.generator = Some("libgltf tests".into());

    let mut buffer = Buffer::new("geometry");
    buffer.byte_length = 1024;
    document.append_buffer(buffer, AppendIdPolicy::ThrowOnEmpty).unwrap();

    let mut vertices = BufferView::new("vertices");
    vertices.buffer_id = "geometry".into();
    vertices.byte_length = 512;
    vertices.byte_stride = Some(12);
    vertices.target = Some(BufferViewTarget::ArrayBuffer);
    document.append_buffer_view(vertices, AppendIdPolicy::ThrowOnEmpty).unwrap();

    let mut indices = BufferView::new("indices");
    indices.buffer_id = "geometry".into();
    indices.byte_offset = 512;
    indices.byte_length = 512;
    indices.target = Some(BufferViewTarget::ElementArrayBuffer);
    document.append_buffer_view(indices, AppendIdPolicy::ThrowOnEmpty).unwrap();

    let mut positions = Accessor::new("positions");
    positions.buffer_view_id = Some("vertices".into());
    positions.count = 24;
    positions.accessor_type = AccessorType::Vec3;
    positions.min = vec![-1.0, -1.0, -1.0];
    positions.max = vec![1.0, 1.0, 1.0];
    document.append_accessor(positions, AppendIdPolicy::ThrowOnEmpty).unwrap();

    let mut index_data = Accessor::new("index-data");
    index_data.buffer_view_id = Some("indices".into());
    index_data.component_type = ComponentType::UnsignedShort;
    index_data.count = 36;
    document.append_accessor(index_data, AppendIdPolicy::ThrowOnEmpty).unwrap();

    let mut times = Accessor::new("times");
    times.buffer_view_id = Some("vertices".into());
    times.byte_offset = 288;
    times.count = 2;
    document.append_accessor(times, AppendIdPolicy::ThrowOnEmpty).unwrap();

    let mut rotations = Accessor::new("rotations");
    rotations.buffer_view_id = Some("vertices".into());
    rotations.byte_offset = 296;
    rotations.count = 2;
    rotations.accessor_type = AccessorType::Vec4;
    document.append_accessor(rotations, AppendIdPolicy::ThrowOnEmpty).unwrap();

    let mut image = Image::new("albedo-image");
    image.uri = Some("albedo.png".into());
    document.append_image(image, AppendIdPolicy::ThrowOnEmpty).unwrap();

    let mut sampler = Sampler::new("clamp");
    sampler.wrap_s = WrapMode::ClampToEdge;
    document.append_sampler(sampler, AppendIdPolicy::ThrowOnEmpty).unwrap();

    let mut texture = Texture::new("albedo");
    texture.image_id = Some("albedo-image".into());
    texture.sampler_id = Some("clamp".into());
    document.append_texture(texture, AppendIdPolicy::ThrowOnEmpty).unwrap();

    let mut material = Material::new("painted");
    material.name = Some("Painted metal".into());
    material.pbr_metallic_roughness.base_color_factor = Color4::new(0.8, 0.1, 0.1, 1.0);
    material.pbr_metallic_roughness.base_color_texture = Some(TextureInfo::new("albedo"));
    material.pbr_metallic_roughness.metallic_factor = 0.25;
    material.alpha_mode = AlphaMode::Blend;
    material.property.extras = Some(json!({"author": "tests"}));
    document.append_material(material, AppendIdPolicy::ThrowOnEmpty).unwrap();

    let mut primitive = MeshPrimitive::default();
    primitive
        .attributes
        .insert("POSITION".into(), "positions".into());
    primitive.indices_id = Some("index-data".into());
    primitive.material_id = Some("painted".into());
    let mut mesh = Mesh::new("cube");
    mesh.primitives.push(primitive);
    document.append_mesh(mesh, AppendIdPolicy::ThrowOnEmpty).unwrap();

    let mut perspective = Perspective::new(0.8, 0.1);
    perspective.zfar = Some(100.0);
    perspective.aspect_ratio = Some(1.5);
    document
        .append_camera(
            Camera::new("eye", Projection::Perspective(perspective)),
            AppendIdPolicy::ThrowOnEmpty,
        )
        .unwrap();

    let mut cube = Node::new("cube-node");
    cube.mesh_id = Some("cube".into());
    cube.translation = Vector3::new(0.0, 1.0, 0.0);
    cube.rotation = Quaternion::new(0.0, 0.7071068, 0.0, 0.7071068);
    let mut camera = Node::new("camera-node");
    camera.camera_id = Some("eye".into());
    camera.translation = Vector3::new(0.0, 0.0, 5.0);
    let mut root = Node::new("root");
    root.children = vec!["cube-node".into(), "camera-node".into()];
    for node in [cube, camera, root] {
        document.append_node(node, AppendIdPolicy::ThrowOnEmpty).unwrap();
    }

    let mut skin = Skin::new("rig");
    skin.skeleton_id = Some("root".into());
    skin.joint_ids = vec!["root".into(), "cube-node".into()];
    document.append_skin(skin, AppendIdPolicy::ThrowOnEmpty).unwrap();

    let mut animation = Animation::new("spin");
    let mut spin_sampler = AnimationSampler::new("s", "times", "rotations");
    spin_sampler.interpolation = Interpolation::Step;
    animation
        .samplers
        .append(spin_sampler, AppendIdPolicy::ThrowOnEmpty)
        .unwrap();
    animation
        .channels
        .append(
            AnimationChannel::new(
                "c",
                "s",
                AnimationTarget::new("cube-node", TargetPath::Rotation),
            ),
            AppendIdPolicy::ThrowOnEmpty,
        )
        .unwrap();
    document.append_animation(animation, AppendIdPolicy::ThrowOnEmpty).unwrap();

    let mut scene = Scene::new("main");
    scene.name = Some("Main".into());
    scene.nodes.push("root".into());
    document.set_default_scene(scene, AppendIdPolicy::ThrowOnEmpty).unwrap();

    document
}

/// Rename every id to its decimal position, as decoding does
///
/// Encoding then decoding `document` yields exactly this document.
pub fn with_positional_ids(document: &Document) -> Document {
    let json = document.to_json().unwrap();
    Document::from_json(&json).unwrap()
}

//! Core document invariants: declarations, references, transforms, cameras

use crate::container::{Identified, IndexedContainer};
use crate::error::{Error, Result};
use crate::model::{ComponentType, Document};

/// Fail with [`Error::NotFound`] unless `id` names an element of `container`
pub(super) fn require<T: Identified>(container: &IndexedContainer<T>, id: &str) -> Result<()> {
    container.get(id).map(|_| ())
}

fn require_all<T: Identified>(container: &IndexedContainer<T>, ids: &[String]) -> Result<()> {
    ids.iter().try_for_each(|id| require(container, id))
}

/// Every required extension must also be declared as used
pub(super) fn validate_extension_declarations(document: &Document) -> Result<()> {
    match document
        .extensions_required
        .iter()
        .find(|name| !document.extensions_used.contains(*name))
    {
        Some(name) => Err(Error::MissingExtensionDeclaration(name.clone())),
        None => Ok(()),
    }
}

/// A default scene id, when set, must resolve
pub(super) fn validate_default_scene(document: &Document) -> Result<()> {
    match &document.default_scene_id {
        Some(id) => require(&document.scenes, id),
        None => Ok(()),
    }
}

/// Every id held by a buffer view, accessor, node, scene, skin, mesh,
/// texture or animation must resolve in its target registry
pub(super) fn validate_references(document: &Document) -> Result<()> {
    for view in &document.buffer_views {
        require(&document.buffers, &view.buffer_id)?;
    }

    for accessor in &document.accessors {
        if let Some(id) = &accessor.buffer_view_id {
            require(&document.buffer_views, id)?;
        }
        if let Some(sparse) = &accessor.sparse {
            require(&document.buffer_views, &sparse.indices.buffer_view_id)?;
            require(&document.buffer_views, &sparse.values.buffer_view_id)?;
        }
    }

    for node in &document.nodes {
        if let Some(id) = &node.camera_id {
            require(&document.cameras, id)?;
        }
        if let Some(id) = &node.skin_id {
            require(&document.skins, id)?;
        }
        if let Some(id) = &node.mesh_id {
            require(&document.meshes, id)?;
        }
        require_all(&document.nodes, &node.children)?;
    }

    for scene in &document.scenes {
        require_all(&document.nodes, &scene.nodes)?;
    }

    for skin in &document.skins {
        if let Some(id) = &skin.inverse_bind_matrices_id {
            require(&document.accessors, id)?;
        }
        if let Some(id) = &skin.skeleton_id {
            require(&document.nodes, id)?;
        }
        require_all(&document.nodes, &skin.joint_ids)?;
    }

    for mesh in &document.meshes {
        for primitive in &mesh.primitives {
            for id in primitive.accessor_ids() {
                require(&document.accessors, id)?;
            }
            if let Some(id) = &primitive.material_id {
                require(&document.materials, id)?;
            }
        }
    }

    for texture in &document.textures {
        if let Some(id) = &texture.sampler_id {
            require(&document.samplers, id)?;
        }
        if let Some(id) = &texture.image_id {
            require(&document.images, id)?;
        }
    }

    for image in &document.images {
        if let Some(id) = &image.buffer_view_id {
            require(&document.buffer_views, id)?;
        }
    }

    for animation in &document.animations {
        for channel in &animation.channels {
            require(&animation.samplers, &channel.sampler_id)?;
            require(&document.nodes, &channel.target.node_id)?;
        }
        for sampler in &animation.samplers {
            require(&document.accessors, &sampler.input_id)?;
            require(&document.accessors, &sampler.output_id)?;
        }
    }

    Ok(())
}

/// Arrays glTF requires to be non-empty must have at least one element
pub(super) fn validate_non_empty_arrays(document: &Document) -> Result<()> {
    if let Some(mesh) = document.meshes.iter().find(|mesh| mesh.primitives.is_empty()) {
        return Err(Error::InvariantViolation(format!(
            "Mesh {} has no primitives",
            mesh.id
        )));
    }
    if let Some(skin) = document.skins.iter().find(|skin| skin.joint_ids.is_empty()) {
        return Err(Error::InvariantViolation(format!("Skin {} has no joints", skin.id)));
    }
    for animation in &document.animations {
        if animation.channels.is_empty() {
            return Err(Error::InvariantViolation(format!(
                "Animation {} has no channels",
                animation.id
            )));
        }
        if animation.samplers.is_empty() {
            return Err(Error::InvariantViolation(format!(
                "Animation {} has no samplers",
                animation.id
            )));
        }
    }
    Ok(())
}

/// Sparse indices are unsigned byte, short or int
pub(super) fn validate_sparse_indices(document: &Document) -> Result<()> {
    for accessor in &document.accessors {
        let Some(sparse) = &accessor.sparse else {
            continue;
        };
        let component_type = sparse.indices.component_type;
        if !matches!(
            component_type,
            ComponentType::UnsignedByte | ComponentType::UnsignedShort | ComponentType::UnsignedInt
        ) {
            return Err(Error::InvariantViolation(format!(
                "Accessor {} has sparse indices of component type {}, expected an unsigned integer type",
                accessor.id,
                component_type.code()
            )));
        }
    }
    Ok(())
}

/// A node may carry a non-identity matrix or a non-identity TRS, not both
pub(super) fn validate_node_transforms(document: &Document) -> Result<()> {
    match document.nodes.iter().find(|node| !node.has_valid_transform()) {
        Some(node) => Err(Error::InvariantViolation(format!(
            "Node {} doesn't have a valid transform type",
            node.id
        ))),
        None => Ok(()),
    }
}

/// Projection parameters must be consistent
pub(super) fn validate_cameras(document: &Document) -> Result<()> {
    for camera in &document.cameras {
        if !camera.projection.is_valid() {
            return Err(Error::InvariantViolation(format!(
                "Camera {} has an invalid {} projection",
                camera.id,
                camera.projection.projection_type().as_str()
            )));
        }
    }
    Ok(())
}

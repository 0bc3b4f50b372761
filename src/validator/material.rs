//! Material and image invariants

use crate::error::{Error, Result};
use crate::model::Document;

use super::core::require;

/// Every texture a material references must exist
pub(super) fn validate_material_references(document: &Document) -> Result<()> {
    for material in &document.materials {
        for id in material.texture_ids() {
            require(&document.textures, id)?;
        }
    }
    Ok(())
}

/// An image is either a URI, or a buffer view paired with a MIME type
pub(super) fn validate_images(document: &Document) -> Result<()> {
    for image in &document.images {
        if image.uri.is_some() && image.buffer_view_id.is_some() {
            return Err(Error::InvariantViolation(format!(
                "Invalid image: {}. Images can only have a uri or a bufferView, but not both.",
                image.id
            )));
        }
        if !image.has_valid_source() {
            return Err(Error::InvariantViolation(format!(
                "Invalid image: {}. Images must have either a uri or a bufferView and a mimeType.",
                image.id
            )));
        }
    }
    Ok(())
}

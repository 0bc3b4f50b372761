//! Invariant checks for glTF documents
//!
//! These checks run before every encode and, unless disabled in the
//! [`ParserConfig`](crate::ParserConfig), after every decode. They ensure
//! that:
//! - every extension listed in `extensionsRequired` is also listed in
//!   `extensionsUsed`
//! - the default scene id, when set, names an existing scene
//! - every id reference resolves in the registry it points into
//! - meshes, skins and animations have the elements glTF requires, and
//!   sparse indices use an unsigned integer type
//! - nodes use a matrix or TRS, never both
//! - camera projections are consistent
//! - images have exactly one data source

mod core;
mod material;

use crate::error::Result;
use crate::model::Document;

use core::{
    validate_cameras, validate_default_scene, validate_extension_declarations,
    validate_node_transforms, validate_non_empty_arrays, validate_references,
    validate_sparse_indices,
};
use material::{validate_images, validate_material_references};

/// Validate every document invariant
pub(crate) fn validate_document(document: &Document) -> Result<()> {
    validate_extension_declarations(document)?;
    validate_default_scene(document)?;
    validate_references(document)?;
    validate_material_references(document)?;
    validate_non_empty_arrays(document)?;
    validate_sparse_indices(document)?;
    validate_node_transforms(document)?;
    validate_cameras(document)?;
    validate_images(document)?;
    Ok(())
}

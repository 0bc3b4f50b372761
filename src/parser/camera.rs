//! Reader for cameras

use crate::error::{Error, Result};
use crate::model::{Camera, Orthographic, Perspective, Projection, ProjectionType};

use super::core::Object;

pub(crate) fn read_camera(id: String, object: &Object<'_>) -> Result<Camera> {
    let type_name = object.required_string("type")?;
    let projection_type = ProjectionType::parse(&type_name).ok_or_else(|| {
        Error::invalid_at(
            &object.child_path("type"),
            &format!("unknown projection type '{}'", type_name),
        )
    })?;

    // The parameters live in a member named after the discriminator
    let parameters = object.required_object(projection_type.as_str())?;

    let projection = match projection_type {
        ProjectionType::Perspective => Projection::Perspective(Perspective {
            znear: parameters.required_f32("znear")?,
            zfar: parameters.f32("zfar")?,
            aspect_ratio: parameters.f32("aspectRatio")?,
            yfov: parameters.required_f32("yfov")?,
            property: parameters.property()?,
        }),
        ProjectionType::Orthographic => Projection::Orthographic(Orthographic {
            xmag: parameters.required_f32("xmag")?,
            ymag: parameters.required_f32("ymag")?,
            zfar: parameters.required_f32("zfar")?,
            znear: parameters.required_f32("znear")?,
            property: parameters.property()?,
        }),
    };

    if !projection.is_valid() {
        return Err(Error::InvariantViolation(format!(
            "Camera at {} has an invalid {} projection",
            object.path(),
            projection_type.as_str()
        )));
    }

    Ok(Camera {
        id,
        name: object.string("name")?,
        projection,
        property: object.property()?,
    })
}

//! Camera types

use crate::property::{Property, impl_extensible};

/// Discriminator written as the camera's `type`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionType {
    /// `"perspective"`
    Perspective,
    /// `"orthographic"`
    Orthographic,
}

impl ProjectionType {
    /// Name used in JSON
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectionType::Perspective => "perspective",
            ProjectionType::Orthographic => "orthographic",
        }
    }

    /// Parse the JSON name
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "perspective" => Some(ProjectionType::Perspective),
            "orthographic" => Some(ProjectionType::Orthographic),
            _ => None,
        }
    }
}

/// Perspective projection
#[derive(Debug, Clone, PartialEq)]
pub struct Perspective {
    /// Distance to the near clipping plane
    pub znear: f32,
    /// Distance to the far clipping plane; absent means infinite
    pub zfar: Option<f32>,
    /// Aspect ratio of the field of view; absent means the viewport's
    pub aspect_ratio: Option<f32>,
    /// Vertical field of view in radians
    pub yfov: f32,
    /// Extensions and extras
    pub property: Property,
}

impl Perspective {
    /// Infinite perspective projection
    pub fn new(yfov: f32, znear: f32) -> Self {
        Self {
            znear,
            zfar: None,
            aspect_ratio: None,
            yfov,
            property: Property::default(),
        }
    }

    /// Whether the far plane, if any, lies beyond the near plane
    pub fn is_valid(&self) -> bool {
        self.zfar.is_none_or(|zfar| zfar > self.znear)
    }
}

/// Orthographic projection
#[derive(Debug, Clone, PartialEq)]
pub struct Orthographic {
    /// Horizontal magnification
    pub xmag: f32,
    /// Vertical magnification
    pub ymag: f32,
    /// Distance to the far clipping plane
    pub zfar: f32,
    /// Distance to the near clipping plane
    pub znear: f32,
    /// Extensions and extras
    pub property: Property,
}

impl Orthographic {
    /// Orthographic projection with the given view volume
    pub fn new(xmag: f32, ymag: f32, znear: f32, zfar: f32) -> Self {
        Self {
            xmag,
            ymag,
            zfar,
            znear,
            property: Property::default(),
        }
    }

    /// Whether the far plane lies beyond the near plane and both
    /// magnifications are non-zero
    pub fn is_valid(&self) -> bool {
        self.zfar > self.znear && self.xmag != 0.0 && self.ymag != 0.0
    }
}

/// The projection a camera uses
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Projection {
    Perspective(Perspective),
    Orthographic(Orthographic),
}

impl Projection {
    /// The JSON discriminator of this projection
    pub fn projection_type(&self) -> ProjectionType {
        match self {
            Projection::Perspective(_) => ProjectionType::Perspective,
            Projection::Orthographic(_) => ProjectionType::Orthographic,
        }
    }

    /// Whether the projection parameters are consistent
    pub fn is_valid(&self) -> bool {
        match self {
            Projection::Perspective(perspective) => perspective.is_valid(),
            Projection::Orthographic(orthographic) => orthographic.is_valid(),
        }
    }
}

/// A camera
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Stable id
    pub id: String,
    /// Optional user-facing name
    pub name: Option<String>,
    /// Projection parameters
    pub projection: Projection,
    /// Extensions and extras
    pub property: Property,
}

impl Camera {
    /// Create a camera with the given id and projection
    pub fn new(id: impl Into<String>, projection: Projection) -> Self {
        Self {
            id: id.into(),
            name: None,
            projection,
            property: Property::default(),
        }
    }
}

identified!(Camera);

impl_extensible!(Perspective => Perspective);
impl_extensible!(Orthographic => Orthographic);

impl_extensible!(Camera => Camera, |this, visitor| {
    match &mut this.projection {
        Projection::Perspective(perspective) => perspective.visit_properties_mut(visitor),
        Projection::Orthographic(orthographic) => orthographic.visit_properties_mut(visitor),
    }
});

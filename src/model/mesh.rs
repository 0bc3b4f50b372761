//! Mesh and primitive types

use std::collections::BTreeMap;

use crate::property::{Property, impl_extensible};

/// Topology of a primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub enum MeshMode {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl MeshMode {
    /// Numeric code used in JSON
    pub fn code(self) -> u32 {
        match self {
            MeshMode::Points => 0,
            MeshMode::Lines => 1,
            MeshMode::LineLoop => 2,
            MeshMode::LineStrip => 3,
            MeshMode::Triangles => 4,
            MeshMode::TriangleStrip => 5,
            MeshMode::TriangleFan => 6,
        }
    }

    /// Parse a numeric code
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(MeshMode::Points),
            1 => Some(MeshMode::Lines),
            2 => Some(MeshMode::LineLoop),
            3 => Some(MeshMode::LineStrip),
            4 => Some(MeshMode::Triangles),
            5 => Some(MeshMode::TriangleStrip),
            6 => Some(MeshMode::TriangleFan),
            _ => None,
        }
    }
}

/// Displacements of a primitive's attributes for one morph target
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MorphTarget {
    /// Accessor id of `POSITION` displacements
    pub position_id: Option<String>,
    /// Accessor id of `NORMAL` displacements
    pub normal_id: Option<String>,
    /// Accessor id of `TANGENT` displacements
    pub tangent_id: Option<String>,
}

impl MorphTarget {
    /// Accessor ids paired with their attribute names, in wire order
    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("NORMAL", self.normal_id.as_deref()),
            ("POSITION", self.position_id.as_deref()),
            ("TANGENT", self.tangent_id.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, id)| id.map(|id| (name, id)))
    }
}

/// Geometry to be rendered with a single material
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshPrimitive {
    /// Attribute semantic (`POSITION`, `TEXCOORD_0`, ...) to accessor id
    pub attributes: BTreeMap<String, String>,
    /// Accessor id of vertex indices
    pub indices_id: Option<String>,
    /// Id of the [`Material`](super::Material)
    pub material_id: Option<String>,
    /// Topology
    pub mode: MeshMode,
    /// Morph targets
    pub targets: Vec<MorphTarget>,
    /// Extensions and extras
    pub property: Property,
}

impl MeshPrimitive {
    /// Accessor id bound to an attribute semantic
    pub fn attribute(&self, semantic: &str) -> Option<&str> {
        self.attributes.get(semantic).map(String::as_str)
    }

    /// Every accessor id the primitive references
    pub fn accessor_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.attributes.values().map(String::as_str).collect();
        ids.extend(self.indices_id.as_deref());
        for target in &self.targets {
            ids.extend(target.attributes().map(|(_, id)| id));
        }
        ids
    }
}

/// A set of primitives
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Stable id
    pub id: String,
    /// Optional user-facing name
    pub name: Option<String>,
    /// Primitives, rendered together
    pub primitives: Vec<MeshPrimitive>,
    /// Default morph target weights
    pub weights: Vec<f32>,
    /// Extensions and extras
    pub property: Property,
}

impl Mesh {
    /// Create a mesh with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

identified!(Mesh);

impl_extensible!(MeshPrimitive => MeshPrimitive);

impl_extensible!(Mesh => Mesh, |this, visitor| {
    for primitive in &mut this.primitives {
        primitive.visit_properties_mut(visitor)?;
    }
    Ok(())
});

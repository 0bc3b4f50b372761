//! Core glTF types: asset metadata, binary data, scene graph

use crate::math::{Matrix4, Quaternion, Vector3};
use crate::property::{Property, impl_extensible};

/// Metadata about the glTF asset
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    /// Copyright message suitable for display to credit the content creator
    pub copyright: Option<String>,
    /// Tool that generated this asset
    pub generator: Option<String>,
    /// glTF version this asset targets
    pub version: String,
    /// Minimum glTF version a loader must support
    pub min_version: Option<String>,
    /// Extensions and extras
    pub property: Property,
}

impl Default for Asset {
    fn default() -> Self {
        Self {
            copyright: None,
            generator: None,
            version: "2.0".to_string(),
            min_version: None,
            property: Property::default(),
        }
    }
}

impl_extensible!(Asset => Asset);

/// A buffer of raw binary data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Buffer {
    /// Stable id
    pub id: String,
    /// Optional user-facing name
    pub name: Option<String>,
    /// Location of the data; absent for the GLB-embedded buffer
    pub uri: Option<String>,
    /// Length in bytes
    pub byte_length: u64,
    /// Extensions and extras
    pub property: Property,
}

impl Buffer {
    /// Create a buffer with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

/// Intended GPU binding for a buffer view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferViewTarget {
    /// Vertex attributes (34962)
    ArrayBuffer,
    /// Vertex indices (34963)
    ElementArrayBuffer,
}

impl BufferViewTarget {
    /// Numeric code used in JSON
    pub fn code(self) -> u32 {
        match self {
            BufferViewTarget::ArrayBuffer => 34962,
            BufferViewTarget::ElementArrayBuffer => 34963,
        }
    }

    /// Parse a numeric code
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            34962 => Some(BufferViewTarget::ArrayBuffer),
            34963 => Some(BufferViewTarget::ElementArrayBuffer),
            _ => None,
        }
    }
}

/// A contiguous slice of a buffer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BufferView {
    /// Stable id
    pub id: String,
    /// Optional user-facing name
    pub name: Option<String>,
    /// Id of the [`Buffer`] this view reads from
    pub buffer_id: String,
    /// Offset into the buffer in bytes
    pub byte_offset: u64,
    /// Length in bytes
    pub byte_length: u64,
    /// Stride between vertex attributes, if interleaved
    pub byte_stride: Option<u32>,
    /// Intended GPU binding
    pub target: Option<BufferViewTarget>,
    /// Extensions and extras
    pub property: Property,
}

impl BufferView {
    /// Create a buffer view with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

/// Data type of accessor components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComponentType {
    /// 5120
    Byte,
    /// 5121
    UnsignedByte,
    /// 5122
    Short,
    /// 5123
    UnsignedShort,
    /// 5125
    UnsignedInt,
    /// 5126
    #[default]
    Float,
}

impl ComponentType {
    /// Numeric code used in JSON
    pub fn code(self) -> u32 {
        match self {
            ComponentType::Byte => 5120,
            ComponentType::UnsignedByte => 5121,
            ComponentType::Short => 5122,
            ComponentType::UnsignedShort => 5123,
            ComponentType::UnsignedInt => 5125,
            ComponentType::Float => 5126,
        }
    }

    /// Parse a numeric code
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            5120 => Some(ComponentType::Byte),
            5121 => Some(ComponentType::UnsignedByte),
            5122 => Some(ComponentType::Short),
            5123 => Some(ComponentType::UnsignedShort),
            5125 => Some(ComponentType::UnsignedInt),
            5126 => Some(ComponentType::Float),
            _ => None,
        }
    }

    /// Size of one component in bytes
    pub fn byte_size(self) -> usize {
        match self {
            ComponentType::Byte | ComponentType::UnsignedByte => 1,
            ComponentType::Short | ComponentType::UnsignedShort => 2,
            ComponentType::UnsignedInt | ComponentType::Float => 4,
        }
    }
}

/// Shape of an accessor element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub enum AccessorType {
    #[default]
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl AccessorType {
    /// Name used in JSON
    pub fn as_str(self) -> &'static str {
        match self {
            AccessorType::Scalar => "SCALAR",
            AccessorType::Vec2 => "VEC2",
            AccessorType::Vec3 => "VEC3",
            AccessorType::Vec4 => "VEC4",
            AccessorType::Mat2 => "MAT2",
            AccessorType::Mat3 => "MAT3",
            AccessorType::Mat4 => "MAT4",
        }
    }

    /// Parse the JSON name
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "SCALAR" => Some(AccessorType::Scalar),
            "VEC2" => Some(AccessorType::Vec2),
            "VEC3" => Some(AccessorType::Vec3),
            "VEC4" => Some(AccessorType::Vec4),
            "MAT2" => Some(AccessorType::Mat2),
            "MAT3" => Some(AccessorType::Mat3),
            "MAT4" => Some(AccessorType::Mat4),
            _ => None,
        }
    }

    /// Number of components per element
    pub fn component_count(self) -> usize {
        match self {
            AccessorType::Scalar => 1,
            AccessorType::Vec2 => 2,
            AccessorType::Vec3 => 3,
            AccessorType::Vec4 | AccessorType::Mat2 => 4,
            AccessorType::Mat3 => 9,
            AccessorType::Mat4 => 16,
        }
    }
}

/// A typed view into a buffer view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accessor {
    /// Stable id
    pub id: String,
    /// Optional user-facing name
    pub name: Option<String>,
    /// Id of the [`BufferView`] holding the data; absent means all zeros
    pub buffer_view_id: Option<String>,
    /// Offset relative to the start of the buffer view in bytes
    pub byte_offset: u64,
    /// Data type of components
    pub component_type: ComponentType,
    /// Whether integer data is normalized on access
    pub normalized: bool,
    /// Number of elements
    pub count: u64,
    /// Element shape
    pub accessor_type: AccessorType,
    /// Per-component maximum
    pub max: Vec<f32>,
    /// Per-component minimum
    pub min: Vec<f32>,
    /// Sparse substitution of some elements
    pub sparse: Option<AccessorSparse>,
    /// Extensions and extras
    pub property: Property,
}

impl Accessor {
    /// Create an accessor with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

/// Sparse storage of accessor elements that deviate from their base
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccessorSparse {
    /// Number of displaced elements
    pub count: u64,
    /// Where the displaced element indices live
    pub indices: SparseIndices,
    /// Where the displaced element values live
    pub values: SparseValues,
    /// Extensions and extras
    pub property: Property,
}

/// Index array of a sparse accessor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseIndices {
    /// Id of the [`BufferView`] holding the indices
    pub buffer_view_id: String,
    /// Offset into the buffer view in bytes
    pub byte_offset: u64,
    /// Integer type of the indices
    pub component_type: ComponentType,
    /// Extensions and extras
    pub property: Property,
}

/// Value array of a sparse accessor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseValues {
    /// Id of the [`BufferView`] holding the values
    pub buffer_view_id: String,
    /// Offset into the buffer view in bytes
    pub byte_offset: u64,
    /// Extensions and extras
    pub property: Property,
}

/// A set of root nodes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    /// Stable id
    pub id: String,
    /// Optional user-facing name
    pub name: Option<String>,
    /// Ids of root [`Node`]s
    pub nodes: Vec<String>,
    /// Extensions and extras
    pub property: Property,
}

impl Scene {
    /// Create a scene with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

/// How a node expresses its local transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformationType {
    /// Neither a matrix nor TRS differs from identity
    Identity,
    /// A non-identity matrix
    Matrix,
    /// Non-identity translation, rotation or scale
    Trs,
}

/// A node in the scene hierarchy
///
/// A node may use either a `matrix` or any combination of `translation`,
/// `rotation` and `scale`, never both.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Stable id
    pub id: String,
    /// Optional user-facing name
    pub name: Option<String>,
    /// Id of an attached [`Camera`](super::Camera)
    pub camera_id: Option<String>,
    /// Ids of child nodes
    pub children: Vec<String>,
    /// Id of the [`Skin`] used by the mesh
    pub skin_id: Option<String>,
    /// Id of an attached [`Mesh`](super::Mesh)
    pub mesh_id: Option<String>,
    /// Local transform as a matrix
    pub matrix: Matrix4,
    /// Local translation
    pub translation: Vector3,
    /// Local rotation
    pub rotation: Quaternion,
    /// Local non-uniform scale
    pub scale: Vector3,
    /// Morph target weights, overriding the mesh's
    pub weights: Vec<f32>,
    /// Extensions and extras
    pub property: Property,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: None,
            camera_id: None,
            children: Vec::new(),
            skin_id: None,
            mesh_id: None,
            matrix: Matrix4::IDENTITY,
            translation: Vector3::ZERO,
            rotation: Quaternion::IDENTITY,
            scale: Vector3::ONE,
            weights: Vec::new(),
            property: Property::default(),
        }
    }
}

impl Node {
    /// Create a node with the given id and an identity transform
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Whether translation, rotation and scale are all identity
    pub fn has_identity_trs(&self) -> bool {
        self.translation == Vector3::ZERO
            && self.rotation == Quaternion::IDENTITY
            && self.scale == Vector3::ONE
    }

    /// Whether at most one of matrix and TRS differs from identity
    pub fn has_valid_transform(&self) -> bool {
        self.matrix == Matrix4::IDENTITY || self.has_identity_trs()
    }

    /// Which representation carries the node's transform
    pub fn transformation_type(&self) -> TransformationType {
        if self.matrix != Matrix4::IDENTITY {
            TransformationType::Matrix
        } else if !self.has_identity_trs() {
            TransformationType::Trs
        } else {
            TransformationType::Identity
        }
    }
}

/// Joints and matrices defining a skin
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Skin {
    /// Stable id
    pub id: String,
    /// Optional user-facing name
    pub name: Option<String>,
    /// Id of the [`Accessor`] holding inverse bind matrices
    pub inverse_bind_matrices_id: Option<String>,
    /// Id of the skeleton root [`Node`]
    pub skeleton_id: Option<String>,
    /// Ids of the joint [`Node`]s
    pub joint_ids: Vec<String>,
    /// Extensions and extras
    pub property: Property,
}

impl Skin {
    /// Create a skin with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

identified!(Buffer, BufferView, Accessor, Scene, Node, Skin);

impl_extensible!(Buffer => Buffer);
impl_extensible!(BufferView => BufferView);
impl_extensible!(Scene => Scene);
impl_extensible!(Node => Node);
impl_extensible!(Skin => Skin);
impl_extensible!(SparseIndices => AccessorSparse);
impl_extensible!(SparseValues => AccessorSparse);

impl_extensible!(AccessorSparse => AccessorSparse, |this, visitor| {
    this.indices.visit_properties_mut(visitor)?;
    this.values.visit_properties_mut(visitor)
});

impl_extensible!(Accessor => Accessor, |this, visitor| {
    match this.sparse.as_mut() {
        Some(sparse) => sparse.visit_properties_mut(visitor),
        None => Ok(()),
    }
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transformation_type() {
        let mut node = Node::new("n");
        assert_eq!(node.transformation_type(), TransformationType::Identity);
        assert!(node.has_valid_transform());

        node.translation = Vector3::new(1.0, 0.0, 0.0);
        assert_eq!(node.transformation_type(), TransformationType::Trs);
        assert!(node.has_valid_transform());

        node.matrix.values[12] = 5.0;
        assert_eq!(node.transformation_type(), TransformationType::Matrix);
        assert!(!node.has_valid_transform());

        node.translation = Vector3::ZERO;
        assert!(node.has_valid_transform());
    }

    #[test]
    fn test_enum_codes() {
        for code in [5120, 5121, 5122, 5123, 5125, 5126] {
            let component = ComponentType::from_code(code).unwrap();
            assert_eq!(component.code() as u64, code);
        }
        assert!(ComponentType::from_code(5124).is_none());

        assert_eq!(AccessorType::parse("MAT4"), Some(AccessorType::Mat4));
        assert_eq!(AccessorType::Mat4.component_count(), 16);
        assert!(AccessorType::parse("vec3").is_none());

        assert_eq!(
            BufferViewTarget::from_code(34963),
            Some(BufferViewTarget::ElementArrayBuffer)
        );
    }

    #[test]
    fn test_asset_defaults_to_current_version() {
        assert_eq!(Asset::default().version, "2.0");
    }
}

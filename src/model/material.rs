//! Material, texture, image and sampler types

use crate::math::{Color3, Color4};
use crate::property::{Property, impl_extensible};

/// Alpha rendering mode of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlphaMode {
    /// Alpha is ignored
    #[default]
    Opaque,
    /// Alpha is compared against the cutoff
    Mask,
    /// Alpha blends with the background
    Blend,
}

impl AlphaMode {
    /// Name used in JSON
    pub fn as_str(self) -> &'static str {
        match self {
            AlphaMode::Opaque => "OPAQUE",
            AlphaMode::Mask => "MASK",
            AlphaMode::Blend => "BLEND",
        }
    }

    /// Parse the JSON name
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "OPAQUE" => Some(AlphaMode::Opaque),
            "MASK" => Some(AlphaMode::Mask),
            "BLEND" => Some(AlphaMode::Blend),
            _ => None,
        }
    }
}

/// Reference to a texture plus the UV set it samples
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextureInfo {
    /// Id of the [`Texture`]
    pub texture_id: String,
    /// Index of the `TEXCOORD_n` attribute
    pub tex_coord: u32,
    /// Extensions and extras
    pub property: Property,
}

impl TextureInfo {
    /// Reference a texture through UV set 0
    pub fn new(texture_id: impl Into<String>) -> Self {
        Self {
            texture_id: texture_id.into(),
            ..Default::default()
        }
    }
}

/// Normal map reference
#[derive(Debug, Clone, PartialEq)]
pub struct NormalTextureInfo {
    /// Id of the [`Texture`]
    pub texture_id: String,
    /// Index of the `TEXCOORD_n` attribute
    pub tex_coord: u32,
    /// Scalar applied to the sampled normal's X and Y
    pub scale: f32,
    /// Extensions and extras
    pub property: Property,
}

impl NormalTextureInfo {
    /// Reference a normal map with unit scale
    pub fn new(texture_id: impl Into<String>) -> Self {
        Self {
            texture_id: texture_id.into(),
            tex_coord: 0,
            scale: 1.0,
            property: Property::default(),
        }
    }
}

/// Occlusion map reference
#[derive(Debug, Clone, PartialEq)]
pub struct OcclusionTextureInfo {
    /// Id of the [`Texture`]
    pub texture_id: String,
    /// Index of the `TEXCOORD_n` attribute
    pub tex_coord: u32,
    /// Amount of occlusion applied
    pub strength: f32,
    /// Extensions and extras
    pub property: Property,
}

impl OcclusionTextureInfo {
    /// Reference an occlusion map with full strength
    pub fn new(texture_id: impl Into<String>) -> Self {
        Self {
            texture_id: texture_id.into(),
            tex_coord: 0,
            strength: 1.0,
            property: Property::default(),
        }
    }
}

/// Metallic-roughness parameters of a material
#[derive(Debug, Clone, PartialEq)]
pub struct PbrMetallicRoughness {
    /// Base color multiplier
    pub base_color_factor: Color4,
    /// Base color texture
    pub base_color_texture: Option<TextureInfo>,
    /// Metalness multiplier
    pub metallic_factor: f32,
    /// Roughness multiplier
    pub roughness_factor: f32,
    /// Metalness (B) and roughness (G) texture
    pub metallic_roughness_texture: Option<TextureInfo>,
    /// Extensions and extras
    pub property: Property,
}

impl Default for PbrMetallicRoughness {
    fn default() -> Self {
        Self {
            base_color_factor: Color4::WHITE,
            base_color_texture: None,
            metallic_factor: 1.0,
            roughness_factor: 1.0,
            metallic_roughness_texture: None,
            property: Property::default(),
        }
    }
}

impl PbrMetallicRoughness {
    /// Whether every member has its default value, in which case the block
    /// is omitted from output
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Appearance of a primitive
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Stable id
    pub id: String,
    /// Optional user-facing name
    pub name: Option<String>,
    /// Metallic-roughness parameters
    pub pbr_metallic_roughness: PbrMetallicRoughness,
    /// Tangent-space normal map
    pub normal_texture: Option<NormalTextureInfo>,
    /// Ambient occlusion map
    pub occlusion_texture: Option<OcclusionTextureInfo>,
    /// Emissive color map
    pub emissive_texture: Option<TextureInfo>,
    /// Emissive color multiplier
    pub emissive_factor: Color3,
    /// Alpha rendering mode
    pub alpha_mode: AlphaMode,
    /// Cutoff used in [`AlphaMode::Mask`]
    pub alpha_cutoff: f32,
    /// Whether back faces are rendered
    pub double_sided: bool,
    /// Extensions and extras
    pub property: Property,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: None,
            pbr_metallic_roughness: PbrMetallicRoughness::default(),
            normal_texture: None,
            occlusion_texture: None,
            emissive_texture: None,
            emissive_factor: Color3::BLACK,
            alpha_mode: AlphaMode::Opaque,
            alpha_cutoff: 0.5,
            double_sided: false,
            property: Property::default(),
        }
    }
}

impl Material {
    /// Create a default material with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Ids of every texture the material references, including those in
    /// its metallic-roughness block
    pub fn texture_ids(&self) -> Vec<&str> {
        let pbr = &self.pbr_metallic_roughness;
        [
            pbr.base_color_texture.as_ref().map(|t| t.texture_id.as_str()),
            pbr.metallic_roughness_texture
                .as_ref()
                .map(|t| t.texture_id.as_str()),
            self.normal_texture.as_ref().map(|t| t.texture_id.as_str()),
            self.occlusion_texture.as_ref().map(|t| t.texture_id.as_str()),
            self.emissive_texture.as_ref().map(|t| t.texture_id.as_str()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// A texture: an image plus the sampler used to read it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Texture {
    /// Stable id
    pub id: String,
    /// Optional user-facing name
    pub name: Option<String>,
    /// Id of the [`Sampler`]; absent means repeat wrapping with auto filtering
    pub sampler_id: Option<String>,
    /// Id of the source [`Image`]
    pub image_id: Option<String>,
    /// Extensions and extras
    pub property: Property,
}

impl Texture {
    /// Create a texture with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

/// Image data used by textures
///
/// An image is either referenced by `uri`, or embedded in a buffer view with
/// an explicit `mime_type`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
    /// Stable id
    pub id: String,
    /// Optional user-facing name
    pub name: Option<String>,
    /// External or data URI
    pub uri: Option<String>,
    /// Media type, required with `buffer_view_id`
    pub mime_type: Option<String>,
    /// Id of the [`BufferView`](super::BufferView) holding the data
    pub buffer_view_id: Option<String>,
    /// Extensions and extras
    pub property: Property,
}

impl Image {
    /// Create an image with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Whether exactly one image source is configured
    pub fn has_valid_source(&self) -> bool {
        match (&self.uri, &self.buffer_view_id) {
            (Some(_), None) => true,
            (None, Some(_)) => self.mime_type.is_some(),
            _ => false,
        }
    }
}

/// Magnification filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum MagFilter {
    Nearest,
    Linear,
}

impl MagFilter {
    /// Numeric code used in JSON
    pub fn code(self) -> u32 {
        match self {
            MagFilter::Nearest => 9728,
            MagFilter::Linear => 9729,
        }
    }

    /// Parse a numeric code
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            9728 => Some(MagFilter::Nearest),
            9729 => Some(MagFilter::Linear),
            _ => None,
        }
    }
}

/// Minification filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum MinFilter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

impl MinFilter {
    /// Numeric code used in JSON
    pub fn code(self) -> u32 {
        match self {
            MinFilter::Nearest => 9728,
            MinFilter::Linear => 9729,
            MinFilter::NearestMipmapNearest => 9984,
            MinFilter::LinearMipmapNearest => 9985,
            MinFilter::NearestMipmapLinear => 9986,
            MinFilter::LinearMipmapLinear => 9987,
        }
    }

    /// Parse a numeric code
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            9728 => Some(MinFilter::Nearest),
            9729 => Some(MinFilter::Linear),
            9984 => Some(MinFilter::NearestMipmapNearest),
            9985 => Some(MinFilter::LinearMipmapNearest),
            9986 => Some(MinFilter::NearestMipmapLinear),
            9987 => Some(MinFilter::LinearMipmapLinear),
            _ => None,
        }
    }
}

/// Texture coordinate wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub enum WrapMode {
    ClampToEdge,
    MirroredRepeat,
    #[default]
    Repeat,
}

impl WrapMode {
    /// Numeric code used in JSON
    pub fn code(self) -> u32 {
        match self {
            WrapMode::ClampToEdge => 33071,
            WrapMode::MirroredRepeat => 33648,
            WrapMode::Repeat => 10497,
        }
    }

    /// Parse a numeric code
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            33071 => Some(WrapMode::ClampToEdge),
            33648 => Some(WrapMode::MirroredRepeat),
            10497 => Some(WrapMode::Repeat),
            _ => None,
        }
    }
}

/// Filtering and wrapping used when sampling a texture
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sampler {
    /// Stable id
    pub id: String,
    /// Optional user-facing name
    pub name: Option<String>,
    /// Magnification filter; absent leaves the choice to the renderer
    pub mag_filter: Option<MagFilter>,
    /// Minification filter; absent leaves the choice to the renderer
    pub min_filter: Option<MinFilter>,
    /// Wrapping along U
    pub wrap_s: WrapMode,
    /// Wrapping along V
    pub wrap_t: WrapMode,
    /// Extensions and extras
    pub property: Property,
}

impl Sampler {
    /// Create a repeat-wrapping sampler with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

identified!(Material, Texture, Image, Sampler);

impl_extensible!(TextureInfo => TextureInfo);
impl_extensible!(NormalTextureInfo => NormalTextureInfo);
impl_extensible!(OcclusionTextureInfo => OcclusionTextureInfo);
impl_extensible!(Texture => Texture);
impl_extensible!(Image => Image);
impl_extensible!(Sampler => Sampler);

impl_extensible!(PbrMetallicRoughness => PbrMetallicRoughness, |this, visitor| {
    if let Some(texture) = this.base_color_texture.as_mut() {
        texture.visit_properties_mut(visitor)?;
    }
    match this.metallic_roughness_texture.as_mut() {
        Some(texture) => texture.visit_properties_mut(visitor),
        None => Ok(()),
    }
});

impl_extensible!(Material => Material, |this, visitor| {
    this.pbr_metallic_roughness.visit_properties_mut(visitor)?;
    if let Some(texture) = this.normal_texture.as_mut() {
        texture.visit_properties_mut(visitor)?;
    }
    if let Some(texture) = this.occlusion_texture.as_mut() {
        texture.visit_properties_mut(visitor)?;
    }
    match this.emissive_texture.as_mut() {
        Some(texture) => texture.visit_properties_mut(visitor),
        None => Ok(()),
    }
});

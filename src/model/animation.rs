//! Animation types
//!
//! Channels and samplers live in per-animation registries: a channel names
//! its sampler by the sampler's id within the same animation.

use crate::container::IndexedContainer;
use crate::property::{Property, impl_extensible};

/// Node property an animation channel drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum TargetPath {
    Translation,
    Rotation,
    Scale,
    Weights,
}

impl TargetPath {
    /// Name used in JSON
    pub fn as_str(self) -> &'static str {
        match self {
            TargetPath::Translation => "translation",
            TargetPath::Rotation => "rotation",
            TargetPath::Scale => "scale",
            TargetPath::Weights => "weights",
        }
    }

    /// Parse the JSON name
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "translation" => Some(TargetPath::Translation),
            "rotation" => Some(TargetPath::Rotation),
            "scale" => Some(TargetPath::Scale),
            "weights" => Some(TargetPath::Weights),
            _ => None,
        }
    }
}

/// Keyframe interpolation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub enum Interpolation {
    #[default]
    Linear,
    Step,
    CubicSpline,
}

impl Interpolation {
    /// Name used in JSON
    pub fn as_str(self) -> &'static str {
        match self {
            Interpolation::Linear => "LINEAR",
            Interpolation::Step => "STEP",
            Interpolation::CubicSpline => "CUBICSPLINE",
        }
    }

    /// Parse the JSON name
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "LINEAR" => Some(Interpolation::Linear),
            "STEP" => Some(Interpolation::Step),
            "CUBICSPLINE" => Some(Interpolation::CubicSpline),
            _ => None,
        }
    }
}

/// The node and property a channel animates
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationTarget {
    /// Id of the animated [`Node`](super::Node)
    pub node_id: String,
    /// Animated property
    pub path: TargetPath,
    /// Extensions and extras
    pub property: Property,
}

impl AnimationTarget {
    /// Target `path` on the node `node_id`
    pub fn new(node_id: impl Into<String>, path: TargetPath) -> Self {
        Self {
            node_id: node_id.into(),
            path,
            property: Property::default(),
        }
    }
}

/// Connects a sampler to an animation target
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationChannel {
    /// Id of the channel within its animation
    pub id: String,
    /// Id of an [`AnimationSampler`] of the same animation
    pub sampler_id: String,
    /// What the channel animates
    pub target: AnimationTarget,
    /// Extensions and extras
    pub property: Property,
}

impl AnimationChannel {
    /// Channel driving `target` from the sampler `sampler_id`
    pub fn new(id: impl Into<String>, sampler_id: impl Into<String>, target: AnimationTarget) -> Self {
        Self {
            id: id.into(),
            sampler_id: sampler_id.into(),
            target,
            property: Property::default(),
        }
    }
}

/// Keyframe input and output accessors plus an interpolation mode
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSampler {
    /// Id of the sampler within its animation
    pub id: String,
    /// Accessor id of keyframe times
    pub input_id: String,
    /// Accessor id of keyframe values
    pub output_id: String,
    /// Interpolation between keyframes
    pub interpolation: Interpolation,
    /// Extensions and extras
    pub property: Property,
}

impl AnimationSampler {
    /// Linear sampler over the given accessors
    pub fn new(
        id: impl Into<String>,
        input_id: impl Into<String>,
        output_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            input_id: input_id.into(),
            output_id: output_id.into(),
            interpolation: Interpolation::Linear,
            property: Property::default(),
        }
    }
}

/// A keyframe animation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Animation {
    /// Stable id
    pub id: String,
    /// Optional user-facing name
    pub name: Option<String>,
    /// Channels, in order
    pub channels: IndexedContainer<AnimationChannel>,
    /// Samplers, in order
    pub samplers: IndexedContainer<AnimationSampler>,
    /// Extensions and extras
    pub property: Property,
}

impl Animation {
    /// Create an empty animation with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

identified!(Animation, AnimationChannel, AnimationSampler);

impl_extensible!(AnimationTarget => AnimationTarget);
impl_extensible!(AnimationSampler => AnimationSampler);

impl_extensible!(AnimationChannel => AnimationChannel, |this, visitor| {
    this.target.visit_properties_mut(visitor)
});

impl_extensible!(Animation => Animation, |this, visitor| {
    for channel in this.channels.iter_mut() {
        channel.visit_properties_mut(visitor)?;
    }
    for sampler in this.samplers.iter_mut() {
        sampler.visit_properties_mut(visitor)?;
    }
    Ok(())
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::AppendIdPolicy;

    #[test]
    fn test_channel_sampler_registries() {
        let mut animation = Animation::new("walk");
        animation
            .samplers
            .append(
                AnimationSampler::new("", "0", "1"),
                AppendIdPolicy::GenerateOnEmpty,
            )
            .unwrap();
        animation
            .channels
            .append(
                AnimationChannel::new("", "0", AnimationTarget::new("5", TargetPath::Rotation)),
                AppendIdPolicy::GenerateOnEmpty,
            )
            .unwrap();

        let channel = animation.channels.get("0").unwrap();
        assert_eq!(animation.samplers.index_of(&channel.sampler_id).unwrap(), 0);
        assert_eq!(channel.target.path.as_str(), "rotation");
    }

    #[test]
    fn test_name_parsing() {
        assert_eq!(TargetPath::parse("weights"), Some(TargetPath::Weights));
        assert!(TargetPath::parse("matrix").is_none());
        assert_eq!(
            Interpolation::parse("CUBICSPLINE"),
            Some(Interpolation::CubicSpline)
        );
        assert_eq!(Interpolation::default().as_str(), "LINEAR");
    }
}

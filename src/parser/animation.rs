//! Reader for animations

use crate::container::AppendIdPolicy;
use crate::error::{Error, Result};
use crate::model::{
    Animation, AnimationChannel, AnimationSampler, AnimationTarget, Interpolation, TargetPath,
};

use super::core::{Object, each_object};

fn read_target(object: &Object<'_>) -> Result<AnimationTarget> {
    let path_name = object.required_string("path")?;
    let path = TargetPath::parse(&path_name).ok_or_else(|| {
        Error::invalid_at(
            &object.child_path("path"),
            &format!("unknown target path '{}'", path_name),
        )
    })?;

    Ok(AnimationTarget {
        node_id: object.required_index("node")?,
        path,
        property: object.property()?,
    })
}

fn read_sampler(id: String, object: &Object<'_>) -> Result<AnimationSampler> {
    let interpolation = match object.string("interpolation")? {
        None => Interpolation::Linear,
        Some(name) => Interpolation::parse(&name).ok_or_else(|| {
            Error::invalid_at(
                &object.child_path("interpolation"),
                &format!("unknown interpolation '{}'", name),
            )
        })?,
    };

    Ok(AnimationSampler {
        id,
        input_id: object.required_index("input")?,
        output_id: object.required_index("output")?,
        interpolation,
        property: object.property()?,
    })
}

pub(crate) fn read_animation(id: String, object: &Object<'_>) -> Result<Animation> {
    let mut animation = Animation::new(id);
    animation.name = object.string("name")?;

    for entry in each_object(object, "samplers")? {
        let (sampler_id, sampler) = entry?;
        animation
            .samplers
            .append(read_sampler(sampler_id, &sampler)?, AppendIdPolicy::ThrowOnEmpty)?;
    }

    for entry in each_object(object, "channels")? {
        let (channel_id, channel) = entry?;
        let target = read_target(&channel.required_object("target")?)?;
        animation.channels.append(
            AnimationChannel {
                id: channel_id,
                sampler_id: channel.required_index("sampler")?,
                target,
                property: channel.property()?,
            },
            AppendIdPolicy::ThrowOnEmpty,
        )?;
    }

    animation.property = object.property()?;
    Ok(animation)
}

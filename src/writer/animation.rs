//! Writer for animations

use serde_json::{Map, Value};

use crate::error::Result;
use crate::model::Animation;
use crate::property::PropertyContext;

use super::{DocumentWriter, index, insert_opt};

impl DocumentWriter<'_> {
    pub(super) fn write_animation(&self, animation: &Animation) -> Result<Value> {
        let document = self.document;
        let mut object = Map::new();
        insert_opt(&mut object, "name", animation.name.clone().map(Value::String));

        let mut channels = Vec::with_capacity(animation.channels.len());
        for channel in &animation.channels {
            let mut target = Map::new();
            target.insert("node".into(), index(&document.nodes, &channel.target.node_id)?);
            target.insert("path".into(), Value::from(channel.target.path.as_str()));
            self.write_property(
                &mut target,
                &channel.target.property,
                PropertyContext::AnimationTarget,
            )?;

            let mut member = Map::new();
            // Sampler indices are local to the animation
            member.insert("sampler".into(), index(&animation.samplers, &channel.sampler_id)?);
            member.insert("target".into(), Value::Object(target));
            self.write_property(&mut member, &channel.property, PropertyContext::AnimationChannel)?;
            channels.push(Value::Object(member));
        }
        object.insert("channels".into(), Value::Array(channels));

        let mut samplers = Vec::with_capacity(animation.samplers.len());
        for sampler in &animation.samplers {
            let mut member = Map::new();
            member.insert("input".into(), index(&document.accessors, &sampler.input_id)?);
            member.insert("output".into(), index(&document.accessors, &sampler.output_id)?);
            member.insert(
                "interpolation".into(),
                Value::from(sampler.interpolation.as_str()),
            );
            self.write_property(&mut member, &sampler.property, PropertyContext::AnimationSampler)?;
            samplers.push(Value::Object(member));
        }
        object.insert("samplers".into(), Value::Array(samplers));

        self.write_property(&mut object, &animation.property, PropertyContext::Animation)?;
        Ok(Value::Object(object))
    }
}

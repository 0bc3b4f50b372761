//! Writer for cameras

use serde_json::{Map, Value};

use crate::error::Result;
use crate::math;
use crate::model::{Camera, Projection};
use crate::property::PropertyContext;

use super::{DocumentWriter, insert_opt};

impl DocumentWriter<'_> {
    pub(super) fn write_camera(&self, camera: &Camera) -> Result<Value> {
        let mut object = Map::new();
        insert_opt(&mut object, "name", camera.name.clone().map(Value::String));

        let projection_type = camera.projection.projection_type();
        object.insert("type".into(), Value::from(projection_type.as_str()));

        let mut parameters = Map::new();
        match &camera.projection {
            Projection::Perspective(perspective) => {
                insert_opt(
                    &mut parameters,
                    "aspectRatio",
                    perspective.aspect_ratio.map(math::number),
                );
                parameters.insert("yfov".into(), math::number(perspective.yfov));
                insert_opt(&mut parameters, "zfar", perspective.zfar.map(math::number));
                parameters.insert("znear".into(), math::number(perspective.znear));
                self.write_property(
                    &mut parameters,
                    &perspective.property,
                    PropertyContext::Perspective,
                )?;
            }
            Projection::Orthographic(orthographic) => {
                parameters.insert("xmag".into(), math::number(orthographic.xmag));
                parameters.insert("ymag".into(), math::number(orthographic.ymag));
                parameters.insert("zfar".into(), math::number(orthographic.zfar));
                parameters.insert("znear".into(), math::number(orthographic.znear));
                self.write_property(
                    &mut parameters,
                    &orthographic.property,
                    PropertyContext::Orthographic,
                )?;
            }
        }
        object.insert(projection_type.as_str().into(), Value::Object(parameters));

        self.write_property(&mut object, &camera.property, PropertyContext::Camera)?;
        Ok(Value::Object(object))
    }
}

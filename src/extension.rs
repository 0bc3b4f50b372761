//! Extension payloads and the handler tables that encode and decode them
//!
//! glTF extensions are open-ended: any object may carry any number of
//! named JSON fragments under `extensions`. This module maps those fragments
//! to typed payloads through two data-driven tables:
//!
//! - [`ExtensionSerializer`] is keyed by `(PayloadKind, PropertyContext)` and
//!   turns a payload attached to a property into a named JSON fragment;
//! - [`ExtensionDeserializer`] is keyed by `(extension name,
//!   PropertyContext)` with [`PropertyContext::Any`] as a wildcard fallback,
//!   and turns a named fragment back into a payload.
//!
//! Fragments with no matching decoder are not an error: they stay in the
//! property's opaque channel and are written back unchanged.
//!
//! # Example
//!
//! ```
//! use libgltf::extension::{ExtensionDeserializer, ExtensionSerializer};
//! use libgltf::PropertyContext;
//!
//! let mut serializer = ExtensionSerializer::new();
//! serializer.register_custom("EXT_vendor_tag", PropertyContext::Node);
//!
//! let mut deserializer = ExtensionDeserializer::new();
//! deserializer.register_custom("EXT_vendor_tag", PropertyContext::Any);
//!
//! assert!(serializer.has_handler(
//!     &libgltf::PayloadKind::Custom("EXT_vendor_tag".into()),
//!     PropertyContext::Node
//! ));
//! assert!(deserializer.has_handler("EXT_vendor_tag", PropertyContext::Mesh));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::model::{Document, TextureInfo};
use crate::property::{Property, PropertyContext};

#[cfg(feature = "khr")]
use crate::extensions::{DracoMeshCompression, PbrSpecularGlossiness, TextureTransform, Unlit};

/// Identifies a kind of typed extension payload
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PayloadKind {
    /// `KHR_materials_pbrSpecularGlossiness`
    #[cfg(feature = "khr")]
    PbrSpecularGlossiness,
    /// `KHR_materials_unlit`
    #[cfg(feature = "khr")]
    Unlit,
    /// `KHR_draco_mesh_compression`
    #[cfg(feature = "khr")]
    DracoMeshCompression,
    /// `KHR_texture_transform`
    #[cfg(feature = "khr")]
    TextureTransform,
    /// A third-party payload identified by its tag
    Custom(String),
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "khr")]
            PayloadKind::PbrSpecularGlossiness => {
                f.write_str(crate::extensions::pbr_specular_glossiness::EXTENSION_NAME)
            }
            #[cfg(feature = "khr")]
            PayloadKind::Unlit => f.write_str(crate::extensions::unlit::EXTENSION_NAME),
            #[cfg(feature = "khr")]
            PayloadKind::DracoMeshCompression => {
                f.write_str(crate::extensions::draco_mesh_compression::EXTENSION_NAME)
            }
            #[cfg(feature = "khr")]
            PayloadKind::TextureTransform => {
                f.write_str(crate::extensions::texture_transform::EXTENSION_NAME)
            }
            PayloadKind::Custom(tag) => f.write_str(tag),
        }
    }
}

/// A payload that no built-in type describes, kept as JSON
#[derive(Debug, Clone, PartialEq)]
pub struct CustomExtension {
    /// Tag used as the [`PayloadKind::Custom`] key
    pub kind: String,
    /// Payload content
    pub value: Value,
}

impl CustomExtension {
    /// Create a custom payload
    pub fn new(kind: impl Into<String>, value: Value) -> Self {
        Self {
            kind: kind.into(),
            value,
        }
    }
}

/// A decoded extension payload
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum ExtensionPayload {
    #[cfg(feature = "khr")]
    PbrSpecularGlossiness(PbrSpecularGlossiness),
    #[cfg(feature = "khr")]
    Unlit(Unlit),
    #[cfg(feature = "khr")]
    DracoMeshCompression(DracoMeshCompression),
    #[cfg(feature = "khr")]
    TextureTransform(TextureTransform),
    Custom(CustomExtension),
}

impl ExtensionPayload {
    /// The kind this payload is stored under
    pub fn kind(&self) -> PayloadKind {
        match self {
            #[cfg(feature = "khr")]
            ExtensionPayload::PbrSpecularGlossiness(_) => PayloadKind::PbrSpecularGlossiness,
            #[cfg(feature = "khr")]
            ExtensionPayload::Unlit(_) => PayloadKind::Unlit,
            #[cfg(feature = "khr")]
            ExtensionPayload::DracoMeshCompression(_) => PayloadKind::DracoMeshCompression,
            #[cfg(feature = "khr")]
            ExtensionPayload::TextureTransform(_) => PayloadKind::TextureTransform,
            ExtensionPayload::Custom(custom) => PayloadKind::Custom(custom.kind.clone()),
        }
    }
}

/// A statically known payload type
///
/// Implemented by every built-in extension struct so it can be used with
/// [`Property::extension`] and friends.
pub trait TypedExtension: Sized {
    /// Kind the payload is stored under
    fn kind() -> PayloadKind;

    /// Wrap the value in the payload union
    fn into_payload(self) -> ExtensionPayload;

    /// Borrow the value out of the union, if it is of this type
    fn from_payload(payload: &ExtensionPayload) -> Option<&Self>;

    /// Mutably borrow the value out of the union, if it is of this type
    fn from_payload_mut(payload: &mut ExtensionPayload) -> Option<&mut Self>;
}

macro_rules! typed_extension {
    ($ty:ident) => {
        impl $crate::extension::TypedExtension for $ty {
            fn kind() -> $crate::extension::PayloadKind {
                $crate::extension::PayloadKind::$ty
            }

            fn into_payload(self) -> $crate::extension::ExtensionPayload {
                $crate::extension::ExtensionPayload::$ty(self)
            }

            fn from_payload(payload: &$crate::extension::ExtensionPayload) -> Option<&Self> {
                match payload {
                    $crate::extension::ExtensionPayload::$ty(value) => Some(value),
                    #[allow(unreachable_patterns)]
                    _ => None,
                }
            }

            fn from_payload_mut(
                payload: &mut $crate::extension::ExtensionPayload,
            ) -> Option<&mut Self> {
                match payload {
                    $crate::extension::ExtensionPayload::$ty(value) => Some(value),
                    #[allow(unreachable_patterns)]
                    _ => None,
                }
            }
        }
    };
}

#[cfg(feature = "khr")]
pub(crate) use typed_extension;

/// State available to an encode function
pub struct EncodeContext<'a> {
    /// Document being written; used to turn ids into indices
    pub document: &'a Document,
    /// Table used for extensions nested inside the payload
    pub serializer: &'a ExtensionSerializer,
}

impl EncodeContext<'_> {
    /// Emit `extensions` and `extras` of a property nested in a payload
    pub fn write_property(
        &self,
        object: &mut Map<String, Value>,
        property: &Property,
        context: PropertyContext,
    ) -> Result<()> {
        crate::writer::write_property(object, property, context, self.document, self.serializer)
    }

    /// Encode a texture reference nested in a payload
    pub fn write_texture_info(&self, info: &TextureInfo) -> Result<Value> {
        crate::writer::write_texture_info(info, self.document, self.serializer)
    }
}

/// State available to a decode function
pub struct DecodeContext<'a> {
    /// Table used for extensions nested inside the payload
    pub deserializer: &'a ExtensionDeserializer,
    /// JSON path of the fragment being decoded, for error messages
    pub path: &'a str,
}

impl DecodeContext<'_> {
    /// Read a property nested in a payload and resolve its extensions
    pub fn read_property(&self, value: &Value, context: PropertyContext) -> Result<Property> {
        let mut property = crate::parser::read_property(value, self.path)?;
        self.deserializer.resolve(context, &mut property)?;
        Ok(property)
    }

    /// Read a texture reference nested in a payload
    pub fn read_texture_info(&self, value: &Value, path: &str) -> Result<TextureInfo> {
        let mut info = crate::parser::read_texture_info(value, path)?;
        self.deserializer
            .resolve(PropertyContext::TextureInfo, &mut info.property)?;
        Ok(info)
    }
}

/// Encode function: payload to JSON fragment
pub type EncodeFn = Arc<dyn Fn(&ExtensionPayload, &EncodeContext<'_>) -> Result<Value> + Send + Sync>;

/// Decode function: JSON fragment to payload
pub type DecodeFn = Arc<dyn Fn(&Value, &DecodeContext<'_>) -> Result<ExtensionPayload> + Send + Sync>;

#[derive(Clone)]
struct EncodeEntry {
    name: String,
    encode: EncodeFn,
}

/// Table of payload encoders keyed by payload kind and owner context
///
/// Lookups are exact: a kind registered for [`PropertyContext::Material`]
/// cannot be written on a node.
#[derive(Clone, Default)]
pub struct ExtensionSerializer {
    handlers: HashMap<(PayloadKind, PropertyContext), EncodeEntry>,
}

impl ExtensionSerializer {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an encoder for `kind` attached to properties of `context`,
    /// written under the extension name `name`
    ///
    /// Registering the same pair again replaces the previous encoder.
    pub fn register<F>(
        &mut self,
        kind: PayloadKind,
        name: impl Into<String>,
        context: PropertyContext,
        encode: F,
    ) -> &mut Self
    where
        F: Fn(&ExtensionPayload, &EncodeContext<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        self.handlers.insert(
            (kind, context),
            EncodeEntry {
                name: name.into(),
                encode: Arc::new(encode),
            },
        );
        self
    }

    /// Register a pass-through encoder for [`CustomExtension`] payloads
    /// tagged `name`
    pub fn register_custom(&mut self, name: &str, context: PropertyContext) -> &mut Self {
        let tag = name.to_string();
        self.register(
            PayloadKind::Custom(tag.clone()),
            name,
            context,
            move |payload, _| match payload {
                ExtensionPayload::Custom(custom) => Ok(custom.value.clone()),
                #[allow(unreachable_patterns)]
                _ => Err(Error::ExtensionNotFound(tag.clone())),
            },
        )
    }

    /// Whether an encoder is registered for exactly this pair
    pub fn has_handler(&self, kind: &PayloadKind, context: PropertyContext) -> bool {
        self.handlers.contains_key(&(kind.clone(), context))
    }

    /// Number of registered pairs
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Encode a payload attached to a property of `context`
    ///
    /// Returns the extension name and its JSON fragment.
    ///
    /// # Errors
    ///
    /// [`Error::NoHandler`] if no encoder is registered for the pair, or
    /// whatever the encoder itself reports.
    pub fn serialize(
        &self,
        payload: &ExtensionPayload,
        context: PropertyContext,
        encode_context: &EncodeContext<'_>,
    ) -> Result<(String, Value)> {
        let kind = payload.kind();
        let entry = self
            .handlers
            .get(&(kind.clone(), context))
            .ok_or_else(|| Error::NoHandler {
                extension: kind.to_string(),
                context,
            })?;
        let value = (entry.encode)(payload, encode_context)?;
        Ok((entry.name.clone(), value))
    }
}

impl fmt::Debug for ExtensionSerializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionSerializer")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[derive(Clone)]
struct DecodeEntry {
    decode: DecodeFn,
}

/// Table of payload decoders keyed by extension name and owner context
///
/// A decoder registered for [`PropertyContext::Any`] applies wherever no
/// context-specific decoder exists for the same name.
#[derive(Clone, Default)]
pub struct ExtensionDeserializer {
    handlers: HashMap<(String, PropertyContext), DecodeEntry>,
}

impl ExtensionDeserializer {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a decoder for the extension `name` found on properties of
    /// `context`
    pub fn register<F>(&mut self, name: impl Into<String>, context: PropertyContext, decode: F) -> &mut Self
    where
        F: Fn(&Value, &DecodeContext<'_>) -> Result<ExtensionPayload> + Send + Sync + 'static,
    {
        self.handlers.insert(
            (name.into(), context),
            DecodeEntry {
                decode: Arc::new(decode),
            },
        );
        self
    }

    /// Register a pass-through decoder producing [`CustomExtension`]
    /// payloads tagged `name`
    pub fn register_custom(&mut self, name: &str, context: PropertyContext) -> &mut Self {
        let tag = name.to_string();
        self.register(name, context, move |value, _| {
            Ok(ExtensionPayload::Custom(CustomExtension::new(
                tag.clone(),
                value.clone(),
            )))
        })
    }

    fn lookup(&self, name: &str, context: PropertyContext) -> Option<&DecodeEntry> {
        self.handlers
            .get(&(name.to_string(), context))
            .or_else(|| self.handlers.get(&(name.to_string(), PropertyContext::Any)))
    }

    /// Whether a decoder applies to `name` in `context`, exactly or through
    /// the wildcard
    pub fn has_handler(&self, name: &str, context: PropertyContext) -> bool {
        self.lookup(name, context).is_some()
    }

    /// Number of registered pairs
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Decode a fragment found under `name` on a property of `context`
    ///
    /// Returns `Ok(None)` when no decoder applies.
    pub fn deserialize(
        &self,
        name: &str,
        value: &Value,
        context: PropertyContext,
    ) -> Result<Option<ExtensionPayload>> {
        let Some(entry) = self.lookup(name, context) else {
            return Ok(None);
        };
        let path = format!("extensions/{}", name);
        let decode_context = DecodeContext {
            deserializer: self,
            path: &path,
        };
        (entry.decode)(value, &decode_context).map(Some)
    }

    /// Move every opaque extension of `property` that has a decoder into the
    /// typed channel
    pub fn resolve(&self, context: PropertyContext, property: &mut Property) -> Result<()> {
        let opaque = std::mem::take(&mut property.extensions);
        for (name, value) in opaque {
            match self.deserialize(&name, &value, context)? {
                Some(payload) => {
                    log::trace!("Resolved extension {} on {}", name, context);
                    property.set_payload(payload);
                }
                None => {
                    property.extensions.insert(name, value);
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ExtensionDeserializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionDeserializer")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wildcard_and_exact_lookup() {
        let mut deserializer = ExtensionDeserializer::new();
        deserializer.register("EXT_a", PropertyContext::Any, |value, _| {
            Ok(ExtensionPayload::Custom(CustomExtension::new("any", value.clone())))
        });
        deserializer.register("EXT_a", PropertyContext::Node, |value, _| {
            Ok(ExtensionPayload::Custom(CustomExtension::new("node", value.clone())))
        });

        let on_node = deserializer
            .deserialize("EXT_a", &json!({}), PropertyContext::Node)
            .unwrap()
            .unwrap();
        assert_eq!(on_node.kind(), PayloadKind::Custom("node".into()));

        let on_mesh = deserializer
            .deserialize("EXT_a", &json!({}), PropertyContext::Mesh)
            .unwrap()
            .unwrap();
        assert_eq!(on_mesh.kind(), PayloadKind::Custom("any".into()));

        assert!(
            deserializer
                .deserialize("EXT_b", &json!({}), PropertyContext::Mesh)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_resolve_keeps_unknown_opaque() {
        let mut deserializer = ExtensionDeserializer::new();
        deserializer.register_custom("EXT_known", PropertyContext::Any);

        let mut property = Property::new();
        property.extensions.insert("EXT_known".into(), json!({"a": 1}));
        property.extensions.insert("EXT_unknown".into(), json!({"b": 2}));

        deserializer.resolve(PropertyContext::Node, &mut property).unwrap();

        assert!(property.has_unregistered_extension("EXT_unknown"));
        assert!(!property.has_unregistered_extension("EXT_known"));
        assert_eq!(
            property.custom_extension("EXT_known").unwrap().value,
            json!({"a": 1})
        );
    }

    #[test]
    fn test_serializer_is_exact_only() {
        let mut serializer = ExtensionSerializer::new();
        serializer.register_custom("EXT_a", PropertyContext::Material);

        let kind = PayloadKind::Custom("EXT_a".into());
        assert!(serializer.has_handler(&kind, PropertyContext::Material));
        assert!(!serializer.has_handler(&kind, PropertyContext::Node));
        assert!(!serializer.has_handler(&kind, PropertyContext::Any));

        let document = Document::new();
        let context = EncodeContext {
            document: &document,
            serializer: &serializer,
        };
        let payload = ExtensionPayload::Custom(CustomExtension::new("EXT_a", json!(7)));

        let (name, value) = serializer
            .serialize(&payload, PropertyContext::Material, &context)
            .unwrap();
        assert_eq!(name, "EXT_a");
        assert_eq!(value, json!(7));

        let err = serializer
            .serialize(&payload, PropertyContext::Node, &context)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::NoHandler { ref extension, context: PropertyContext::Node } if extension == "EXT_a"
        ));
    }
}

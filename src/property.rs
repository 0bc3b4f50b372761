//! Extension and extras storage shared by every glTF property
//!
//! Each glTF object may carry an `extensions` object and an `extras` value.
//! [`Property`] stores them in two channels:
//!
//! - the **opaque** channel keeps extension JSON verbatim, keyed by extension
//!   name, for extensions no handler understands;
//! - the **typed** channel holds at most one decoded [`ExtensionPayload`] per
//!   [`PayloadKind`].
//!
//! The [`Extensible`] trait gives every entity the same extension API and
//! lets the decoder walk all nested properties of an entity.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::extension::{CustomExtension, ExtensionPayload, PayloadKind, TypedExtension};

/// The kind of glTF object that owns a [`Property`]
///
/// Extension handlers are registered per context, so the same extension
/// payload kind can be encoded differently (or not at all) depending on
/// where it appears. [`PropertyContext::Any`] is the wildcard used when
/// registering decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum PropertyContext {
    Any,
    Document,
    Asset,
    Accessor,
    AccessorSparse,
    Animation,
    AnimationChannel,
    AnimationTarget,
    AnimationSampler,
    Buffer,
    BufferView,
    Camera,
    Perspective,
    Orthographic,
    Image,
    Material,
    PbrMetallicRoughness,
    TextureInfo,
    NormalTextureInfo,
    OcclusionTextureInfo,
    Mesh,
    MeshPrimitive,
    Node,
    Sampler,
    Scene,
    Skin,
    Texture,
    /// Properties nested inside extension payloads
    ExtensionObject,
}

impl fmt::Display for PropertyContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Extension and extras storage for one glTF object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Property {
    /// Extensions no handler claimed, kept verbatim by name
    pub extensions: BTreeMap<String, Value>,

    /// Application-specific data, kept verbatim
    pub extras: Option<Value>,

    registered: BTreeMap<PayloadKind, ExtensionPayload>,
}

impl Property {
    /// Create an empty property
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no extension (of either channel) and no extras are present
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty() && self.registered.is_empty() && self.extras.is_none()
    }

    /// Attach a typed extension, replacing any payload of the same kind
    pub fn set_extension<T: TypedExtension>(&mut self, extension: T) {
        self.set_payload(extension.into_payload());
    }

    /// Typed extension of kind `T`
    ///
    /// # Errors
    ///
    /// [`Error::ExtensionNotFound`] if no payload of that kind is attached.
    pub fn extension<T: TypedExtension>(&self) -> Result<&T> {
        self.registered
            .get(&T::kind())
            .and_then(T::from_payload)
            .ok_or_else(|| Error::ExtensionNotFound(T::kind().to_string()))
    }

    /// Mutable access to the typed extension of kind `T`
    pub fn extension_mut<T: TypedExtension>(&mut self) -> Result<&mut T> {
        self.registered
            .get_mut(&T::kind())
            .and_then(T::from_payload_mut)
            .ok_or_else(|| Error::ExtensionNotFound(T::kind().to_string()))
    }

    /// Whether a typed extension of kind `T` is attached
    pub fn has_extension<T: TypedExtension>(&self) -> bool {
        self.registered.contains_key(&T::kind())
    }

    /// Detach the typed extension of kind `T`; returns whether one was present
    pub fn remove_extension<T: TypedExtension>(&mut self) -> bool {
        self.registered.remove(&T::kind()).is_some()
    }

    /// Attach an already-built payload, replacing any payload of the same kind
    pub fn set_payload(&mut self, payload: ExtensionPayload) {
        self.registered.insert(payload.kind(), payload);
    }

    /// Typed payload of the given kind
    pub fn payload(&self, kind: &PayloadKind) -> Option<&ExtensionPayload> {
        self.registered.get(kind)
    }

    /// Detach the payload of the given kind
    pub fn remove_payload(&mut self, kind: &PayloadKind) -> Option<ExtensionPayload> {
        self.registered.remove(kind)
    }

    /// All typed payloads, ordered by kind
    pub fn payloads(&self) -> impl Iterator<Item = &ExtensionPayload> {
        self.registered.values()
    }

    /// Custom payload registered under `kind`
    pub fn custom_extension(&self, kind: &str) -> Result<&CustomExtension> {
        match self.registered.get(&PayloadKind::Custom(kind.to_string())) {
            Some(ExtensionPayload::Custom(custom)) => Ok(custom),
            _ => Err(Error::ExtensionNotFound(kind.to_string())),
        }
    }

    /// Whether the opaque channel holds an extension with this name
    pub fn has_unregistered_extension(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }
}

/// Callback used to walk nested properties
pub type PropertyVisitor<'a> = dyn FnMut(PropertyContext, &mut Property) -> Result<()> + 'a;

/// A glTF object with a [`Property`]
///
/// The provided methods forward to the owned [`Property`], so entities
/// expose the extension API directly:
///
/// ```
/// use libgltf::{Extensible, Node};
///
/// let mut node = Node::new("root");
/// node.property_mut().extras = Some(serde_json::json!({"tag": 1}));
/// assert!(!node.property().is_empty());
/// ```
pub trait Extensible {
    /// Context used for extension handler lookup
    const CONTEXT: PropertyContext;

    /// The owned property
    fn property(&self) -> &Property;

    /// The owned property, mutably
    fn property_mut(&mut self) -> &mut Property;

    /// Visit this object's property and then every nested glTF property it
    /// owns, depth first
    ///
    /// Properties stored inside typed extension payloads are not visited.
    fn visit_properties_mut(&mut self, visitor: &mut PropertyVisitor<'_>) -> Result<()> {
        visitor(Self::CONTEXT, self.property_mut())
    }

    /// See [`Property::set_extension`]
    fn set_extension<T: TypedExtension>(&mut self, extension: T) {
        self.property_mut().set_extension(extension);
    }

    /// See [`Property::extension`]
    fn extension<T: TypedExtension>(&self) -> Result<&T> {
        self.property().extension::<T>()
    }

    /// See [`Property::extension_mut`]
    fn extension_mut<T: TypedExtension>(&mut self) -> Result<&mut T> {
        self.property_mut().extension_mut::<T>()
    }

    /// See [`Property::has_extension`]
    fn has_extension<T: TypedExtension>(&self) -> bool {
        self.property().has_extension::<T>()
    }

    /// See [`Property::remove_extension`]
    fn remove_extension<T: TypedExtension>(&mut self) -> bool {
        self.property_mut().remove_extension::<T>()
    }
}

/// Implement [`Extensible`] for a type with a `property` field
///
/// The optional closure-like tail lists nested properties to visit after the
/// type's own.
macro_rules! impl_extensible {
    ($ty:ty => $ctx:ident) => {
        impl $crate::property::Extensible for $ty {
            const CONTEXT: $crate::property::PropertyContext =
                $crate::property::PropertyContext::$ctx;

            fn property(&self) -> &$crate::property::Property {
                &self.property
            }

            fn property_mut(&mut self) -> &mut $crate::property::Property {
                &mut self.property
            }
        }
    };
    ($ty:ty => $ctx:ident, |$this:ident, $visitor:ident| $children:block) => {
        impl $crate::property::Extensible for $ty {
            const CONTEXT: $crate::property::PropertyContext =
                $crate::property::PropertyContext::$ctx;

            fn property(&self) -> &$crate::property::Property {
                &self.property
            }

            fn property_mut(&mut self) -> &mut $crate::property::Property {
                &mut self.property
            }

            fn visit_properties_mut(
                &mut self,
                $visitor: &mut $crate::property::PropertyVisitor<'_>,
            ) -> $crate::error::Result<()> {
                #[allow(unused_imports)]
                use $crate::property::Extensible as _;

                $visitor(Self::CONTEXT, &mut self.property)?;
                let $this = self;
                $children
            }
        }
    };
}

pub(crate) use impl_extensible;

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(kind: &str, value: Value) -> ExtensionPayload {
        ExtensionPayload::Custom(CustomExtension {
            kind: kind.to_string(),
            value,
        })
    }

    #[test]
    fn test_empty_property() {
        let property = Property::new();
        assert!(property.is_empty());
        assert_eq!(property.payloads().count(), 0);
    }

    #[test]
    fn test_opaque_channel() {
        let mut property = Property::new();
        property
            .extensions
            .insert("EXT_unknown".to_string(), serde_json::json!({"a": 1}));
        assert!(property.has_unregistered_extension("EXT_unknown"));
        assert!(!property.has_unregistered_extension("EXT_other"));
        assert!(!property.is_empty());
    }

    #[test]
    fn test_payload_replaced_by_kind() {
        let mut property = Property::new();
        property.set_payload(custom("EXT_a", serde_json::json!(1)));
        property.set_payload(custom("EXT_a", serde_json::json!(2)));
        property.set_payload(custom("EXT_b", serde_json::json!(3)));

        assert_eq!(property.payloads().count(), 2);
        assert_eq!(
            property.custom_extension("EXT_a").unwrap().value,
            serde_json::json!(2)
        );
        assert!(matches!(
            property.custom_extension("EXT_c"),
            Err(Error::ExtensionNotFound(_))
        ));

        let removed = property.remove_payload(&PayloadKind::Custom("EXT_a".to_string()));
        assert!(removed.is_some());
        assert_eq!(property.payloads().count(), 1);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut property = Property::new();
        property.set_payload(custom("EXT_a", serde_json::json!({"x": [1, 2]})));
        property.extras = Some(serde_json::json!("note"));

        let mut copy = property.clone();
        assert_eq!(copy, property);

        copy.set_payload(custom("EXT_a", serde_json::json!(null)));
        assert_ne!(copy, property);
        assert_eq!(
            property.custom_extension("EXT_a").unwrap().value,
            serde_json::json!({"x": [1, 2]})
        );
    }

    #[test]
    fn test_context_display() {
        assert_eq!(PropertyContext::MeshPrimitive.to_string(), "MeshPrimitive");
    }
}

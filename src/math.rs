//! Small value types used by glTF properties
//!
//! These types only need equality and JSON conversion; no arithmetic is
//! provided. On the wire every one of them is a flat array of numbers
//! (`[x, y, z]`, column-major `[m00, m10, ...]`, `[r, g, b, a]`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Encode an `f32` as the shortest JSON number that reads back to the same value
pub(crate) fn number(value: f32) -> Value {
    // `Display` for f32 yields the shortest round-trip text ("0.1", not
    // "0.10000000149011612"), so re-parsing it as f64 keeps the output tidy.
    let shortest = format!("{}", value).parse::<f64>().unwrap_or(value as f64);
    serde_json::Number::from_f64(shortest)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Encode a slice of floats as a JSON array
pub(crate) fn number_array(values: &[f32]) -> Value {
    Value::Array(values.iter().copied().map(number).collect())
}

macro_rules! array_value {
    ($(#[$meta:meta])* $name:ident [$len:literal] { $($field:ident),+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name {
            $(
                #[allow(missing_docs)]
                pub $field: f32,
            )+
        }

        impl $name {
            /// Create a value from its components
            pub const fn new($($field: f32),+) -> Self {
                Self { $($field),+ }
            }

            /// Components in wire order
            pub fn to_array(self) -> [f32; $len] {
                [$(self.$field),+]
            }

            /// Build from a slice; `None` unless the slice has exactly the
            /// right number of components
            pub fn from_slice(values: &[f32]) -> Option<Self> {
                let array: [f32; $len] = values.try_into().ok()?;
                Some(array.into())
            }

            pub(crate) fn to_json(self) -> Value {
                number_array(&self.to_array())
            }
        }

        impl From<[f32; $len]> for $name {
            fn from(array: [f32; $len]) -> Self {
                let [$($field),+] = array;
                Self { $($field),+ }
            }
        }

        impl From<$name> for [f32; $len] {
            fn from(value: $name) -> Self {
                value.to_array()
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                self.to_array().serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                <[f32; $len]>::deserialize(deserializer).map(Self::from)
            }
        }
    };
}

array_value! {
    /// Two-component vector, used for texture coordinates
    Vector2[2] { x, y }
}

array_value! {
    /// Three-component vector
    Vector3[3] { x, y, z }
}

array_value! {
    /// Rotation quaternion, stored `x, y, z, w`
    Quaternion[4] { x, y, z, w }
}

array_value! {
    /// Linear RGB color
    Color3[3] { r, g, b }
}

array_value! {
    /// Linear RGBA color
    Color4[4] { r, g, b, a }
}

impl Vector2 {
    /// `[0, 0]`
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// `[1, 1]`
    pub const ONE: Self = Self::new(1.0, 1.0);
}

impl Vector3 {
    /// `[0, 0, 0]`
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// `[1, 1, 1]`
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
}

impl Quaternion {
    /// No rotation
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);
}

impl Color3 {
    /// Black
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// White
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
}

impl Color4 {
    /// Opaque white
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
}

/// 4x4 matrix in column-major order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 16]", into = "[f32; 16]")]
pub struct Matrix4 {
    /// The sixteen components, column-major
    pub values: [f32; 16],
}

impl Matrix4 {
    /// The identity matrix
    pub const IDENTITY: Self = Self {
        values: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Build from a slice of exactly sixteen components
    pub fn from_slice(values: &[f32]) -> Option<Self> {
        let values: [f32; 16] = values.try_into().ok()?;
        Some(Self { values })
    }

    pub(crate) fn to_json(self) -> Value {
        number_array(&self.values)
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[f32; 16]> for Matrix4 {
    fn from(values: [f32; 16]) -> Self {
        Self { values }
    }
}

impl From<Matrix4> for [f32; 16] {
    fn from(matrix: Matrix4) -> Self {
        matrix.values
    }
}

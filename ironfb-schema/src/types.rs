//! Type descriptors, namespaces and enum definitions.
//!
//! This module contains the data structures describing field types, the
//! namespaces entities live in, and enums (including union tag enums).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ir::{EnumId, StructId};

/// Scalar kinds of the schema language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarType {
    /// Union tag (1 byte, unsigned).
    UType,
    /// Boolean (1 byte).
    Bool,
    /// Signed 8-bit integer.
    Int8,
    /// Unsigned 8-bit integer.
    Uint8,
    /// Signed 16-bit integer.
    Int16,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Signed 32-bit integer.
    Int32,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 64-bit integer.
    Uint64,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
}

impl ScalarType {
    /// Returns the size of the scalar in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        match self {
            Self::UType | Self::Bool | Self::Int8 | Self::Uint8 => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float => 4,
            Self::Int64 | Self::Uint64 | Self::Double => 8,
        }
    }

    /// Returns the Rust type name for this scalar.
    #[must_use]
    pub const fn rust_type(&self) -> &'static str {
        match self {
            Self::UType | Self::Uint8 => "u8",
            Self::Bool => "bool",
            Self::Int8 => "i8",
            Self::Int16 => "i16",
            Self::Uint16 => "u16",
            Self::Int32 => "i32",
            Self::Uint32 => "u32",
            Self::Int64 => "i64",
            Self::Uint64 => "u64",
            Self::Float => "f32",
            Self::Double => "f64",
        }
    }

    /// Returns the schema language name.
    #[must_use]
    pub const fn fbs_name(&self) -> &'static str {
        match self {
            Self::UType => "utype",
            Self::Bool => "bool",
            Self::Int8 => "byte",
            Self::Uint8 => "ubyte",
            Self::Int16 => "short",
            Self::Uint16 => "ushort",
            Self::Int32 => "int",
            Self::Uint32 => "uint",
            Self::Int64 => "long",
            Self::Uint64 => "ulong",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// Parses a scalar from its schema name or sized alias (`int32`, `float64`).
    #[must_use]
    pub fn from_fbs_name(name: &str) -> Option<Self> {
        match name {
            "utype" => Some(Self::UType),
            "bool" => Some(Self::Bool),
            "byte" | "int8" => Some(Self::Int8),
            "ubyte" | "uint8" => Some(Self::Uint8),
            "short" | "int16" => Some(Self::Int16),
            "ushort" | "uint16" => Some(Self::Uint16),
            "int" | "int32" => Some(Self::Int32),
            "uint" | "uint32" => Some(Self::Uint32),
            "long" | "int64" => Some(Self::Int64),
            "ulong" | "uint64" => Some(Self::Uint64),
            "float" | "float32" => Some(Self::Float),
            "double" | "float64" => Some(Self::Double),
            _ => None,
        }
    }

    /// Returns true if this is a signed integer type.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    /// Returns true if this is an unsigned integer type.
    #[must_use]
    pub const fn is_unsigned(&self) -> bool {
        matches!(
            self,
            Self::UType | Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64
        )
    }

    /// Returns true if this is a floating point type.
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }
}

/// Type of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    /// Scalar value.
    Scalar(ScalarType),
    /// UTF-8 string.
    String,
    /// Reference to a struct or table.
    Struct(StructId),
    /// Vector of the element type.
    Vector(Box<Type>),
    /// Union payload; the id names the union enum.
    Union(EnumId),
}

impl Type {
    /// Creates a vector type.
    #[must_use]
    pub fn vector_of(element: Type) -> Self {
        Self::Vector(Box::new(element))
    }

    /// Returns true for scalar types.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Returns the element type of a vector.
    #[must_use]
    pub fn element(&self) -> Option<&Type> {
        match self {
            Self::Vector(element) => Some(element),
            _ => None,
        }
    }
}

impl From<ScalarType> for Type {
    fn from(scalar: ScalarType) -> Self {
        Self::Scalar(scalar)
    }
}

/// Hierarchical scope of an entity, outermost component first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace {
    /// Path components.
    pub components: Vec<String>,
}

impl Namespace {
    /// Creates a namespace from its components.
    #[must_use]
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a dotted namespace such as `MyGame.Example`.
    #[must_use]
    pub fn from_dotted(dotted: &str) -> Self {
        Self::new(dotted.split('.').filter(|c| !c.is_empty()))
    }

    /// Returns true for the root namespace.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.components.join("."))
    }
}

/// Enum or union definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDef {
    /// Enum name.
    pub name: String,
    /// Enclosing namespace.
    #[serde(default)]
    pub namespace: Namespace,
    /// Underlying scalar type.
    pub underlying: ScalarType,
    /// Values in declaration order.
    pub values: Vec<EnumVal>,
    /// True when this enum is the tag type of a union.
    #[serde(default)]
    pub is_union: bool,
    /// Already emitted by an earlier run.
    #[serde(default)]
    pub generated: bool,
    /// Documentation lines.
    #[serde(default)]
    pub doc_comment: Vec<String>,
}

impl EnumDef {
    /// Creates a new enum definition.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: Namespace, underlying: ScalarType) -> Self {
        Self {
            name: name.into(),
            namespace,
            underlying,
            values: Vec::new(),
            is_union: false,
            generated: false,
            doc_comment: Vec::new(),
        }
    }

    /// Creates a union tag enum with its implicit `NONE = 0` value.
    #[must_use]
    pub fn union(name: impl Into<String>, namespace: Namespace) -> Self {
        let mut def = Self::new(name, namespace, ScalarType::UType);
        def.is_union = true;
        def.add_value(EnumVal::new("NONE", 0));
        def
    }

    /// Adds a value to the enum.
    pub fn add_value(&mut self, value: EnumVal) {
        self.values.push(value);
    }

    /// Looks up a value by name.
    #[must_use]
    pub fn get_value(&self, name: &str) -> Option<&EnumVal> {
        self.values.iter().find(|v| v.name == name)
    }
}

/// Enum value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumVal {
    /// Value name.
    pub name: String,
    /// Raw integer value.
    pub value: i64,
    /// Documentation lines.
    #[serde(default)]
    pub doc_comment: Vec<String>,
}

impl EnumVal {
    /// Creates a new enum value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            doc_comment: Vec::new(),
        }
    }
}

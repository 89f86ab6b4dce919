//! The resolved schema arena.
//!
//! [`Schema`] owns every enum and struct definition. Definitions refer to
//! each other through [`StructId`] and [`EnumId`], which are indices into the
//! arena, so self-referencing tables need no shared ownership.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};
use crate::structs::StructDef;
use crate::types::{EnumDef, Type};

/// Size of an offset to a relocatable object in bytes.
const SIZE_UOFFSET: usize = 4;

/// Index of a struct or table in [`Schema::structs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructId(pub usize);

/// Index of an enum in [`Schema::enums`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnumId(pub usize);

/// Fully resolved schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Enum and union definitions.
    #[serde(default)]
    pub enums: Vec<EnumDef>,
    /// Struct and table definitions.
    #[serde(default)]
    pub structs: Vec<StructDef>,
    /// Designated root table.
    #[serde(default)]
    pub root_type: Option<StructId>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a schema from its JSON form.
    ///
    /// # Errors
    /// Returns an error if the document is malformed or references a struct
    /// or enum that it does not define.
    pub fn from_json(json: &str) -> Result<Self> {
        let schema: Self = serde_json::from_str(json)?;
        schema.check_references()?;
        Ok(schema)
    }

    /// Serializes the schema to pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Adds an enum and returns its id.
    pub fn add_enum(&mut self, def: EnumDef) -> EnumId {
        self.enums.push(def);
        EnumId(self.enums.len() - 1)
    }

    /// Adds a struct or table and returns its id.
    pub fn add_struct(&mut self, def: StructDef) -> StructId {
        self.structs.push(def);
        StructId(self.structs.len() - 1)
    }

    /// Designates the root table.
    pub fn set_root_type(&mut self, id: StructId) {
        self.root_type = Some(id);
    }

    /// Returns true if `id` is the designated root table.
    #[must_use]
    pub fn is_root(&self, id: StructId) -> bool {
        self.root_type == Some(id)
    }

    /// Returns the struct definition for `id`.
    ///
    /// # Panics
    /// Panics on a dangling id; a resolved schema never contains one.
    #[must_use]
    pub fn struct_def(&self, id: StructId) -> &StructDef {
        &self.structs[id.0]
    }

    /// Returns the enum definition for `id`.
    ///
    /// # Panics
    /// Panics on a dangling id.
    #[must_use]
    pub fn enum_def(&self, id: EnumId) -> &EnumDef {
        &self.enums[id.0]
    }

    /// Returns the number of bytes a value of `ty` occupies in place.
    ///
    /// This is the element stride of vectors: scalars take their size,
    /// fixed structs their byte size, and everything else one offset.
    #[must_use]
    pub fn inline_size(&self, ty: &Type) -> usize {
        match ty {
            Type::Scalar(scalar) => scalar.size(),
            Type::Struct(id) if self.struct_def(*id).fixed => self.struct_def(*id).bytesize,
            _ => SIZE_UOFFSET,
        }
    }

    /// Returns the alignment of a value of `ty` stored in place.
    #[must_use]
    pub fn inline_alignment(&self, ty: &Type) -> usize {
        match ty {
            Type::Scalar(scalar) => scalar.size(),
            Type::Struct(id) if self.struct_def(*id).fixed => self.struct_def(*id).minalign,
            _ => SIZE_UOFFSET,
        }
    }

    fn check_references(&self) -> Result<()> {
        for def in &self.structs {
            for field in &def.fields {
                self.check_type(&field.ty, &def.name)?;
            }
        }
        if let Some(root) = self.root_type {
            self.check_struct(root, "root_type")?;
        }
        Ok(())
    }

    fn check_type(&self, ty: &Type, owner: &str) -> Result<()> {
        match ty {
            Type::Struct(id) => self.check_struct(*id, owner),
            Type::Union(id) if id.0 >= self.enums.len() => Err(SchemaError::DanglingReference {
                kind: "enum",
                index: id.0,
                owner: owner.to_string(),
            }),
            Type::Vector(element) => self.check_type(element, owner),
            _ => Ok(()),
        }
    }

    fn check_struct(&self, id: StructId, owner: &str) -> Result<()> {
        if id.0 >= self.structs.len() {
            return Err(SchemaError::DanglingReference {
                kind: "struct",
                index: id.0,
                owner: owner.to_string(),
            });
        }
        Ok(())
    }
}

/// Converts a string to snake_case.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;
    for c in s.chars() {
        if c.is_uppercase() {
            if prev_lower {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            result.push(c);
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }
    result
}

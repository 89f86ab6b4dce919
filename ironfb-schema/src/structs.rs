//! Struct and table definitions.
//!
//! A [`StructDef`] describes either a fixed, inline struct or a relocatable
//! table. The two share the field list; what the offsets mean differs:
//! struct field offsets are byte positions inside the struct, table field
//! offsets are vtable entry positions.

use serde::{Deserialize, Serialize};

use crate::types::{Namespace, Type};

/// Size of the two metadata entries at the start of a vtable.
const VTABLE_METADATA_SIZE: usize = 4;

/// Returns the vtable offset of table slot `slot`.
#[must_use]
pub const fn slot_offset(slot: usize) -> usize {
    VTABLE_METADATA_SIZE + 2 * slot
}

/// Struct or table definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructDef {
    /// Type name.
    pub name: String,
    /// Enclosing namespace.
    #[serde(default)]
    pub namespace: Namespace,
    /// True for inline structs, false for tables.
    pub fixed: bool,
    /// Fields in declaration order, deprecated ones included.
    pub fields: Vec<FieldDef>,
    /// Inline size in bytes (structs only).
    #[serde(default)]
    pub bytesize: usize,
    /// Alignment in bytes (structs only).
    #[serde(default = "default_minalign")]
    pub minalign: usize,
    /// Already emitted by an earlier run.
    #[serde(default)]
    pub generated: bool,
    /// Documentation lines.
    #[serde(default)]
    pub doc_comment: Vec<String>,
}

const fn default_minalign() -> usize {
    1
}

impl StructDef {
    /// Creates a new table definition.
    #[must_use]
    pub fn table(name: impl Into<String>, namespace: Namespace) -> Self {
        Self {
            name: name.into(),
            namespace,
            fixed: false,
            fields: Vec::new(),
            bytesize: 0,
            minalign: 1,
            generated: false,
            doc_comment: Vec::new(),
        }
    }

    /// Creates a new fixed struct definition with its final layout.
    #[must_use]
    pub fn fixed(
        name: impl Into<String>,
        namespace: Namespace,
        bytesize: usize,
        minalign: usize,
    ) -> Self {
        Self {
            fixed: true,
            bytesize,
            minalign,
            ..Self::table(name, namespace)
        }
    }

    /// Adds a field to the definition.
    pub fn add_field(&mut self, field: FieldDef) {
        self.fields.push(field);
    }

    /// Returns the number of vtable slots, deprecated fields included.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Iterates the non-deprecated fields with their slot index.
    pub fn active_fields(&self) -> impl Iterator<Item = (usize, &FieldDef)> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, field)| !field.deprecated)
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Field definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Field type.
    #[serde(rename = "type")]
    pub ty: Type,
    /// Byte offset in a struct, or vtable offset in a table.
    pub offset: usize,
    /// Default value literal as written in the schema.
    #[serde(default = "default_value_literal")]
    pub default_value: String,
    /// Deprecated fields keep their slot but get no accessors or builders.
    #[serde(default)]
    pub deprecated: bool,
    /// Padding bytes following the field (structs only).
    #[serde(default)]
    pub padding: usize,
    /// Documentation lines.
    #[serde(default)]
    pub doc_comment: Vec<String>,
}

fn default_value_literal() -> String {
    "0".to_string()
}

impl FieldDef {
    /// Creates a new field with default value `0` and no padding.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: Type, offset: usize) -> Self {
        Self {
            name: name.into(),
            ty,
            offset,
            default_value: default_value_literal(),
            deprecated: false,
            padding: 0,
            doc_comment: Vec::new(),
        }
    }

    /// Creates a table field stored in vtable slot `slot`.
    #[must_use]
    pub fn in_slot(name: impl Into<String>, ty: Type, slot: usize) -> Self {
        Self::new(name, ty, slot_offset(slot))
    }

    /// Sets the default value literal.
    #[must_use]
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = default_value.into();
        self
    }

    /// Sets the trailing padding.
    #[must_use]
    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    /// Marks the field deprecated.
    #[must_use]
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Adds a documentation line.
    #[must_use]
    pub fn with_doc(mut self, line: impl Into<String>) -> Self {
        self.doc_comment.push(line.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScalarType;

    #[test]
    fn test_slot_offset() {
        assert_eq!(slot_offset(0), 4);
        assert_eq!(slot_offset(3), 10);
    }

    #[test]
    fn test_active_fields_keep_slot_index() {
        let mut table = StructDef::table("Monster", Namespace::default());
        table.add_field(FieldDef::in_slot("pos", ScalarType::Int32.into(), 0));
        table.add_field(FieldDef::in_slot("friendly", ScalarType::Bool.into(), 1).deprecated());
        table.add_field(FieldDef::in_slot("hp", ScalarType::Int16.into(), 2));

        assert_eq!(table.field_count(), 3);
        let active: Vec<_> = table
            .active_fields()
            .map(|(slot, f)| (slot, f.name.as_str()))
            .collect();
        assert_eq!(active, vec![(0, "pos"), (2, "hp")]);
    }

    #[test]
    fn test_fixed_struct() {
        let def = StructDef::fixed("Vec3", Namespace::default(), 32, 8);
        assert!(def.fixed);
        assert_eq!(def.bytesize, 32);
        assert_eq!(def.minalign, 8);
    }

    #[test]
    fn test_field_builders() {
        let field = FieldDef::new("z", ScalarType::Float.into(), 8)
            .with_default("1.5")
            .with_padding(4)
            .with_doc("depth");
        assert_eq!(field.default_value, "1.5");
        assert_eq!(field.padding, 4);
        assert_eq!(field.doc_comment, vec!["depth"]);
    }
}

//! Type name mapping for generated code.
//!
//! Maps schema type descriptors to the names used in generated Rust code:
//! scalar primitives, referenced entity names, default literals and the
//! builder call that stores a field in a table slot.

use ironfb_schema::{FieldDef, ScalarType, Schema, Type, to_snake_case};

/// Reserved words that need a raw identifier.
const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use", "where",
    "while", "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try",
    "typeof", "unsized", "virtual", "yield",
];

/// Identifiers that cannot be raw identifiers either.
const RESERVED_PATH_WORDS: &[&str] = &["self", "Self", "super", "crate"];

/// Methods every view type defines next to its field accessors.
const VIEW_METHODS: &[&str] = &["new", "init", "table"];

/// Returns the primitive name of a scalar type.
///
/// # Panics
/// Panics if `ty` is not a scalar.
#[must_use]
pub fn basic_type_name(ty: &Type) -> &'static str {
    match ty {
        Type::Scalar(scalar) => scalar.rust_type(),
        other => panic!("basic_type_name called with non-scalar type {other:?}"),
    }
}

/// Returns the name of a non-scalar type.
///
/// Strings map to `string`, vectors to their element's name, struct and
/// table references to the entity name, and unions to the generic `Table`
/// handle.
///
/// # Panics
/// Panics if `ty` is a scalar or references a struct outside `schema`.
#[must_use]
pub fn pointer_type_name(schema: &Schema, ty: &Type) -> String {
    match ty {
        Type::String => "string".to_string(),
        Type::Vector(element) => type_name(schema, element),
        Type::Struct(id) => schema.struct_def(*id).name.clone(),
        Type::Union(_) => "Table".to_string(),
        Type::Scalar(_) => panic!("pointer_type_name called with scalar type {ty:?}"),
    }
}

/// Returns the generated name of any type.
#[must_use]
pub fn type_name(schema: &Schema, ty: &Type) -> String {
    if ty.is_scalar() {
        basic_type_name(ty).to_string()
    } else {
        pointer_type_name(schema, ty)
    }
}

/// Returns `name` as a usable Rust identifier.
#[must_use]
pub fn rust_ident(name: &str) -> String {
    if RESERVED_PATH_WORDS.contains(&name) {
        format!("{name}_")
    } else if RUST_KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

/// Returns the accessor and argument identifier of a field.
#[must_use]
pub fn field_ident(name: &str) -> String {
    rust_ident(&to_snake_case(name))
}

/// Returns the accessor method name of a field.
///
/// A field named after one of the view's own methods gets a `_` suffix.
#[must_use]
pub fn accessor_ident(name: &str) -> String {
    let ident = field_ident(name);
    if VIEW_METHODS.contains(&ident.as_str()) {
        format!("{ident}_")
    } else {
        ident
    }
}

/// Local names of the runtime items inside one entity module.
///
/// An entity named after a runtime item would shadow its import, so that
/// item is imported as `Fb<Item>` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeNames {
    /// Local name of `Builder`.
    pub builder: String,
    /// Local name of `Result`.
    pub result: String,
    /// Local name of `Table`.
    pub table: String,
    /// Local name of `UOffset`.
    pub uoffset: String,
}

impl RuntimeNames {
    /// Returns the runtime names used in the module of entity `name`.
    #[must_use]
    pub fn for_entity(name: &str) -> Self {
        let local = |item: &str| {
            if item == name {
                format!("Fb{item}")
            } else {
                item.to_string()
            }
        };
        Self {
            builder: local("Builder"),
            result: local("Result"),
            table: local("Table"),
            uoffset: local("UOffset"),
        }
    }

    /// Renders the brace list of a `use` of the runtime `items`.
    #[must_use]
    pub fn import_list(&self, items: &[&str]) -> String {
        items
            .iter()
            .map(|item| {
                let local = self.local(item);
                if local == *item {
                    local.to_string()
                } else {
                    format!("{item} as {local}")
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn local(&self, item: &str) -> &str {
        match item {
            "Builder" => &self.builder,
            "Result" => &self.result,
            "Table" => &self.table,
            _ => &self.uoffset,
        }
    }
}

/// Returns the zero value of a scalar as a Rust literal.
#[must_use]
pub fn zero_literal(scalar: ScalarType) -> &'static str {
    match scalar {
        ScalarType::Bool => "false",
        ScalarType::Float | ScalarType::Double => "0.0",
        _ => "0",
    }
}

/// Renders a field's default value as a Rust expression of its type.
///
/// Non-scalar fields store offsets, whose default is always `0`.
#[must_use]
pub fn default_literal(field: &FieldDef) -> String {
    let Type::Scalar(scalar) = field.ty else {
        return "0".to_string();
    };
    let raw = field.default_value.trim();

    match scalar {
        ScalarType::Bool => match raw {
            "0" | "false" | "" => "false".to_string(),
            _ => "true".to_string(),
        },
        ScalarType::Float | ScalarType::Double => float_literal(scalar, raw),
        _ if raw.is_empty() => "0".to_string(),
        _ => raw.to_string(),
    }
}

fn float_literal(scalar: ScalarType, raw: &str) -> String {
    let ty = scalar.rust_type();
    match raw {
        "" => "0.0".to_string(),
        "nan" | "+nan" | "-nan" => format!("{ty}::NAN"),
        "inf" | "+inf" | "infinity" | "+infinity" => format!("{ty}::INFINITY"),
        "-inf" | "-infinity" => format!("{ty}::NEG_INFINITY"),
        _ if raw.contains(['.', 'e', 'E']) => raw.to_string(),
        _ => format!("{raw}.0"),
    }
}

/// The builder call that stores a value in a table slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// `prepend_slot::<T>` for scalars.
    Scalar(ScalarType),
    /// `prepend_struct_slot` for inline structs.
    Struct,
    /// `prepend_uoffset_relative_slot` for strings, vectors, tables and unions.
    Offset,
}

impl SlotKind {
    /// Returns the slot kind of a table field.
    #[must_use]
    pub fn of(schema: &Schema, ty: &Type) -> Self {
        match ty {
            Type::Scalar(scalar) => Self::Scalar(*scalar),
            Type::Struct(id) if schema.struct_def(*id).fixed => Self::Struct,
            _ => Self::Offset,
        }
    }

    /// Returns the builder method name, with turbofish for scalars.
    #[must_use]
    pub fn method(&self) -> String {
        match self {
            Self::Scalar(scalar) => format!("prepend_slot::<{}>", scalar.rust_type()),
            Self::Struct => "prepend_struct_slot".to_string(),
            Self::Offset => "prepend_uoffset_relative_slot".to_string(),
        }
    }

    /// Returns the Rust type of the value handed to the builder.
    #[must_use]
    pub fn value_type(&self, runtime: &RuntimeNames) -> String {
        match self {
            Self::Scalar(scalar) => scalar.rust_type().to_string(),
            Self::Struct | Self::Offset => runtime.uoffset.clone(),
        }
    }
}

//! # IronFB Schema
//!
//! Resolved schema model consumed by the code generator.
//!
//! This crate provides:
//! - Scalar and field type descriptors
//! - Enum, struct and table definitions with final offsets, sizes and padding
//! - The [`Schema`] arena that owns them, addressed by [`StructId`] and [`EnumId`]
//! - JSON loading for resolvers that hand over the model as a document
//!
//! The model is produced by an external parser/resolver. Nothing here
//! computes layouts or validates a schema; the generator trusts the values it
//! is given.

pub mod error;
pub mod ir;
pub mod structs;
pub mod types;

pub use error::SchemaError;
pub use ir::{EnumId, Schema, StructId, to_snake_case};
pub use structs::{FieldDef, StructDef};
pub use types::{EnumDef, EnumVal, Namespace, ScalarType, Type};

//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use ironfb::prelude::*;
//! ```

// Runtime types
pub use ironfb_core::buffer::{ReadBuffer, WriteBuffer};
pub use ironfb_core::error::{Error as CoreError, Result as CoreResult};
pub use ironfb_core::{Builder, Scalar, Table, UOffset};

// Schema model
pub use ironfb_schema::{
    EnumDef, EnumId, EnumVal, FieldDef, Namespace, ScalarType, Schema, SchemaError, StructDef,
    StructId, Type,
};

// Code generation
pub use ironfb_codegen::{
    CodegenError, EntityWriter, GeneratedEntity, Generator, GeneratorOptions, MemoryWriter,
    WriteError,
};

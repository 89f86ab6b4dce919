//! # IronFB
//!
//! FlatBuffers-style code generation and zero-copy runtime for Rust.
//!
//! A schema compiler resolves a schema into the [`schema`] model; [`codegen`]
//! turns that model into Rust modules with zero-copy accessors and builders;
//! the generated code runs against [`core`].
//!
//! ## Quick Start
//!
//! ```ignore
//! // build.rs
//! use ironfb::prelude::*;
//!
//! let schema = Schema::from_json(&std::fs::read_to_string("schema.json")?)?;
//! let options = GeneratorOptions::new().runtime_path("ironfb::core");
//! let code = ironfb::codegen::generate_inline(&schema, options)?;
//! std::fs::write(out_dir.join("generated.rs"), code)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Table views, the back-to-front builder, buffer traits
//! - [`schema`] - Resolved schema model
//! - [`codegen`] - Rust code generation from the model

pub mod prelude;

/// Runtime used by generated code.
pub mod core {
    pub use ironfb_core::*;
}

/// Resolved schema model.
pub mod schema {
    pub use ironfb_schema::*;
}

/// Code generation from resolved schemas.
pub mod codegen {
    pub use ironfb_codegen::*;
}

pub use ironfb_core::{Builder, Table, UOffset};
pub use ironfb_codegen::{Generator, GeneratorOptions};

//! # IronFB Core
//!
//! Runtime consumed by code generated with `ironfb-codegen`.
//!
//! This crate provides:
//! - Buffer traits for little-endian reads and writes at a byte position
//! - [`Table`], a zero-copy view over a table or struct inside a buffer
//! - [`Builder`], which assembles buffers back to front with vtable
//!   deduplication
//! - The [`Scalar`] trait shared by readers and writers
//! - Error types for builder state violations

pub mod buffer;
pub mod builder;
pub mod error;
pub mod table;
pub mod types;

pub use buffer::{ReadBuffer, WriteBuffer};
pub use builder::Builder;
pub use error::{Error, Result};
pub use table::Table;
pub use types::{SOffset, Scalar, UOffset, VOffset};

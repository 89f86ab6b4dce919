//! # IronFB Codegen
//!
//! Rust code generation from resolved schemas.
//!
//! This crate provides:
//! - Zero-copy accessor generation for tables and fixed structs
//! - Positional struct builders and keyword table builders
//! - Enum and union tag generation
//! - Relative cross-namespace references
//! - An in-memory writer for build script integration

pub mod error;
pub mod generator;
pub mod options;
pub mod rust;
pub mod writer;

pub use error::{CodegenError, WriteError};
pub use generator::{EntityId, GenerationSummary, Generator};
pub use options::GeneratorOptions;
pub use writer::{EntityWriter, GeneratedEntity, MemoryWriter};

use ironfb_schema::Schema;

/// Generates Rust code for a whole schema as nested inline modules.
///
/// # Arguments
/// * `schema` - Resolved schema
/// * `options` - Generator options
///
/// # Returns
/// One string holding a module per namespace level and entity.
///
/// # Errors
/// Returns `CodegenError` if an entity cannot be stored.
pub fn generate_inline(schema: &Schema, options: GeneratorOptions) -> Result<String, CodegenError> {
    let mut writer = MemoryWriter::new();
    Generator::with_options(schema, options).generate(&mut writer)?;
    Ok(writer.render_inline())
}

/// Generates Rust code from the JSON form of a resolved schema.
///
/// # Arguments
/// * `json` - Schema document
/// * `options` - Generator options
///
/// # Errors
/// Returns `CodegenError` if the document is invalid or generation fails.
pub fn generate_from_json(json: &str, options: GeneratorOptions) -> Result<String, CodegenError> {
    let schema = Schema::from_json(json)?;
    generate_inline(&schema, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAT_JSON: &str = r#"{
        "structs": [{
            "name": "Stat",
            "namespace": ["MyGame", "Example"],
            "fixed": false,
            "fields": [
                {"name": "id", "type": "string", "offset": 4},
                {"name": "val", "type": {"scalar": "int64"}, "offset": 6},
                {"name": "count", "type": {"scalar": "uint16"}, "offset": 8}
            ]
        }],
        "root_type": 0
    }"#;

    #[test]
    fn test_generate_from_json() {
        let code = generate_from_json(STAT_JSON, GeneratorOptions::default()).expect("generate");
        assert!(code.starts_with("pub mod my_game {\npub mod example {\npub mod stat {\n"));
        assert!(code.contains("pub fn get_root_as_stat("));
        assert!(code.contains("pub fn val(&self) -> i64 {"));
        assert!(code.contains("builder.prepend_slot::<u16>(2, v, 0)?;"));
        assert!(code.contains("pub fn stat_add_count(builder: &mut Builder, count: u16) -> Result<()> {"));
        syn::parse_file(&code).expect("valid Rust");
    }

    #[test]
    fn test_generate_from_invalid_json() {
        let err = generate_from_json("{", GeneratorOptions::default()).unwrap_err();
        assert!(matches!(err, CodegenError::Schema(_)));
    }
}

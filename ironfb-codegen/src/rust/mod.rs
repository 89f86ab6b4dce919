//! Rust code generation modules.

pub mod accessors;
pub mod builders;
pub mod enums;
pub mod imports;
pub mod structs;
pub mod types;

pub use accessors::AccessorGenerator;
pub use builders::BuilderGenerator;
pub use enums::EnumGenerator;
pub use structs::StructGenerator;

use ironfb_schema::Namespace;

/// Header written at the top of every generated file.
#[must_use]
pub fn file_header(namespace: &Namespace) -> String {
    format!(
        "// automatically generated, do not modify\n\n// namespace: {}\n\n",
        namespace
    )
}

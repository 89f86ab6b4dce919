//! Enum and union tag code generation.

use std::collections::HashSet;

use ironfb_schema::EnumDef;

use crate::options::GeneratorOptions;
use crate::rust::accessors::doc_line;
use crate::rust::types::rust_ident;

/// Generator for enum definitions.
///
/// Values become associated constants of a unit struct; accessors return
/// the raw integer.
pub struct EnumGenerator<'a> {
    options: &'a GeneratorOptions,
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(options: &'a GeneratorOptions) -> Self {
        Self { options }
    }

    /// Generates an enum definition.
    #[must_use]
    pub fn generate(&self, def: &EnumDef) -> String {
        let mut output = String::new();
        let rust_type = def.underlying.rust_type();

        output.push_str(&self.doc_comment(&def.doc_comment, ""));
        output.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]\n");
        output.push_str(&format!("pub struct {};\n\n", def.name));

        output.push_str("#[allow(non_upper_case_globals)]\n");
        output.push_str(&format!("impl {} {{\n", def.name));
        for value in &def.values {
            output.push_str(&self.doc_comment(&value.doc_comment, "    "));
            output.push_str(&format!(
                "    pub const {}: {} = {};\n",
                rust_ident(&value.name),
                rust_type,
                value.value
            ));
        }
        output.push('\n');

        output.push_str("    /// Returns the declared name of `value`.\n");
        output.push_str("    #[must_use]\n");
        output.push_str(&format!(
            "    pub fn variant_name(value: {}) -> Option<&'static str> {{\n",
            rust_type
        ));
        output.push_str("        match value {\n");
        let mut seen = HashSet::new();
        for value in &def.values {
            // First declaration wins for aliased values.
            if seen.insert(value.value) {
                output.push_str(&format!(
                    "            {} => Some(\"{}\"),\n",
                    value.value, value.name
                ));
            }
        }
        output.push_str("            _ => None,\n");
        output.push_str("        }\n");
        output.push_str("    }\n");
        output.push_str("}\n");

        output
    }

    fn doc_comment(&self, lines: &[String], indent: &str) -> String {
        if !self.options.emit_doc_comments {
            return String::new();
        }
        lines
            .iter()
            .map(|line| format!("{}///{}\n", indent, doc_line(line)))
            .collect()
    }
}

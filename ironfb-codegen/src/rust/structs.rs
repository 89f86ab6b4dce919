//! Struct and table code generation.
//!
//! Assembles the module of one struct or table: runtime imports, the view
//! type with its constructors and accessors, then the builder functions.

use ironfb_schema::{Schema, StructDef, StructId, to_snake_case};

use crate::options::GeneratorOptions;
use crate::rust::accessors::{AccessorGenerator, doc_line};
use crate::rust::builders::BuilderGenerator;
use crate::rust::types::RuntimeNames;

/// Generator for struct and table modules.
pub struct StructGenerator<'a> {
    schema: &'a Schema,
    options: &'a GeneratorOptions,
}

impl<'a> StructGenerator<'a> {
    /// Creates a new struct generator.
    #[must_use]
    pub fn new(schema: &'a Schema, options: &'a GeneratorOptions) -> Self {
        Self { schema, options }
    }

    /// Generates the module body of struct or table `id`.
    #[must_use]
    pub fn generate(&self, id: StructId) -> String {
        let def = self.schema.struct_def(id);
        let runtime = RuntimeNames::for_entity(&def.name);
        let mut output = String::new();

        output.push_str(&self.generate_imports(def, &runtime));
        output.push_str(&self.generate_view(id, def, &runtime));
        output.push_str(&BuilderGenerator::new(self.schema).generate(def));

        output.truncate(output.trim_end().len());
        output.push('\n');
        output
    }

    /// Runtime items used by the module.
    fn generate_imports(&self, def: &StructDef, runtime: &RuntimeNames) -> String {
        let items: &[&str] = if def.fixed {
            &["Builder", "Table", "UOffset"]
        } else {
            &["Builder", "Result", "Table", "UOffset"]
        };
        format!(
            "use {}::{{{}}};\n\n",
            self.options.runtime_path,
            runtime.import_list(items)
        )
    }

    /// The view type, its constructors and its accessors.
    fn generate_view(&self, id: StructId, def: &StructDef, runtime: &RuntimeNames) -> String {
        let mut output = String::new();
        let name = &def.name;
        let table = &runtime.table;

        if self.options.emit_doc_comments {
            for line in &def.doc_comment {
                output.push_str(&format!("///{}\n", doc_line(line)));
            }
        }
        output.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq)]\n");
        output.push_str(&format!("pub struct {}<'a> {{\n", name));
        output.push_str(&format!("    tab: {}<'a>,\n", table));
        output.push_str("}\n\n");

        output.push_str(&format!("impl<'a> {}<'a> {{\n", name));

        if self.is_root(id, def) {
            output.push_str("    /// Returns the root table of a finished buffer.\n");
            output.push_str("    #[inline]\n");
            output.push_str("    #[must_use]\n");
            output.push_str(&format!(
                "    pub fn get_root_as_{}(buf: &'a [u8], offset: usize) -> Self {{\n",
                to_snake_case(name)
            ));
            output.push_str(&format!(
                "        Self {{ tab: {}::get_root(buf, offset) }}\n",
                table
            ));
            output.push_str("    }\n\n");
        }

        output.push_str(&format!(
            "    /// Attaches to the `{}` at `pos` in `buf`.\n",
            name
        ));
        output.push_str("    #[inline]\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub fn new(buf: &'a [u8], pos: usize) -> Self {\n");
        output.push_str(&format!("        Self {{ tab: {}::new(buf, pos) }}\n", table));
        output.push_str("    }\n\n");

        output.push_str("    /// Re-attaches this view to another object.\n");
        output.push_str("    #[inline]\n");
        output.push_str("    pub fn init(&mut self, buf: &'a [u8], pos: usize) {\n");
        output.push_str(&format!("        self.tab = {}::new(buf, pos);\n", table));
        output.push_str("    }\n\n");

        output.push_str("    #[inline]\n");
        output.push_str("    #[must_use]\n");
        output.push_str(&format!("    pub fn table(&self) -> {}<'a> {{\n", table));
        output.push_str("        self.tab\n");
        output.push_str("    }\n\n");

        output.push_str(&AccessorGenerator::new(self.schema, self.options).generate(def));
        output.truncate(output.trim_end().len());
        output.push_str("\n}\n\n");

        output.push_str(&format!(
            "impl<'a> From<{}<'a>> for {}<'a> {{\n",
            table, name
        ));
        output.push_str(&format!("    fn from(tab: {}<'a>) -> Self {{\n", table));
        output.push_str("        Self { tab }\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output
    }

    fn is_root(&self, id: StructId, def: &StructDef) -> bool {
        self.schema.is_root(id) || (self.options.all_tables_as_roots && !def.fixed)
    }
}

//! Read-side code generation.
//!
//! Each non-deprecated field gets one accessor method on the entity's view
//! type. Table fields go through the vtable and fall back to the declared
//! default; struct fields are read at a fixed offset from the struct start.

use ironfb_schema::{FieldDef, ScalarType, Schema, StructDef, Type};

use crate::options::GeneratorOptions;
use crate::rust::imports::struct_path;
use crate::rust::types::{
    RuntimeNames, accessor_ident, basic_type_name, default_literal, field_ident, zero_literal,
};

/// Generator for field accessors.
pub struct AccessorGenerator<'a> {
    schema: &'a Schema,
    options: &'a GeneratorOptions,
}

impl<'a> AccessorGenerator<'a> {
    /// Creates a new accessor generator.
    #[must_use]
    pub fn new(schema: &'a Schema, options: &'a GeneratorOptions) -> Self {
        Self { schema, options }
    }

    /// Generates the accessors of every non-deprecated field of `def`.
    #[must_use]
    pub fn generate(&self, def: &StructDef) -> String {
        let mut output = String::new();
        for (_, field) in def.active_fields() {
            output.push_str(&self.generate_field(def, field));
        }
        output
    }

    /// Generates the accessor (and length accessor for vectors) of one field.
    ///
    /// # Panics
    /// Panics on types that cannot appear in `def`: strings, vectors or
    /// unions inside a fixed struct, and vectors of vectors.
    #[must_use]
    pub fn generate_field(&self, def: &StructDef, field: &FieldDef) -> String {
        let mut output = String::new();
        output.push_str(&self.doc_comment(field));

        if def.fixed {
            output.push_str(&self.struct_field(def, field));
            return output;
        }

        match &field.ty {
            Type::Scalar(scalar) => output.push_str(&self.table_scalar(field, *scalar)),
            Type::String => output.push_str(&self.table_string(field)),
            Type::Struct(_) => output.push_str(&self.table_struct(def, field)),
            Type::Vector(element) => {
                output.push_str(&self.table_vector(def, field, element));
                output.push_str(&self.vector_length(field));
            }
            Type::Union(_) => output.push_str(&self.table_union(def, field)),
        }
        output
    }

    fn doc_comment(&self, field: &FieldDef) -> String {
        if !self.options.emit_doc_comments {
            return String::new();
        }
        field
            .doc_comment
            .iter()
            .map(|line| format!("    ///{}\n", doc_line(line)))
            .collect()
    }

    /// Field of a fixed struct: always present at `pos + offset`.
    fn struct_field(&self, def: &StructDef, field: &FieldDef) -> String {
        let mut output = String::new();
        let name = accessor_ident(&field.name);

        match &field.ty {
            Type::Scalar(_) => {
                let ty = basic_type_name(&field.ty);
                output.push_str("    #[inline]\n");
                output.push_str("    #[must_use]\n");
                output.push_str(&format!("    pub fn {}(&self) -> {} {{\n", name, ty));
                output.push_str(&format!("        self.tab.get::<{}>({})\n", ty, field.offset));
                output.push_str("    }\n\n");
            }
            Type::Struct(id) => {
                let path = struct_path(self.schema, &def.namespace, *id);
                output.push_str("    #[inline]\n");
                output.push_str("    #[must_use]\n");
                output.push_str(&format!("    pub fn {}(&self) -> {}<'a> {{\n", name, path));
                output.push_str(&format!(
                    "        {}::new(self.tab.bytes, self.tab.pos + {})\n",
                    path, field.offset
                ));
                output.push_str("    }\n\n");
            }
            other => panic!(
                "field '{}' of struct '{}' has non-inline type {:?}",
                field.name, def.name, other
            ),
        }
        output
    }

    fn table_scalar(&self, field: &FieldDef, scalar: ScalarType) -> String {
        let mut output = String::new();
        let ty = scalar.rust_type();

        output.push_str("    #[inline]\n");
        output.push_str("    #[must_use]\n");
        output.push_str(&format!(
            "    pub fn {}(&self) -> {} {{\n",
            accessor_ident(&field.name),
            ty
        ));
        output.push_str(&presence_check(field));
        output.push_str(&format!("            return self.tab.get::<{}>(o);\n", ty));
        output.push_str("        }\n");
        output.push_str(&format!("        {}\n", default_literal(field)));
        output.push_str("    }\n\n");
        output
    }

    fn table_string(&self, field: &FieldDef) -> String {
        let mut output = String::new();

        output.push_str("    #[inline]\n");
        output.push_str("    #[must_use]\n");
        output.push_str(&format!(
            "    pub fn {}(&self) -> &'a str {{\n",
            accessor_ident(&field.name)
        ));
        output.push_str(&presence_check(field));
        output.push_str("            return self.tab.string(o);\n");
        output.push_str("        }\n");
        output.push_str("        \"\"\n");
        output.push_str("    }\n\n");
        output
    }

    /// Struct or table referenced from a table.
    fn table_struct(&self, def: &StructDef, field: &FieldDef) -> String {
        let mut output = String::new();
        let Type::Struct(id) = field.ty else {
            return output;
        };
        let path = struct_path(self.schema, &def.namespace, id);

        output.push_str("    #[inline]\n");
        output.push_str("    #[must_use]\n");
        output.push_str(&format!(
            "    pub fn {}(&self) -> Option<{}<'a>> {{\n",
            accessor_ident(&field.name),
            path
        ));
        output.push_str(&presence_check(field));
        if !self.schema.struct_def(id).fixed {
            output.push_str("            let o = self.tab.indirect(o);\n");
        }
        output.push_str(&format!(
            "            return Some({}::new(self.tab.bytes, self.tab.pos + o));\n",
            path
        ));
        output.push_str("        }\n");
        output.push_str("        None\n");
        output.push_str("    }\n\n");
        output
    }

    /// Element accessor of a vector field, indexed without bounds checks.
    fn table_vector(&self, def: &StructDef, field: &FieldDef, element: &Type) -> String {
        let mut output = String::new();
        let name = accessor_ident(&field.name);
        let stride = self.schema.inline_size(element);
        let runtime = RuntimeNames::for_entity(&def.name);

        let (return_type, read, absent) = match element {
            Type::Scalar(scalar) => (
                scalar.rust_type().to_string(),
                format!("self.tab.get::<{}>(x)", scalar.rust_type()),
                zero_literal(*scalar).to_string(),
            ),
            Type::String => (
                "&'a str".to_string(),
                "self.tab.string(x)".to_string(),
                "\"\"".to_string(),
            ),
            Type::Struct(id) => {
                let path = struct_path(self.schema, &def.namespace, *id);
                (
                    format!("Option<{}<'a>>", path),
                    format!("Some({}::new(self.tab.bytes, self.tab.pos + x))", path),
                    "None".to_string(),
                )
            }
            Type::Union(_) => (
                format!("Option<{}<'a>>", runtime.table),
                "Some(self.tab.union(x))".to_string(),
                "None".to_string(),
            ),
            Type::Vector(_) => panic!(
                "field '{}' of table '{}' is a vector of vectors",
                field.name, def.name
            ),
        };

        output.push_str("    #[inline]\n");
        output.push_str("    #[must_use]\n");
        output.push_str(&format!(
            "    pub fn {}(&self, index: usize) -> {} {{\n",
            name, return_type
        ));
        output.push_str(&presence_check(field));
        output.push_str(&format!(
            "            let x = self.tab.vector(o) + index * {};\n",
            stride
        ));
        if matches!(element, Type::Struct(id) if !self.schema.struct_def(*id).fixed) {
            output.push_str("            let x = self.tab.indirect(x);\n");
        }
        output.push_str(&format!("            return {};\n", read));
        output.push_str("        }\n");
        output.push_str(&format!("        {}\n", absent));
        output.push_str("    }\n\n");
        output
    }

    fn vector_length(&self, field: &FieldDef) -> String {
        let mut output = String::new();

        output.push_str("    #[inline]\n");
        output.push_str("    #[must_use]\n");
        output.push_str(&format!(
            "    pub fn {}_length(&self) -> usize {{\n",
            field_ident(&field.name).trim_start_matches("r#")
        ));
        output.push_str(&presence_check(field));
        output.push_str("            return self.tab.vector_len(o);\n");
        output.push_str("        }\n");
        output.push_str("        0\n");
        output.push_str("    }\n\n");
        output
    }

    /// Untyped union payload; the companion `_type` field selects the type.
    fn table_union(&self, def: &StructDef, field: &FieldDef) -> String {
        let mut output = String::new();
        let runtime = RuntimeNames::for_entity(&def.name);

        output.push_str("    #[inline]\n");
        output.push_str("    #[must_use]\n");
        output.push_str(&format!(
            "    pub fn {}(&self) -> Option<{}<'a>> {{\n",
            accessor_ident(&field.name),
            runtime.table
        ));
        output.push_str(&presence_check(field));
        output.push_str("            return Some(self.tab.union(o));\n");
        output.push_str("        }\n");
        output.push_str("        None\n");
        output.push_str("    }\n\n");
        output
    }
}

/// Opens the vtable lookup shared by every table accessor.
fn presence_check(field: &FieldDef) -> String {
    format!(
        "        let o = self.tab.offset({});\n        if o != 0 {{\n",
        field.offset
    )
}

/// Formats a documentation line, keeping a leading space.
pub(crate) fn doc_line(line: &str) -> String {
    if line.is_empty() || line.starts_with(' ') {
        line.to_string()
    } else {
        format!(" {line}")
    }
}

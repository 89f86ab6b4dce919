//! Write-side code generation.
//!
//! Fixed structs get a positional `create_<struct>` function. Tables get a
//! `<Table>Args` parameter object with `create_<table>`, plus the low-level
//! `<table>_start` / `<table>_add_<field>` / `<table>_end` functions for
//! building incrementally.
//!
//! The builder writes back to front, so the struct body walks the fields in
//! reverse: each field's trailing padding first, then the field itself.

use ironfb_schema::{FieldDef, Schema, StructDef, Type, to_snake_case};

use crate::rust::imports::{struct_create_path, struct_path};
use crate::rust::types::{RuntimeNames, SlotKind, basic_type_name, default_literal, field_ident};

/// Widest tuple the standard library implements `Debug`, `Default` and
/// `PartialEq` for. Wider fixed structs get a named `<Struct>Args` instead.
const MAX_TUPLE_ARITY: usize = 12;

/// Generator for struct and table builders.
pub struct BuilderGenerator<'a> {
    schema: &'a Schema,
}

impl<'a> BuilderGenerator<'a> {
    /// Creates a new builder generator.
    #[must_use]
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Generates the builder set of `def`.
    #[must_use]
    pub fn generate(&self, def: &StructDef) -> String {
        if def.fixed {
            let mut output = self.generate_struct_builder(def);
            if self.struct_args(def, "").len() > MAX_TUPLE_ARITY {
                output.push_str(&self.generate_struct_args(def));
            }
            output
        } else {
            let runtime = RuntimeNames::for_entity(&def.name);
            let mut output = String::new();
            output.push_str(&self.generate_args(def, &runtime));
            output.push_str(&self.generate_keyword_builder(def, &runtime));
            output.push_str(&self.generate_primitives(def, &runtime));
            output
        }
    }

    /// Generates the positional builder of a fixed struct.
    #[must_use]
    pub fn generate_struct_builder(&self, def: &StructDef) -> String {
        let mut output = String::new();
        let runtime = RuntimeNames::for_entity(&def.name);
        let args = self.struct_args(def, "");

        output.push_str(&format!(
            "/// Writes a `{}` in place and returns its offset.\n",
            def.name
        ));
        output.push_str("#[allow(clippy::too_many_arguments)]\n");
        output.push_str(&format!(
            "pub fn create_{}(\n",
            to_snake_case(&def.name)
        ));
        output.push_str(&format!("    builder: &mut {},\n", runtime.builder));
        for (name, ty) in &args {
            output.push_str(&format!("    {}: {},\n", name, ty));
        }
        output.push_str(&format!(") -> {} {{\n", runtime.uoffset));
        self.struct_body(def, "", &mut output);
        output.push_str("    builder.offset()\n");
        output.push_str("}\n\n");
        output
    }

    /// Generates the named argument type of a fixed struct with more leaf
    /// fields than a tuple can carry.
    fn generate_struct_args(&self, def: &StructDef) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "/// Flattened fields of a `{}` stored in a table.\n",
            def.name
        ));
        output.push_str("#[derive(Debug, Clone, Copy, Default, PartialEq)]\n");
        output.push_str(&format!("pub struct {}Args {{\n", def.name));
        for (name, ty) in self.struct_args(def, "") {
            output.push_str(&format!("    pub {}: {},\n", name, ty));
        }
        output.push_str("}\n\n");
        output
    }

    /// Flattens the fields of `def` into `(argument, type)` pairs in
    /// declaration order, prefixing nested struct fields with the
    /// enclosing field's name.
    fn struct_args(&self, def: &StructDef, prefix: &str) -> Vec<(String, &'static str)> {
        let mut args = Vec::new();
        for field in &def.fields {
            let name = format!("{}{}", prefix, field.name);
            match &field.ty {
                Type::Struct(id) => {
                    let nested = self.schema.struct_def(*id);
                    args.extend(self.struct_args(nested, &format!("{}_", name)));
                }
                ty => args.push((arg_ident(&name), basic_type_name(ty))),
            }
        }
        args
    }

    /// Emits the prep/pad/prepend sequence of a struct, last field first.
    fn struct_body(&self, def: &StructDef, prefix: &str, output: &mut String) {
        output.push_str(&format!(
            "    builder.prep({}, {});\n",
            def.minalign, def.bytesize
        ));
        for field in def.fields.iter().rev() {
            if field.padding > 0 {
                output.push_str(&format!("    builder.pad({});\n", field.padding));
            }
            let name = format!("{}{}", prefix, field.name);
            match &field.ty {
                Type::Struct(id) => {
                    let nested = self.schema.struct_def(*id);
                    self.struct_body(nested, &format!("{}_", name), output);
                }
                ty => output.push_str(&format!(
                    "    builder.prepend::<{}>({});\n",
                    basic_type_name(ty),
                    arg_ident(&name)
                )),
            }
        }
    }

    /// Generates the `<Table>Args` parameter object.
    fn generate_args(&self, def: &StructDef, runtime: &RuntimeNames) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "/// Fields of a `{}`; `None` leaves a field unset.\n",
            def.name
        ));
        output.push_str("#[derive(Debug, Clone, Copy, Default, PartialEq)]\n");
        output.push_str(&format!("pub struct {}Args {{\n", def.name));
        for (_, field) in def.active_fields() {
            output.push_str(&format!(
                "    pub {}: Option<{}>,\n",
                field_ident(&field.name),
                self.arg_type(def, field, runtime)
            ));
        }
        output.push_str("}\n\n");
        output
    }

    /// Type of a table field in the parameter object.
    fn arg_type(&self, def: &StructDef, field: &FieldDef, runtime: &RuntimeNames) -> String {
        match &field.ty {
            Type::Scalar(scalar) => scalar.rust_type().to_string(),
            Type::Struct(id) if self.schema.struct_def(*id).fixed => {
                let types: Vec<&str> = self
                    .struct_args(self.schema.struct_def(*id), "")
                    .into_iter()
                    .map(|(_, ty)| ty)
                    .collect();
                if types.len() > MAX_TUPLE_ARITY {
                    format!("{}Args", struct_path(self.schema, &def.namespace, *id))
                } else if types.len() == 1 {
                    format!("({},)", types[0])
                } else {
                    format!("({})", types.join(", "))
                }
            }
            _ => runtime.uoffset.clone(),
        }
    }

    /// Generates `create_<table>`.
    fn generate_keyword_builder(&self, def: &StructDef, runtime: &RuntimeNames) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "/// Writes a `{}` with the fields set in `args` and returns its offset.\n",
            def.name
        ));
        output.push_str("///\n");
        output.push_str(
            "/// Strings, vectors and tables referenced from `args` must already be written.\n",
        );
        output.push_str("///\n");
        output.push_str("/// # Errors\n");
        output.push_str("/// Returns an error if another object is being built.\n");
        output.push_str(&format!(
            "pub fn create_{}(builder: &mut {}, args: &{}Args) -> {}<{}> {{\n",
            to_snake_case(&def.name),
            runtime.builder,
            def.name,
            runtime.result,
            runtime.uoffset
        ));
        output.push_str(&format!(
            "    builder.start_object({})?;\n",
            def.field_count()
        ));
        if def.active_fields().next().is_none() {
            output.push_str("    let _ = args;\n");
        }
        for (slot, field) in def.active_fields() {
            output.push_str(&format!(
                "    if let Some(v) = args.{} {{\n",
                field_ident(&field.name)
            ));
            if let Type::Struct(id) = field.ty {
                let nested = self.schema.struct_def(id);
                if nested.fixed {
                    output.push_str(&format!(
                        "        let v = {}(builder, {});\n",
                        struct_create_path(self.schema, &def.namespace, id),
                        self.struct_values(nested).join(", ")
                    ));
                }
            }
            output.push_str(&format!(
                "        {}?;\n",
                self.slot_prepend(slot, field, "v")
            ));
            output.push_str("    }\n");
        }
        output.push_str("    builder.end_object()\n");
        output.push_str("}\n\n");
        output
    }

    /// Reads the flattened fields of fixed struct `def` out of the argument
    /// `v`: tuple positions, or named fields of a `<Struct>Args`.
    fn struct_values(&self, def: &StructDef) -> Vec<String> {
        let args = self.struct_args(def, "");
        if args.len() > MAX_TUPLE_ARITY {
            args.iter().map(|(name, _)| format!("v.{}", name)).collect()
        } else {
            (0..args.len()).map(|i| format!("v.{}", i)).collect()
        }
    }

    /// Generates the low-level start/add/end functions.
    fn generate_primitives(&self, def: &StructDef, runtime: &RuntimeNames) -> String {
        let mut output = String::new();
        let table = to_snake_case(&def.name);
        let builder = &runtime.builder;
        let result = &runtime.result;
        let uoffset = &runtime.uoffset;

        output.push_str(&format!("/// Starts a `{}`.\n", def.name));
        output.push_str("///\n");
        output.push_str("/// # Errors\n");
        output.push_str("/// Returns an error if another object is being built.\n");
        output.push_str(&format!(
            "pub fn {}_start(builder: &mut {}) -> {}<()> {{\n",
            table, builder, result
        ));
        output.push_str(&format!(
            "    builder.start_object({})\n",
            def.field_count()
        ));
        output.push_str("}\n\n");

        for (slot, field) in def.active_fields() {
            let name = field_ident(&field.name);
            let bare = name.trim_start_matches("r#");
            let arg = arg_ident(&field.name);

            output.push_str(&format!(
                "pub fn {}_add_{}(builder: &mut {}, {}: {}) -> {}<()> {{\n",
                table,
                bare,
                builder,
                arg,
                SlotKind::of(self.schema, &field.ty).value_type(runtime),
                result
            ));
            output.push_str(&format!("    {}\n", self.slot_prepend(slot, field, &arg)));
            output.push_str("}\n\n");

            if let Type::Vector(element) = &field.ty {
                output.push_str(&format!(
                    "pub fn {}_start_{}_vector(builder: &mut {}, num_elems: usize) -> {}<{}> {{\n",
                    table, bare, builder, result, uoffset
                ));
                output.push_str(&format!(
                    "    builder.start_vector({}, num_elems, {})\n",
                    self.schema.inline_size(element),
                    self.schema.inline_alignment(element)
                ));
                output.push_str("}\n\n");
            }
        }

        output.push_str(&format!("/// Finishes a `{}` and returns its offset.\n", def.name));
        output.push_str("///\n");
        output.push_str("/// # Errors\n");
        output.push_str("/// Returns an error if no object is being built.\n");
        output.push_str(&format!(
            "pub fn {}_end(builder: &mut {}) -> {}<{}> {{\n",
            table, builder, result, uoffset
        ));
        output.push_str("    builder.end_object()\n");
        output.push_str("}\n\n");
        output
    }

    /// The single slot-prepend call used by both `create_<table>` and
    /// `<table>_add_<field>`.
    fn slot_prepend(&self, slot: usize, field: &FieldDef, value: &str) -> String {
        let kind = SlotKind::of(self.schema, &field.ty);
        format!(
            "builder.{}({}, {}, {})",
            kind.method(),
            slot,
            value,
            default_literal(field)
        )
    }
}

/// Argument identifier that cannot shadow the `builder` or `args` parameters.
fn arg_ident(name: &str) -> String {
    let ident = field_ident(name);
    match ident.as_str() {
        "builder" | "args" => format!("{}_", ident),
        _ => ident,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironfb_schema::{Namespace, ScalarType, StructId};

    /// `Test { a: short; b: byte }` and
    /// `Vec3 { x, y, z: float; test1: double; test2: byte; test3: Test }`.
    fn schema() -> Schema {
        let ns = Namespace::from_dotted("MyGame.Example");
        let mut schema = Schema::new();

        let mut test = StructDef::fixed("Test", ns.clone(), 4, 2);
        test.add_field(FieldDef::new("a", ScalarType::Int16.into(), 0));
        test.add_field(FieldDef::new("b", ScalarType::Int8.into(), 2).with_padding(1));
        let test_id = schema.add_struct(test);

        let mut vec3 = StructDef::fixed("Vec3", ns.clone(), 32, 8);
        vec3.add_field(FieldDef::new("x", ScalarType::Float.into(), 0));
        vec3.add_field(FieldDef::new("y", ScalarType::Float.into(), 4));
        vec3.add_field(FieldDef::new("z", ScalarType::Float.into(), 8).with_padding(4));
        vec3.add_field(FieldDef::new("test1", ScalarType::Double.into(), 16));
        vec3.add_field(FieldDef::new("test2", ScalarType::Int8.into(), 24).with_padding(1));
        vec3.add_field(FieldDef::new("test3", Type::Struct(test_id), 26).with_padding(2));
        let vec3_id = schema.add_struct(vec3);

        let mut monster = StructDef::table("Monster", ns);
        monster.add_field(FieldDef::in_slot("pos", Type::Struct(vec3_id), 0));
        monster.add_field(FieldDef::in_slot("mana", ScalarType::Int16.into(), 1).with_default("150"));
        monster.add_field(FieldDef::in_slot("friendly", ScalarType::Bool.into(), 2).deprecated());
        monster.add_field(FieldDef::in_slot("name", Type::String, 3));
        monster.add_field(FieldDef::in_slot(
            "inventory",
            Type::vector_of(ScalarType::Uint8.into()),
            4,
        ));
        monster.add_field(FieldDef::in_slot("test4", Type::vector_of(Type::Struct(test_id)), 5));
        monster.add_field(FieldDef::in_slot("builder", ScalarType::Bool.into(), 6));
        schema.add_struct(monster);
        schema
    }

    fn body_lines(code: &str) -> Vec<&str> {
        code.lines()
            .map(str::trim)
            .filter(|l| l.starts_with("builder.") && !l.starts_with("builder: "))
            .collect()
    }

    #[test]
    fn test_struct_builder_walks_fields_in_reverse() {
        let schema = schema();
        let code = BuilderGenerator::new(&schema).generate(schema.struct_def(StructId(1)));

        assert_eq!(
            body_lines(&code),
            vec![
                "builder.prep(8, 32);",
                "builder.pad(2);",
                "builder.prep(2, 4);",
                "builder.pad(1);",
                "builder.prepend::<i8>(test3_b);",
                "builder.prepend::<i16>(test3_a);",
                "builder.pad(1);",
                "builder.prepend::<i8>(test2);",
                "builder.prepend::<f64>(test1);",
                "builder.pad(4);",
                "builder.prepend::<f32>(z);",
                "builder.prepend::<f32>(y);",
                "builder.prepend::<f32>(x);",
                "builder.offset()",
            ]
        );
    }

    #[test]
    fn test_struct_builder_flattens_arguments() {
        let schema = schema();
        let code = BuilderGenerator::new(&schema).generate(schema.struct_def(StructId(1)));
        let expected = "pub fn create_vec3(\n    builder: &mut Builder,\n    x: f32,\n    y: f32,\n    z: f32,\n    test1: f64,\n    test2: i8,\n    test3_a: i16,\n    test3_b: i8,\n) -> UOffset {\n";
        assert!(code.contains(expected), "{code}");
    }

    #[test]
    fn test_keyword_builder_counts_deprecated_fields() {
        let schema = schema();
        let code = BuilderGenerator::new(&schema).generate(schema.struct_def(StructId(2)));
        assert_eq!(code.matches("builder.start_object(7)").count(), 2);
        assert!(!code.contains("friendly"));
    }

    #[test]
    fn test_keyword_builder_one_prepend_per_field() {
        let schema = schema();
        let code = BuilderGenerator::new(&schema).generate(schema.struct_def(StructId(2)));
        let create = &code[code.find("pub fn create_monster").expect("create")..];
        let create = &create[..create.find("\n}\n").expect("end")];

        assert_eq!(create.matches("if let Some(v) = args.").count(), 6);
        assert_eq!(create.matches("builder.prepend").count(), 6);
        assert!(create.contains("builder.prepend_struct_slot(0, v, 0)?;"));
        assert!(create.contains("builder.prepend_slot::<i16>(1, v, 150)?;"));
        assert!(create.contains("builder.prepend_uoffset_relative_slot(3, v, 0)?;"));
        assert!(create.contains("builder.prepend_slot::<bool>(6, v, false)?;"));
        assert!(create.contains(
            "let v = super::vec3::create_vec3(builder, v.0, v.1, v.2, v.3, v.4, v.5, v.6);"
        ));
    }

    #[test]
    fn test_args_struct() {
        let schema = schema();
        let code = BuilderGenerator::new(&schema).generate(schema.struct_def(StructId(2)));
        assert!(code.contains("pub struct MonsterArgs {"));
        assert!(code.contains("pub pos: Option<(f32, f32, f32, f64, i8, i16, i8)>,"));
        assert!(code.contains("pub mana: Option<i16>,"));
        assert!(code.contains("pub name: Option<UOffset>,"));
    }

    #[test]
    fn test_primitives_share_slot_prepend() {
        let schema = schema();
        let code = BuilderGenerator::new(&schema).generate(schema.struct_def(StructId(2)));
        assert!(code.contains("pub fn monster_start(builder: &mut Builder) -> Result<()> {"));
        assert!(code.contains(
            "pub fn monster_add_mana(builder: &mut Builder, mana: i16) -> Result<()> {\n    builder.prepend_slot::<i16>(1, mana, 150)\n}"
        ));
        assert!(code.contains(
            "pub fn monster_add_pos(builder: &mut Builder, pos: UOffset) -> Result<()> {\n    builder.prepend_struct_slot(0, pos, 0)\n}"
        ));
        assert!(code.contains(
            "pub fn monster_add_builder(builder: &mut Builder, builder_: bool) -> Result<()> {"
        ));
        assert!(code.contains("pub fn monster_end(builder: &mut Builder) -> Result<UOffset> {"));
    }

    #[test]
    fn test_vector_start_uses_element_layout() {
        let schema = schema();
        let code = BuilderGenerator::new(&schema).generate(schema.struct_def(StructId(2)));
        assert!(code.contains("builder.start_vector(1, num_elems, 1)"));
        // Vector of Test structs: 4 bytes each, aligned to 2.
        assert!(code.contains("pub fn monster_start_test4_vector("));
        assert!(code.contains("builder.start_vector(4, num_elems, 2)"));
        assert!(!code.contains("monster_start_name_vector"));
    }

    /// `Mat4 { m00 .. m33: float }` and `Holder { transform: Mat4 }`.
    fn wide_struct_schema() -> Schema {
        let ns = Namespace::from_dotted("Sample");
        let mut schema = Schema::new();

        let mut mat4 = StructDef::fixed("Mat4", ns.clone(), 64, 4);
        for i in 0..16 {
            let name = format!("m{}{}", i / 4, i % 4);
            mat4.add_field(FieldDef::new(name, ScalarType::Float.into(), i * 4));
        }
        let mat4_id = schema.add_struct(mat4);

        let mut holder = StructDef::table("Holder", ns);
        holder.add_field(FieldDef::in_slot("transform", Type::Struct(mat4_id), 0));
        schema.add_struct(holder);
        schema
    }

    #[test]
    fn test_wide_struct_gets_named_args() {
        let schema = wide_struct_schema();
        let generator = BuilderGenerator::new(&schema);

        let mat4 = generator.generate(schema.struct_def(StructId(0)));
        assert!(mat4.contains(
            "#[derive(Debug, Clone, Copy, Default, PartialEq)]\npub struct Mat4Args {\n    pub m00: f32,\n"
        ));
        assert!(mat4.contains("    pub m33: f32,\n}"));
        assert_eq!(mat4.matches(": f32,").count(), 32);

        let holder = generator.generate(schema.struct_def(StructId(1)));
        assert!(holder.contains("pub transform: Option<super::mat4::Mat4Args>,"));
        assert!(holder.contains(
            "let v = super::mat4::create_mat4(builder, v.m00, v.m01, v.m02, v.m03, v.m10,"
        ));
        assert!(holder.contains("v.m32, v.m33);"));
        assert!(!holder.contains("v.15"));
    }

    #[test]
    fn test_narrow_struct_keeps_tuple_args() {
        let schema = schema();
        let code = BuilderGenerator::new(&schema).generate(schema.struct_def(StructId(1)));
        assert!(!code.contains("Vec3Args"));
    }

    #[test]
    fn test_table_named_after_runtime_item() {
        let mut schema = Schema::new();
        let mut table = StructDef::table("Result", Namespace::default());
        table.add_field(FieldDef::in_slot("name", Type::String, 0));
        schema.add_struct(table);

        let code = BuilderGenerator::new(&schema).generate(schema.struct_def(StructId(0)));
        assert!(code.contains(
            "pub fn create_result(builder: &mut Builder, args: &ResultArgs) -> FbResult<UOffset> {"
        ));
        assert!(code.contains("pub fn result_start(builder: &mut Builder) -> FbResult<()> {"));
        assert!(code.contains(
            "pub fn result_add_name(builder: &mut Builder, name: UOffset) -> FbResult<()> {"
        ));
        assert!(!code.contains("-> Result<"));
    }
}

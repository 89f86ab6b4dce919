//! Emission driver.
//!
//! Walks the schema's enums, then its structs and tables, turns each into a
//! [`GeneratedEntity`] and hands it to an [`EntityWriter`]. Entities flagged
//! as already generated, or already emitted by this generator, are skipped.

use std::collections::HashSet;

use ironfb_schema::{EnumId, Schema, StructId};

use crate::error::CodegenError;
use crate::options::GeneratorOptions;
use crate::rust::{EnumGenerator, StructGenerator, file_header};
use crate::writer::{EntityWriter, GeneratedEntity};

/// Identity of a schema entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityId {
    /// An enum or union.
    Enum(EnumId),
    /// A struct or table.
    Struct(StructId),
}

/// Counts from one generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Enums written.
    pub enums: usize,
    /// Structs and tables written.
    pub structs: usize,
    /// Entities skipped as already generated.
    pub skipped: usize,
}

/// Main code generator that coordinates all generation.
pub struct Generator<'a> {
    schema: &'a Schema,
    options: GeneratorOptions,
    processed: HashSet<EntityId>,
}

impl<'a> Generator<'a> {
    /// Creates a new generator with default options.
    #[must_use]
    pub fn new(schema: &'a Schema) -> Self {
        Self::with_options(schema, GeneratorOptions::default())
    }

    /// Creates a new generator with the given options.
    ///
    /// Entities the schema flags as generated start out processed.
    #[must_use]
    pub fn with_options(schema: &'a Schema, options: GeneratorOptions) -> Self {
        let enums = schema
            .enums
            .iter()
            .enumerate()
            .filter(|(_, def)| def.generated)
            .map(|(i, _)| EntityId::Enum(EnumId(i)));
        let structs = schema
            .structs
            .iter()
            .enumerate()
            .filter(|(_, def)| def.generated)
            .map(|(i, _)| EntityId::Struct(StructId(i)));

        Self {
            schema,
            options,
            processed: enums.chain(structs).collect(),
        }
    }

    /// Returns the options in use.
    #[must_use]
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Returns true if `id` will not be emitted again.
    #[must_use]
    pub fn is_processed(&self, id: EntityId) -> bool {
        self.processed.contains(&id)
    }

    /// Generates every pending entity into `writer`.
    ///
    /// Stops at the first entity the writer fails to save. Entities saved
    /// before the failure stay saved and are not retried by a later call.
    ///
    /// # Errors
    /// Returns [`CodegenError::Save`] for the first failed entity.
    pub fn generate<W: EntityWriter + ?Sized>(
        &mut self,
        writer: &mut W,
    ) -> Result<GenerationSummary, CodegenError> {
        let mut summary = GenerationSummary::default();

        for i in 0..self.schema.enums.len() {
            let id = EntityId::Enum(EnumId(i));
            if self.skip(id) {
                summary.skipped += 1;
                continue;
            }
            let entity = self.generate_enum(EnumId(i));
            self.save(id, &entity, writer)?;
            summary.enums += 1;
        }

        for i in 0..self.schema.structs.len() {
            let id = EntityId::Struct(StructId(i));
            if self.skip(id) {
                summary.skipped += 1;
                continue;
            }
            let entity = self.generate_struct(StructId(i));
            self.save(id, &entity, writer)?;
            summary.structs += 1;
        }

        tracing::info!(
            "Generated {} enums and {} structs ({} skipped)",
            summary.enums,
            summary.structs,
            summary.skipped
        );
        Ok(summary)
    }

    /// Generates the module of one enum.
    #[must_use]
    pub fn generate_enum(&self, id: EnumId) -> GeneratedEntity {
        let def = self.schema.enum_def(id);
        let mut code = file_header(&def.namespace);
        code.push_str(&EnumGenerator::new(&self.options).generate(def));
        GeneratedEntity::new(def.name.clone(), def.namespace.clone(), code)
    }

    /// Generates the module of one struct or table.
    #[must_use]
    pub fn generate_struct(&self, id: StructId) -> GeneratedEntity {
        let def = self.schema.struct_def(id);
        let mut code = file_header(&def.namespace);
        code.push_str(&StructGenerator::new(self.schema, &self.options).generate(id));
        GeneratedEntity::new(def.name.clone(), def.namespace.clone(), code)
    }

    fn skip(&self, id: EntityId) -> bool {
        let skipped = self.processed.contains(&id);
        if skipped {
            tracing::trace!("Skipping already generated {:?}", id);
        }
        skipped
    }

    fn save<W: EntityWriter + ?Sized>(
        &mut self,
        id: EntityId,
        entity: &GeneratedEntity,
        writer: &mut W,
    ) -> Result<(), CodegenError> {
        let name = entity.qualified_name();
        if let Err(source) = writer.save(entity) {
            tracing::error!("Failed to save {}: {}", name, source);
            return Err(CodegenError::Save {
                entity: name,
                source,
            });
        }
        tracing::debug!("Generated {} ({} bytes)", name, entity.code.len());
        self.processed.insert(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WriteError;
    use crate::writer::MemoryWriter;
    use ironfb_schema::{EnumDef, EnumVal, FieldDef, Namespace, ScalarType, StructDef, Type};

    fn schema() -> Schema {
        let ns = Namespace::from_dotted("MyGame.Example");
        let mut schema = Schema::new();

        let mut color = EnumDef::new("Color", ns.clone(), ScalarType::Int8);
        color.add_value(EnumVal::new("Red", 1));
        schema.add_enum(color);

        let mut vec3 = StructDef::fixed("Vec3", ns.clone(), 12, 4);
        vec3.add_field(FieldDef::new("x", ScalarType::Float.into(), 0));
        vec3.add_field(FieldDef::new("y", ScalarType::Float.into(), 4));
        vec3.add_field(FieldDef::new("z", ScalarType::Float.into(), 8));
        let vec3_id = schema.add_struct(vec3);

        let mut monster = StructDef::table("Monster", ns);
        monster.add_field(FieldDef::in_slot("pos", Type::Struct(vec3_id), 0));
        monster.add_field(FieldDef::in_slot("name", Type::String, 1));
        let monster_id = schema.add_struct(monster);
        schema.set_root_type(monster_id);
        schema
    }

    /// Accepts a fixed number of entities, then fails.
    struct FailingWriter {
        remaining: usize,
        saved: Vec<String>,
    }

    impl EntityWriter for FailingWriter {
        fn save(&mut self, entity: &GeneratedEntity) -> Result<(), WriteError> {
            if self.remaining == 0 {
                return Err(WriteError::Rejected {
                    message: "disk full".to_string(),
                });
            }
            self.remaining -= 1;
            self.saved.push(entity.name.clone());
            Ok(())
        }
    }

    #[test]
    fn test_generates_every_entity() {
        let schema = schema();
        let mut writer = MemoryWriter::new();
        let summary = Generator::new(&schema).generate(&mut writer).expect("generate");

        assert_eq!(
            summary,
            GenerationSummary {
                enums: 1,
                structs: 2,
                skipped: 0
            }
        );
        let monster = writer
            .code(&["my_game", "example", "monster"])
            .expect("monster");
        assert!(monster.starts_with(
            "// automatically generated, do not modify\n\n// namespace: MyGame.Example\n\n"
        ));
        assert!(writer.code(&["my_game", "example", "color"]).is_some());
    }

    #[test]
    fn test_generated_code_parses() {
        let schema = schema();
        let mut writer = MemoryWriter::new();
        Generator::new(&schema).generate(&mut writer).expect("generate");

        for (path, content) in writer.files() {
            if let Err(err) = syn::parse_file(&content) {
                panic!("{path} does not parse: {err}\n{content}");
            }
        }
    }

    #[test]
    fn test_skips_flagged_entities() {
        let mut schema = schema();
        schema.enums[0].generated = true;
        schema.structs[0].generated = true;

        let mut writer = MemoryWriter::new();
        let mut generator = Generator::new(&schema);
        assert!(generator.is_processed(EntityId::Enum(EnumId(0))));
        let summary = generator.generate(&mut writer).expect("generate");

        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.structs, 1);
        assert_eq!(writer.len(), 1);
        // The model itself is left untouched.
        assert!(!schema.structs[1].generated);
    }

    #[test]
    fn test_second_run_emits_nothing() {
        let schema = schema();
        let mut generator = Generator::new(&schema);
        let mut first = MemoryWriter::new();
        generator.generate(&mut first).expect("first");

        let mut second = MemoryWriter::new();
        let summary = generator.generate(&mut second).expect("second");
        assert_eq!(summary.skipped, 3);
        assert!(second.is_empty());
    }

    #[test]
    fn test_stops_at_first_failure() {
        let schema = schema();
        let mut writer = FailingWriter {
            remaining: 1,
            saved: Vec::new(),
        };
        let mut generator = Generator::new(&schema);
        let err = generator.generate(&mut writer).unwrap_err();

        match err {
            CodegenError::Save { entity, source } => {
                assert_eq!(entity, "MyGame.Example.Vec3");
                assert_eq!(
                    source,
                    WriteError::Rejected {
                        message: "disk full".to_string()
                    }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(writer.saved, vec!["Color"]);
        assert!(!generator.is_processed(EntityId::Struct(StructId(1))));
    }

    #[test]
    fn test_writer_trait_object() {
        let schema = schema();
        let mut memory = MemoryWriter::new();
        let writer: &mut dyn EntityWriter = &mut memory;
        Generator::new(&schema).generate(writer).expect("generate");
        assert_eq!(memory.len(), 3);
    }
}

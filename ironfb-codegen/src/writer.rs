//! Hand-off of generated entities to the packaging layer.
//!
//! The generator never touches the filesystem. Each finished entity is given
//! to an [`EntityWriter`], which decides where it goes. [`MemoryWriter`]
//! keeps everything in memory, laid out as one module level per namespace
//! component with a `mod.rs` at each level and one file per entity.

use std::collections::{BTreeMap, BTreeSet};

use ironfb_schema::Namespace;

use crate::error::WriteError;
use crate::rust::imports::module_path;

/// Marker line at the top of generated `mod.rs` files.
const MOD_HEADER: &str = "// automatically generated, do not modify\n\n";

/// Generated source of one schema entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedEntity {
    /// Entity name as declared in the schema.
    pub name: String,
    /// Enclosing namespace.
    pub namespace: Namespace,
    /// Complete module source.
    pub code: String,
}

impl GeneratedEntity {
    /// Creates a new generated entity.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: Namespace, code: String) -> Self {
        Self {
            name: name.into(),
            namespace,
            code,
        }
    }

    /// Returns the module path the entity is written to.
    #[must_use]
    pub fn module_path(&self) -> Vec<String> {
        module_path(&self.namespace, &self.name)
    }

    /// Returns the dotted schema name, e.g. `MyGame.Example.Monster`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

/// Receives generated entities one at a time.
pub trait EntityWriter {
    /// Stores one entity.
    ///
    /// # Errors
    /// Returns an error if the entity cannot be stored. The generator stops
    /// at the first error.
    fn save(&mut self, entity: &GeneratedEntity) -> Result<(), WriteError>;
}

impl<W: EntityWriter + ?Sized> EntityWriter for &mut W {
    fn save(&mut self, entity: &GeneratedEntity) -> Result<(), WriteError> {
        (**self).save(entity)
    }
}

/// In-memory module tree of generated entities.
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    /// Child module names of every namespace level, keyed by level path.
    levels: BTreeMap<Vec<String>, BTreeSet<String>>,
    /// Entity sources keyed by module path.
    entities: BTreeMap<Vec<String>, String>,
}

impl MemoryWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns the source stored at `path`, e.g. `["my_game", "monster"]`.
    #[must_use]
    pub fn code(&self, path: &[&str]) -> Option<&str> {
        let key: Vec<String> = path.iter().map(|s| (*s).to_string()).collect();
        self.entities.get(&key).map(String::as_str)
    }

    /// Returns every file of the tree keyed by relative path.
    ///
    /// Each namespace level gets a `mod.rs` declaring its children; each
    /// entity gets `<module>.rs`.
    #[must_use]
    pub fn files(&self) -> BTreeMap<String, String> {
        let mut files = BTreeMap::new();

        for (level, children) in &self.levels {
            let mut content = String::from(MOD_HEADER);
            for child in children {
                content.push_str(&format!("pub mod {};\n", child));
            }
            files.insert(file_path(level, "mod.rs"), content);
        }

        for (path, code) in &self.entities {
            let (last, level) = match path.split_last() {
                Some(split) => split,
                None => continue,
            };
            let file = format!("{}.rs", last.trim_start_matches("r#"));
            files.insert(file_path(level, &file), code.clone());
        }

        files
    }

    /// Renders the whole tree as nested inline modules, suitable for
    /// `include!` from a build script's output.
    #[must_use]
    pub fn render_inline(&self) -> String {
        let mut output = String::new();
        self.render_level(&[], &mut output);
        output
    }

    fn render_level(&self, level: &[String], output: &mut String) {
        let Some(children) = self.levels.get(level) else {
            return;
        };
        for child in children {
            let mut path = level.to_vec();
            path.push(child.clone());

            output.push_str(&format!("pub mod {} {{\n", child));
            if let Some(code) = self.entities.get(&path) {
                output.push_str(code);
            } else {
                self.render_level(&path, output);
            }
            output.push_str("}\n\n");
        }
    }
}

impl EntityWriter for MemoryWriter {
    fn save(&mut self, entity: &GeneratedEntity) -> Result<(), WriteError> {
        let path = entity.module_path();

        // A module is either an entity or a namespace level, never both.
        let clash = self.entities.contains_key(&path)
            || self.levels.contains_key(&path)
            || (1..path.len()).any(|i| self.entities.contains_key(&path[..i]));
        if clash {
            return Err(WriteError::DuplicateModule {
                path: path.join("::"),
            });
        }

        for i in 0..path.len() {
            self.levels
                .entry(path[..i].to_vec())
                .or_default()
                .insert(path[i].clone());
        }
        self.entities.insert(path, entity.code.clone());
        Ok(())
    }
}

fn file_path(level: &[String], file: &str) -> String {
    level
        .iter()
        .map(|c| c.trim_start_matches("r#"))
        .chain(std::iter::once(file))
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(ns: &str, name: &str) -> GeneratedEntity {
        GeneratedEntity::new(
            name,
            Namespace::from_dotted(ns),
            format!("pub struct {};\n", name),
        )
    }

    #[test]
    fn test_files_layout() {
        let mut writer = MemoryWriter::new();
        writer.save(&entity("MyGame.Example", "Monster")).expect("save");
        writer.save(&entity("MyGame.Example", "Vec3")).expect("save");
        writer.save(&entity("MyGame", "InParentNamespace")).expect("save");

        let files = writer.files();
        let paths: Vec<&str> = files.keys().map(String::as_str).collect();
        assert_eq!(
            paths,
            vec![
                "mod.rs",
                "my_game/example/mod.rs",
                "my_game/example/monster.rs",
                "my_game/example/vec3.rs",
                "my_game/in_parent_namespace.rs",
                "my_game/mod.rs",
            ]
        );
        assert_eq!(
            files["my_game/mod.rs"],
            "// automatically generated, do not modify\n\npub mod example;\npub mod in_parent_namespace;\n"
        );
        assert_eq!(files["my_game/example/vec3.rs"], "pub struct Vec3;\n");
        assert_eq!(writer.len(), 3);
    }

    #[test]
    fn test_duplicate_module_is_rejected() {
        let mut writer = MemoryWriter::new();
        writer.save(&entity("A", "Thing")).expect("save");
        let err = writer.save(&entity("A", "Thing")).unwrap_err();
        assert_eq!(
            err,
            WriteError::DuplicateModule {
                path: "a::thing".to_string()
            }
        );

        // An entity module cannot double as a namespace level.
        writer.save(&entity("", "B")).expect("save");
        assert!(writer.save(&entity("B", "Inner")).is_err());
        assert!(writer.save(&entity("", "A")).is_err());
    }

    #[test]
    fn test_render_inline() {
        let mut writer = MemoryWriter::new();
        writer.save(&entity("MyGame.Example", "Monster")).expect("save");
        writer.save(&entity("", "Root")).expect("save");

        let rendered = writer.render_inline();
        assert_eq!(
            rendered,
            "pub mod my_game {\npub mod example {\npub mod monster {\npub struct Monster;\n}\n\n}\n\n}\n\npub mod root {\npub struct Root;\n}\n\n"
        );
        let parsed: syn::File = syn::parse_str(&rendered).expect("valid Rust");
        assert_eq!(parsed.items.len(), 2);
    }

    #[test]
    fn test_code_lookup_and_keyword_module() {
        let mut writer = MemoryWriter::new();
        writer.save(&entity("", "Type")).expect("save");
        assert_eq!(writer.code(&["r#type"]), Some("pub struct Type;\n"));
        assert!(writer.files().contains_key("type.rs"));
        assert!(writer.code(&["missing"]).is_none());
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(entity("MyGame.Example", "Monster").qualified_name(), "MyGame.Example.Monster");
        assert_eq!(entity("", "Root").qualified_name(), "Root");
    }
}

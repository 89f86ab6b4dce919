//! Namespace to module mapping and relative type references.
//!
//! Every entity lives in its own module, nested under one module per
//! namespace component: `MyGame.Example.Monster` becomes
//! `my_game::example::monster::Monster`. The writer lays files out with the
//! same mapping, so a reference computed here always resolves.

use ironfb_schema::{Namespace, Schema, StructId, to_snake_case};

use crate::rust::types::rust_ident;

/// Returns the module name of a namespace component.
#[must_use]
pub fn namespace_module(component: &str) -> String {
    rust_ident(&to_snake_case(component))
}

/// Returns the module name of an entity.
#[must_use]
pub fn entity_module(name: &str) -> String {
    rust_ident(&to_snake_case(name))
}

/// Returns the full module path of an entity, outermost first.
#[must_use]
pub fn module_path(namespace: &Namespace, name: &str) -> Vec<String> {
    namespace
        .components
        .iter()
        .map(|c| namespace_module(c))
        .chain(std::iter::once(entity_module(name)))
        .collect()
}

/// Computes the path from inside an entity module in `current` to the type
/// `type_name` defined in namespace `target`.
///
/// The walk strips the longest common prefix, climbs one `super` per
/// remaining component of `current` plus one to leave the entity's own
/// module, then descends through the remaining components of `target`.
///
/// # Arguments
/// * `current` - Namespace of the entity being emitted
/// * `target` - Namespace of the referenced entity
/// * `type_name` - Name of the referenced entity
#[must_use]
pub fn relative_path(current: &Namespace, target: &Namespace, type_name: &str) -> String {
    let common = current
        .components
        .iter()
        .zip(&target.components)
        .take_while(|(a, b)| a == b)
        .count();

    let ascend = current.components.len() - common + 1;
    let mut segments: Vec<String> = Vec::with_capacity(ascend + 2);
    segments.extend(std::iter::repeat_n("super".to_string(), ascend));
    segments.extend(target.components[common..].iter().map(|c| namespace_module(c)));
    segments.push(entity_module(type_name));
    segments.push(type_name.to_string());
    segments.join("::")
}

/// Returns the path of struct `id` as seen from an entity in `current`.
#[must_use]
pub fn struct_path(schema: &Schema, current: &Namespace, id: StructId) -> String {
    let def = schema.struct_def(id);
    relative_path(current, &def.namespace, &def.name)
}

/// Returns the path of the positional builder of fixed struct `id`.
#[must_use]
pub fn struct_create_path(schema: &Schema, current: &Namespace, id: StructId) -> String {
    let def = schema.struct_def(id);
    let type_path = relative_path(current, &def.namespace, &def.name);
    match type_path.rsplit_once("::") {
        Some((module, _)) => format!("{}::create_{}", module, to_snake_case(&def.name)),
        None => format!("create_{}", to_snake_case(&def.name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_namespace() {
        let ns = Namespace::from_dotted("MyGame.Example");
        assert_eq!(relative_path(&ns, &ns, "Vec3"), "super::vec3::Vec3");
    }

    #[test]
    fn test_sibling_branch() {
        let current = Namespace::from_dotted("a.b.c");
        let target = Namespace::from_dotted("a.b.d.e");
        // One `super` leaves the entity module, one leaves `c`.
        assert_eq!(
            relative_path(&current, &target, "Thing"),
            "super::super::d::e::thing::Thing"
        );
    }

    #[test]
    fn test_parent_and_child_namespaces() {
        let parent = Namespace::from_dotted("MyGame");
        let child = Namespace::from_dotted("MyGame.Example");
        assert_eq!(
            relative_path(&child, &parent, "InParentNamespace"),
            "super::super::in_parent_namespace::InParentNamespace"
        );
        assert_eq!(
            relative_path(&parent, &child, "Monster"),
            "super::example::monster::Monster"
        );
    }

    #[test]
    fn test_disjoint_and_root_namespaces() {
        let current = Namespace::from_dotted("MyGame.Example2");
        let target = Namespace::from_dotted("Other");
        assert_eq!(
            relative_path(&current, &target, "Thing"),
            "super::super::super::other::thing::Thing"
        );
        assert_eq!(
            relative_path(&Namespace::default(), &Namespace::default(), "Root"),
            "super::root::Root"
        );
    }

    #[test]
    fn test_module_path() {
        let ns = Namespace::from_dotted("MyGame.Example");
        assert_eq!(
            module_path(&ns, "TestSimpleTableWithEnum"),
            vec!["my_game", "example", "test_simple_table_with_enum"]
        );
        assert_eq!(module_path(&Namespace::default(), "Type"), vec!["r#type"]);
    }
}

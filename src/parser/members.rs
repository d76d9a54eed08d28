//! Member property extraction for Swift `let`/`var` bindings.
//!
//! A `property_declaration` may bind several patterns at once
//! (`var a: Int, b = 2`). Each identifier pattern becomes one
//! [`MemberProperty`] whose type follows a fixed policy:
//!
//! | Annotation        | Recorded type |
//! |-------------------|---------------|
//! | `: Int`           | `Int`         |
//! | `: Swift.Int`     | `Swift.Int`   |
//! | `: Int?`          | `Int?`        |
//! | none, or any other shape (`[Int]`, `Int!`, `Int??`, closures) | `_` |

use tree_sitter::Node;

use crate::symbols::MemberProperty;

use super::text::{child_by_kind, node_text};

/// Type recorded when no named type is written and inference would be needed.
pub const INFERRED_TYPE: &str = "_";

/// Suffix appended to the wrapped name of an optional type.
pub const OPTIONAL_MARKER: &str = "?";

/// Node kinds whose direct `let`/`var` children are members of a type.
const TYPE_BODIES: &[&str] = &["class_body", "protocol_body", "enum_class_body"];

/// Whether `node` is a binding declared directly in a type body, as opposed
/// to a local inside a function or a top-level global.
pub fn is_member_binding(node: &Node) -> bool {
    node.parent()
        .is_some_and(|parent| TYPE_BODIES.contains(&parent.kind()))
}

/// Extract one property per identifier pattern in a binding declaration.
///
/// Each pattern is paired with the first `type_annotation` that follows it
/// and precedes the next pattern.
pub fn collect_bindings(node: &Node, src: &[u8]) -> Vec<MemberProperty> {
    let access_control = access_control(node, src);
    let mut properties = Vec::new();
    let mut pending: Option<String> = None;

    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            if cursor.field_name() == Some("name") || child.kind() == "pattern" {
                if let Some(name) = pending.take() {
                    properties.push(property(&access_control, name, None, src));
                }
                pending = bound_name(&child, src);
            } else if child.kind() == "type_annotation" {
                if let Some(name) = pending.take() {
                    properties.push(property(&access_control, name, Some(child), src));
                }
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }

    if let Some(name) = pending {
        properties.push(property(&access_control, name, None, src));
    }

    properties
}

fn property(
    access_control: &str,
    name: String,
    annotation: Option<Node>,
    src: &[u8],
) -> MemberProperty {
    let type_name = annotation
        .filter(|a| !is_implicitly_unwrapped(a))
        .and_then(|a| annotated_type(&a))
        .map(|ty| resolve_type(&ty, src))
        .unwrap_or_else(|| INFERRED_TYPE.to_string());

    MemberProperty {
        access_control: access_control.to_string(),
        name,
        type_name,
    }
}

/// The identifier bound by a pattern, or `None` for tuple/wildcard patterns.
fn bound_name(pattern: &Node, src: &[u8]) -> Option<String> {
    if pattern.kind() == "simple_identifier" {
        return Some(node_text(pattern, src));
    }
    if let Some(ident) = pattern.child_by_field_name("bound_identifier") {
        return Some(node_text(&ident, src));
    }
    if pattern.named_child_count() == 1 {
        let only = pattern.named_child(0)?;
        if only.kind() == "simple_identifier" {
            return Some(node_text(&only, src));
        }
    }
    None
}

/// `: Int!` carries its `!` as a token of the annotation, beside the type.
fn is_implicitly_unwrapped(annotation: &Node) -> bool {
    let mut cursor = annotation.walk();
    let result = annotation.children(&mut cursor).any(|c| c.kind() == "!");
    result
}

/// The type node inside a `type_annotation`, skipping leading type modifiers.
fn annotated_type<'tree>(annotation: &Node<'tree>) -> Option<Node<'tree>> {
    if let Some(ty) = annotation.child_by_field_name("type") {
        if ty.kind() != "type_modifiers" {
            return Some(ty);
        }
    }
    let mut cursor = annotation.walk();
    let result = annotation
        .named_children(&mut cursor)
        .find(|c| c.kind() != "type_modifiers");
    result
}

/// Resolve a written type to its recorded form.
///
/// Named types are kept verbatim. A single optional wrapping a named type
/// becomes the wrapped name plus [`OPTIONAL_MARKER`]. Everything else,
/// nested optionals (`Int??`) included, is [`INFERRED_TYPE`].
pub fn resolve_type(ty: &Node, src: &[u8]) -> String {
    match ty.kind() {
        "user_type" => node_text(ty, src),
        "optional_type" if optional_depth(ty) > 1 => INFERRED_TYPE.to_string(),
        "optional_type" => {
            let wrapped = ty
                .child_by_field_name("wrapped")
                .or_else(|| child_by_kind(ty, "user_type"));
            match wrapped {
                Some(inner) if inner.kind() == "user_type" => {
                    format!("{}{}", node_text(&inner, src), OPTIONAL_MARKER)
                }
                _ => INFERRED_TYPE.to_string(),
            }
        }
        _ => INFERRED_TYPE.to_string(),
    }
}

/// Number of `?` suffixes on an optional type; `Int??` is a single node
/// with two of them.
fn optional_depth(ty: &Node) -> usize {
    let mut cursor = ty.walk();
    let count = ty.children(&mut cursor).filter(|c| c.kind() == "?").count();
    count
}

/// Visibility modifier text (`private`, `public(set)`, ...) or empty.
fn access_control(node: &Node, src: &[u8]) -> String {
    child_by_kind(node, "modifiers")
        .and_then(|modifiers| child_by_kind(&modifiers, "visibility_modifier"))
        .map(|v| node_text(&v, src))
        .unwrap_or_default()
}

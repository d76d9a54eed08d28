use tree_sitter::Node;

/// Source text covered by `node`, trimmed. Empty for MISSING nodes or
/// invalid UTF-8.
pub fn node_text(node: &Node, src: &[u8]) -> String {
    node.utf8_text(src)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Text of the child in `field`, or empty when the parser could not recover one.
pub fn field_text(node: &Node, field: &str, src: &[u8]) -> String {
    node.child_by_field_name(field)
        .map(|n| node_text(&n, src))
        .unwrap_or_default()
}

/// Trimmed source from the first child in `field` to the end of the last one.
///
/// A field over a hidden rule (Swift's `_type`) can tag several siblings, e.g.
/// the `type_modifiers` and the function type of `@Sendable () -> Void`.
pub fn field_span_text(node: &Node, field: &str, src: &[u8]) -> String {
    let mut cursor = node.walk();
    let mut tagged = node.children_by_field_name(field, &mut cursor);
    let Some(first) = tagged.next() else {
        return String::new();
    };
    let last = tagged.last().unwrap_or(first);

    src.get(first.start_byte()..last.end_byte())
        .and_then(|bytes| std::str::from_utf8(bytes).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Find the first direct child of `node` whose `kind()` matches `kind`.
pub fn child_by_kind<'tree>(node: &Node<'tree>, kind: &str) -> Option<Node<'tree>> {
    let mut cursor = node.walk();
    let result = node.children(&mut cursor).find(|c| c.kind() == kind);
    result
}

/// Trimmed text of every `inheritance_specifier` directly under `node`, in
/// declaration order. Empty when there is no inheritance clause.
pub fn inherited_types(node: &Node, src: &[u8]) -> Vec<String> {
    let mut cursor = node.walk();
    let result = node
        .children(&mut cursor)
        .filter(|c| c.kind() == "inheritance_specifier")
        .map(|c| node_text(&c, src))
        .collect();
    result
}

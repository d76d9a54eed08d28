//! Swift symbol extractor using tree-sitter.
//!
//! ## How it works
//!
//! 1. The source is fed to tree-sitter-swift, which always produces a concrete
//!    syntax tree, with ERROR nodes where the input does not parse.
//! 2. [`SymbolWalker`] visits every node of that tree in pre-order. Nodes that
//!    introduce a declaration open a scope frame before their children are
//!    visited and close it afterwards, turning the frame into a [`Symbol`]
//!    that is appended to the enclosing frame.
//! 3. `let`/`var` bindings found directly in a type body are recorded as
//!    [`MemberProperty`](crate::symbols::MemberProperty) values on the
//!    innermost open frame.
//!
//! ## Supported Swift constructs
//!
//! | Construct                       | Node                                   | Symbol            |
//! |---------------------------------|----------------------------------------|-------------------|
//! | `class` / `struct` / `actor`    | `class_declaration`                    | `Class` / `Struct` / `Actor` |
//! | `enum`, `indirect enum`         | `class_declaration` (kind `enum`)      | `Enum`            |
//! | `extension`                     | `class_declaration` (kind `extension`) | `Extension`       |
//! | `protocol`                      | `protocol_declaration`                 | `Protocol`        |
//! | `case a, b(Int)`                | `enum_entry`                           | `EnumCase` + one `EnumCaseElement` per name |
//! | `typealias A = B`               | `typealias_declaration`                | `Typealias`       |
//! | `let` / `var` members           | `property_declaration`                 | property of the enclosing type |

use std::path::Path;

use color_eyre::eyre::{eyre, WrapErr};
use tracing::{debug, trace};
use tree_sitter::{Node, Parser};

use crate::symbols::{
    EnumCase, EnumCaseElement, EnumDecl, Extension, FileSymbols, Symbol, TypeDecl, Typealias,
};

use super::members::{collect_bindings, is_member_binding};
use super::scope::{Frame, ScopeStack};
use super::text::{field_span_text, field_text, inherited_types, node_text};
use super::LanguageParser;

/// Parser for Swift (`.swift`) source files.
pub struct SwiftParser {
    _private: (),
}

impl SwiftParser {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for SwiftParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageParser for SwiftParser {
    fn extensions(&self) -> &[&str] {
        &["swift"]
    }

    fn parse_file(&self, path: &Path, source: &str) -> color_eyre::Result<FileSymbols> {
        let symbols =
            parse(source).wrap_err_with(|| format!("Failed to parse {}", path.display()))?;
        let total_lines = source.lines().count();

        debug!(path = %path.display(), symbols = symbols.len(), "parsed swift file");

        Ok(FileSymbols {
            file_path: path.to_path_buf(),
            symbols,
            total_lines,
        })
    }
}

/// Parse Swift source into its top-level symbols, each carrying its nested
/// declarations as children.
///
/// Never rejects input: unparsable fragments just contribute no symbols.
/// Errors only come from the grammar failing to load.
pub fn parse(source: &str) -> color_eyre::Result<Vec<Symbol>> {
    let mut parser = Parser::new();
    let language = tree_sitter_swift::LANGUAGE;
    parser
        .set_language(&language.into())
        .map_err(|e| eyre!("Failed to set language: {}", e))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| eyre!("tree-sitter returned no tree"))?;

    Ok(SymbolWalker::new(source.as_bytes()).walk(tree.root_node()))
}

/// Single-use traversal state: one walker per parsed tree.
struct SymbolWalker<'src> {
    src: &'src [u8],
    scopes: ScopeStack,
}

impl<'src> SymbolWalker<'src> {
    fn new(src: &'src [u8]) -> Self {
        Self {
            src,
            scopes: ScopeStack::new(),
        }
    }

    fn walk(mut self, root: Node) -> Vec<Symbol> {
        self.visit(root);
        self.scopes.into_root()
    }

    /// Dispatch on node kind. Unrecognized nodes, ERROR nodes included, are
    /// descended into so declarations below them are still found.
    fn visit(&mut self, node: Node) {
        match node.kind() {
            "class_declaration" => self.visit_class_declaration(node),
            "protocol_declaration" => {
                let name = field_text(&node, "name", self.src);
                let inherited = inherited_types(&node, self.src);
                self.scoped(
                    |w| w.visit_children(node),
                    move |frame| Symbol::Protocol(type_decl(name, inherited, frame)),
                );
            }
            "typealias_declaration" => {
                let name = field_text(&node, "name", self.src);
                let existing_type = field_span_text(&node, "value", self.src);
                self.scoped(
                    |w| w.visit_children(node),
                    move |_| Symbol::Typealias(Typealias { name, existing_type }),
                );
            }
            "enum_entry" => self.visit_enum_entry(node),
            "property_declaration" | "protocol_property_declaration" => {
                self.visit_children(node);
                if is_member_binding(&node) {
                    for property in collect_bindings(&node, self.src) {
                        debug!(name = %property.name, ty = %property.type_name, "member property");
                        self.scopes.add_property(property);
                    }
                }
            }
            _ => self.visit_children(node),
        }
    }

    fn visit_children(&mut self, node: Node) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child);
        }
    }

    /// Class, struct, actor, enum and extension all share one grammar node and
    /// differ by their `declaration_kind` keyword.
    fn visit_class_declaration(&mut self, node: Node) {
        let Some(keyword) = declaration_kind(&node) else {
            self.visit_children(node);
            return;
        };

        let name = field_text(&node, "name", self.src);
        let inherited = inherited_types(&node, self.src);
        let build: Box<dyn FnOnce(Frame) -> Symbol> = match keyword {
            "class" => Box::new(move |f| Symbol::Class(type_decl(name, inherited, f))),
            "struct" => Box::new(move |f| Symbol::Struct(type_decl(name, inherited, f))),
            "actor" => Box::new(move |f| Symbol::Actor(type_decl(name, inherited, f))),
            "enum" => Box::new(move |f| {
                Symbol::Enum(EnumDecl {
                    name,
                    children: f.children,
                    inherited_types: inherited,
                })
            }),
            _ => Box::new(move |f| {
                Symbol::Extension(Extension {
                    name,
                    children: f.children,
                    inherited_types: inherited,
                })
            }),
        };

        self.scoped(|w| w.visit_children(node), build);
    }

    /// `case x, y(Int)` opens one case scope holding an element scope per name.
    fn visit_enum_entry(&mut self, node: Node) {
        self.scoped(
            |w| {
                let mut cursor = node.walk();
                if !cursor.goto_first_child() {
                    return;
                }
                loop {
                    let child = cursor.node();
                    if cursor.field_name() == Some("name") {
                        let name = node_text(&child, w.src);
                        w.scoped(
                            |w| w.visit_children(child),
                            move |f| {
                                Symbol::EnumCaseElement(EnumCaseElement {
                                    name,
                                    children: f.children,
                                })
                            },
                        );
                    } else {
                        w.visit(child);
                    }
                    if !cursor.goto_next_sibling() {
                        break;
                    }
                }
            },
            |f| Symbol::EnumCase(EnumCase { children: f.children }),
        );
    }

    /// Open a scope, run `visit` inside it, then close it with `build`.
    ///
    /// Every declaration goes through here, so pushes and pops stay paired.
    fn scoped(&mut self, visit: impl FnOnce(&mut Self), build: impl FnOnce(Frame) -> Symbol) {
        self.scopes.push();
        trace!(depth = self.scopes.depth(), "open scope");
        visit(self);
        self.scopes.pop_and_finalize(|frame| {
            let symbol = build(frame);
            trace!(kind = %symbol.kind(), name = symbol.name().unwrap_or_default(), "close scope");
            symbol
        });
    }
}

fn type_decl(name: String, inherited_types: Vec<String>, frame: Frame) -> TypeDecl {
    TypeDecl {
        name,
        children: frame.children,
        inherited_types,
        properties: frame.properties,
    }
}

const DECLARATION_KEYWORDS: &[&str] = &["class", "struct", "actor", "enum", "extension"];

/// The keyword (`class`, `struct`, `actor`, `enum`, `extension`) that a
/// `class_declaration` was written with.
fn declaration_kind(node: &Node) -> Option<&'static str> {
    let keyword = |kind: &str| DECLARATION_KEYWORDS.iter().copied().find(|k| *k == kind);

    if let Some(field) = node.child_by_field_name("declaration_kind") {
        return keyword(field.kind());
    }
    let mut cursor = node.walk();
    let result = node
        .children(&mut cursor)
        .filter(|c| !c.is_named())
        .find_map(|c| keyword(c.kind()));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::flatten::Flatten;
    use crate::symbols::{MemberProperty, SymbolKind};

    /// Helper: parse Swift source and return the root symbols.
    fn parse(source: &str) -> Vec<Symbol> {
        let parser = SwiftParser::new();
        let result = parser
            .parse_file(Path::new("Test.swift"), source)
            .expect("parse failed");
        result.symbols
    }

    /// Helper: find a symbol by name in a flat list.
    fn find<'a>(symbols: &'a [Symbol], name: &str) -> &'a Symbol {
        symbols
            .iter()
            .find(|s| s.name() == Some(name))
            .unwrap_or_else(|| panic!("symbol '{name}' not found"))
    }

    fn of_kind(symbols: &[&Symbol], kind: SymbolKind) -> Vec<String> {
        symbols
            .iter()
            .filter(|s| s.kind() == kind)
            .filter_map(|s| s.name().map(str::to_string))
            .collect()
    }

    fn property_names(sym: &Symbol) -> Vec<&str> {
        sym.properties()
            .unwrap_or_default()
            .iter()
            .map(|p| p.name.as_str())
            .collect()
    }

    fn only_property(sym: &Symbol) -> &MemberProperty {
        let props = sym.properties().expect("symbol has no properties");
        assert_eq!(props.len(), 1, "expected exactly one property");
        &props[0]
    }

    // ---------------------------------------------------------------
    // Type-like declarations
    // ---------------------------------------------------------------

    #[test]
    fn empty_struct() {
        let syms = parse("struct MyStruct {\n}");
        assert_eq!(syms.len(), 1);
        assert_eq!(syms[0].kind(), SymbolKind::Struct);
        assert_eq!(syms[0].name(), Some("MyStruct"));
        assert!(syms[0].children().is_empty());
        assert!(syms[0].inherited_types().is_some_and(|t| t.is_empty()));
        assert!(syms[0].properties().is_some_and(|p| p.is_empty()));
    }

    #[test]
    fn generic_struct() {
        let syms = parse("struct MyStruct<T> where T: StringProtocol {\n}");
        assert_eq!(syms.len(), 1);
        assert_eq!(syms[0].name(), Some("MyStruct"));
        assert!(syms[0].inherited_types().is_some_and(|t| t.is_empty()));
    }

    #[test]
    fn inheriting_struct() {
        let syms = parse("struct MyStruct: Error, StringProtocol {\n}");
        assert_eq!(
            syms[0].inherited_types().unwrap(),
            ["Error", "StringProtocol"]
        );
    }

    #[test]
    fn inheritance_order_preserved() {
        let syms = parse("class C: A, B {}");
        assert_eq!(syms[0].inherited_types().unwrap(), ["A", "B"]);
    }

    #[test]
    fn class_with_qualified_superclass() {
        let syms = parse("class MyClass: OtherModule.OtherClass, MyProtocol {\n}");
        assert_eq!(syms[0].kind(), SymbolKind::Class);
        assert_eq!(
            syms[0].inherited_types().unwrap(),
            ["OtherModule.OtherClass", "MyProtocol"]
        );
    }

    #[test]
    fn actor_declarations() {
        let syms = parse("actor MyActor: Error, Sendable {\n}\nactor Plain<T> where T: StringProtocol {}");
        assert_eq!(syms.len(), 2);
        assert_eq!(syms[0].kind(), SymbolKind::Actor);
        assert_eq!(syms[0].inherited_types().unwrap(), ["Error", "Sendable"]);
        assert_eq!(find(&syms, "Plain").kind(), SymbolKind::Actor);
    }

    #[test]
    fn protocol_with_requirements() {
        let syms = parse("protocol MyProtocol {\n    func foo()\n    var text: String { get }\n}");
        assert_eq!(syms.len(), 1);
        assert_eq!(syms[0].kind(), SymbolKind::Protocol);
        assert_eq!(syms[0].name(), Some("MyProtocol"));
        assert!(syms[0].children().is_empty());
    }

    #[test]
    fn inheriting_protocol() {
        let syms = parse("protocol MyProtocol: Hashable, Error {}");
        assert_eq!(syms[0].inherited_types().unwrap(), ["Hashable", "Error"]);
    }

    // ---------------------------------------------------------------
    // Nesting
    // ---------------------------------------------------------------

    #[test]
    fn nested_structs_in_enum() {
        let syms = parse("enum MyEnum {\n  struct MyNestedStructA {}\n  struct MyNestedStructB {}\n}");
        let flat = syms.flattened();
        assert_eq!(flat.len(), 3);
        assert_eq!(flat[0].name(), Some("MyEnum"));
        assert_eq!(of_kind(&flat, SymbolKind::Struct), ["MyNestedStructA", "MyNestedStructB"]);
    }

    #[test]
    fn nested_classes_and_actors_in_enum() {
        let classes = parse("enum MyEnum {\n  class A {}\n  class B {}\n}");
        assert_eq!(classes.flattened().len(), 3);
        assert_eq!(of_kind(&classes.flattened(), SymbolKind::Class), ["A", "B"]);

        let actors = parse("enum MyEnum {\n  actor A {}\n  actor B {}\n}");
        assert_eq!(of_kind(&actors.flattened(), SymbolKind::Actor), ["A", "B"]);
    }

    #[test]
    fn nested_enum() {
        let syms = parse("enum MyEnum {\n    enum MyNestedEnum {\n        case a\n        case b\n    }\n}");
        assert_eq!(of_kind(&syms.flattened(), SymbolKind::Enum), ["MyEnum", "MyNestedEnum"]);
    }

    #[test]
    fn siblings_keep_source_order() {
        let syms = parse("struct B {}\nclass A {}\nenum C {}\ntypealias D = Int");
        let names: Vec<_> = syms.iter().filter_map(|s| s.name()).collect();
        assert_eq!(names, ["B", "A", "C", "D"]);
    }

    #[test]
    fn declaration_inside_method_belongs_to_type() {
        let syms = parse("struct Outer {\n    func make() {\n        struct Local {}\n    }\n}");
        assert_eq!(syms.len(), 1);
        assert_eq!(syms[0].children().len(), 1);
        assert_eq!(syms[0].children()[0].name(), Some("Local"));
    }

    // ---------------------------------------------------------------
    // Enums
    // ---------------------------------------------------------------

    #[test]
    fn enum_case_elements() {
        let source = "\
enum MyEnum {
    case x, y
    case a(number: Int, text: String)
    case b
    case c
}";
        let syms = parse(source);
        assert_eq!(syms.len(), 1);
        assert_eq!(syms[0].name(), Some("MyEnum"));

        let cases = syms[0].children();
        assert_eq!(cases.len(), 4);
        assert!(cases.iter().all(|c| c.kind() == SymbolKind::EnumCase));
        assert_eq!(cases[0].children().len(), 2);

        let elements = of_kind(&cases.flattened(), SymbolKind::EnumCaseElement);
        assert_eq!(elements, ["x", "y", "a", "b", "c"]);
    }

    #[test]
    fn combined_and_associated_cases() {
        let syms = parse("enum E {\n    case x, y\n    case a(number: Int, text: String)\n}");
        let elements = of_kind(&syms[0].children().flattened(), SymbolKind::EnumCaseElement);
        assert_eq!(elements, ["x", "y", "a"]);
    }

    #[test]
    fn generic_enum() {
        let syms = parse("enum MyEnum<T> where T: StringProtocol {\n    case x\n    case y(Array<T>)\n}");
        let elements = of_kind(&syms[0].children().flattened(), SymbolKind::EnumCaseElement);
        assert_eq!(elements, ["x", "y"]);
    }

    #[test]
    fn inheriting_enum() {
        let syms = parse("enum MyEnum: Error {\n    case x\n    case y\n}");
        assert_eq!(syms[0].kind(), SymbolKind::Enum);
        assert_eq!(syms[0].inherited_types().unwrap(), ["Error"]);
        assert!(syms[0].properties().is_none());
    }

    #[test]
    fn enum_elements_have_no_children() {
        let syms = parse("enum E { case a(Int), b(String) }");
        let flat = syms.flattened();
        assert!(flat
            .iter()
            .filter(|s| s.kind() == SymbolKind::EnumCaseElement)
            .all(|s| s.children().is_empty()));
    }

    // ---------------------------------------------------------------
    // Typealiases and extensions
    // ---------------------------------------------------------------

    #[test]
    fn typealias() {
        let syms = parse("typealias MyAlias = Int");
        let Symbol::Typealias(alias) = &syms[0] else {
            panic!("expected typealias, got {:?}", syms[0]);
        };
        assert_eq!(alias.name, "MyAlias");
        assert_eq!(alias.existing_type, "Int");
    }

    #[test]
    fn typealias_with_composite_type() {
        let syms = parse("typealias MyAlias = StringProtocol & View");
        let Symbol::Typealias(alias) = &syms[0] else {
            panic!("expected typealias, got {:?}", syms[0]);
        };
        assert_eq!(alias.existing_type, "StringProtocol & View");
    }

    #[test]
    fn typealias_keeps_attributed_function_type() {
        let syms = parse(
            "typealias Handler = @Sendable () -> Void\n\
             typealias Callback = @MainActor (Int) -> Void\n\
             typealias Boxed<T> = Array<T>",
        );
        let aliases: Vec<_> = syms
            .iter()
            .map(|s| match s {
                Symbol::Typealias(alias) => alias.existing_type.as_str(),
                other => panic!("expected typealias, got {other:?}"),
            })
            .collect();
        assert_eq!(
            aliases,
            ["@Sendable () -> Void", "@MainActor (Int) -> Void", "Array<T>"]
        );
    }

    #[test]
    fn nested_typealias() {
        let syms = parse("enum MyEnum {\n    typealias MyAlias = Int\n}");
        let flat = syms.flattened();
        assert_eq!(of_kind(&flat, SymbolKind::Typealias), ["MyAlias"]);
        assert!(flat[1].children().is_empty());
    }

    #[test]
    fn extension_with_conformance() {
        let syms = parse("extension String: MyProtocol {\n}");
        assert_eq!(syms.len(), 1);
        assert_eq!(syms[0].kind(), SymbolKind::Extension);
        assert_eq!(syms[0].name(), Some("String"));
        assert_eq!(syms[0].inherited_types().unwrap(), ["MyProtocol"]);
    }

    #[test]
    fn extension_of_nested_type_with_members() {
        let syms = parse("extension Outer.Inner {\n    struct Helper {}\n    typealias Id = String\n}");
        assert_eq!(syms[0].name(), Some("Outer.Inner"));
        assert!(syms[0].inherited_types().is_some_and(|t| t.is_empty()));
        let children: Vec<_> = syms[0].children().iter().filter_map(|s| s.name()).collect();
        assert_eq!(children, ["Helper", "Id"]);
    }

    // ---------------------------------------------------------------
    // Member properties
    // ---------------------------------------------------------------

    #[test]
    fn struct_member_explicit_type() {
        let syms = parse("struct MyStruct {\n    let value: Int = 3\n}");
        let prop = only_property(&syms[0]);
        assert_eq!(prop.name, "value");
        assert_eq!(prop.type_name, "Int");
        assert_eq!(prop.access_control, "");
    }

    #[test]
    fn struct_member_optional_type() {
        let syms = parse("struct MyStruct {\n    let value: Int? = 3\n}");
        assert_eq!(only_property(&syms[0]).type_name, "Int?");
    }

    #[test]
    fn struct_member_inferred_type() {
        let syms = parse("struct MyStruct {\n    let value = 3\n}");
        assert_eq!(only_property(&syms[0]).type_name, "_");
    }

    #[test]
    fn class_members() {
        let plain = parse("class MyClass {\n    let value: Int = 3\n}");
        assert_eq!(only_property(&plain[0]).type_name, "Int");

        let optional = parse("class MyClass {\n    let value: Int? = 3\n}");
        assert_eq!(only_property(&optional[0]).type_name, "Int?");
    }

    #[test]
    fn actor_members_with_visibility() {
        let syms = parse("actor Counter {\n    private var count: Int = 0\n    let id = 1\n}");
        let props = syms[0].properties().unwrap();
        assert_eq!(props.len(), 2);
        assert_eq!(props[0].access_control, "private");
        assert_eq!(props[1].access_control, "");
        assert_eq!(props[1].type_name, "_");
    }

    #[test]
    fn method_locals_are_not_properties() {
        let syms = parse("struct S {\n    let a: Int\n    func f() {\n        let local = 1\n    }\n}");
        assert_eq!(property_names(&syms[0]), ["a"]);
    }

    #[test]
    fn globals_do_not_leak_into_next_type() {
        let syms = parse("let global = 1\nstruct S {\n    let a: Int\n}");
        assert_eq!(syms.len(), 1);
        assert_eq!(property_names(&syms[0]), ["a"]);
    }

    #[test]
    fn nested_type_properties_are_not_attributed_to_parent() {
        let source = "\
struct Outer {
    let before: Int
    struct Inner {
        let inner: String?
    }
    let after = 3
}";
        let syms = parse(source);
        assert_eq!(property_names(&syms[0]), ["before", "after"]);
        let inner = &syms[0].children()[0];
        assert_eq!(inner.name(), Some("Inner"));
        assert_eq!(only_property(inner).type_name, "String?");
    }

    #[test]
    fn extension_properties_do_not_leak() {
        let source = "\
extension Foo {
    var computed: Int { 1 }
}
struct Bar {
    let x: Int
}";
        let syms = parse(source);
        assert_eq!(syms.len(), 2);
        assert_eq!(property_names(find(&syms, "Bar")), ["x"]);
    }

    #[test]
    fn enum_properties_do_not_leak_into_sibling() {
        let source = "\
enum Mode {
    case on
    static let fallback = Mode.on
}
struct Settings {
    var mode: Mode
}";
        let syms = parse(source);
        assert_eq!(property_names(find(&syms, "Settings")), ["mode"]);
    }

    // ---------------------------------------------------------------
    // Error tolerance
    // ---------------------------------------------------------------

    #[test]
    fn empty_source() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn stray_token_does_not_hide_declarations() {
        let syms = parse("struct Before {}\n)\nstruct After {}");
        let flat = syms.flattened();
        assert!(flat.iter().any(|s| s.name() == Some("Before")));
        assert!(flat.iter().any(|s| s.name() == Some("After")));
    }

    #[test]
    fn no_declarations() {
        assert!(parse("let x = 1\nprint(x)\n").is_empty());
    }

    #[test]
    fn file_symbols_metadata() {
        let parser = SwiftParser::new();
        let file = parser
            .parse_file(Path::new("Sources/A.swift"), "struct A {}\nstruct B {}\n")
            .unwrap();
        assert_eq!(file.file_path, Path::new("Sources/A.swift"));
        assert_eq!(file.total_lines, 2);
        assert_eq!(file.total_symbols(), 2);
    }

    #[test]
    fn extensions_returns_swift() {
        let parser = SwiftParser::new();
        assert_eq!(parser.extensions(), &["swift"]);
    }
}

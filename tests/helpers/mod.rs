#![allow(dead_code)]

use std::fs;
use std::path::Path;

use hatch::{flatten, parse, MemberProperty, Symbol, SymbolKind};

/// Parse source that must succeed.
pub fn symbols(source: &str) -> Vec<Symbol> {
    parse(source).expect("parse failed")
}

/// Parse source expected to declare exactly one top-level symbol.
pub fn single(source: &str) -> Symbol {
    let mut syms = symbols(source);
    assert_eq!(syms.len(), 1, "expected one top-level symbol, got {syms:?}");
    syms.remove(0)
}

/// Names of every symbol of `kind`, in pre-order.
pub fn names_of_kind(forest: &[Symbol], kind: SymbolKind) -> Vec<String> {
    flatten(forest)
        .into_iter()
        .filter(|s| s.kind() == kind)
        .filter_map(|s| s.name().map(str::to_string))
        .collect()
}

/// The one property of a type symbol.
pub fn only_property(sym: &Symbol) -> MemberProperty {
    let props = sym.properties().expect("not a property-bearing symbol");
    assert_eq!(props.len(), 1, "expected one property, got {props:?}");
    props[0].clone()
}

/// Write `contents` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

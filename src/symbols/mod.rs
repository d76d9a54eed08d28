use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

pub mod flatten;

/// Kind of declaration a [`Symbol`] was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Class,
    Actor,
    Protocol,
    Struct,
    Enum,
    EnumCase,
    EnumCaseElement,
    Typealias,
    Extension,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Class => write!(f, "class"),
            SymbolKind::Actor => write!(f, "actor"),
            SymbolKind::Protocol => write!(f, "protocol"),
            SymbolKind::Struct => write!(f, "struct"),
            SymbolKind::Enum => write!(f, "enum"),
            SymbolKind::EnumCase => write!(f, "case"),
            SymbolKind::EnumCaseElement => write!(f, "element"),
            SymbolKind::Typealias => write!(f, "typealias"),
            SymbolKind::Extension => write!(f, "extension"),
        }
    }
}

/// A stored member (`let`/`var`) declared directly in a type body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberProperty {
    /// Visibility modifier as written (`private`, `public(set)`, ...), or empty.
    pub access_control: String,
    pub name: String,
    /// Declared type as written, `T?` for optionals, `_` when left to inference.
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Payload shared by classes, actors, protocols and structs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDecl {
    pub name: String,
    pub children: Vec<Symbol>,
    pub inherited_types: Vec<String>,
    pub properties: Vec<MemberProperty>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDecl {
    pub name: String,
    pub children: Vec<Symbol>,
    pub inherited_types: Vec<String>,
}

/// One `case` line of an enum. Holds an element per comma-separated name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumCase {
    pub children: Vec<Symbol>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumCaseElement {
    pub name: String,
    pub children: Vec<Symbol>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Typealias {
    pub name: String,
    /// Right-hand side of the alias, trimmed source text.
    pub existing_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extension {
    /// The extended type as written, e.g. `Array` or `Outer.Inner`.
    pub name: String,
    pub children: Vec<Symbol>,
    pub inherited_types: Vec<String>,
}

/// A single extracted declaration. Children are owned by their parent, in
/// source order, so a `Vec<Symbol>` is always a forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Symbol {
    Class(TypeDecl),
    Actor(TypeDecl),
    Protocol(TypeDecl),
    Struct(TypeDecl),
    Enum(EnumDecl),
    EnumCase(EnumCase),
    EnumCaseElement(EnumCaseElement),
    Typealias(Typealias),
    Extension(Extension),
}

impl Symbol {
    pub fn kind(&self) -> SymbolKind {
        match self {
            Symbol::Class(_) => SymbolKind::Class,
            Symbol::Actor(_) => SymbolKind::Actor,
            Symbol::Protocol(_) => SymbolKind::Protocol,
            Symbol::Struct(_) => SymbolKind::Struct,
            Symbol::Enum(_) => SymbolKind::Enum,
            Symbol::EnumCase(_) => SymbolKind::EnumCase,
            Symbol::EnumCaseElement(_) => SymbolKind::EnumCaseElement,
            Symbol::Typealias(_) => SymbolKind::Typealias,
            Symbol::Extension(_) => SymbolKind::Extension,
        }
    }

    pub fn children(&self) -> &[Symbol] {
        match self {
            Symbol::Class(d) | Symbol::Actor(d) | Symbol::Protocol(d) | Symbol::Struct(d) => {
                &d.children
            }
            Symbol::Enum(e) => &e.children,
            Symbol::EnumCase(c) => &c.children,
            Symbol::EnumCaseElement(e) => &e.children,
            Symbol::Typealias(_) => &[],
            Symbol::Extension(e) => &e.children,
        }
    }

    /// Declared name. `None` only for enum cases, which are unnamed groups.
    pub fn name(&self) -> Option<&str> {
        match self {
            Symbol::Class(d) | Symbol::Actor(d) | Symbol::Protocol(d) | Symbol::Struct(d) => {
                Some(&d.name)
            }
            Symbol::Enum(e) => Some(&e.name),
            Symbol::EnumCase(_) => None,
            Symbol::EnumCaseElement(e) => Some(&e.name),
            Symbol::Typealias(t) => Some(&t.name),
            Symbol::Extension(e) => Some(&e.name),
        }
    }

    /// Inheritance / conformance list, for the kinds that can declare one.
    pub fn inherited_types(&self) -> Option<&[String]> {
        match self {
            Symbol::Class(d) | Symbol::Actor(d) | Symbol::Protocol(d) | Symbol::Struct(d) => {
                Some(&d.inherited_types)
            }
            Symbol::Enum(e) => Some(&e.inherited_types),
            Symbol::Extension(e) => Some(&e.inherited_types),
            Symbol::EnumCase(_) | Symbol::EnumCaseElement(_) | Symbol::Typealias(_) => None,
        }
    }

    pub fn properties(&self) -> Option<&[MemberProperty]> {
        match self {
            Symbol::Class(d) | Symbol::Actor(d) | Symbol::Protocol(d) | Symbol::Struct(d) => {
                Some(&d.properties)
            }
            _ => None,
        }
    }

    pub fn total_symbols(&self) -> usize {
        1 + self.children().iter().map(|c| c.total_symbols()).sum::<usize>()
    }
}

/// A file's worth of symbols, organized hierarchically.
#[derive(Debug, Clone, Serialize)]
pub struct FileSymbols {
    pub file_path: PathBuf,
    pub symbols: Vec<Symbol>,
    pub total_lines: usize,
}

impl FileSymbols {
    pub fn total_symbols(&self) -> usize {
        self.symbols.iter().map(|s| s.total_symbols()).sum()
    }
}

/// Every parsed file under a scanned root, sorted by path.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectTree {
    pub root: PathBuf,
    pub files: Vec<FileSymbols>,
}

impl ProjectTree {
    pub fn total_symbols(&self) -> usize {
        self.files.iter().map(|f| f.total_symbols()).sum()
    }

    pub fn total_files(&self) -> usize {
        self.files.len()
    }
}

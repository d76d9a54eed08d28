//! Syntactic catalog of the declarations in Swift source.
//!
//! [`parse`] turns source text into a forest of [`Symbol`]s (types, enum
//! cases, typealiases, extensions) with member properties attached to the
//! types that declare them. [`flatten`] linearizes such a forest in
//! pre-order. Nothing is resolved across files; names and types are kept as
//! written.

pub mod parser;
pub mod report;
pub mod scan;
pub mod symbols;

pub use parser::{parse, LanguageParser, SwiftParser};
pub use scan::scan_project;
pub use symbols::flatten::{flatten, Flatten};
pub use symbols::{
    EnumCase, EnumCaseElement, EnumDecl, Extension, FileSymbols, MemberProperty, ProjectTree,
    Symbol, SymbolKind, TypeDecl, Typealias,
};

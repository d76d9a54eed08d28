pub mod members;
pub mod scope;
pub mod swift;
mod text;

use std::path::Path;

use crate::symbols::FileSymbols;

pub use swift::{parse, SwiftParser};

/// Trait for language-specific parsers.
/// Implement this trait to scan another file type with [`crate::scan_project`].
pub trait LanguageParser {
    /// File extensions this parser handles (e.g., ["swift"]).
    fn extensions(&self) -> &[&str];

    /// Parse a source file into a hierarchical symbol tree.
    fn parse_file(&self, path: &Path, source: &str) -> color_eyre::Result<FileSymbols>;

    /// Whether `path` has one of [`LanguageParser::extensions`].
    fn handles(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions().contains(&ext))
    }
}

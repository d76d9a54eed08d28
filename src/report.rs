//! Output formats for a scanned [`ProjectTree`].
//!
//! The tree format is meant for people, the flat format for `grep`/`cut`
//! pipelines, and JSON for code generators.

use std::fmt::Write as _;

use color_eyre::eyre::Result;

use crate::symbols::flatten::Flatten;
use crate::symbols::{ProjectTree, Symbol};

/// Trait for formatting a symbol catalog.
/// Implement this trait to add new output formats.
pub trait SymbolFormatter {
    fn format(&self, tree: &ProjectTree) -> Result<String>;
}

/// Indented tree, one declaration per line.
#[derive(Debug, Clone, Default)]
pub struct TreeFormatter {
    /// Also list member properties under their type.
    pub show_properties: bool,
}

impl SymbolFormatter for TreeFormatter {
    fn format(&self, tree: &ProjectTree) -> Result<String> {
        let mut output = String::new();

        writeln!(
            output,
            "Project: {} ({} files, {} symbols)",
            tree.root.display(),
            tree.total_files(),
            tree.total_symbols(),
        )?;
        writeln!(output)?;

        for file in &tree.files {
            writeln!(output, "  {} ({} lines)", file.file_path.display(), file.total_lines)?;
            for sym in &file.symbols {
                self.write_symbol(&mut output, sym, 4)?;
            }
        }

        Ok(output)
    }
}

impl TreeFormatter {
    fn write_symbol(&self, out: &mut String, sym: &Symbol, indent: usize) -> std::fmt::Result {
        let pad = " ".repeat(indent);
        writeln!(out, "{pad}{}", describe(sym))?;

        if self.show_properties {
            for prop in sym.properties().unwrap_or_default() {
                let access = if prop.access_control.is_empty() {
                    String::new()
                } else {
                    format!("{} ", prop.access_control)
                };
                writeln!(out, "{pad}  - {access}{}: {}", prop.name, prop.type_name)?;
            }
        }

        for child in sym.children() {
            self.write_symbol(out, child, indent + 2)?;
        }
        Ok(())
    }
}

/// One tab-separated `path  kind  name` line per symbol, in pre-order.
#[derive(Debug, Clone, Default)]
pub struct FlatFormatter;

impl SymbolFormatter for FlatFormatter {
    fn format(&self, tree: &ProjectTree) -> Result<String> {
        let mut output = String::new();
        for file in &tree.files {
            for sym in file.symbols.flattened() {
                writeln!(
                    output,
                    "{}\t{}\t{}",
                    file.file_path.display(),
                    sym.kind(),
                    sym.name().unwrap_or_default()
                )?;
            }
        }
        Ok(output)
    }
}

/// Pretty-printed JSON of the whole tree.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter;

impl SymbolFormatter for JsonFormatter {
    fn format(&self, tree: &ProjectTree) -> Result<String> {
        let mut output = serde_json::to_string_pretty(tree)?;
        output.push('\n');
        Ok(output)
    }
}

/// Single-line rendering of a symbol without its children.
pub fn describe(sym: &Symbol) -> String {
    let mut line = sym.kind().to_string();

    if let Some(name) = sym.name() {
        line.push(' ');
        line.push_str(name);
    }
    if let Symbol::Typealias(alias) = sym {
        line.push_str(" = ");
        line.push_str(&alias.existing_type);
    }
    if let Some(inherited) = sym.inherited_types().filter(|t| !t.is_empty()) {
        line.push_str(": ");
        line.push_str(&inherited.join(", "));
    }

    line
}

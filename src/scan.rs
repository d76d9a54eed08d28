use std::fs;
use std::path::Path;

use color_eyre::eyre::Result;
use ignore::WalkBuilder;
use tracing::{info, warn};

use crate::parser::LanguageParser;
use crate::symbols::ProjectTree;

/// Parse every file under `root` that `parser` handles.
///
/// `root` may also be a single file. Hidden entries and anything excluded by
/// `.gitignore` / `.ignore` are skipped. Files that cannot be read as UTF-8
/// are logged and left out; the returned files are sorted by path, relative
/// to `root`.
pub fn scan_project(root: &Path, parser: &dyn LanguageParser) -> Result<ProjectTree> {
    let mut files = Vec::new();

    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .ignore(true)
        .build();

    for entry in walker {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type().is_some_and(|ft| ft.is_file()) || !parser.handles(path) {
            continue;
        }

        let source = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable file");
                continue;
            }
        };

        // A file root strips to an empty path; keep its own name instead.
        let rel_path = match path.strip_prefix(root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel,
            _ => path.file_name().map(Path::new).unwrap_or(path),
        };
        files.push(parser.parse_file(rel_path, &source)?);
    }

    files.sort_by(|a, b| a.file_path.cmp(&b.file_path));
    info!(root = %root.display(), files = files.len(), "scan complete");

    Ok(ProjectTree {
        root: root.to_path_buf(),
        files,
    })
}

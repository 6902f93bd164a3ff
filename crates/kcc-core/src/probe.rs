//! Read-only filesystem queries against the conventional repository layout.

use crate::error::{KccError, Result};
use regex::Regex;
use std::path::Path;
use walkdir::WalkDir;

/// A case-sensitive file-name glob where `*` matches any run of characters.
pub struct NamePattern {
    raw: String,
    re: Regex,
}

impl NamePattern {
    pub fn new(glob: &str) -> Result<Self> {
        let body = glob
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");
        let re = Regex::new(&format!("^{body}$"))
            .map_err(|e| KccError::InvalidArgument(format!("pattern '{glob}': {e}")))?;
        Ok(Self {
            raw: glob.to_string(),
            re,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_match(&self, file_name: &str) -> bool {
        self.re.is_match(file_name)
    }
}

/// Files under `root/subtree` whose file name matches `pattern`, as
/// root-relative `/`-separated paths in walk order (sorted by name).
///
/// A missing subtree is not an error; it simply has no matches.
pub fn locate(root: &Path, subtree: &str, pattern: &NamePattern) -> Result<Vec<String>> {
    walk(root, subtree, |_, name| pattern.is_match(name))
}

/// Files under `root/subtree` whose relative path contains `needle` and ends
/// with `suffix`.
pub fn locate_path(root: &Path, subtree: &str, needle: &str, suffix: &str) -> Result<Vec<String>> {
    walk(root, subtree, |rel, _| rel.contains(needle) && rel.ends_with(suffix))
}

/// Whether `rel` exists under `root` as a file or directory.
pub fn exists(root: &Path, rel: &str) -> bool {
    root.join(rel).exists()
}

fn walk(root: &Path, subtree: &str, keep: impl Fn(&str, &str) -> bool) -> Result<Vec<String>> {
    let base = root.join(subtree);
    if !base.is_dir() {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(&base)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        let rel = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let name = entry.file_name().to_string_lossy();
        if keep(&rel, &name) {
            found.push(rel);
        }
    }
    Ok(found)
}

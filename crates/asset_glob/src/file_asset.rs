//! The record of a matched filesystem entry.

use std::fs::Metadata;

use crate::walk::WalkEntry;

/// A filesystem entry matched by a glob pattern.
#[derive(Debug, Clone)]
pub struct FileAsset {
    path: String,
    metadata: Metadata,
    pattern_root: String,
}

impl FileAsset {
    /// Creates an asset for a walked entry matched by a pattern rooted at
    /// `pattern_root`.
    pub(crate) fn new(entry: WalkEntry, pattern_root: &str) -> Self {
        Self {
            path: entry.path,
            metadata: entry.metadata,
            pattern_root: pattern_root.to_string(),
        }
    }

    /// The path of the asset as reported by the walker.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The filesystem metadata of the asset.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The root of the pattern that matched this asset.
    pub fn pattern_root(&self) -> &str {
        &self.pattern_root
    }

    /// Returns true if the asset is a directory.
    pub fn is_dir(&self) -> bool {
        self.metadata.is_dir()
    }

    /// Returns true if the asset is a regular file.
    pub fn is_file(&self) -> bool {
        self.metadata.is_file()
    }

    /// The size of the asset in bytes.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        self.metadata.len()
    }

    /// The path relative to the pattern root.
    ///
    /// This is the offset at which the asset lands when it is written to a
    /// destination directory. The asset that *is* the pattern root yields an
    /// empty string.
    pub fn relative_path(&self) -> &str {
        relative_to(&self.path, &self.pattern_root)
    }

    /// Consumes the asset, returning its path.
    pub fn into_path(self) -> String {
        self.path
    }
}

/// Strips `root` from the front of `path` on a component boundary.
fn relative_to<'p>(path: &'p str, root: &str) -> &'p str {
    let trimmed_root = root.trim_end_matches('/');
    if trimmed_root.is_empty() {
        // The filesystem root, or no root at all.
        return path.trim_start_matches('/');
    }
    if trimmed_root == "." {
        return path;
    }

    match path.strip_prefix(trimmed_root) {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::relative_to;
    use rstest::rstest;

    #[rstest]
    #[case("main.go", "./", "main.go")]
    #[case("a/b/main.go", ".", "a/b/main.go")]
    #[case("a/b/c/x.go", "a/b", "c/x.go")]
    #[case("a/b", "a/b", "")]
    #[case("a/bc/x.go", "a/b", "a/bc/x.go")]
    #[case("/srv/assets/site.css", "/srv/assets", "site.css")]
    #[case("/site.css", "/", "site.css")]
    fn offsets(#[case] path: &str, #[case] root: &str, #[case] expected: &str) {
        assert_eq!(relative_to(path, root), expected);
    }
}

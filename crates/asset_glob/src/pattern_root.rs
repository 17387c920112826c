//! Finds the directory a pattern's walk starts from.

use itertools::Itertools;

use crate::pattern::NEGATION;

/// Characters that give a path segment glob semantics.
const META_CHARS: &[char] = &['*', '?', '[', '{'];

/// Returns true if `segment` contains a character used to build a regex.
fn has_meta(segment: &str) -> bool {
    segment.contains(META_CHARS)
}

/// Returns the deepest directory of `pattern` that contains no wildcards.
///
/// This is pure string analysis, the filesystem is never consulted.
///
/// * Negations return an empty string, they never walk the filesystem.
/// * A pattern without any `/` returns `./`.
/// * Otherwise the leading literal directories are joined with `/`. The last
///   segment is never part of the root. When the very first segment already
///   contains a wildcard the current directory `.` is returned.
/// * Absolute patterns keep their leading `/`.
pub fn infer_root(pattern: &str) -> String {
    if pattern.starts_with(NEGATION) {
        return String::new();
    }

    let segments = pattern.split('/').collect_vec();
    let Some((_, directories)) = segments.split_last() else {
        return "./".to_string();
    };
    if directories.is_empty() {
        return "./".to_string();
    }

    let absolute = pattern.starts_with('/');
    let root = directories
        .iter()
        .skip(usize::from(absolute))
        .take_while(|segment| !has_meta(segment))
        .join("/");

    match (absolute, root.is_empty()) {
        (true, _) => format!("/{root}"),
        (false, true) => ".".to_string(),
        (false, false) => root,
    }
}

#[cfg(test)]
mod tests {
    use super::infer_root;
    use rstest::rstest;

    #[rstest]
    #[case("*.go", "./")]
    #[case("main.go", "./")]
    #[case("Cargo.toml", "./")]
    #[case("a/b/*.go", "a/b")]
    #[case("a/b/c.go", "a/b")]
    #[case("src/**", "src")]
    #[case("src/**/*.rs", "src")]
    #[case("src/{a,b}/*.rs", "src")]
    #[case("**/*.go", ".")]
    #[case("*/x/y.go", ".")]
    #[case("[ab]/c.go", ".")]
    #[case("a/?/b/c.go", "a")]
    #[case("/srv/assets/*.css", "/srv/assets")]
    #[case("/*.css", "/")]
    #[case("/srv/**", "/srv")]
    #[case("!vendor/**", "")]
    #[case("!*.go", "")]
    fn roots(#[case] pattern: &str, #[case] expected: &str) {
        assert_eq!(infer_root(pattern), expected, "root of '{pattern}'");
    }
}

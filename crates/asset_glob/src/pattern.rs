//! Translation of extended glob patterns into anchored regular expressions.
//!
//! The supported syntax is small and intentionally permissive:
//!
//! | Glob      | Meaning                                              |
//! |-----------|------------------------------------------------------|
//! | `/**/`    | zero or more whole directories                       |
//! | `**/`     | zero or more whole directories                       |
//! | `/**`     | everything inside the directory, end of pattern only |
//! | `*`       | any run of characters except `/`                     |
//! | `?`       | a single character                                   |
//! | `{a,b}`   | `a` or `b`, no spaces                                |
//! | `[abc]`   | character classes, passed to the regex engine as-is  |
//!
//! Every other character is matched literally. Compilation never fails; see
//! [`GlobMatcher::compile`].

use std::fmt;

use regex::Regex;

/// Marks a pattern that removes paths from the result set instead of adding them.
pub const NEGATION: char = '!';

/// Any run of characters that are not a path separator.
const ANY_RUNE: &str = "[^/]*";

/// Zero or more directories, each made of word characters, dots or dashes.
const ZERO_OR_MORE_DIRECTORIES: &str = r"((?:[\w.\-]+/)*)";

/// Everything below a directory.
const TRAILING_STAR_STAR: &str = "/**";

/// Zero or more directories between two path components.
const SLASH_STAR_STAR_SLASH: &str = "/**/";

/// Zero or more directories at the start of a component.
const STAR_STAR_SLASH: &str = "**/";

/// A compiled glob pattern.
///
/// The expression is always anchored at both ends so a matcher only ever
/// matches complete paths.
#[derive(Debug, Clone)]
pub struct GlobMatcher {
    pattern: String,
    regex: Regex,
    negate: bool,
}

impl GlobMatcher {
    /// Compiles a glob pattern. A leading `!` is *not* interpreted here, the
    /// caller strips it and uses [`GlobMatcher::negated`] instead.
    ///
    /// Malformed patterns do not produce an error. When the translated
    /// expression is rejected by the regex engine (an unbalanced `[` or `{`
    /// for instance) the matcher falls back to matching the raw pattern text
    /// literally, which in practice matches nothing.
    pub fn compile(pattern: &str) -> Self {
        let expression = translate(pattern);
        let regex = match Regex::new(&expression) {
            Ok(regex) => regex,
            Err(err) => {
                tracing::warn!(
                    "glob '{pattern}' does not translate to a valid expression, matching it literally: {err}"
                );
                literal(pattern)
            }
        };
        tracing::trace!("compiled glob '{pattern}' to '{}'", regex.as_str());

        Self {
            pattern: pattern.to_string(),
            regex,
            negate: false,
        }
    }

    /// Compiles a glob pattern that was prefixed with `!`. The prefix must
    /// already be stripped.
    pub fn negated(pattern: &str) -> Self {
        Self {
            negate: true,
            ..Self::compile(pattern)
        }
    }

    /// Returns true if the whole `path` matches this pattern.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// The glob this matcher was compiled from, without the negation marker.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The anchored regular expression.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// The compiled regular expression.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Whether this matcher removes paths from the result set.
    pub fn is_negated(&self) -> bool {
        self.negate
    }
}

impl fmt::Display for GlobMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negate {
            write!(f, "{NEGATION}")?;
        }
        write!(f, "{}", self.pattern)
    }
}

/// Builds the anchored expression for `glob`.
fn translate(glob: &str) -> String {
    let mut re = String::with_capacity(glob.len() * 2 + 2);
    re.push('^');

    let mut in_group = false;
    let mut offset = 0;
    while let Some(c) = glob[offset..].chars().next() {
        offset += translate_unit(&glob[offset..], c, &mut in_group, &mut re);
    }

    re.push('$');
    re
}

/// Translates the construct at the start of `rest`, whose first character is
/// `c`, and returns the number of bytes it spans.
fn translate_unit(rest: &str, c: char, in_group: &mut bool, re: &mut String) -> usize {
    match c {
        '\\' | '$' | '^' | '+' | '.' | '(' | ')' | '=' | '!' | '|' => {
            re.push('\\');
            re.push(c);
        }
        '/' if rest.starts_with(SLASH_STAR_STAR_SLASH) => {
            re.push('/');
            re.push_str(ZERO_OR_MORE_DIRECTORIES);
            return SLASH_STAR_STAR_SLASH.len();
        }
        '/' if rest == TRAILING_STAR_STAR => {
            re.push_str("/.*");
            return TRAILING_STAR_STAR.len();
        }
        '*' if rest.starts_with(STAR_STAR_SLASH) => {
            re.push_str(ZERO_OR_MORE_DIRECTORIES);
            return STAR_STAR_SLASH.len();
        }
        '*' => re.push_str(ANY_RUNE),
        '?' => re.push('.'),
        '{' => {
            *in_group = true;
            re.push('(');
        }
        '}' => {
            *in_group = false;
            re.push(')');
        }
        ',' if *in_group => re.push('|'),
        ',' => re.push_str(r"\,"),
        // `[`, `]`, `/` and everything else
        _ => re.push(c),
    }
    c.len_utf8()
}

/// A matcher for the literal text of `pattern`.
fn literal(pattern: &str) -> Regex {
    Regex::new(&format!("^{}$", regex::escape(pattern)))
        .expect("escaped text is always a valid expression")
}

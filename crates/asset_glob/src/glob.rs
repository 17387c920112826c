//! Resolves an ordered list of glob patterns into a set of filesystem entries.

use std::collections::HashMap;

use itertools::Itertools;
use parking_lot::Mutex;
use thiserror::Error;

use crate::{
    file_asset::FileAsset,
    pattern::{GlobMatcher, NEGATION},
    pattern_root::infer_root,
    walk::{ParallelWalker, WalkEntry, WalkError, Walker},
};

/// Errors that abort the resolution of a pattern list.
#[derive(Error, Debug)]
pub enum GlobError {
    /// No directory to walk could be derived from an inclusion pattern.
    #[error("cannot get a root from pattern '{0}'")]
    EmptyRoot(String),

    /// The walk of a pattern's root failed as a whole.
    #[error("failed to walk the files of pattern '{pattern}'")]
    Walk {
        /// The pattern whose root was walked.
        pattern: String,
        /// The underlying walk error.
        #[source]
        source: WalkError,
    },
}

/// The outcome of [`Glob::resolve`].
#[derive(Debug, Clone)]
pub struct GlobResult {
    /// Every matched entry that was not removed again by a negation, in no
    /// particular order.
    pub assets: Vec<FileAsset>,

    /// The compiled form of every input pattern, in input order.
    pub matchers: Vec<GlobMatcher>,
}

impl GlobResult {
    /// Returns the paths of all assets in lexical order.
    pub fn sorted_paths(&self) -> Vec<&str> {
        self.assets.iter().map(FileAsset::path).sorted().collect()
    }
}

/// State of a path that was matched at some point during resolution.
#[derive(Debug)]
enum Entry {
    Present(FileAsset),
    Removed,
}

/// Resolves glob patterns against the filesystem.
///
/// Patterns are processed strictly in order. An inclusion pattern walks its
/// root and adds every matching entry, replacing an earlier record of the
/// same path. A pattern starting with `!` removes the matching paths that
/// are present *at that point*; a later inclusion pattern can add them back.
///
/// ```no_run
/// use asset_glob::Glob;
///
/// let result = Glob::new().resolve(["**/*.go", "!vendor/**"]).unwrap();
/// for asset in &result.assets {
///     println!("{}", asset.path());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Glob<W = ParallelWalker> {
    walker: W,
}

impl Glob {
    /// Creates a resolver that walks with a default [`ParallelWalker`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<W: Walker> Glob<W> {
    /// Creates a resolver that walks with the given [`Walker`].
    pub fn with_walker(walker: W) -> Self {
        Self { walker }
    }

    /// Resolves `patterns` into the matched assets and the compiled matchers.
    ///
    /// # Errors
    /// Returns a [`GlobError`] if the root of an inclusion pattern cannot be
    /// determined or cannot be walked. Entries that fail individually during
    /// a walk are skipped.
    pub fn resolve<'p>(
        &self,
        patterns: impl IntoIterator<Item = &'p str>,
    ) -> Result<GlobResult, GlobError> {
        let mut entries: HashMap<String, Entry> = HashMap::new();
        let mut matchers = Vec::new();

        for pattern in patterns {
            let _span = tracing::debug_span!("glob", pattern).entered();

            if let Some(negated) = pattern.strip_prefix(NEGATION) {
                let matcher = GlobMatcher::negated(negated);
                let mut removed = 0usize;
                for (path, entry) in &mut entries {
                    if matches!(entry, Entry::Present(_)) && matcher.is_match(path) {
                        *entry = Entry::Removed;
                        removed += 1;
                    }
                }
                tracing::debug!("removed {removed} previously matched paths");
                matchers.push(matcher);
                continue;
            }

            let matcher = GlobMatcher::compile(pattern);
            let root = infer_root(pattern);
            if root.is_empty() {
                return Err(GlobError::EmptyRoot(pattern.to_string()));
            }

            let matched = self
                .walk_matching(&root, &matcher)
                .map_err(|source| GlobError::Walk {
                    pattern: pattern.to_string(),
                    source,
                })?;
            tracing::debug!("walked {root}, {} paths matched", matched.len());

            for entry in matched {
                entries.insert(entry.path.clone(), Entry::Present(FileAsset::new(entry, &root)));
            }
            matchers.push(matcher);
        }

        let assets = entries
            .into_values()
            .filter_map(|entry| match entry {
                Entry::Present(asset) => Some(asset),
                Entry::Removed => None,
            })
            .collect();

        Ok(GlobResult { assets, matchers })
    }

    /// Walks `root` and collects the entries whose path matches `matcher`.
    /// The walker may visit from several threads so the entries are gathered
    /// behind a lock.
    fn walk_matching(&self, root: &str, matcher: &GlobMatcher) -> Result<Vec<WalkEntry>, WalkError> {
        let matched = Mutex::new(Vec::new());
        self.walker.walk(root, &|entry| {
            if matcher.is_match(&entry.path) {
                matched.lock().push(entry);
            }
        })?;
        Ok(matched.into_inner())
    }
}

/// Resolves `patterns` with a default [`Glob`].
///
/// # Errors
/// See [`Glob::resolve`].
pub fn glob<'p>(patterns: impl IntoIterator<Item = &'p str>) -> Result<GlobResult, GlobError> {
    Glob::new().resolve(patterns)
}

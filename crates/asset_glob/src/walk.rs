//! Recursive directory traversal that feeds candidate paths to the resolver.

use std::{fs::Metadata, io, path::Path, path::PathBuf};

use ignore::{WalkBuilder, WalkState};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single file or directory reported by a [`Walker`].
#[derive(Debug, Clone)]
pub struct WalkEntry {
    /// `/`-separated path of the entry.
    pub path: String,
    /// Filesystem metadata of the entry.
    pub metadata: Metadata,
}

impl WalkEntry {
    /// Constructs a new entry.
    pub fn new(path: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            path: path.into(),
            metadata,
        }
    }
}

/// Errors that abort a walk as a whole.
#[derive(Error, Debug)]
pub enum WalkError {
    /// The root of the walk could not be read.
    #[error("cannot walk {}", .0.display())]
    Root(PathBuf, #[source] io::Error),
}

/// Visits every entry below a root directory.
///
/// Implementations must report the root itself, recurse into every
/// directory, skip entries that fail individually and may call `visit` from
/// any number of threads at once.
pub trait Walker: Send + Sync {
    /// Walks `root`, calling `visit` for every entry.
    fn walk(&self, root: &str, visit: &(dyn Fn(WalkEntry) + Sync)) -> Result<(), WalkError>;
}

impl<W: Walker + ?Sized> Walker for &W {
    fn walk(&self, root: &str, visit: &(dyn Fn(WalkEntry) + Sync)) -> Result<(), WalkError> {
        (**self).walk(root, visit)
    }
}

/// The default number of walker threads.
/// Defaulting to the number of CPUs available.
fn default_threads() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZero::get)
}

/// Tuning knobs of the [`ParallelWalker`].
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct WalkConfig {
    /// Number of threads used to walk a single root.
    // An omitted field must not deserialize to 0 threads.
    #[serde(default = "default_threads")]
    pub threads: usize,

    /// Whether symbolic links are followed.
    #[serde(default)]
    pub follow_links: bool,

    /// Maximum depth to descend, the root itself is depth 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            follow_links: false,
            max_depth: None,
        }
    }
}

impl WalkConfig {
    /// Returns true if this is the default configuration.
    pub fn is_default(&self) -> bool {
        WalkConfig::default() == *self
    }
}

/// A [`Walker`] built on the parallel walker of the `ignore` crate.
///
/// None of the ignore rules apply: hidden files and files listed in
/// `.gitignore` and friends are all reported.
#[derive(Debug, Clone, Default)]
pub struct ParallelWalker {
    config: WalkConfig,
}

impl ParallelWalker {
    /// Constructs a walker with the given configuration.
    pub fn new(config: WalkConfig) -> Self {
        Self { config }
    }

    /// The configuration of this walker.
    pub fn config(&self) -> &WalkConfig {
        &self.config
    }
}

impl Walker for ParallelWalker {
    fn walk(&self, root: &str, visit: &(dyn Fn(WalkEntry) + Sync)) -> Result<(), WalkError> {
        let root_path = Path::new(root);
        fs_err::metadata(root_path).map_err(|e| WalkError::Root(root_path.to_path_buf(), e))?;

        let mut builder = WalkBuilder::new(root_path);
        builder
            .standard_filters(false)
            .follow_links(self.config.follow_links)
            .max_depth(self.config.max_depth)
            .threads(self.config.threads);

        builder.build_parallel().run(|| {
            Box::new(move |result| {
                let entry = match result {
                    Ok(entry) => entry,
                    Err(err) => {
                        tracing::debug!("skipping entry below {root}: {err}");
                        return WalkState::Continue;
                    }
                };
                // The root keeps the spelling it was given, `./` must not collapse into `.`
                // which single segment patterns would match.
                let path = if entry.depth() == 0 {
                    root.to_string()
                } else {
                    normalize(entry.path())
                };
                match entry.metadata() {
                    Ok(metadata) => visit(WalkEntry::new(path, metadata)),
                    Err(err) => {
                        tracing::debug!("skipping {}: {err}", entry.path().display());
                    }
                }
                WalkState::Continue
            })
        });

        Ok(())
    }
}

/// Turns the path of an entry below the root into the `/`-separated form
/// patterns are matched against. Leading `./` components are dropped so
/// walking `./` yields `main.go` rather than `./main.go`.
fn normalize(path: &Path) -> String {
    let path = path.to_string_lossy();
    #[cfg(windows)]
    let path = path.replace('\\', "/");

    let mut trimmed: &str = &path;
    while let Some(rest) = trimmed.strip_prefix("./") {
        trimmed = rest.trim_start_matches('/');
    }
    if trimmed.is_empty() {
        path.to_string()
    } else {
        trimmed.to_string()
    }
}

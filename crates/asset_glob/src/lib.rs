#![deny(missing_docs)]
//! A crate for resolving extended glob patterns into the files and
//! directories they select, for instance the inputs of a build pipeline.
//!
//! This crate provides:
//! - A compiler from glob patterns to anchored regular expressions
//!   ([`GlobMatcher`])
//! - Inference of the directory a pattern has to be walked from
//!   ([`infer_root`])
//! - A parallel directory walker behind the [`Walker`] trait
//! - A resolver that combines inclusion and exclusion patterns into a
//!   deduplicated set of [`FileAsset`]s ([`Glob`])
//!
//! # Glob Semantics
//!
//! - `/**/` and `**/` match zero or more directories, `/**` at the end of a
//!   pattern matches everything inside a directory.
//! - `*` matches any run of characters except `/`, `?` matches a single
//!   character.
//! - `{a,b}` matches `a` or `b`, `[...]` character classes are supported.
//! - A leading `!` removes matching paths from the result set.
//!
//! # Ordering
//!
//! Patterns are applied in the order they are given. A negation only
//! removes what earlier patterns matched, so in `["!vendor/**",
//! "vendor/keep.go"]` the file `vendor/keep.go` is part of the result.
//! When two inclusion patterns match the same path, the asset carries the
//! root of the one that came last.

mod file_asset;
mod glob;
mod pattern;
mod pattern_root;
mod walk;

pub use file_asset::FileAsset;
pub use glob::{glob, Glob, GlobError, GlobResult};
pub use pattern::{GlobMatcher, NEGATION};
pub use pattern_root::infer_root;
pub use walk::{ParallelWalker, WalkConfig, WalkEntry, WalkError, Walker};

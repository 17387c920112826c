use anyhow::Context;
use asset_glob::{FileAsset, Glob, ParallelWalker};
use clap::Parser;
use serde::Serialize;

use super::GlobArgs;

/// Resolve glob patterns and print the matching files and directories
#[derive(Parser, Debug)]
#[clap(about)]
pub struct ResolveCommand {
    #[clap(flatten)]
    globs: GlobArgs,

    /// Print paths relative to the root of the pattern that matched them
    #[clap(long, conflicts_with = "json")]
    relative: bool,

    /// Print the assets as a JSON array
    #[clap(long)]
    json: bool,

    /// Skip directories
    #[clap(long)]
    files_only: bool,
}

/// The JSON representation of a matched asset.
#[derive(Serialize)]
struct AssetJson<'a> {
    path: &'a str,
    pattern_root: &'a str,
    relative_path: &'a str,
    is_dir: bool,
    len: u64,
}

impl<'a> From<&'a FileAsset> for AssetJson<'a> {
    fn from(asset: &'a FileAsset) -> Self {
        Self {
            path: asset.path(),
            pattern_root: asset.pattern_root(),
            relative_path: asset.relative_path(),
            is_dir: asset.is_dir(),
            len: asset.len(),
        }
    }
}

impl ResolveCommand {
    pub fn run(self) -> anyhow::Result<()> {
        let config = self.globs.into_config()?;

        let glob = Glob::with_walker(ParallelWalker::new(config.walk));
        let result = glob
            .resolve(config.patterns.iter().map(String::as_str))
            .context("failed to resolve glob patterns")?;

        let mut assets: Vec<_> = result
            .assets
            .iter()
            .filter(|asset| !self.files_only || !asset.is_dir())
            .collect();
        assets.sort_by(|a, b| a.path().cmp(b.path()));
        tracing::info!(
            "{} patterns matched {} entries",
            result.matchers.len(),
            assets.len()
        );

        if self.json {
            let assets: Vec<AssetJson<'_>> = assets.into_iter().map(AssetJson::from).collect();
            println!("{}", serde_json::to_string_pretty(&assets)?);
            return Ok(());
        }

        for asset in assets {
            if self.relative {
                // The pattern root itself has no offset.
                if !asset.relative_path().is_empty() {
                    println!("{}", asset.relative_path());
                }
            } else {
                println!("{}", asset.path());
            }
        }

        Ok(())
    }
}

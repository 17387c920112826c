pub mod explain;
pub mod resolve;

pub use explain::ExplainCommand;
pub use resolve::ResolveCommand;

use std::path::PathBuf;

use anyhow::Context;

use crate::config::AssetsConfig;

/// Where the patterns come from and how the filesystem is walked.
#[derive(clap::Args, Debug, Default)]
pub struct GlobArgs {
    /// Glob patterns to resolve, in order. Prefix a pattern with `!` to exclude
    /// what earlier patterns matched. Replaces the patterns of the config file.
    patterns: Vec<String>,

    /// Path to a configuration file, defaults to `assets.toml` if it exists
    #[clap(long, short)]
    config: Option<PathBuf>,

    /// Number of threads used to walk a directory
    #[clap(long)]
    threads: Option<usize>,

    /// Follow symbolic links
    #[clap(long)]
    follow_links: bool,

    /// Maximum depth to descend below a pattern root
    #[clap(long)]
    max_depth: Option<usize>,
}

impl GlobArgs {
    /// Loads the configuration file and applies the command line overrides.
    pub fn into_config(self) -> anyhow::Result<AssetsConfig> {
        let mut config = AssetsConfig::load(self.config.as_deref()).with_context(|| {
            match &self.config {
                Some(path) => format!("failed to load {}", path.display()),
                None => "failed to load the default configuration".to_string(),
            }
        })?;
        if let Some(path) = &config.loaded_from {
            tracing::info!("using configuration from {}", path.display());
        }

        if !self.patterns.is_empty() {
            config.patterns = self.patterns;
        }
        if let Some(threads) = self.threads {
            config.walk.threads = threads;
        }
        if self.follow_links {
            config.walk.follow_links = true;
        }
        if self.max_depth.is_some() {
            config.walk.max_depth = self.max_depth;
        }
        config.validate()?;

        if config.patterns.is_empty() {
            anyhow::bail!("no glob patterns given, pass them as arguments or list them in a configuration file");
        }

        Ok(config)
    }
}

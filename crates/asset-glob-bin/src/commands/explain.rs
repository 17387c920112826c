use asset_glob::{infer_root, GlobMatcher, NEGATION};
use clap::Parser;
use console::style;

use super::GlobArgs;

/// Show how glob patterns are compiled without touching the filesystem
#[derive(Parser, Debug)]
#[clap(about)]
pub struct ExplainCommand {
    #[clap(flatten)]
    globs: GlobArgs,
}

impl ExplainCommand {
    pub fn run(self) -> anyhow::Result<()> {
        let config = self.globs.into_config()?;

        for pattern in &config.patterns {
            let matcher = match pattern.strip_prefix(NEGATION) {
                Some(negated) => GlobMatcher::negated(negated),
                None => GlobMatcher::compile(pattern),
            };

            println!("{}", style(&matcher).bold());
            if matcher.is_negated() {
                println!("  removes:    paths matched by earlier patterns");
            } else {
                println!("  root:       {}", infer_root(pattern));
            }
            println!("  expression: {}", matcher.as_str());
        }

        Ok(())
    }
}

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Receives problems from the Competitive Companion browser extension and
/// writes a code file plus one file per test case.
#[derive(Debug, Parser)]
#[command(name = "companion-scaffold", version, about)]
pub struct Cli {
    /// File whose contents seed every generated code file
    pub template: Option<PathBuf>,

    /// TOML config file (defaults to <config dir>/companion-scaffold/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn read_template(&self) -> Result<Vec<u8>> {
        match &self.template {
            Some(path) => std::fs::read(path)
                .with_context(|| format!("Failed to read template {}", path.display())),
            None => Ok(Vec::new()),
        }
    }
}

mod api;
mod cli;
mod config;
mod error;
mod scaffold;
mod server;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tokio::net::TcpListener;

use cli::Cli;
use config::Config;
use server::AppState;

fn setup_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // .env may carry RUST_LOG, so it goes first
    let dotenv = config::load_dotenv()?;
    setup_logging();
    if let Some(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let config = Config::load(cli.config.as_deref())?;
    config.ensure_root()?;
    let template = cli.read_template()?;

    let naming = &config.naming;
    info!(
        "Writing to {} (layout: {}, code: {}, input: {:?}, output: {:?}, error: {:?}, template: {} bytes)",
        naming.root.display(),
        naming.layout,
        naming.language,
        naming.input_suffix,
        naming.output_suffix,
        naming.error_suffix,
        template.len()
    );

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;

    server::serve(listener, AppState::new(config.naming, template)).await
}

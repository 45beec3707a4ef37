//! gh-release-train
//!
//! Maintains a release pull request from the release-candidate branch
//! into the release branch. Every run regenerates the checklist of merged
//! changes and reconciles it with the published description, so boxes
//! reviewers ticked stay ticked.

use clap::Parser;
use gh_client::{build_octocrab, OctocrabClient, TokenResolver};
use gh_release_config::ReleaseConfig;
use std::path::PathBuf;
use std::sync::Arc;

mod release;

/// Keep a release pull request current with every merged change
#[derive(Parser, Debug)]
#[command(name = "gh-release-train", version, about)]
struct Cli {
    /// Path to the local configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print debug information
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.debug);

    let mut config = ReleaseConfig::load(cli.config.as_deref())?;
    config.resolve_repository()?;
    log::debug!(
        "Releasing {}/{}: {} into {}",
        config.owner(),
        config.repo(),
        config.head,
        config.base
    );

    let token = TokenResolver::new(config.token.clone())
        .resolve(config.host.as_deref())
        .await?;
    let octocrab = build_octocrab(&token, config.host.as_deref())?;
    let client = OctocrabClient::new(Arc::new(octocrab));

    release::run(&client, &config).await
}

fn init_logger(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

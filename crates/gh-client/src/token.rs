//! GitHub token resolution and client construction
//!
//! Tries multiple sources in order:
//! 1. The token configured in the config file
//! 2. Generic `GITHUB_TOKEN` or `GH_TOKEN` environment variables
//! 3. `gh auth token --hostname {host}` command

use crate::DEFAULT_HOST;
use anyhow::{Context, Result};
use log::debug;
use octocrab::Octocrab;

/// Resolves the GitHub token to authenticate with
#[derive(Debug, Clone, Default)]
pub struct TokenResolver {
    /// Token from configuration, wins over every other source
    configured: Option<String>,
}

impl TokenResolver {
    /// Create a resolver preferring the given configured token
    pub fn new(configured: Option<String>) -> Self {
        Self { configured }
    }

    /// Get a token for the given host
    ///
    /// # Arguments
    ///
    /// * `host` - The GitHub host (None = github.com)
    pub async fn resolve(&self, host: Option<&str>) -> Result<String> {
        let host = host.unwrap_or(DEFAULT_HOST);

        if let Some(token) = &self.configured {
            debug!("Using configured token for host {}", host);
            return Ok(token.clone());
        }

        if let Ok(token) = std::env::var("GITHUB_TOKEN").or_else(|_| std::env::var("GH_TOKEN")) {
            if !token.is_empty() {
                debug!("Using token from GITHUB_TOKEN/GH_TOKEN for host {}", host);
                return Ok(token);
            }
        }

        // Try gh CLI with hostname
        debug!("Trying gh auth token for host {}", host);
        let output = tokio::process::Command::new("gh")
            .args(["auth", "token", "--hostname", host])
            .output()
            .await
            .context("Failed to run 'gh auth token'")?;

        if output.status.success() {
            let token = String::from_utf8(output.stdout)
                .context("Invalid UTF-8 in gh auth token output")?
                .trim()
                .to_string();
            if !token.is_empty() {
                debug!("Using token from gh CLI for host {}", host);
                return Ok(token);
            }
        }

        Err(anyhow::anyhow!(
            "No token found for host '{}'. \
             Set GITHUB_TOKEN or run 'gh auth login --hostname {}'",
            host,
            host
        ))
    }
}

/// Build an octocrab instance for the given token and host
///
/// Non-default hosts are treated as GitHub Enterprise and get the
/// `https://{host}/api/v3` base URI.
pub fn build_octocrab(token: &str, host: Option<&str>) -> Result<Octocrab> {
    let mut builder = Octocrab::builder().personal_token(token.to_string());

    if let Some(host) = host {
        if host != DEFAULT_HOST {
            let uri = format!("https://{}/api/v3", host);
            builder = builder.base_uri(&uri).context("Failed to set base URI")?;
        }
    }

    builder.build().context("Failed to build Octocrab client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_configured_token_wins() {
        let resolver = TokenResolver::new(Some("config-token".to_string()));
        let token = resolver.resolve(None).await.unwrap();
        assert_eq!(token, "config-token");
    }

    #[tokio::test]
    async fn test_build_octocrab_for_default_host() {
        assert!(build_octocrab("token", None).is_ok());
        assert!(build_octocrab("token", Some(DEFAULT_HOST)).is_ok());
    }

    #[tokio::test]
    async fn test_build_octocrab_for_enterprise_host() {
        assert!(build_octocrab("token", Some("ghe.example.com")).is_ok());
    }
}

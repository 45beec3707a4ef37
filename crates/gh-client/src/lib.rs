//! GitHub API client for the release train
//!
//! This crate provides a trait-based GitHub API client. The trait carries
//! exactly the operations the release flow needs (compare commits, list
//! and write pull requests, label them), so the flow can run against the
//! real API or a test double.
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::{build_octocrab, GitHubClient, OctocrabClient, TokenResolver};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let token = TokenResolver::new(None).resolve(None).await?;
//! let octocrab = build_octocrab(&token, None)?;
//! let client = OctocrabClient::new(Arc::new(octocrab));
//!
//! let shas = client
//!     .compare_commits("owner", "repo", "master", "develop")
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod octocrab_client;
pub mod token;
pub mod types;

/// Default GitHub host (public GitHub)
pub const DEFAULT_HOST: &str = "github.com";

pub use client::GitHubClient;
pub use octocrab_client::OctocrabClient;
pub use token::{build_octocrab, TokenResolver};
pub use types::{
    NewPullRequest, PullRequest, PullRequestPage, PullRequestQuery, PullRequestState,
    PullRequestUpdate,
};

// Re-export octocrab so consumers don't need to depend on it directly
pub use octocrab;

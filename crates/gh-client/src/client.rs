//! GitHub client trait
//!
//! Defines the interface the release flow needs from the GitHub API.
//! The direct implementation lives in `octocrab_client`; tests substitute
//! their own mock.

use crate::types::{NewPullRequest, PullRequest, PullRequestPage, PullRequestQuery, PullRequestUpdate};
use async_trait::async_trait;

/// GitHub API client trait
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across async
/// tasks.
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// List the SHAs of commits reachable from `head` but not from `base`
    ///
    /// This is the commit range a release of `head` into `base` would
    /// ship, as reported by the compare endpoint.
    async fn compare_commits(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
    ) -> anyhow::Result<Vec<String>>;

    /// Fetch one page of pull requests matching `query`
    ///
    /// Results are ordered by creation time, newest first. The returned
    /// page says whether more pages follow; pagination is driven by the
    /// caller so it can stop early.
    async fn list_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        query: &PullRequestQuery,
    ) -> anyhow::Result<PullRequestPage>;

    /// Open a new pull request
    async fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        params: &NewPullRequest,
    ) -> anyhow::Result<PullRequest>;

    /// Update title and/or body of an existing pull request
    async fn update_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        update: &PullRequestUpdate,
    ) -> anyhow::Result<PullRequest>;

    /// Add labels to a pull request (labels live on the issue side of the
    /// API)
    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> anyhow::Result<()>;
}

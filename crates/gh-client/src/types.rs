//! GitHub API data transfer objects
//!
//! These types represent the data exchanged with the GitHub API. They are
//! intentionally separate from octocrab's models so the rest of the
//! workspace stays decoupled from the API library.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pull request from the GitHub API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number (e.g., 123)
    pub number: u64,

    /// PR title
    pub title: String,

    /// PR body/description
    pub body: Option<String>,

    /// Author's GitHub username
    pub author: String,

    /// Base branch name (e.g., "master")
    pub base_branch: String,

    /// HEAD branch name (e.g., "develop")
    pub head_branch: String,

    /// SHA of the merge commit, if the PR was merged
    pub merge_commit_sha: Option<String>,

    /// When the PR was created
    pub created_at: DateTime<Utc>,

    /// PR URL for log output
    pub html_url: String,
}

/// PR state filter for list queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PullRequestState {
    #[default]
    Open,
    Closed,
}

/// Filters for listing pull requests
///
/// Listing is always sorted by creation time, newest first, which is what
/// merged-PR discovery needs to terminate early.
#[derive(Debug, Clone)]
pub struct PullRequestQuery {
    pub state: PullRequestState,

    /// Only PRs targeting this base branch
    pub base: Option<String>,

    /// Only PRs from this head ref (`owner:branch`)
    pub head: Option<String>,

    /// 1-based page number
    pub page: u32,

    pub per_page: u8,
}

impl Default for PullRequestQuery {
    fn default() -> Self {
        Self {
            state: PullRequestState::Open,
            base: None,
            head: None,
            page: 1,
            per_page: 100,
        }
    }
}

/// One page of pull request results
#[derive(Debug, Clone)]
pub struct PullRequestPage {
    pub items: Vec<PullRequest>,

    /// Whether the API reported another page after this one
    pub has_next: bool,
}

/// Parameters for creating a pull request
#[derive(Debug, Clone)]
pub struct NewPullRequest {
    pub title: String,
    pub body: String,

    /// Branch to merge from
    pub head: String,

    /// Branch to merge into
    pub base: String,
}

/// Fields to change on an existing pull request
#[derive(Debug, Clone, Default)]
pub struct PullRequestUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
}

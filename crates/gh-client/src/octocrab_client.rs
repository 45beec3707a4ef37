//! Octocrab-based GitHub API client
//!
//! Direct implementation of the `GitHubClient` trait using the octocrab
//! library.

use crate::client::GitHubClient;
use crate::types::{
    NewPullRequest, PullRequest, PullRequestPage, PullRequestQuery, PullRequestState,
    PullRequestUpdate,
};
use async_trait::async_trait;
use log::debug;
use octocrab::Octocrab;
use serde::Deserialize;
use std::sync::Arc;

/// The compare endpoint caps the commit list per page at 250; release
/// batches are expected to stay well below that.
const COMPARE_PER_PAGE: u32 = 250;

/// Direct GitHub API client using octocrab
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
}

impl OctocrabClient {
    /// Create a new client with the given octocrab instance
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self { octocrab }
    }

    /// Get a reference to the underlying octocrab instance
    pub fn octocrab(&self) -> &Octocrab {
        &self.octocrab
    }
}

/// Response shape of `GET /repos/{owner}/{repo}/compare/{base}...{head}`,
/// reduced to the fields we read
#[derive(Debug, Deserialize)]
struct CommitComparison {
    commits: Vec<ComparisonCommit>,
}

#[derive(Debug, Deserialize)]
struct ComparisonCommit {
    sha: String,
}

#[async_trait]
impl GitHubClient for OctocrabClient {
    async fn compare_commits(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
    ) -> anyhow::Result<Vec<String>> {
        debug!("Comparing {}...{} for {}/{}", base, head, owner, repo);

        // Use a raw GET request since octocrab's typed surface doesn't
        // cover the compare endpoint.
        let route = format!(
            "/repos/{}/{}/compare/{}...{}?per_page={}",
            owner, repo, base, head, COMPARE_PER_PAGE
        );
        let comparison: CommitComparison = self.octocrab.get(route, None::<&()>).await?;

        let shas = comparison
            .commits
            .into_iter()
            .map(|commit| commit.sha)
            .collect::<Vec<_>>();

        debug!("{} commits ahead of {}", shas.len(), base);
        Ok(shas)
    }

    async fn list_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        query: &PullRequestQuery,
    ) -> anyhow::Result<PullRequestPage> {
        debug!(
            "Fetching PRs for {}/{} (state {:?}, page {})",
            owner, repo, query.state, query.page
        );

        let pulls = self.octocrab.pulls(owner, repo);
        let mut request = pulls
            .list()
            .state(convert_state(query.state))
            .sort(octocrab::params::pulls::Sort::Created)
            .direction(octocrab::params::Direction::Descending)
            .per_page(query.per_page)
            .page(query.page);

        if let Some(base) = &query.base {
            request = request.base(base);
        }
        if let Some(head) = &query.head {
            request = request.head(head);
        }

        let page = request.send().await?;
        let has_next = page.next.is_some();
        let items = page.items.iter().map(convert_pull_request).collect();

        Ok(PullRequestPage { items, has_next })
    }

    async fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        params: &NewPullRequest,
    ) -> anyhow::Result<PullRequest> {
        debug!(
            "Creating PR {} -> {} for {}/{}",
            params.head, params.base, owner, repo
        );

        let pr = self
            .octocrab
            .pulls(owner, repo)
            .create(&params.title, &params.head, &params.base)
            .body(&params.body)
            .send()
            .await?;

        Ok(convert_pull_request(&pr))
    }

    async fn update_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        update: &PullRequestUpdate,
    ) -> anyhow::Result<PullRequest> {
        debug!("Updating PR #{} for {}/{}", number, owner, repo);

        let pulls = self.octocrab.pulls(owner, repo);
        let mut request = pulls.update(number);
        if let Some(title) = &update.title {
            request = request.title(title);
        }
        if let Some(body) = &update.body {
            request = request.body(body);
        }

        let pr = request.send().await?;
        Ok(convert_pull_request(&pr))
    }

    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> anyhow::Result<()> {
        debug!("Adding labels {:?} to PR #{}", labels, number);

        self.octocrab
            .issues(owner, repo)
            .add_labels(number, labels)
            .await?;
        Ok(())
    }
}

/// Convert our state filter to octocrab's
fn convert_state(state: PullRequestState) -> octocrab::params::State {
    match state {
        PullRequestState::Open => octocrab::params::State::Open,
        PullRequestState::Closed => octocrab::params::State::Closed,
    }
}

/// Convert octocrab PullRequest to our PullRequest type
fn convert_pull_request(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        title: pr.title.clone().unwrap_or_default(),
        body: pr.body.clone(),
        author: pr
            .user
            .as_ref()
            .map(|u| u.login.clone())
            .unwrap_or_else(|| "unknown".to_string()),
        base_branch: pr.base.ref_field.clone(),
        head_branch: pr.head.ref_field.clone(),
        merge_commit_sha: pr.merge_commit_sha.clone(),
        created_at: pr.created_at.unwrap_or_else(chrono::Utc::now),
        html_url: pr
            .html_url
            .as_ref()
            .map(|u| u.to_string())
            .unwrap_or_default(),
    }
}

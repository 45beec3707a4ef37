//! The release train flow
//!
//! One run recomputes the set of merged-but-unreleased pull requests,
//! renders a fresh description, reconciles it with the published one and
//! writes it back to the release PR (creating the PR when none is open).

use anyhow::Result;
use chrono::{DateTime, Local};
use gh_client::{
    GitHubClient, NewPullRequest, PullRequest, PullRequestQuery, PullRequestState,
    PullRequestUpdate,
};
use gh_release_config::ReleaseConfig;
use gh_release_notes::{reconcile, template, ReleaseContext, ReleaseEntry};
use log::info;
use std::collections::HashSet;

/// Timestamp format exposed to templates as `release_at`
const RELEASE_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Title and body of the release pull request
#[derive(Debug, Clone)]
pub struct Description {
    pub title: String,
    pub body: String,
}

/// Run the whole flow once
pub async fn run(client: &dyn GitHubClient, config: &ReleaseConfig) -> Result<()> {
    let merged = find_merged_pull_requests(client, config).await?;
    if merged.is_empty() {
        info!("No pull requests to be released");
        return Ok(());
    }
    for pr in &merged {
        info!("To be released: #{} {}", pr.number, pr.title);
    }

    let release_pr = find_release_pull_request(client, config).await?;
    if let Some(pr) = &release_pr {
        info!("An existing release pull request #{} found", pr.number);
    }

    let description = build_description(config, &merged, release_pr.as_ref(), Local::now())?;

    let release_pr = match release_pr {
        Some(existing) => {
            let update = PullRequestUpdate {
                title: Some(description.title),
                body: Some(description.body),
            };
            let updated = client
                .update_pull_request(config.owner(), config.repo(), existing.number, &update)
                .await?;
            info!("Updated pull request #{}: {}", updated.number, updated.html_url);
            updated
        }
        None => {
            let params = NewPullRequest {
                title: description.title,
                body: description.body,
                head: config.head.clone(),
                base: config.base.clone(),
            };
            let created = client
                .create_pull_request(config.owner(), config.repo(), &params)
                .await?;
            info!("Created pull request #{}: {}", created.number, created.html_url);
            created
        }
    };

    if !config.labels.is_empty() {
        info!("Adding labels to the pull request");
        client
            .add_labels(config.owner(), config.repo(), release_pr.number, &config.labels)
            .await?;
    }

    Ok(())
}

/// List the pull requests merged into `head` that `base` does not have yet
///
/// The compare endpoint gives the commit range; closed PRs based on
/// `head` are then walked newest-first until every commit SHA is
/// accounted for or the listing runs out. The result is sorted by PR
/// number, oldest first.
pub async fn find_merged_pull_requests(
    client: &dyn GitHubClient,
    config: &ReleaseConfig,
) -> Result<Vec<PullRequest>> {
    let mut remaining: HashSet<String> = client
        .compare_commits(config.owner(), config.repo(), &config.base, &config.head)
        .await?
        .into_iter()
        .collect();

    let mut merged = Vec::new();
    let mut page = 1;
    while !remaining.is_empty() {
        let query = PullRequestQuery {
            state: PullRequestState::Closed,
            base: Some(config.head.clone()),
            page,
            ..Default::default()
        };
        let batch = client
            .list_pull_requests(config.owner(), config.repo(), &query)
            .await?;

        for pr in batch.items {
            if let Some(sha) = &pr.merge_commit_sha {
                if remaining.remove(sha) {
                    merged.push(pr);
                }
            }
        }

        if !batch.has_next {
            break;
        }
        page += 1;
    }

    merged.sort_by_key(|pr| pr.number);
    Ok(merged)
}

/// Find the open release pull request, if any
pub async fn find_release_pull_request(
    client: &dyn GitHubClient,
    config: &ReleaseConfig,
) -> Result<Option<PullRequest>> {
    let query = PullRequestQuery {
        state: PullRequestState::Open,
        base: Some(config.base.clone()),
        head: Some(format!("{}:{}", config.owner(), config.head)),
        ..Default::default()
    };
    let page = client
        .list_pull_requests(config.owner(), config.repo(), &query)
        .await?;
    Ok(page.items.into_iter().next())
}

/// Render title and body and reconcile the body against the published one
pub fn build_description(
    config: &ReleaseConfig,
    merged: &[PullRequest],
    release_pr: Option<&PullRequest>,
    release_at: DateTime<Local>,
) -> Result<Description> {
    let context = ReleaseContext {
        owner: config.owner().to_string(),
        repo: config.repo().to_string(),
        base: config.base.clone(),
        head: config.head.clone(),
        release_at: release_at.format(RELEASE_AT_FORMAT).to_string(),
        pull_requests: merged
            .iter()
            .map(|pr| ReleaseEntry {
                number: pr.number,
                title: pr.title.clone(),
                author: pr.author.clone(),
            })
            .collect(),
    };

    let title = template::render(&config.title, &context)?;
    let new_body = template::render(&config.body, &context)?;

    let old_body = release_pr
        .and_then(|pr| pr.body.as_deref())
        .unwrap_or_default();
    let body = reconcile(old_body, &new_body);

    Ok(Description { title, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gh_client::PullRequestPage;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    fn pr(number: u64, title: &str, merge_commit_sha: Option<&str>) -> PullRequest {
        PullRequest {
            number,
            title: title.to_string(),
            body: None,
            author: "alice".to_string(),
            base_branch: "develop".to_string(),
            head_branch: format!("feature/{number}"),
            merge_commit_sha: merge_commit_sha.map(str::to_string),
            created_at: chrono::Utc::now(),
            html_url: format!("https://github.com/acme/rocket/pull/{number}"),
        }
    }

    fn config() -> ReleaseConfig {
        ReleaseConfig {
            owner: Some("acme".to_string()),
            repo: Some("rocket".to_string()),
            ..Default::default()
        }
    }

    #[derive(Default)]
    struct MockClient {
        commits: Vec<String>,
        closed_pages: Vec<PullRequestPage>,
        open_prs: Vec<PullRequest>,
        closed_list_calls: Mutex<u32>,
        created: Mutex<Option<NewPullRequest>>,
        updated: Mutex<Option<(u64, PullRequestUpdate)>>,
        labeled: Mutex<Option<(u64, Vec<String>)>>,
    }

    #[async_trait]
    impl GitHubClient for MockClient {
        async fn compare_commits(
            &self,
            _owner: &str,
            _repo: &str,
            _base: &str,
            _head: &str,
        ) -> anyhow::Result<Vec<String>> {
            Ok(self.commits.clone())
        }

        async fn list_pull_requests(
            &self,
            _owner: &str,
            _repo: &str,
            query: &PullRequestQuery,
        ) -> anyhow::Result<PullRequestPage> {
            match query.state {
                PullRequestState::Closed => {
                    *self.closed_list_calls.lock().unwrap() += 1;
                    let index = (query.page - 1) as usize;
                    Ok(self.closed_pages.get(index).cloned().unwrap_or(PullRequestPage {
                        items: Vec::new(),
                        has_next: false,
                    }))
                }
                PullRequestState::Open => Ok(PullRequestPage {
                    items: self.open_prs.clone(),
                    has_next: false,
                }),
            }
        }

        async fn create_pull_request(
            &self,
            _owner: &str,
            _repo: &str,
            params: &NewPullRequest,
        ) -> anyhow::Result<PullRequest> {
            *self.created.lock().unwrap() = Some(params.clone());
            let mut created = pr(100, &params.title, None);
            created.body = Some(params.body.clone());
            Ok(created)
        }

        async fn update_pull_request(
            &self,
            _owner: &str,
            _repo: &str,
            number: u64,
            update: &PullRequestUpdate,
        ) -> anyhow::Result<PullRequest> {
            *self.updated.lock().unwrap() = Some((number, update.clone()));
            let mut updated = pr(number, update.title.as_deref().unwrap_or(""), None);
            updated.body = update.body.clone();
            Ok(updated)
        }

        async fn add_labels(
            &self,
            _owner: &str,
            _repo: &str,
            number: u64,
            labels: &[String],
        ) -> anyhow::Result<()> {
            *self.labeled.lock().unwrap() = Some((number, labels.to_vec()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_merged_prs_filtered_by_merge_commit() {
        let client = MockClient {
            commits: vec!["sha2".to_string(), "sha3".to_string()],
            closed_pages: vec![PullRequestPage {
                items: vec![
                    pr(3, "Third", Some("sha3")),
                    pr(2, "Second", Some("sha2")),
                    pr(1, "Unrelated", Some("sha-other")),
                    pr(4, "Never merged", None),
                ],
                has_next: false,
            }],
            ..Default::default()
        };

        let merged = find_merged_pull_requests(&client, &config()).await.unwrap();
        let numbers: Vec<u64> = merged.iter().map(|pr| pr.number).collect();
        assert_eq!(numbers, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_pagination_stops_once_all_commits_matched() {
        let client = MockClient {
            commits: vec!["sha1".to_string()],
            closed_pages: vec![
                PullRequestPage {
                    items: vec![pr(1, "First", Some("sha1"))],
                    has_next: true,
                },
                PullRequestPage {
                    items: vec![pr(2, "Old", Some("sha-old"))],
                    has_next: false,
                },
            ],
            ..Default::default()
        };

        let merged = find_merged_pull_requests(&client, &config()).await.unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(*client.closed_list_calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_pagination_walks_until_listing_runs_out() {
        let client = MockClient {
            commits: vec!["sha1".to_string(), "gone".to_string()],
            closed_pages: vec![
                PullRequestPage {
                    items: vec![pr(5, "Newest", Some("sha-other"))],
                    has_next: true,
                },
                PullRequestPage {
                    items: vec![pr(1, "First", Some("sha1"))],
                    has_next: false,
                },
            ],
            ..Default::default()
        };

        let merged = find_merged_pull_requests(&client, &config()).await.unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(*client.closed_list_calls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_no_commits_means_no_listing() {
        let client = MockClient::default();
        let merged = find_merged_pull_requests(&client, &config()).await.unwrap();
        assert!(merged.is_empty());
        assert_eq!(*client.closed_list_calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_description_with_default_templates() {
        let merged = vec![pr(1, "Fix bug", Some("sha1")), pr(2, "Add feature", Some("sha2"))];
        let description =
            build_description(&config(), &merged, None, Local::now()).unwrap();

        assert!(description.title.starts_with("Release "));
        assert_eq!(
            description.body,
            "* [ ] #1 Fix bug @alice\n* [ ] #2 Add feature @alice"
        );
    }

    #[test]
    fn test_description_preserves_checked_boxes() {
        let merged = vec![pr(1, "Fix bug", Some("sha1")), pr(2, "Add feature", Some("sha2"))];
        let mut release_pr = pr(90, "Release", None);
        release_pr.body = Some("* [x] #1 Fix bug @alice\n".to_string());

        let description =
            build_description(&config(), &merged, Some(&release_pr), Local::now()).unwrap();
        assert_eq!(
            description.body,
            "* [x] #1 Fix bug @alice\n* [ ] #2 Add feature @alice"
        );
    }

    #[tokio::test]
    async fn test_run_creates_release_pr_when_none_open() {
        let client = MockClient {
            commits: vec!["sha1".to_string()],
            closed_pages: vec![PullRequestPage {
                items: vec![pr(1, "Fix bug", Some("sha1"))],
                has_next: false,
            }],
            ..Default::default()
        };

        run(&client, &config()).await.unwrap();

        let created = client.created.lock().unwrap().clone().unwrap();
        assert_eq!(created.head, "develop");
        assert_eq!(created.base, "master");
        assert_eq!(created.body, "* [ ] #1 Fix bug @alice");
        assert!(client.updated.lock().unwrap().is_none());
        assert!(client.labeled.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_run_updates_existing_release_pr() {
        let mut release_pr = pr(90, "Release", None);
        release_pr.body = Some("* [x] #1 Fix bug @alice\n".to_string());

        let client = MockClient {
            commits: vec!["sha1".to_string(), "sha2".to_string()],
            closed_pages: vec![PullRequestPage {
                items: vec![
                    pr(2, "Add feature", Some("sha2")),
                    pr(1, "Fix bug", Some("sha1")),
                ],
                has_next: false,
            }],
            open_prs: vec![release_pr],
            ..Default::default()
        };

        let mut config = config();
        config.labels = vec!["release".to_string()];
        run(&client, &config).await.unwrap();

        let (number, update) = client.updated.lock().unwrap().clone().unwrap();
        assert_eq!(number, 90);
        assert_eq!(
            update.body.as_deref(),
            Some("* [x] #1 Fix bug @alice\n* [ ] #2 Add feature @alice")
        );
        assert!(client.created.lock().unwrap().is_none());

        let (labeled_number, labels) = client.labeled.lock().unwrap().clone().unwrap();
        assert_eq!(labeled_number, 90);
        assert_eq!(labels, vec!["release".to_string()]);
    }

    #[tokio::test]
    async fn test_run_without_pending_prs_touches_nothing() {
        let client = MockClient::default();
        run(&client, &config()).await.unwrap();
        assert!(client.created.lock().unwrap().is_none());
        assert!(client.updated.lock().unwrap().is_none());
    }
}

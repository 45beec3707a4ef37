//! Release train configuration
//!
//! Defaults < global config file < local config file < environment, the
//! later source winning per key. Only keys present in a file override the
//! values merged so far.

use crate::{config_file, remote};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default title template: `Release 2024-01-15 10:30:00 +0000`
pub const DEFAULT_TITLE: &str = "Release {{release_at}}";

/// Default body template: one pending checklist line per merged PR
pub const DEFAULT_BODY: &str =
    "{{#each pull_requests}}* [ ] #{{number}} {{title}} @{{author}}\n{{/each}}";

const ENV_PREFIX: &str = "GH_RELEASE_TRAIN_";

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("repository owner is not configured and could not be inferred from the origin remote")]
    MissingOwner,

    #[error("repository name is not configured and could not be inferred from the origin remote")]
    MissingRepo,
}

/// Configuration for one release train run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseConfig {
    /// GitHub API token; resolved via env/`gh` CLI when absent
    #[serde(default)]
    pub token: Option<String>,

    /// Repository owner; inferred from the origin remote when absent
    #[serde(default)]
    pub owner: Option<String>,

    /// Repository name; inferred from the origin remote when absent
    #[serde(default)]
    pub repo: Option<String>,

    /// GitHub Enterprise host (github.com when absent)
    #[serde(default)]
    pub host: Option<String>,

    /// Branch releases are merged into
    #[serde(default = "default_base")]
    pub base: String,

    /// Release-candidate branch accumulating merged changes
    #[serde(default = "default_head")]
    pub head: String,

    /// Handlebars template for the release PR title
    #[serde(default = "default_title")]
    pub title: String,

    /// Handlebars template for the release PR body
    #[serde(default = "default_body")]
    pub body: String,

    /// Labels applied to the release PR
    #[serde(default)]
    pub labels: Vec<String>,
}

fn default_base() -> String {
    "master".to_string()
}

fn default_head() -> String {
    "develop".to_string()
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_body() -> String {
    DEFAULT_BODY.to_string()
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            token: None,
            owner: None,
            repo: None,
            host: None,
            base: default_base(),
            head: default_head(),
            title: default_title(),
            body: default_body(),
            labels: Vec::new(),
        }
    }
}

/// A partial config as read from one file; only present keys override
#[derive(Debug, Default, Deserialize)]
struct ConfigOverlay {
    token: Option<String>,
    owner: Option<String>,
    repo: Option<String>,
    host: Option<String>,
    base: Option<String>,
    head: Option<String>,
    title: Option<String>,
    body: Option<String>,
    labels: Option<Vec<String>>,
}

impl ConfigOverlay {
    fn apply(self, config: &mut ReleaseConfig) {
        if self.token.is_some() {
            config.token = self.token;
        }
        if self.owner.is_some() {
            config.owner = self.owner;
        }
        if self.repo.is_some() {
            config.repo = self.repo;
        }
        if self.host.is_some() {
            config.host = self.host;
        }
        if let Some(base) = self.base {
            config.base = base;
        }
        if let Some(head) = self.head {
            config.head = head;
        }
        if let Some(title) = self.title {
            config.title = title;
        }
        if let Some(body) = self.body {
            config.body = body;
        }
        if let Some(labels) = self.labels {
            config.labels = labels;
        }
    }
}

impl ReleaseConfig {
    /// Load configuration from the global and local config files and the
    /// environment
    ///
    /// Missing files are skipped; unreadable or unparsable ones are
    /// errors.
    pub fn load(local_override: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for path in config_file::candidate_paths(local_override) {
            match std::fs::read_to_string(&path) {
                Ok(content) => {
                    log::debug!("Loaded config from {}", path.display());
                    let overlay: ConfigOverlay =
                        toml::from_str(&content).map_err(|source| ConfigError::Parse {
                            path: path.clone(),
                            source,
                        })?;
                    overlay.apply(&mut config);
                }
                Err(source) if source.kind() == std::io::ErrorKind::NotFound => continue,
                Err(source) => return Err(ConfigError::Io { path, source }),
            }
        }

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply `GH_RELEASE_TRAIN_*` environment variables on top of the
    /// file-based configuration
    fn apply_env_overrides(&mut self) {
        let env = |key: &str| {
            std::env::var(format!("{ENV_PREFIX}{key}"))
                .ok()
                .filter(|value| !value.is_empty())
        };

        if let Some(token) = env("TOKEN") {
            self.token = Some(token);
        }
        if let Some(owner) = env("OWNER") {
            self.owner = Some(owner);
        }
        if let Some(repo) = env("REPO") {
            self.repo = Some(repo);
        }
        if let Some(host) = env("HOST") {
            self.host = Some(host);
        }
        if let Some(base) = env("BASE") {
            self.base = base;
        }
        if let Some(head) = env("HEAD") {
            self.head = head;
        }
        if let Some(title) = env("TITLE") {
            self.title = title;
        }
        if let Some(body) = env("BODY") {
            self.body = body;
        }
        if let Some(labels) = env("LABELS") {
            self.labels = labels
                .split(',')
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    /// Fill in owner/repo from the origin remote and fail if they are
    /// still missing afterwards
    pub fn resolve_repository(&mut self) -> Result<(), ConfigError> {
        if self.owner.is_none() || self.repo.is_none() {
            if let Some(remote) = remote::infer_repository() {
                log::debug!(
                    "Inferred repository {}/{} from origin remote",
                    remote.owner,
                    remote.repo
                );
                self.owner.get_or_insert(remote.owner);
                self.repo.get_or_insert(remote.repo);
            }
        }

        if self.owner.is_none() {
            return Err(ConfigError::MissingOwner);
        }
        if self.repo.is_none() {
            return Err(ConfigError::MissingRepo);
        }
        Ok(())
    }

    /// Repository owner; call after `resolve_repository`
    pub fn owner(&self) -> &str {
        self.owner.as_deref().unwrap_or_default()
    }

    /// Repository name; call after `resolve_repository`
    pub fn repo(&self) -> &str {
        self.repo.as_deref().unwrap_or_default()
    }
}

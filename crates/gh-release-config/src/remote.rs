//! Repository inference from the git `origin` remote
//!
//! When `owner`/`repo` are not configured, they are recovered from the
//! URL of the `origin` remote, accepting both ssh
//! (`git@github.com:owner/repo.git`) and https
//! (`https://github.com/owner/repo[.git]`) forms.

use regex::Regex;
use std::process::Command;
use std::sync::OnceLock;

/// Owner and name of a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepository {
    pub owner: String,
    pub repo: String,
}

fn remote_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:git@[^:/]+:|https://[^/]+/)(?P<owner>[^/]+)/(?P<repo>[^/]+?)(?:\.git)?/?$")
            .unwrap()
    })
}

/// Parse owner/repo out of a remote URL
pub fn parse_remote_url(url: &str) -> Option<RemoteRepository> {
    let captures = remote_url_re().captures(url.trim())?;
    Some(RemoteRepository {
        owner: captures["owner"].to_string(),
        repo: captures["repo"].to_string(),
    })
}

/// Read the `origin` remote of the repository in the current directory
///
/// Returns `None` when git is unavailable, the directory is not a
/// repository, or the remote URL has an unexpected shape.
pub fn infer_repository() -> Option<RemoteRepository> {
    let output = Command::new("git")
        .args(["config", "--get", "remote.origin.url"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let url = String::from_utf8(output.stdout).ok()?;
    let repository = parse_remote_url(&url);
    if repository.is_none() {
        log::debug!("Could not parse origin remote URL {:?}", url.trim());
    }
    repository
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn repo(owner: &str, repo: &str) -> RemoteRepository {
        RemoteRepository {
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }

    #[test]
    fn test_ssh_remote() {
        assert_eq!(
            parse_remote_url("git@github.com:acme/rocket.git"),
            Some(repo("acme", "rocket"))
        );
    }

    #[test]
    fn test_https_remote() {
        assert_eq!(
            parse_remote_url("https://github.com/acme/rocket.git"),
            Some(repo("acme", "rocket"))
        );
        assert_eq!(
            parse_remote_url("https://github.com/acme/rocket"),
            Some(repo("acme", "rocket"))
        );
    }

    #[test]
    fn test_enterprise_host() {
        assert_eq!(
            parse_remote_url("git@ghe.example.com:acme/rocket.git"),
            Some(repo("acme", "rocket"))
        );
    }

    #[test]
    fn test_trailing_newline_from_git_output() {
        assert_eq!(
            parse_remote_url("git@github.com:acme/rocket.git\n"),
            Some(repo("acme", "rocket"))
        );
    }

    #[test]
    fn test_dot_git_suffix_only_stripped_once() {
        assert_eq!(
            parse_remote_url("https://github.com/acme/rocket.git.git"),
            Some(repo("acme", "rocket.git"))
        );
    }

    #[test]
    fn test_invalid_urls() {
        assert_eq!(parse_remote_url("not a url"), None);
        assert_eq!(parse_remote_url("ssh://elsewhere/acme"), None);
        assert_eq!(parse_remote_url(""), None);
    }
}

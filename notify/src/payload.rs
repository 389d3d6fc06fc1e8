use std::env;

use serde::Serialize;

use crate::error::{NotifyError, Result};

pub const SERVER_URL_VAR: &str = "GITHUB_SERVER_URL";
pub const REPOSITORY_VAR: &str = "GITHUB_REPOSITORY";
pub const REF_VAR: &str = "GITHUB_REF";

/// Pull-request coordinates read from the CI environment.
#[derive(Debug, Clone)]
pub struct PullRequestContext {
    pub server_url: String,
    pub repository: String,
    pub git_ref: String,
}

impl PullRequestContext {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server_url: required_var(SERVER_URL_VAR)?,
            repository: required_var(REPOSITORY_VAR)?,
            git_ref: required_var(REF_VAR)?,
        })
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).map_err(|_| NotifyError::missing_env(name))
}

/// Body of the webhook POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub url: String,
}

impl Notification {
    /// Builds the notification from CI coordinates. A merge or head ref of a
    /// pull request yields the PR page URL and a `PR #<n>` title; any other
    /// ref keeps the ref text as title and points at the repository.
    pub fn from_context(context: &PullRequestContext) -> Self {
        let server = context.server_url.trim_end_matches('/');
        let repo_url = format!("{server}/{}", context.repository);

        match pull_request_number(&context.git_ref) {
            Some(number) => Self {
                title: format!("PR #{number}"),
                url: format!("{repo_url}/pull/{number}"),
            },
            None => Self {
                title: context.git_ref.clone(),
                url: repo_url,
            },
        }
    }
}

/// Extracts `<n>` from `refs/pull/<n>/merge` (or `/head`).
pub fn pull_request_number(git_ref: &str) -> Option<u64> {
    let rest = git_ref.strip_prefix("refs/pull/")?;
    let (number, _) = rest.split_once('/')?;
    number.parse().ok()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn context(git_ref: &str) -> PullRequestContext {
        PullRequestContext {
            server_url: "https://github.com".to_string(),
            repository: "open-chat-labs/minesweeper".to_string(),
            git_ref: git_ref.to_string(),
        }
    }

    #[test]
    fn merge_ref_parses_to_pull_request_number() {
        assert_eq!(pull_request_number("refs/pull/123/merge"), Some(123));
        assert_eq!(pull_request_number("refs/pull/7/head"), Some(7));
    }

    #[test]
    fn non_pull_refs_do_not_parse() {
        assert_eq!(pull_request_number("refs/heads/main"), None);
        assert_eq!(pull_request_number("refs/pull/abc/merge"), None);
        assert_eq!(pull_request_number("refs/pull/123"), None);
    }

    #[test]
    fn pull_ref_builds_pr_url_and_readable_title() {
        let notification = Notification::from_context(&context("refs/pull/123/merge"));

        assert_eq!(
            notification,
            Notification {
                title: "PR #123".to_string(),
                url: "https://github.com/open-chat-labs/minesweeper/pull/123".to_string(),
            }
        );
    }

    #[test]
    fn trailing_slash_on_server_url_is_tolerated() {
        let mut ctx = context("refs/pull/9/merge");
        ctx.server_url = "https://github.com/".to_string();

        let notification = Notification::from_context(&ctx);

        assert_eq!(
            notification.url,
            "https://github.com/open-chat-labs/minesweeper/pull/9"
        );
    }

    #[test]
    fn branch_ref_falls_back_to_repository_url() {
        let notification = Notification::from_context(&context("refs/heads/main"));

        assert_eq!(notification.title, "refs/heads/main");
        assert_eq!(
            notification.url,
            "https://github.com/open-chat-labs/minesweeper"
        );
    }

    #[test]
    fn payload_serializes_title_and_url() {
        let notification = Notification::from_context(&context("refs/pull/123/merge"));
        let encoded = serde_json::to_value(&notification).expect("payload should serialize");

        assert_eq!(encoded["title"], "PR #123");
        assert_eq!(
            encoded["url"],
            "https://github.com/open-chat-labs/minesweeper/pull/123"
        );
    }
}

use serde::Deserialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};

const COMMITS_PER_PAGE: usize = 100;
const USER_AGENT: &str = concat!("jira-issue-linker/", env!("CARGO_PKG_VERSION"));

/// The pull request fields this tool reads. `body` is `None` when the PR has
/// no description at all.
#[derive(Debug, Clone, PartialEq)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub head_ref: String,
}

// ---------------------------------------------------------------------------
// Client abstraction (for testability)
// ---------------------------------------------------------------------------

/// Minimal REST transport. `path` is relative to the API root and may carry a
/// query string.
pub trait GitHubClient {
    fn get(&self, path: &str) -> Result<serde_json::Value>;

    fn patch(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value>;
}

struct DefaultGitHubClient {
    api_url: String,
    token: String,
}

impl DefaultGitHubClient {
    fn request(&self, method: &str, path: &str) -> ureq::Request {
        ureq::request(method, &format!("{}{path}", self.api_url))
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/vnd.github+json")
            .set("X-GitHub-Api-Version", "2022-11-28")
            .set("User-Agent", USER_AGENT)
    }
}

fn describe_error(method: &str, path: &str, err: ureq::Error) -> Error {
    match err {
        ureq::Error::Status(code, response) => {
            let detail = response.into_string().unwrap_or_default();
            Error::GitHub(format!("{method} {path} returned HTTP {code}: {detail}"))
        }
        ureq::Error::Transport(t) => Error::GitHub(format!("{method} {path} failed: {t}")),
    }
}

impl GitHubClient for DefaultGitHubClient {
    fn get(&self, path: &str) -> Result<serde_json::Value> {
        debug!(path, "GET");
        self.request("GET", path)
            .call()
            .map_err(|e| describe_error("GET", path, e))?
            .into_json()
            .map_err(|e| Error::GitHub(format!("failed to parse response of GET {path}: {e}")))
    }

    fn patch(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        debug!(path, "PATCH");
        self.request("PATCH", path)
            .send_json(body)
            .map_err(|e| describe_error("PATCH", path, e))?
            .into_json()
            .map_err(|e| Error::GitHub(format!("failed to parse response of PATCH {path}: {e}")))
    }
}

// ---------------------------------------------------------------------------
// REST response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GhPullRequest {
    number: u64,
    title: String,
    body: Option<String>,
    head: GhHead,
}

#[derive(Debug, Deserialize)]
struct GhHead {
    #[serde(rename = "ref")]
    ref_name: String,
}

#[derive(Debug, Deserialize)]
struct GhCommit {
    commit: GhCommitDetail,
}

#[derive(Debug, Deserialize)]
struct GhCommitDetail {
    message: String,
}

// ---------------------------------------------------------------------------
// GitHubPulls
// ---------------------------------------------------------------------------

/// Pull request reads and writes for one repository.
pub struct GitHubPulls {
    owner: String,
    name: String,
    client: Box<dyn GitHubClient>,
}

impl GitHubPulls {
    pub fn new(config: &Config) -> Self {
        let (owner, name) = config.repo_parts();
        Self::with_client(
            owner,
            name,
            Box::new(DefaultGitHubClient {
                api_url: config.github_api_url.clone(),
                token: config.github_token.clone(),
            }),
        )
    }

    pub fn with_client(owner: &str, name: &str, client: Box<dyn GitHubClient>) -> Self {
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
            client,
        }
    }

    fn pull_path(&self, number: u64) -> String {
        format!("/repos/{}/{}/pulls/{number}", self.owner, self.name)
    }

    pub fn fetch_pull_request(&self, number: u64) -> Result<PullRequest> {
        let data = self.client.get(&self.pull_path(number))?;
        let pr: GhPullRequest = serde_json::from_value(data)
            .map_err(|e| Error::GitHub(format!("failed to parse pull request #{number}: {e}")))?;

        debug!(number = pr.number, head = %pr.head.ref_name, "fetched pull request");
        Ok(PullRequest {
            number: pr.number,
            title: pr.title,
            body: pr.body,
            head_ref: pr.head.ref_name,
        })
    }

    /// Messages of every commit on the PR, oldest first, across all pages.
    pub fn fetch_commit_messages(&self, number: u64) -> Result<Vec<String>> {
        let mut messages = Vec::new();
        let mut page = 1;
        loop {
            let path = format!(
                "{}/commits?per_page={COMMITS_PER_PAGE}&page={page}",
                self.pull_path(number)
            );
            let data = self.client.get(&path)?;
            let commits: Vec<GhCommit> = serde_json::from_value(data).map_err(|e| {
                Error::GitHub(format!("failed to parse commits of #{number}: {e}"))
            })?;

            let count = commits.len();
            messages.extend(commits.into_iter().map(|c| c.commit.message));
            if count < COMMITS_PER_PAGE {
                break;
            }
            page += 1;
        }

        debug!(number, count = messages.len(), "fetched commit messages");
        Ok(messages)
    }

    pub fn update_pull_request(&self, number: u64, title: &str, body: &str) -> Result<()> {
        let payload = serde_json::json!({ "title": title, "body": body });
        self.client.patch(&self.pull_path(number), &payload)?;
        info!(number, "updated pull request");
        Ok(())
    }
}

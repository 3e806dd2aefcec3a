use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::cli::Cli;
use crate::error::{Error, Result};

pub const DEFAULT_PROJECT_KEY: &str = "SCRUM";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Non-secret settings that may live in a checked-in TOML file.
/// Tokens are only accepted from the command line or the environment.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub github_api_url: Option<String>,
    pub repo: Option<String>,
    pub jira_base_url: Option<String>,
    pub jira_user_email: Option<String>,
    pub project_key: Option<String>,
    pub dry_run: Option<bool>,
}

#[derive(Clone, PartialEq)]
pub struct Config {
    pub github_token: String,
    pub github_api_url: String,
    pub repo: String,
    pub pr_number: u64,
    pub jira_base_url: String,
    pub jira_user_email: String,
    pub jira_api_token: String,
    pub project_key: String,
    pub dry_run: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("github_token", &"<redacted>")
            .field("github_api_url", &self.github_api_url)
            .field("repo", &self.repo)
            .field("pr_number", &self.pr_number)
            .field("jira_base_url", &self.jira_base_url)
            .field("jira_user_email", &self.jira_user_email)
            .field("jira_api_token", &"<redacted>")
            .field("project_key", &self.project_key)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Config {
    pub fn load(cli: &Cli) -> Result<Self> {
        let file_config = match cli.config {
            Some(ref path) => {
                let config_path = Path::new(path);
                if !config_path.exists() {
                    return Err(Error::ConfigNotFound(config_path.to_path_buf()));
                }
                let content = std::fs::read_to_string(config_path)?;
                parse_config(&content)?
            }
            None => ConfigFile::default(),
        };

        merge(file_config, cli)
    }

    /// Split `repo` into `(owner, name)`. Validated at load time.
    pub fn repo_parts(&self) -> (&str, &str) {
        self.repo.split_once('/').unwrap_or((self.repo.as_str(), ""))
    }
}

pub fn parse_config(content: &str) -> Result<ConfigFile> {
    let config: ConfigFile = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ConfigFile) -> Result<()> {
    if let Some(ref repo) = config.repo {
        validate_repo(repo)?;
    }
    if let Some(ref key) = config.project_key {
        validate_project_key(key)?;
    }
    if let Some(ref url) = config.jira_base_url {
        validate_url("jira_base_url", url)?;
    }
    if let Some(ref url) = config.github_api_url {
        validate_url("github_api_url", url)?;
    }
    Ok(())
}

fn validate_repo(repo: &str) -> Result<()> {
    match repo.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok(())
        }
        _ => Err(Error::ConfigValidation(format!(
            "repo must be in owner/name form, got: {repo}"
        ))),
    }
}

/// Jira project keys are letters, digits and underscores. Anything else would
/// break the `/rest/api/3/issue/<key>` path.
fn validate_project_key(key: &str) -> Result<()> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        return Err(Error::ConfigValidation(format!(
            "project_key must be non-empty letters, digits or underscores, got: {key:?}"
        )));
    }
    Ok(())
}

fn validate_url(field: &str, url: &str) -> Result<()> {
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(Error::ConfigValidation(format!(
            "{field} must be an http(s) URL, got: {url}"
        )));
    }
    Ok(())
}

fn require<T>(
    value: Option<T>,
    name: &'static str,
    env: &'static str,
    flag: &'static str,
) -> Result<T> {
    value.ok_or(Error::MissingSetting { name, env, flag })
}

/// Merge file settings with CLI/env values. CLI/env wins; required settings
/// are checked in a fixed order so the first missing one is reported.
pub fn merge(file: ConfigFile, cli: &Cli) -> Result<Config> {
    let github_token = require(
        cli.github_token.clone().filter(|s| !s.is_empty()),
        "github token",
        "GITHUB_TOKEN",
        "github-token",
    )?;
    let jira_base_url = require(
        cli.jira_base_url.clone().or(file.jira_base_url),
        "jira base url",
        "JIRA_BASE_URL",
        "jira-base-url",
    )?;
    let jira_user_email = require(
        cli.jira_user_email.clone().or(file.jira_user_email),
        "jira user email",
        "JIRA_USER_EMAIL",
        "jira-user-email",
    )?;
    let jira_api_token = require(
        cli.jira_api_token.clone().filter(|s| !s.is_empty()),
        "jira api token",
        "JIRA_API_TOKEN",
        "jira-api-token",
    )?;
    let repo = require(cli.repo.clone().or(file.repo), "repository", "REPO", "repo")?;
    let pr_number = require(cli.pr_number, "pull request number", "PR_NUMBER", "pr-number")?;

    validate_repo(&repo)?;
    validate_url("jira_base_url", &jira_base_url)?;
    if pr_number == 0 {
        return Err(Error::ConfigValidation("pr_number must be > 0".to_string()));
    }

    let project_key = cli
        .project_key
        .clone()
        .or(file.project_key)
        .unwrap_or_else(|| DEFAULT_PROJECT_KEY.to_string());
    validate_project_key(&project_key)?;

    let github_api_url = cli
        .github_api_url
        .clone()
        .or(file.github_api_url)
        .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string());
    validate_url("github_api_url", &github_api_url)?;

    Ok(Config {
        github_token,
        github_api_url: github_api_url.trim_end_matches('/').to_string(),
        repo,
        pr_number,
        jira_base_url: jira_base_url.trim_end_matches('/').to_string(),
        jira_user_email,
        jira_api_token,
        project_key,
        dry_run: cli.dry_run || file.dry_run.unwrap_or(false),
    })
}

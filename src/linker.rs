use std::collections::BTreeSet;

use tracing::{error, info};

use crate::config::Config;
use crate::error::Result;
use crate::github::{GitHubPulls, PullRequest};
use crate::issue_key::{IssueKey, IssuePattern};
use crate::jira::JiraSource;
use crate::section::{build_section, rewrite_body};
use crate::title::rewrite_title;

/// What a run computed, and whether it was written back.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkOutcome {
    pub keys: Vec<IssueKey>,
    pub title: String,
    pub section: String,
    pub body: String,
    pub updated: bool,
}

/// Keys referenced by the PR title, its branch and its commits, deduplicated
/// and ordered by ordinal.
pub fn collect_issue_keys(
    pattern: &IssuePattern,
    pr: &PullRequest,
    commit_messages: &[String],
) -> Vec<IssueKey> {
    let mut keys = BTreeSet::new();

    let from_title = pattern.extract(&pr.title);
    info!(source = "title", keys = ?from_title, "extracted issues");
    keys.extend(from_title);

    let from_branch = pattern.extract(&pr.head_ref);
    info!(source = "branch", keys = ?from_branch, "extracted issues");
    keys.extend(from_branch);

    for message in commit_messages {
        let from_commit = pattern.extract(message);
        if !from_commit.is_empty() {
            info!(source = "commit", keys = ?from_commit, "extracted issues");
        }
        keys.extend(from_commit);
    }

    keys.into_iter().collect()
}

/// Drives one pass: read the PR, resolve its issues, write the new title and body.
pub struct Linker {
    pulls: GitHubPulls,
    jira: JiraSource,
    pattern: IssuePattern,
    jira_base_url: String,
    dry_run: bool,
}

impl Linker {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_parts(
            GitHubPulls::new(config),
            JiraSource::new(config),
            IssuePattern::new(&config.project_key)?,
            &config.jira_base_url,
            config.dry_run,
        ))
    }

    pub fn with_parts(
        pulls: GitHubPulls,
        jira: JiraSource,
        pattern: IssuePattern,
        jira_base_url: &str,
        dry_run: bool,
    ) -> Self {
        Self {
            pulls,
            jira,
            pattern,
            jira_base_url: jira_base_url.trim_end_matches('/').to_string(),
            dry_run,
        }
    }

    pub fn run(&self, pr_number: u64) -> Result<LinkOutcome> {
        let pr = self.pulls.fetch_pull_request(pr_number)?;
        let commit_messages = self.pulls.fetch_commit_messages(pr_number)?;

        let keys = collect_issue_keys(&self.pattern, &pr, &commit_messages);
        let key_names: Vec<&str> = keys.iter().map(IssueKey::as_str).collect();
        info!(keys = ?key_names, "issues linked to pull request");

        let title = rewrite_title(&pr.title, &self.pattern, &keys);
        info!(title = %title, "new pull request title");

        let records = self.jira.resolve(&keys);
        let section = build_section(&self.jira_base_url, &records);
        info!("new Jira section:\n{section}");

        let body = rewrite_body(pr.body.as_deref(), &section);

        if self.dry_run {
            info!(number = pr_number, "dry run, pull request left unchanged");
            info!("would set body:\n{body}");
            return Ok(LinkOutcome {
                keys,
                title,
                section,
                body,
                updated: false,
            });
        }

        if let Err(e) = self.pulls.update_pull_request(pr_number, &title, &body) {
            error!(number = pr_number, error = %e, "failed to update pull request");
            return Err(e);
        }
        info!(number = pr_number, "successfully updated pull request");

        Ok(LinkOutcome {
            keys,
            title,
            section,
            body,
            updated: true,
        })
    }
}

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use jira_issue_linker::error::{Error, Result};
use jira_issue_linker::github::GitHubClient;
use jira_issue_linker::jira::JiraClient;

pub const JIRA_BASE: &str = "https://acme.atlassian.net";

/// Serves one pull request and its commits; records every PATCH.
pub struct FakeGitHub {
    pub pull: serde_json::Value,
    pub commits: Vec<String>,
    pub fail_patch: bool,
    pub patches: Rc<RefCell<Vec<(String, serde_json::Value)>>>,
}

impl FakeGitHub {
    pub fn new(title: &str, body: Option<&str>, head_ref: &str, commits: &[&str]) -> Self {
        Self {
            pull: serde_json::json!({
                "number": 12,
                "title": title,
                "body": body,
                "head": { "ref": head_ref },
            }),
            commits: commits.iter().map(|c| c.to_string()).collect(),
            fail_patch: false,
            patches: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl GitHubClient for FakeGitHub {
    fn get(&self, path: &str) -> Result<serde_json::Value> {
        if path.contains("/commits") {
            let page: Vec<serde_json::Value> = self
                .commits
                .iter()
                .map(|m| serde_json::json!({ "commit": { "message": m } }))
                .collect();
            Ok(serde_json::Value::Array(page))
        } else {
            Ok(self.pull.clone())
        }
    }

    fn patch(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        if self.fail_patch {
            return Err(Error::GitHub(format!(
                "PATCH {path} returned HTTP 422: Validation Failed"
            )));
        }
        self.patches
            .borrow_mut()
            .push((path.to_string(), body.clone()));
        Ok(serde_json::json!({}))
    }
}

/// Answers from a fixed key → summary table; unknown keys fail like a 404.
pub struct FakeJira {
    pub summaries: HashMap<String, String>,
}

impl FakeJira {
    pub fn new(summaries: &[(&str, &str)]) -> Self {
        Self {
            summaries: summaries
                .iter()
                .map(|(k, s)| (k.to_string(), s.to_string()))
                .collect(),
        }
    }
}

impl JiraClient for FakeJira {
    fn get_issue(&self, key: &str) -> Result<serde_json::Value> {
        match self.summaries.get(key) {
            Some(summary) => Ok(serde_json::json!({ "key": key, "fields": { "summary": summary } })),
            None => Err(Error::Jira(format!("GET /rest/api/3/issue/{key} returned HTTP 404"))),
        }
    }
}

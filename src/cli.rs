use clap::Parser;

/// jira-issue-linker — link Jira issues referenced by a pull request into its title and body
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "jira-issue-linker", version, about)]
pub struct Cli {
    /// GitHub token used to read and update the pull request
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// GitHub REST API root (default: https://api.github.com)
    #[arg(long, env = "GITHUB_API_URL")]
    pub github_api_url: Option<String>,

    /// Repository in owner/name form
    #[arg(long, env = "REPO")]
    pub repo: Option<String>,

    /// Pull request number
    #[arg(long, env = "PR_NUMBER")]
    pub pr_number: Option<u64>,

    /// Jira site root, e.g. https://example.atlassian.net
    #[arg(long, env = "JIRA_BASE_URL")]
    pub jira_base_url: Option<String>,

    /// Jira account email
    #[arg(long, env = "JIRA_USER_EMAIL")]
    pub jira_user_email: Option<String>,

    /// Jira API token
    #[arg(long, env = "JIRA_API_TOKEN", hide_env_values = true)]
    pub jira_api_token: Option<String>,

    /// Jira project key that issue references start with (default: SCRUM)
    #[arg(long, env = "JIRA_PROJECT_KEY")]
    pub project_key: Option<String>,

    /// Compute the new title and body without updating the pull request
    #[arg(long)]
    pub dry_run: bool,

    /// Path to an optional TOML config file
    #[arg(long)]
    pub config: Option<String>,
}

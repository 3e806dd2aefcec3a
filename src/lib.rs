pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod issue_key;
pub mod jira;
pub mod linker;
pub mod section;
pub mod title;

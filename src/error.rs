use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    ConfigValidation(String),

    #[error("missing required setting: {name} (set ${env} or --{flag})")]
    MissingSetting {
        name: &'static str,
        env: &'static str,
        flag: &'static str,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("jira error: {0}")]
    Jira(String),

    #[error("github error: {0}")]
    GitHub(String),
}

pub type Result<T> = std::result::Result<T, Error>;

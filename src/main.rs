use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use jira_issue_linker::cli::Cli;
use jira_issue_linker::config::Config;
use jira_issue_linker::linker::Linker;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    info!("jira-issue-linker starting");

    let config = match Config::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    info!(?config, "config loaded");

    let linker = match Linker::new(&config) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = linker.run(config.pr_number) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

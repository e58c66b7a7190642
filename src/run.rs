use anyhow::Context;
use chrono::Utc;

use crate::cli;
use crate::config::Config;
use crate::github::Repository;
use crate::github::client::GithubClient;
use crate::github::fetch::FetchWindow;
use crate::github::issues::IssueState;
use crate::output;
use crate::report;

const USAGE: &str = "Usage: issuedump extract <owner>/<repo>

Fetches the repository's issues created (or updated) within a rolling time
window and writes them to CSV files.

Environment:
  GH_TOKEN            GitHub token attached to every request (required)
  ISSUE_WINDOW_DAYS   rolling window length in days (default 120)
  ISSUE_DATE_FIELD    filter on \"created\" or \"updated\" time (default created)
  TARGET_LABELS       comma-separated labels that get their own CSV file
  OUTPUT_DIR          directory the CSV files are written to (default .)";

pub async fn run(
    args: Vec<String>,
    mut stdout_additional: Option<&mut dyn std::io::Write>,
) -> anyhow::Result<()> {
    match cli::parser::parse_args(&args) {
        cli::parser::Command::Extract { repo } => {
            let config = Config::from_lookup(|key| std::env::var(key).ok())?;
            let repo: Repository = repo.parse()?;
            extract(&repo, &config, &mut stdout_additional).await
        }
        cli::parser::Command::Help => {
            output::println(USAGE, &mut stdout_additional)?;
            Ok(())
        }
        cli::parser::Command::Unknown(message) => {
            output::println(
                &format!("{message}\nUse `help` for usage."),
                &mut stdout_additional,
            )?;
            Ok(())
        }
    }
}

async fn extract(
    repo: &Repository,
    config: &Config,
    stdout_additional: &mut Option<&mut dyn std::io::Write>,
) -> anyhow::Result<()> {
    let client = GithubClient::new(&config.token).context("Failed to create HTTP client")?;
    let window = FetchWindow::last_days(config.window_days, Utc::now());

    log::info!(
        "fetching issues for {repo} from {} to {}",
        window.since,
        window.until
    );

    let open_issues = client
        .fetch_issues(repo, IssueState::Open, &window, config.date_field)
        .await
        .context("Failed to fetch open issues")?;
    log::info!("{} open issues in window", open_issues.len());

    let closed_issues = client
        .fetch_issues(repo, IssueState::Closed, &window, config.date_field)
        .await
        .context("Failed to fetch closed issues")?;
    log::info!("{} closed issues in window", closed_issues.len());

    let mut issues = open_issues;
    issues.extend(closed_issues);

    let written = report::write_report(&config.out_dir, &issues, &config.target_labels)
        .context("Failed to write CSV report")?;

    output::println(
        &format!("Exported {} issues from {repo}", issues.len()),
        stdout_additional,
    )?;
    for path in written {
        output::println(&format!("  {}", path.display()), stdout_additional)?;
    }

    Ok(())
}

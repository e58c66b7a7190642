use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::github::issues::Issue;

/// Group name for issues matching none of the configured target labels.
pub const OTHER_GROUP: &str = "Other";

const HEADERS: [&str; 10] = [
    "Number",
    "Title",
    "State",
    "Created At",
    "Created Month",
    "Closed At",
    "Closed Month",
    "Days Taken",
    "Labels",
    "URL",
];

/// One CSV row for an issue, with the derived reporting columns.
#[derive(Debug, Serialize, PartialEq)]
pub struct IssueRow {
    pub number: u64,
    pub title: String,
    pub state: String,
    pub created_at: String,
    pub created_month: String,
    pub closed_at: String,
    pub closed_month: String,
    pub days_taken: Option<i64>,
    pub labels: String,
    pub url: String,
}

impl IssueRow {
    pub fn from_issue(issue: &Issue) -> Self {
        IssueRow {
            number: issue.number,
            title: issue.title.clone(),
            state: issue.state.as_str().to_string(),
            created_at: day(issue.created_at),
            created_month: month(issue.created_at),
            closed_at: issue.closed_at.map(day).unwrap_or_default(),
            closed_month: issue.closed_at.map(month).unwrap_or_default(),
            days_taken: issue
                .closed_at
                .map(|closed| (closed.date_naive() - issue.created_at.date_naive()).num_days()),
            labels: issue.labels.join(", "),
            url: issue.html_url.clone(),
        }
    }
}

fn day(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d").to_string()
}

fn month(instant: DateTime<Utc>) -> String {
    instant.format("%b-%Y").to_string()
}

/// Groups issues by the configured target labels, in configuration order,
/// with an `Other` bucket for issues matching none. An issue carrying several
/// target labels lands in each matching group.
pub fn group_by_label<'a>(
    issues: &'a [Issue],
    target_labels: &[String],
) -> Vec<(String, Vec<&'a Issue>)> {
    let mut groups: Vec<(String, Vec<&Issue>)> = target_labels
        .iter()
        .map(|label| (label.clone(), Vec::new()))
        .collect();
    let mut other: Vec<&Issue> = Vec::new();

    for issue in issues {
        let mut matched = false;
        for (label, members) in groups.iter_mut() {
            if issue.labels.iter().any(|candidate| candidate == label) {
                members.push(issue);
                matched = true;
            }
        }
        if !matched {
            other.push(issue);
        }
    }

    groups.push((OTHER_GROUP.to_string(), other));
    groups
}

/// File-name-safe form of a group label (`OS: macOS` becomes `OS_macOS`).
pub fn group_file_stem(label: &str) -> String {
    label.replace(':', "").replace(' ', "_")
}

/// Writes the issues as CSV, header row first, in the order given.
pub fn write_issues_csv<'a, W, I>(writer: W, issues: I) -> Result<()>
where
    W: std::io::Write,
    I: IntoIterator<Item = &'a Issue>,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer
        .write_record(HEADERS)
        .context("Failed to write CSV header")?;
    for issue in issues {
        csv_writer
            .serialize(IssueRow::from_issue(issue))
            .context("Failed to write CSV row")?;
    }
    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Writes `all_issues.csv` plus, when target labels are configured, one CSV
/// per label group into `out_dir`. Returns the paths written.
pub fn write_report(
    out_dir: &Path,
    issues: &[Issue],
    target_labels: &[String],
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let mut written = Vec::new();

    let all_path = out_dir.join("all_issues.csv");
    let file = File::create(&all_path)
        .with_context(|| format!("Failed to create {}", all_path.display()))?;
    write_issues_csv(file, issues)?;
    written.push(all_path);

    if !target_labels.is_empty() {
        for (label, members) in group_by_label(issues, target_labels) {
            let path = out_dir.join(format!("issues_{}.csv", group_file_stem(&label)));
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_issues_csv(file, members)?;
            written.push(path);
        }
    }

    Ok(written)
}

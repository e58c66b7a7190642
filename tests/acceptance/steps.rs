use crate::IssuedumpWorld;
use cucumber::{given, then, when};
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use issuedump::config::Config;
use issuedump::error::ExtractError;
use issuedump::github::issues::{Issue, IssueState};

static SCENARIO_DIRS: AtomicUsize = AtomicUsize::new(0);

#[when(regex = r#"^the user runs "([^"]*)"$"#)]
async fn user_runs(world: &mut IssuedumpWorld, command_line: String) {
    let args: Vec<String> = command_line
        .split_whitespace()
        .map(str::to_string)
        .collect();
    world.captured_output.clear();
    issuedump::run::run(args, Some(&mut world.captured_output))
        .await
        .expect("command should not fail");
}

#[then(regex = r#"^the output contains "([^"]*)"$"#)]
async fn output_contains(world: &mut IssuedumpWorld, expected: String) {
    let output = String::from_utf8(world.captured_output.clone()).expect("output should be UTF-8");
    assert!(
        output.contains(&expected),
        "expected {expected:?} in output:\n{output}"
    );
}

#[given(regex = r#"^an open issue numbered (\d+) created at (\S+) labeled "([^"]*)"$"#)]
async fn given_open_issue(
    world: &mut IssuedumpWorld,
    number: u64,
    created_at: String,
    label: String,
) {
    let created_at: DateTime<Utc> = created_at.parse().expect("valid timestamp");
    let labels = if label.is_empty() {
        Vec::new()
    } else {
        vec![label]
    };
    world.issues.push(Issue {
        number,
        title: format!("Issue {number}"),
        state: IssueState::Open,
        created_at,
        updated_at: created_at,
        closed_at: None,
        labels,
        html_url: format!("https://github.com/octo/repo/issues/{number}"),
    });
}

#[when(regex = r#"^the report is written with target labels "([^"]*)"$"#)]
async fn report_is_written(world: &mut IssuedumpWorld, labels: String) {
    let target_labels: Vec<String> = labels
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect();

    let dir = std::env::temp_dir().join(format!(
        "issuedump-acceptance-{}-{}",
        std::process::id(),
        SCENARIO_DIRS.fetch_add(1, Ordering::Relaxed)
    ));

    issuedump::report::write_report(&dir, &world.issues, &target_labels)
        .expect("report should be written");
    world.report_dir = Some(dir);
}

#[then(regex = r#"^the report directory contains "([^"]*)"$"#)]
async fn report_dir_contains(world: &mut IssuedumpWorld, name: String) {
    let dir = world.report_dir.as_ref().expect("report was written");
    assert!(dir.join(&name).exists(), "missing report file {name}");
}

#[then(regex = r#"^the file "([^"]*)" contains "([^"]*)"$"#)]
async fn report_file_contains(world: &mut IssuedumpWorld, name: String, expected: String) {
    let dir = world.report_dir.as_ref().expect("report was written");
    let content = std::fs::read_to_string(dir.join(&name))
        .unwrap_or_else(|e| panic!("failed to read {name}: {e}"));
    assert!(
        content.contains(&expected),
        "expected {expected:?} in {name}:\n{content}"
    );
}

#[given("no GitHub token is configured")]
async fn no_token_configured(world: &mut IssuedumpWorld) {
    world.config_result = Some(Config::from_lookup(|_| None));
}

#[then("configuration loading fails with a missing token error")]
async fn config_fails_missing_token(world: &mut IssuedumpWorld) {
    let result = world.config_result.as_ref().expect("config was loaded");
    assert!(
        matches!(result, Err(ExtractError::MissingConfig("GH_TOKEN"))),
        "got {result:?}"
    );
}

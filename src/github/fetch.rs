use std::collections::HashSet;
use std::future::Future;

use chrono::{DateTime, Duration, Utc};

use crate::error::ExtractError;
use crate::github::issues::{DateField, Issue, parse_issue_page};

/// Closed UTC interval used to filter issues by creation or update time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl FetchWindow {
    pub fn new(since: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        FetchWindow { since, until }
    }

    /// Rolling window covering the last `days` days up to `now`.
    pub fn last_days(days: i64, now: DateTime<Utc>) -> Self {
        FetchWindow {
            since: now - Duration::days(days),
            until: now,
        }
    }

    /// Both ends inclusive. A window with `since > until` contains nothing.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.since <= instant && instant <= self.until
    }
}

/// Walks a paginated issue listing and returns every issue whose selected
/// timestamp falls inside `window`, in the order the server returned them
/// (pages ascending, items in page order).
///
/// `fetch_page` is called with 1-based page numbers and yields one raw page of
/// the listing. The walk keeps requesting pages until the endpoint returns an
/// explicitly empty page; a short page is not treated as the end of the
/// listing. Pull requests and numbers already seen on an earlier page are
/// dropped. The first error aborts the walk and no issues are returned.
pub async fn fetch_issues<F, Fut>(
    window: &FetchWindow,
    field: DateField,
    mut fetch_page: F,
) -> Result<Vec<Issue>, ExtractError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<serde_json::Value>, ExtractError>>,
{
    let mut all_issues = Vec::new();
    let mut seen = HashSet::new();
    let mut page = 1;

    loop {
        let items = fetch_page(page).await?;

        if items.is_empty() {
            break;
        }

        for issue in parse_issue_page(&items) {
            if window.contains(issue.timestamp(field)) && seen.insert(issue.number) {
                all_issues.push(issue);
            }
        }
        page += 1;
    }

    Ok(all_issues)
}

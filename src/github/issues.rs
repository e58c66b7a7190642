use chrono::{DateTime, Utc};

/// One issue as returned by the repository issue listing.
///
/// Materialized transiently from a page of the listing response; pull requests
/// never make it into this type.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Absent while the issue is open, and occasionally absent on closed
    /// issues as well (the API allows a closed state without a close time).
    pub closed_at: Option<DateTime<Utc>>,
    /// Label names in server order.
    pub labels: Vec<String>,
    pub html_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

/// Which timestamp the fetch window applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Created,
    Updated,
}

impl Issue {
    pub fn timestamp(&self, field: DateField) -> DateTime<Utc> {
        match field {
            DateField::Created => self.created_at,
            DateField::Updated => self.updated_at,
        }
    }
}

/// Parses one page of the issue listing.
///
/// Items carrying a `pull_request` marker are dropped, as are items with
/// missing or malformed required fields. A bad item never fails the page.
pub fn parse_issue_page(items: &[serde_json::Value]) -> Vec<Issue> {
    items.iter().filter_map(parse_issue).collect()
}

fn parse_issue(item: &serde_json::Value) -> Option<Issue> {
    // The mere presence of the marker means the item is a pull request.
    if !item["pull_request"].is_null() {
        return None;
    }

    let number = item["number"].as_u64()?;
    let title = item["title"].as_str()?;
    let state = match item["state"].as_str()? {
        "open" => IssueState::Open,
        "closed" => IssueState::Closed,
        _ => return None,
    };
    let created_at = parse_timestamp(&item["created_at"])?;
    let updated_at = parse_timestamp(&item["updated_at"])?;
    let closed_at = match &item["closed_at"] {
        serde_json::Value::Null => None,
        value => Some(parse_timestamp(value)?),
    };
    let labels = item["labels"]
        .as_array()
        .map(|labels| {
            labels
                .iter()
                .filter_map(|label| label["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    let html_url = item["html_url"].as_str().unwrap_or_default().to_string();

    Some(Issue {
        number,
        title: title.to_string(),
        state,
        created_at,
        updated_at,
        closed_at,
        labels,
        html_url,
    })
}

fn parse_timestamp(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    let raw = value.as_str()?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|instant| instant.with_timezone(&Utc))
}

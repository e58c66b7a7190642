use reqwest::StatusCode;

use crate::error::ExtractError;
use crate::github::Repository;
use crate::github::fetch::{self, FetchWindow};
use crate::github::issues::{DateField, Issue, IssueState};

const API_BASE_URL: &str = "https://api.github.com";
const ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = "issuedump";
const PER_PAGE: u32 = 100;
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Authenticated client for the repository issue listing endpoint.
pub struct GithubClient {
    http: reqwest::Client,
    token: String,
}

impl GithubClient {
    pub fn new(token: &str) -> Result<Self, ExtractError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(GithubClient {
            http,
            token: token.to_string(),
        })
    }

    /// Fetches every issue for `state` whose selected timestamp falls inside
    /// `window`, walking the listing page by page.
    ///
    /// The `since` query parameter narrows the listing server-side by last
    /// update time, which is broader than the requested window; the window
    /// filter in the walk is what actually bounds the result.
    pub async fn fetch_issues(
        &self,
        repo: &Repository,
        state: IssueState,
        window: &FetchWindow,
        field: DateField,
    ) -> Result<Vec<Issue>, ExtractError> {
        fetch::fetch_issues(window, field, |page| {
            self.list_issues_page(repo, state, window, page)
        })
        .await
    }

    async fn list_issues_page(
        &self,
        repo: &Repository,
        state: IssueState,
        window: &FetchWindow,
        page: u32,
    ) -> Result<Vec<serde_json::Value>, ExtractError> {
        let url = format!("{API_BASE_URL}/repos/{}/{}/issues", repo.owner, repo.name);
        let since = window
            .since
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        let per_page = PER_PAGE.to_string();
        let page = page.to_string();

        log::debug!(
            "GET {url} state={} since={since} page={page}",
            state.as_str()
        );

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header("Accept", ACCEPT)
            .header("User-Agent", USER_AGENT)
            .query(&[
                ("state", state.as_str()),
                ("since", since.as_str()),
                ("per_page", per_page.as_str()),
                ("page", page.as_str()),
            ])
            .send()
            .await?;

        check_status(response.status())?;

        let items = response.json::<Vec<serde_json::Value>>().await?;
        Ok(items)
    }
}

fn check_status(status: StatusCode) -> Result<(), ExtractError> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(ExtractError::Unauthorized);
    }
    if !status.is_success() {
        return Err(ExtractError::Api(status.as_u16()));
    }
    Ok(())
}

use thiserror::Error;

/// Failures that abort an extraction run.
///
/// None of these are retried; the first failure ends the current fetch and the
/// caller receives the error instead of partial data.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A required environment variable is not set. Raised before any request
    /// is made.
    #[error("missing required environment variable {0}")]
    MissingConfig(&'static str),

    /// An environment variable is set but cannot be used.
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidConfig {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// A repository argument that is not of the `<owner>/<repo>` form.
    #[error("invalid repository {0:?}; expected <owner>/<repo>")]
    InvalidRepository(String),

    /// GitHub answered 401: the token is missing scopes, invalid or expired.
    #[error("GitHub rejected the token (HTTP 401); check that it is valid and has not expired")]
    Unauthorized,

    /// Any other non-success HTTP status from the API.
    #[error("GitHub API request failed: HTTP {0}")]
    Api(u16),

    /// Connection, timeout or body-decoding failure below the HTTP layer.
    #[error("network error talking to GitHub: {0}")]
    Transport(#[from] reqwest::Error),
}

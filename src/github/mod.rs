pub mod client;
pub mod fetch;
pub mod issues;

use std::fmt;
use std::str::FromStr;

use crate::error::ExtractError;

/// A repository addressed as `<owner>/<repo>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl FromStr for Repository {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty() {
            Ok(Repository {
                owner: parts[0].to_string(),
                name: parts[1].to_string(),
            })
        } else {
            Err(ExtractError::InvalidRepository(s.to_string()))
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

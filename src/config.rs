use std::path::PathBuf;

use crate::error::ExtractError;
use crate::github::issues::DateField;

/// Environment variable names read by [`Config::from_lookup`].
pub mod keys {
    pub const TOKEN: &str = "GH_TOKEN";
    pub const WINDOW_DAYS: &str = "ISSUE_WINDOW_DAYS";
    pub const DATE_FIELD: &str = "ISSUE_DATE_FIELD";
    pub const TARGET_LABELS: &str = "TARGET_LABELS";
    pub const OUTPUT_DIR: &str = "OUTPUT_DIR";
}

const DEFAULT_WINDOW_DAYS: i64 = 120;

/// Runtime configuration for one extraction run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Token attached to every request.
    pub token: String,
    /// Length of the rolling fetch window, in days.
    pub window_days: i64,
    /// Timestamp the window filters on.
    pub date_field: DateField,
    /// Labels that get their own CSV file in the report.
    pub target_labels: Vec<String>,
    /// Directory the CSV files are written to.
    pub out_dir: PathBuf,
}

impl Config {
    /// Builds the configuration from `lookup` (the process environment in
    /// production, a plain map in tests).
    ///
    /// A missing or blank token fails here, before any request is made.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ExtractError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(keys::TOKEN)
            .filter(|token| !token.trim().is_empty())
            .ok_or(ExtractError::MissingConfig(keys::TOKEN))?;

        let window_days = match lookup(keys::WINDOW_DAYS) {
            None => DEFAULT_WINDOW_DAYS,
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|days| *days > 0)
                .ok_or_else(|| ExtractError::InvalidConfig {
                    key: keys::WINDOW_DAYS,
                    value: raw.clone(),
                    reason: "expected a positive number of days".to_string(),
                })?,
        };

        let date_field = match lookup(keys::DATE_FIELD) {
            None => DateField::Created,
            Some(raw) => match raw.trim().to_lowercase().as_str() {
                "created" => DateField::Created,
                "updated" => DateField::Updated,
                _ => {
                    return Err(ExtractError::InvalidConfig {
                        key: keys::DATE_FIELD,
                        value: raw,
                        reason: "expected \"created\" or \"updated\"".to_string(),
                    });
                }
            },
        };

        let target_labels = lookup(keys::TARGET_LABELS)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|label| !label.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let out_dir = lookup(keys::OUTPUT_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Config {
            token,
            window_days,
            date_field,
            target_labels,
            out_dir,
        })
    }
}

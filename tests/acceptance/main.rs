use cucumber::World;
use std::path::PathBuf;

use issuedump::config::Config;
use issuedump::error::ExtractError;
use issuedump::github::issues::Issue;

#[derive(Debug, Default, World)]
pub struct IssuedumpWorld {
    pub captured_output: Vec<u8>,
    pub issues: Vec<Issue>,
    pub report_dir: Option<PathBuf>,
    pub config_result: Option<Result<Config, ExtractError>>,
}

#[tokio::main]
async fn main() {
    IssuedumpWorld::run("features").await;
}

mod steps;

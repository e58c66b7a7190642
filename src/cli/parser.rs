/// Enum representing CLI commands
#[derive(Debug, PartialEq)]
pub enum Command {
    Extract { repo: String },
    Help,
    Unknown(String),
}

/// Parse command line arguments and return a Command
///
/// # Arguments
/// * `args` - Command line arguments (including program name)
///
/// # Returns
/// * `Command` - The parsed command
pub fn parse_args(args: &[String]) -> Command {
    match args.len() {
        0 | 1 => Command::Help,
        2 => match args[1].as_str() {
            "help" => Command::Help,
            "extract" => Command::Unknown(
                "Missing repository argument. Usage: issuedump extract <owner>/<repo>".to_string(),
            ),
            cmd => Command::Unknown(cmd.to_string()),
        },
        _ => match args[1].as_str() {
            "extract" => {
                let repo_arg = &args[2];
                let parts: Vec<&str> = repo_arg.split('/').collect();
                if parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty() {
                    Command::Extract {
                        repo: repo_arg.clone(),
                    }
                } else {
                    Command::Unknown(
                        "Invalid repository format. Please use <owner>/<repo>.".to_string(),
                    )
                }
            }
            cmd => Command::Unknown(cmd.to_string()),
        },
    }
}

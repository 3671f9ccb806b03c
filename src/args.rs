use clap::{ArgAction, Parser};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const AFTER_HELP: &str = "\
Token requirements:
  - Must have 'repo' scope for private repositories
  - Must have 'workflow' scope to trigger workflows

Example:
  bug-dispatch --token ghp_abc123 --title \"Login Crash\" \\
    --description \"App crashes on login screen\"";

/// Trigger the bug analysis workflow with a bug title and description.
#[derive(Parser, Debug)]
#[command(version, after_help = AFTER_HELP)]
pub struct Args {
    /// GitHub personal access token
    #[arg(short = 't', long, required = true)]
    pub token: String,

    /// Bug title
    #[arg(short = 'T', long, required = true)]
    pub title: String,

    /// Bug description
    #[arg(short = 'd', long, required = true)]
    pub description: String,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(long, default_value = DEFAULT_API_URL, hide = true)]
    pub api_url: String,
}

impl Args {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

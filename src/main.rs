use anyhow::Result;
use args::Args;
use clap::Parser;
use console::Console;
use dispatch::BugReport;
use runner::Runner;
use std::process::ExitCode;

mod api_client;
mod args;
mod console;
mod dispatch;
mod error;
mod runner;
mod token_check;

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .format_timestamp(None)
        .init();

    let report = BugReport::new(args.title, args.description);
    let console = Console::stdout(args.no_color);
    let mut runner = Runner::new(args.api_url, console, dispatch::TARGET);

    Ok(runner.run(&args.token, &report)?.exit_code())
}

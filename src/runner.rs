use crate::{
    api_client::ApiClient,
    console::{Console, Tone},
    dispatch::{self, BugReport, DispatchTarget},
    error::Error,
    token_check::{self, TokenStatus},
};
use reqwest::StatusCode;
use std::{io, process::ExitCode};

const RULE_WIDTH: usize = 50;
const NEW_TOKEN_URL: &str = "https://github.com/settings/tokens/new?scopes=repo,workflow";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Dispatched,
    TokenRejected,
    DispatchFailed,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Dispatched => ExitCode::SUCCESS,
            Outcome::TokenRejected | Outcome::DispatchFailed => ExitCode::FAILURE,
        }
    }
}

#[derive(Debug)]
pub struct Runner<W> {
    api_url: String,
    console: Console<W>,
    target: DispatchTarget,
}

impl<W: io::Write> Runner<W> {
    pub fn new(api_url: impl Into<String>, console: Console<W>, target: DispatchTarget) -> Self {
        Self {
            api_url: api_url.into(),
            console,
            target,
        }
    }

    pub fn run(&mut self, token: &str, report: &BugReport) -> io::Result<Outcome> {
        self.print_banner()?;

        let Some(client) = self.check_token(token)? else {
            return Ok(Outcome::TokenRejected);
        };

        if self.dispatch(&client, report)? {
            Ok(Outcome::Dispatched)
        } else {
            Ok(Outcome::DispatchFailed)
        }
    }

    pub fn into_console(self) -> Console<W> {
        self.console
    }

    fn print_banner(&mut self) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        self.console.line(&rule)?;
        self.console.emphasized(Tone::Banner, "🧠 Claude Bug Analyzer")?;
        self.console.line(&rule)
    }

    /// Builds the client for `token` and confirms it, yielding the client
    /// only when dispatch may proceed.
    fn check_token(&mut self, token: &str) -> io::Result<Option<ApiClient>> {
        self.console.styled(Tone::Info, "🔐 Checking GitHub token validity...")?;

        let client = match ApiClient::with_base_url(&self.api_url, token) {
            Ok(client) => client,
            Err(err) => {
                self.console.styled(Tone::Error, format!("❌ Error checking token: {}", err))?;
                return Ok(None);
            }
        };

        match token_check::check_token(&client) {
            Ok(TokenStatus::Valid { login }) => {
                let login = login.as_deref().unwrap_or("unknown");
                self.console.styled(Tone::Success, format!("✅ Token valid for user: {}", login))?;
            }
            Ok(TokenStatus::Unverified { status }) => {
                self.console.styled(
                    Tone::Warning,
                    format!("⚠️ Warning: GitHub API returned code {}", status.as_u16()),
                )?;
            }
            Err(Error::InvalidCredential) => {
                self.console.emphasized(Tone::Error, "❌ Error: Invalid GitHub token")?;
                return Ok(None);
            }
            Err(err) => {
                log::debug!("token check failed: {:?}", err);
                self.console.styled(Tone::Error, format!("❌ Error checking token: {}", err))?;
                return Ok(None);
            }
        }

        Ok(Some(client))
    }

    fn dispatch(&mut self, client: &ApiClient, report: &BugReport) -> io::Result<bool> {
        self.console.styled(Tone::Info, "📣 Sending bug to Claude for analysis:")?;
        self.console.line(format!("  Repository: {}", self.target.full_name()))?;
        self.console.line(format!("  Event type: {}", self.target.event_type))?;
        self.console.line(format!("  Title: {}", report.title))?;
        self.console.line(format!("  Description: {}", report.description_preview()))?;

        self.console.styled(Tone::Info, "📤 Sending request to GitHub API...")?;

        match dispatch::send_dispatch(client, &self.target, report) {
            Ok(()) => {
                self.print_next_steps()?;
                Ok(true)
            }
            Err(Error::Transport(err)) => {
                self.console.emphasized(Tone::Error, format!("❌ Error: {}", err))?;
                Ok(false)
            }
            Err(err) => {
                self.print_rejection(&err)?;
                Ok(false)
            }
        }
    }

    fn print_next_steps(&mut self) -> io::Result<()> {
        self.console.emphasized(Tone::Success, "✅ Success! Bug sent to Claude for analysis.")?;
        self.console.styled(Tone::Info, "👀 The workflow will:")?;
        self.console.line("  1. Create an issue with your bug details")?;
        self.console.line("  2. Ask Claude to analyze the bug")?;
        self.console.line("  3. Post Claude's analysis as a comment on the issue")?;
        self.console.blank()?;
        self.console.styled(Tone::Info, "Check the GitHub Actions tab for workflow runs:")?;
        self.console.line(format!("    {}", self.target.actions_url()))?;
        self.console.blank()?;
        self.console.styled(
            Tone::Info,
            "And the Issues tab for Claude's analysis (may take a minute):",
        )?;
        self.console.line(format!("    {}", self.target.issues_url()))
    }

    fn print_rejection(&mut self, err: &Error) -> io::Result<()> {
        let status = err.status().map(|s| s.as_u16()).unwrap_or_default();
        self.console.emphasized(
            Tone::Error,
            format!("❌ Error: GitHub API returned status code {}", status),
        )?;
        self.console.line(format!(
            "Response: {}",
            dispatch::format_response_body(err.body().unwrap_or_default())
        ))?;

        if err.status() == Some(StatusCode::FORBIDDEN) {
            self.console.blank()?;
            self.console.styled(
                Tone::Warning,
                "🔒 This is likely a permissions issue. Your token needs:",
            )?;
            self.console.line("  1. 'repo' scope for accessing this repository")?;
            self.console.line("  2. 'workflow' scope for triggering workflows")?;
            self.console.blank()?;
            self.console.styled(
                Tone::Info,
                "Try generating a new token with the correct permissions:",
            )?;
            self.console.line(NEW_TOKEN_URL)?;
        }

        Ok(())
    }
}

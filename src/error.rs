use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The identity endpoint rejected the credential.
    #[error("invalid GitHub token")]
    InvalidCredential,

    /// The dispatch endpoint refused the request, usually a scope problem.
    #[error("permission denied")]
    PermissionDenied { body: String },

    #[error("GitHub API returned status code {}", .status.as_u16())]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl Error {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::InvalidCredential => Some(StatusCode::UNAUTHORIZED),
            Error::PermissionDenied { .. } => Some(StatusCode::FORBIDDEN),
            Error::UnexpectedStatus { status, .. } => Some(*status),
            Error::Transport(err) => err.status(),
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            Error::PermissionDenied { body } | Error::UnexpectedStatus { body, .. } => Some(body),
            Error::InvalidCredential | Error::Transport(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

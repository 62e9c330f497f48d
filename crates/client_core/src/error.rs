use thiserror::Error;

/// Coarse failure taxonomy. Both kinds render identically as
/// `DisplayState::Failed`; the distinction only reaches diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Application,
}

impl FailureKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Application => "application",
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum InvocationError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("server returned {status}: {message}")]
    Application { status: u16, message: String },
    #[error("malformed response body: {0}")]
    MalformedResponse(String),
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl InvocationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Transport(_) | Self::InvalidEndpoint(_) => FailureKind::Transport,
            Self::Application { .. } | Self::MalformedResponse(_) => FailureKind::Application,
        }
    }

    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("request timed out: {err}"))
        } else {
            Self::Transport(err.to_string())
        }
    }
}

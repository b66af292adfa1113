use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failure taxonomy for every flow in the client. Handlers return these and
/// `main` prints the single-line message; the cause chain is shown only
/// when `--debug` is set.
#[derive(Debug, Error)]
pub enum DdapError {
    #[error("no saved session; run `ddap login` first")]
    SessionNotFound,

    #[error("session file [{}] is corrupt; re-run `ddap login`", .path.display())]
    SessionCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("could not reach backend at [{url}]")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{context}: {status} {message}")]
    Backend {
        context: String,
        status: u16,
        message: String,
    },

    #[error("protocol violation: {0}")]
    Protocol(String),

    #[error("exceeded the {}s timeout waiting for {waiting_for}", .ceiling.as_secs())]
    Timeout {
        waiting_for: String,
        ceiling: Duration,
    },

    #[error("unable to access [{}]", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    AmbiguousInput(String),

    #[error("could not build the HTTP client")]
    Client(#[source] reqwest::Error),
}

impl DdapError {
    pub(crate) fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        DdapError::Transport {
            url: url.into(),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DdapError::Io {
            path: path.into(),
            source,
        }
    }
}

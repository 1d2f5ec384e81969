// src/fetch/visit.rs
// =============================================================================
// The outcome of fetching one URL.
//
// Every URL handed to the dispatcher produces exactly one Visit, whether the
// request worked or not. Failures are captured here as data instead of being
// propagated, so one bad URL never aborts the batch.
// =============================================================================

use serde::Serialize;

// Why a fetch produced no measurement
//
// Variants carry the underlying message as a String so a Visit stays Clone
// and can be serialized for --json output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum FetchError {
    /// The request could not be built (malformed URL, unsupported scheme)
    #[error("cannot create a valid request: {0}")]
    InvalidRequest(String),
    /// No response headers within the timeout
    #[error("{0}")]
    Timeout(String),
    /// DNS failure, connection refused, TLS handshake failure
    #[error("{0}")]
    Connect(String),
    /// Redirect loop or too many redirects
    #[error("{0}")]
    Redirect(String),
    /// Any other transport failure
    #[error("{0}")]
    Transport(String),
    /// Headers arrived but the body could not be read in full
    #[error("cannot read response: {0}")]
    Read(String),
    /// The task running the fetch died before reporting back
    #[error("fetch aborted: {0}")]
    Aborted(String),
}

impl FetchError {
    // Sorts a reqwest failure into our taxonomy, the same way the link
    // checker sorted its request errors into statuses.
    pub fn from_transport(error: reqwest::Error) -> Self {
        let message = error.to_string();

        if error.is_builder() {
            FetchError::InvalidRequest(message)
        } else if error.is_timeout() {
            FetchError::Timeout(message)
        } else if error.is_redirect() {
            FetchError::Redirect(message)
        } else if error.is_connect() {
            FetchError::Connect(message)
        } else {
            FetchError::Transport(message)
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout(_))
    }
}

/// One measured (or failed) URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Visit {
    /// The URL exactly as given on the command line
    pub url: String,
    /// Bytes in the dumped response (status line + headers + body), 0 on failure
    pub body_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FetchError>,
}

impl Visit {
    pub fn measured(url: impl Into<String>, body_size: usize) -> Self {
        Visit {
            url: url.into(),
            body_size,
            error: None,
        }
    }

    pub fn failed(url: impl Into<String>, error: FetchError) -> Self {
        Visit {
            url: url.into(),
            body_size: 0,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

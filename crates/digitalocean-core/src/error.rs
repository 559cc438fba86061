//! Error types for DigitalOcean API operations.
//!
//! Every failure a dispatch can produce is a value of [`Error`]; nothing in
//! the engine panics or retries. Remote failures carry the server's
//! structured envelope when one was returned, and bare status codes when it
//! was not.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main error type for DigitalOcean API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The request body could not be serialized.
    #[error("failed to encode request body for {target}")]
    Encode {
        /// Type that failed to serialize.
        target: &'static str,
        /// Underlying serialization failure.
        #[source]
        source: serde_json::Error,
    },

    /// Base, path, and query did not form a valid request target.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The call exceeded the fixed per-request timeout.
    #[error("request timed out")]
    Timeout(#[source] reqwest::Error),

    /// No response was obtained (connection or protocol failure).
    #[error("transport failure")]
    Transport(#[source] reqwest::Error),

    /// The server returned a structured error body.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// A 4xx status whose body did not parse as a remote error envelope.
    #[error("remote error with unrecognized body (status {0})")]
    UnclassifiedRemote(u16),

    /// A status outside both the success and structured-error ranges.
    #[error("unacceptable status code {0}")]
    UnacceptableStatus(u16),

    /// Success status, but no bytes for a type expecting decodable content.
    #[error("missing response body for {target}")]
    MissingBody {
        /// Type that expected a body.
        target: &'static str,
    },

    /// Success status and bytes present, but not matching the expected shape.
    #[error("failed to decode response body for {target}")]
    Decode {
        /// Type that failed to deserialize.
        target: &'static str,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Specialized result type for DigitalOcean API operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns a stable code identifying the error kind.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Encode { .. } => "ENCODE_FAILURE",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::Timeout(_) => "TIMEOUT",
            Self::Transport(_) => "TRANSPORT_FAILURE",
            Self::Remote(_) => "REMOTE_ERROR",
            Self::UnclassifiedRemote(_) => "UNCLASSIFIED_REMOTE_ERROR",
            Self::UnacceptableStatus(_) => "UNACCEPTABLE_STATUS",
            Self::MissingBody { .. } => "MISSING_BODY",
            Self::Decode { .. } => "DECODE_FAILURE",
        }
    }

    /// HTTP status associated with the failure, when one was observed.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote(remote) => remote.status,
            Self::UnclassifiedRemote(code) | Self::UnacceptableStatus(code) => Some(*code),
            _ => None,
        }
    }

    /// Returns true when the server reported a structured error.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Transport(err)
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

/// Structured error body the API returns for most 4xx failures.
///
/// The wire shape is `{"id": …, "message": …}`; `status` is filled in from
/// the transport status code after parsing and never trusted from the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteError {
    /// Machine-readable error identifier (e.g. `not_found`).
    pub id: String,
    /// Human-readable description.
    pub message: String,
    /// HTTP status of the response that carried this envelope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "remote error {}", self.id)?;
        if let Some(status) = self.status {
            write!(f, " (status {status})")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for RemoteError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(status: Option<u16>) -> RemoteError {
        RemoteError {
            id: "not_found".to_string(),
            message: "The resource you were accessing could not be found.".to_string(),
            status,
        }
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(
            Error::InvalidEndpoint("nope".to_string()).error_code(),
            "INVALID_ENDPOINT"
        );
        assert_eq!(Error::Remote(remote(Some(404))).error_code(), "REMOTE_ERROR");
        assert_eq!(
            Error::UnclassifiedRemote(422).error_code(),
            "UNCLASSIFIED_REMOTE_ERROR"
        );
        assert_eq!(
            Error::UnacceptableStatus(500).error_code(),
            "UNACCEPTABLE_STATUS"
        );
        assert_eq!(
            Error::MissingBody { target: "Account" }.error_code(),
            "MISSING_BODY"
        );
    }

    #[test]
    fn status_is_surfaced_for_remote_kinds_only() {
        assert_eq!(Error::Remote(remote(Some(404))).status(), Some(404));
        assert_eq!(Error::UnclassifiedRemote(409).status(), Some(409));
        assert_eq!(Error::UnacceptableStatus(503).status(), Some(503));
        assert_eq!(Error::InvalidEndpoint(String::new()).status(), None);
        assert_eq!(Error::MissingBody { target: "T" }.status(), None);
    }

    #[test]
    fn remote_error_display_includes_status_when_known() {
        assert_eq!(
            remote(Some(404)).to_string(),
            "remote error not_found (status 404): The resource you were accessing could not be found."
        );
        assert_eq!(
            remote(None).to_string(),
            "remote error not_found: The resource you were accessing could not be found."
        );
    }

    #[test]
    fn remote_error_parses_the_wire_envelope() {
        let parsed: RemoteError =
            serde_json::from_str(r#"{"id":"forbidden","message":"You are not allowed."}"#).unwrap();
        assert_eq!(parsed.id, "forbidden");
        assert_eq!(parsed.message, "You are not allowed.");
        assert_eq!(parsed.status, None);
    }

    #[test]
    fn from_url_parse_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        let err: Error = err.into();
        assert!(matches!(err, Error::InvalidEndpoint(_)));
    }

    #[test]
    fn is_remote() {
        assert!(Error::Remote(remote(None)).is_remote());
        assert!(!Error::UnclassifiedRemote(400).is_remote());
    }
}

//! Error types for Gitea API operations

use thiserror::Error;

/// Result type for Gitea API operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to a Gitea instance
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level HTTP error (connection, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Gitea API error: {url} returned {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Request URL
        url: String,
        /// Response body, as far as it could be read
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (attachment files, archive file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// HTTP status of an API error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the API reported 404 Not Found
    ///
    /// Several sub-resource endpoints (reactions, dependencies, attachments)
    /// return 404 on instances or issues that predate the feature; call
    /// sites treat that as an empty collection.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// True when the API reported 409 Conflict (resource already exists)
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status() {
        let err = Error::Api {
            status: 404,
            url: "http://gitea.example.com/api/v1/repos/o/r/issues".to_string(),
            message: "Not Found".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_conflict());
    }

    #[test]
    fn test_non_api_error_has_no_status() {
        let err = Error::Other("boom".to_string());
        assert_eq!(err.status(), None);
        assert!(!err.is_not_found());
    }
}

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for entity REST operations
///
/// Every non-2xx response and every transport failure is an [`RestError::Http`];
/// the remaining variants never left the machine or describe a 2xx body that
/// could not be decoded.
#[derive(Debug, Error)]
pub enum RestError {
    /// Non-2xx response, or a transport failure mapped to status 500
    #[error("HTTP error {status}: {body}")]
    Http {
        status: u16,
        body: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Name lookup matched no entity
    #[error("entity not found: no entity named \"{name}\"")]
    NotFound { name: String },

    /// Import file does not exist
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Import file exists but could not be read
    #[error("cannot read file {}: {source}", .path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Argument expected to be a UUID is not one
    #[error("invalid entity id: {0:?}")]
    InvalidId(String),

    /// Argument that cannot be interpreted, e.g. an unknown conflict strategy
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Create/update called without a document
    #[error("empty payload: a JSON document is required")]
    EmptyPayload,

    /// Request building error
    #[error("failed to build request: {0}")]
    RequestBuild(String),

    /// Successful response whose body does not have the expected shape
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RestError {
    /// Create a new HTTP error
    pub fn http(status: u16, body: String, source: Option<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        RestError::Http { status, body, source }
    }

    /// Map a transport failure (DNS, refused connection, I/O) to a synthetic 500
    pub fn transport(err: reqwest::Error) -> Self {
        RestError::Http {
            status: 500,
            body: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Check if this error is a not found error (404 or a name miss)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RestError::NotFound { .. } | RestError::Http { status: 404, .. }
        )
    }

    /// Check whether the failure happened before any request was sent
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            RestError::FileNotFound(_)
                | RestError::FileUnreadable { .. }
                | RestError::InvalidId(_)
                | RestError::InvalidArgument(_)
                | RestError::EmptyPayload
                | RestError::RequestBuild(_)
                | RestError::UrlParse(_)
        )
    }

    /// Get the HTTP status code, if this error carries one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RestError::Http { status, .. } => Some(*status),
            RestError::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    /// Raw response body of an HTTP error
    pub fn body(&self) -> Option<&str> {
        match self {
            RestError::Http { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Result type for REST operations
pub type Result<T> = std::result::Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_http_keeps_body() {
        let body = r#"{"status":409,"messages":["Duplicated entity"]}"#;
        let error = RestError::http(409, body.to_string(), None);
        assert_eq!(error.status_code(), Some(409));
        assert_eq!(error.body(), Some(body));
        assert!(error.to_string().contains("Duplicated entity"));
        assert!(!error.is_local());
    }

    #[test]
    fn test_error_not_found() {
        let error = RestError::NotFound {
            name: "no-such-thing".to_string(),
        };
        assert!(error.is_not_found());
        assert_eq!(error.status_code(), Some(404));
        assert!(error.to_string().contains("no-such-thing"));

        assert!(RestError::http(404, String::new(), None).is_not_found());
        assert!(!RestError::http(500, String::new(), None).is_not_found());
    }

    #[test]
    fn test_error_local() {
        assert!(RestError::EmptyPayload.is_local());
        assert!(RestError::InvalidId("abc".to_string()).is_local());
        assert!(RestError::FileNotFound(PathBuf::from("/tmp/missing.zip")).is_local());
        assert!(RestError::FileUnreadable {
            path: PathBuf::from("/tmp/locked.zip"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        }
        .is_local());
        assert!(RestError::RequestBuild("bad header".to_string()).is_local());
        assert_eq!(RestError::EmptyPayload.status_code(), None);
    }
}

//! Error types for ghdeploy-core

use std::fmt;

/// Result type alias for ghdeploy operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ghdeploy operations
#[derive(Debug)]
pub enum Error {
    /// Invalid configuration or missing required input
    Config(String),

    /// HTTP transport error
    Http(String),

    /// GitHub API returned an error response
    Api(String),

    /// GitHub event payload parsing error
    EventParse(String),

    /// Deployment creation acknowledged but no deployment was resolved
    Deployment(String),

    /// I/O error
    Io(std::io::Error),

    /// Runtime error (Tokio, threading, etc.)
    Runtime(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Http(msg) => write!(f, "HTTP error: {}", msg),
            Error::Api(msg) => write!(f, "GitHub API error: {}", msg),
            Error::EventParse(msg) => write!(f, "Event parse error: {}", msg),
            Error::Deployment(msg) => write!(f, "Deployment not created: {}", msg),
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Runtime(msg) => write!(f, "Runtime error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

/// Fieldless error category for zero-cost pattern matching.
///
/// Single byte representation (`#[repr(u8)]`), `Copy`, no allocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorKind {
    /// Configuration error
    Config,
    /// HTTP transport error
    Http,
    /// GitHub API error
    Api,
    /// GitHub event payload parsing error
    EventParse,
    /// Unresolved deployment creation
    Deployment,
    /// I/O operation error
    Io,
    /// Runtime error
    Runtime,
}

impl Error {
    /// Get the error kind — zero allocation, returns a Copy enum.
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Config,
            Error::Http(_) => ErrorKind::Http,
            Error::Api(_) => ErrorKind::Api,
            Error::EventParse(_) => ErrorKind::EventParse,
            Error::Deployment(_) => ErrorKind::Deployment,
            Error::Io(_) => ErrorKind::Io,
            Error::Runtime(_) => ErrorKind::Runtime,
        }
    }

    /// Borrow the error message — zero allocation.
    #[inline]
    pub fn message(&self) -> &str {
        match self {
            Error::Config(msg)
            | Error::Http(msg)
            | Error::Api(msg)
            | Error::EventParse(msg)
            | Error::Deployment(msg)
            | Error::Runtime(msg) => msg,
            Error::Io(_) => "I/O error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_is_copy() {
        let err = Error::Config("test".to_string());
        let k = err.kind();
        let k2 = k; // Copy — no move
        assert_eq!(k, k2);
    }

    #[test]
    fn test_all_error_variants_have_kind() {
        let cases: Vec<(Error, ErrorKind)> = vec![
            (Error::Config("c".into()), ErrorKind::Config),
            (Error::Http("h".into()), ErrorKind::Http),
            (Error::Api("a".into()), ErrorKind::Api),
            (Error::EventParse("ep".into()), ErrorKind::EventParse),
            (Error::Deployment("d".into()), ErrorKind::Deployment),
            (Error::Io(std::io::Error::other("io")), ErrorKind::Io),
            (Error::Runtime("r".into()), ErrorKind::Runtime),
        ];

        for (err, expected_kind) in cases {
            assert_eq!(err.kind(), expected_kind, "Mismatch for {:?}", err);
        }
    }

    #[test]
    fn test_io_error_converts_via_from() {
        let err: Error = std::io::Error::other("disk full").into();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_error_message_borrows() {
        let err = Error::Deployment("Auto-merged".to_string());
        let msg: &str = err.message();
        assert_eq!(msg, "Auto-merged");
    }

    #[test]
    fn test_deployment_error_display_carries_api_message() {
        let err = Error::Deployment("Conflict merging main into topic".to_string());
        let display = format!("{}", err);
        assert!(display.contains("Conflict merging main into topic"));
        assert!(display.starts_with("Deployment not created"));
    }

    #[test]
    fn test_error_messages_never_contain_token_patterns() {
        // Verify that error variant messages don't accidentally include
        // GitHub token patterns (ghp_, gho_, ghs_, github_pat_)
        let token_patterns = ["ghp_", "gho_", "ghs_", "github_pat_", "Bearer "];
        let errors: Vec<Error> = vec![
            Error::Config("config error".into()),
            Error::Http("http error".into()),
            Error::Api("api error".into()),
            Error::Deployment("deployment error".into()),
        ];

        for err in &errors {
            let display = format!("{}", err);
            for pattern in &token_patterns {
                assert!(
                    !display.contains(pattern),
                    "Error Display contains token pattern '{}': {}",
                    pattern,
                    display
                );
            }
        }
    }
}

//! Error types for rules parsing and item collection.

use std::path::PathBuf;

use thiserror::Error;

use crate::Category;

/// Errors from parsing a rules string.
///
/// Parsing stops at the first error, scanning tokens left to right.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    /// The rules string is empty or whitespace-only.
    #[error("Rules string is empty: at least one category/count pair is required")]
    EmptyRules,

    /// A token between commas is empty (1-based position).
    #[error("Token {position} is empty")]
    EmptyToken { position: usize },

    /// A token is not `<category><digits>`.
    #[error("Invalid token '{token}': {fault}")]
    InvalidToken { token: String, fault: TokenFault },

    /// A category appears more than once.
    #[error("Time category '{category}' is given more than once")]
    DuplicateCategory { category: Category },
}

impl RulesError {
    /// Create an invalid token error.
    pub fn invalid(token: impl Into<String>, fault: TokenFault) -> Self {
        Self::InvalidToken {
            token: token.into(),
            fault,
        }
    }
}

/// Why a token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenFault {
    /// The name prefix is not a known category.
    #[error("time category '{0}' is invalid")]
    UnknownCategory(String),

    /// The category is not followed by a count.
    #[error("count is missing")]
    MissingCount,

    /// The count is not a non-negative integer that fits in 32 bits.
    #[error("count '{0}' is not a valid non-negative integer")]
    MalformedCount(String),
}

/// Errors that can occur while collecting items.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("Cannot access '{path}': permission denied")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Cannot access '{path}': no such file or directory")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("Cannot access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A time could not be parsed out of an item.
    #[error("Cannot parse time from '{item}' using format '{format}'")]
    TimeParse { item: String, format: String },

    /// An item read from input is not valid UTF-8 (1-based position).
    #[error("Item {position} from input is not valid UTF-8")]
    NotUtf8 { position: usize },

    /// Reading the item list failed.
    #[error("Failed to read items: {0}")]
    Read(#[source] std::io::Error),

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_io() {
        let err = ScanError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, ScanError::PermissionDenied { .. }));

        let err = ScanError::io(
            "nofile",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        let message = err.to_string();
        assert!(message.contains("Cannot access"));
        assert!(message.contains("nofile"));
    }

    #[test]
    fn test_rules_error_messages_name_the_culprit() {
        let err = RulesError::invalid("foo5", TokenFault::UnknownCategory("foo".into()));
        assert_eq!(
            err.to_string(),
            "Invalid token 'foo5': time category 'foo' is invalid"
        );

        let err = RulesError::DuplicateCategory {
            category: Category::Days,
        };
        assert!(err.to_string().contains("'days'"));
    }
}

//! Error types for oxifleet.
//!
//! This module defines all error types used throughout the oxifleet crate.
//! Store operations are deliberately infallible to callers (backing faults
//! are absorbed at the store boundary); the errors here belong to the outer
//! layers: configuration, database setup, authentication and the HTTP
//! data-access client.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for oxifleet operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Authentication Errors ===
    /// No user matches the supplied email/password pair.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Registration attempted with an email that is already taken.
    #[error("email already exists: {email}")]
    EmailExists {
        /// The conflicting email address.
        email: String,
    },

    // === Dataset Errors ===
    /// Failed to read the collection document from disk.
    #[error("failed to read dataset at {path}: {source}")]
    DatasetRead {
        /// Path to the dataset file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The collection document is not shaped as expected.
    #[error("invalid dataset: {message}")]
    DatasetFormat {
        /// Description of what was wrong with the document.
        message: String,
    },

    // === HTTP Client Errors ===
    /// The server answered with a non-success status.
    #[error("request failed with status {status}: {body}")]
    Api {
        /// The HTTP status code.
        status: u16,
        /// The response body text.
        body: String,
    },

    /// The request never produced a response (transport failure).
    #[error("HTTP error: {0}")]
    Http(String),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for oxifleet operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a new HTTP transport error.
    #[must_use]
    pub fn http(message: impl Into<String>) -> Self {
        Self::Http(message.into())
    }

    /// Create a new API error from a status code and response body.
    #[must_use]
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Create an email-exists error.
    #[must_use]
    pub fn email_exists(email: impl Into<String>) -> Self {
        Self::EmailExists {
            email: email.into(),
        }
    }

    /// Check if this error indicates a failed credential match.
    #[must_use]
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, Self::InvalidCredentials)
    }

    /// Check if this error indicates a duplicate registration email.
    #[must_use]
    pub fn is_email_exists(&self) -> bool {
        matches!(self, Self::EmailExists { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidCredentials;
        assert_eq!(err.to_string(), "invalid email or password");

        let err = Error::internal("test error");
        assert_eq!(err.to_string(), "internal error: test error");
    }

    #[test]
    fn test_error_is_invalid_credentials() {
        assert!(Error::InvalidCredentials.is_invalid_credentials());
        assert!(!Error::internal("test").is_invalid_credentials());
    }

    #[test]
    fn test_error_is_email_exists() {
        let err = Error::email_exists("taken@example.com");
        assert!(err.is_email_exists());
        assert!(!Error::InvalidCredentials.is_email_exists());
    }

    #[test]
    fn test_email_exists_display() {
        let err = Error::email_exists("taken@example.com");
        assert!(err.to_string().contains("taken@example.com"));
    }

    #[test]
    fn test_api_error_display() {
        let err = Error::api(405, "Method Not Allowed");
        let msg = err.to_string();
        assert!(msg.contains("405"));
        assert!(msg.contains("Method Not Allowed"));
    }

    #[test]
    fn test_http_error_display() {
        let err = Error::http("connection refused");
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "invalid listen address".to_string(),
        };
        assert!(err.to_string().contains("invalid listen address"));
    }

    #[test]
    fn test_dataset_format_error_display() {
        let err = Error::DatasetFormat {
            message: "document root must be an object".to_string(),
        };
        assert!(err.to_string().contains("must be an object"));
    }

    #[test]
    fn test_dataset_read_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::DatasetRead {
            path: PathBuf::from("/missing/db.json"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/missing/db.json"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }

    #[test]
    fn test_database_open_error_display() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err = Error::DatabaseOpen {
                path: PathBuf::from("/nonexistent/path/db.sqlite"),
                source: sqlite_err,
            };
            assert!(err.to_string().contains("/nonexistent/path/db.sqlite"));
        }
    }
}

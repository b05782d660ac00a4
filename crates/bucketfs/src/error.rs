// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

// Error types for bucketfs operations

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Path resolution found neither a directory nor an object
    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("No such bucket: {0}")]
    NoSuchBucket(String),

    #[error("Invalid seek offset {0}")]
    InvalidSeek(i64),

    #[error("Object stream is closed: {0}")]
    Closed(String),

    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn not_found<S: AsRef<str>>(path: S) -> Self {
        Error::NotFound(path.as_ref().to_string())
    }

    pub fn no_such_bucket<S: AsRef<str>>(bucket: S) -> Self {
        Error::NoSuchBucket(bucket.as_ref().to_string())
    }

    pub fn closed<S: AsRef<str>>(key: S) -> Self {
        Error::Closed(key.as_ref().to_string())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config(message.into())
    }

    /// True for the synthesized not-found as well as the storage
    /// backend's own "no such key" report.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound(_) => true,
            Error::ObjectStore(object_store::Error::NotFound { .. }) => true,
            Error::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

impl From<serde_yaml_ng::Error> for Error {
    fn from(e: serde_yaml_ng::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::Config(e.to_string())
    }
}

/// Boundary mapping onto the generic file interface, whose callers only
/// distinguish "not found" from everything else.
impl From<Error> for std::io::Error {
    fn from(e: Error) -> Self {
        if e.is_not_found() {
            std::io::Error::new(std::io::ErrorKind::NotFound, e)
        } else {
            match e {
                Error::Io(inner) => inner,
                Error::InvalidSeek(_) => std::io::Error::new(std::io::ErrorKind::InvalidInput, e),
                other => std::io::Error::other(other),
            }
        }
    }
}

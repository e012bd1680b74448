//! Domain error taxonomy and storage outcome mapping.
//!
//! # Responsibility
//! - Define the single error type returned by every store operation.
//! - Translate storage/transport failures into `Internal` errors.
//! - Provide the outcome code and JSON payload consumed by the boundary.
//!
//! # Invariants
//! - Every failure maps to exactly one `ErrorKind`.
//! - Domain rejections (`NotFound`/`Conflict`) never carry a storage source.

use crate::cluster::DbError;
use crate::model::album::NameValidationError;
use rusqlite::ErrorCode;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

type BoxedSource = Box<dyn Error + Send + Sync + 'static>;

/// Failure category shared by store, service and boundary layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed album or image identifier.
    Validation,
    /// Referenced album or image does not exist.
    NotFound,
    /// Referenced album or image already exists.
    Conflict,
    /// Connectivity, query or timeout failure.
    Internal,
}

impl ErrorKind {
    /// Suggested HTTP status for this kind.
    pub fn status_code(self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Internal => 500,
        }
    }

    /// Stable snake_case code used in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        }
    }
}

/// Error returned by album/image store operations.
#[derive(Debug)]
pub enum StoreError {
    Validation(String),
    NotFound(String),
    Conflict(String),
    Internal {
        context: String,
        source: Option<BoxedSource>,
    },
}

impl StoreError {
    /// Builds an internal error with an optional underlying cause.
    pub fn internal(context: impl Into<String>, source: Option<BoxedSource>) -> Self {
        Self::Internal {
            context: context.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Converts the error into the payload serialized by the boundary.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            message: self.to_string(),
            status_code: self.status_code(),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) | Self::NotFound(message) | Self::Conflict(message) => {
                write!(f, "{message}")
            }
            Self::Internal {
                context,
                source: Some(source),
            } => write!(f, "{context}: {source}"),
            Self::Internal {
                context,
                source: None,
            } => write!(f, "{context}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Internal {
                source: Some(source),
                ..
            } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        // Busy/locked means the bounded busy timeout elapsed.
        let context = match value.sqlite_error_code() {
            Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => "DB TIMEOUT",
            _ => "DB ERROR",
        };
        Self::internal(context, Some(Box::new(value)))
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::internal("cluster session failed", Some(Box::new(value)))
    }
}

impl From<NameValidationError> for StoreError {
    fn from(value: NameValidationError) -> Self {
        Self::Validation(value.to_string())
    }
}

/// JSON error payload: message plus suggested status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub status_code: u16,
}

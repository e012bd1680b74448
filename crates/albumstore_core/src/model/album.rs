//! Album read model and identifier validation.
//!
//! # Invariants
//! - Album and image names are 1..=128 characters from `[A-Za-z0-9._-]`.
//! - `.` and `..` are never valid names.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MAX_NAME_CHARS: usize = 128;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid name regex"));

/// Album with its image collection as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    #[serde(rename = "album_name")]
    pub name: String,
    /// Image names in collection order.
    pub images: Vec<String>,
}

/// Which identifier a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Album,
    Image,
}

impl Display for NameKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Album => write!(f, "Album"),
            Self::Image => write!(f, "Image"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameValidationError {
    Empty(NameKind),
    TooLong { kind: NameKind, chars: usize },
    Reserved { kind: NameKind, name: String },
    InvalidCharacters { kind: NameKind, name: String },
}

impl Display for NameValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(kind) => write!(f, "{kind} name cannot be empty"),
            Self::TooLong { kind, chars } => write!(
                f,
                "{kind} name is {chars} characters long; at most {MAX_NAME_CHARS} allowed"
            ),
            Self::Reserved { kind, name } => write!(f, "{kind} name `{name}` is reserved"),
            Self::InvalidCharacters { kind, name } => write!(
                f,
                "{kind} name `{name}` may only contain letters, digits, `.`, `_` and `-`"
            ),
        }
    }
}

impl Error for NameValidationError {}

pub fn validate_album_name(name: &str) -> Result<(), NameValidationError> {
    validate_name(NameKind::Album, name)
}

pub fn validate_image_name(name: &str) -> Result<(), NameValidationError> {
    validate_name(NameKind::Image, name)
}

fn validate_name(kind: NameKind, name: &str) -> Result<(), NameValidationError> {
    if name.is_empty() {
        return Err(NameValidationError::Empty(kind));
    }
    let chars = name.chars().count();
    if chars > MAX_NAME_CHARS {
        return Err(NameValidationError::TooLong { kind, chars });
    }
    if name == "." || name == ".." {
        return Err(NameValidationError::Reserved {
            kind,
            name: name.to_string(),
        });
    }
    if !NAME_RE.is_match(name) {
        return Err(NameValidationError::InvalidCharacters {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

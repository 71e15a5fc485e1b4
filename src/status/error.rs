use std::fmt;

use thiserror::Error;

/// Which backend document a decode error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    Deployment,
    Health,
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Document::Deployment => write!(f, "deployment status"),
            Document::Health => write!(f, "health"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parse,
    Shape,
    Consistency,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Parse => "parse",
            Stage::Shape => "shape",
            Stage::Consistency => "consistency",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Failed to parse {document} response: {message}")]
    Parse { document: Document, message: String },

    #[error("Invalid {document} field '{field}': {reason}")]
    Shape {
        document: Document,
        field: String,
        reason: String,
    },

    #[error("Deployment status {field} mismatch: expected '{expected}', found '{found}'")]
    Consistency {
        field: &'static str,
        expected: String,
        found: String,
    },
}

impl DecodeError {
    pub fn shape(document: Document, field: impl Into<String>, reason: impl Into<String>) -> Self {
        DecodeError::Shape {
            document,
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            DecodeError::Parse { .. } => Stage::Parse,
            DecodeError::Shape { .. } => Stage::Shape,
            DecodeError::Consistency { .. } => Stage::Consistency,
        }
    }

    /// Path of the offending field, if the error names one.
    pub fn field(&self) -> Option<&str> {
        match self {
            DecodeError::Parse { .. } => None,
            DecodeError::Shape { field, .. } => Some(field),
            DecodeError::Consistency { field, .. } => Some(field),
        }
    }
}

//! Standardized API response bodies.

use serde::{Deserialize, Serialize};

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// The HTTP status code.
    pub status: u16,

    /// Reason phrase of the status, e.g. "Not Found".
    pub error: String,

    /// A human-readable explanation specific to this occurrence.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            message: message.into(),
        }
    }

    // Common error constructors
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, "Bad Request", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(401, "Unauthorized", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, "Not Found", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(409, "Conflict", message)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error", "Internal server error")
    }
}

/// A bare confirmation, e.g. after a delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Confirmation of an appended comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentAddedResponse<C> {
    pub message: String,
    pub comment: C,
}

impl<C> CommentAddedResponse<C> {
    pub fn new(comment: C) -> Self {
        Self {
            message: "Comment added successfully".to_string(),
            comment,
        }
    }
}

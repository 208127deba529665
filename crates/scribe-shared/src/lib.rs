//! # Scribe Shared
//!
//! Request and response types of the HTTP API.

pub mod dto;
pub mod response;

pub use response::{CommentAddedResponse, ErrorResponse, MessageResponse};

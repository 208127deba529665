//! Data Transfer Objects - request/response types for the API.
//!
//! Required text fields are modelled as `Option` so that a missing field
//! reaches validation instead of failing deserialization.

use serde::{Deserialize, Serialize};

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Response containing an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

/// POST /api/blogs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

/// PUT /api/blogs/{id}
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

/// POST /api/blogs/{id}/comments
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AddCommentRequest {
    pub comment_text: Option<String>,
}

/// Query string of GET /api/blogs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListBlogsQuery {
    pub search: Option<String>,
    pub author: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_tolerates_missing_fields() {
        let req: CreateBlogRequest = serde_json::from_str(r#"{"title":"Hi"}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("Hi"));
        assert!(req.content.is_none());
        assert!(req.author.is_none());
    }

    #[test]
    fn test_create_request_rejects_wrong_types() {
        let result = serde_json::from_str::<CreateBlogRequest>(r#"{"title":5,"content":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_comment_request_uses_camel_case() {
        let req: AddCommentRequest = serde_json::from_str(r#"{"commentText":"Nice"}"#).unwrap();
        assert_eq!(req.comment_text.as_deref(), Some("Nice"));
    }
}

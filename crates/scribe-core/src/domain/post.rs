use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display name used when no author or commenter name is given.
pub const DEFAULT_AUTHOR: &str = "Anonymous";

/// Blog post entity - a post together with its embedded comment thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
    /// The creating user. Never changes after creation.
    pub owner_user_id: Uuid,
    /// Oldest first. Append-only.
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
}

impl BlogPost {
    /// Create a new post owned by `owner_user_id`.
    ///
    /// A blank or missing author falls back to [`DEFAULT_AUTHOR`].
    pub fn new(owner_user_id: Uuid, title: String, content: String, author: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            author: non_blank(author).unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            owner_user_id,
            comments: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_user_id == user_id
    }

    /// Overwrite the editable fields present in `patch`.
    pub fn apply(&mut self, patch: BlogPatch) {
        if let Some(title) = non_blank(patch.title) {
            self.title = title;
        }
        if let Some(content) = non_blank(patch.content) {
            self.content = content;
        }
        if let Some(author) = non_blank(patch.author) {
            self.author = author;
        }
    }
}

/// A comment as stored on a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub commenter_name: String,
    pub created_at: DateTime<Utc>,
}

/// A comment that has not been written to the store yet.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub text: String,
    pub commenter_name: String,
    pub created_at: DateTime<Utc>,
}

impl NewComment {
    pub fn new(text: String, commenter_name: Option<String>) -> Self {
        Self {
            text,
            commenter_name: non_blank(commenter_name).unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            created_at: Utc::now(),
        }
    }

    pub fn into_comment(self, id: i64) -> Comment {
        Comment {
            id,
            text: self.text,
            commenter_name: self.commenter_name,
            created_at: self.created_at,
        }
    }
}

/// Partial update of a post. Blank or missing fields keep the stored value.
#[derive(Debug, Clone, Default)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

/// Listing filter. Both terms are case-insensitive substrings and combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogFilter {
    search: Option<String>,
    author: Option<String>,
}

impl BlogFilter {
    /// Blank terms are dropped, so `?search=` lists everything.
    pub fn new(search: Option<String>, author: Option<String>) -> Self {
        Self {
            search: non_blank(search),
            author: non_blank(author),
        }
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Evaluate the filter against a post held in memory.
    pub fn matches(&self, post: &BlogPost) -> bool {
        let search_ok = self.search().is_none_or(|term| {
            contains_ignore_case(&post.title, term) || contains_ignore_case(&post.content, term)
        });
        let author_ok = self
            .author()
            .is_none_or(|term| contains_ignore_case(&post.author, term));

        search_ok && author_ok
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// True when the value is missing or whitespace only.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !is_blank(v))
}

//! Blog operations: validation, ownership and store access.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{BlogFilter, BlogPatch, BlogPost, Comment, NewComment, is_blank};
use crate::error::{DomainError, RepoError};
use crate::ports::BlogRepository;

const ENTITY: &str = "Blog";

/// Blog service. Cheap to clone; all clones share one repository.
#[derive(Clone)]
pub struct BlogService {
    repo: Arc<dyn BlogRepository>,
}

impl BlogService {
    pub fn new(repo: Arc<dyn BlogRepository>) -> Self {
        Self { repo }
    }

    /// Create a post owned by `owner_user_id`.
    pub async fn create(
        &self,
        title: String,
        content: String,
        author: Option<String>,
        owner_user_id: Uuid,
    ) -> Result<BlogPost, DomainError> {
        if is_blank(&title) || is_blank(&content) {
            return Err(DomainError::Validation(
                "Title and content are required".to_string(),
            ));
        }

        let post = BlogPost::new(owner_user_id, title, content, author);
        let saved = self.repo.save(post).await?;
        tracing::info!(post_id = %saved.id, owner = %owner_user_id, "Blog post created");

        Ok(saved)
    }

    /// All posts matching `filter`, newest first.
    pub async fn list_filtered(&self, filter: &BlogFilter) -> Result<Vec<BlogPost>, DomainError> {
        Ok(self.repo.find_filtered(filter).await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<BlogPost, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound { entity_type: ENTITY, id })
    }

    /// Apply `patch` to a post owned by `caller_id`. Owner and creation time never change.
    pub async fn update(
        &self,
        id: Uuid,
        caller_id: Uuid,
        patch: BlogPatch,
    ) -> Result<BlogPost, DomainError> {
        let mut post = self.get_by_id(id).await?;
        ensure_owner(&post, caller_id, "update")?;

        post.apply(patch);
        match self.repo.update(post).await {
            Ok(updated) => Ok(updated),
            // Deleted between the read and the write.
            Err(RepoError::NotFound) => Err(DomainError::NotFound { entity_type: ENTITY, id }),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a post owned by `caller_id`, comments included.
    pub async fn delete(&self, id: Uuid, caller_id: Uuid) -> Result<(), DomainError> {
        let post = self.get_by_id(id).await?;
        ensure_owner(&post, caller_id, "delete")?;

        match self.repo.delete(id).await {
            Ok(()) => {
                tracing::info!(post_id = %id, "Blog post deleted");
                Ok(())
            }
            // Deleted concurrently by another request of the owner.
            Err(RepoError::NotFound) => Err(DomainError::NotFound { entity_type: ENTITY, id }),
            Err(e) => Err(e.into()),
        }
    }

    /// Append a comment to any existing post. Callers need not own the post.
    pub async fn append_comment(
        &self,
        id: Uuid,
        commenter_name: Option<String>,
        text: String,
    ) -> Result<Comment, DomainError> {
        if is_blank(&text) {
            return Err(DomainError::Validation("Comment text is required".to_string()));
        }

        match self.repo.push_comment(id, NewComment::new(text, commenter_name)).await {
            Ok(comment) => Ok(comment),
            Err(RepoError::NotFound) => Err(DomainError::NotFound { entity_type: ENTITY, id }),
            Err(e) => Err(e.into()),
        }
    }
}

fn ensure_owner(post: &BlogPost, caller_id: Uuid, action: &str) -> Result<(), DomainError> {
    if post.is_owned_by(caller_id) {
        return Ok(());
    }

    tracing::warn!(post_id = %post.id, caller = %caller_id, action, "Ownership check failed");
    Err(DomainError::Unauthorized(format!(
        "Not authorized to {action} this blog"
    )))
}

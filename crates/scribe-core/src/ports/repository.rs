use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BlogFilter, BlogPost, Comment, NewComment, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Blog post repository.
///
/// `save` writes the post's own fields only; comments are written through
/// [`BlogRepository::push_comment`] and are removed together with their post.
/// Edits go through [`BlogRepository::update`], which never re-creates a post.
#[async_trait]
pub trait BlogRepository: BaseRepository<BlogPost, Uuid> {
    /// Posts matching `filter`, newest first.
    async fn find_filtered(&self, filter: &BlogFilter) -> Result<Vec<BlogPost>, RepoError>;

    /// Overwrite title, content and author of an existing post.
    ///
    /// Returns `RepoError::NotFound` when the post does not exist.
    async fn update(&self, post: BlogPost) -> Result<BlogPost, RepoError>;

    /// Append a comment to the end of a post's thread as a single write.
    ///
    /// Returns `RepoError::NotFound` when the post does not exist.
    async fn push_comment(&self, post_id: Uuid, comment: NewComment) -> Result<Comment, RepoError>;
}

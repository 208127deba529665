//! BlogService behaviour against the in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use scribe_core::domain::{BlogFilter, BlogPatch, BlogPost, Comment, DEFAULT_AUTHOR, NewComment};
use scribe_core::error::RepoError;
use scribe_core::ports::{BaseRepository, BlogRepository};
use scribe_core::{BlogService, DomainError};
use scribe_infra::InMemoryBlogRepository;

fn service() -> BlogService {
    BlogService::new(Arc::new(InMemoryBlogRepository::new()))
}

#[tokio::test]
async fn create_then_get_returns_same_post() {
    let blogs = service();
    let owner = Uuid::new_v4();

    let created = blogs
        .create("Hello".into(), "World".into(), None, owner)
        .await
        .unwrap();
    let fetched = blogs.get_by_id(created.id).await.unwrap();

    assert_eq!(fetched.title, "Hello");
    assert_eq!(fetched.content, "World");
    assert_eq!(fetched.author, DEFAULT_AUTHOR);
    assert_eq!(fetched.owner_user_id, owner);
    assert_eq!(fetched.created_at, created.created_at);
}

#[tokio::test]
async fn create_requires_title_and_content() {
    let blogs = service();
    let owner = Uuid::new_v4();

    for (title, content) in [("", "body"), ("title", ""), ("   ", "body"), ("", "")] {
        let result = blogs
            .create(title.into(), content.into(), Some("Ann".into()), owner)
            .await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    let all = blogs.list_filtered(&BlogFilter::default()).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn search_matches_title_or_content_case_insensitively() {
    let blogs = service();
    let owner = Uuid::new_v4();
    blogs
        .create("Cats are great".into(), "purring".into(), None, owner)
        .await
        .unwrap();
    blogs
        .create("Dog days".into(), "woof".into(), None, owner)
        .await
        .unwrap();

    let found = blogs
        .list_filtered(&BlogFilter::new(Some("cat".into()), None))
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Cats are great");
}

#[tokio::test]
async fn search_term_is_literal_not_a_pattern() {
    let blogs = service();
    let owner = Uuid::new_v4();
    blogs
        .create("100% done".into(), "x".into(), None, owner)
        .await
        .unwrap();
    blogs
        .create("Half done".into(), "x".into(), None, owner)
        .await
        .unwrap();

    let found = blogs
        .list_filtered(&BlogFilter::new(Some("0% d".into()), None))
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "100% done");
}

#[tokio::test]
async fn update_by_non_owner_is_unauthorized_and_changes_nothing() {
    let blogs = service();
    let post = blogs
        .create("Title".into(), "Body".into(), None, Uuid::new_v4())
        .await
        .unwrap();

    let result = blogs
        .update(
            post.id,
            Uuid::new_v4(),
            BlogPatch {
                title: Some("Hijacked".into()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(DomainError::Unauthorized(_))));
    assert_eq!(blogs.get_by_id(post.id).await.unwrap(), post);
}

#[tokio::test]
async fn update_by_owner_with_only_title() {
    let blogs = service();
    let owner = Uuid::new_v4();
    let post = blogs
        .create("Title".into(), "Body".into(), Some("Ann".into()), owner)
        .await
        .unwrap();

    let updated = blogs
        .update(
            post.id,
            owner,
            BlogPatch {
                title: Some("New".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "New");
    assert_eq!(updated.content, "Body");
    assert_eq!(updated.author, "Ann");
    assert_eq!(updated.owner_user_id, owner);
    assert_eq!(updated.created_at, post.created_at);
}

#[tokio::test]
async fn update_missing_post_is_not_found() {
    let result = service()
        .update(Uuid::new_v4(), Uuid::new_v4(), BlogPatch::default())
        .await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn delete_by_owner_then_get_is_not_found() {
    let blogs = service();
    let owner = Uuid::new_v4();
    let post = blogs
        .create("Title".into(), "Body".into(), None, owner)
        .await
        .unwrap();

    let denied = blogs.delete(post.id, Uuid::new_v4()).await;
    assert!(matches!(denied, Err(DomainError::Unauthorized(_))));

    blogs.delete(post.id, owner).await.unwrap();

    let result = blogs.get_by_id(post.id).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn empty_comment_is_rejected_without_touching_thread() {
    let blogs = service();
    let post = blogs
        .create("Title".into(), "Body".into(), None, Uuid::new_v4())
        .await
        .unwrap();

    let result = blogs
        .append_comment(post.id, Some("Bob".into()), "  ".into())
        .await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert!(blogs.get_by_id(post.id).await.unwrap().comments.is_empty());
}

#[tokio::test]
async fn append_comment_grows_thread_by_one_in_order() {
    let blogs = service();
    let post = blogs
        .create("Title".into(), "Body".into(), None, Uuid::new_v4())
        .await
        .unwrap();

    blogs
        .append_comment(post.id, Some("Ann".into()), "first".into())
        .await
        .unwrap();
    blogs
        .append_comment(post.id, None, "second".into())
        .await
        .unwrap();
    let third = blogs
        .append_comment(post.id, Some("Cy".into()), "third".into())
        .await
        .unwrap();

    let thread = blogs.get_by_id(post.id).await.unwrap().comments;
    let texts: Vec<&str> = thread.iter().map(|c| c.text.as_str()).collect();

    assert_eq!(texts, vec!["first", "second", "third"]);
    assert_eq!(thread[1].commenter_name, DEFAULT_AUTHOR);
    assert_eq!(thread[2], third);
}

#[tokio::test]
async fn append_comment_to_missing_post_is_not_found() {
    let result = service()
        .append_comment(Uuid::new_v4(), None, "hello".into())
        .await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

/// Deletes each post right after it is read, as if the owner's DELETE landed
/// between the read and the write of another request.
struct DeleteAfterRead {
    inner: Arc<InMemoryBlogRepository>,
}

#[async_trait]
impl BaseRepository<BlogPost, Uuid> for DeleteAfterRead {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        let found = self.inner.find_by_id(id).await?;
        if found.is_some() {
            self.inner.delete(id).await?;
        }
        Ok(found)
    }

    async fn save(&self, entity: BlogPost) -> Result<BlogPost, RepoError> {
        self.inner.save(entity).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.inner.delete(id).await
    }
}

#[async_trait]
impl BlogRepository for DeleteAfterRead {
    async fn find_filtered(&self, filter: &BlogFilter) -> Result<Vec<BlogPost>, RepoError> {
        self.inner.find_filtered(filter).await
    }

    async fn update(&self, post: BlogPost) -> Result<BlogPost, RepoError> {
        self.inner.update(post).await
    }

    async fn push_comment(&self, post_id: Uuid, comment: NewComment) -> Result<Comment, RepoError> {
        self.inner.push_comment(post_id, comment).await
    }
}

#[tokio::test]
async fn update_racing_delete_is_not_found_and_does_not_recreate() {
    let store = Arc::new(InMemoryBlogRepository::new());
    let owner = Uuid::new_v4();
    let post = BlogService::new(store.clone())
        .create("Old".into(), "Body".into(), None, owner)
        .await
        .unwrap();

    let racing = BlogService::new(Arc::new(DeleteAfterRead { inner: store.clone() }));
    let patch = BlogPatch {
        title: Some("New".into()),
        ..BlogPatch::default()
    };

    let result = racing.update(post.id, owner, patch).await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
    assert!(store.find_by_id(post.id).await.unwrap().is_none());
}

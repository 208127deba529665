//! In-memory repositories - used when no database is configured, and by tests.
//!
//! Data is lost on process restart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::{BlogFilter, BlogPost, Comment, NewComment, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{BaseRepository, BlogRepository, UserRepository};

/// Blog posts in a `HashMap` behind an async `RwLock`.
///
/// Every operation takes the lock once, so each write is atomic per post.
pub struct InMemoryBlogRepository {
    posts: RwLock<HashMap<Uuid, BlogPost>>,
    next_comment_id: AtomicI64,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
            next_comment_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryBlogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<BlogPost, Uuid> for InMemoryBlogRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn save(&self, entity: BlogPost) -> Result<BlogPost, RepoError> {
        let mut posts = self.posts.write().await;

        let stored = match posts.get_mut(&entity.id) {
            Some(existing) => {
                existing.title = entity.title;
                existing.content = entity.content;
                existing.author = entity.author;
                existing.clone()
            }
            None => {
                posts.insert(entity.id, entity.clone());
                entity
            }
        };

        Ok(stored)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.posts.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn find_filtered(&self, filter: &BlogFilter) -> Result<Vec<BlogPost>, RepoError> {
        let posts = self.posts.read().await;

        let mut matching: Vec<BlogPost> = posts
            .values()
            .filter(|post| filter.matches(post))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(matching)
    }

    async fn update(&self, post: BlogPost) -> Result<BlogPost, RepoError> {
        let mut posts = self.posts.write().await;
        let existing = posts.get_mut(&post.id).ok_or(RepoError::NotFound)?;

        existing.title = post.title;
        existing.content = post.content;
        existing.author = post.author;

        Ok(existing.clone())
    }

    async fn push_comment(&self, post_id: Uuid, comment: NewComment) -> Result<Comment, RepoError> {
        let mut posts = self.posts.write().await;
        let post = posts.get_mut(&post_id).ok_or(RepoError::NotFound)?;

        let comment = comment.into_comment(self.next_comment_id.fetch_add(1, Ordering::Relaxed));
        post.comments.push(comment.clone());

        Ok(comment)
    }
}

/// Users in a `HashMap` behind an async `RwLock`. Emails are unique.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn save(&self, entity: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;

        let taken = users
            .values()
            .any(|u| u.id != entity.id && u.email.eq_ignore_ascii_case(&entity.email));
        if taken {
            return Err(RepoError::Constraint("Email already registered".to_string()));
        }

        users.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.users.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn post_at(title: &str, minutes_ago: i64) -> BlogPost {
        let mut post = BlogPost::new(Uuid::new_v4(), title.to_string(), "body".to_string(), None);
        post.created_at = Utc::now() - Duration::minutes(minutes_ago);
        post
    }

    #[tokio::test]
    async fn test_find_filtered_newest_first() {
        let repo = InMemoryBlogRepository::new();
        repo.save(post_at("old", 30)).await.unwrap();
        repo.save(post_at("new", 1)).await.unwrap();
        repo.save(post_at("middle", 10)).await.unwrap();

        let titles: Vec<String> = repo
            .find_filtered(&BlogFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();

        assert_eq!(titles, vec!["new", "middle", "old"]);
    }

    #[tokio::test]
    async fn test_find_filtered_same_timestamp_is_stable() {
        let repo = InMemoryBlogRepository::new();
        let first = post_at("first", 0);
        let mut second = post_at("second", 0);
        second.created_at = first.created_at;
        repo.save(first.clone()).await.unwrap();
        repo.save(second.clone()).await.unwrap();

        let mut expected = vec![first.id, second.id];
        expected.sort_by(|a, b| b.cmp(a));

        for _ in 0..3 {
            let ids: Vec<Uuid> = repo
                .find_filtered(&BlogFilter::default())
                .await
                .unwrap()
                .into_iter()
                .map(|p| p.id)
                .collect();
            assert_eq!(ids, expected);
        }
    }

    #[tokio::test]
    async fn test_update_missing_post_does_not_insert() {
        let repo = InMemoryBlogRepository::new();
        let post = post_at("gone", 0);

        let result = repo.update(post.clone()).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
        assert!(repo.find_by_id(post.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_keeps_comments_and_owner() {
        let repo = InMemoryBlogRepository::new();
        let post = repo.save(post_at("first", 0)).await.unwrap();
        repo.push_comment(post.id, NewComment::new("hi".into(), None))
            .await
            .unwrap();

        let mut edited = post.clone();
        edited.title = "second".to_string();
        edited.owner_user_id = Uuid::new_v4();
        edited.comments.clear();
        let updated = repo.update(edited).await.unwrap();

        assert_eq!(updated.title, "second");
        assert_eq!(updated.owner_user_id, post.owner_user_id);
        assert_eq!(updated.comments.len(), 1);
    }

    #[tokio::test]
    async fn test_save_existing_keeps_comments_and_owner() {
        let repo = InMemoryBlogRepository::new();
        let post = repo.save(post_at("first", 0)).await.unwrap();
        repo.push_comment(post.id, NewComment::new("hi".into(), None))
            .await
            .unwrap();

        let mut edited = post.clone();
        edited.title = "second".to_string();
        edited.owner_user_id = Uuid::new_v4();
        edited.comments.clear();
        let saved = repo.save(edited).await.unwrap();

        assert_eq!(saved.title, "second");
        assert_eq!(saved.owner_user_id, post.owner_user_id);
        assert_eq!(saved.comments.len(), 1);
    }

    #[tokio::test]
    async fn test_push_comment_missing_post() {
        let repo = InMemoryBlogRepository::new();
        let result = repo
            .push_comment(Uuid::new_v4(), NewComment::new("hi".into(), None))
            .await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.save(User::new("A".into(), "a@example.com".into(), "h".into()))
            .await
            .unwrap();

        let result = repo
            .save(User::new("B".into(), "A@example.com".into(), "h".into()))
            .await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }
}

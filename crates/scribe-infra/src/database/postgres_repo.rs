//! PostgreSQL repository implementations.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, LikeExpr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr, Unchanged,
};
use uuid::Uuid;

use scribe_core::domain::{BlogFilter, BlogPost, Comment, NewComment, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{BaseRepository, BlogRepository, UserRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};

fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => RepoError::Constraint(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => RepoError::Reference(msg),
        _ => match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
            _ => RepoError::Query(err.to_string()),
        },
    }
}

/// `%term%` with LIKE wildcards in the term escaped, so the term matches literally.
fn contains_pattern(term: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');

    LikeExpr::new(escaped).escape('\\')
}

/// PostgreSQL blog repository. Comments live in their own table, keyed by post.
pub struct PostgresBlogRepository {
    db: Arc<DbConn>,
}

impl PostgresBlogRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }

    /// Comment rows of the given posts, grouped per post in insertion order.
    async fn comments_for(
        &self,
        post_ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, Vec<comment::Model>>, RepoError> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = CommentEntity::find()
            .filter(comment::Column::PostId.is_in(post_ids))
            .order_by_asc(comment::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        let mut grouped: HashMap<Uuid, Vec<comment::Model>> = HashMap::new();
        for row in rows {
            grouped.entry(row.post_id).or_default().push(row);
        }
        Ok(grouped)
    }

    async fn with_comments(&self, model: post::Model) -> Result<BlogPost, RepoError> {
        let mut comments = self.comments_for(vec![model.id]).await?;
        let thread = comments.remove(&model.id).unwrap_or_default();
        Ok(model.into_domain(thread))
    }
}

#[async_trait]
impl BaseRepository<BlogPost, Uuid> for PostgresBlogRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        tracing::debug!(post_id = %id, "Finding blog post");

        let model = PostEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        match model {
            Some(model) => Ok(Some(self.with_comments(model).await?)),
            None => Ok(None),
        }
    }

    async fn save(&self, entity: BlogPost) -> Result<BlogPost, RepoError> {
        // Owner and creation time are only written by the initial insert.
        let model = PostEntity::insert(post::ActiveModel::from(&entity))
            .on_conflict(
                OnConflict::column(post::Column::Id)
                    .update_columns([
                        post::Column::Title,
                        post::Column::Content,
                        post::Column::Author,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        self.with_comments(model).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl BlogRepository for PostgresBlogRepository {
    async fn find_filtered(&self, filter: &BlogFilter) -> Result<Vec<BlogPost>, RepoError> {
        tracing::debug!(search = ?filter.search(), author = ?filter.author(), "Listing blog posts");

        let mut condition = Condition::all();
        if let Some(term) = filter.search() {
            condition = condition.add(
                Condition::any()
                    .add(Expr::col(post::Column::Title).ilike(contains_pattern(term)))
                    .add(Expr::col(post::Column::Content).ilike(contains_pattern(term))),
            );
        }
        if let Some(term) = filter.author() {
            condition = condition.add(Expr::col(post::Column::Author).ilike(contains_pattern(term)));
        }

        let models = PostEntity::find()
            .filter(condition)
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        let mut comments = self
            .comments_for(models.iter().map(|m| m.id).collect())
            .await?;

        Ok(models
            .into_iter()
            .map(|model| {
                let thread = comments.remove(&model.id).unwrap_or_default();
                model.into_domain(thread)
            })
            .collect())
    }

    async fn update(&self, post: BlogPost) -> Result<BlogPost, RepoError> {
        let changes = post::ActiveModel {
            id: Unchanged(post.id),
            title: Set(post.title),
            content: Set(post.content),
            author: Set(post.author),
            ..Default::default()
        };

        let model = PostEntity::update(changes)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => RepoError::NotFound,
                other => map_db_err(other),
            })?;

        self.with_comments(model).await
    }

    async fn push_comment(&self, post_id: Uuid, comment: NewComment) -> Result<Comment, RepoError> {
        let inserted = comment::ActiveModel::new_for_post(post_id, comment)
            .insert(self.db.as_ref())
            .await
            .map_err(|e| match e.sql_err() {
                // The post is gone, so the row has no parent.
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => RepoError::NotFound,
                _ => map_db_err(e),
            })?;

        tracing::debug!(post_id = %post_id, comment_id = inserted.id, "Comment appended");
        Ok(inserted.into())
    }
}

/// PostgreSQL user repository.
pub struct PostgresUserRepository {
    db: Arc<DbConn>,
}

impl PostgresUserRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for PostgresUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, entity: User) -> Result<User, RepoError> {
        let model = UserEntity::insert(user::ActiveModel::from(entity))
            .on_conflict(
                OnConflict::column(user::Column::Id)
                    .update_columns([
                        user::Column::Name,
                        user::Column::Email,
                        user::Column::PasswordHash,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db.as_ref())
            .await
            .map_err(|e| match map_db_err(e) {
                RepoError::Constraint(_) => {
                    RepoError::Constraint("Email already registered".to_string())
                }
                other => other,
            })?;

        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = UserEntity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = match email.split_once('@') {
            Some((local, domain)) => {
                let first = local.chars().next().map(String::from).unwrap_or_default();
                format!("{first}***@{domain}")
            }
            None => "***".to_string(),
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

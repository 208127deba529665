//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use scribe_core::domain::BlogPost;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub author: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Assemble the domain post from its row and its comment rows (already ordered).
    pub fn into_domain(self, comments: Vec<super::comment::Model>) -> BlogPost {
        BlogPost {
            id: self.id,
            title: self.title,
            content: self.content,
            author: self.author,
            owner_user_id: self.user_id,
            comments: comments.into_iter().map(Into::into).collect(),
            created_at: self.created_at.into(),
        }
    }
}

/// Conversion from Domain BlogPost to SeaORM ActiveModel. Comments are stored separately.
impl From<&BlogPost> for ActiveModel {
    fn from(post: &BlogPost) -> Self {
        Self {
            id: Set(post.id),
            user_id: Set(post.owner_user_id),
            title: Set(post.title.clone()),
            content: Set(post.content.clone()),
            author: Set(post.author.clone()),
            created_at: Set(post.created_at.into()),
        }
    }
}

//! Comment entity for SeaORM. Rows belong to one post and are ordered by `id`.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use scribe_core::domain::{Comment, NewComment};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub post_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub comment_text: String,
    pub commenter: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Comment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            text: model.comment_text,
            commenter_name: model.commenter,
            created_at: model.created_at.into(),
        }
    }
}

impl ActiveModel {
    /// New row for `post_id`; the store assigns the id.
    pub fn new_for_post(post_id: Uuid, comment: NewComment) -> Self {
        Self {
            id: NotSet,
            post_id: Set(post_id),
            comment_text: Set(comment.text),
            commenter: Set(comment.commenter_name),
            created_at: Set(comment.created_at.into()),
        }
    }
}

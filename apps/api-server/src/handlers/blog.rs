//! Blog handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use scribe_core::domain::{BlogFilter, BlogPatch};
use scribe_shared::dto::{
    AddCommentRequest, CreateBlogRequest, ListBlogsQuery, UpdateBlogRequest,
};
use scribe_shared::{CommentAddedResponse, MessageResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/blogs
pub async fn create_blog(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateBlogRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let post = state
        .blogs
        .create(
            req.title.unwrap_or_default(),
            req.content.unwrap_or_default(),
            req.author,
            identity.user_id,
        )
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// GET /api/blogs?search=...&author=...
pub async fn list_blogs(
    state: web::Data<AppState>,
    query: web::Query<ListBlogsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let filter = BlogFilter::new(query.search, query.author);

    let posts = state.blogs.list_filtered(&filter).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/blogs/{id}
pub async fn get_blog(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = state.blogs.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// PUT /api/blogs/{id} - owner only
pub async fn update_blog(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateBlogRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let patch = BlogPatch {
        title: req.title,
        content: req.content,
        author: req.author,
    };

    let post = state
        .blogs
        .update(path.into_inner(), identity.user_id, patch)
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/blogs/{id} - owner only
pub async fn delete_blog(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .blogs
        .delete(path.into_inner(), identity.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Blog deleted successfully")))
}

/// POST /api/blogs/{id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<AddCommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = state
        .blogs
        .append_comment(
            path.into_inner(),
            Some(identity.name),
            body.into_inner().comment_text.unwrap_or_default(),
        )
        .await?;

    Ok(HttpResponse::Created().json(CommentAddedResponse::new(comment)))
}

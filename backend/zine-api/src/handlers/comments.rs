/// Comment handlers - endpoints nested under a parent post
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::Config;
use crate::db::comment_repo;
use crate::error::Result;
use crate::extract::AuthUser;
use crate::models::{Comment, CommentWithAuthor};
use crate::pagination::{Page, PageParams};
use crate::policy;
use crate::scope::CommentScope;

/// Request body for creating a comment. The parent post comes from the URL;
/// any post field in the body is ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
}

/// Request body for replacing a comment (PUT)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
}

/// Request body for partially updating a comment (PATCH)
#[derive(Debug, Deserialize, Validate)]
pub struct PatchCommentRequest {
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: Option<String>,
}

fn with_author(comment: Comment, author: String) -> CommentWithAuthor {
    CommentWithAuthor {
        id: comment.id,
        post_id: comment.post_id,
        author,
        text: comment.text,
        created_at: comment.created_at,
        updated_at: comment.updated_at,
    }
}

/// List a post's comments, oldest first, paginated
pub async fn list_comments(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    post_id: web::Path<Uuid>,
    query: web::Query<PageParams>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let scope = CommentScope::resolve(&pool, *post_id).await?;
    let (limit, offset) = query.clamp(&config.pagination);

    let count = scope.count(&pool).await?;
    let comments = scope.list(&pool, limit, offset).await?;

    Ok(HttpResponse::Ok().json(Page::new(req.path(), &[], limit, offset, count, comments)))
}

/// Create a comment on the addressed post
pub async fn create_comment(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    post_id: web::Path<Uuid>,
    payload: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let scope = CommentScope::resolve(&pool, *post_id).await?;
    payload.validate()?;

    let comment = scope.create(&pool, auth.id, &payload.text).await?;

    tracing::debug!(comment_id = %comment.id, post_id = %scope.post().id, "comment created");

    Ok(HttpResponse::Created().json(with_author(comment, auth.username)))
}

/// Get a single comment of the addressed post
pub async fn get_comment(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let scope = CommentScope::resolve(&pool, post_id).await?;

    let comment = scope.find_with_author(&pool, comment_id).await?;

    Ok(HttpResponse::Ok().json(comment))
}

/// Replace a comment's text; author only
pub async fn update_comment(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    path: web::Path<(Uuid, Uuid)>,
    payload: web::Json<UpdateCommentRequest>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let scope = CommentScope::resolve(&pool, post_id).await?;
    payload.validate()?;

    let comment = scope.find(&pool, comment_id).await?;
    policy::require_author(req.method(), auth.id, &comment, "comment")?;

    let updated = comment_repo::update_comment(&pool, comment.id, &payload.text).await?;

    Ok(HttpResponse::Ok().json(with_author(updated, auth.username)))
}

/// Partially update a comment; author only
pub async fn patch_comment(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    path: web::Path<(Uuid, Uuid)>,
    payload: web::Json<PatchCommentRequest>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let scope = CommentScope::resolve(&pool, post_id).await?;
    payload.validate()?;

    let comment = scope.find(&pool, comment_id).await?;
    policy::require_author(req.method(), auth.id, &comment, "comment")?;

    let updated = match payload.text.as_deref() {
        Some(text) => comment_repo::update_comment(&pool, comment.id, text).await?,
        None => comment,
    };

    Ok(HttpResponse::Ok().json(with_author(updated, auth.username)))
}

/// Delete a comment; author only
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    path: web::Path<(Uuid, Uuid)>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let scope = CommentScope::resolve(&pool, post_id).await?;

    let comment = scope.find(&pool, comment_id).await?;
    policy::require_author(req.method(), auth.id, &comment, "comment")?;

    comment_repo::delete_comment(&pool, comment.id).await?;

    Ok(HttpResponse::NoContent().finish())
}

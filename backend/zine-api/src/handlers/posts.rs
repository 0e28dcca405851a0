/// Post handlers - HTTP endpoints for post operations
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::Config;
use crate::db::post_repo;
use crate::error::{AppError, Result};
use crate::extract::AuthUser;
use crate::models::{Post, PostWithAuthor};
use crate::pagination::{Page, PageParams};
use crate::policy;

/// Request body for creating a post
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
    pub image: Option<String>,
    pub group_id: Option<Uuid>,
}

/// Request body for replacing a post (PUT). Omitted optional fields clear
/// the stored value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
    pub image: Option<String>,
    pub group_id: Option<Uuid>,
}

/// Request body for partially updating a post (PATCH). Omitted fields keep
/// their stored value.
#[derive(Debug, Deserialize, Validate)]
pub struct PatchPostRequest {
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: Option<String>,
    pub image: Option<String>,
    pub group_id: Option<Uuid>,
}

fn with_author(post: Post, author: String) -> PostWithAuthor {
    PostWithAuthor {
        id: post.id,
        author,
        text: post.text,
        image: post.image,
        group_id: post.group_id,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

/// A group id that points nowhere trips the foreign key; surface it as a
/// field error instead of a 500.
fn map_group_fk(err: sqlx::Error) -> AppError {
    let is_group_fk = matches!(
        &err,
        sqlx::Error::Database(db_err)
            if db_err.is_foreign_key_violation()
                && db_err.constraint() == Some("posts_group_id_fkey")
    );

    if is_group_fk {
        AppError::validation("group_id", "group does not exist")
    } else {
        AppError::Database(err)
    }
}

/// List posts, newest first, paginated
pub async fn list_posts(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    query: web::Query<PageParams>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let (limit, offset) = query.clamp(&config.pagination);

    let count = post_repo::count_posts(&pool).await?;
    let posts = post_repo::list_posts_with_authors(&pool, limit, offset).await?;

    Ok(HttpResponse::Ok().json(Page::new(req.path(), &[], limit, offset, count, posts)))
}

/// Create a post authored by the caller
pub async fn create_post(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    payload: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    payload.validate()?;

    let post = post_repo::create_post(
        &pool,
        auth.id,
        &payload.text,
        payload.image.as_deref(),
        payload.group_id,
    )
    .await
    .map_err(map_group_fk)?;

    tracing::debug!(post_id = %post.id, author_id = %auth.id, "post created");

    Ok(HttpResponse::Created().json(with_author(post, auth.username)))
}

/// Get a single post
pub async fn get_post(pool: web::Data<PgPool>, post_id: web::Path<Uuid>) -> Result<HttpResponse> {
    let post = post_repo::find_post_with_author(&pool, *post_id)
        .await?
        .ok_or_else(|| AppError::not_found("post"))?;

    Ok(HttpResponse::Ok().json(post))
}

/// Replace a post's content; author only
pub async fn update_post(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    post_id: web::Path<Uuid>,
    payload: web::Json<UpdatePostRequest>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    payload.validate()?;

    let post = post_repo::find_post_by_id(&pool, *post_id)
        .await?
        .ok_or_else(|| AppError::not_found("post"))?;
    policy::require_author(req.method(), auth.id, &post, "post")?;

    let updated = post_repo::update_post(
        &pool,
        post.id,
        &payload.text,
        payload.image.as_deref(),
        payload.group_id,
    )
    .await
    .map_err(map_group_fk)?;

    Ok(HttpResponse::Ok().json(with_author(updated, auth.username)))
}

/// Partially update a post; author only
pub async fn patch_post(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    post_id: web::Path<Uuid>,
    payload: web::Json<PatchPostRequest>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    payload.validate()?;

    let post = post_repo::find_post_by_id(&pool, *post_id)
        .await?
        .ok_or_else(|| AppError::not_found("post"))?;
    policy::require_author(req.method(), auth.id, &post, "post")?;

    let updated = post_repo::patch_post(
        &pool,
        post.id,
        payload.text.as_deref(),
        payload.image.as_deref(),
        payload.group_id,
    )
    .await
    .map_err(map_group_fk)?;

    Ok(HttpResponse::Ok().json(with_author(updated, auth.username)))
}

/// Delete a post; author only
pub async fn delete_post(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    post_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let post = post_repo::find_post_by_id(&pool, *post_id)
        .await?
        .ok_or_else(|| AppError::not_found("post"))?;
    policy::require_author(req.method(), auth.id, &post, "post")?;

    if post_repo::delete_post(&pool, post.id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(AppError::not_found("post"))
    }
}

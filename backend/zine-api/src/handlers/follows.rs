/// Follow handlers - each caller sees only their own follow list
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::config::Config;
use crate::db::user_repo;
use crate::error::{self, AppError, Result};
use crate::extract::AuthUser;
use crate::models::FollowWithUsers;
use crate::pagination::{Page, PageParams};
use crate::scope::FollowScope;

/// Query parameters for the follow list
#[derive(Debug, Deserialize)]
pub struct FollowListParams {
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for creating a follow edge. The follower is always the
/// caller; only the target username is accepted.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFollowRequest {
    #[validate(length(min = 1, message = "following must not be empty"))]
    pub following: String,
}

/// List the caller's follow edges, optionally filtered by target username
pub async fn list_follows(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    auth: AuthUser,
    query: web::Query<FollowListParams>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let scope = FollowScope::for_user(auth.id).with_search(query.search.clone());
    let page_params = PageParams {
        limit: query.limit,
        offset: query.offset,
    };
    let (limit, offset) = page_params.clamp(&config.pagination);

    let count = scope.count(&pool).await?;
    let follows = scope.list(&pool, limit, offset).await?;

    let extra: Vec<(&str, String)> = match scope.search() {
        Some(term) => vec![("search", term.to_string())],
        None => Vec::new(),
    };

    Ok(HttpResponse::Ok().json(Page::new(req.path(), &extra, limit, offset, count, follows)))
}

/// Follow another user by username
pub async fn create_follow(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    payload: web::Json<CreateFollowRequest>,
) -> Result<HttpResponse> {
    payload.validate()?;

    let target = user_repo::find_user_by_username(&pool, &payload.following)
        .await?
        .ok_or_else(|| AppError::validation("following", "user does not exist"))?;

    let scope = FollowScope::for_user(auth.id);
    let follow = scope.create(&pool, target.id).await.map_err(|err| match err {
        AppError::Database(db) if error::is_unique_violation(&db) => {
            AppError::validation("following", "already following this user")
        }
        other => other,
    })?;

    tracing::debug!(user_id = %auth.id, following_id = %target.id, "follow created");

    Ok(HttpResponse::Created().json(FollowWithUsers {
        id: follow.id,
        user: auth.username,
        following: target.username,
        created_at: follow.created_at,
    }))
}

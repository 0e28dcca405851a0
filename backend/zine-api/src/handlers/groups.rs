/// Group handlers - read-only catalog endpoints
use actix_web::{web, HttpRequest, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::db::group_repo;
use crate::error::{AppError, Result};
use crate::pagination::{Page, PageParams};

/// List groups ordered by title, paginated
pub async fn list_groups(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    query: web::Query<PageParams>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let (limit, offset) = query.clamp(&config.pagination);

    let count = group_repo::count_groups(&pool).await?;
    let groups = group_repo::list_groups(&pool, limit, offset).await?;

    Ok(HttpResponse::Ok().json(Page::new(req.path(), &[], limit, offset, count, groups)))
}

/// Get a single group
pub async fn get_group(
    pool: web::Data<PgPool>,
    group_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let group = group_repo::find_group_by_id(&pool, *group_id)
        .await?
        .ok_or_else(|| AppError::not_found("group"))?;

    Ok(HttpResponse::Ok().json(group))
}

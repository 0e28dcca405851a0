use crate::models::{Follow, FollowWithUsers};
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Insert a follow edge. A duplicate (user_id, following_id) pair trips the
/// unique constraint; callers map that to a validation failure.
pub async fn create_follow(
    pool: &PgPool,
    user_id: Uuid,
    following_id: Uuid,
) -> Result<Follow, sqlx::Error> {
    let follow = sqlx::query_as::<_, Follow>(
        r#"
        INSERT INTO follows (user_id, following_id)
        VALUES ($1, $2)
        RETURNING id, user_id, following_id, created_at
        "#,
    )
    .bind(user_id)
    .bind(following_id)
    .fetch_one(pool)
    .await?;

    Ok(follow)
}

/// List a user's outgoing follow edges, newest first, with both usernames
/// resolved. `search` narrows by target username substring, case-insensitive.
pub async fn list_follows_for_user(
    pool: &PgPool,
    user_id: Uuid,
    search: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<FollowWithUsers>, sqlx::Error> {
    let search_pattern = search.map(|term| format!("%{}%", term));

    let follows = sqlx::query_as::<_, FollowWithUsers>(
        r#"
        SELECT f.id, fu.username AS "user", tu.username AS following, f.created_at
        FROM follows f
        JOIN users fu ON fu.id = f.user_id
        JOIN users tu ON tu.id = f.following_id
        WHERE f.user_id = $1
          AND ($2::text IS NULL OR tu.username ILIKE $2)
        ORDER BY f.created_at DESC, f.id DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(user_id)
    .bind(search_pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(follows)
}

/// Count a user's outgoing follow edges under the same filter as the list
pub async fn count_follows_for_user(
    pool: &PgPool,
    user_id: Uuid,
    search: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let search_pattern = search.map(|term| format!("%{}%", term));

    let row = sqlx::query(
        r#"
        SELECT COUNT(*) as count
        FROM follows f
        JOIN users tu ON tu.id = f.following_id
        WHERE f.user_id = $1
          AND ($2::text IS NULL OR tu.username ILIKE $2)
        "#,
    )
    .bind(user_id)
    .bind(search_pattern)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i64, _>("count"))
}

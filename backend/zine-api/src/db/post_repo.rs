use crate::models::{Post, PostWithAuthor};
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Insert a new post for the given author
/// Returns the created row.
pub async fn create_post(
    pool: &PgPool,
    author_id: Uuid,
    text: &str,
    image: Option<&str>,
    group_id: Option<Uuid>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (author_id, text, image, group_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id, author_id, text, image, group_id, created_at, updated_at
        "#,
    )
    .bind(author_id)
    .bind(text)
    .bind(image)
    .bind(group_id)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID
pub async fn find_post_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, text, image, group_id, created_at, updated_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID with the author's username resolved
pub async fn find_post_with_author(
    pool: &PgPool,
    post_id: Uuid,
) -> Result<Option<PostWithAuthor>, sqlx::Error> {
    let post = sqlx::query_as::<_, PostWithAuthor>(
        r#"
        SELECT p.id, u.username AS author, p.text, p.image, p.group_id,
               p.created_at, p.updated_at
        FROM posts p
        JOIN users u ON u.id = p.author_id
        WHERE p.id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// List posts newest first with author usernames resolved
pub async fn list_posts_with_authors(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostWithAuthor>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostWithAuthor>(
        r#"
        SELECT p.id, u.username AS author, p.text, p.image, p.group_id,
               p.created_at, p.updated_at
        FROM posts p
        JOIN users u ON u.id = p.author_id
        ORDER BY p.created_at DESC, p.id DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Count all posts
pub async fn count_posts(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM posts")
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Replace a post's mutable fields (full update)
pub async fn update_post(
    pool: &PgPool,
    post_id: Uuid,
    text: &str,
    image: Option<&str>,
    group_id: Option<Uuid>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET text = $2, image = $3, group_id = $4, updated_at = NOW()
        WHERE id = $1
        RETURNING id, author_id, text, image, group_id, created_at, updated_at
        "#,
    )
    .bind(post_id)
    .bind(text)
    .bind(image)
    .bind(group_id)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Apply a partial update; absent fields keep their current values
pub async fn patch_post(
    pool: &PgPool,
    post_id: Uuid,
    text: Option<&str>,
    image: Option<&str>,
    group_id: Option<Uuid>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET text = COALESCE($2, text),
            image = COALESCE($3, image),
            group_id = COALESCE($4, group_id),
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, author_id, text, image, group_id, created_at, updated_at
        "#,
    )
    .bind(post_id)
    .bind(text)
    .bind(image)
    .bind(group_id)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Delete a post; returns whether a row was removed
pub async fn delete_post(pool: &PgPool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

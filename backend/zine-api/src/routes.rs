/// Route table for the zine API.
///
/// Shared by `main` and the integration test harness so both always serve
/// the same surface.
use actix_web::web;

use crate::handlers::{auth, comments, follows, groups, health, posts};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Service introspection (no API version prefix)
    cfg.route("/health", web::get().to(health::health_check));

    cfg.service(
        web::scope("/api/v1")
            // Registration and tokens
            .route("/auth/register", web::post().to(auth::register))
            .route("/auth/token", web::post().to(auth::token))
            .route("/auth/token/refresh", web::post().to(auth::refresh))
            // Posts
            .route("/posts", web::get().to(posts::list_posts))
            .route("/posts", web::post().to(posts::create_post))
            .route("/posts/{post_id}", web::get().to(posts::get_post))
            .route("/posts/{post_id}", web::put().to(posts::update_post))
            .route("/posts/{post_id}", web::patch().to(posts::patch_post))
            .route("/posts/{post_id}", web::delete().to(posts::delete_post))
            // Comments, nested under their post
            .route(
                "/posts/{post_id}/comments",
                web::get().to(comments::list_comments),
            )
            .route(
                "/posts/{post_id}/comments",
                web::post().to(comments::create_comment),
            )
            .route(
                "/posts/{post_id}/comments/{comment_id}",
                web::get().to(comments::get_comment),
            )
            .route(
                "/posts/{post_id}/comments/{comment_id}",
                web::put().to(comments::update_comment),
            )
            .route(
                "/posts/{post_id}/comments/{comment_id}",
                web::patch().to(comments::patch_comment),
            )
            .route(
                "/posts/{post_id}/comments/{comment_id}",
                web::delete().to(comments::delete_comment),
            )
            // Groups (read-only catalog)
            .route("/groups", web::get().to(groups::list_groups))
            .route("/groups/{group_id}", web::get().to(groups::get_group))
            // Follows (always scoped to the caller)
            .route("/follow", web::get().to(follows::list_follows))
            .route("/follow", web::post().to(follows::create_follow)),
    );
}

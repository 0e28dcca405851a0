/// Authentication handlers - registration and token endpoints
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use auth_core::{jwt, password};

use crate::db::user_repo;
use crate::error::{AppError, FieldErrors, Result};
use crate::validators;

/// Request body for registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for the token (login) endpoint
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// Request body for the token refresh endpoint
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Registration response with the initial token pair
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

fn validate_registration(req: &RegisterRequest) -> Result<()> {
    let mut fields = FieldErrors::new();

    if !validators::validate_username(&req.username) {
        fields.entry("username".to_string()).or_default().push(
            "username must be 3-32 characters of letters, digits, underscore or hyphen"
                .to_string(),
        );
    }
    if !validators::validate_email(&req.email) {
        fields
            .entry("email".to_string())
            .or_default()
            .push("email address is not valid".to_string());
    }
    if !validators::validate_password(&req.password) {
        fields.entry("password".to_string()).or_default().push(
            "password must be at least 8 characters with upper and lower case letters, \
             a digit and a special character"
                .to_string(),
        );
    }

    if fields.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(fields))
    }
}

/// Translate unique-constraint violations on the users table into
/// field-level validation errors; everything else stays a database error.
fn map_register_conflict(err: sqlx::Error) -> AppError {
    let conflict = match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            match db_err.constraint() {
                Some("users_username_key") => Some(("username", "username is already taken")),
                Some("users_email_key") => Some(("email", "email is already registered")),
                _ => None,
            }
        }
        _ => None,
    };

    match conflict {
        Some((field, message)) => AppError::validation(field, message),
        None => AppError::Database(err),
    }
}

/// Register a new user and issue the initial token pair
pub async fn register(
    pool: web::Data<PgPool>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    validate_registration(&payload)?;

    let password_hash = password::hash_password(&payload.password)?;

    let user = user_repo::create_user(&pool, &payload.username, &payload.email, &password_hash)
        .await
        .map_err(map_register_conflict)?;

    let pair = jwt::generate_token_pair(user.id, &user.username)?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok(HttpResponse::Created().json(RegisterResponse {
        user_id: user.id,
        username: user.username,
        email: user.email,
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        token_type: pair.token_type,
        expires_in: pair.expires_in,
    }))
}

/// Exchange username/password credentials for a token pair
pub async fn token(
    pool: web::Data<PgPool>,
    payload: web::Json<TokenRequest>,
) -> Result<HttpResponse> {
    // One message for both unknown-user and wrong-password, so the endpoint
    // cannot be used to probe which usernames exist
    let invalid = || AppError::Unauthorized("invalid username or password".to_string());

    let user = user_repo::find_user_by_username(&pool, &payload.username)
        .await?
        .ok_or_else(invalid)?;

    if !password::verify_password(&payload.password, &user.password_hash)? {
        return Err(invalid());
    }

    let pair = jwt::generate_token_pair(user.id, &user.username)?;

    Ok(HttpResponse::Ok().json(pair))
}

/// Exchange a refresh token for a fresh token pair
pub async fn refresh(
    pool: web::Data<PgPool>,
    payload: web::Json<RefreshRequest>,
) -> Result<HttpResponse> {
    let token_data = jwt::validate_token(&payload.refresh_token)
        .map_err(|_| AppError::Unauthorized("Invalid or expired refresh token".to_string()))?;

    let claims = token_data.claims;
    if !claims.is_refresh() {
        return Err(AppError::Unauthorized("Refresh token required".to_string()));
    }

    let user_id = claims
        .user_id()
        .map_err(|_| AppError::Unauthorized("Invalid user ID in token".to_string()))?;

    // The account may have been removed since the token was issued
    let user = user_repo::find_user_by_id(&pool, user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))?;

    let pair = jwt::generate_token_pair(user.id, &user.username)?;

    Ok(HttpResponse::Ok().json(pair))
}

/// Request extractor for the authenticated caller.
///
/// Read endpoints are public, so token validation happens per handler via
/// this extractor rather than a scope-wide middleware. Handlers that mutate
/// state take an `AuthUser` argument; handlers that only read do not.
use actix_web::dev::Payload;
use actix_web::{http::header, FromRequest, HttpRequest};
use auth_core::jwt;
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::error::AppError;

/// Caller identity extracted from a Bearer access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthUser, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Unauthorized("Invalid Authorization scheme, expected Bearer".to_string())
    })?;

    let token_data = jwt::validate_token(token).map_err(|e| {
        tracing::debug!("token validation failed: {}", e);
        AppError::Unauthorized("Invalid or expired token".to_string())
    })?;

    let claims = token_data.claims;

    // Refresh tokens are only good for POST /auth/token/refresh
    if !claims.is_access() {
        return Err(AppError::Unauthorized("Access token required".to_string()));
    }

    let user_id = claims
        .user_id()
        .map_err(|_| AppError::Unauthorized("Invalid user ID in token".to_string()))?;

    Ok(AuthUser {
        id: user_id,
        username: claims.username,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header;
    use actix_web::test::TestRequest;

    #[test]
    fn missing_authorization_header_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let err = authenticate(&req).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn non_bearer_scheme_is_unauthorized() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_http_request();
        let err = authenticate(&req).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}

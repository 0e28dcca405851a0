//! Object-level authorization.
//!
//! Everything readable is readable by anyone, including anonymous callers;
//! mutations are allowed only to the recorded author. The predicate is pure
//! and is evaluated per object after the object has been resolved, so a
//! missing object surfaces as 404 before any 403 can happen.
//!
//! Follow endpoints use a narrower rule ("authenticated or reject") which
//! needs no object check here: their collection is already pinned to the
//! requester by `FollowScope`.

use actix_web::http::Method;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Comment, Post};

/// Implemented by entities that record their creating identity.
pub trait Authored {
    fn author_id(&self) -> Uuid;
}

impl Authored for Post {
    fn author_id(&self) -> Uuid {
        self.author_id
    }
}

impl Authored for Comment {
    fn author_id(&self) -> Uuid {
        self.author_id
    }
}

/// Side-effect-free methods pass for anyone.
fn is_safe(method: &Method) -> bool {
    *method == Method::GET || *method == Method::HEAD || *method == Method::OPTIONS
}

/// Object-level permission predicate.
pub fn permits(method: &Method, user_id: Uuid, object: &impl Authored) -> bool {
    is_safe(method) || object.author_id() == user_id
}

/// Reject with Forbidden unless [`permits`] holds. `what` names the resource
/// in the error message.
pub fn require_author(
    method: &Method,
    user_id: Uuid,
    object: &impl Authored,
    what: &str,
) -> Result<()> {
    if permits(method, user_id, object) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "You don't have permission to modify this {what}"
        )))
    }
}

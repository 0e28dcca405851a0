//! Authentication primitives shared by the zine services.
//!
//! Two concerns live here and nothing else: RS256 JWT issue/validate
//! (`jwt`) and Argon2id password hashing (`password`). The crate has no
//! HTTP or database knowledge.

pub mod jwt;
pub mod password;

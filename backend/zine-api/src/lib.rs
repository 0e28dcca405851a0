/// Zine API Library
///
/// A small blogging-platform API: posts, read-only groups, comments nested
/// under posts, and private follow lists, with JWT authentication and
/// author-only mutation.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers, one module per resource
/// - `routes`: the route table shared by `main` and tests
/// - `models`: row and response structures
/// - `db`: database access layer and repositories
/// - `scope`: per-request collection scoping (nested comments, private follows)
/// - `policy`: object-level authorization predicate
/// - `extract`: authenticated-caller request extractor
/// - `pagination`: limit/offset envelope shared by list endpoints
/// - `validators`: input validation helpers
/// - `error`: error taxonomy and HTTP mapping
/// - `config`: configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod policy;
pub mod routes;
pub mod scope;
pub mod validators;

pub use config::Config;
pub use error::{AppError, Result};

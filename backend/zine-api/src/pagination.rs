//! limit/offset pagination shared by every list endpoint.

use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;

/// Pagination query parameters
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageParams {
    /// Resolve the effective (limit, offset) against the configured bounds.
    /// A missing or non-positive limit falls back to the default, the limit
    /// is capped at the maximum, and a negative offset becomes 0.
    pub fn clamp(&self, cfg: &PaginationConfig) -> (i64, i64) {
        let limit = self
            .limit
            .filter(|l| *l > 0)
            .unwrap_or(cfg.default_limit)
            .min(cfg.max_limit);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

/// Paginated response envelope
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Build the envelope for one page of `results` out of `count` total.
    /// `extra` carries non-paging query parameters (such as an active search
    /// filter) that must survive into the next/previous links.
    pub fn new(
        path: &str,
        extra: &[(&str, String)],
        limit: i64,
        offset: i64,
        count: i64,
        results: Vec<T>,
    ) -> Self {
        let link = |offset: i64| {
            let mut query = format!("limit={limit}&offset={offset}");
            for (key, value) in extra {
                query.push('&');
                query.push_str(key);
                query.push('=');
                query.push_str(&urlencoding::encode(value));
            }
            format!("{path}?{query}")
        };

        let next = (offset + limit < count).then(|| link(offset + limit));
        let previous = (offset > 0).then(|| link((offset - limit).max(0)));

        Page {
            count,
            next,
            previous,
            results,
        }
    }
}

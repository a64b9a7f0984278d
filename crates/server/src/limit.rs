use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Per-route request budgets, in requests per minute per caller.
pub const EMBEDDINGS_RPM: u32 = 30;
pub const SEARCH_RPM: u32 = 60;
pub const DOCUMENT_GET_RPM: u32 = 60;
pub const DOCUMENT_DELETE_RPM: u32 = 30;
pub const USER_RPM: u32 = 60;
pub const SIMILARITY_RPM: u32 = 30;
pub const COLLECTIONS_RPM: u32 = 60;
pub const COLLECTION_DELETE_RPM: u32 = 10;

/// Budget for one route, `None` for routes that are never limited.
///
/// `path` is the matched route template, not the raw URI, so path
/// parameters never fragment the budget table.
pub fn route_budget(method: &str, path: &str) -> Option<u32> {
    match (method, path) {
        ("POST", "/embeddings") => Some(EMBEDDINGS_RPM),
        ("POST", "/search") => Some(SEARCH_RPM),
        ("GET", "/documents/{document_id}/embeddings") => Some(DOCUMENT_GET_RPM),
        ("DELETE", "/documents/{document_id}/embeddings") => Some(DOCUMENT_DELETE_RPM),
        ("GET", "/users/{user_id}/embeddings") => Some(USER_RPM),
        ("GET", "/users/{user_id}/stats") => Some(USER_RPM),
        ("POST", "/similarity") => Some(SIMILARITY_RPM),
        ("GET", "/collections") => Some(COLLECTIONS_RPM),
        ("DELETE", "/collections/{name}") => Some(COLLECTION_DELETE_RPM),
        _ => None,
    }
}

/// Request-rate gate keyed by caller identity and route.
///
/// Injected through state so the fixed-window default can be swapped for a
/// shared-counter backend without touching call sites.
pub trait RateLimiter: Send + Sync {
    /// Record one request under `key`; `true` if it fits within `limit`
    /// requests per minute.
    fn check(&self, key: &str, limit: u32) -> bool;
}

/// Fixed one-minute windows over a concurrent counter table.
#[derive(Default)]
pub struct FixedWindowLimiter {
    windows: DashMap<String, (u32, Instant)>,
}

impl FixedWindowLimiter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RateLimiter for FixedWindowLimiter {
    fn check(&self, key: &str, limit: u32) -> bool {
        let now = Instant::now();
        let window = Duration::from_secs(60);

        let mut entry = self.windows.entry(key.to_string()).or_insert((0, now));
        let (count, window_start) = entry.value_mut();

        // Reset if window has passed
        if now.duration_since(*window_start) > window {
            *count = 0;
            *window_start = now;
        }

        if *count >= limit {
            return false;
        }

        *count += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_the_limit_then_blocks() {
        let limiter = FixedWindowLimiter::new();
        for _ in 0..5 {
            assert!(limiter.check("alice:POST /search", 5));
        }
        assert!(!limiter.check("alice:POST /search", 5));
    }

    #[test]
    fn keys_are_independent() {
        let limiter = FixedWindowLimiter::new();
        assert!(limiter.check("alice:POST /embeddings", 1));
        assert!(!limiter.check("alice:POST /embeddings", 1));
        assert!(limiter.check("bob:POST /embeddings", 1));
        assert!(limiter.check("alice:POST /search", 1));
    }

    #[test]
    fn budgets_cover_every_limited_route() {
        assert_eq!(route_budget("POST", "/embeddings"), Some(30));
        assert_eq!(route_budget("POST", "/search"), Some(60));
        assert_eq!(
            route_budget("GET", "/documents/{document_id}/embeddings"),
            Some(60)
        );
        assert_eq!(
            route_budget("DELETE", "/documents/{document_id}/embeddings"),
            Some(30)
        );
        assert_eq!(route_budget("GET", "/users/{user_id}/embeddings"), Some(60));
        assert_eq!(route_budget("POST", "/similarity"), Some(30));
        assert_eq!(route_budget("DELETE", "/collections/{name}"), Some(10));
    }

    #[test]
    fn health_is_not_limited() {
        assert_eq!(route_budget("GET", "/health"), None);
    }

    #[test]
    fn method_distinguishes_budgets_on_the_same_path() {
        let path = "/documents/{document_id}/embeddings";
        assert_ne!(route_budget("GET", path), route_budget("DELETE", path));
    }
}

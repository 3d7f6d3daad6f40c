use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::{HeaderName, HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::{error::AppError, state::AppState};

static LIMIT_HEADER: HeaderName = HeaderName::from_static("ratelimit-limit");
static REMAINING_HEADER: HeaderName = HeaderName::from_static("ratelimit-remaining");
static RESET_HEADER: HeaderName = HeaderName::from_static("ratelimit-reset");

/// Per-client fixed-window counter state.
struct WindowEntry {
    count: u32,
    window_start: Instant,
}

/// The outcome of a rate-limit check.
pub enum Decision {
    /// The request may proceed.
    Allowed {
        /// Requests left in the current window.
        remaining: u32,
        /// Time until the window resets.
        reset_in: Duration,
    },
    /// The client has exhausted its quota for this window.
    Exceeded {
        /// Time until the window resets.
        retry_after: Duration,
    },
}

/// A process-wide fixed-window rate limiter keyed by client IP.
///
/// Fixed-window counting: the counter resets at window boundaries, so a
/// burst straddling a boundary may see up to twice the limit. That is an
/// accepted imprecision of the algorithm.
#[derive(Clone)]
pub struct FixedWindowLimiter {
    limit: u32,
    window: Duration,
    state: Arc<Mutex<HashMap<IpAddr, WindowEntry>>>,
}

impl FixedWindowLimiter {
    /// Creates a new `FixedWindowLimiter`.
    ///
    /// # Arguments
    ///
    /// * `limit` - Maximum requests per client per window.
    /// * `window` - The window duration.
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            state: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The configured per-window request limit.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Checks and counts one request for the given client.
    ///
    /// The read-compare-increment runs under a single lock guard, so
    /// concurrent bursts from one client are never undercounted.
    pub fn check(&self, ip: IpAddr) -> Decision {
        let mut state = self.state.lock();
        let now = Instant::now();

        let entry = state.entry(ip).or_insert(WindowEntry {
            count: 0,
            window_start: now,
        });

        if now.duration_since(entry.window_start) >= self.window {
            entry.count = 0;
            entry.window_start = now;
        }

        entry.count += 1;

        let reset_at = entry.window_start + self.window;
        let reset_in = reset_at.saturating_duration_since(now);

        if entry.count > self.limit {
            Decision::Exceeded {
                retry_after: reset_in,
            }
        } else {
            Decision::Allowed {
                remaining: self.limit - entry.count,
                reset_in,
            }
        }
    }
}

/// Builds the 429 rejection, carrying the same rate-limit headers as
/// allowed responses (remaining 0) plus `Retry-After`.
fn too_many_requests(limit: u32, retry_after: Duration) -> Response {
    let mut response = AppError::RateLimitExceeded(
        "Too many requests, please try again later".to_string(),
    )
    .into_response();
    let headers = response.headers_mut();
    headers.insert(LIMIT_HEADER.clone(), HeaderValue::from(limit));
    headers.insert(REMAINING_HEADER.clone(), HeaderValue::from(0u32));
    headers.insert(RESET_HEADER.clone(), HeaderValue::from(retry_after.as_secs()));
    headers.insert(header::RETRY_AFTER, HeaderValue::from(retry_after.as_secs()));
    response
}

/// A middleware that applies the process-wide rate limit to every request.
///
/// Allowed responses carry the standard draft rate-limit headers; rejected
/// requests get a 429 with `Retry-After` and never reach the router.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `addr` - The client's socket address.
/// * `request` - The incoming request.
/// * `next` - The next middleware in the chain.
///
/// # Returns
///
/// A `Response`.
pub async fn rate_limit(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let ip = addr.ip();

    match state.rate_limiter.check(ip) {
        Decision::Allowed { remaining, reset_in } => {
            let mut response = next.run(request).await;
            let headers = response.headers_mut();
            headers.insert(LIMIT_HEADER.clone(), HeaderValue::from(state.rate_limiter.limit()));
            headers.insert(REMAINING_HEADER.clone(), HeaderValue::from(remaining));
            headers.insert(RESET_HEADER.clone(), HeaderValue::from(reset_in.as_secs()));
            response
        }
        Decision::Exceeded { retry_after } => {
            tracing::warn!(
                ip = %ip,
                retry_after_secs = retry_after.as_secs(),
                "Rate limit exceeded"
            );

            too_many_requests(state.rate_limiter.limit(), retry_after)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_the_limit() {
        let limiter = FixedWindowLimiter::new(1000, Duration::from_secs(900));
        let ip: IpAddr = "127.0.0.1".parse().unwrap();

        for _ in 0..1000 {
            match limiter.check(ip) {
                Decision::Allowed { .. } => {}
                Decision::Exceeded { .. } => panic!("should be allowed"),
            }
        }

        // The 1001st request within the window is rejected.
        match limiter.check(ip) {
            Decision::Exceeded { .. } => {}
            Decision::Allowed { .. } => panic!("should be exceeded"),
        }
    }

    #[test]
    fn window_reset_restores_quota() {
        let limiter = FixedWindowLimiter::new(2, Duration::from_millis(20));
        let ip: IpAddr = "10.0.0.1".parse().unwrap();

        limiter.check(ip);
        limiter.check(ip);
        match limiter.check(ip) {
            Decision::Exceeded { .. } => {}
            Decision::Allowed { .. } => panic!("should be exceeded"),
        }

        std::thread::sleep(Duration::from_millis(25));

        match limiter.check(ip) {
            Decision::Allowed { .. } => {}
            Decision::Exceeded { .. } => panic!("window should have reset"),
        }
    }

    #[test]
    fn clients_are_counted_independently() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_secs(900));
        let first: IpAddr = "10.0.0.1".parse().unwrap();
        let second: IpAddr = "10.0.0.2".parse().unwrap();

        limiter.check(first);
        match limiter.check(first) {
            Decision::Exceeded { .. } => {}
            Decision::Allowed { .. } => panic!("first client should be exceeded"),
        }

        match limiter.check(second) {
            Decision::Allowed { .. } => {}
            Decision::Exceeded { .. } => panic!("second client should be unaffected"),
        }
    }

    #[test]
    fn rejection_carries_rate_limit_headers() {
        let response = too_many_requests(1000, Duration::from_secs(30));
        assert_eq!(response.status(), axum::http::StatusCode::TOO_MANY_REQUESTS);

        let headers = response.headers();
        assert_eq!(headers.get(&LIMIT_HEADER).unwrap(), "1000");
        assert_eq!(headers.get(&REMAINING_HEADER).unwrap(), "0");
        assert_eq!(headers.get(&RESET_HEADER).unwrap(), "30");
        assert_eq!(headers.get(header::RETRY_AFTER).unwrap(), "30");
    }

    #[test]
    fn remaining_counts_down() {
        let limiter = FixedWindowLimiter::new(3, Duration::from_secs(900));
        let ip: IpAddr = "10.0.0.3".parse().unwrap();

        match limiter.check(ip) {
            Decision::Allowed { remaining, .. } => assert_eq!(remaining, 2),
            Decision::Exceeded { .. } => panic!("should be allowed"),
        }
        match limiter.check(ip) {
            Decision::Allowed { remaining, .. } => assert_eq!(remaining, 1),
            Decision::Exceeded { .. } => panic!("should be allowed"),
        }
    }
}

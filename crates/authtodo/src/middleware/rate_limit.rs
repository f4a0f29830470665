//! Process-wide request rate limiting.

use std::num::NonZeroU32;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{clock::Clock, clock::DefaultClock, Quota, RateLimiter};

use crate::metrics;

type DirectRateLimiter =
    RateLimiter<governor::state::NotKeyed, governor::state::InMemoryState, DefaultClock>;

/// Shared token bucket for the API routes.
#[derive(Clone)]
pub struct RateLimit {
    limiter: Arc<DirectRateLimiter>,
}

impl RateLimit {
    /// `per_second` sustained requests with bursts of up to `burst`.
    /// Zero values are raised to one.
    pub fn new(per_second: u32, burst: u32) -> Self {
        let quota = Quota::per_second(NonZeroU32::new(per_second).unwrap_or(NonZeroU32::MIN))
            .allow_burst(NonZeroU32::new(burst).unwrap_or(NonZeroU32::MIN));

        Self {
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    /// Takes one token, or returns the whole seconds to wait (at least 1).
    fn check(&self) -> Result<(), u64> {
        self.limiter.check().map_err(|not_until| {
            not_until
                .wait_time_from(DefaultClock::default().now())
                .as_secs()
                .max(1)
        })
    }
}

/// Returned when the bucket is empty.
pub struct RateLimited {
    retry_after: u64,
}

impl IntoResponse for RateLimited {
    fn into_response(self) -> Response {
        let mut response = (
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({ "error": "rate limit exceeded" })),
        )
            .into_response();

        response.headers_mut().insert(
            header::RETRY_AFTER,
            HeaderValue::from_str(&self.retry_after.to_string())
                .unwrap_or_else(|_| HeaderValue::from_static("1")),
        );

        response
    }
}

/// Rate limiting middleware, used with `axum::middleware::from_fn_with_state`.
pub async fn rate_limit(
    State(limit): State<RateLimit>,
    request: Request,
    next: Next,
) -> Result<Response, RateLimited> {
    match limit.check() {
        Ok(()) => Ok(next.run(request).await),
        Err(retry_after) => {
            tracing::warn!(retry_after, "Request rate limited");
            metrics::record_rate_limited();
            Err(RateLimited { retry_after })
        }
    }
}

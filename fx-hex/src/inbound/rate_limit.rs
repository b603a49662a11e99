//! Rate limiting middleware using Governor.
//!
//! Implements per-client rate limiting with a keyed token bucket. Clients are
//! told apart by the peer address of the connection. `X-Forwarded-For` is
//! only consulted when the server sits behind a trusted proxy.

use axum::{
    Json,
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{Quota, RateLimiter, clock::DefaultClock, state::keyed::DefaultKeyedStateStore};
use serde_json::json;
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    num::NonZeroU32,
    sync::Arc,
    time::Duration,
};

/// Key used when the connection carries no peer address.
const UNKNOWN_PEER: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// How often idle client buckets are pruned.
pub const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

type KeyedLimiter = RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

/// Rate limiter state shared across requests.
pub struct RateLimiterState {
    /// One bucket per client address
    limiter: KeyedLimiter,
    /// Take the client address from `X-Forwarded-For`
    trust_forwarded_for: bool,
}

impl Default for RateLimiterState {
    fn default() -> Self {
        Self::new(100, Duration::from_secs(60))
    }
}

impl RateLimiterState {
    /// Creates a new rate limiter state.
    ///
    /// # Arguments
    /// * `requests` - Number of requests allowed per period (at least 1)
    /// * `period` - Time period for the quota (at least 1ns)
    pub fn new(requests: u32, period: Duration) -> Self {
        let burst = NonZeroU32::new(requests).unwrap_or(NonZeroU32::MIN);
        let replenish = (period / burst.get()).max(Duration::from_nanos(1));
        let quota = Quota::with_period(replenish)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
            .allow_burst(burst);

        Self {
            limiter: RateLimiter::keyed(quota),
            trust_forwarded_for: false,
        }
    }

    /// Keys clients by the first `X-Forwarded-For` address when one is present.
    ///
    /// Only safe when every request passes through a proxy that overwrites the header.
    pub fn trust_forwarded_for(mut self, trust: bool) -> Self {
        self.trust_forwarded_for = trust;
        self
    }

    /// Checks if a request should be rate limited.
    /// Returns true if the request is allowed, false if rate limited.
    pub fn check(&self, client: IpAddr) -> bool {
        self.limiter.check_key(&client).is_ok()
    }

    /// Drops buckets that have refilled completely.
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
    }

    /// Number of client buckets currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }

    /// Address the quota is charged to.
    fn client(&self, peer: Option<IpAddr>, headers: &HeaderMap) -> IpAddr {
        let forwarded = self
            .trust_forwarded_for
            .then(|| forwarded_for(headers))
            .flatten();

        forwarded.or(peer).unwrap_or(UNKNOWN_PEER)
    }
}

/// First address of `X-Forwarded-For`, if it parses.
fn forwarded_for(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .and_then(|s| s.trim().parse().ok())
}

/// Prunes idle buckets every [`CLEANUP_INTERVAL`] so the key space stays bounded.
pub async fn cleanup_loop(limiter: Arc<RateLimiterState>) {
    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
    loop {
        interval.tick().await;
        limiter.retain_recent();
        tracing::trace!(clients = limiter.tracked_clients(), "Pruned rate limiter buckets");
    }
}

/// Rate limiting middleware.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiterState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Skip rate limiting for health endpoint
    if request.uri().path() == "/health" {
        return next.run(request).await;
    }

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let client = limiter.client(peer, request.headers());

    if !limiter.check(client) {
        tracing::warn!(%client, "Rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "error": "Rate limit exceeded. Please try again later.",
                "retry_after_seconds": 60
            })),
        )
            .into_response();
    }

    next.run(request).await
}

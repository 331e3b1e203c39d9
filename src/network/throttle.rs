//! Accept-rate throttling for the listener.
//!
//! Uses governor's token bucket: a burst of admissions goes through at once,
//! after which accepts are paced at the configured rate. Pending connections
//! wait in the kernel backlog meanwhile.

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;

/// Token bucket gating how fast the gateway accepts connections.
pub struct AcceptThrottle {
    limiter: DefaultDirectRateLimiter,
}

impl AcceptThrottle {
    /// Create a throttle allowing `per_second` accepts with `burst` headroom.
    ///
    /// Zero values are raised to one.
    pub fn new(per_second: u32, burst: u32) -> Self {
        let rate = NonZeroU32::new(per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(burst).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: RateLimiter::direct(Quota::per_second(rate).allow_burst(burst)),
        }
    }

    /// Take a token, waiting until one is available.
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }
}

//! Rate limiting budgets per route class.
//!
//! Keys are extracted per client ip (`SmartIpKeyExtractor` falls back through
//! the usual forwarding headers before using the peer address), so budgets
//! apply per caller rather than globally.

/// Strict limits for authentication endpoints (prevents brute force attacks)
pub const AUTH_RATE_PER_SECOND: u64 = 5;
pub const AUTH_BURST_SIZE: u32 = 10;

/// Very strict limits for sensitive write operations (bulk assignments,
/// account registration, payments)
pub const SENSITIVE_RATE_PER_SECOND: u64 = 2;
pub const SENSITIVE_BURST_SIZE: u32 = 5;

/// Moderate limits for general authenticated endpoints
pub const GENERAL_RATE_PER_SECOND: u64 = 10;
pub const GENERAL_BURST_SIZE: u32 = 20;

/// Build a `GovernorLayer` with the given per-second rate and burst size.
///
/// A macro rather than a function so callers never have to spell out the
/// governor's layer type.
#[macro_export]
macro_rules! make_rate_limit_layer {
    ($per_second:expr, $burst_size:expr) => {{
        let governor_conf = tower_governor::governor::GovernorConfigBuilder::default()
            .per_second($per_second)
            .burst_size($burst_size)
            .key_extractor(tower_governor::key_extractor::SmartIpKeyExtractor)
            .use_headers()
            .finish()
            .expect("Failed to build rate limiter configuration");

        tower_governor::GovernorLayer::new(governor_conf)
    }};
}

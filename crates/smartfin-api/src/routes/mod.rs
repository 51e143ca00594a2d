//! Route modules for the API server
//!
//! - transactions: filtered, paginated transaction listing
//! - analytics: summary, insights and ad-hoc analysis
//! - market: market snapshot and economic indicators
//! - upload: CSV statement upload
//! - health: liveness and dataset size

pub mod analytics;
pub mod health;
pub mod market;
pub mod transactions;
pub mod upload;

/// Current time as an RFC 3339 string with millisecond precision
pub(crate) fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

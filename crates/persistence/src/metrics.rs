//! Database metrics collection.
//!
//! Provides functions for recording database-related metrics.

use metrics::{counter, histogram};
use std::time::Instant;

use crate::dialect::Dialect;

/// Record database query duration.
///
/// Call this function after executing a query to record its duration.
pub fn record_query_duration(query_name: &str, dialect: Dialect, duration_secs: f64) {
    histogram!(
        "database_query_duration_seconds",
        "query" => query_name.to_string(),
        "backend" => dialect.to_string()
    )
    .record(duration_secs);
}

/// Record a failed connection attempt to the primary database.
pub fn record_connect_failure() {
    counter!("database_primary_connect_failures_total").increment(1);
}

/// Record a switch to the local fallback database.
pub fn record_fallback(reason: &'static str) {
    counter!("database_fallback_total", "reason" => reason).increment(1);
}

/// A helper to time database operations and record metrics.
///
/// Usage:
/// ```ignore
/// let timer = QueryTimer::new("get_vendors", Dialect::Sqlite);
/// let result = conn.fetch_all::<VendorEntity>(&statement).await;
/// timer.record();
/// result
/// ```
pub struct QueryTimer {
    query_name: String,
    dialect: Dialect,
    start: Instant,
}

impl QueryTimer {
    /// Create a new timer for the given query name.
    pub fn new(query_name: impl Into<String>, dialect: Dialect) -> Self {
        Self {
            query_name: query_name.into(),
            dialect,
            start: Instant::now(),
        }
    }

    /// Record the elapsed duration to metrics.
    pub fn record(self) {
        let duration = self.start.elapsed().as_secs_f64();
        record_query_duration(&self.query_name, self.dialect, duration);
    }
}

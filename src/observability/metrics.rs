//! Breaker metrics.
//!
//! # Metrics
//! - `breaker_failures_total` (counter): failures recorded, by key
//! - `breaker_successes_total` (counter): successes recorded, by key
//! - `breaker_trips_total` (counter): calmed-down → tripped edges
//! - `breaker_recoveries_total` (counter): tripped → calmed-down edges
//! - `breaker_probes_total` (counter): half-open probes granted
//! - `breaker_rejections_total` (counter): `is_available` answered false
//! - `breaker_storage_errors_total` (counter): store operations that failed

pub fn record_failure(key: &str) {
    metrics::counter!("breaker_failures_total", "key" => key.to_owned()).increment(1);
}

pub fn record_success(key: &str) {
    metrics::counter!("breaker_successes_total", "key" => key.to_owned()).increment(1);
}

pub fn record_trip(key: &str) {
    metrics::counter!("breaker_trips_total", "key" => key.to_owned()).increment(1);
}

pub fn record_recovery(key: &str) {
    metrics::counter!("breaker_recoveries_total", "key" => key.to_owned()).increment(1);
}

pub fn record_probe(key: &str) {
    metrics::counter!("breaker_probes_total", "key" => key.to_owned()).increment(1);
}

pub fn record_rejection(key: &str) {
    metrics::counter!("breaker_rejections_total", "key" => key.to_owned()).increment(1);
}

pub fn record_storage_error(key: &str) {
    metrics::counter!("breaker_storage_errors_total", "key" => key.to_owned()).increment(1);
}

//! Field-level checks applied to metric and event entries before dispatch.
//!
//! An empty string is always accepted: Datadog fills in its own default
//! (`gauge` for metric types, `info` for alert types, `normal` for priority).

/// Longest aggregation key Datadog accepts, in characters
pub const MAX_AGGREGATION_KEY_LEN: usize = 100;

pub fn is_valid_metric_type(t: &str) -> bool {
    matches!(t, "" | "gauge" | "rate" | "count")
}

pub fn is_valid_alert_type(t: &str) -> bool {
    matches!(t, "" | "info" | "success" | "warning" | "error")
}

pub fn is_valid_priority(p: &str) -> bool {
    matches!(p, "" | "low" | "normal")
}

pub fn is_valid_aggregation_key(key: &str) -> bool {
    key.chars().count() <= MAX_AGGREGATION_KEY_LEN
}

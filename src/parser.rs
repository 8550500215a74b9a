//! Decoding of the `metrics` and `events` plugin settings.
//!
//! A malformed list is an error for that half of the run only. Individual
//! entries that fail validation are dropped with a diagnostic and never reach
//! the dispatcher.

use crate::error::PluginError;
use crate::events::Event;
use crate::metrics::Metric;
use crate::utils::log_info;
use crate::validate::{
    is_valid_aggregation_key, is_valid_alert_type, is_valid_metric_type, is_valid_priority,
};
use serde::de::DeserializeOwned;

/// Entries that passed validation, plus one diagnostic per dropped entry
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEntries<T> {
    pub entries: Vec<T>,
    pub dropped: Vec<String>,
}

impl<T> Default for ParsedEntries<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            dropped: Vec::new(),
        }
    }
}

impl<T> ParsedEntries<T> {
    /// Log every drop diagnostic and hand back the surviving entries
    pub fn log_drops(self) -> Vec<T> {
        for reason in &self.dropped {
            log_info(reason);
        }
        self.entries
    }
}

fn decode_filtered<T, F>(raw: &str, kind: &str, check: F) -> Result<ParsedEntries<T>, PluginError>
where
    T: DeserializeOwned,
    F: Fn(&T) -> Option<String>,
{
    if raw.trim().is_empty() {
        return Ok(ParsedEntries::default());
    }

    let data: Vec<T> = serde_json::from_str(raw)
        .map_err(|e| PluginError::Config(format!("{} configuration error: {}", kind, e)))?;

    let mut parsed = ParsedEntries::default();
    for entry in data {
        match check(&entry) {
            Some(reason) => parsed.dropped.push(reason),
            None => parsed.entries.push(entry),
        }
    }
    Ok(parsed)
}

fn metric_drop_reason(metric: &Metric) -> Option<String> {
    if !is_valid_metric_type(&metric.metric_type) {
        return Some(format!("invalid metric type: {}", metric.metric_type));
    }
    // Out-of-range input decodes to infinity, which JSON can't carry
    if !metric.value.is_finite() {
        return Some(format!(
            "invalid metric value for {}: out of range for a 32-bit float",
            metric.name
        ));
    }
    None
}

fn event_drop_reason(event: &Event) -> Option<String> {
    if !is_valid_alert_type(&event.alert_type) {
        return Some(format!("invalid alert type: {}", event.alert_type));
    }
    if !is_valid_priority(&event.priority) {
        return Some(format!("invalid priority: {}", event.priority));
    }
    if !is_valid_aggregation_key(&event.aggregation_key) {
        return Some(format!(
            "invalid aggregation key: {} characters, at most {} allowed",
            event.aggregation_key.chars().count(),
            crate::validate::MAX_AGGREGATION_KEY_LEN
        ));
    }
    None
}

pub fn parse_metric_entries(raw: &str) -> Result<ParsedEntries<Metric>, PluginError> {
    decode_filtered(raw, "metrics", metric_drop_reason)
}

pub fn parse_event_entries(raw: &str) -> Result<ParsedEntries<Event>, PluginError> {
    decode_filtered(raw, "events", event_drop_reason)
}

/// Decode the metrics list, logging each dropped entry
pub fn parse_metrics(raw: &str) -> Result<Vec<Metric>, PluginError> {
    Ok(parse_metric_entries(raw)?.log_drops())
}

/// Decode the events list, logging each dropped entry
pub fn parse_events(raw: &str) -> Result<Vec<Event>, PluginError> {
    Ok(parse_event_entries(raw)?.log_drops())
}

//! Delivery policy for the two payloads.
//!
//! Metrics go out as a single `series` request and any failure is fatal for
//! the run. Events go out one request each, in order, because the events
//! endpoint accepts a single event per call; a failing event is logged and
//! skipped.

use crate::error::PluginError;
use crate::events::Event;
use crate::metrics::{Metric, SeriesPayload};
use crate::transport::Transport;
use crate::utils::{debug_log, log_error};
use url::Url;

pub const DATADOG_API_BASE_URL: &str = "https://api.datadoghq.com/";

const SERIES_ENDPOINT: &str = "api/v1/series";
const EVENTS_ENDPOINT: &str = "api/v1/events";

/// Outcome of sending the events list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventReport {
    pub attempted: usize,
    pub sent: usize,
}

impl EventReport {
    pub fn failed(&self) -> usize {
        self.attempted - self.sent
    }
}

pub struct Dispatcher<T: Transport> {
    transport: T,
    api_key: String,
    base_url: String,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T, api_key: impl Into<String>) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            base_url: DATADOG_API_BASE_URL.to_string(),
        }
    }

    /// Point the dispatcher at another server, e.g. a local test responder
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Full endpoint URL with the API key as the `api_key` query parameter
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, PluginError> {
        let mut url = Url::parse(&self.base_url)?.join(endpoint)?;
        url.query_pairs_mut().append_pair("api_key", &self.api_key);
        Ok(url)
    }

    /// Send all metrics in one request, returning how many were sent
    pub fn send_metrics(&mut self, metrics: &[Metric]) -> Result<usize, PluginError> {
        // An empty series carries nothing, so skip the request entirely
        if metrics.is_empty() {
            debug_log("no metrics to send");
            return Ok(0);
        }

        let url = self.endpoint_url(SERIES_ENDPOINT)?;
        let payload = SeriesPayload::now(metrics);
        let body = serde_json::to_string(&payload)?;

        self.transport.post_json(&url, &body)?;
        Ok(payload.len())
    }

    /// Send events one at a time, continuing past individual failures
    pub fn send_events(&mut self, events: &[Event]) -> EventReport {
        let mut report = EventReport::default();
        if events.is_empty() {
            debug_log("no events to send");
            return report;
        }

        let url = match self.endpoint_url(EVENTS_ENDPOINT) {
            Ok(url) => url,
            Err(e) => {
                log_error(&format!("unable to send events: {}", e));
                report.attempted = events.len();
                return report;
            }
        };

        for event in events {
            report.attempted += 1;

            let body = match serde_json::to_string(event) {
                Ok(body) => body,
                Err(e) => {
                    log_error(&format!("error encoding event: {}", e));
                    continue;
                }
            };

            if let Err(e) = self.transport.post_json(&url, &body) {
                log_error(&format!("unable to send event: {}", e));
                continue;
            }

            report.sent += 1;
        }

        report
    }
}

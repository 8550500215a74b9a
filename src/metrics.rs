//! Metric records and their wire form for Datadog's series endpoint.

use crate::utils::null_as_default;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A metric as configured in the pipeline step
///
/// Every field is optional in the input; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Metric {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub metric_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: f32,
    #[serde(deserialize_with = "null_as_default")]
    pub host: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

/// `[unix_seconds, value]`
pub type Point = (i64, f32);

/// Wire form of a [`Metric`], built by [`normalize`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransportMetric {
    #[serde(rename = "metric")]
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub metric_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub host: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub points: Vec<Point>,
}

/// Pair the metric value with `now` and apply the omission rules.
///
/// No validation happens here; the parser has already dropped bad entries.
pub fn normalize(metric: &Metric, now: DateTime<Utc>) -> TransportMetric {
    TransportMetric {
        name: metric.name.clone(),
        metric_type: metric.metric_type.clone(),
        host: metric.host.clone(),
        tags: metric.tags.clone(),
        points: vec![(now.timestamp(), metric.value)],
    }
}

/// Request body for `POST /api/v1/series`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPayload {
    pub series: Vec<TransportMetric>,
}

impl SeriesPayload {
    pub fn at(metrics: &[Metric], now: DateTime<Utc>) -> Self {
        Self {
            series: metrics.iter().map(|m| normalize(m, now)).collect(),
        }
    }

    /// Stamp every metric with the current wall-clock time
    pub fn now(metrics: &[Metric]) -> Self {
        Self::at(metrics, Utc::now())
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

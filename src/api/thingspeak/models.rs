use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::Metric;

/// Response envelope from GET /channels/{id}/feeds.json.
///
/// Channel metadata and other keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    pub feeds: Vec<FeedRecord>,
}

/// A single feed entry.
///
/// ThingSpeak sends field values as strings, but numbers and nulls show up
/// on some channels, so they are kept as raw JSON until transformed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedRecord {
    #[serde(default)]
    pub created_at: Option<Value>,
    #[serde(default)]
    pub field1: Option<Value>,
    #[serde(default)]
    pub field2: Option<Value>,
    #[serde(default)]
    pub field3: Option<Value>,
    #[serde(default)]
    pub field4: Option<Value>,
    #[serde(default)]
    pub field5: Option<Value>,
    #[serde(default)]
    pub field6: Option<Value>,
}

impl FeedRecord {
    /// Raw value of the field mapped to `metric`
    pub fn raw(&self, metric: Metric) -> Option<&Value> {
        match metric {
            Metric::Pm25 => self.field1.as_ref(),
            Metric::Pm10 => self.field2.as_ref(),
            Metric::Ozone => self.field3.as_ref(),
            Metric::Humidity => self.field4.as_ref(),
            Metric::Temperature => self.field5.as_ref(),
            Metric::Co => self.field6.as_ref(),
        }
    }
}

/// Error type for feed requests
#[derive(Debug, Clone, Error)]
pub enum FeedError {
    /// Network/transport failure
    #[error("Request Error: {0}")]
    Request(String),
    /// 5xx from the provider
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Any other non-success status
    #[error("HTTP Error ({0}): {1}")]
    Status(u16, String),
    /// Body was not a feed envelope
    #[error("Deserialization Error: {0}")]
    Deserialization(String),
}

//! Snapshot of the most recent feed records

use super::metric::Metric;

/// Timestamp used when a record carries no `created_at`
pub const MISSING_TIMESTAMP: &str = "N/A";

/// Result of one fetch-transform cycle.
///
/// All seven sequences always have the same length; position `i` in every
/// metric series belongs to `timestamps[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub timestamps: Vec<String>,
    pub pm25: Vec<f64>,
    pub pm10: Vec<f64>,
    pub ozone: Vec<f64>,
    pub humidity: Vec<f64>,
    pub temperature: Vec<f64>,
    pub co: Vec<f64>,
}

impl Snapshot {
    /// Snapshot with every sequence empty (shown as blank charts)
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            timestamps: Vec::with_capacity(capacity),
            pm25: Vec::with_capacity(capacity),
            pm10: Vec::with_capacity(capacity),
            ozone: Vec::with_capacity(capacity),
            humidity: Vec::with_capacity(capacity),
            temperature: Vec::with_capacity(capacity),
            co: Vec::with_capacity(capacity),
        }
    }

    pub fn series(&self, metric: Metric) -> &[f64] {
        match metric {
            Metric::Pm25 => &self.pm25,
            Metric::Pm10 => &self.pm10,
            Metric::Ozone => &self.ozone,
            Metric::Humidity => &self.humidity,
            Metric::Temperature => &self.temperature,
            Metric::Co => &self.co,
        }
    }

    fn series_mut(&mut self, metric: Metric) -> &mut Vec<f64> {
        match metric {
            Metric::Pm25 => &mut self.pm25,
            Metric::Pm10 => &mut self.pm10,
            Metric::Ozone => &mut self.ozone,
            Metric::Humidity => &mut self.humidity,
            Metric::Temperature => &mut self.temperature,
            Metric::Co => &mut self.co,
        }
    }

    /// Append one aligned row. `readings` follows `Metric::ALL` order.
    pub fn push_row(&mut self, timestamp: String, readings: [f64; 6]) {
        self.timestamps.push(timestamp);
        for (metric, value) in Metric::ALL.into_iter().zip(readings) {
            self.series_mut(metric).push(value);
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// True when every metric series is aligned with `timestamps`
    pub fn is_aligned(&self) -> bool {
        Metric::ALL
            .iter()
            .all(|m| self.series(*m).len() == self.timestamps.len())
    }
}

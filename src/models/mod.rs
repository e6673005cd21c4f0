//! Data models for the dashboard
//!
//! Snapshots are built fresh on every tick and turned into chart specs;
//! nothing here outlives a single request.

pub mod chart;
pub mod metric;
pub mod snapshot;

pub use chart::{ChartPanel, ChartSpec, ChartTheme, TickResponse};
pub use metric::Metric;
pub use snapshot::{Snapshot, MISSING_TIMESTAMP};

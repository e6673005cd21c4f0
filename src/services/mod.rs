pub mod chart_service;
pub mod snapshot_service;
pub mod tick_service;

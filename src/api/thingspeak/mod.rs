pub mod client;
pub mod models;

pub use client::FeedClient;
pub use models::{FeedError, FeedRecord, FeedResponse};

use reqwest::Client as HttpClient;
use super::models::{FeedError, FeedResponse};
use tracing::{debug, warn};

/// ThingSpeak channel feed client
#[derive(Debug, Clone)]
pub struct FeedClient {
    http_client: HttpClient,
    endpoint: String,
}

impl FeedClient {
    pub const DEFAULT_ENDPOINT: &'static str =
        "https://api.thingspeak.com/channels/1596152/feeds.json";

    /// Create a client for a feed URL (see `DEFAULT_ENDPOINT`)
    pub fn with_endpoint(endpoint: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Map a non-success status to an error, keeping the body for the log
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> FeedError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            500..=599 => {
                warn!("Feed server error {}: {}", status_code, body_text);
                FeedError::ServerError(status_code, body_text)
            }
            _ => FeedError::Status(status_code, body_text),
        }
    }

    /// GET {endpoint}?results={results}
    ///
    /// Retrieves the most recent `results` entries of the channel, oldest
    /// first. No authentication is sent and no retry is attempted.
    pub async fn fetch_feed(&self, results: u32) -> Result<FeedResponse, FeedError> {
        debug!("GET {} (results={})", self.endpoint, results);

        let response = self.http_client
            .get(&self.endpoint)
            .query(&[("results", results)])
            .send()
            .await
            .map_err(|e| FeedError::Request(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<FeedResponse>()
            .await
            .map_err(|e| FeedError::Deserialization(format!("Failed to parse response: {}", e)))
    }
}

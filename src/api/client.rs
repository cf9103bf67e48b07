//! API client for communicating with the TraceChain backend.

use std::time::Duration;

use reqwest::{Client, Response, Url};
use thiserror::Error;

use super::types::*;

/// The single failure shape exposed to callers: any transport failure or
/// non-2xx response, carrying a human-readable message taken from the
/// response body (or the status reason when the body is empty).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct RequestError {
    pub message: String,
}

impl RequestError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Self::new(format!("connection failed: {err}"))
        } else {
            Self::new(err.to_string())
        }
    }
}

/// TraceChain API client.
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client for the given backend base URL.
    pub fn new(base_url: &str) -> Result<Self, RequestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(2))
            .build()?;

        let base_url = Url::parse(base_url)
            .map_err(|e| RequestError::new(format!("invalid endpoint {base_url}: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Build a URL from path segments, percent-encoding each segment.
    fn url(&self, segments: &[&str]) -> Result<Url, RequestError> {
        let mut url = self.base_url.clone();
        {
            let mut parts = url
                .path_segments_mut()
                .map_err(|_| RequestError::new("endpoint cannot be a base URL"))?;
            parts.pop_if_empty();
            for segment in segments {
                parts.push(segment);
            }
        }
        Ok(url)
    }

    /// Map a non-success response into a `RequestError` from its body text.
    async fn check(response: Response) -> Result<Response, RequestError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or_else(|| status.as_str())
                .to_string()
        } else {
            body
        };
        Err(RequestError::new(message))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, RequestError> {
        tracing::debug!(%url, "GET");
        let response = Self::check(self.client.get(url).send().await?).await?;
        let value = response
            .json()
            .await
            .map_err(|e| RequestError::new(format!("failed to parse response: {e}")))?;
        Ok(value)
    }

    /// Fetch the full summary and event chain for one lot.
    pub async fn lot_summary(&self, lot_id: &str) -> Result<LotSummary, RequestError> {
        let url = self.url(&["api", "lots", lot_id])?;
        self.get_json(url).await
    }

    /// Fetch one page of the lot listing. An empty query is omitted from the
    /// request (the server returns an unfiltered page).
    pub async fn search_lots(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<LotListItem>, RequestError> {
        let mut url = self.url(&["api", "lots"])?;
        {
            let mut pairs = url.query_pairs_mut();
            if !query.is_empty() {
                pairs.append_pair("q", query);
            }
            pairs.append_pair("page", &page.to_string());
            pairs.append_pair("page_size", &page_size.to_string());
        }
        let listing: LotListPage = self.get_json(url).await?;
        Ok(listing.items)
    }

    /// Fetch the QR code image for a lot as raw bytes.
    pub async fn lot_qrcode(&self, lot_id: &str) -> Result<QrImage, RequestError> {
        let url = self.url(&["api", "lots", lot_id, "qrcode"])?;
        tracing::debug!(%url, "GET (binary)");
        let response = Self::check(self.client.get(url).send().await?).await?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/png")
            .to_string();
        let bytes = response.bytes().await?.to_vec();

        Ok(QrImage {
            content_type,
            bytes,
        })
    }

    /// Ask the backend to create (or return) the demo lot.
    pub async fn seed(&self) -> Result<SeedOutcome, RequestError> {
        let url = self.url(&["api", "seed"])?;
        self.get_json(url).await
    }

    /// Ask the backend to create a batch of demo lots. POST trigger; only the
    /// success status matters.
    pub async fn seed_many(&self) -> Result<(), RequestError> {
        let url = self.url(&["api", "seed_many"])?;
        tracing::debug!(%url, "POST");
        Self::check(self.client.post(url).send().await?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_encodes_path_segments() {
        let client = ApiClient::new("http://127.0.0.1:8000").unwrap();
        let url = client.url(&["api", "lots", "LOT 001/x"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8000/api/lots/LOT%20001%2Fx"
        );
    }

    #[test]
    fn url_joins_cleanly_on_trailing_slash() {
        let client = ApiClient::new("http://127.0.0.1:8000/").unwrap();
        let url = client.url(&["api", "seed"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/seed");
    }

    #[test]
    fn rejects_unparseable_endpoint() {
        assert!(ApiClient::new("not a url").is_err());
    }
}

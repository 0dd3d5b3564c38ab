//! Search client: builds requests, executes them and decodes responses

use super::models::SearchResponse;
use super::request::{search_url, ImageSource, SearchRequest};
use crate::config::{Settings, DEFAULT_SERVICE};
use crate::error::{Error, Result};
use crate::network::{ApiRequest, HttpClient, ImageUpload, Transport};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::time::timeout;
use tracing::{debug, warn};

/// SauceNAO API client.
///
/// The client holds no mutable state and can be shared between concurrent
/// searches. It does not rate limit; a 429 from the service surfaces as
/// [`Error::Quota`] and backoff is left to the caller.
#[derive(Clone)]
pub struct SearchClient<T = HttpClient> {
    service: String,
    api_key: String,
    transport: T,
}

impl SearchClient<HttpClient> {
    /// Create a client for saucenao.com with default HTTP settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self::with_transport(
            DEFAULT_SERVICE,
            api_key,
            HttpClient::new()?,
        ))
    }

    /// Create a client from loaded settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let transport = HttpClient::with_settings(&settings.outgoing)?;
        Ok(Self::with_transport(
            settings.service_url(),
            settings.api_key.clone(),
            transport,
        ))
    }
}

impl<T: Transport> SearchClient<T> {
    /// Create a client for `service` (e.g. `https://saucenao.com`) using a custom transport
    pub fn with_transport(
        service: impl Into<String>,
        api_key: impl Into<String>,
        transport: T,
    ) -> Self {
        Self {
            service: service.into(),
            api_key: api_key.into(),
            transport,
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Call the search API.
    ///
    /// Dropping the returned future aborts the in-flight call.
    pub async fn search(&self, request: SearchRequest) -> Result<SearchResponse> {
        let api_request = self.build_request(request).await?;
        debug!("Searching {} via {:?}", self.service, api_request.method);

        let response = self.transport.execute(api_request).await?;

        if response.is_rate_limited() {
            warn!("SauceNAO search rate limited");
            return Err(Error::Quota);
        }
        if !response.is_ok() {
            return Err(Error::UnexpectedStatus(response.status_text));
        }

        let parsed: SearchResponse = serde_json::from_slice(&response.body)?;
        debug!(
            "SauceNAO returned {} results (status {}, {} short / {} long remaining)",
            parsed.results.len(),
            parsed.header.status,
            parsed.header.short_remaining,
            parsed.header.long_remaining
        );

        Ok(parsed)
    }

    /// Call the search API, giving up after `limit`
    pub async fn search_with_timeout(
        &self,
        request: SearchRequest,
        limit: Duration,
    ) -> Result<SearchResponse> {
        timeout(limit, self.search(request))
            .await
            .map_err(|_| Error::Timeout(limit))?
    }

    /// Render a search request into a wire request.
    ///
    /// An image stream is read to the end here; a read failure is reported
    /// as [`Error::Construction`] and nothing is sent.
    pub async fn build_request(&self, request: SearchRequest) -> Result<ApiRequest> {
        let url = search_url(&self.service, &self.api_key, &request);

        match request.image {
            ImageSource::Url(_) => Ok(ApiRequest::get(url)),
            ImageSource::Bytes(mut reader) => {
                let mut bytes = Vec::new();
                reader
                    .read_to_end(&mut bytes)
                    .await
                    .map_err(Error::Construction)?;
                Ok(ApiRequest::post(url, ImageUpload::new(bytes)))
            }
        }
    }
}

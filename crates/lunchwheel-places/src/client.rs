//! HTTP client for the Kakao Local REST API.
//!
//! Wraps `reqwest` with the `KakaoAK` authorization header, typed error
//! mapping for non-2xx statuses, and retry on transient failures. Results are
//! converted to [`Place`] records; individual malformed documents are skipped.

use std::time::Duration;

use lunchwheel_core::{AppConfig, Place};
use reqwest::{Client, StatusCode, Url};

use crate::error::PlacesError;
use crate::normalize::{place_from_address, place_from_document};
use crate::retry::retry_with_backoff;
use crate::source::{CategoryQuery, PlaceSource};
use crate::types::{ErrorBody, SearchEnvelope};

const KEYWORD_PATH: &str = "v2/local/search/keyword.json";
const ADDRESS_PATH: &str = "v2/local/search/address.json";
const CATEGORY_PATH: &str = "v2/local/search/category.json";

/// Client for the Kakao Local search endpoints.
///
/// Use [`KakaoLocalClient::from_config`] in the binary or
/// [`KakaoLocalClient::with_base_url`] to point at a mock server in tests.
pub struct KakaoLocalClient {
    client: Client,
    authorization: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl KakaoLocalClient {
    /// Builds a client from the application config.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::UpstreamUnavailable`] if no API key is configured.
    /// - [`PlacesError::InvalidBaseUrl`] / [`PlacesError::Http`] as for
    ///   [`KakaoLocalClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, PlacesError> {
        let api_key = config.kakao_api_key.as_deref().ok_or_else(|| {
            PlacesError::UpstreamUnavailable("KAKAO_REST_API_KEY is not set".to_string())
        })?;
        Self::with_base_url(
            api_key,
            config.request_timeout_secs,
            &config.kakao_base_url,
            config.max_retries,
            config.retry_backoff_base_ms,
        )
    }

    /// Creates a client with a custom base URL.
    ///
    /// `max_retries` is the number of additional attempts after a transient
    /// failure; `0` disables retries.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent("lunchwheel/0.1")
            .build()?;

        // A single trailing slash makes `Url::join` append to the base path
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            authorization: format!("KakaoAK {api_key}"),
            base_url: parsed,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Keyword search (business names, landmarks).
    ///
    /// # Errors
    ///
    /// See [`KakaoLocalClient::category_search_page`].
    pub async fn keyword_search(&self, query: &str) -> Result<Vec<Place>, PlacesError> {
        let url = self.build_url(KEYWORD_PATH, &[("query", query)])?;
        let documents = self.fetch_documents(&url).await?;
        Ok(documents.into_iter().filter_map(place_from_document).collect())
    }

    /// Address search (road or lot-number addresses).
    ///
    /// # Errors
    ///
    /// See [`KakaoLocalClient::category_search_page`].
    pub async fn address_search(&self, query: &str) -> Result<Vec<Place>, PlacesError> {
        let url = self.build_url(ADDRESS_PATH, &[("query", query)])?;
        let documents = self.fetch_documents(&url).await?;
        Ok(documents.into_iter().filter_map(place_from_address).collect())
    }

    /// One page of a category search around `query.origin`.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiError`] if the API rejects the request.
    /// - [`PlacesError::RateLimited`] / [`PlacesError::UnexpectedStatus`] /
    ///   [`PlacesError::Http`] after retries are exhausted.
    /// - [`PlacesError::Deserialize`] if the envelope is not valid JSON.
    pub async fn category_search_page(
        &self,
        query: &CategoryQuery,
    ) -> Result<Vec<Place>, PlacesError> {
        let x = query.origin.x.to_string();
        let y = query.origin.y.to_string();
        let radius = query.radius_m.to_string();
        let page = query.page.to_string();
        let size = query.page_size.to_string();
        let url = self.build_url(
            CATEGORY_PATH,
            &[
                ("category_group_code", query.category.as_str()),
                ("x", &x),
                ("y", &y),
                ("radius", &radius),
                ("sort", query.sort.as_query_value()),
                ("page", &page),
                ("size", &size),
            ],
        )?;
        let documents = self.fetch_documents(&url).await?;
        Ok(documents.into_iter().filter_map(place_from_document).collect())
    }

    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    async fn fetch_documents(&self, url: &Url) -> Result<Vec<serde_json::Value>, PlacesError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                tracing::debug!(url = %url.path(), "place search request");
                let response = self
                    .client
                    .get(url.clone())
                    .header(reqwest::header::AUTHORIZATION, &self.authorization)
                    .send()
                    .await?;
                let status = response.status();
                if !status.is_success() {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.trim().parse::<u64>().ok());
                    let body = response.text().await.unwrap_or_default();
                    return Err(status_error(status, &url, retry_after_secs, &body));
                }
                let body = response.text().await?;
                let envelope: SearchEnvelope =
                    serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                        context: url.path().to_string(),
                        source: e,
                    })?;
                if let Some(meta) = &envelope.meta {
                    tracing::debug!(
                        total = meta.total_count,
                        pageable = meta.pageable_count,
                        is_end = meta.is_end,
                        "place search page received"
                    );
                }
                Ok(envelope.documents)
            }
        })
        .await
    }
}

fn status_error(
    status: StatusCode,
    url: &Url,
    retry_after_secs: Option<u64>,
    body: &str,
) -> PlacesError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return PlacesError::RateLimited { retry_after_secs };
    }
    if status.is_client_error() {
        if let Ok(err) = serde_json::from_str::<ErrorBody>(body) {
            if !err.message.is_empty() || !err.error_type.is_empty() {
                return PlacesError::ApiError {
                    status: status.as_u16(),
                    message: format!("{}: {}", err.error_type, err.message),
                };
            }
        }
    }
    PlacesError::UnexpectedStatus {
        status: status.as_u16(),
        url: url.path().to_string(),
    }
}

impl PlaceSource for KakaoLocalClient {
    /// Runs the address and keyword searches concurrently and returns the
    /// address hits first.
    ///
    /// A failing half contributes nothing; only when both fail is the
    /// keyword error returned.
    async fn search_locations(&self, query: &str) -> Result<Vec<Place>, PlacesError> {
        let (addresses, keywords) =
            tokio::join!(self.address_search(query), self.keyword_search(query));

        match (addresses, keywords) {
            (Err(address_err), Err(keyword_err)) => {
                tracing::warn!(query, error = %address_err, "address search failed");
                Err(keyword_err)
            }
            (addresses, keywords) => {
                let addresses = addresses.unwrap_or_else(|e| {
                    tracing::warn!(query, error = %e, "address search failed");
                    Vec::new()
                });
                let keywords = keywords.unwrap_or_else(|e| {
                    tracing::warn!(query, error = %e, "keyword search failed");
                    Vec::new()
                });
                let mut combined = addresses;
                combined.extend(keywords);
                Ok(combined)
            }
        }
    }

    async fn category_search(&self, query: &CategoryQuery) -> Result<Vec<Place>, PlacesError> {
        self.category_search_page(query).await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

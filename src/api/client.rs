use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::error::ApiError;
use crate::config::ApiConfig;
use crate::search::{ResultPage, SearchRequest};

const SEARCH_PATH: &str = "search";
const CATEGORIES_PATH: &str = "filter/categories";
const INGREDIENTS_PATH: &str = "filter/ingredients";

/// Thin reqwest wrapper over the backend's GET endpoints.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct SearchClient {
    client: Client,
    base_url: String,
}

impl SearchClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|source| ApiError::InvalidUrl {
            url: base_url.clone(),
            source,
        })?;

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self { client, base_url })
    }

    /// Full `/search` URL for a request, with the canonical query string.
    pub fn search_url(&self, request: &SearchRequest) -> Result<Url, ApiError> {
        let mut url = self.endpoint(SEARCH_PATH)?;
        url.set_query(Some(&request.to_query_string()));
        Ok(url)
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<ResultPage, ApiError> {
        let url = self.search_url(request)?;
        self.get_json(url).await
    }

    pub async fn categories(&self) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint(CATEGORIES_PATH)?;
        self.get_json(url).await
    }

    pub async fn ingredients(&self) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint(INGREDIENTS_PATH)?;
        self.get_json(url).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!("{}/{}", self.base_url, path);
        Url::parse(&raw).map_err(|source| ApiError::InvalidUrl { url: raw, source })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let url_str = url.to_string();
        tracing::debug!(url = %url_str, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url_str.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url_str, status = status.as_u16(), "Backend returned error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Decode {
                url: url_str,
                source,
            })
    }
}

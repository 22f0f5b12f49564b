//! HTTP client for the records and countries endpoints.

use crate::error::ApiError;
use async_trait::async_trait;
use clientele_config::ApiConfig;
use clientele_core::{CountrySource, RecordStore, StoreError};
use clientele_protocol::{Country, CustomerRecord, NewCustomer, RecordId};
use log::{debug, warn};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Record store and country source backed by a REST API.
///
/// Records live under `records_path` (`GET` lists, `POST` creates,
/// `PUT {records_path}/{id}` replaces) and countries under
/// `countries_path`. Every request is JSON and bounded by one timeout.
#[derive(Debug, Clone)]
pub struct HttpStore {
    http: Client,
    records_url: Url,
    countries_url: Url,
}

impl HttpStore {
    /// Build a store from API settings.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::with_timeout(config, Duration::from_secs(config.timeout_secs))
    }

    /// Build a store with an explicit request timeout.
    pub fn with_timeout(config: &ApiConfig, timeout: Duration) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(ApiError::Setup)?;
        Ok(Self {
            http,
            records_url: endpoint(&config.base_url, &config.records_path)?,
            countries_url: endpoint(&config.base_url, &config.countries_path)?,
        })
    }

    fn record_url(&self, id: &RecordId) -> Result<Url, ApiError> {
        let mut url = self.records_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.records_url.to_string()))?
            .pop_if_empty()
            .push(id.as_str());
        Ok(url)
    }

    async fn fetch_list<T: DeserializeOwned>(&self, url: &Url) -> Result<Vec<T>, ApiError> {
        let response = self.send(self.http.get(url.clone()), Method::GET, url).await?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Vec::new());
        }
        // A `null` body counts as an empty collection.
        let items: Option<Vec<T>> = serde_json::from_slice(&bytes)?;
        Ok(items.unwrap_or_default())
    }

    async fn send_record<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<CustomerRecord, ApiError> {
        let request = self.http.request(method.clone(), url.clone()).json(body);
        let response = self.send(request, method, &url).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send(
        &self,
        request: RequestBuilder,
        method: Method,
        url: &Url,
    ) -> Result<Response, ApiError> {
        debug!("Making {method} request to: {}", url.path());
        let response = request.send().await.map_err(|err| {
            warn!("Request failed (method={method}, url={url}, error={err})");
            ApiError::from(err)
        })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Unexpected response (method={method}, url={url}, status={status})");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

fn endpoint(base_url: &str, path: &str) -> Result<Url, ApiError> {
    let raw = format!("{}{}", base_url.trim_end_matches('/'), path);
    Url::parse(&raw).map_err(|err| ApiError::InvalidUrl(format!("{raw}: {err}")))
}

#[async_trait]
impl RecordStore for HttpStore {
    async fn list(&self) -> Result<Vec<CustomerRecord>, StoreError> {
        Ok(self.fetch_list(&self.records_url).await?)
    }

    async fn create(&self, customer: NewCustomer) -> Result<CustomerRecord, StoreError> {
        Ok(self
            .send_record(Method::POST, self.records_url.clone(), &customer)
            .await?)
    }

    async fn update(
        &self,
        id: &RecordId,
        record: CustomerRecord,
    ) -> Result<CustomerRecord, StoreError> {
        let url = self.record_url(id)?;
        Ok(self.send_record(Method::PUT, url, &record).await?)
    }
}

#[async_trait]
impl CountrySource for HttpStore {
    async fn list_countries(&self) -> Result<Vec<Country>, StoreError> {
        Ok(self.fetch_list(&self.countries_url).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        }
    }

    #[test]
    fn endpoints_join_base_and_paths() {
        let store = HttpStore::new(&config("http://api.test/v1/")).expect("store");
        assert_eq!(store.records_url.as_str(), "http://api.test/v1/taxes");
        assert_eq!(store.countries_url.as_str(), "http://api.test/v1/countries");
    }

    #[test]
    fn record_urls_escape_ids() {
        let store = HttpStore::new(&config("http://api.test")).expect("store");
        let url = store.record_url(&RecordId::from("a b/c")).expect("url");
        assert_eq!(url.as_str(), "http://api.test/taxes/a%20b%2Fc");
        let url = store.record_url(&RecordId::from(7u64)).expect("url");
        assert_eq!(url.as_str(), "http://api.test/taxes/7");
    }

    #[test]
    fn api_errors_map_onto_store_errors() {
        let status = ApiError::Status {
            status: 503,
            body: "down".to_string(),
        };
        assert_eq!(
            StoreError::from(status),
            StoreError::Status {
                status: 503,
                body: "down".to_string(),
            }
        );
        assert_eq!(StoreError::from(ApiError::Timeout), StoreError::Timeout);
        assert!(matches!(
            StoreError::from(ApiError::InvalidUrl("x".to_string())),
            StoreError::Transport(_)
        ));
    }
}

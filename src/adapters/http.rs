use crate::domain::model::{Address, DependentRecord, PrimaryRecord};
use crate::domain::ports::{ConfigProvider, ResourceFetcher};
use crate::utils::error::{AppError, FetchError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use url::Url;

/// 以 HTTP GET 取得 JSON 資源的 fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// 依設定建立 client，附上自訂標頭
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let headers = build_headers(config.headers())?;
        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self { client })
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        address: &Address,
    ) -> std::result::Result<T, FetchError> {
        let url = Url::parse(address.as_str()).map_err(|e| FetchError::Transport {
            address: address.to_string(),
            message: format!("invalid address: {}", e),
        })?;

        tracing::debug!("Making API request to: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                address: address.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        tracing::debug!("API response status: {} ({})", status, address);

        // 非 2xx 一律視為失敗，即使有 body
        if !status.is_success() {
            return Err(FetchError::Status {
                address: address.to_string(),
                code: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Transport {
            address: address.to_string(),
            message: format!("failed to read body: {}", e),
        })?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
            address: address.to_string(),
            message: e.to_string(),
        })
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch_primary(&self, address: &Address) -> std::result::Result<PrimaryRecord, FetchError> {
        self.fetch_json(address).await
    }

    async fn fetch_dependent(
        &self,
        address: &Address,
    ) -> std::result::Result<DependentRecord, FetchError> {
        self.fetch_json(address).await
    }
}

fn build_headers(headers: &HashMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
            AppError::InvalidConfigValue {
                field: "source.headers".to_string(),
                value: key.clone(),
                reason: format!("invalid header name: {}", e),
            }
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| AppError::InvalidConfigValue {
            field: format!("source.headers.{}", key),
            value: value.clone(),
            reason: format!("invalid header value: {}", e),
        })?;
        map.insert(name, value);
    }
    Ok(map)
}

//! Google Places Web Service 实现
//!
//! 使用 ureq 同步请求，放在 spawn_blocking 中执行。
//! - `{base_url}/nearbysearch/json`
//! - `{base_url}/details/json`
//! - `{base_url}/photo`（302 跳转到图片，ureq 自动跟随）

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{trace, warn};
use ureq::Agent;

use super::client::PlacesApi;
use super::types::{DetailsResponse, NearbySearchRequest, NearbySearchResponse};
use crate::config::PlacesConfig;
use crate::errors::{PlotmapError, Result};

/// Google Places Provider
#[derive(Clone)]
pub struct GooglePlacesClient {
    agent: Agent,
    base_url: String,
    api_key: String,
}

impl GooglePlacesClient {
    /// 创建客户端
    ///
    /// `timeout_secs` 未配置时不设置全局超时
    pub fn new(config: &PlacesConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(config.timeout_secs.map(Duration::from_secs))
            .build()
            .into();

        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// 同步 GET 并解析 JSON（在 spawn_blocking 中调用）
    fn get_json_sync<T: DeserializeOwned>(
        agent: &Agent,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let mut request = agent.get(url);
        for (key, value) in params {
            request = request.query(*key, value);
        }

        let resp = request.call().map_err(|e| {
            warn!("Places API request to \"{}\" failed: {}", url, e);
            PlotmapError::upstream_transport(format!("request to {} failed: {}", url, e))
        })?;

        resp.into_body().read_json::<T>().map_err(|e| {
            warn!("Places API response from \"{}\" parse failed: {}", url, e);
            PlotmapError::upstream_transport(format!("invalid response from {}: {}", url, e))
        })
    }

    /// 同步获取二进制内容
    fn get_bytes_sync(agent: &Agent, url: &str, params: &[(&str, String)]) -> Result<Vec<u8>> {
        let mut request = agent.get(url);
        for (key, value) in params {
            request = request.query(*key, value);
        }

        let resp = request.call().map_err(|e| {
            warn!("Places photo request to \"{}\" failed: {}", url, e);
            PlotmapError::upstream_transport(format!("request to {} failed: {}", url, e))
        })?;

        resp.into_body().read_to_vec().map_err(|e| {
            warn!("Places photo body from \"{}\" read failed: {}", url, e);
            PlotmapError::upstream_transport(format!("failed to read body from {}: {}", url, e))
        })
    }

    /// 在线程池中执行同步 HTTP 请求
    async fn run_blocking<T, F>(f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(f).await.map_err(|e| {
            warn!("Places spawn_blocking failed: {}", e);
            PlotmapError::upstream_transport(format!("blocking task failed: {}", e))
        })?
    }
}

#[async_trait]
impl PlacesApi for GooglePlacesClient {
    async fn nearby_search(&self, request: &NearbySearchRequest) -> Result<NearbySearchResponse> {
        let agent = self.agent.clone();
        let url = self.endpoint("nearbysearch/json");
        let params = vec![
            ("key", self.api_key.clone()),
            ("name", request.name.clone()),
            (
                "location",
                format!("{},{}", request.latitude, request.longitude),
            ),
            ("radius", request.radius.to_string()),
        ];

        trace!("Nearby search for {:?}", request.name);
        Self::run_blocking(move || Self::get_json_sync(&agent, &url, &params)).await
    }

    async fn details(&self, place_id: &str) -> Result<DetailsResponse> {
        let agent = self.agent.clone();
        let url = self.endpoint("details/json");
        let params = vec![
            ("key", self.api_key.clone()),
            ("place_id", place_id.to_string()),
        ];

        trace!("Details lookup for place {}", place_id);
        Self::run_blocking(move || Self::get_json_sync(&agent, &url, &params)).await
    }

    async fn photo(&self, photo_reference: &str, max_width: u32) -> Result<Vec<u8>> {
        let agent = self.agent.clone();
        let url = self.endpoint("photo");
        let params = vec![
            ("key", self.api_key.clone()),
            ("photo_reference", photo_reference.to_string()),
            ("maxwidth", max_width.to_string()),
        ];

        trace!("Photo fetch, max width {}", max_width);
        Self::run_blocking(move || Self::get_bytes_sync(&agent, &url, &params)).await
    }

    fn name(&self) -> &'static str {
        "GooglePlaces"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = GooglePlacesClient::new(&PlacesConfig {
            api_key: "k".to_string(),
            base_url: "http://localhost:1234/place/".to_string(),
            timeout_secs: Some(2),
        });
        assert_eq!(
            client.endpoint("details/json"),
            "http://localhost:1234/place/details/json"
        );
        assert_eq!(client.name(), "GooglePlaces");
    }

    /// 依赖外部网络服务，CI 环境可能失败
    #[tokio::test]
    #[ignore]
    async fn test_unreachable_host_is_transport_error() {
        let client = GooglePlacesClient::new(&PlacesConfig {
            api_key: "k".to_string(),
            base_url: "http://192.0.2.1/place".to_string(), // TEST-NET, 不可路由
            timeout_secs: Some(1),
        });
        let err = client.details("x").await.unwrap_err();
        assert!(matches!(err, PlotmapError::UpstreamTransport(_)));
    }
}

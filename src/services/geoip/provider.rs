//! GeoIP Provider 抽象层
//!
//! 统一的访客定位接口，启动时根据配置选择实现：
//! 1. 检查 maxminddb_path 是否可读
//! 2. 可读 → MaxMindProvider
//! 3. 不可读 → UnavailableProvider（每次查询都返回 `DatabaseUnavailable`）
//!
//! 定位失败从不影响调用方：首页对任何 `LookupError` 都使用默认地图中心。

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::maxmind::MaxMindProvider;
use crate::config::GeoIpConfig;

/// 地理坐标
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// 定位失败原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// 数据库缺失或无法打开
    DatabaseUnavailable(String),
    /// 无法解析的 IP 地址
    InvalidAddress(String),
    /// 数据库中没有该地址
    NotFound,
    /// 记录存在但没有经纬度
    MissingCoordinates,
    /// 数据库读取/解码失败
    Database(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::DatabaseUnavailable(msg) => {
                write!(f, "GeoIP database unavailable: {}", msg)
            }
            LookupError::InvalidAddress(ip) => write!(f, "invalid IP address: {}", ip),
            LookupError::NotFound => write!(f, "address not found in GeoIP database"),
            LookupError::MissingCoordinates => write!(f, "GeoIP record has no coordinates"),
            LookupError::Database(msg) => write!(f, "GeoIP database error: {}", msg),
        }
    }
}

impl std::error::Error for LookupError {}

/// GeoIP 查询 trait
#[async_trait]
pub trait GeoLocator: Send + Sync {
    /// 查询 IP 地址的地理坐标
    async fn locate(&self, ip: &str) -> Result<GeoLocation, LookupError>;

    /// 获取 provider 名称（用于日志）
    fn name(&self) -> &'static str;
}

/// 数据库不可用时的占位实现
struct UnavailableProvider {
    reason: String,
}

#[async_trait]
impl GeoLocator for UnavailableProvider {
    async fn locate(&self, _ip: &str) -> Result<GeoLocation, LookupError> {
        Err(LookupError::DatabaseUnavailable(self.reason.clone()))
    }

    fn name(&self) -> &'static str {
        "Unavailable"
    }
}

/// 统一 GeoIP Provider
///
/// 启动时根据配置自动选择实现
#[derive(Clone)]
pub struct GeoIpProvider {
    inner: Arc<dyn GeoLocator>,
    available: bool,
}

impl GeoIpProvider {
    /// 根据 GeoIpConfig 初始化
    pub fn new(config: &GeoIpConfig) -> Self {
        let path = &config.maxminddb_path;
        let mut available = true;
        let inner: Arc<dyn GeoLocator> = match MaxMindProvider::new(path) {
            Ok(provider) => {
                info!("GeoIP: Using MaxMind database at {}", path);
                Arc::new(provider)
            }
            Err(e) => {
                warn!(
                    "GeoIP: Failed to load MaxMind database at {}: {}, visitors will get the default map center",
                    path, e
                );
                available = false;
                Arc::new(UnavailableProvider {
                    reason: e.to_string(),
                })
            }
        };

        info!("GeoIP: Initialized with {} provider", inner.name());
        Self { inner, available }
    }

    /// 使用指定实现（测试或自定义数据源）
    pub fn with_locator(inner: Arc<dyn GeoLocator>) -> Self {
        Self {
            inner,
            available: true,
        }
    }

    /// 查询 IP 地址的地理坐标
    pub async fn locate(&self, ip: &str) -> Result<GeoLocation, LookupError> {
        self.inner.locate(ip).await
    }

    /// 获取当前使用的 provider 名称
    pub fn provider_name(&self) -> &'static str {
        self.inner.name()
    }

    /// 数据库是否已加载
    pub fn is_available(&self) -> bool {
        self.available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_database_falls_back_to_unavailable() {
        let provider = GeoIpProvider::new(&GeoIpConfig {
            maxminddb_path: "/nonexistent/GeoLite2-City.mmdb".to_string(),
            trusted_proxies: Vec::new(),
        });

        assert!(!provider.is_available());
        assert_eq!(provider.provider_name(), "Unavailable");

        let err = provider.locate("8.8.8.8").await.unwrap_err();
        assert!(matches!(err, LookupError::DatabaseUnavailable(_)));
    }

    #[test]
    fn test_lookup_error_display() {
        assert_eq!(
            LookupError::InvalidAddress("nope".to_string()).to_string(),
            "invalid IP address: nope"
        );
        assert!(LookupError::NotFound.to_string().contains("not found"));
    }
}

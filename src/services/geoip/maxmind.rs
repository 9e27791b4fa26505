//! MaxMind GeoLite2 数据库实现
//!
//! 使用本地 MaxMind GeoLite2-City.mmdb 文件进行 IP 地理位置查询

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use maxminddb::Reader;
use tracing::trace;

use super::provider::{GeoLocation, GeoLocator, LookupError};

/// MaxMind GeoIP Provider
pub struct MaxMindProvider {
    reader: Arc<Reader<Vec<u8>>>,
}

impl MaxMindProvider {
    /// 从文件路径创建 MaxMind Provider
    pub fn new(path: &str) -> Result<Self, maxminddb::MaxMindDbError> {
        let reader = Reader::open_readfile(path)?;
        Ok(Self {
            reader: Arc::new(reader),
        })
    }
}

#[async_trait]
impl GeoLocator for MaxMindProvider {
    async fn locate(&self, ip: &str) -> Result<GeoLocation, LookupError> {
        let ip_addr: IpAddr = ip
            .parse()
            .map_err(|_| LookupError::InvalidAddress(ip.to_string()))?;

        let result = self
            .reader
            .lookup(ip_addr)
            .map_err(|e| LookupError::Database(e.to_string()))?;
        let city: maxminddb::geoip2::City = result
            .decode()
            .map_err(|e| LookupError::Database(e.to_string()))?
            .ok_or(LookupError::NotFound)?;

        trace!(
            "MaxMind lookup for {}: latitude={:?}, longitude={:?}",
            ip, city.location.latitude, city.location.longitude
        );

        match (city.location.latitude, city.location.longitude) {
            (Some(latitude), Some(longitude)) => Ok(GeoLocation {
                latitude,
                longitude,
            }),
            _ => Err(LookupError::MissingCoordinates),
        }
    }

    fn name(&self) -> &'static str {
        "MaxMind"
    }
}

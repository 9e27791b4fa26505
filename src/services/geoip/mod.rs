//! GeoIP 服务模块
//!
//! 根据访客 IP 查询大致位置，用于首页地图居中：
//! - MaxMind GeoLite2 本地数据库

mod maxmind;
mod provider;

pub use maxmind::MaxMindProvider;
pub use provider::{GeoIpProvider, GeoLocation, GeoLocator, LookupError};

//! Places API 抽象层

use async_trait::async_trait;

use super::types::{DetailsResponse, NearbySearchRequest, NearbySearchResponse};
use crate::errors::Result;

/// Places API 查询 trait
///
/// 传输层失败（连接、超时、非 2xx、JSON 解析）返回 `UpstreamTransport`；
/// 业务状态（status 字段）原样交给调用方判断。
#[async_trait]
pub trait PlacesApi: Send + Sync {
    /// 附近搜索
    async fn nearby_search(&self, request: &NearbySearchRequest) -> Result<NearbySearchResponse>;

    /// 按 place_id 查询详情
    async fn details(&self, place_id: &str) -> Result<DetailsResponse>;

    /// 获取照片原始字节，可能为空
    async fn photo(&self, photo_reference: &str, max_width: u32) -> Result<Vec<u8>>;

    /// 获取实现名称（用于日志）
    fn name(&self) -> &'static str;
}

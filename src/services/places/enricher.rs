//! 地块详情补全
//!
//! 线性流水线：附近搜索 → 详情 → （可选）照片。
//! 搜索、详情两步的非 OK 状态直接终止，返回 `UpstreamLookup`；照片缺失不算错误。

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, trace};

use super::client::PlacesApi;
use super::types::{NearbySearchRequest, PlacesStatus, PropertyDetail};
use crate::errors::{PlotmapError, Result};

/// 附近搜索半径（单位由 API 定义）
pub const SEARCH_RADIUS: u32 = 1000;

/// 照片最大宽度（单位由 API 定义）
pub const PHOTO_MAX_WIDTH: u32 = 400;

/// 搜索阶段命中的第一条结果
#[derive(Debug, Clone, PartialEq)]
struct SearchHit {
    place_id: String,
    photo: Option<PhotoRef>,
}

#[derive(Debug, Clone, PartialEq)]
struct PhotoRef {
    reference: String,
    credit: Option<String>,
}

pub struct PlaceEnricher {
    api: Arc<dyn PlacesApi>,
}

impl PlaceEnricher {
    pub fn new(api: Arc<dyn PlacesApi>) -> Self {
        Self { api }
    }

    pub fn provider_name(&self) -> &'static str {
        self.api.name()
    }

    /// 查询地块附近地点的详情
    pub async fn enrich(&self, name: &str, latitude: f64, longitude: f64) -> Result<PropertyDetail> {
        let hit = self.search(name, latitude, longitude).await?;
        let mut detail = self.lookup_details(&hit.place_id).await?;

        if let Some(photo) = hit.photo {
            self.attach_photo(&mut detail, photo).await?;
        }

        Ok(detail)
    }

    async fn search(&self, name: &str, latitude: f64, longitude: f64) -> Result<SearchHit> {
        let request = NearbySearchRequest {
            name: name.to_string(),
            latitude,
            longitude,
            radius: SEARCH_RADIUS,
        };

        let response = self.api.nearby_search(&request).await?;

        if !PlacesStatus::is_ok(response.status) {
            debug!(
                "Nearby search for {:?} returned status {:?}",
                name, response.status
            );
            return Err(PlotmapError::upstream_lookup(format!(
                "nearby search status {:?}",
                response.status
            )));
        }

        // 只取第一条结果
        let Some(first) = response.results.into_iter().next() else {
            debug!("Nearby search for {:?} returned no results", name);
            return Err(PlotmapError::upstream_lookup("nearby search returned no results"));
        };

        let photo = first.photos.into_iter().next().map(|p| PhotoRef {
            reference: p.photo_reference,
            credit: p.html_attributions.into_iter().next(),
        });

        trace!(
            "Nearby search hit place {} (photo: {})",
            first.place_id,
            photo.is_some()
        );

        Ok(SearchHit {
            place_id: first.place_id,
            photo,
        })
    }

    async fn lookup_details(&self, place_id: &str) -> Result<PropertyDetail> {
        let response = self.api.details(place_id).await?;

        if !PlacesStatus::is_ok(response.status) {
            debug!(
                "Details lookup for {} returned status {:?}",
                place_id, response.status
            );
            return Err(PlotmapError::upstream_lookup(format!(
                "details status {:?}",
                response.status
            )));
        }

        let result = response.result;
        Ok(PropertyDetail {
            formatted_address: result.formatted_address,
            phone_number: result.international_phone_number,
            website: result.website,
            ..Default::default()
        })
    }

    async fn attach_photo(&self, detail: &mut PropertyDetail, photo: PhotoRef) -> Result<()> {
        let bytes = self.api.photo(&photo.reference, PHOTO_MAX_WIDTH).await?;

        if bytes.is_empty() {
            debug!("Photo fetch returned an empty body, skipping photo");
            return Ok(());
        }

        detail.photo = Some(STANDARD.encode(&bytes));
        detail.photo_credit = photo.credit;
        Ok(())
    }
}

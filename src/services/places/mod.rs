//! 地块详情服务
//!
//! 通过第三方 Places API 查询地块附近地点的地址、电话、网站和照片：
//! - `client`: PlacesApi trait
//! - `google`: Google Places Web Service 实现
//! - `enricher`: 搜索 → 详情 → 照片 流水线

mod client;
pub mod enricher;
mod google;
pub mod types;

pub use client::PlacesApi;
pub use enricher::{PHOTO_MAX_WIDTH, PlaceEnricher, SEARCH_RADIUS};
pub use google::GooglePlacesClient;
pub use types::{
    DetailsResponse, NearbyResult, NearbySearchRequest, NearbySearchResponse, PlaceDetails,
    PlacePhoto, PlacesStatus, PropertyDetail,
};

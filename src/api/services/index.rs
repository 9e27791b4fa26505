use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::MapConfig;
use crate::services::GeoIpProvider;
use crate::utils::ip::extract_client_ip;

/// 定位成功时的缩放级别
pub const LOCATED_ZOOM: u8 = 11;

/// 定位失败时的缩放级别（整个世界）
pub const DEFAULT_ZOOM: u8 = 1;

/// 首页地图视图
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapbox_access_token: Option<String>,
}

pub struct IndexService;

impl IndexService {
    /// 按访客 IP 计算地图中心，定位失败时回退到 (0, 0)
    pub async fn index(
        req: HttpRequest,
        geoip: web::Data<GeoIpProvider>,
        map_config: web::Data<MapConfig>,
    ) -> impl Responder {
        let client_ip = extract_client_ip(&req).unwrap_or_default();
        trace!("Index request from {:?}", client_ip);

        let (latitude, longitude, zoom) = match geoip.locate(&client_ip).await {
            Ok(location) => (location.latitude, location.longitude, LOCATED_ZOOM),
            Err(e) => {
                debug!("Visitor {:?} not located: {}", client_ip, e);
                (0.0, 0.0, DEFAULT_ZOOM)
            }
        };

        HttpResponse::Ok().json(MapView {
            latitude,
            longitude,
            zoom,
            mapbox_access_token: map_config.mapbox_access_token.clone(),
        })
    }
}

pub fn index_routes() -> actix_web::Resource {
    web::resource("/")
        .route(web::get().to(IndexService::index))
        .route(web::head().to(IndexService::index))
}

use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use tracing::{debug, error, info, trace, warn};

use crate::errors::PlotmapError;
use crate::services::{PlaceEnricher, PlotService};

/// `/plots/details` 查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct DetailsQuery {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl DetailsQuery {
    /// `f64` 解析接受 `NaN` / `inf`，这里拒绝
    pub fn validate(&self) -> Result<(), PlotmapError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(PlotmapError::validation(format!(
                "latitude out of range: {}",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(PlotmapError::validation(format!(
                "longitude out of range: {}",
                self.longitude
            )));
        }
        Ok(())
    }
}

pub struct PlotsService;

impl PlotsService {
    /// 返回全部地块的 GeoJSON FeatureCollection
    pub async fn get_plots(plots: web::Data<PlotService>) -> impl Responder {
        trace!("Loading plots from {}", plots.csv_path().display());

        match plots.load_plots().await {
            Ok(collection) => {
                debug!("Loaded {} plots", collection.features.len());
                HttpResponse::Ok().json(collection)
            }
            Err(e) => {
                error!("Failed to load plots: {}", e);
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }

    /// 通过 Places API 补全单个地块的详情
    pub async fn get_plot_details(
        query: web::Query<DetailsQuery>,
        enricher: web::Data<PlaceEnricher>,
    ) -> impl Responder {
        if let Err(e) = query.validate() {
            debug!("Rejected details query: {}", e);
            return HttpResponse::BadRequest().body(e.message().to_string());
        }

        let DetailsQuery {
            name,
            latitude,
            longitude,
        } = query.into_inner();
        trace!("Details request for {:?} at {},{}", name, latitude, longitude);

        match enricher.enrich(&name, latitude, longitude).await {
            Ok(detail) => {
                info!("Resolved details for {:?}", name);
                HttpResponse::Ok().json(detail)
            }
            Err(PlotmapError::UpstreamLookup(msg)) => {
                debug!("No place found for {:?}: {}", name, msg);
                HttpResponse::BadRequest().finish()
            }
            Err(PlotmapError::UpstreamTransport(msg)) => {
                warn!("Places API unreachable for {:?}: {}", name, msg);
                HttpResponse::BadGateway().finish()
            }
            Err(e) => {
                error!("Details lookup for {:?} failed: {}", name, e);
                HttpResponse::InternalServerError().finish()
            }
        }
    }
}

pub fn plot_routes() -> actix_web::Scope {
    web::scope("/plots")
        .route("", web::get().to(PlotsService::get_plots))
        .route("/details", web::get().to(PlotsService::get_plot_details))
}

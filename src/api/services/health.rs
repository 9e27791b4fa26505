use actix_web::{HttpResponse, Responder, http::StatusCode, web};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, trace, warn};

use crate::services::{GeoIpProvider, PlotService};

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthPlotsCheck {
    pub status: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthGeoIpCheck {
    pub status: String,
    pub provider: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthChecks {
    pub plots: HealthPlotsCheck,
    pub geoip: HealthGeoIpCheck,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: u64,
    pub checks: HealthChecks,
    pub response_time_ms: u32,
}

/// Health Service
///
/// 只检查本地资源，不访问 Places API。
pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        plots: web::Data<PlotService>,
        geoip: web::Data<GeoIpProvider>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        let start_time = Instant::now();
        trace!("Received health check request");

        let plots_readable = plots.is_readable();
        if !plots_readable {
            warn!(
                "Health check: plot data file {} is not readable",
                plots.csv_path().display()
            );
        }

        let plots_check = HealthPlotsCheck {
            status: if plots_readable { "healthy" } else { "unhealthy" }.to_string(),
            path: plots.csv_path().display().to_string(),
        };

        // GeoIP 缺失只影响地图初始位置
        let geoip_check = HealthGeoIpCheck {
            status: if geoip.is_available() {
                "healthy"
            } else {
                "degraded"
            }
            .to_string(),
            provider: geoip.provider_name().to_string(),
        };

        let now = chrono::Utc::now();
        let uptime_seconds = (now - app_start_time.start_datetime).num_seconds().max(0) as u64;

        let health = HealthResponse {
            status: if plots_readable { "healthy" } else { "unhealthy" }.to_string(),
            timestamp: now.to_rfc3339(),
            uptime: uptime_seconds,
            checks: HealthChecks {
                plots: plots_check,
                geoip: geoip_check,
            },
            response_time_ms: start_time.elapsed().as_millis() as u32,
        };

        let status = if plots_readable {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };

        info!(
            "Health check completed in {:?}, status: {}, uptime: {}s",
            start_time.elapsed(),
            health.status,
            uptime_seconds
        );

        HttpResponse::build(status).json(health)
    }

    // 简单的就绪检查，只返回 200 状态码
    pub async fn readiness_check() -> impl Responder {
        trace!("Received readiness check request");
        HttpResponse::Ok().body("OK")
    }

    // 活性检查，返回 204
    pub async fn liveness_check() -> impl Responder {
        trace!("Received liveness check request");
        HttpResponse::NoContent().finish()
    }
}

pub fn health_routes() -> actix_web::Scope {
    web::scope("/health")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
        .route("/ready", web::get().to(HealthService::readiness_check))
        .route("/ready", web::head().to(HealthService::readiness_check))
        .route("/live", web::get().to(HealthService::liveness_check))
        .route("/live", web::head().to(HealthService::liveness_check))
}

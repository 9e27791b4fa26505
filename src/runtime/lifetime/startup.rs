use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::StaticConfig;
use crate::services::{GeoIpProvider, GooglePlacesClient, PlaceEnricher, PlotService};

/// 服务器运行所需的共享组件
pub struct StartupContext {
    pub plot_service: Arc<PlotService>,
    pub enricher: Arc<PlaceEnricher>,
    pub geoip: Arc<GeoIpProvider>,
}

/// 准备服务器启动的上下文
///
/// 地块文件和 GeoIP 数据库缺失都不阻止启动：前者在请求时报错，后者退化为默认视图。
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let plot_service = Arc::new(PlotService::new(&config.plots.csv_path));
    if plot_service.is_readable() {
        info!("Plot data file: {}", plot_service.csv_path().display());
    } else {
        warn!(
            "Plot data file {} is not readable, /plots will fail until it exists",
            plot_service.csv_path().display()
        );
    }

    if config.places.api_key.is_empty() {
        warn!("places.api_key is empty, plot detail lookups will be rejected upstream");
    }
    let places_client = GooglePlacesClient::new(&config.places);
    let enricher = Arc::new(PlaceEnricher::new(Arc::new(places_client)));
    info!("Using places provider: {}", enricher.provider_name());

    let geoip = Arc::new(GeoIpProvider::new(&config.geoip));
    info!(
        "Using geolocation provider: {} (available: {})",
        geoip.provider_name(),
        geoip.is_available()
    );

    if config.map.mapbox_access_token.is_none() {
        warn!("map.mapbox_access_token is not set, the map view will not render tiles");
    }

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        plot_service,
        enricher,
        geoip,
    })
}

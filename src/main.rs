mod api;
mod config;
mod geo;
mod timezone;
mod validate;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use config::Config;
use geo::{GeoDatabase, GeoLocator, MaxMindGeo};
use timezone::{SystemClock, TimezoneService};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration");

    // Both datasets must be ready before the listener binds. A failed
    // database open is the only fatal error in the process.
    let geo_db = Arc::new(MaxMindGeo::open(
        &config.geoip.database_path,
        config.geoip.release.clone(),
    )?);
    info!(
        "Loaded GeoIP database {} (release {})",
        config.geoip.database_path,
        geo_db.release()
    );
    info!("Timezone rules: tzdata {}", timezone::tzdata_version());

    let timezones = TimezoneService::new(Arc::new(SystemClock));
    let geo = GeoLocator::new(geo_db, timezones.clone());

    let router = api::create_api_router(timezones, geo);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 API server listening on http://{}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub geoip: GeoIpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoIpConfig {
    /// Path to the MaxMind City .mmdb file
    pub database_path: String,
    /// Release label override for /version; derived from database
    /// metadata when unset
    #[serde(default)]
    pub release: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let database_path = std::env::var("GEOIP_DB_PATH")
            .unwrap_or_else(|_| "./data/GeoLite2-City.mmdb".to_string());
        let release = std::env::var("GEOIP_RELEASE").ok();

        Ok(Config {
            server: ServerConfig { host, port },
            geoip: GeoIpConfig {
                database_path,
                release,
            },
        })
    }
}

use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_AWDB_BASE_URL: &str = "https://wcc.sc.egov.usda.gov/awdbRestApi/services/v1";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub awdb: AwdbSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_addr: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AwdbSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl AwdbSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Defaults, then `config/snotel.*` if present, then `SNOTEL_*` environment variables
/// (`SNOTEL_AWDB__TIMEOUT_SECS=10`).
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = base_builder()?
        .add_source(config::File::with_name("config/snotel").required(false))
        .add_source(environment())
        .build()?;

    Ok(settings.try_deserialize()?)
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("SNOTEL")
        .prefix_separator("_")
        .separator("__")
}

fn base_builder() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("server.bind_addr", "0.0.0.0:8080")?
        .set_default("awdb.base_url", DEFAULT_AWDB_BASE_URL)?
        .set_default("awdb.timeout_secs", 30)?)
}

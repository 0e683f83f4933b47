// Repository trait for snow telemetry data access
use crate::domain::date_range::DateRange;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Which stations a station search asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum StationQuery {
    ByState {
        state: String,
        network: String,
    },
    Nearby {
        latitude: f64,
        longitude: f64,
        radius_miles: f64,
        network: String,
    },
    Network {
        network: String,
    },
}

impl StationQuery {
    /// A state wins over coordinates; coordinates need all three of latitude, longitude and radius.
    pub fn select(
        state: Option<&str>,
        latitude: Option<f64>,
        longitude: Option<f64>,
        radius_miles: Option<f64>,
        network: &str,
    ) -> Self {
        let network = network.to_string();
        match (state.filter(|s| !s.trim().is_empty()), latitude, longitude, radius_miles) {
            (Some(state), ..) => StationQuery::ByState {
                state: state.trim().to_uppercase(),
                network,
            },
            (None, Some(latitude), Some(longitude), Some(radius_miles)) => StationQuery::Nearby {
                latitude,
                longitude,
                radius_miles,
                network,
            },
            _ => StationQuery::Network { network },
        }
    }
}

/// Reporting interval of the requested series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Duration {
    Daily,
    Hourly,
    Monthly,
}

impl Duration {
    pub fn as_param(&self) -> &'static str {
        match self {
            Duration::Daily => "DAILY",
            Duration::Hourly => "HOURLY",
            Duration::Monthly => "MONTHLY",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataRequest {
    pub station_triplet: String,
    pub elements: Vec<String>,
    pub range: DateRange,
    pub duration: Option<Duration>,
}

#[async_trait]
pub trait SnowDataRepository: Send + Sync {
    /// Station metadata objects, as returned upstream
    async fn list_stations(&self, query: &StationQuery) -> anyhow::Result<Vec<Value>>;

    /// Station entries carrying per-element `data` groups, as returned upstream
    async fn fetch_station_data(&self, request: &DataRequest) -> anyhow::Result<Vec<Value>>;
}

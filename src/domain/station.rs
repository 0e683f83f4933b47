// Station domain model
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Network queried when the caller does not name one.
pub const DEFAULT_NETWORK: &str = "SNTL";

/// Station identifier of the form `id:state:network`, e.g. `713:CO:SNTL`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StationTriplet {
    pub id: String,
    pub state: String,
    pub network: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid station triplet format. Expected format: 'id:state:network'")]
pub struct InvalidTriplet;

impl FromStr for StationTriplet {
    type Err = InvalidTriplet;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        match parts.as_slice() {
            [id, state, network] if !id.is_empty() && !state.is_empty() && !network.is_empty() => {
                Ok(Self {
                    id: id.to_string(),
                    state: state.to_string(),
                    network: network.to_string(),
                })
            }
            _ => Err(InvalidTriplet),
        }
    }
}

impl fmt::Display for StationTriplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.id, self.state, self.network)
    }
}

/// Station metadata as delivered by AWDB. Every field is optional upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    #[serde(default)]
    pub station_triplet: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, alias = "networkCd")]
    pub network_code: Option<String>,
    #[serde(default)]
    pub county_name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub elevation: Option<f64>,
}

impl Station {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }

    /// Decode a station list, dropping entries that are not station objects.
    pub fn from_values(values: &[serde_json::Value]) -> Vec<Station> {
        values
            .iter()
            .filter_map(|v| serde_json::from_value::<Station>(v.clone()).ok())
            .collect()
    }
}

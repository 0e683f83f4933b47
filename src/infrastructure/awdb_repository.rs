// AWDB REST API repository implementation
use crate::application::snow_data_repository::{DataRequest, SnowDataRepository, StationQuery};
use crate::infrastructure::config::AwdbSettings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct AwdbRepository {
    base_url: String,
    client: reqwest::Client,
}

impl AwdbRepository {
    pub fn new(settings: &AwdbSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()
            .context("Failed to build AWDB HTTP client")?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn build_query_url(&self, endpoint: &str, params: &[(&str, String)]) -> String {
        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        if query.is_empty() {
            url
        } else {
            format!("{}?{}", url, query)
        }
    }

    async fn execute_request(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value> {
        let url = self.build_query_url(endpoint, params);
        tracing::debug!("AWDB request: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to AWDB")?;

        tracing::debug!("AWDB response status: {}", response.status());
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("AWDB request failed with status {}: {}", status, body);
        }

        response
            .json::<Value>()
            .await
            .context("Failed to parse AWDB response")
    }
}

fn station_params(query: &StationQuery) -> Vec<(&'static str, String)> {
    match query {
        StationQuery::ByState { state, network } => {
            vec![("stationTriplets", format!("*:{}:{}", state, network))]
        }
        StationQuery::Nearby {
            latitude,
            longitude,
            radius_miles,
            network,
        } => vec![
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("radius", radius_miles.to_string()),
            ("networks", network.clone()),
            ("logicalAnd", "true".to_string()),
        ],
        StationQuery::Network { network } => vec![("networks", network.clone())],
    }
}

fn data_params(request: &DataRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("stationTriplets", request.station_triplet.clone()),
        ("elements", request.elements.join(",")),
        ("beginDate", request.range.start_param()),
        ("endDate", request.range.end_param()),
        ("ordinal", "1".to_string()),
    ];
    if let Some(duration) = request.duration {
        params.push(("duration", duration.as_param().to_string()));
    }
    params
}

/// AWDB answers either with a bare list or with `{"stations": [...]}`.
fn station_list(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("stations") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

#[async_trait]
impl SnowDataRepository for AwdbRepository {
    async fn list_stations(&self, query: &StationQuery) -> Result<Vec<Value>> {
        let body = self.execute_request("stations", &station_params(query)).await?;
        let stations = station_list(body);
        tracing::debug!("AWDB returned {} stations", stations.len());
        Ok(stations)
    }

    async fn fetch_station_data(&self, request: &DataRequest) -> Result<Vec<Value>> {
        let body = self.execute_request("data", &data_params(request)).await?;
        Ok(station_list(body))
    }
}

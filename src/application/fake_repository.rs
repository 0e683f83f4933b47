// In-memory repository for service and handler tests
use crate::application::snow_data_repository::{DataRequest, SnowDataRepository, StationQuery};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeRepository {
    pub stations: Vec<Value>,
    pub data: Vec<Value>,
    pub failure: Option<String>,
    pub station_queries: Mutex<Vec<StationQuery>>,
    pub data_requests: Mutex<Vec<DataRequest>>,
}

impl FakeRepository {
    pub fn with_stations(stations: Vec<Value>) -> Self {
        Self {
            stations,
            ..Default::default()
        }
    }

    pub fn with_data(data: Vec<Value>) -> Self {
        Self {
            data,
            ..Default::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn last_data_request(&self) -> Option<DataRequest> {
        self.data_requests.lock().unwrap().last().cloned()
    }

    pub fn last_station_query(&self) -> Option<StationQuery> {
        self.station_queries.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl SnowDataRepository for FakeRepository {
    async fn list_stations(&self, query: &StationQuery) -> anyhow::Result<Vec<Value>> {
        self.station_queries.lock().unwrap().push(query.clone());
        if let Some(message) = &self.failure {
            anyhow::bail!("{}", message);
        }
        Ok(self.stations.clone())
    }

    async fn fetch_station_data(&self, request: &DataRequest) -> anyhow::Result<Vec<Value>> {
        self.data_requests.lock().unwrap().push(request.clone());
        if let Some(message) = &self.failure {
            anyhow::bail!("{}", message);
        }
        Ok(self.data.clone())
    }
}

pub fn red_mountain_pass() -> Value {
    json!({
        "stationTriplet": "713:CO:SNTL",
        "name": "Red Mountain Pass",
        "state": "CO",
        "networkCode": "SNTL",
        "latitude": 37.89,
        "longitude": -107.71,
        "elevation": 11080,
        "countyName": "San Juan"
    })
}

/// A `data` response for 713:CO:SNTL with one group per `(element, [(date, value)])`.
pub fn station_data(groups: &[(&str, &[(&str, f64)])]) -> Vec<Value> {
    let data: Vec<Value> = groups
        .iter()
        .map(|(code, points)| {
            let values: Vec<Value> = points
                .iter()
                .map(|(date, value)| json!({"date": date, "value": value}))
                .collect();
            json!({"stationElement": {"elementCode": code}, "values": values})
        })
        .collect();
    vec![json!({"stationTriplet": "713:CO:SNTL", "data": data})]
}

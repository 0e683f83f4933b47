// Station service - Use cases for finding stations and reading their metadata
use crate::application::error::ToolError;
use crate::application::snow_data_repository::{SnowDataRepository, StationQuery};
use crate::domain::station::{Station, StationTriplet};
use std::sync::Arc;

#[derive(Clone)]
pub struct StationService {
    repository: Arc<dyn SnowDataRepository>,
}

impl StationService {
    pub fn new(repository: Arc<dyn SnowDataRepository>) -> Self {
        Self { repository }
    }

    pub async fn find_stations(&self, query: &StationQuery) -> Result<Vec<Station>, ToolError> {
        let values = self
            .repository
            .list_stations(query)
            .await
            .map_err(ToolError::upstream)?;

        let stations = Station::from_values(&values);
        tracing::debug!("Station search returned {} of {} entries", stations.len(), values.len());
        Ok(stations)
    }

    /// Look a station up by its exact triplet. `Ok(None)` means AWDB does not list it.
    pub async fn station_info(&self, station_triplet: &str) -> Result<Option<Station>, ToolError> {
        let triplet: StationTriplet = station_triplet.parse()?;
        let query = StationQuery::ByState {
            state: triplet.state.to_uppercase(),
            network: triplet.network.clone(),
        };

        let stations = self.find_stations(&query).await?;
        let wanted = triplet.to_string();
        Ok(stations.into_iter().find(|s| s.station_triplet == wanted))
    }
}

// Trend service - Use case for snowpack trend analysis
use crate::application::error::ToolError;
use crate::application::measurement_service::elements_or_default;
use crate::application::snow_data_repository::{DataRequest, SnowDataRepository};
use crate::domain::date_range::DateRange;
use crate::domain::measurement::{extract_station_series, normalize};
use crate::domain::station::StationTriplet;
use crate::domain::trend::{Period, TrendOutcome, summarize};
use std::sync::Arc;

#[derive(Clone)]
pub struct TrendService {
    repository: Arc<dyn SnowDataRepository>,
}

impl TrendService {
    pub fn new(repository: Arc<dyn SnowDataRepository>) -> Self {
        Self { repository }
    }

    pub async fn analyze(
        &self,
        station_triplet: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<TrendOutcome, ToolError> {
        let triplet: StationTriplet = station_triplet.parse()?;
        let request = DataRequest {
            station_triplet: triplet.to_string(),
            elements: elements_or_default(None),
            range: DateRange::parse(start_date, end_date)?,
            duration: None,
        };

        let stations = self
            .repository
            .fetch_station_data(&request)
            .await
            .map_err(ToolError::upstream)?;
        if stations.is_empty() {
            return Ok(TrendOutcome::NoData {
                message: format!("No data available for analysis: {}", request.station_triplet),
                station_triplet: request.station_triplet,
            });
        }

        let extracted = extract_station_series(&stations, &request.station_triplet);
        let records = normalize(&extracted.series);
        tracing::debug!(
            "Normalized {} records for {} ({} entries skipped)",
            records.len(),
            request.station_triplet,
            extracted.skipped
        );

        if records.is_empty() {
            let message = if extracted.found {
                "No measurements found for analysis".to_string()
            } else {
                format!("Station {} not present in AWDB response", request.station_triplet)
            };
            return Ok(TrendOutcome::NoData {
                message,
                station_triplet: request.station_triplet,
            });
        }

        let period = Period {
            start_date: request.range.start_param(),
            end_date: request.range.end_param(),
        };
        Ok(TrendOutcome::Complete(summarize(
            &request.station_triplet,
            period,
            records,
            extracted.skipped,
        )))
    }
}

// Measurement service - Use cases for raw station data and recent conditions
use crate::application::error::ToolError;
use crate::application::snow_data_repository::{DataRequest, Duration, SnowDataRepository};
use crate::domain::date_range::DateRange;
use crate::domain::measurement::{
    DEFAULT_ELEMENTS, MeasurementRecord, extract_station_series, normalize,
};
use crate::domain::station::StationTriplet;
use chrono::NaiveDate;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum RecentConditions {
    /// AWDB returned nothing for the station and window
    NoData,
    /// AWDB answered, but no dated observation exists for the station
    NoMeasurements,
    Available(Vec<MeasurementRecord>),
}

#[derive(Clone)]
pub struct MeasurementService {
    repository: Arc<dyn SnowDataRepository>,
}

pub fn elements_or_default(elements: Option<Vec<String>>) -> Vec<String> {
    match elements {
        Some(elements) if !elements.is_empty() => elements,
        _ => DEFAULT_ELEMENTS.iter().map(|e| e.to_string()).collect(),
    }
}

impl MeasurementService {
    pub fn new(repository: Arc<dyn SnowDataRepository>) -> Self {
        Self { repository }
    }

    /// Upstream station entries, untouched.
    pub async fn station_data(
        &self,
        station_triplet: &str,
        start_date: &str,
        end_date: &str,
        elements: Option<Vec<String>>,
        duration: Option<Duration>,
    ) -> Result<Vec<Value>, ToolError> {
        let triplet: StationTriplet = station_triplet.parse()?;
        let request = DataRequest {
            station_triplet: triplet.to_string(),
            elements: elements_or_default(elements),
            range: DateRange::parse(start_date, end_date)?,
            duration,
        };

        self.repository
            .fetch_station_data(&request)
            .await
            .map_err(ToolError::upstream)
    }

    /// Normalized records for the `days` days up to `today`.
    pub async fn recent_conditions(
        &self,
        station_triplet: &str,
        days: u32,
        today: NaiveDate,
    ) -> Result<RecentConditions, ToolError> {
        let triplet: StationTriplet = station_triplet.parse()?;
        let request = DataRequest {
            station_triplet: triplet.to_string(),
            elements: elements_or_default(None),
            range: DateRange::trailing(today, days)?,
            duration: None,
        };

        let stations = self
            .repository
            .fetch_station_data(&request)
            .await
            .map_err(ToolError::upstream)?;
        if stations.is_empty() {
            return Ok(RecentConditions::NoData);
        }

        let extracted = extract_station_series(&stations, &request.station_triplet);
        if extracted.skipped > 0 {
            tracing::debug!(
                "Skipped {} malformed entries for {}",
                extracted.skipped,
                request.station_triplet
            );
        }

        let records = normalize(&extracted.series);
        if records.is_empty() {
            return Ok(RecentConditions::NoMeasurements);
        }
        Ok(RecentConditions::Available(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error::ErrorKind;
    use crate::application::fake_repository::{FakeRepository, station_data};
    use crate::domain::measurement::SNOW_DEPTH;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
    }

    #[tokio::test]
    async fn test_station_data_passes_request_through() {
        let repo = Arc::new(FakeRepository::with_data(station_data(&[(
            "SNWD",
            &[("2024-01-01 01:00", 45.0)],
        )])));
        let service = MeasurementService::new(repo.clone());

        let data = service
            .station_data(
                "713:CO:SNTL",
                "2024-01-01",
                "2024-01-01",
                Some(vec!["SNWD".to_string()]),
                Some(Duration::Hourly),
            )
            .await
            .unwrap();
        assert_eq!(data[0]["stationTriplet"], "713:CO:SNTL");

        let request = repo.last_data_request().unwrap();
        assert_eq!(request.elements, vec!["SNWD".to_string()]);
        assert_eq!(request.duration, Some(Duration::Hourly));
        assert_eq!(request.range.start_param(), "2024-01-01");
    }

    #[tokio::test]
    async fn test_station_data_defaults_elements() {
        let repo = Arc::new(FakeRepository::default());
        let service = MeasurementService::new(repo.clone());

        let data = service
            .station_data("713:CO:SNTL", "2024-01-01", "2024-01-31", Some(vec![]), None)
            .await
            .unwrap();
        assert!(data.is_empty());

        let request = repo.last_data_request().unwrap();
        assert_eq!(request.elements, vec!["SNWD", "WTEQ", "TOBS", "PREC"]);
        assert_eq!(request.duration, None);
    }

    #[tokio::test]
    async fn test_station_data_rejects_bad_dates() {
        let service = MeasurementService::new(Arc::new(FakeRepository::default()));

        let err = service
            .station_data("713:CO:SNTL", "2024-1-1", "2024-01-31", None, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[tokio::test]
    async fn test_recent_conditions_window_and_records() {
        let repo = Arc::new(FakeRepository::with_data(station_data(&[
            ("SNWD", &[("2024-02-14", 40.0), ("2024-02-15", 42.0)]),
            ("WTEQ", &[("2024-02-15", 11.3)]),
        ])));
        let service = MeasurementService::new(repo.clone());

        let conditions = service.recent_conditions("713:CO:SNTL", 7, today()).await.unwrap();
        let RecentConditions::Available(records) = conditions else {
            panic!("expected records");
        };
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get(SNOW_DEPTH), Some(42.0));

        let request = repo.last_data_request().unwrap();
        assert_eq!(request.range.start_param(), "2024-02-08");
        assert_eq!(request.range.end_param(), "2024-02-15");
    }

    #[tokio::test]
    async fn test_recent_conditions_empty_response_is_no_data() {
        let service = MeasurementService::new(Arc::new(FakeRepository::default()));

        let conditions = service.recent_conditions("713:CO:SNTL", 30, today()).await.unwrap();
        assert_eq!(conditions, RecentConditions::NoData);
    }

    #[tokio::test]
    async fn test_recent_conditions_other_station_only() {
        let repo = Arc::new(FakeRepository::with_data(vec![json!({
            "stationTriplet": "380:CO:SNTL",
            "data": [{
                "stationElement": {"elementCode": "SNWD"},
                "values": [{"date": "2024-02-15", "value": 3}]
            }]
        })]));
        let service = MeasurementService::new(repo);

        let conditions = service.recent_conditions("713:CO:SNTL", 30, today()).await.unwrap();
        assert_eq!(conditions, RecentConditions::NoMeasurements);
    }

    #[tokio::test]
    async fn test_recent_conditions_zero_days_rejected() {
        let repo = Arc::new(FakeRepository::default());
        let service = MeasurementService::new(repo.clone());

        let err = service.recent_conditions("713:CO:SNTL", 0, today()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
        assert!(repo.last_data_request().is_none());
    }
}

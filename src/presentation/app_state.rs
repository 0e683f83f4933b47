// Application state for HTTP handlers
use crate::application::measurement_service::MeasurementService;
use crate::application::snow_data_repository::SnowDataRepository;
use crate::application::station_service::StationService;
use crate::application::trend_service::TrendService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub station_service: StationService,
    pub measurement_service: MeasurementService,
    pub trend_service: TrendService,
}

impl AppState {
    pub fn new(repository: Arc<dyn SnowDataRepository>) -> Self {
        Self {
            station_service: StationService::new(repository.clone()),
            measurement_service: MeasurementService::new(repository.clone()),
            trend_service: TrendService::new(repository),
        }
    }
}

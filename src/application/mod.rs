// Application layer - Use cases and the data source seam
pub mod error;
pub mod measurement_service;
pub mod snow_data_repository;
pub mod station_service;
pub mod trend_service;

#[cfg(test)]
pub mod fake_repository;

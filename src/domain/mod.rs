// Domain layer - Value types and pure computations
pub mod date_range;
pub mod measurement;
pub mod station;
pub mod trend;

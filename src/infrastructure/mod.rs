// Infrastructure layer - External dependencies and adapters
pub mod awdb_repository;
pub mod config;

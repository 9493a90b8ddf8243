// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod fixture_reading_source;
pub mod http_reading_source;
pub mod http_response;

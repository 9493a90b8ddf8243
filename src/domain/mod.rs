// Domain layer - Readings, field profiles and the pure pipeline stages
pub mod classification;
pub mod cleaning;
pub mod date_parser;
pub mod field_profile;
pub mod reading;
pub mod report;
pub mod statistics;

// Application layer - Use cases and the reading source seam
pub mod pipeline_error;
pub mod reading_request;
pub mod reading_service;
pub mod reading_source;

// Readings service - Use case for cleaning, classifying and summarising a batch
use crate::application::pipeline_error::PipelineError;
use crate::application::reading_request::ReadingRequestParams;
use crate::application::reading_source::{RawReadingSource, ReadingQuery};
use crate::domain::classification::classify_readings;
use crate::domain::cleaning::clean_readings;
use crate::domain::field_profile::FieldProfileRegistry;
use crate::domain::report::ReadingsReport;
use crate::domain::statistics::StatisticsSummary;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReadingService {
    source: Arc<dyn RawReadingSource>,
    profiles: Arc<FieldProfileRegistry>,
}

impl ReadingService {
    pub fn new(source: Arc<dyn RawReadingSource>, profiles: FieldProfileRegistry) -> Self {
        Self {
            source,
            profiles: Arc::new(profiles),
        }
    }

    /// Validate boundary parameters, then run the pipeline.
    pub async fn process(&self, params: ReadingRequestParams) -> Result<ReadingsReport, PipelineError> {
        let query = params.into_query()?;
        self.process_query(&query).await
    }

    pub async fn process_query(&self, query: &ReadingQuery) -> Result<ReadingsReport, PipelineError> {
        let mut raw = self.source.fetch(query).await.map_err(|e| {
            tracing::error!(
                "Reading source failed for field {} in project {}: {:#}",
                query.field_name,
                query.project_id,
                e
            );
            PipelineError::InternalProcessingFailure
        })?;

        if raw.is_empty() {
            tracing::info!(
                "No readings for field {} in project {}",
                query.field_name,
                query.project_id
            );
            return Err(PipelineError::NoDataAvailable);
        }
        // No backfill: a short batch after cleaning stays short.
        raw.truncate(query.limit);

        let profile = self.profiles.resolve(&query.field_name);
        let batch = clean_readings(&raw, &profile).map_err(|e| {
            tracing::error!("Cleaning failed for field {}: {}", profile.name, e);
            PipelineError::InternalProcessingFailure
        })?;

        tracing::debug!(
            "Field {}: fetched {}, accepted {}, outliers {}, dropped {}",
            profile.name,
            raw.len(),
            batch.accepted.len(),
            batch.outliers.len(),
            batch.dropped
        );

        let values: Vec<f64> = batch.accepted.iter().map(|r| r.value).collect();
        let summary = StatisticsSummary::compute(&values).map_err(|e| {
            tracing::error!("Statistics failed for field {}: {}", profile.name, e);
            PipelineError::InternalProcessingFailure
        })?;

        let classified = classify_readings(&batch.accepted, &profile);
        Ok(ReadingsReport::assemble(
            &profile,
            classified,
            &batch.outliers,
            summary,
        ))
    }
}

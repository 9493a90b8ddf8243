// Reading source backed by a JSON fixture file, for development and demos
use crate::application::reading_source::{RawReadingSource, ReadingQuery};
use crate::domain::reading::{RawReading, RawValue, parse_timestamp};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

/// One row as stored in the fixture file.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredReading {
    pub id: i64,
    pub field: String,
    pub project_id: i64,
    #[serde(default)]
    pub node_id: Option<i64>,
    #[serde(default)]
    pub value: Option<RawValue>,
    pub timestamp: String,
}

#[derive(Debug, Clone)]
pub struct FixtureReadingSource {
    rows: Vec<StoredReading>,
}

impl FixtureReadingSource {
    pub fn new(rows: Vec<StoredReading>) -> Self {
        Self { rows }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture file {}", path.display()))?;
        let rows: Vec<StoredReading> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse fixture file {}", path.display()))?;

        tracing::info!("Loaded {} fixture readings from {}", rows.len(), path.display());
        Ok(Self::new(rows))
    }

    fn matches(&self, row: &StoredReading, query: &ReadingQuery) -> bool {
        row.field.eq_ignore_ascii_case(query.field_name.trim())
            && row.project_id == query.project_id
            && query.node_id.is_none_or(|node| row.node_id == Some(node))
    }
}

#[async_trait]
impl RawReadingSource for FixtureReadingSource {
    async fn fetch(&self, query: &ReadingQuery) -> Result<Vec<RawReading>> {
        let mut readings = Vec::new();

        for row in self.rows.iter().filter(|row| self.matches(row, query)) {
            let timestamp = parse_timestamp(&row.timestamp)
                .with_context(|| format!("Fixture reading {} has invalid timestamp {}", row.id, row.timestamp))?;
            if query.matches_timestamp(timestamp) {
                readings.push(RawReading::new(row.id, row.value.clone(), timestamp));
            }
        }

        readings.sort_by_key(|r| r.id);
        readings.truncate(query.limit);
        Ok(readings)
    }
}

// Source trait for raw reading data access
use crate::domain::reading::RawReading;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

/// Validated filters for one fetch. Each range bound is independently
/// optional.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingQuery {
    pub field_name: String,
    pub project_id: i64,
    pub node_id: Option<i64>,
    pub limit: usize,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub time_from: Option<NaiveTime>,
    pub time_to: Option<NaiveTime>,
}

impl ReadingQuery {
    pub fn new(field_name: &str, project_id: i64, limit: usize) -> Self {
        Self {
            field_name: field_name.to_string(),
            project_id,
            node_id: None,
            limit,
            date_from: None,
            date_to: None,
            time_from: None,
            time_to: None,
        }
    }

    /// Whether a timestamp falls inside the date and time-of-day bounds.
    pub fn matches_timestamp(&self, timestamp: chrono::NaiveDateTime) -> bool {
        let date = timestamp.date();
        let time = timestamp.time();
        self.date_from.is_none_or(|from| date >= from)
            && self.date_to.is_none_or(|to| date <= to)
            && self.time_from.is_none_or(|from| time >= from)
            && self.time_to.is_none_or(|to| time <= to)
    }
}

#[async_trait]
pub trait RawReadingSource: Send + Sync {
    /// Readings for the query ordered by ascending id, at most `query.limit`
    /// of them. No matching rows is an empty vector, not an error.
    async fn fetch(&self, query: &ReadingQuery) -> anyhow::Result<Vec<RawReading>>;
}

// Reading source backed by the upstream readings gateway over HTTP
use crate::application::reading_source::{RawReadingSource, ReadingQuery};
use crate::domain::reading::RawReading;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct HttpReadingSource {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ReadingsResponse {
    #[serde(default)]
    rows: Vec<RawReading>,
    #[serde(default)]
    error: Option<String>,
}

impl HttpReadingSource {
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client: reqwest::Client::new(),
        }
    }

    fn build_query_url(&self, query: &ReadingQuery) -> String {
        let mut params = vec![
            ("field", query.field_name.clone()),
            ("project", query.project_id.to_string()),
            ("limit", query.limit.to_string()),
        ];
        if let Some(node) = query.node_id {
            params.push(("node", node.to_string()));
        }
        if let Some(date) = query.date_from {
            params.push(("date_from", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(date) = query.date_to {
            params.push(("date_to", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(time) = query.time_from {
            params.push(("time_from", time.format("%H:%M:%S").to_string()));
        }
        if let Some(time) = query.time_to {
            params.push(("time_to", time.format("%H:%M:%S").to_string()));
        }

        let query_string = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}/readings?{}", self.base_url, query_string)
    }
}

#[async_trait]
impl RawReadingSource for HttpReadingSource {
    async fn fetch(&self, query: &ReadingQuery) -> Result<Vec<RawReading>> {
        let url = self.build_query_url(query);
        tracing::debug!("Fetching readings from {}", url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Token {}", self.token))
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to readings gateway")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Readings gateway failed with status {}: {}", status, body);
        }

        let data = response
            .json::<ReadingsResponse>()
            .await
            .context("Failed to parse readings gateway response")?;

        if let Some(error) = data.error {
            anyhow::bail!("Readings gateway error: {}", error);
        }

        let mut rows = data.rows;
        rows.sort_by_key(|r| r.id);
        rows.truncate(query.limit);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_build_query_url_minimal() {
        let source = HttpReadingSource::new("http://gateway:8000/".to_string(), "t".to_string());
        let query = ReadingQuery::new("temperature", 4, 25);

        assert_eq!(
            source.build_query_url(&query),
            "http://gateway:8000/readings?field=temperature&project=4&limit=25"
        );
    }

    #[test]
    fn test_build_query_url_encodes_filters() {
        let source = HttpReadingSource::new("http://gateway:8000".to_string(), "t".to_string());
        let mut query = ReadingQuery::new("soil moisture", 4, 25);
        query.node_id = Some(9);
        query.date_from = NaiveDate::from_ymd_opt(2024, 3, 1);
        query.time_to = NaiveTime::from_hms_opt(18, 30, 0);

        assert_eq!(
            source.build_query_url(&query),
            "http://gateway:8000/readings?field=soil%20moisture&project=4&limit=25&node=9&date_from=2024-03-01&time_to=18%3A30%3A00"
        );
    }

    #[test]
    fn test_parse_gateway_body() {
        let body: ReadingsResponse = serde_json::from_str(
            r#"{"rows": [{"id": 2, "value": "19.5", "timestamp": "2024-03-05 10:00:00"}]}"#,
        )
        .unwrap();
        assert_eq!(body.rows.len(), 1);
        assert!(body.error.is_none());
    }
}

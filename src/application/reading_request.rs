// Boundary parameters for a readings request and their validation
use crate::application::pipeline_error::PipelineError;
use crate::application::reading_source::ReadingQuery;
use crate::domain::date_parser::{parse_date, parse_time};
use serde::Deserialize;

/// Request body as sent by dashboard clients. The Spanish names used by
/// the chart forms are accepted as aliases.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadingRequestParams {
    #[serde(alias = "nombre_campo", alias = "campo")]
    pub field_name: Option<String>,
    #[serde(alias = "proyecto_id")]
    pub project_id: Option<i64>,
    #[serde(alias = "nodo_id")]
    pub node_id: Option<i64>,
    #[serde(alias = "cantidad_valores")]
    pub limit: Option<u32>,
    #[serde(alias = "fecha_inicio")]
    pub date_start: Option<String>,
    #[serde(alias = "fecha_fin")]
    pub date_end: Option<String>,
    #[serde(alias = "hora_inicio")]
    pub time_start: Option<String>,
    #[serde(alias = "hora_fin")]
    pub time_end: Option<String>,
}

impl ReadingRequestParams {
    pub fn into_query(self) -> Result<ReadingQuery, PipelineError> {
        let field_name = self
            .field_name
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .ok_or(PipelineError::MissingRequiredField("field_name"))?;
        let project_id = self
            .project_id
            .ok_or(PipelineError::MissingRequiredField("project_id"))?;
        let limit = self
            .limit
            .ok_or(PipelineError::MissingRequiredField("limit"))?;

        let mut query = ReadingQuery::new(&field_name, project_id, limit as usize);
        query.node_id = self.node_id;
        query.date_from = parse_date(self.date_start.as_deref())?;
        query.date_to = parse_date(self.date_end.as_deref())?;
        query.time_from = parse_time(self.time_start.as_deref())?;
        query.time_to = parse_time(self.time_end.as_deref())?;
        Ok(query)
    }
}

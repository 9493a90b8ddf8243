// Assembled pipeline result handed to the rendering layer
use super::field_profile::FieldProfile;
use super::reading::{ClassifiedReading, OutlierReading};
use super::statistics::StatisticsSummary;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One output row. The value is published under the profile's display key
/// (`degrees`, `percentage`, `value`, ...), so rows serialize by hand.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub id: i64,
    pub value: f64,
    pub band: Option<String>,
    pub date: String,
    pub time: String,
    display_key: String,
}

impl ReportRow {
    pub fn classified(reading: ClassifiedReading, display_key: &str) -> Self {
        Self {
            id: reading.id,
            value: reading.value,
            band: reading.band,
            date: reading.date,
            time: reading.time,
            display_key: display_key.to_string(),
        }
    }

    pub fn outlier(reading: &OutlierReading, display_key: &str) -> Self {
        Self {
            id: reading.id,
            value: reading.value,
            band: None,
            date: reading.date(),
            time: reading.time(),
            display_key: display_key.to_string(),
        }
    }
}

impl Serialize for ReportRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.band.is_some() { 5 } else { 4 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry(&self.display_key, &self.value)?;
        if let Some(band) = &self.band {
            map.serialize_entry("band", band)?;
        }
        map.serialize_entry("date", &self.date)?;
        map.serialize_entry("time", &self.time)?;
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingsReport {
    pub good: Vec<ReportRow>,
    pub outliers: Vec<ReportRow>,
    pub outlier_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<StatisticsSummary>,
}

impl ReadingsReport {
    pub fn assemble(
        profile: &FieldProfile,
        classified: Vec<ClassifiedReading>,
        outliers: &[OutlierReading],
        summary: Option<StatisticsSummary>,
    ) -> Self {
        let key = profile.display_key.as_str();
        Self {
            good: classified
                .into_iter()
                .map(|reading| ReportRow::classified(reading, key))
                .collect(),
            outliers: outliers
                .iter()
                .map(|reading| ReportRow::outlier(reading, key))
                .collect(),
            outlier_count: outliers.len(),
            summary,
        }
    }
}

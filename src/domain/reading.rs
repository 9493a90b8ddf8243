// Sensor reading domain models
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Value column as stored: the relational store keeps readings as text,
/// but some gateways already hand back numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Coerce to a finite float. Blank, non-numeric and non-finite input
    /// yields `None`.
    pub fn coerce(&self) -> Option<f64> {
        let value = match self {
            RawValue::Number(n) => *n,
            RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawReading {
    pub id: i64,
    #[serde(default)]
    pub value: Option<RawValue>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: NaiveDateTime,
}

impl RawReading {
    pub fn new(id: i64, value: Option<RawValue>, timestamp: NaiveDateTime) -> Self {
        Self {
            id,
            value,
            timestamp,
        }
    }

    #[cfg(test)]
    pub fn text(id: i64, value: &str, timestamp: NaiveDateTime) -> Self {
        Self::new(id, Some(RawValue::Text(value.to_string())), timestamp)
    }
}

/// A reading whose value was coerced, converted and rounded. Whether it
/// landed in the accepted set or among the outliers is decided by the
/// cleaner, so both share this shape.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanReading {
    pub id: i64,
    pub value: f64,
    pub timestamp: NaiveDateTime,
}

pub type OutlierReading = CleanReading;

impl CleanReading {
    pub fn new(id: i64, value: f64, timestamp: NaiveDateTime) -> Self {
        Self {
            id,
            value,
            timestamp,
        }
    }

    pub fn date(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }

    pub fn time(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedReading {
    pub id: i64,
    pub value: f64,
    pub band: Option<String>,
    pub date: String,
    pub time: String,
}

impl ClassifiedReading {
    pub fn new(reading: &CleanReading, band: Option<String>) -> Self {
        Self {
            id: reading.id,
            value: reading.value,
            band,
            date: reading.date(),
            time: reading.time(),
        }
    }
}

pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}

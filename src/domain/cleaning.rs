// Reading cleaner - coercion, unit conversion, rounding and range partition
use super::field_profile::FieldProfile;
use super::reading::{CleanReading, OutlierReading, RawReading};
use thiserror::Error;

/// Stored precision, in decimal places, of a converted reading.
pub const STORED_DECIMALS: i32 = 1;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CleaningError {
    #[error("reading {id}: converting {raw} by factor {factor} is not finite")]
    NonFiniteConversion { id: i64, raw: f64, factor: f64 },
}

/// Result of one cleaning pass. Both lists keep the input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedBatch {
    pub accepted: Vec<CleanReading>,
    pub outliers: Vec<OutlierReading>,
    /// Readings whose value could not be coerced to a number.
    pub dropped: usize,
}

/// Round half away from zero to `decimals` places.
///
/// The scaled value is rounded with `f64::round`, so ties are decided on the
/// scaled binary value: `0.125` becomes `0.13`, while `1.005` (which scales
/// to `100.4999...`) becomes `1.0`.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    let scaled = value * scale;
    // Beyond 2^53 every f64 is already integral at this scale.
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}

/// Coerce, convert, round and partition a batch of raw readings.
///
/// Values that cannot be coerced are dropped silently; values outside the
/// profile's valid range are kept as outliers. The range check runs after
/// conversion and rounding.
pub fn clean_readings(
    readings: &[RawReading],
    profile: &FieldProfile,
) -> Result<CleanedBatch, CleaningError> {
    let mut batch = CleanedBatch::default();

    for reading in readings {
        let Some(raw) = reading.value.as_ref().and_then(|v| v.coerce()) else {
            batch.dropped += 1;
            continue;
        };

        let converted = raw * profile.conversion_factor;
        if !converted.is_finite() {
            return Err(CleaningError::NonFiniteConversion {
                id: reading.id,
                raw,
                factor: profile.conversion_factor,
            });
        }

        let cleaned = CleanReading::new(
            reading.id,
            round_to(converted, STORED_DECIMALS),
            reading.timestamp,
        );
        if profile.accepts(cleaned.value) {
            batch.accepted.push(cleaned);
        } else {
            batch.outliers.push(cleaned);
        }
    }

    Ok(batch)
}

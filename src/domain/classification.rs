// Reading classifier - maps accepted values onto a profile's bands
use super::field_profile::FieldProfile;
use super::reading::{ClassifiedReading, CleanReading};

/// Label of the first band whose upper bound is >= `value`.
///
/// Bands are scanned in ascending order, so a value sitting exactly on a
/// bound belongs to the lower band. Profiles without bands yield `None`.
pub fn classify_value(value: f64, profile: &FieldProfile) -> Option<&str> {
    profile
        .bands
        .iter()
        .find(|band| band.admits(value))
        .map(|band| band.label.as_str())
}

pub fn classify_readings(readings: &[CleanReading], profile: &FieldProfile) -> Vec<ClassifiedReading> {
    readings
        .iter()
        .map(|reading| {
            let band = classify_value(reading.value, profile).map(str::to_string);
            ClassifiedReading::new(reading, band)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reading::parse_timestamp;

    #[test]
    fn test_temperature_bands() {
        let profile = FieldProfile::temperature();
        assert_eq!(classify_value(0.0, &profile), Some("cold"));
        assert_eq!(classify_value(10.0, &profile), Some("cold"));
        assert_eq!(classify_value(10.1, &profile), Some("temperate"));
        assert_eq!(classify_value(19.0, &profile), Some("temperate"));
        assert_eq!(classify_value(19.1, &profile), Some("hot"));
        assert_eq!(classify_value(50.0, &profile), Some("hot"));
    }

    #[test]
    fn test_humidity_bands() {
        let profile = FieldProfile::humidity();
        assert_eq!(classify_value(25.0, &profile), Some("very dry"));
        assert_eq!(classify_value(25.1, &profile), Some("dry"));
        assert_eq!(classify_value(50.0, &profile), Some("dry"));
        assert_eq!(classify_value(65.3, &profile), Some("comfortable"));
        assert_eq!(classify_value(95.0, &profile), Some("humid"));
        assert_eq!(classify_value(100.0, &profile), Some("saturated"));
    }

    #[test]
    fn test_identity_profile_is_unclassified() {
        assert_eq!(classify_value(42.0, &FieldProfile::identity("pressure")), None);
    }

    #[test]
    fn test_band_assignment_is_monotonic() {
        for profile in [FieldProfile::temperature(), FieldProfile::humidity()] {
            let position = |value: f64| {
                let label = classify_value(value, &profile).unwrap();
                profile.bands.iter().position(|b| b.label == label).unwrap()
            };

            let mut previous = 0;
            for step in 0..=1000 {
                let value = step as f64 / 10.0;
                if !profile.accepts(value) {
                    continue;
                }
                let current = position(value);
                assert!(current >= previous, "{} moved down at {}", profile.name, value);
                previous = current;
            }
        }
    }

    #[test]
    fn test_classify_readings_keeps_order_and_formats() {
        let timestamp = parse_timestamp("2024-03-05T06:30:00").unwrap();
        let readings = vec![
            CleanReading::new(4, 30.0, timestamp),
            CleanReading::new(1, 5.5, timestamp),
        ];
        let classified = classify_readings(&readings, &FieldProfile::temperature());

        assert_eq!(classified[0].id, 4);
        assert_eq!(classified[0].band.as_deref(), Some("hot"));
        assert_eq!(classified[1].band.as_deref(), Some("cold"));
        assert_eq!(classified[1].date, "2024-03-05");
        assert_eq!(classified[1].time, "06:30:00");
    }
}

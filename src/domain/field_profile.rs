// Field profile domain model - per-sensor conversion, validity and banding
use serde::Deserialize;
use std::collections::HashMap;

/// Inclusive validity bounds applied after unit conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidRange {
    pub min: f64,
    pub max: f64,
}

impl ValidRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// One classification band. `upper_bound: None` is the open top band.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Band {
    #[serde(default)]
    pub upper_bound: Option<f64>,
    pub label: String,
}

impl Band {
    pub fn new(upper_bound: Option<f64>, label: &str) -> Self {
        Self {
            upper_bound,
            label: label.to_string(),
        }
    }

    pub fn admits(&self, value: f64) -> bool {
        self.upper_bound.is_none_or(|upper| value <= upper)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldProfile {
    pub name: String,
    pub conversion_factor: f64,
    pub valid_range: Option<ValidRange>,
    /// Ascending by upper bound; empty means the field is not classified.
    pub bands: Vec<Band>,
    /// Key under which the value is published in output rows.
    pub display_key: String,
}

impl FieldProfile {
    pub fn temperature() -> Self {
        Self {
            name: "temperature".to_string(),
            conversion_factor: 1.0,
            valid_range: Some(ValidRange::new(0.0, 50.0)),
            bands: vec![
                Band::new(Some(10.0), "cold"),
                Band::new(Some(19.0), "temperate"),
                Band::new(None, "hot"),
            ],
            display_key: "degrees".to_string(),
        }
    }

    pub fn humidity() -> Self {
        Self {
            name: "humidity".to_string(),
            conversion_factor: 0.10,
            valid_range: Some(ValidRange::new(0.0, 100.0)),
            bands: vec![
                Band::new(Some(25.0), "very dry"),
                Band::new(Some(50.0), "dry"),
                Band::new(Some(80.0), "comfortable"),
                Band::new(Some(95.0), "humid"),
                Band::new(None, "saturated"),
            ],
            display_key: "percentage".to_string(),
        }
    }

    /// Profile for unknown fields: no conversion, no range, no bands.
    pub fn identity(name: &str) -> Self {
        Self {
            name: name.to_string(),
            conversion_factor: 1.0,
            valid_range: None,
            bands: Vec::new(),
            display_key: "value".to_string(),
        }
    }

    pub fn accepts(&self, value: f64) -> bool {
        self.valid_range.is_none_or(|range| range.contains(value))
    }

    /// Sort bands ascending by upper bound with the open band last.
    pub fn with_sorted_bands(mut self) -> Self {
        self.bands.sort_by(|a, b| match (a.upper_bound, b.upper_bound) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        self
    }
}

/// Lookup table of profiles keyed by lower-cased field name or alias.
#[derive(Debug, Clone)]
pub struct FieldProfileRegistry {
    profiles: HashMap<String, FieldProfile>,
}

impl FieldProfileRegistry {
    pub fn empty() -> Self {
        Self {
            profiles: HashMap::new(),
        }
    }

    /// Built-in temperature and humidity profiles, reachable by their
    /// English names and by the Spanish names used by the dashboard forms.
    pub fn with_builtin_profiles() -> Self {
        let mut registry = Self::empty();
        registry.register(FieldProfile::temperature(), &["temperatura"]);
        registry.register(FieldProfile::humidity(), &["humedad"]);
        registry
    }

    pub fn register(&mut self, profile: FieldProfile, aliases: &[&str]) {
        let profile = profile.with_sorted_bands();
        for alias in aliases {
            self.profiles.insert(alias.to_lowercase(), profile.clone());
        }
        self.profiles.insert(profile.name.to_lowercase(), profile);
    }

    pub fn resolve(&self, field_name: &str) -> FieldProfile {
        let key = field_name.trim().to_lowercase();
        self.profiles
            .get(&key)
            .cloned()
            .unwrap_or_else(|| FieldProfile::identity(&key))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }
}

impl Default for FieldProfileRegistry {
    fn default() -> Self {
        Self::with_builtin_profiles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_case_insensitive() {
        let registry = FieldProfileRegistry::with_builtin_profiles();
        assert_eq!(registry.resolve("Temperature").display_key, "degrees");
        assert_eq!(registry.resolve(" HUMIDITY ").display_key, "percentage");
    }

    #[test]
    fn test_resolve_spanish_aliases() {
        let registry = FieldProfileRegistry::with_builtin_profiles();
        assert_eq!(registry.resolve("temperatura"), FieldProfile::temperature());
        assert_eq!(registry.resolve("Humedad"), FieldProfile::humidity());
    }

    #[test]
    fn test_unknown_field_uses_identity_profile() {
        let registry = FieldProfileRegistry::with_builtin_profiles();
        let profile = registry.resolve("Pressure");
        assert_eq!(profile.conversion_factor, 1.0);
        assert!(profile.valid_range.is_none());
        assert!(profile.bands.is_empty());
        assert_eq!(profile.display_key, "value");
        assert!(profile.accepts(-1.0e9));
    }

    #[test]
    fn test_valid_range_is_inclusive() {
        let temperature = FieldProfile::temperature();
        assert!(temperature.accepts(0.0));
        assert!(temperature.accepts(50.0));
        assert!(!temperature.accepts(-0.1));
        assert!(!temperature.accepts(50.1));
    }

    #[test]
    fn test_register_sorts_bands() {
        let mut registry = FieldProfileRegistry::empty();
        let profile = FieldProfile {
            name: "co2".to_string(),
            conversion_factor: 1.0,
            valid_range: None,
            bands: vec![
                Band::new(None, "poor"),
                Band::new(Some(1000.0), "fair"),
                Band::new(Some(600.0), "good"),
            ],
            display_key: "ppm".to_string(),
        };
        registry.register(profile, &[]);

        let labels: Vec<String> = registry
            .resolve("co2")
            .bands
            .into_iter()
            .map(|b| b.label)
            .collect();
        assert_eq!(labels, vec!["good", "fair", "poor"]);
    }
}

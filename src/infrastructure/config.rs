use crate::domain::field_profile::{Band, FieldProfile, FieldProfileRegistry, ValidRange};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub source: SourceSettings,
    #[serde(default)]
    pub profiles: Vec<ProfileConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Http,
    Fixture,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    pub kind: SourceKind,
    pub base_url: Option<String>,
    #[serde(default)]
    pub token: String,
    pub fixture_path: Option<PathBuf>,
}

/// Field profile declared in configuration. Replaces a built-in profile of
/// the same name.
#[derive(Debug, Deserialize, Clone)]
pub struct ProfileConfig {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default = "default_conversion_factor")]
    pub conversion_factor: f64,
    pub valid_min: Option<f64>,
    pub valid_max: Option<f64>,
    #[serde(default = "default_display_key")]
    pub display_key: String,
    #[serde(default)]
    pub bands: Vec<Band>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_conversion_factor() -> f64 {
    1.0
}

fn default_display_key() -> String {
    "value".to_string()
}

impl ProfileConfig {
    /// Build the profile, rejecting definitions that would leave accepted
    /// readings without a band or accept nothing at all.
    pub fn to_profile(&self) -> anyhow::Result<FieldProfile> {
        let name = self.name.to_lowercase();
        anyhow::ensure!(
            self.conversion_factor.is_finite(),
            "profile {}: conversion_factor must be finite",
            name
        );

        let valid_range = match (self.valid_min, self.valid_max) {
            (None, None) => None,
            (min, max) => Some(ValidRange::new(
                min.unwrap_or(f64::NEG_INFINITY),
                max.unwrap_or(f64::INFINITY),
            )),
        };
        if let Some(range) = valid_range {
            anyhow::ensure!(
                !range.min.is_nan() && !range.max.is_nan(),
                "profile {}: valid range bounds must be numbers",
                name
            );
            anyhow::ensure!(
                range.min <= range.max,
                "profile {}: valid_min {} is above valid_max {}",
                name,
                range.min,
                range.max
            );
        }

        anyhow::ensure!(
            self.bands
                .iter()
                .all(|band| band.upper_bound.is_none_or(|upper| !upper.is_nan())),
            "profile {}: band upper bounds must be numbers",
            name
        );

        let profile = FieldProfile {
            name,
            conversion_factor: self.conversion_factor,
            valid_range,
            bands: self.bands.clone(),
            display_key: self.display_key.clone(),
        }
        .with_sorted_bands();

        if let Some(top) = profile.bands.last() {
            let valid_max = valid_range.map_or(f64::INFINITY, |range| range.max);
            anyhow::ensure!(
                top.upper_bound.is_none_or(|upper| upper >= valid_max),
                "profile {}: bands end at {:?} but readings up to {} are accepted; add an open top band",
                profile.name,
                top.upper_bound,
                valid_max
            );
        }

        Ok(profile)
    }
}

impl ServiceConfig {
    /// Built-in profiles overlaid with the configured ones.
    pub fn profile_registry(&self) -> anyhow::Result<FieldProfileRegistry> {
        let mut registry = FieldProfileRegistry::with_builtin_profiles();
        for profile_config in &self.profiles {
            let aliases: Vec<&str> = profile_config.aliases.iter().map(String::as_str).collect();
            registry.register(profile_config.to_profile()?, &aliases);
        }
        Ok(registry)
    }
}

pub fn load_service_config() -> anyhow::Result<ServiceConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/service"))
        .add_source(config::Environment::with_prefix("READINGS").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

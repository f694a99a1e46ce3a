use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    forecast::Timeframe,
    model::{ForecastRequest, GeoLocation},
    provider::open_meteo::{DEFAULT_FORECAST_URL, DEFAULT_GEOCODING_URL},
    wmo::Language,
};

/// A saved location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Optional endpoint overrides for Open-Meteo (self-hosted instances, tests).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenMeteoConfig {
    pub forecast_url: Option<String>,
    pub geocoding_url: Option<String>,
}

impl OpenMeteoConfig {
    pub fn forecast_url(&self) -> &str {
        self.forecast_url.as_deref().unwrap_or(DEFAULT_FORECAST_URL)
    }

    pub fn geocoding_url(&self) -> &str {
        self.geocoding_url.as_deref().unwrap_or(DEFAULT_GEOCODING_URL)
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
///
/// ```toml
/// timeframe = "hourly"
/// language = "de"
///
/// [default_location]
/// name = "Berlin, Land Berlin"
/// latitude = 52.52
/// longitude = 13.41
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub timeframe: Timeframe,

    #[serde(default)]
    pub language: Language,

    pub default_location: Option<LocationConfig>,

    #[serde(default)]
    pub open_meteo: OpenMeteoConfig,
}

impl Config {
    /// The default location as a forecast request.
    pub fn default_request(&self) -> Result<ForecastRequest> {
        let loc = self.default_location.as_ref().ok_or_else(|| {
            anyhow!(
                "No default location configured.\n\
                 Hint: run `weatherwise configure`, or pass --city / --lat --lon."
            )
        })?;

        Ok(ForecastRequest::new(
            loc.latitude,
            loc.longitude,
            Some(loc.name.clone()),
        ))
    }

    pub fn set_default_location(&mut self, location: &GeoLocation) {
        self.default_location = Some(LocationConfig {
            name: location.label(),
            latitude: location.latitude,
            longitude: location.longitude,
        });
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "weatherwise", "weatherwise")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Path to the cached last snapshot.
    pub fn cache_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.cache_dir().join("last_snapshot.json"))
    }
}

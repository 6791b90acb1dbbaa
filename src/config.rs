//! Configuration for the Williamsburg guide application
//!
//! Loads configuration from an optional TOML file and environment variables,
//! validates it, and hands out one immutable value that the pipelines are
//! constructed with. Nothing here is mutated after startup.

use crate::GuideError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the guide application
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    /// Web server settings
    pub server: ServerConfig,
    /// Guide location (Williamsburg, VA by default)
    pub location: LocationConfig,
    /// Attraction listing scrape settings
    pub attractions: AttractionsConfig,
    /// Overpass restaurant query settings
    pub restaurants: RestaurantsConfig,
    /// Open-Meteo forecast settings
    pub weather: WeatherConfig,
}

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory with static assets (images, stylesheet)
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
}

/// Coordinates all geo-bounded queries are anchored to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    /// Display name for the location
    #[serde(default = "default_location_name")]
    pub name: String,
}

/// Attraction listing scrape settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AttractionsConfig {
    /// HTML listing page to scrape
    #[serde(default = "default_listing_url")]
    pub listing_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_attractions_timeout")]
    pub timeout_seconds: u64,
}

/// Overpass restaurant query settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RestaurantsConfig {
    /// Overpass query interpreter endpoint
    #[serde(default = "default_overpass_url")]
    pub api_url: String,
    /// Search radius in meters around the configured location
    #[serde(default = "default_radius_m")]
    pub radius_m: u32,
    /// Maximum number of normalized results per search
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Request timeout in seconds
    #[serde(default = "default_restaurants_timeout")]
    pub timeout_seconds: u64,
}

/// Open-Meteo forecast settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Base URL for the forecast API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Number of forecast days to request
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u64,
}

// Default value functions
fn default_port() -> u16 {
    8080
}

fn default_assets_dir() -> String {
    "assets".to_string()
}

fn default_latitude() -> f64 {
    37.2707
}

fn default_longitude() -> f64 {
    -76.7075
}

fn default_location_name() -> String {
    "Williamsburg, VA".to_string()
}

fn default_listing_url() -> String {
    "https://www.visitwilliamsburg.com/things-to-do/museums-and-attractions/".to_string()
}

fn default_attractions_timeout() -> u64 {
    5
}

fn default_overpass_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

fn default_radius_m() -> u32 {
    16_000
}

fn default_max_results() -> usize {
    9
}

fn default_restaurants_timeout() -> u64 {
    15
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_forecast_days() -> u8 {
    2
}

fn default_weather_timeout() -> u64 {
    15
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            location: LocationConfig::default(),
            attractions: AttractionsConfig::default(),
            restaurants: RestaurantsConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            assets_dir: default_assets_dir(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            name: default_location_name(),
        }
    }
}

impl Default for AttractionsConfig {
    fn default() -> Self {
        Self {
            listing_url: default_listing_url(),
            timeout_seconds: default_attractions_timeout(),
        }
    }
}

impl Default for RestaurantsConfig {
    fn default() -> Self {
        Self {
            api_url: default_overpass_url(),
            radius_m: default_radius_m(),
            max_results: default_max_results(),
            timeout_seconds: default_restaurants_timeout(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            forecast_days: default_forecast_days(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl GuideConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config/default.toml"));

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with GUIDE__ prefix
        builder = builder.add_source(
            Environment::with_prefix("GUIDE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        // Every section falls back to its defaults, so a partial file or a
        // handful of env vars is a complete configuration
        let config: GuideConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.location.latitude) {
            return Err(GuideError::config("Latitude must be between -90 and 90").into());
        }

        if !(-180.0..=180.0).contains(&self.location.longitude) {
            return Err(GuideError::config("Longitude must be between -180 and 180").into());
        }

        for (name, timeout) in [
            ("attractions", self.attractions.timeout_seconds),
            ("restaurants", self.restaurants.timeout_seconds),
            ("weather", self.weather.timeout_seconds),
        ] {
            if timeout == 0 || timeout > 60 {
                return Err(GuideError::config(format!(
                    "{name} timeout must be between 1 and 60 seconds"
                ))
                .into());
            }
        }

        if self.restaurants.radius_m == 0 || self.restaurants.radius_m > 100_000 {
            return Err(
                GuideError::config("Restaurant search radius must be between 1 and 100000 meters")
                    .into(),
            );
        }

        // Overpass is asked for at most 50 elements per query
        if self.restaurants.max_results == 0 || self.restaurants.max_results > 50 {
            return Err(
                GuideError::config("Restaurant result cap must be between 1 and 50").into(),
            );
        }

        if self.weather.forecast_days == 0 || self.weather.forecast_days > 16 {
            return Err(GuideError::config("Forecast days must be between 1 and 16").into());
        }

        for (name, url) in [
            ("attraction listing", self.attractions.listing_url.as_str()),
            ("Overpass", self.restaurants.api_url.as_str()),
            ("weather", self.weather.base_url.as_str()),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(GuideError::config(format!(
                    "{name} URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GuideConfig::default();
        assert_eq!(config.location.latitude, 37.2707);
        assert_eq!(config.location.longitude, -76.7075);
        assert_eq!(config.restaurants.radius_m, 16_000);
        assert_eq!(config.restaurants.max_results, 9);
        assert_eq!(config.attractions.timeout_seconds, 5);
        assert_eq!(config.weather.forecast_days, 2);
        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(GuideConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_coordinates() {
        let mut config = GuideConfig::default();
        config.location.latitude = 123.0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Latitude"));
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = GuideConfig::default();
        config.weather.timeout_seconds = 0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout"));
    }

    #[test]
    fn test_validation_rejects_oversized_result_cap() {
        let mut config = GuideConfig::default();
        config.restaurants.max_results = 51;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("result cap"));
    }

    #[test]
    fn test_validation_rejects_non_http_url() {
        let mut config = GuideConfig::default();
        config.restaurants.api_url = "ftp://overpass-api.de".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("URL"));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = GuideConfig::load_from_path(Some(PathBuf::from("does/not/exist.toml")))
            .expect("load should fall back to defaults");
        assert_eq!(config.restaurants.max_results, 9);
    }

    #[test]
    fn test_env_override_without_file() {
        // SAFETY: Test environment, setting test values only
        unsafe {
            std::env::set_var("GUIDE__SERVER__PORT", "9999");
        }

        let result = GuideConfig::load_from_path(Some(PathBuf::from("does/not/exist.toml")));

        // SAFETY: Test cleanup
        unsafe {
            std::env::remove_var("GUIDE__SERVER__PORT");
        }

        let config = result.expect("env-only load should succeed");
        assert_eq!(config.server.port, 9999);
        // untouched sections keep their defaults
        assert_eq!(config.restaurants.max_results, 9);
        assert_eq!(config.location.latitude, 37.2707);
    }

    #[test]
    fn test_partial_section_deserializes_with_defaults() {
        let partial: GuideConfig =
            serde_json::from_str(r#"{"restaurants": {"max_results": 5}}"#).unwrap();
        assert_eq!(partial.restaurants.max_results, 5);
        assert_eq!(partial.restaurants.radius_m, 16_000);
        assert_eq!(partial.server.port, 8080);
    }
}

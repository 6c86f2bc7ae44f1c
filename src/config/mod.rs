pub mod toml_config;

use crate::adapters::geolocation::IP_GEOLOCATION_ENDPOINT;
use crate::core::geolocator::{DEFAULT_LOCATION, LOCATE_ZOOM};
use crate::domain::model::Coordinate;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{EventMapError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use std::time::Duration;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

pub const DEFAULT_API_ENDPOINT: &str = "https://app.ticketmaster.com/discovery/v2/events.json";
pub const API_KEY_ENV: &str = "API_KEY";

#[derive(Debug, Clone, PartialEq)]
pub enum GeolocationMode {
    Unavailable,
    Fixed(Coordinate),
    Ip(String),
}

/// Resolved configuration: defaults, then the TOML file, then the command line.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_endpoint: String,
    pub api_key: String,
    pub search_radius: u32,
    pub page_size: u32,
    pub request_timeout: Duration,
    pub default_center: Coordinate,
    pub locate_zoom: f64,
    pub fit_padding: f64,
    pub map_width: f64,
    pub map_height: f64,
    pub geolocation: GeolocationMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            api_key: String::new(),
            search_radius: 50,
            page_size: 10,
            request_timeout: Duration::from_secs(30),
            default_center: DEFAULT_LOCATION,
            locate_zoom: LOCATE_ZOOM,
            fit_padding: 50.0,
            map_width: 1024.0,
            map_height: 768.0,
            geolocation: GeolocationMode::Ip(IP_GEOLOCATION_ENDPOINT.to_string()),
        }
    }
}

impl Settings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = endpoint.into();
        self
    }

    pub fn from_toml(file: &TomlConfig) -> Result<Self> {
        let mut settings = Self::default();
        settings.apply_toml(file)?;
        Ok(settings)
    }

    pub fn apply_toml(&mut self, file: &TomlConfig) -> Result<()> {
        let api = &file.api;
        if let Some(endpoint) = &api.endpoint {
            self.api_endpoint = endpoint.clone();
        }
        if let Some(key) = &api.api_key {
            self.api_key = key.clone();
        }
        if let Some(radius) = api.radius {
            self.search_radius = radius;
        }
        if let Some(size) = api.page_size {
            self.page_size = size;
        }
        if let Some(secs) = api.timeout_seconds {
            self.request_timeout = Duration::from_secs(secs);
        }

        let map = &file.map;
        if let Some([lat, lon]) = map.default_center {
            self.default_center = Coordinate::new(lat, lon);
        }
        if let Some(zoom) = map.locate_zoom {
            self.locate_zoom = zoom;
        }
        if let Some(padding) = map.fit_padding {
            self.fit_padding = padding;
        }
        if let Some(width) = map.width {
            self.map_width = width;
        }
        if let Some(height) = map.height {
            self.map_height = height;
        }

        let geo = &file.geolocation;
        if let (Some(lat), Some(lon)) = (geo.latitude, geo.longitude) {
            self.geolocation = GeolocationMode::Fixed(Coordinate::new(lat, lon));
        } else {
            match geo.provider.as_deref() {
                None => {}
                Some("none") => self.geolocation = GeolocationMode::Unavailable,
                Some("ip") => {
                    let endpoint = geo
                        .endpoint
                        .clone()
                        .unwrap_or_else(|| IP_GEOLOCATION_ENDPOINT.to_string());
                    self.geolocation = GeolocationMode::Ip(endpoint);
                }
                Some(other) => {
                    return Err(EventMapError::InvalidConfigValueError {
                        field: "geolocation.provider".to_string(),
                        value: other.to_string(),
                        reason: "Supported providers: ip, none".to_string(),
                    })
                }
            }
        }

        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn search_radius(&self) -> u32 {
        self.search_radius
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }

    fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;

        if self.api_key.is_empty() {
            return Err(EventMapError::MissingConfigError {
                field: API_KEY_ENV.to_string(),
            });
        }
        validate_non_empty_string("api_key", &self.api_key)?;

        validate_positive_number("search_radius", self.search_radius.into(), 1)?;
        validate_range("page_size", self.page_size, 1, 200)?;
        validate_positive_number("request_timeout", self.request_timeout.as_secs(), 1)?;

        validate_range("default_center.latitude", self.default_center.latitude, -90.0, 90.0)?;
        validate_range("default_center.longitude", self.default_center.longitude, -180.0, 180.0)?;
        validate_range("locate_zoom", self.locate_zoom, 0.0, 19.0)?;
        validate_range("fit_padding", self.fit_padding, 0.0, 1000.0)?;
        validate_range("map_width", self.map_width, 1.0, 16384.0)?;
        validate_range("map_height", self.map_height, 1.0, 16384.0)?;

        match &self.geolocation {
            GeolocationMode::Fixed(c) => {
                validate_range("latitude", c.latitude, -90.0, 90.0)?;
                validate_range("longitude", c.longitude, -180.0, 180.0)?;
            }
            GeolocationMode::Ip(endpoint) => validate_url("geolocation.endpoint", endpoint)?,
            GeolocationMode::Unavailable => {}
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "event-map")]
#[command(about = "Find events near you or in a city and place them on a map")]
pub struct CliConfig {
    /// Ticketmaster Discovery API key
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long)]
    pub api_endpoint: Option<String>,

    /// Search this city instead of locating you
    #[arg(long)]
    pub city: Option<String>,

    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// IP geolocation service to use for locating you
    #[arg(long, conflicts_with = "no_geolocation")]
    pub geolocation_endpoint: Option<String>,

    /// Behave as if location is unavailable
    #[arg(long)]
    pub no_geolocation: bool,

    /// Read city searches from stdin after the first load
    #[arg(short, long)]
    pub interactive: bool,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Builds [`Settings`] from defaults, the `--config` file and these flags.
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_toml(&TomlConfig::from_file(path)?)?,
            None => Settings::default(),
        };
        self.apply_to(&mut settings);
        Ok(settings)
    }

    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(key) = &self.api_key {
            settings.api_key = key.clone();
        }
        if let Some(endpoint) = &self.api_endpoint {
            settings.api_endpoint = endpoint.clone();
        }
        if let Some(secs) = self.timeout {
            settings.request_timeout = Duration::from_secs(secs);
        }

        if self.no_geolocation {
            settings.geolocation = GeolocationMode::Unavailable;
        } else if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            settings.geolocation = GeolocationMode::Fixed(Coordinate::new(lat, lon));
        } else if let Some(endpoint) = &self.geolocation_endpoint {
            settings.geolocation = GeolocationMode::Ip(endpoint.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::toml_config::{ApiSection, GeolocationSection};

    #[test]
    fn test_defaults_match_events_api_contract() {
        let settings = Settings::new("key");
        assert_eq!(settings.search_radius, 50);
        assert_eq!(settings.page_size, 10);
        assert_eq!(settings.default_center, Coordinate::new(51.505, -0.09));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_missing_api_key_is_reported() {
        let err = Settings::default().validate().unwrap_err();
        assert!(matches!(err, EventMapError::MissingConfigError { ref field } if field == "API_KEY"));
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let file = TomlConfig {
            api: ApiSection {
                api_key: Some("k".to_string()),
                page_size: Some(20),
                ..Default::default()
            },
            geolocation: GeolocationSection {
                provider: Some("none".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let settings = Settings::from_toml(&file).unwrap();
        assert_eq!(settings.page_size, 20);
        assert_eq!(settings.search_radius, 50);
        assert_eq!(settings.geolocation, GeolocationMode::Unavailable);
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let file = TomlConfig {
            geolocation: GeolocationSection {
                provider: Some("gps".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(Settings::from_toml(&file).is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_flags_override_file() {
        let cli = CliConfig::parse_from([
            "event-map",
            "--api-key",
            "cli-key",
            "--lat",
            "-33.87",
            "--lon",
            "151.21",
        ]);

        let mut settings = Settings::new("file-key");
        cli.apply_to(&mut settings);

        assert_eq!(settings.api_key, "cli-key");
        assert_eq!(
            settings.geolocation,
            GeolocationMode::Fixed(Coordinate::new(-33.87, 151.21))
        );
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_no_geolocation_wins() {
        let cli = CliConfig::parse_from(["event-map", "--no-geolocation", "--api-key", "k"]);
        let mut settings = Settings::default();
        cli.apply_to(&mut settings);
        assert_eq!(settings.geolocation, GeolocationMode::Unavailable);
    }
}

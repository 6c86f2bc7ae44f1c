use crate::utils::error::{EventMapError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub map: MapSection,
    #[serde(default)]
    pub geolocation: GeolocationSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSection {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub radius: Option<u32>,
    pub page_size: Option<u32>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapSection {
    /// `[lat, lon]` used when the visitor cannot be located.
    pub default_center: Option<[f64; 2]>,
    pub locate_zoom: Option<f64>,
    pub fit_padding: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeolocationSection {
    /// "ip" or "none"
    pub provider: Option<String>,
    pub endpoint: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| EventMapError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

/// Replaces `${VAR}` with the environment value. Unknown variables stay as written.
fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EventMapError::ConfigError {
        message: format!("invalid substitution pattern: {}", e),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });

    Ok(result.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = TomlConfig::from_toml_str(
            r#"
[api]
endpoint = "https://example.com/events.json"
api_key = "abc"
radius = 25
page_size = 20

[map]
default_center = [59.33, 18.06]
locate_zoom = 11.0
fit_padding = 40.0

[geolocation]
provider = "ip"
"#,
        )
        .unwrap();

        assert_eq!(config.api.radius, Some(25));
        assert_eq!(config.map.default_center, Some([59.33, 18.06]));
        assert_eq!(config.map.locate_zoom, Some(11.0));
        assert_eq!(config.geolocation.provider.as_deref(), Some("ip"));
    }

    #[test]
    fn test_empty_config_is_all_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.api.endpoint.is_none());
        assert!(config.map.width.is_none());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("EVENT_MAP_TEST_KEY", "from-env");
        let config = TomlConfig::from_toml_str(
            r#"
[api]
api_key = "${EVENT_MAP_TEST_KEY}"
endpoint = "${EVENT_MAP_UNSET_VAR}"
"#,
        )
        .unwrap();

        assert_eq!(config.api.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.api.endpoint.as_deref(), Some("${EVENT_MAP_UNSET_VAR}"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[api\nradius = ").unwrap_err();
        assert!(err.is_config_error());
    }
}

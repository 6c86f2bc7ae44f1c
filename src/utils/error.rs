use thiserror::Error;

#[derive(Error, Debug)]
pub enum EventMapError {
    #[error("API request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API responded with status {status}")]
    ApiStatusError { status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Geolocation failed: {message}")]
    GeolocationError { message: String },
}

impl EventMapError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            EventMapError::ConfigError { .. }
                | EventMapError::InvalidConfigValueError { .. }
                | EventMapError::MissingConfigError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EventMapError::HttpError(_) | EventMapError::ApiStatusError { .. } => {
                "Could not reach the events service".to_string()
            }
            EventMapError::SerializationError(_) => {
                "The events service returned data that could not be read".to_string()
            }
            EventMapError::MissingConfigError { field } => {
                format!("Missing configuration value: {}", field)
            }
            EventMapError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration for {}: {}", field, reason)
            }
            EventMapError::GeolocationError { .. } => {
                "Your location could not be determined".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EventMapError::HttpError(_) => "Check your network connection and try again",
            EventMapError::ApiStatusError { status: 401 | 403 } => {
                "Check that API_KEY holds a valid Ticketmaster key"
            }
            EventMapError::ApiStatusError { .. } => "The events service may be down, try later",
            EventMapError::MissingConfigError { .. } => {
                "Set the API_KEY environment variable or pass --api-key"
            }
            EventMapError::InvalidConfigValueError { .. } | EventMapError::ConfigError { .. } => {
                "Review the command line options and the TOML config file"
            }
            EventMapError::UrlError(_) => "Use an absolute http(s) URL",
            EventMapError::GeolocationError { .. } => "Pass --lat and --lon explicitly",
            EventMapError::IoError(_) | EventMapError::SerializationError(_) => {
                "Run again with --verbose for details"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EventMapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_classified() {
        let missing = EventMapError::MissingConfigError {
            field: "api_key".to_string(),
        };
        assert!(missing.is_config_error());
        assert!(missing.user_friendly_message().contains("api_key"));

        let status = EventMapError::ApiStatusError { status: 401 };
        assert!(!status.is_config_error());
        assert!(status.recovery_suggestion().contains("API_KEY"));
    }
}

use crate::domain::model::Coordinate;
use crate::domain::ports::PositionSource;
use crate::utils::error::{EventMapError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const IP_GEOLOCATION_ENDPOINT: &str = "http://ip-api.com/json";

/// Position given up front, e.g. `--lat`/`--lon`.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinate);

#[async_trait]
impl PositionSource for FixedPosition {
    async fn current_position(&self) -> Result<Coordinate> {
        Ok(self.0)
    }
}

/// Approximate position from the caller's public IP.
pub struct IpGeolocation {
    endpoint: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct IpLookup {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

impl IpGeolocation {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            endpoint: endpoint.into(),
            client: Client::builder().timeout(timeout).build()?,
        })
    }
}

#[async_trait]
impl PositionSource for IpGeolocation {
    async fn current_position(&self) -> Result<Coordinate> {
        tracing::debug!("Looking up position via {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        if !response.status().is_success() {
            return Err(EventMapError::GeolocationError {
                message: format!("lookup returned status {}", response.status()),
            });
        }

        let lookup: IpLookup = response.json().await?;
        match (lookup.status.as_str(), lookup.lat, lookup.lon) {
            ("success", Some(lat), Some(lon)) => Ok(Coordinate::new(lat, lon)),
            _ => Err(EventMapError::GeolocationError {
                message: lookup
                    .message
                    .unwrap_or_else(|| format!("lookup status '{}'", lookup.status)),
            }),
        }
    }
}

use crate::domain::model::Coordinate;
use crate::domain::ports::PositionSource;
use std::sync::Arc;

pub const DEFAULT_LOCATION: Coordinate = Coordinate::new(51.505, -0.09);
pub const LOCATE_ZOOM: f64 = 12.0;

pub struct Geolocator {
    source: Option<Arc<dyn PositionSource>>,
    fallback: Coordinate,
}

impl Geolocator {
    /// `None` means the platform has no location capability at all.
    pub fn new(source: Option<Arc<dyn PositionSource>>) -> Self {
        Self {
            source,
            fallback: DEFAULT_LOCATION,
        }
    }

    pub fn with_fallback(mut self, fallback: Coordinate) -> Self {
        self.fallback = fallback;
        self
    }

    /// Single attempt. Never fails: errors fall back to the default location.
    pub async fn locate(&self) -> Coordinate {
        let Some(source) = &self.source else {
            tracing::debug!("No position source, using default location {}", self.fallback);
            return self.fallback;
        };

        match source.current_position().await {
            Ok(position) => {
                tracing::info!("📍 Located at {}", position);
                position
            }
            Err(e) => {
                tracing::warn!("Geolocation failed: {}", e);
                self.fallback
            }
        }
    }
}

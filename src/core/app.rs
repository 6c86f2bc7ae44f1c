use crate::core::geolocator::{Geolocator, LOCATE_ZOOM};
use crate::core::pipeline::{EventPipeline, PipelineReport};
use crate::core::search::{SearchController, SearchOutcome};
use crate::domain::model::{Coordinate, EventQuery};
use crate::domain::ports::EventSource;
use std::sync::Arc;

/// Wires the geolocation start-up path and city searches to one pipeline.
pub struct EventMapApp<S: EventSource> {
    geolocator: Geolocator,
    pipeline: Arc<EventPipeline<S>>,
    search: SearchController<S>,
    locate_zoom: f64,
}

impl<S: EventSource> EventMapApp<S> {
    pub fn new(geolocator: Geolocator, pipeline: EventPipeline<S>) -> Self {
        let pipeline = Arc::new(pipeline);
        Self {
            geolocator,
            search: SearchController::new(Arc::clone(&pipeline)),
            pipeline,
            locate_zoom: LOCATE_ZOOM,
        }
    }

    pub fn with_locate_zoom(mut self, zoom: f64) -> Self {
        self.locate_zoom = zoom;
        self
    }

    pub fn pipeline(&self) -> &Arc<EventPipeline<S>> {
        &self.pipeline
    }

    /// Locates the visitor, recenters the map there and loads nearby events.
    pub async fn show_nearby(&self) -> (Coordinate, PipelineReport) {
        let position = self.geolocator.locate().await;
        self.pipeline
            .context()
            .set_view(position, self.locate_zoom)
            .await;

        let report = self.pipeline.run(EventQuery::Near(position)).await;
        (position, report)
    }

    pub async fn search(&self, input: &str) -> SearchOutcome {
        self.search.on_search(input).await
    }
}

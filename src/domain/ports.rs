use crate::domain::model::{
    Bounds, Coordinate, EventQuery, FetchOutcome, ListItem, MapView, Marker, MarkerPopup, Notice,
    Padding,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn api_key(&self) -> &str;
    fn search_radius(&self) -> u32;
    fn page_size(&self) -> u32;
    fn request_timeout(&self) -> Duration;
}

/// Where events come from. The HTTP fetcher is the production implementation.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn fetch(&self, query: &EventQuery) -> Result<FetchOutcome>;
}

/// Platform location capability. One attempt per call.
#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn current_position(&self) -> Result<Coordinate>;
}

/// Rendering surface of the map library.
pub trait MapSurface: Send {
    fn set_view(&mut self, center: Coordinate, zoom: f64);
    fn clear_markers(&mut self);
    fn add_marker(&mut self, coordinate: Coordinate, popup: MarkerPopup);
    fn fit_bounds(&mut self, bounds: Bounds, padding: Padding);
    fn view(&self) -> Option<MapView>;
    fn markers(&self) -> &[Marker];
}

/// The results list container.
pub trait ListSurface: Send {
    fn replace_items(&mut self, items: Vec<ListItem>);
    fn items(&self) -> &[ListItem];
    fn scroll_into_view(&mut self);
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

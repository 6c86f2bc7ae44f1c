pub mod app;
pub mod fetcher;
pub mod geolocator;
pub mod list_renderer;
pub mod marker_renderer;
pub mod pipeline;
pub mod render_context;
pub mod search;

pub use crate::domain::model::{Coordinate, Event, EventQuery, FetchOutcome};
pub use crate::domain::ports::{ConfigProvider, EventSource, ListSurface, MapSurface, Notifier};
pub use crate::utils::error::Result;

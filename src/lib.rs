pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{GeolocationMode, Settings};

pub use crate::core::{
    app::EventMapApp, fetcher::EventFetcher, geolocator::Geolocator, pipeline::EventPipeline,
    render_context::RenderContext, search::SearchController,
};
pub use utils::error::{EventMapError, Result};

// Adapters layer: concrete surfaces and position sources for running outside a browser.

pub mod geolocation;
pub mod headless_map;
pub mod terminal;

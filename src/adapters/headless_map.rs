//! Map surface without a display. It keeps the view and marker state the way a
//! slippy-map library would, so the CLI and the tests can observe it.

use crate::domain::model::{Bounds, Coordinate, MapView, Marker, MarkerPopup, Padding};
use crate::domain::ports::MapSurface;
use std::f64::consts::PI;

const TILE_SIZE: f64 = 256.0;
const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub url_template: String,
    pub max_zoom: f64,
    pub attribution: String,
}

impl TileLayer {
    pub fn openstreetmap() -> Self {
        Self {
            url_template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            max_zoom: 19.0,
            attribution: "© OpenStreetMap contributors".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HeadlessMap {
    tiles: TileLayer,
    width: f64,
    height: f64,
    min_zoom: f64,
    view: Option<MapView>,
    markers: Vec<Marker>,
}

impl HeadlessMap {
    pub fn new(tiles: TileLayer, width: f64, height: f64) -> Self {
        Self {
            tiles,
            width,
            height,
            min_zoom: 0.0,
            view: None,
            markers: Vec::new(),
        }
    }

    /// Largest whole zoom at which `bounds` fits inside the padded viewport.
    pub fn bounds_zoom(&self, bounds: &Bounds, padding: Padding) -> f64 {
        let available_x = self.width - 2.0 * padding.x;
        let available_y = self.height - 2.0 * padding.y;
        if available_x <= 0.0 || available_y <= 0.0 {
            return self.min_zoom;
        }

        let (sw_x, sw_y) = project(&bounds.south_west);
        let (ne_x, ne_y) = project(&bounds.north_east);
        let span_x = (ne_x - sw_x).abs();
        let span_y = (sw_y - ne_y).abs();

        let scale = f64::min(available_x / span_x, available_y / span_y);
        let zoom = scale.log2().floor();

        if zoom.is_nan() {
            return self.tiles.max_zoom;
        }
        zoom.clamp(self.min_zoom, self.tiles.max_zoom)
    }
}

/// Web-Mercator projection to zoom-0 pixel space.
pub fn project(c: &Coordinate) -> (f64, f64) {
    let lat = c.latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (c.longitude + 180.0) / 360.0 * TILE_SIZE;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * TILE_SIZE;
    (x, y)
}

pub fn unproject(x: f64, y: f64) -> Coordinate {
    let longitude = x / TILE_SIZE * 360.0 - 180.0;
    let latitude = (PI * (1.0 - 2.0 * y / TILE_SIZE)).sinh().atan().to_degrees();
    Coordinate::new(latitude, longitude)
}

impl MapSurface for HeadlessMap {
    fn set_view(&mut self, center: Coordinate, zoom: f64) {
        let zoom = zoom.clamp(self.min_zoom, self.tiles.max_zoom);
        tracing::debug!("Map view set to {} @ zoom {}", center, zoom);
        self.view = Some(MapView { center, zoom });
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
    }

    fn add_marker(&mut self, coordinate: Coordinate, popup: MarkerPopup) {
        self.markers.push(Marker { coordinate, popup });
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding: Padding) {
        let zoom = self.bounds_zoom(&bounds, padding);
        let (sw_x, sw_y) = project(&bounds.south_west);
        let (ne_x, ne_y) = project(&bounds.north_east);
        let center = unproject((sw_x + ne_x) / 2.0, (sw_y + ne_y) / 2.0);
        self.set_view(center, zoom);
    }

    fn view(&self) -> Option<MapView> {
        self.view
    }

    fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

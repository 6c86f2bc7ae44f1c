#![allow(dead_code)]

use event_map::adapters::headless_map::{HeadlessMap, TileLayer};
use event_map::domain::model::{ListItem, Notice};
use event_map::domain::ports::{ListSurface, Notifier, PositionSource};
use event_map::{EventFetcher, EventMapApp, EventPipeline, Geolocator, RenderContext, Settings};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

pub type TestApp = EventMapApp<EventFetcher<Settings>>;

#[derive(Default)]
pub struct RecordingList {
    items: Vec<ListItem>,
}

impl ListSurface for RecordingList {
    fn replace_items(&mut self, items: Vec<ListItem>) {
        self.items = items;
    }

    fn items(&self) -> &[ListItem] {
        &self.items
    }

    fn scroll_into_view(&mut self) {}
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

pub fn settings(endpoint: String) -> Settings {
    Settings::new("test-key").with_endpoint(endpoint)
}

pub fn build_app(
    endpoint: String,
    position: Option<Arc<dyn PositionSource>>,
) -> (TestApp, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let context = Arc::new(RenderContext::new(
        HeadlessMap::new(TileLayer::openstreetmap(), 1024.0, 768.0),
        RecordingList::default(),
        notifier.clone(),
    ));
    let fetcher = EventFetcher::new(settings(endpoint)).unwrap();
    let pipeline = EventPipeline::new(fetcher, context);

    (EventMapApp::new(Geolocator::new(position), pipeline), notifier)
}

pub fn event_json(id: &str, date: &str, venue: Option<(&str, &str, &str)>) -> Value {
    let mut event = json!({
        "id": id,
        "name": format!("Event {}", id),
        "url": format!("https://tickets.example.com/{}", id),
        "dates": {"start": {"localDate": date}},
        "images": [{"url": format!("https://img.example.com/{}.jpg", id)}]
    });

    if let Some((name, lat, lon)) = venue {
        event["_embedded"] = json!({"venues": [{
            "name": name,
            "address": {"line1": format!("{} street", name)},
            "location": {"latitude": lat, "longitude": lon}
        }]});
    }

    event
}

pub fn envelope(events: Vec<Value>) -> Value {
    json!({"_embedded": {"events": events}, "page": {"size": 10}})
}

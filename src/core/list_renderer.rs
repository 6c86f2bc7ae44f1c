use crate::domain::model::{Event, ListItem};
use crate::domain::ports::ListSurface;
use std::cmp::Ordering;

pub struct EventListRenderer;

impl EventListRenderer {
    /// Stable ascending sort by start date. Undated events go last.
    pub fn sorted(events: &[Event]) -> Vec<&Event> {
        let mut sorted: Vec<&Event> = events.iter().collect();
        sorted.sort_by(|a, b| match (a.start_date, b.start_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        sorted
    }

    pub fn items(events: &[Event]) -> Vec<ListItem> {
        Self::sorted(events)
            .into_iter()
            .map(|event| ListItem {
                title: event.name.clone(),
                link: event.url.clone(),
                open_in_new_context: true,
                thumbnail: event.image_url.clone(),
                date_label: event.date_label(),
                venue_label: event.venue_label(),
            })
            .collect()
    }

    /// Replaces whatever the surface showed before.
    pub fn render(events: &[Event], list: &mut dyn ListSurface) -> usize {
        let items = Self::items(events);
        let count = items.len();
        list.replace_items(items);
        tracing::debug!("Rendered {} list items", count);
        count
    }
}

use crate::domain::model::{
    venue_label, Bounds, Event, MarkerPopup, Padding, PopupEntry, VenueGroup,
};
use crate::domain::ports::MapSurface;
use std::collections::HashMap;

pub const FIT_PADDING: Padding = Padding { x: 50.0, y: 50.0 };

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MarkerSummary {
    pub markers: usize,
    pub skipped: usize,
}

pub struct MapMarkerRenderer {
    padding: Padding,
}

impl Default for MapMarkerRenderer {
    fn default() -> Self {
        Self {
            padding: FIT_PADDING,
        }
    }
}

impl MapMarkerRenderer {
    pub fn new(padding: Padding) -> Self {
        Self { padding }
    }

    /// Groups events by venue coordinate, in order of first appearance.
    pub fn group_by_venue(events: &[Event]) -> (Vec<VenueGroup>, usize) {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<VenueGroup> = Vec::new();
        let mut skipped = 0;

        for event in events {
            let Some(coordinate) = event.coordinate() else {
                tracing::warn!("No location found for event: {}", event.name);
                skipped += 1;
                continue;
            };

            let slot = *index.entry(coordinate.key()).or_insert_with(|| {
                groups.push(VenueGroup {
                    coordinate,
                    venue_name: event.venue.as_ref().and_then(|v| v.name.clone()),
                    events: Vec::new(),
                });
                groups.len() - 1
            });
            groups[slot].events.push(event.clone());
        }

        (groups, skipped)
    }

    pub fn popup(group: &VenueGroup) -> MarkerPopup {
        let first_venue = group.events.first().and_then(|e| e.venue.as_ref());

        MarkerPopup {
            title: venue_label(group.venue_name.as_deref(), first_venue),
            entries: group
                .events
                .iter()
                .map(|event| PopupEntry {
                    name: event.name.clone(),
                    link: event.url.clone(),
                    date_label: event.date_label(),
                })
                .collect(),
        }
    }

    /// Clears every marker, places one per venue and fits the viewport to them.
    pub fn render(&self, events: &[Event], map: &mut dyn MapSurface) -> MarkerSummary {
        map.clear_markers();

        let (groups, skipped) = Self::group_by_venue(events);
        for group in &groups {
            map.add_marker(group.coordinate, Self::popup(group));
        }

        if let Some(bounds) = Bounds::covering(groups.iter().map(|g| g.coordinate)) {
            map.fit_bounds(bounds, self.padding);
        }

        tracing::debug!(
            "Placed {} markers ({} events without location)",
            groups.len(),
            skipped
        );

        MarkerSummary {
            markers: groups.len(),
            skipped,
        }
    }
}

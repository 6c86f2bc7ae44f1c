use crate::domain::model::{Coordinate, Event, EventQuery, FetchOutcome, Venue};
use crate::domain::ports::{ConfigProvider, EventSource};
use crate::utils::error::{EventMapError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

/// Discovery API client. One GET per fetch, no retries.
pub struct EventFetcher<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> EventFetcher<C> {
    pub fn new(config: C) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self { config, client })
    }

    pub fn request_url(&self, query: &EventQuery) -> Result<Url> {
        let mut url = Url::parse(self.config.api_endpoint())?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("apikey", self.config.api_key());
            match query {
                EventQuery::Near(coordinate) => {
                    pairs.append_pair("latlong", &coordinate.to_string());
                    pairs.append_pair("radius", &self.config.search_radius().to_string());
                }
                EventQuery::City(city) => {
                    pairs.append_pair("city", city);
                }
            }
            pairs.append_pair("size", &self.config.page_size().to_string());
        }
        Ok(url)
    }
}

#[async_trait]
impl<C: ConfigProvider> EventSource for EventFetcher<C> {
    async fn fetch(&self, query: &EventQuery) -> Result<FetchOutcome> {
        let url = self.request_url(query)?;
        tracing::debug!("Requesting events: {:?}", query);

        let response = self.client.get(url).send().await?;
        tracing::debug!("Events API response status: {}", response.status());

        // Error statuses with a JSON body (e.g. an invalid key fault) are read as
        // an envelope like any other; only unreadable bodies fail the fetch.
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<Value>(&body) {
            Ok(json) => {
                if !status.is_success() {
                    tracing::warn!("Events API answered {} with a JSON body", status);
                }
                Ok(parse_envelope(json))
            }
            Err(_) if !status.is_success() => Err(EventMapError::ApiStatusError {
                status: status.as_u16(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

/// Reads the `_embedded.events` container. Anything without it counts as no results.
pub fn parse_envelope(json: Value) -> FetchOutcome {
    let entries = match json.pointer("/_embedded/events") {
        Some(Value::Array(entries)) if !entries.is_empty() => entries,
        _ => return FetchOutcome::NoResults,
    };

    let events: Vec<Event> = entries
        .iter()
        .filter_map(|entry| match ApiEvent::deserialize(entry) {
            Ok(raw) => Some(raw.into_event()),
            Err(e) => {
                tracing::warn!("Skipping unreadable event entry: {}", e);
                None
            }
        })
        .collect();

    if events.is_empty() {
        FetchOutcome::NoResults
    } else {
        FetchOutcome::Events(events)
    }
}

#[derive(Debug, Deserialize)]
struct ApiEvent {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    dates: Option<ApiDates>,
    #[serde(default)]
    images: Option<Vec<ApiImage>>,
    #[serde(rename = "_embedded", default)]
    embedded: Option<ApiEventEmbedded>,
}

#[derive(Debug, Deserialize)]
struct ApiDates {
    #[serde(default)]
    start: Option<ApiStart>,
}

#[derive(Debug, Deserialize)]
struct ApiStart {
    #[serde(rename = "localDate", default)]
    local_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiImage {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiEventEmbedded {
    #[serde(default)]
    venues: Option<Vec<ApiVenue>>,
}

#[derive(Debug, Deserialize)]
struct ApiVenue {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    address: Option<ApiAddress>,
    #[serde(default)]
    location: Option<ApiLocation>,
}

#[derive(Debug, Deserialize)]
struct ApiAddress {
    #[serde(default)]
    line1: Option<String>,
}

// The API sends degrees as strings; accept plain numbers too.
#[derive(Debug, Deserialize)]
struct ApiLocation {
    #[serde(default)]
    latitude: Option<Value>,
    #[serde(default)]
    longitude: Option<Value>,
}

impl ApiLocation {
    fn coordinate(&self) -> Option<Coordinate> {
        let latitude = parse_degrees(self.latitude.as_ref()?)?;
        let longitude = parse_degrees(self.longitude.as_ref()?)?;
        Some(Coordinate::new(latitude, longitude))
    }
}

fn parse_degrees(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Number(n) => n.as_f64()?,
        _ => return None,
    };
    parsed.is_finite().then_some(parsed)
}

impl ApiEvent {
    fn into_event(self) -> Event {
        let start_date = self
            .dates
            .and_then(|d| d.start)
            .and_then(|s| s.local_date)
            .and_then(|raw| NaiveDate::parse_from_str(&raw, "%Y-%m-%d").ok());

        let image_url = self
            .images
            .and_then(|images| images.into_iter().next())
            .and_then(|image| image.url)
            .filter(|url| !url.is_empty());

        let venue = self
            .embedded
            .and_then(|e| e.venues)
            .and_then(|venues| venues.into_iter().next())
            .map(|v| Venue {
                coordinate: v.location.as_ref().and_then(ApiLocation::coordinate),
                name: v.name,
                address_line: v.address.and_then(|a| a.line1),
            });

        Event {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            url: self.url.unwrap_or_default(),
            start_date,
            image_url,
            venue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    struct TestConfig;

    impl ConfigProvider for TestConfig {
        fn api_endpoint(&self) -> &str {
            "https://app.ticketmaster.com/discovery/v2/events.json"
        }
        fn api_key(&self) -> &str {
            "secret"
        }
        fn search_radius(&self) -> u32 {
            50
        }
        fn page_size(&self) -> u32 {
            10
        }
        fn request_timeout(&self) -> Duration {
            Duration::from_secs(5)
        }
    }

    fn query_of(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_coordinate_request_url() {
        let fetcher = EventFetcher::new(TestConfig).unwrap();
        let url = fetcher
            .request_url(&EventQuery::Near(Coordinate::new(51.505, -0.09)))
            .unwrap();

        assert_eq!(
            query_of(&url),
            vec![
                ("apikey".to_string(), "secret".to_string()),
                ("latlong".to_string(), "51.505,-0.09".to_string()),
                ("radius".to_string(), "50".to_string()),
                ("size".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_city_request_url_is_encoded() {
        let fetcher = EventFetcher::new(TestConfig).unwrap();
        let url = fetcher
            .request_url(&EventQuery::City("São Paulo".to_string()))
            .unwrap();

        let pairs = query_of(&url);
        assert!(pairs.contains(&("city".to_string(), "São Paulo".to_string())));
        assert!(pairs.iter().all(|(k, _)| k != "latlong" && k != "radius"));
        assert!(url.as_str().contains("city=S%C3%A3o+Paulo"));
    }

    #[test]
    fn test_missing_container_is_no_results() {
        assert_eq!(parse_envelope(json!({})), FetchOutcome::NoResults);
        assert_eq!(parse_envelope(json!({"_embedded": {}})), FetchOutcome::NoResults);
        assert_eq!(
            parse_envelope(json!({"_embedded": {"events": "nope"}})),
            FetchOutcome::NoResults
        );
        assert_eq!(
            parse_envelope(json!({"_embedded": {"events": []}})),
            FetchOutcome::NoResults
        );
    }

    #[test]
    fn test_event_fields_are_parsed() {
        let outcome = parse_envelope(json!({
            "_embedded": {"events": [{
                "id": "G5v",
                "name": "Jazz Night",
                "url": "https://example.com/e/1",
                "dates": {"start": {"localDate": "2025-03-01"}},
                "images": [{"url": "https://img/1.jpg"}, {"url": "https://img/2.jpg"}],
                "_embedded": {"venues": [{
                    "name": "Blue Note",
                    "address": {"line1": "1 Jazz St"},
                    "location": {"latitude": "48.85", "longitude": "2.35"}
                }]}
            }]}
        }));

        let FetchOutcome::Events(events) = outcome else {
            panic!("expected events");
        };
        let event = &events[0];
        assert_eq!(event.id, "G5v");
        assert_eq!(event.start_date, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(event.image_url.as_deref(), Some("https://img/1.jpg"));
        assert_eq!(event.coordinate(), Some(Coordinate::new(48.85, 2.35)));
        assert_eq!(event.venue_label(), "Blue Note");
    }

    #[test]
    fn test_sparse_event_is_kept_without_venue_coordinate() {
        let outcome = parse_envelope(json!({
            "_embedded": {"events": [
                {"name": "No Venue"},
                {"name": "Bad Location", "_embedded": {"venues": [
                    {"address": {"line1": "2 Road"}, "location": {"latitude": "abc", "longitude": "1"}}
                ]}}
            ]}
        }));

        let FetchOutcome::Events(events) = outcome else {
            panic!("expected events");
        };
        assert_eq!(events.len(), 2);
        assert!(events[0].venue.is_none());
        assert!(events[0].start_date.is_none());
        assert!(events[1].coordinate().is_none());
        assert_eq!(events[1].venue_label(), "2 Road");
    }
}

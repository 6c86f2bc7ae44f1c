use clap::Parser;
use event_map::domain::model::Coordinate;
use event_map::utils::validation::Validate;
use event_map::{CliConfig, GeolocationMode};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_cli_resolves_toml_file_then_flags() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[api]
endpoint = "https://events.example.com/v2/events.json"
api_key = "from-file"
page_size = 5

[map]
default_center = [55.676, 12.568]
fit_padding = 30.0

[geolocation]
provider = "ip"
endpoint = "https://geo.example.com/json"
"#
    )
    .unwrap();

    let path = file.path().to_str().unwrap();
    let cli = CliConfig::parse_from(["event-map", "--config", path, "--api-key", "from-cli"]);
    let settings = cli.resolve().unwrap();

    assert_eq!(settings.api_key, "from-cli");
    assert_eq!(settings.api_endpoint, "https://events.example.com/v2/events.json");
    assert_eq!(settings.page_size, 5);
    assert_eq!(settings.search_radius, 50);
    assert_eq!(settings.default_center, Coordinate::new(55.676, 12.568));
    assert_eq!(settings.fit_padding, 30.0);
    assert_eq!(
        settings.geolocation,
        GeolocationMode::Ip("https://geo.example.com/json".to_string())
    );
    assert!(settings.validate().is_ok());
}

#[test]
fn test_missing_config_file_is_io_error() {
    let cli = CliConfig::parse_from(["event-map", "--config", "/nonexistent/event-map.toml"]);
    let err = cli.resolve().unwrap_err();
    assert!(matches!(err, event_map::EventMapError::IoError(_)));
}

#[test]
fn test_out_of_range_latitude_fails_validation() {
    let cli = CliConfig::parse_from([
        "event-map",
        "--api-key",
        "k",
        "--lat",
        "123.0",
        "--lon",
        "0.0",
    ]);
    let settings = cli.resolve().unwrap();
    let err = settings.validate().unwrap_err();
    assert!(err.is_config_error());
}

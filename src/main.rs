use clap::Parser;
use event_map::adapters::geolocation::{FixedPosition, IpGeolocation};
use event_map::adapters::headless_map::{HeadlessMap, TileLayer};
use event_map::adapters::terminal::{describe_markers, TerminalList, TerminalNotifier};
use event_map::core::marker_renderer::MapMarkerRenderer;
use event_map::domain::model::Padding;
use event_map::domain::ports::PositionSource;
use event_map::utils::{logger, validation::Validate};
use event_map::{
    CliConfig, EventFetcher, EventMapApp, EventMapError, EventPipeline, GeolocationMode,
    Geolocator, RenderContext, Settings,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

type App = EventMapApp<EventFetcher<Settings>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting event-map");

    let app = match build_app(&cli) {
        Ok(app) => Arc::new(app),
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // The page load always locates first; `--city` is a search issued after it.
    let initial = {
        let app = Arc::clone(&app);
        let city = cli.city.clone();
        tokio::spawn(async move {
            app.show_nearby().await;
            if let Some(city) = city {
                app.search(&city).await;
            }
            print_map(&app).await;
        })
    };

    if !cli.interactive {
        initial.await?;
        return Ok(());
    }

    println!("Type a city and press enter to search (:quit to exit)");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == ":quit" {
            break;
        }
        app.search(&line).await;
        print_map(&app).await;
    }

    initial.abort();
    Ok(())
}

fn build_app(cli: &CliConfig) -> Result<App, EventMapError> {
    let settings = cli.resolve()?;
    settings.validate()?;
    tracing::debug!(
        "Settings: endpoint={}, geolocation={:?}",
        settings.api_endpoint,
        settings.geolocation
    );

    let source: Option<Arc<dyn PositionSource>> = match &settings.geolocation {
        GeolocationMode::Unavailable => None,
        GeolocationMode::Fixed(position) => Some(Arc::new(FixedPosition(*position))),
        GeolocationMode::Ip(endpoint) => Some(Arc::new(IpGeolocation::new(
            endpoint.clone(),
            settings.request_timeout,
        )?)),
    };

    let tiles = TileLayer::openstreetmap();
    tracing::debug!("Tile layer: {} ({})", tiles.url_template, tiles.attribution);

    let context = Arc::new(RenderContext::new(
        HeadlessMap::new(tiles, settings.map_width, settings.map_height),
        TerminalList::stdout(),
        Arc::new(TerminalNotifier::new()),
    ));

    let padding = Padding {
        x: settings.fit_padding,
        y: settings.fit_padding,
    };
    let pipeline = EventPipeline::new(EventFetcher::new(settings.clone())?, context)
        .with_marker_renderer(MapMarkerRenderer::new(padding));
    let geolocator = Geolocator::new(source).with_fallback(settings.default_center);

    Ok(EventMapApp::new(geolocator, pipeline).with_locate_zoom(settings.locate_zoom))
}

async fn print_map(app: &App) {
    let summary = app
        .pipeline()
        .context()
        .with_map(describe_markers)
        .await;
    if !summary.is_empty() {
        println!("{}", summary);
    }
}

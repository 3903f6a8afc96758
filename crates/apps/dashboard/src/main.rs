use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use feeds::{FeedKind, FeedPayload, parse_flight_routes, parse_noise_sheet};
use geo::rect::GeoRect;
use layers::DashboardSession;
use layers::flight_path::FlightPathLayer;
use layers::heat_map::{HeatMapLayer, HeatPoint};
use layers::noise_overlay::NoiseOverlayLayer;
use layers::poi::{PoiLayer, PoiSite};
use layers::tileset::TilesetLayer;
use layers::wind_field::WindFieldLayer;

const FLIGHT_DATA: &str = include_str!("../data/flights.json");
const NOISE_DATA: &str = include_str!("../data/noise.json");

/// Headless driver for the flight dashboard.
///
/// Stands in for the rendering frontend: registers every layer, fulfils
/// feed fetches from the bundled sample data, then runs the tick loop and
/// reports scene state as it goes.
#[derive(Parser)]
#[command(about = "Headless UAV flight dashboard")]
struct Args {
    /// Frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Seconds per frame.
    #[arg(long, default_value_t = 0.5)]
    dt: f64,

    /// Wind direction in degrees (0 = north, 90 = east).
    #[arg(long, default_value_t = 90.0)]
    wind_direction: f64,

    /// Wind strength, 1 to 10.
    #[arg(long, default_value_t = 5.0)]
    wind_level: f64,

    /// Wind particle budget.
    #[arg(long, default_value_t = 1_000)]
    wind_particles: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let routes = parse_flight_routes(FLIGHT_DATA).expect("bundled flight data is valid");
    let sheet = parse_noise_sheet(NOISE_DATA).expect("bundled noise data is valid");

    // Central Guangzhou, covering every bundled route.
    let bounds = GeoRect::new(113.29, 23.09, 113.38, 23.16);
    let heat_points: Vec<HeatPoint> = routes
        .iter()
        .flat_map(|route| route.path.iter())
        .map(|sample| HeatPoint {
            longitude: sample.longitude,
            latitude: sample.latitude,
            weight: 1.0,
        })
        .collect();

    let mut session = DashboardSession::new(args.dt);
    let layer_ids = [
        session.add_layer(TilesetLayer::new(1, "tiles/city.json")),
        session.add_layer(FlightPathLayer::new(2)),
        session.add_layer(PoiLayer::new(
            3,
            vec![
                PoiSite::new("Canton Tower", 113.3191, 23.1066, 600.0),
                PoiSite::new("Sports Center", 113.3310, 23.1399, 0.0),
                PoiSite::new("East Station", 113.3265, 23.1496, 0.0),
            ],
        )),
        session.add_layer(HeatMapLayer::new(4, bounds, heat_points)),
        session.add_layer(NoiseOverlayLayer::new(5, 0)),
        session.add_wind_layer(
            WindFieldLayer::new(6)
                .with_bounds(bounds)
                .with_particle_count(args.wind_particles),
        ),
    ];

    for id in layer_ids {
        match session.toggle(id) {
            Ok(true) => info!("layer {} is on", id.0),
            Ok(false) => warn!("layer {} refused activation", id.0),
            Err(err) => warn!("layer {} failed to activate: {err}", id.0),
        }
    }
    session.update_wind(args.wind_direction, args.wind_level);

    // Fulfil queued feed fetches on the spot; the bundled sample data
    // stands in for the backend.
    while let Some((work, request)) = session.pump_fetch() {
        let payload = match request.kind {
            FeedKind::Tileset { source } => {
                info!("fetched tileset {source}");
                FeedPayload::Tileset
            }
            FeedKind::FlightData => {
                info!("fetched {} flight routes", routes.len());
                FeedPayload::FlightData(routes.clone())
            }
            FeedKind::NoiseSheet { index } => {
                info!("fetched noise sheet {index}");
                FeedPayload::NoiseSheet(sheet.clone())
            }
        };
        session.complete_fetch(work, payload);
    }

    for _ in 0..args.frames {
        let frame = session.tick();
        if frame.index % 120 == 0 {
            let markers = session.viewer().world.visible_markers_at(frame.time()).len();
            let particles = session
                .wind_layer()
                .and_then(|wind| wind.effect_id())
                .and_then(|effect| session.viewer().effect(effect))
                .map(|system| system.particles().len())
                .unwrap_or(0);
            info!(
                "frame {:>5} t={:>7.1}s markers={markers} wind particles={particles}",
                frame.index,
                frame.time().0
            );
        }
    }

    for event in session.drain_events() {
        info!(
            "trace frame {:>5} [{}] {}",
            event.frame_index,
            event.scope.as_str(),
            event.message
        );
    }
}

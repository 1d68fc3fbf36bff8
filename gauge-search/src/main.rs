use std::process::ExitCode;

use gauge_search::GaugeSearch;
use gauge_search::domain::{LatLong, StationRecord};
use gauge_search::geocode::{Geocoder, PostcodeClient, PostcodeConfig};
use gauge_search::search::SearchConfig;
use gauge_search::source::{FixtureStationSource, GaugeApiClient, GaugeApiConfig, StationSource};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage:
  gauge-search [--all] <term>     search by station name, falling back to postcode
  gauge-search --id <notation>    look up one station
  gauge-search --near <lat> <long> [km]
                                  stations near a point (default 10 km)
  gauge-search --rivers           list river names
  gauge-search --catchments       list catchment names

Environment:
  GAUGE_API_BASE_URL      gauge API base URL
  POSTCODE_API_BASE_URL   postcode geocoder base URL
  GAUGE_FIXTURE           serve stations from this JSON file instead of the API
  RUST_LOG                log filter (default: info)";

/// What the user asked for.
enum Command {
    Search { term: String, show_all: bool },
    Station(String),
    Near { centre: LatLong, radius_km: f64 },
    Rivers,
    Catchments,
}

fn parse_args(args: &[String]) -> Option<Command> {
    match args {
        [flag] if flag == "--rivers" => Some(Command::Rivers),
        [flag] if flag == "--catchments" => Some(Command::Catchments),
        [flag, notation] if flag == "--id" => Some(Command::Station(notation.clone())),
        [flag, lat, long, rest @ ..] if flag == "--near" && rest.len() <= 1 => {
            let centre = LatLong::new(lat.parse().ok()?, long.parse().ok()?);
            let radius_km = match rest {
                [km] => km.parse().ok()?,
                _ => SearchConfig::default().radius_km,
            };
            centre.is_valid().then_some(Command::Near { centre, radius_km })
        }
        [flag, rest @ ..] if flag == "--all" && !rest.is_empty() => Some(Command::Search {
            term: rest.join(" "),
            show_all: true,
        }),
        [first, ..] if !first.starts_with("--") => Some(Command::Search {
            term: args.join(" "),
            show_all: false,
        }),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = parse_args(&args) else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };

    let mut postcode_config = PostcodeConfig::new();
    if let Ok(url) = std::env::var("POSTCODE_API_BASE_URL") {
        postcode_config = postcode_config.with_base_url(url);
    }
    let geocoder = match PostcodeClient::new(postcode_config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to create postcode client: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Offline mode: serve stations from a local file
    if let Ok(path) = std::env::var("GAUGE_FIXTURE") {
        return match FixtureStationSource::load(&path) {
            Ok(source) => run(source, geocoder, command).await,
            Err(e) => {
                eprintln!("Failed to load station fixture: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let mut api_config = GaugeApiConfig::new();
    if let Ok(url) = std::env::var("GAUGE_API_BASE_URL") {
        api_config = api_config.with_base_url(url);
    }
    match GaugeApiClient::new(api_config) {
        Ok(source) => run(source, geocoder, command).await,
        Err(e) => {
            eprintln!("Failed to create gauge API client: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run<S: StationSource, G: Geocoder>(source: S, geocoder: G, command: Command) -> ExitCode {
    let app = GaugeSearch::new(source, geocoder, SearchConfig::default());

    match command {
        Command::Search { term, show_all } => {
            let Some(outcome) = app.search_by(&term, show_all).await else {
                eprintln!("Search term is too short.");
                return ExitCode::FAILURE;
            };

            println!("{}", outcome.summary);
            print_stations(&outcome.displayed);
            if outcome.remainder > 0 {
                println!("  ... and {} more (use --all)", outcome.remainder);
            }
            ExitCode::SUCCESS
        }
        Command::Station(notation) => match app.station_with_id(&notation).await {
            Ok(Some(station)) => match serde_json::to_string_pretty(&station) {
                Ok(json) => {
                    println!("{json}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Failed to render station: {e}");
                    ExitCode::FAILURE
                }
            },
            Ok(None) => {
                eprintln!("No station with notation {notation}");
                ExitCode::FAILURE
            }
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        },
        Command::Near { centre, radius_km } => match app.stations_near(centre, radius_km).await {
            Ok(stations) => {
                println!("{} stations within {radius_km} km", stations.len());
                print_stations(&stations);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        },
        Command::Rivers => print_names(app.river_names().await),
        Command::Catchments => print_names(app.catchment_names().await),
    }
}

fn print_stations(stations: &[StationRecord]) {
    for station in stations {
        let river = station.river.as_deref().unwrap_or("-");
        println!("  {:<12} {:<40} {}", station.notation, station.label, river);
    }
}

fn print_names(names: Result<Vec<String>, gauge_search::stations::StationsError>) -> ExitCode {
    match names {
        Ok(names) => {
            for name in names {
                println!("{name}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

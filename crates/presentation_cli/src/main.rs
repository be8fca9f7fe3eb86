//! Mapbox CLI
//!
//! Command-line front end for the geocoding and directions clients.
//! The access token is read from `MAPBOX_TOKEN` (or `--token`).

#![allow(clippy::print_stdout)]

mod demo;
mod output;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use domain::{BoundingBox, Location};
use integration_mapbox::{
    BatchOptions, BatchQuery, DirectionsClient, DirectionsOptions, FeatureCollection,
    FeatureType, ForwardOptions, GeocodingClient, MapboxClient, MapboxConfig, MapboxDirections,
    MapboxError, MapboxGeocoder, ReverseOptions, RoutingProfile, StructuredInput,
    geocoding::types_to_string,
};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Mapbox CLI
#[derive(Parser)]
#[command(name = "mapbox-cli")]
#[command(author, version, about = "Mapbox geocoding and directions CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mapbox access token
    #[arg(long, env = "MAPBOX_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// TOML file with client settings (base_url, timeout_secs, user_agent)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Print raw JSON responses
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forward geocode free text
    ///
    /// Example: mapbox-cli forward "2 Lincoln Memorial Circle NW" --limit 1
    Forward {
        /// Text to search for
        place: String,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<u32>,

        /// Comma-separated ISO 3166 country codes
        #[arg(long)]
        country: Option<String>,

        /// Feature types to include, e.g. address,place
        #[arg(long, value_delimiter = ',')]
        types: Vec<FeatureType>,

        /// Result language
        #[arg(long)]
        language: Option<String>,

        /// Bias results towards lon,lat
        #[arg(long, allow_hyphen_values = true)]
        proximity: Option<Location>,

        /// Restrict results to west,south,east,north
        #[arg(long, allow_hyphen_values = true, value_parser = parse_bbox)]
        bbox: Option<BoundingBox>,

        /// Request results that may be stored permanently
        #[arg(long)]
        permanent: bool,
    },

    /// Forward geocode discrete address components
    Structured {
        #[arg(long)]
        address_line1: Option<String>,

        #[arg(long)]
        address_number: Option<String>,

        #[arg(long)]
        street: Option<String>,

        #[arg(long)]
        place: Option<String>,

        #[arg(long)]
        region: Option<String>,

        #[arg(long)]
        postcode: Option<String>,

        #[arg(long)]
        country: Option<String>,

        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Reverse geocode a coordinate
    ///
    /// Example: mapbox-cli reverse -- -77.036556 38.897708
    Reverse {
        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        #[arg(allow_negative_numbers = true)]
        latitude: f64,

        #[arg(short, long)]
        limit: Option<u32>,

        #[arg(long, value_delimiter = ',')]
        types: Vec<FeatureType>,

        #[arg(long)]
        country: Option<String>,

        #[arg(long)]
        language: Option<String>,
    },

    /// Forward geocode several places in one request
    Batch {
        /// Places to search for
        #[arg(required = true)]
        places: Vec<String>,

        #[arg(long, value_delimiter = ',')]
        types: Vec<FeatureType>,

        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Route between two or more lon,lat locations
    ///
    /// Example: mapbox-cli directions --profile cycling -- -122.42,37.78 -122.40,37.79
    Directions {
        /// Locations as lon,lat
        #[arg(required = true, num_args = 2.., allow_hyphen_values = true)]
        locations: Vec<Location>,

        /// driving-traffic, driving, walking or cycling
        #[arg(short, long, default_value = "driving")]
        profile: RoutingProfile,

        /// Include turn-by-turn instructions
        #[arg(long)]
        steps: bool,

        /// Include alternative routes
        #[arg(long)]
        alternatives: bool,
    },

    /// Walk through every geocoding feature with sample queries
    Demo,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Parse `west,south,east,north`
fn parse_bbox(value: &str) -> Result<BoundingBox, String> {
    let parts = value
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid number in bounding box: {e}"))?;

    let edges: [f64; 4] = parts
        .try_into()
        .map_err(|_| "bounding box needs exactly four values".to_string())?;

    BoundingBox::try_from(edges).map_err(|e| e.to_string())
}

/// Read the client configuration, applying the `--base-url` override
fn load_config(path: Option<&Path>, base_url: Option<String>) -> anyhow::Result<MapboxConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            toml::from_str::<MapboxConfig>(&raw)
                .with_context(|| format!("parsing config file {}", path.display()))?
        },
        None => MapboxConfig::default(),
    };

    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }

    config.validate().map_err(anyhow::Error::msg)?;
    Ok(config)
}

fn non_empty_types(types: &[FeatureType]) -> Option<String> {
    (!types.is_empty()).then(|| types_to_string(types))
}

fn print_collection(collection: &FeatureCollection, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(collection)?);
    } else {
        println!("📍 {} result(s):", collection.len());
        println!("{}", output::format_collection(collection));
    }
    Ok(())
}

#[tokio::main]
#[allow(clippy::too_many_lines)]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config(cli.config.as_deref(), cli.base_url)?;
    debug!(base_url = %config.base_url, "Loaded client configuration");

    let client = match MapboxClient::new(cli.token.unwrap_or_default(), &config) {
        Err(MapboxError::MissingToken) => {
            anyhow::bail!("MAPBOX_TOKEN environment variable (or --token) is required")
        },
        other => other?,
    };

    let geocoder = MapboxGeocoder::new(client.clone());

    match cli.command {
        Commands::Forward {
            place,
            limit,
            country,
            types,
            language,
            proximity,
            bbox,
            permanent,
        } => {
            let opts = ForwardOptions {
                country,
                proximity: proximity.map(|p| p.to_string()),
                types: non_empty_types(&types),
                bbox: bbox.map(|b| b.to_string()),
                limit,
                language,
                permanent,
                ..Default::default()
            };
            let result = geocoder.forward(&place, opts).await?;
            print_collection(&result, cli.json)?;
        },

        Commands::Structured {
            address_line1,
            address_number,
            street,
            place,
            region,
            postcode,
            country,
            limit,
        } => {
            let input = StructuredInput {
                address_line1,
                address_number,
                street,
                place,
                region,
                postcode,
                country,
                limit,
                ..Default::default()
            };
            let result = geocoder.forward_structured(input).await?;
            print_collection(&result, cli.json)?;
        },

        Commands::Reverse {
            longitude,
            latitude,
            limit,
            types,
            country,
            language,
        } => {
            let location = Location::new(longitude, latitude)?;
            let opts = ReverseOptions {
                types: non_empty_types(&types),
                limit,
                country,
                language,
                ..Default::default()
            };
            let result = geocoder.reverse(location, opts).await?;
            print_collection(&result, cli.json)?;
        },

        Commands::Batch {
            places,
            types,
            limit,
        } => {
            let queries: Vec<BatchQuery> = places
                .iter()
                .map(|place| BatchQuery {
                    limit,
                    ..BatchQuery::forward(place.as_str()).with_types(&types)
                })
                .collect();

            let results = geocoder.batch(&queries, BatchOptions::default()).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                for (place, collection) in places.iter().zip(&results) {
                    println!("🔎 {place}");
                    println!("{}", output::format_collection(collection));
                }
            }
        },

        Commands::Directions {
            locations,
            profile,
            steps,
            alternatives,
        } => {
            let directions = MapboxDirections::new(client);
            let opts = DirectionsOptions {
                steps: steps.then_some(true),
                alternatives: alternatives.then_some(true),
                ..Default::default()
            };

            let response = directions
                .get_directions(&locations, profile, opts)
                .await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("🧭 Directions ({profile}):");
                println!("{}", output::format_directions(&response));
            }
        },

        Commands::Demo => {
            demo::run(&geocoder).await;
        },
    }

    Ok(())
}

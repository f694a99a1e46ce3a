use anyhow::{Context, anyhow};
use clap::{ArgAction, Parser, Subcommand};
use inquire::{Select, Text};
use weatherwise_core::{
    Config, ForecastRequest, Language, SnapshotCache, Timeframe, WeatherObservation,
    WeatherProvider, WeatherStateTable, check_alerts, classify_observation, generate_forecast,
    provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weatherwise",
    version,
    about = "Weather states, likely transitions and what to wear"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pick a default location, timeframe and language interactively.
    Configure,

    /// Classify the current weather and list likely transitions.
    Forecast {
        /// Search for a city instead of using the configured location.
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        city: Option<String>,

        /// Latitude in decimal degrees.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude in decimal degrees.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// "hourly" or "daily"; defaults to the configured timeframe.
        #[arg(long)]
        timeframe: Option<Timeframe>,

        /// Use the last cached snapshot instead of the network.
        #[arg(long)]
        offline: bool,
    },

    /// Classify a single observation without fetching anything.
    Classify {
        /// WMO weather code.
        #[arg(long)]
        code: i32,

        /// Temperature in °C.
        #[arg(long, allow_negative_numbers = true)]
        temp: f64,

        /// Relative humidity in %.
        #[arg(long, default_value_t = 50.0)]
        humidity: f64,

        /// Wind speed in km/h.
        #[arg(long, default_value_t = 0.0)]
        wind: f64,

        /// Precipitation in mm.
        #[arg(long, default_value_t = 0.0)]
        precip: f64,

        /// Precipitation probability in %.
        #[arg(long, default_value_t = 0.0)]
        precip_prob: f64,
    },

    /// List all weather states and their transitions.
    States,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure().await,
            Command::Forecast {
                city,
                lat,
                lon,
                timeframe,
                offline,
            } => forecast(city, lat.zip(lon), timeframe, offline).await,
            Command::Classify {
                code,
                temp,
                humidity,
                wind,
                precip,
                precip_prob,
            } => {
                let state = classify_observation(&WeatherObservation {
                    weather_code: code,
                    temperature: temp,
                    humidity,
                    wind_speed: wind,
                    precipitation: precip,
                    precipitation_probability: precip_prob,
                });
                println!("{}", render::state_line(&state));
                Ok(())
            }
            Command::States => {
                print!("{}", render::table(WeatherStateTable::builtin()));
                Ok(())
            }
        }
    }
}

async fn resolve_request(
    provider: &dyn WeatherProvider,
    config: &Config,
    city: Option<String>,
    coords: Option<(f64, f64)>,
) -> anyhow::Result<ForecastRequest> {
    if let Some(city) = city {
        let results = provider
            .search_locations(&city)
            .await
            .with_context(|| format!("Failed to look up '{city}'"))?;
        let first = results
            .first()
            .ok_or_else(|| anyhow!("No location found for '{city}'."))?;
        return Ok(first.to_request());
    }

    if let Some((lat, lon)) = coords {
        return Ok(ForecastRequest::new(lat, lon, None));
    }

    config.default_request()
}

async fn forecast(
    city: Option<String>,
    coords: Option<(f64, f64)>,
    timeframe: Option<Timeframe>,
    offline: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let timeframe = timeframe.unwrap_or(config.timeframe);
    let cache = SnapshotCache::from_project_dirs()?;

    if offline {
        let cached = cache.load().ok_or_else(|| {
            anyhow!(
                "No cached forecast available.\n\
                 Hint: run `weatherwise forecast` while online first."
            )
        })?;

        let result = generate_forecast(&cached.snapshot, timeframe);
        println!(
            "{}",
            render::forecast(
                &cached.location_name,
                &cached.snapshot.current,
                &result,
                &check_alerts(&cached.snapshot),
                config.language,
                Some(cached.fetched_at),
            )
        );
        return Ok(());
    }

    let provider = provider_from_config(&config)?;
    let request = resolve_request(provider.as_ref(), &config, city, coords).await?;
    let location = request.display_name();

    let snapshot = provider.fetch_snapshot(&request).await?;
    cache.store(&snapshot, &location);

    let result = generate_forecast(&snapshot, timeframe);
    let alerts = check_alerts(&snapshot);
    println!(
        "{}",
        render::forecast(
            &location,
            &snapshot.current,
            &result,
            &alerts,
            config.language,
            None,
        )
    );
    Ok(())
}

async fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let query = Text::new("City name:").prompt()?;
    let results = provider.search_locations(&query).await?;
    if results.is_empty() {
        return Err(anyhow!("No location found for '{query}'."));
    }

    let location = Select::new("Choose a location:", results).prompt()?;
    config.set_default_location(&location);

    config.timeframe = Select::new("Default timeframe:", Timeframe::all().to_vec()).prompt()?;
    config.language = Select::new("Language:", Language::all().to_vec()).prompt()?;

    config.save()?;
    println!(
        "Saved {} to {}",
        location.label(),
        Config::config_file_path()?.display()
    );
    Ok(())
}

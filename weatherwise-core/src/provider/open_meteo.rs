use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::model::{
    CurrentConditions, DailySlice, ForecastRequest, GeoLocation, HourlySlice, WeatherSnapshot,
};

use super::{WeatherProvider, searchable_query};

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,precipitation,wind_speed_10m,weather_code,apparent_temperature,uv_index";
const HOURLY_FIELDS: &str = "temperature_2m,precipitation_probability,precipitation,weather_code,wind_speed_10m,relative_humidity_2m,uv_index";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum,weather_code,wind_speed_10m_max,sunrise,sunset";

const GEOCODING_RESULTS: &str = "5";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Open-Meteo uses ISO-8601 local times without seconds.
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Forecast and geocoding client for the free Open-Meteo API (no key needed).
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    forecast_url: String,
    geocoding_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new() -> Result<Self> {
        Self::with_base_urls(DEFAULT_FORECAST_URL, DEFAULT_GEOCODING_URL)
    }

    pub fn with_base_urls(
        forecast_url: impl Into<String>,
        geocoding_url: impl Into<String>,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client for Open-Meteo")?;

        Ok(Self {
            forecast_url: forecast_url.into(),
            geocoding_url: geocoding_url.into(),
            http,
        })
    }

    async fn get_body(&self, url: &str, query: &[(&str, &str)], what: &str) -> Result<String> {
        tracing::debug!(url, what, "sending Open-Meteo request");

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send request to Open-Meteo ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read Open-Meteo {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo {} request failed with status {}: {}",
                what,
                status,
                truncate_body(&body),
            ));
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    wind_speed_10m: f64,
    precipitation: f64,
    weather_code: i32,
    apparent_temperature: Option<f64>,
    uv_index: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OmHourly {
    time: Vec<String>,
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_probability: Vec<Option<f64>>,
    #[serde(default)]
    precipitation: Vec<Option<f64>>,
    #[serde(default)]
    weather_code: Vec<Option<i32>>,
    #[serde(default)]
    wind_speed_10m: Vec<Option<f64>>,
    #[serde(default)]
    relative_humidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    uv_index: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<String>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    weather_code: Vec<Option<i32>>,
    #[serde(default)]
    wind_speed_10m_max: Vec<Option<f64>>,
    #[serde(default)]
    sunrise: Vec<Option<String>>,
    #[serde(default)]
    sunset: Vec<Option<String>>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    timezone: String,
    current: Option<OmCurrent>,
    hourly: Option<OmHourly>,
    daily: Option<OmDaily>,
}

#[derive(Debug, Deserialize)]
struct OmGeoResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    admin1: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmGeoResponse {
    // absent when nothing matched
    results: Option<Vec<OmGeoResult>>,
}

/// Column `i` of a per-field array, tolerating short arrays.
fn at<T: Copy>(values: &[Option<T>], i: usize) -> Option<T> {
    values.get(i).copied().flatten()
}

fn parse_time(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIME_FORMAT)
        .with_context(|| format!("Invalid Open-Meteo timestamp '{value}'"))
}

fn hourly_slices(hourly: &OmHourly) -> Result<Vec<HourlySlice>> {
    hourly
        .time
        .iter()
        .enumerate()
        .map(|(i, time)| {
            Ok(HourlySlice {
                time: parse_time(time)?,
                temperature: at(&hourly.temperature_2m, i),
                precipitation_probability: at(&hourly.precipitation_probability, i),
                precipitation: at(&hourly.precipitation, i),
                weather_code: at(&hourly.weather_code, i),
                wind_speed: at(&hourly.wind_speed_10m, i),
                humidity: at(&hourly.relative_humidity_2m, i),
                uv_index: at(&hourly.uv_index, i),
            })
        })
        .collect()
}

fn daily_slices(daily: &OmDaily) -> Result<Vec<DailySlice>> {
    let optional_time = |values: &[Option<String>], i: usize| -> Result<Option<NaiveDateTime>> {
        values
            .get(i)
            .and_then(Option::as_deref)
            .map(parse_time)
            .transpose()
    };

    daily
        .time
        .iter()
        .enumerate()
        .map(|(i, date)| {
            Ok(DailySlice {
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .with_context(|| format!("Invalid Open-Meteo date '{date}'"))?,
                temperature_max: at(&daily.temperature_2m_max, i),
                temperature_min: at(&daily.temperature_2m_min, i),
                precipitation_sum: at(&daily.precipitation_sum, i),
                weather_code: at(&daily.weather_code, i),
                wind_speed_max: at(&daily.wind_speed_10m_max, i),
                sunrise: optional_time(&daily.sunrise, i)?,
                sunset: optional_time(&daily.sunset, i)?,
            })
        })
        .collect()
}

fn into_snapshot(parsed: OmForecastResponse) -> Result<WeatherSnapshot> {
    let (Some(current), Some(hourly), Some(daily)) = (parsed.current, parsed.hourly, parsed.daily)
    else {
        return Err(anyhow!("Invalid weather data received"));
    };

    let hourly = hourly_slices(&hourly)?;
    let daily = daily_slices(&daily)?;

    // Open-Meteo has no current precipitation probability; use the first hour.
    let precipitation_probability = hourly
        .first()
        .and_then(|h| h.precipitation_probability)
        .unwrap_or(0.0);

    Ok(WeatherSnapshot {
        latitude: parsed.latitude,
        longitude: parsed.longitude,
        timezone: parsed.timezone,
        current: CurrentConditions {
            temperature: current.temperature_2m,
            apparent_temperature: current.apparent_temperature,
            humidity: current.relative_humidity_2m,
            wind_speed: current.wind_speed_10m,
            precipitation: current.precipitation,
            precipitation_probability,
            weather_code: current.weather_code,
            uv_index: current.uv_index,
        },
        hourly,
        daily,
    })
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn fetch_snapshot(&self, request: &ForecastRequest) -> Result<WeatherSnapshot> {
        let latitude = request.latitude.to_string();
        let longitude = request.longitude.to_string();

        let body = self
            .get_body(
                &self.forecast_url,
                &[
                    ("latitude", latitude.as_str()),
                    ("longitude", longitude.as_str()),
                    ("current", CURRENT_FIELDS),
                    ("hourly", HOURLY_FIELDS),
                    ("daily", DAILY_FIELDS),
                    ("timezone", "auto"),
                    ("forecast_days", "7"),
                    ("forecast_hours", "24"),
                ],
                "forecast",
            )
            .await?;

        let parsed: OmForecastResponse =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo forecast JSON")?;

        let snapshot = into_snapshot(parsed)?;
        tracing::info!(
            location = %request.display_name(),
            hourly = snapshot.hourly.len(),
            daily = snapshot.daily.len(),
            "forecast fetched"
        );
        Ok(snapshot)
    }

    async fn search_locations(&self, query: &str) -> Result<Vec<GeoLocation>> {
        let Some(name) = searchable_query(query) else {
            tracing::debug!(query, "geocoding query too short, skipping request");
            return Ok(Vec::new());
        };

        let body = self
            .get_body(
                &self.geocoding_url,
                &[
                    ("name", name.as_str()),
                    ("count", GEOCODING_RESULTS),
                    ("language", "en"),
                    ("format", "json"),
                ],
                "geocoding",
            )
            .await?;

        let parsed: OmGeoResponse =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo geocoding JSON")?;

        Ok(parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .map(|r| GeoLocation {
                name: r.name,
                latitude: r.latitude,
                longitude: r.longitude,
                country: r.country,
                admin1: r.admin1,
            })
            .collect())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

use crate::{
    Config, ForecastRequest, GeoLocation, WeatherSnapshot,
    provider::open_meteo::OpenMeteoProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

/// Queries shorter than this are not sent to the geocoder.
pub const MIN_QUERY_LEN: usize = 2;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch current conditions plus hourly and daily series for a location.
    async fn fetch_snapshot(&self, request: &ForecastRequest) -> anyhow::Result<WeatherSnapshot>;

    /// Look up locations by name.
    async fn search_locations(&self, query: &str) -> anyhow::Result<Vec<GeoLocation>>;
}

/// Construct the provider described by config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = OpenMeteoProvider::with_base_urls(
        config.open_meteo.forecast_url(),
        config.open_meteo.geocoding_url(),
    )?;

    Ok(Box::new(provider))
}

/// Strip characters that have no place in a place name and trim whitespace.
pub fn sanitize_query(query: &str) -> String {
    query
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '\'' | '&'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// The sanitized query, or `None` when it should not be searched at all.
pub fn searchable_query(query: &str) -> Option<String> {
    if query.chars().count() < MIN_QUERY_LEN {
        return None;
    }
    let sanitized = sanitize_query(query);
    if sanitized.is_empty() { None } else { Some(sanitized) }
}

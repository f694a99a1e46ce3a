use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::classify::WeatherObservation;

/// Where to fetch a forecast for.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: Option<String>,
}

impl ForecastRequest {
    pub fn new(latitude: f64, longitude: f64, location_name: Option<String>) -> Self {
        Self {
            latitude,
            longitude,
            location_name,
        }
    }

    /// Location name, or the coordinates when no name is known.
    pub fn display_name(&self) -> String {
        match &self.location_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("{:.2}, {:.2}", self.latitude, self.longitude),
        }
    }
}

/// A geocoding search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
    /// First-level administrative area (state, region).
    pub admin1: Option<String>,
}

impl GeoLocation {
    /// Short label used as the location name, e.g. "Berlin, Land Berlin".
    pub fn label(&self) -> String {
        match &self.admin1 {
            Some(admin1) => format!("{}, {}", self.name, admin1),
            None => self.name.clone(),
        }
    }

    pub fn to_request(&self) -> ForecastRequest {
        ForecastRequest::new(self.latitude, self.longitude, Some(self.label()))
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())?;
        if let Some(country) = &self.country {
            write!(f, " ({country})")?;
        }
        write!(f, " [{:.2}, {:.2}]", self.latitude, self.longitude)
    }
}

/// Conditions at fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// °C
    pub temperature: f64,
    pub apparent_temperature: Option<f64>,
    /// Relative humidity, %.
    pub humidity: f64,
    /// km/h
    pub wind_speed: f64,
    /// mm
    pub precipitation: f64,
    /// %
    pub precipitation_probability: f64,
    /// WMO code.
    pub weather_code: i32,
    pub uv_index: Option<f64>,
}

impl CurrentConditions {
    pub fn observation(&self) -> WeatherObservation {
        WeatherObservation {
            weather_code: self.weather_code,
            temperature: self.temperature,
            humidity: self.humidity,
            wind_speed: self.wind_speed,
            precipitation: self.precipitation,
            precipitation_probability: self.precipitation_probability,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySlice {
    pub time: NaiveDateTime,
    pub temperature: Option<f64>,
    pub precipitation_probability: Option<f64>,
    pub precipitation: Option<f64>,
    pub weather_code: Option<i32>,
    pub wind_speed: Option<f64>,
    pub humidity: Option<f64>,
    pub uv_index: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySlice {
    pub date: NaiveDate,
    pub temperature_max: Option<f64>,
    pub temperature_min: Option<f64>,
    pub precipitation_sum: Option<f64>,
    pub weather_code: Option<i32>,
    pub wind_speed_max: Option<f64>,
    pub sunrise: Option<NaiveDateTime>,
    pub sunset: Option<NaiveDateTime>,
}

/// Fully materialised forecast data for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub current: CurrentConditions,
    pub hourly: Vec<HourlySlice>,
    pub daily: Vec<DailySlice>,
}

//! Threshold alerts over a fetched snapshot.
//!
//! UV is read from the current conditions; every other check scans the whole
//! hourly series and fires once if any hour crosses its threshold. Missing
//! hourly values never trigger an alert.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{HourlySlice, WeatherSnapshot};

pub const UV_THRESHOLD: f64 = 7.0;
/// mm per hour.
pub const HEAVY_RAIN_THRESHOLD: f64 = 5.0;
/// °C
pub const HIGH_TEMPERATURE_THRESHOLD: f64 = 32.0;
/// °C
pub const LOW_TEMPERATURE_THRESHOLD: f64 = -5.0;
/// km/h
pub const STRONG_WIND_THRESHOLD: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Uv,
    Rain,
    TempHigh,
    TempLow,
    Wind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherAlert {
    pub kind: AlertKind,
    pub message: &'static str,
    pub severity: Severity,
}

impl WeatherAlert {
    const fn new(kind: AlertKind, message: &'static str, severity: Severity) -> Self {
        Self {
            kind,
            message,
            severity,
        }
    }
}

fn any_hour(
    hourly: &[HourlySlice],
    field: fn(&HourlySlice) -> Option<f64>,
    hit: impl Fn(f64) -> bool,
) -> bool {
    hourly.iter().filter_map(field).any(hit)
}

/// Alerts raised by `snapshot`, in a fixed order: UV, rain, heat, cold, wind.
pub fn check_alerts(snapshot: &WeatherSnapshot) -> Vec<WeatherAlert> {
    let hourly = snapshot.hourly.as_slice();
    let mut alerts = Vec::new();

    if snapshot
        .current
        .uv_index
        .is_some_and(|uv| uv >= UV_THRESHOLD)
    {
        alerts.push(WeatherAlert::new(
            AlertKind::Uv,
            "High UV index! Take sun protection.",
            Severity::Warning,
        ));
    }

    if any_hour(hourly, |h| h.precipitation, |mm| mm >= HEAVY_RAIN_THRESHOLD) {
        alerts.push(WeatherAlert::new(
            AlertKind::Rain,
            "Heavy rain expected today.",
            Severity::Info,
        ));
    }

    if any_hour(hourly, |h| h.temperature, |t| t >= HIGH_TEMPERATURE_THRESHOLD) {
        alerts.push(WeatherAlert::new(
            AlertKind::TempHigh,
            "Very hot temperatures expected.",
            Severity::Danger,
        ));
    }

    if any_hour(hourly, |h| h.temperature, |t| t <= LOW_TEMPERATURE_THRESHOLD) {
        alerts.push(WeatherAlert::new(
            AlertKind::TempLow,
            "Very cold temperatures expected.",
            Severity::Danger,
        ));
    }

    if any_hour(hourly, |h| h.wind_speed, |w| w >= STRONG_WIND_THRESHOLD) {
        alerts.push(WeatherAlert::new(
            AlertKind::Wind,
            "Strong winds expected.",
            Severity::Info,
        ));
    }

    if !alerts.is_empty() {
        tracing::debug!(count = alerts.len(), "weather alerts raised");
    }
    alerts
}

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{
    classify::classify_with,
    model::WeatherSnapshot,
    state::WeatherState,
    table::WeatherStateTable,
    transition::{ForecastSeries, WeatherTransition, compute_transitions},
};

/// Hourly entries considered in hourly mode.
pub const HOURLY_WINDOW: usize = 6;
/// Daily entries considered in daily mode.
pub const DAILY_WINDOW: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Hourly,
    #[default]
    Daily,
}

impl Timeframe {
    pub const fn all() -> &'static [Timeframe] {
        &[Timeframe::Hourly, Timeframe::Daily]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Hourly => "hourly",
            Timeframe::Daily => "daily",
        }
    }

    /// Human label attached to a forecast.
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Hourly => "Next 6 hours",
            Timeframe::Daily => "Next 7 days",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown timeframe '{0}' (expected 'hourly' or 'daily')")]
pub struct ParseTimeframeError(String);

impl FromStr for Timeframe {
    type Err = ParseTimeframeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "hourly" => Ok(Timeframe::Hourly),
            "daily" => Ok(Timeframe::Daily),
            _ => Err(ParseTimeframeError(value.to_string())),
        }
    }
}

/// Current state plus its ranked successors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionForecast {
    pub current_state: WeatherState,
    pub transitions: Vec<WeatherTransition>,
    pub timeframe: String,
}

/// Classify the snapshot's current conditions and rank transitions against
/// the built-in table.
pub fn generate_forecast(snapshot: &WeatherSnapshot, timeframe: Timeframe) -> TransitionForecast {
    generate_forecast_with(WeatherStateTable::builtin(), snapshot, timeframe)
}

pub fn generate_forecast_with(
    table: &WeatherStateTable,
    snapshot: &WeatherSnapshot,
    timeframe: Timeframe,
) -> TransitionForecast {
    let current_state = classify_with(table, &snapshot.current.observation());

    let series = match timeframe {
        Timeframe::Hourly => {
            let end = snapshot.hourly.len().min(HOURLY_WINDOW);
            ForecastSeries::Hourly(&snapshot.hourly[..end])
        }
        Timeframe::Daily => {
            let end = snapshot.daily.len().min(DAILY_WINDOW);
            ForecastSeries::Daily(&snapshot.daily[..end])
        }
    };

    let transitions = compute_transitions(table, &current_state, series);

    TransitionForecast {
        current_state,
        transitions,
        timeframe: timeframe.label().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_timeframe() {
        assert_eq!("hourly".parse::<Timeframe>(), Ok(Timeframe::Hourly));
        assert_eq!("Daily".parse::<Timeframe>(), Ok(Timeframe::Daily));

        let err = "weekly".parse::<Timeframe>().unwrap_err();
        assert!(err.to_string().contains("unknown timeframe 'weekly'"));
    }

    #[test]
    fn timeframe_roundtrip_and_labels() {
        for tf in Timeframe::all() {
            assert_eq!(tf.as_str().parse::<Timeframe>().unwrap(), *tf);
        }
        assert_eq!(Timeframe::Hourly.label(), "Next 6 hours");
        assert_eq!(Timeframe::Daily.label(), "Next 7 days");
        assert_eq!(Timeframe::default(), Timeframe::Daily);
    }

    #[test]
    fn timeframe_serde_is_lowercase() {
        let json = serde_json::to_string(&Timeframe::Hourly).unwrap();
        assert_eq!(json, "\"hourly\"");
    }
}

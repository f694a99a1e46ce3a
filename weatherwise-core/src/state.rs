use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt, str::FromStr};

use crate::error::UnknownStateName;

/// The closed set of coarse weather states.
///
/// The string form (see [`StateName::as_str`]) is what the state table and
/// serialized output use, e.g. `Hot_Sunny`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StateName {
    Heatwave,
    #[serde(rename = "Hot_Sunny")]
    HotSunny,
    Sunny,
    Mild,
    Cloudy,
    Showery,
    Rainy,
    Stormy,
    Windy,
    Foggy,
    Cold,
    Freezing,
    Snowy,
    Humid,
    Dry,
}

impl StateName {
    pub const ALL: [StateName; 15] = [
        StateName::Heatwave,
        StateName::HotSunny,
        StateName::Sunny,
        StateName::Mild,
        StateName::Cloudy,
        StateName::Showery,
        StateName::Rainy,
        StateName::Stormy,
        StateName::Windy,
        StateName::Foggy,
        StateName::Cold,
        StateName::Freezing,
        StateName::Snowy,
        StateName::Humid,
        StateName::Dry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StateName::Heatwave => "Heatwave",
            StateName::HotSunny => "Hot_Sunny",
            StateName::Sunny => "Sunny",
            StateName::Mild => "Mild",
            StateName::Cloudy => "Cloudy",
            StateName::Showery => "Showery",
            StateName::Rainy => "Rainy",
            StateName::Stormy => "Stormy",
            StateName::Windy => "Windy",
            StateName::Foggy => "Foggy",
            StateName::Cold => "Cold",
            StateName::Freezing => "Freezing",
            StateName::Snowy => "Snowy",
            StateName::Humid => "Humid",
            StateName::Dry => "Dry",
        }
    }

    /// Icon shown next to the state in terminal output.
    pub fn emoji(&self) -> &'static str {
        match self {
            StateName::Heatwave => "🔥",
            StateName::HotSunny => "☀️",
            StateName::Sunny => "🌞",
            StateName::Mild => "🌤️",
            StateName::Cloudy => "☁️",
            StateName::Showery => "🌦️",
            StateName::Rainy => "🌧️",
            StateName::Stormy => "⛈️",
            StateName::Windy => "💨",
            StateName::Foggy => "🌫️",
            StateName::Cold => "🥶",
            StateName::Freezing => "🧊",
            StateName::Snowy => "❄️",
            StateName::Humid => "💧",
            StateName::Dry => "🏜️",
        }
    }
}

impl fmt::Display for StateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for StateName {
    type Err = UnknownStateName;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        StateName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == value)
            .ok_or_else(|| UnknownStateName(value.to_string()))
    }
}

impl TryFrom<&str> for StateName {
    type Error = UnknownStateName;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A classified weather state. Recomputed for every new observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherState {
    pub name: StateName,
    pub description: String,
    /// Classifier confidence in `[0, 1]`.
    pub confidence: f64,
}

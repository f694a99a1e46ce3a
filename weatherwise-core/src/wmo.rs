//! WMO 4677 weather code descriptions, as used by Open-Meteo.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    De,
}

impl Language {
    pub const fn all() -> &'static [Language] {
        &[Language::En, Language::De]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "de" => Ok(Language::De),
            _ => Err(anyhow::anyhow!(
                "Unknown language '{value}'. Supported languages: en, de."
            )),
        }
    }
}

/// Description of a WMO code, or `"Unknown"`.
pub fn wmo_description(code: i32, language: Language) -> &'static str {
    match language {
        Language::En => english(code),
        Language::De => german(code),
    }
}

fn english(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Heavy freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snowfall",
        73 => "Moderate snowfall",
        75 => "Heavy snowfall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

fn german(code: i32) -> &'static str {
    match code {
        0 => "Klarer Himmel",
        1 => "Überwiegend klar",
        2 => "Teilweise bewölkt",
        3 => "Bedeckt",
        45 => "Nebel",
        48 => "Reifnebel / Nebel mit Raureifablagerung",
        51 => "Leichter Nieselregen",
        53 => "Mäßiger Nieselregen",
        55 => "Starker Nieselregen",
        56 => "Leichter gefrierender Nieselregen",
        57 => "Starker gefrierender Nieselregen",
        61 => "Leichter Regen",
        63 => "Mäßiger Regen",
        65 => "Starker Regen",
        66 => "Leichter gefrierender Regen",
        67 => "Starker gefrierender Regen",
        71 => "Leichter Schneefall",
        73 => "Mäßiger Schneefall",
        75 => "Starker Schneefall",
        77 => "Schneekörner / Schneegriesel",
        80 => "Leichte Regenschauer",
        81 => "Mäßige Regenschauer",
        82 => "Heftige Regenschauer",
        85 => "Leichte Schneeschauer",
        86 => "Starke Schneeschauer",
        95 => "Gewitter",
        96 => "Gewitter mit leichtem Hagel",
        99 => "Gewitter mit schwerem Hagel",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_descriptions() {
        assert_eq!(wmo_description(0, Language::En), "Clear sky");
        assert_eq!(wmo_description(82, Language::En), "Violent rain showers");
        assert_eq!(wmo_description(99, Language::En), "Thunderstorm with heavy hail");
    }

    #[test]
    fn german_descriptions() {
        assert_eq!(wmo_description(3, Language::De), "Bedeckt");
        assert_eq!(wmo_description(45, Language::De), "Nebel");
    }

    #[test]
    fn unknown_codes() {
        assert_eq!(wmo_description(4, Language::En), "Unknown");
        assert_eq!(wmo_description(-1, Language::De), "Unknown");
    }

    #[test]
    fn language_parsing() {
        for lang in Language::all() {
            assert_eq!(lang.as_str().parse::<Language>().unwrap(), *lang);
        }
        let err = "fr".parse::<Language>().unwrap_err();
        assert!(err.to_string().contains("Unknown language"));
    }
}

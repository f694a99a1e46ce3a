//! Observation → weather state classification.
//!
//! Classification runs an ordered list of guarded rules over an accumulator
//! that starts at `Mild` / 0.8. Every rule whose guard holds overwrites the
//! accumulator, so later rules win:
//!
//! 1. temperature tier
//! 2. WMO weather code
//! 3. wind
//! 4. humidity
//! 5. dryness
//!
//! Inputs are not validated. Comparisons against NaN are false, so a NaN
//! simply skips the rules that depend on it.

use serde::{Deserialize, Serialize};

use crate::{
    state::{StateName, WeatherState},
    table::WeatherStateTable,
};

/// Description used when the table has no entry for the classified state.
pub const UNKNOWN_DESCRIPTION: &str = "Unknown weather condition";

/// Raw numeric input to the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub weather_code: i32,
    /// °C
    pub temperature: f64,
    /// Relative humidity, %.
    pub humidity: f64,
    /// km/h
    pub wind_speed: f64,
    /// mm
    pub precipitation: f64,
    /// %
    pub precipitation_probability: f64,
}

/// Accumulator threaded through the rule pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Classification {
    pub state: StateName,
    pub confidence: f64,
}

impl Classification {
    pub(crate) const DEFAULT: Classification = Classification {
        state: StateName::Mild,
        confidence: 0.8,
    };

    fn set(&mut self, state: StateName, confidence: f64) {
        self.state = state;
        self.confidence = confidence;
    }
}

/// A guarded rule. Returns `true` when its guard held and it rewrote the accumulator.
type Rule = fn(&WeatherObservation, &mut Classification) -> bool;

const RULES: [(&str, Rule); 5] = [
    ("temperature", temperature_tier),
    ("weather_code", weather_code),
    ("wind", wind),
    ("humidity", humidity),
    ("dryness", dryness),
];

fn temperature_tier(obs: &WeatherObservation, acc: &mut Classification) -> bool {
    let t = obs.temperature;
    if t > 35.0 {
        acc.set(StateName::Heatwave, 0.9);
    } else if t > 25.0 {
        acc.set(StateName::HotSunny, 0.8);
    } else if t < 0.0 {
        acc.set(StateName::Freezing, 0.9);
    } else if t < 10.0 {
        acc.set(StateName::Cold, 0.8);
    } else if (10.0..=20.0).contains(&t) {
        acc.set(StateName::Mild, 0.7);
    } else if t > 20.0 && t <= 25.0 {
        acc.set(StateName::Sunny, 0.7);
    } else {
        return false;
    }
    true
}

/// Clear-sky tiers shared by codes 0..=2.
fn clear_sky_state(temperature: f64) -> StateName {
    if temperature > 25.0 {
        StateName::HotSunny
    } else if temperature >= 15.0 {
        StateName::Sunny
    } else {
        StateName::Mild
    }
}

fn weather_code(obs: &WeatherObservation, acc: &mut Classification) -> bool {
    let (state, confidence) = match obs.weather_code {
        0 => (clear_sky_state(obs.temperature), 0.9),
        1 | 2 => (clear_sky_state(obs.temperature), 0.8),
        3 => (StateName::Cloudy, 0.9),
        45 | 48 => (StateName::Foggy, 0.9),
        // drizzle, freezing drizzle, light and moderate showers
        51 | 53 | 55 | 56 | 57 | 80 | 81 => (StateName::Showery, 0.8),
        // rain, freezing rain, violent showers
        61 | 63 | 65 | 66 | 67 | 82 => (StateName::Rainy, 0.9),
        71 | 73 | 75 | 77 | 85 | 86 => (StateName::Snowy, 0.9),
        95 | 96 | 99 => (StateName::Stormy, 0.9),
        _ => return false,
    };
    acc.set(state, confidence);
    true
}

fn wind(obs: &WeatherObservation, acc: &mut Classification) -> bool {
    if obs.wind_speed > 20.0 && acc.state != StateName::Stormy {
        acc.set(StateName::Windy, f64::max(0.7, acc.confidence - 0.1));
        return true;
    }
    false
}

fn humidity(obs: &WeatherObservation, acc: &mut Classification) -> bool {
    let wet = matches!(
        acc.state,
        StateName::Rainy | StateName::Showery | StateName::Stormy
    );
    if obs.humidity > 80.0 && obs.temperature > 20.0 && !wet {
        acc.set(StateName::Humid, f64::max(0.6, acc.confidence - 0.2));
        return true;
    }
    false
}

fn dryness(obs: &WeatherObservation, acc: &mut Classification) -> bool {
    if obs.humidity < 30.0 && obs.precipitation == 0.0 && obs.precipitation_probability < 10.0 {
        acc.set(StateName::Dry, f64::max(0.7, acc.confidence - 0.1));
        return true;
    }
    false
}

/// Run the rule pipeline without resolving a description.
pub(crate) fn classification(obs: &WeatherObservation) -> Classification {
    let mut acc = Classification::DEFAULT;
    for (rule_name, rule) in RULES {
        if rule(obs, &mut acc) {
            tracing::trace!(
                rule = rule_name,
                state = %acc.state,
                confidence = acc.confidence,
                "classification rule applied"
            );
        }
    }
    acc
}

/// Classify against an explicit table (used for the description lookup).
pub fn classify_with(table: &WeatherStateTable, obs: &WeatherObservation) -> WeatherState {
    let Classification { state, confidence } = classification(obs);
    let description = table
        .description(state)
        .unwrap_or(UNKNOWN_DESCRIPTION)
        .to_owned();

    tracing::debug!(state = %state, confidence, code = obs.weather_code, "observation classified");

    WeatherState {
        name: state,
        description,
        confidence,
    }
}

pub fn classify_observation(obs: &WeatherObservation) -> WeatherState {
    classify_with(WeatherStateTable::builtin(), obs)
}

/// Map raw observations to a weather state. Never fails; unmatched input
/// stays at `Mild` with confidence 0.8.
pub fn classify(
    weather_code: i32,
    temperature: f64,
    humidity: f64,
    wind_speed: f64,
    precipitation: f64,
    precipitation_probability: f64,
) -> WeatherState {
    classify_observation(&WeatherObservation {
        weather_code,
        temperature,
        humidity,
        wind_speed,
        precipitation,
        precipitation_probability,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_state(state: &WeatherState, name: StateName, confidence: f64) {
        assert_eq!(state.name, name, "unexpected state for {state:?}");
        assert!(
            (state.confidence - confidence).abs() < EPS,
            "expected confidence {confidence}, got {}",
            state.confidence
        );
    }

    #[test]
    fn heat_tier_with_unmatched_code() {
        for t in [35.1, 40.0, 52.3] {
            let s = classify(10, t, 50.0, 5.0, 0.0, 50.0);
            assert_state(&s, StateName::Heatwave, 0.9);
        }
    }

    #[test]
    fn temperature_tiers() {
        assert_state(&classify(10, 30.0, 50.0, 5.0, 1.0, 50.0), StateName::HotSunny, 0.8);
        assert_state(&classify(10, -5.0, 50.0, 5.0, 1.0, 50.0), StateName::Freezing, 0.9);
        assert_state(&classify(10, 5.0, 50.0, 5.0, 1.0, 50.0), StateName::Cold, 0.8);
        assert_state(&classify(10, 10.0, 50.0, 5.0, 1.0, 50.0), StateName::Mild, 0.7);
        assert_state(&classify(10, 20.0, 50.0, 5.0, 1.0, 50.0), StateName::Mild, 0.7);
        assert_state(&classify(10, 22.0, 50.0, 5.0, 1.0, 50.0), StateName::Sunny, 0.7);
        assert_state(&classify(10, 25.0, 50.0, 5.0, 1.0, 50.0), StateName::Sunny, 0.7);
    }

    #[test]
    fn clear_sky_hot() {
        assert_state(&classify(0, 30.0, 50.0, 5.0, 0.0, 0.0), StateName::HotSunny, 0.9);
    }

    #[test]
    fn clear_sky_tiers_ignore_base_tier() {
        // 40 °C would be Heatwave, but code 0 replaces it.
        assert_state(&classify(0, 40.0, 50.0, 5.0, 0.0, 50.0), StateName::HotSunny, 0.9);
        assert_state(&classify(0, 15.0, 50.0, 5.0, 0.0, 50.0), StateName::Sunny, 0.9);
        assert_state(&classify(0, 14.9, 50.0, 5.0, 0.0, 50.0), StateName::Mild, 0.9);
        assert_state(&classify(2, -3.0, 50.0, 5.0, 0.0, 50.0), StateName::Mild, 0.8);
        assert_state(&classify(1, 26.0, 50.0, 5.0, 0.0, 50.0), StateName::HotSunny, 0.8);
    }

    #[test]
    fn overcast() {
        assert_state(&classify(3, 18.0, 50.0, 5.0, 0.0, 0.0), StateName::Cloudy, 0.9);
    }

    #[test]
    fn code_groups() {
        for code in [45, 48] {
            assert_state(&classify(code, 12.0, 50.0, 5.0, 0.0, 50.0), StateName::Foggy, 0.9);
        }
        for code in [51, 53, 55, 56, 57, 80, 81] {
            assert_state(&classify(code, 12.0, 50.0, 5.0, 0.5, 50.0), StateName::Showery, 0.8);
        }
        for code in [61, 63, 65, 66, 67, 82] {
            assert_state(&classify(code, 12.0, 50.0, 5.0, 3.0, 90.0), StateName::Rainy, 0.9);
        }
        for code in [71, 73, 75, 77, 85, 86] {
            assert_state(&classify(code, -2.0, 50.0, 5.0, 3.0, 90.0), StateName::Snowy, 0.9);
        }
        for code in [95, 96, 99] {
            assert_state(&classify(code, 24.0, 50.0, 5.0, 9.0, 90.0), StateName::Stormy, 0.9);
        }
    }

    #[test]
    fn wind_overrides_clear_sky() {
        // 10 °C with code 0 lands on Mild (below the 15 °C tier), then wind wins.
        assert_state(&classify(0, 10.0, 50.0, 25.0, 0.0, 0.0), StateName::Windy, 0.8);
        assert_state(&classify(0, 17.0, 50.0, 25.0, 0.0, 0.0), StateName::Windy, 0.8);
    }

    #[test]
    fn wind_confidence_floor() {
        assert_state(&classify(10, 22.0, 50.0, 30.0, 1.0, 50.0), StateName::Windy, 0.7);
    }

    #[test]
    fn wind_does_not_override_storm() {
        assert_state(&classify(95, 18.0, 50.0, 60.0, 4.0, 90.0), StateName::Stormy, 0.9);
    }

    #[test]
    fn humid_override() {
        assert_state(&classify(1, 28.0, 85.0, 5.0, 0.0, 0.0), StateName::Humid, 0.6);
    }

    #[test]
    fn humid_skips_wet_states() {
        assert_state(&classify(61, 24.0, 95.0, 5.0, 2.0, 80.0), StateName::Rainy, 0.9);
        assert_state(&classify(80, 24.0, 95.0, 5.0, 2.0, 80.0), StateName::Showery, 0.8);
    }

    #[test]
    fn humid_after_wind() {
        // Windy (0.8) is not a wet state, so humidity still takes over.
        assert_state(&classify(0, 26.0, 90.0, 30.0, 0.0, 0.0), StateName::Humid, 0.6);
    }

    #[test]
    fn dry_override() {
        assert_state(&classify(0, 22.0, 20.0, 5.0, 0.0, 5.0), StateName::Dry, 0.8);
    }

    #[test]
    fn dry_requires_all_conditions() {
        assert_eq!(classify(0, 22.0, 20.0, 5.0, 0.1, 5.0).name, StateName::Sunny);
        assert_eq!(classify(0, 22.0, 20.0, 5.0, 0.0, 10.0).name, StateName::Sunny);
        assert_eq!(classify(0, 22.0, 30.0, 5.0, 0.0, 5.0).name, StateName::Sunny);
    }

    #[test]
    fn dry_after_wind() {
        assert_state(&classify(3, 18.0, 20.0, 40.0, 0.0, 0.0), StateName::Dry, 0.7);
    }

    #[test]
    fn nan_inputs_fall_through_to_default() {
        let s = classify(10, f64::NAN, f64::NAN, f64::NAN, f64::NAN, f64::NAN);
        assert_state(&s, StateName::Mild, 0.8);
    }

    #[test]
    fn pipeline_without_matching_rules_keeps_default() {
        let obs = WeatherObservation {
            weather_code: 10,
            temperature: f64::NAN,
            humidity: 50.0,
            ..Default::default()
        };
        assert_eq!(classification(&obs), Classification::DEFAULT);

        let mild = WeatherObservation { temperature: 18.0, ..obs };
        assert_eq!(
            classification(&mild),
            Classification {
                state: StateName::Mild,
                confidence: 0.7
            }
        );
    }

    #[test]
    fn classification_is_deterministic() {
        let a = classify(63, 14.0, 88.0, 12.0, 2.5, 70.0);
        let b = classify(63, 14.0, 88.0, 12.0, 2.5, 70.0);
        assert_eq!(a, b);
    }

    #[test]
    fn description_comes_from_table() {
        let s = classify(3, 18.0, 50.0, 5.0, 0.0, 0.0);
        assert_eq!(s.description, "Overcast skies with no precipitation");
    }

    #[test]
    fn missing_description_falls_back() {
        let table = WeatherStateTable::default();
        let obs = WeatherObservation {
            weather_code: 3,
            temperature: 18.0,
            humidity: 50.0,
            ..Default::default()
        };
        let s = classify_with(&table, &obs);
        assert_eq!(s.name, StateName::Cloudy);
        assert_eq!(s.description, UNKNOWN_DESCRIPTION);
    }
}

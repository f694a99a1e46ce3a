//! Ranked next-state transitions for a classified weather state.

use serde::{Deserialize, Serialize};

use crate::{
    forecast::Timeframe,
    model::{DailySlice, HourlySlice},
    state::{StateName, WeatherState},
    table::WeatherStateTable,
};

/// How many steps ahead the adjustment sample is taken from.
pub const LOOKAHEAD_STEPS: usize = 3;

/// Multiplier applied in daily mode when the lookahead day has precipitation.
const WET_DAY_FACTOR: f64 = 1.2;

/// Forecast slices used to adjust transition probabilities.
#[derive(Debug, Clone, Copy)]
pub enum ForecastSeries<'a> {
    Hourly(&'a [HourlySlice]),
    Daily(&'a [DailySlice]),
}

impl ForecastSeries<'_> {
    pub fn timeframe(&self) -> Timeframe {
        match self {
            ForecastSeries::Hourly(_) => Timeframe::Hourly,
            ForecastSeries::Daily(_) => Timeframe::Daily,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ForecastSeries::Hourly(slices) => slices.len(),
            ForecastSeries::Daily(slices) => slices.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Factor every base probability is multiplied by. `1.0` for an empty series.
    pub fn adjustment_factor(&self) -> f64 {
        let Some(index) = lookahead_index(self.len()) else {
            return 1.0;
        };

        match self {
            ForecastSeries::Hourly(slices) => {
                let pop = slices[index]
                    .precipitation_probability
                    .filter(|p| !p.is_nan())
                    .unwrap_or(0.0);
                1.0 + pop / 100.0
            }
            ForecastSeries::Daily(slices) => {
                if slices[index].precipitation_sum.is_some_and(|sum| sum > 0.0) {
                    WET_DAY_FACTOR
                } else {
                    1.0
                }
            }
        }
    }
}

/// Index of the lookahead sample: `min(3, len - 1)`, or `None` for an empty series.
pub fn lookahead_index(len: usize) -> Option<usize> {
    len.checked_sub(1).map(|last| LOOKAHEAD_STEPS.min(last))
}

/// A possible next state with its adjusted probability and recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherTransition {
    pub from: StateName,
    pub to: StateName,
    /// In `[0, 1]`.
    pub probability: f64,
    pub description: String,
    pub clothing: String,
    pub forecast_strings: Vec<String>,
    pub fitness_suggestions: String,
    pub meal_suggestions: String,
    pub activity_suggestions: String,
}

/// Compute the transitions out of `current`, most probable first.
///
/// States without table entries yield an empty list. Transitions with equal
/// probability keep their table order.
pub fn compute_transitions(
    table: &WeatherStateTable,
    current: &WeatherState,
    series: ForecastSeries<'_>,
) -> Vec<WeatherTransition> {
    let edges = table.transitions(current.name);
    if edges.is_empty() {
        tracing::debug!(state = %current.name, "no transitions for state");
        return Vec::new();
    }

    let factor = series.adjustment_factor();

    let mut transitions: Vec<WeatherTransition> = edges
        .iter()
        .map(|edge| WeatherTransition {
            from: current.name,
            to: edge.to,
            probability: (edge.likelihood.base_probability() * factor).clamp(0.0, 1.0),
            description: edge.description.clone(),
            clothing: edge.clothing.clone(),
            forecast_strings: edge.forecast_strings.clone(),
            fitness_suggestions: edge.fitness_suggestions.clone(),
            meal_suggestions: edge.meal_suggestions.clone(),
            activity_suggestions: edge.activity_suggestions.clone(),
        })
        .collect();

    // sort_by is stable
    transitions.sort_by(|a, b| b.probability.total_cmp(&a.probability));

    tracing::debug!(
        state = %current.name,
        timeframe = %series.timeframe(),
        factor,
        count = transitions.len(),
        "transitions computed"
    );

    transitions
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    const EPS: f64 = 1e-9;

    fn state(name: StateName) -> WeatherState {
        WeatherState {
            name,
            description: String::new(),
            confidence: 0.8,
        }
    }

    fn hour(i: u32, pop: Option<f64>) -> HourlySlice {
        let time: NaiveDateTime = NaiveDate::from_ymd_opt(2025, 6, 1)
            .and_then(|d| d.and_hms_opt(i % 24, 0, 0))
            .unwrap();
        HourlySlice {
            time,
            temperature: Some(20.0),
            precipitation_probability: pop,
            precipitation: None,
            weather_code: None,
            wind_speed: None,
            humidity: None,
            uv_index: None,
        }
    }

    fn day(i: u32, sum: Option<f64>) -> DailySlice {
        DailySlice {
            date: NaiveDate::from_ymd_opt(2025, 6, 1 + i).unwrap(),
            temperature_max: None,
            temperature_min: None,
            precipitation_sum: sum,
            weather_code: None,
            wind_speed_max: None,
            sunrise: None,
            sunset: None,
        }
    }

    fn probabilities(transitions: &[WeatherTransition]) -> Vec<(StateName, f64)> {
        transitions.iter().map(|t| (t.to, t.probability)).collect()
    }

    fn assert_probs(actual: &[WeatherTransition], expected: &[(StateName, f64)]) {
        let actual = probabilities(actual);
        assert_eq!(actual.len(), expected.len(), "{actual:?}");
        for ((a_name, a_p), (e_name, e_p)) in actual.iter().zip(expected) {
            assert_eq!(a_name, e_name, "{actual:?}");
            assert!((a_p - e_p).abs() < EPS, "{actual:?}");
        }
    }

    #[test]
    fn lookahead_index_clamps() {
        assert_eq!(lookahead_index(0), None);
        assert_eq!(lookahead_index(1), Some(0));
        assert_eq!(lookahead_index(3), Some(2));
        assert_eq!(lookahead_index(4), Some(3));
        assert_eq!(lookahead_index(24), Some(3));
    }

    #[test]
    fn state_without_entry_has_no_transitions() {
        let table = WeatherStateTable::default();
        let out = compute_transitions(&table, &state(StateName::Sunny), ForecastSeries::Daily(&[]));
        assert!(out.is_empty());
    }

    #[test]
    fn empty_series_keeps_base_probabilities() {
        let out = compute_transitions(
            WeatherStateTable::builtin(),
            &state(StateName::Mild),
            ForecastSeries::Hourly(&[]),
        );
        assert_probs(&out, &[(StateName::Sunny, 0.6), (StateName::Cloudy, 0.3)]);
        assert!(out.iter().all(|t| t.from == StateName::Mild));
    }

    #[test]
    fn hourly_uses_fourth_slice() {
        let hours = vec![
            hour(0, Some(90.0)),
            hour(1, Some(90.0)),
            hour(2, Some(90.0)),
            hour(3, Some(50.0)),
            hour(4, Some(90.0)),
        ];
        let out = compute_transitions(
            WeatherStateTable::builtin(),
            &state(StateName::Mild),
            ForecastSeries::Hourly(&hours),
        );
        assert_probs(&out, &[(StateName::Sunny, 0.9), (StateName::Cloudy, 0.45)]);
    }

    #[test]
    fn hourly_short_series_uses_last_slice() {
        let hours = vec![hour(0, Some(0.0)), hour(1, Some(20.0))];
        let out = compute_transitions(
            WeatherStateTable::builtin(),
            &state(StateName::Mild),
            ForecastSeries::Hourly(&hours),
        );
        assert_probs(&out, &[(StateName::Sunny, 0.72), (StateName::Cloudy, 0.36)]);
    }

    #[test]
    fn hourly_missing_probability_counts_as_zero() {
        let hours = vec![hour(0, None)];
        let out = compute_transitions(
            WeatherStateTable::builtin(),
            &state(StateName::Mild),
            ForecastSeries::Hourly(&hours),
        );
        assert_probs(&out, &[(StateName::Sunny, 0.6), (StateName::Cloudy, 0.3)]);
    }

    #[test]
    fn hourly_nan_probability_counts_as_zero() {
        let hours: Vec<_> = (0..5).map(|i| hour(i, Some(f64::NAN))).collect();
        let out = compute_transitions(
            WeatherStateTable::builtin(),
            &state(StateName::Cloudy),
            ForecastSeries::Hourly(&hours),
        );
        assert_probs(&out, &[(StateName::Showery, 0.6), (StateName::Sunny, 0.3)]);
        assert!(out.iter().all(|t| !t.probability.is_nan()));
    }

    #[test]
    fn probabilities_are_clamped() {
        let hours: Vec<_> = (0..6).map(|i| hour(i, Some(100.0))).collect();
        let out = compute_transitions(
            WeatherStateTable::builtin(),
            &state(StateName::Mild),
            ForecastSeries::Hourly(&hours),
        );
        assert_probs(&out, &[(StateName::Sunny, 1.0), (StateName::Cloudy, 0.6)]);

        let negative = vec![hour(0, Some(-250.0))];
        let out = compute_transitions(
            WeatherStateTable::builtin(),
            &state(StateName::Mild),
            ForecastSeries::Hourly(&negative),
        );
        assert!(out.iter().all(|t| t.probability == 0.0));
    }

    #[test]
    fn daily_wet_lookahead_boosts() {
        let days: Vec<_> = (0..7)
            .map(|i| day(i, if i == 3 { Some(4.2) } else { Some(0.0) }))
            .collect();
        let out = compute_transitions(
            WeatherStateTable::builtin(),
            &state(StateName::Cloudy),
            ForecastSeries::Daily(&days),
        );
        assert_probs(&out, &[(StateName::Showery, 0.72), (StateName::Sunny, 0.36)]);
    }

    #[test]
    fn daily_dry_lookahead_is_neutral() {
        let days: Vec<_> = (0..7)
            .map(|i| day(i, if i == 3 { None } else { Some(9.0) }))
            .collect();
        let out = compute_transitions(
            WeatherStateTable::builtin(),
            &state(StateName::Cloudy),
            ForecastSeries::Daily(&days),
        );
        assert_probs(&out, &[(StateName::Showery, 0.6), (StateName::Sunny, 0.3)]);
    }

    #[test]
    fn output_sorted_descending_with_stable_ties() {
        let table = WeatherStateTable::from_toml_str(
            r#"
            [states.Mild]
            description = "Mild"

            [[states.Mild.transitions]]
            to = "Cloudy"
            likelihood = "Plausible"
            description = "first plausible"

            [[states.Mild.transitions]]
            to = "Foggy"
            likelihood = "Less_Likely"
            description = "rare"

            [[states.Mild.transitions]]
            to = "Sunny"
            likelihood = "Plausible"
            description = "second plausible"

            [[states.Mild.transitions]]
            to = "Rainy"
            likelihood = "Common"
            description = "common"

            [[states.Mild.transitions]]
            to = "Windy"
            likelihood = "Sometimes"
            description = "unlabelled"

            [states.Cloudy]
            description = "Cloudy"
            [states.Foggy]
            description = "Foggy"
            [states.Sunny]
            description = "Sunny"
            [states.Rainy]
            description = "Rainy"
            [states.Windy]
            description = "Windy"
            "#,
        )
        .unwrap();

        let out = compute_transitions(&table, &state(StateName::Mild), ForecastSeries::Daily(&[]));
        assert_probs(
            &out,
            &[
                (StateName::Rainy, 0.6),
                (StateName::Cloudy, 0.3),
                (StateName::Sunny, 0.3),
                (StateName::Windy, 0.2),
                (StateName::Foggy, 0.1),
            ],
        );
        assert_eq!(out[1].description, "first plausible");
        assert_eq!(out[2].description, "second plausible");
    }

    #[test]
    fn transitions_carry_edge_texts() {
        let out = compute_transitions(
            WeatherStateTable::builtin(),
            &state(StateName::Heatwave),
            ForecastSeries::Daily(&[]),
        );
        let showery = &out[0];
        assert_eq!(showery.to, StateName::Showery);
        assert_eq!(showery.clothing, "Light rain jacket, quick-dry clothing, and a cap");
        assert_eq!(showery.forecast_strings.len(), 2);
        assert_eq!(showery.meal_suggestions, "Cold gazpacho, fruit salads, iced beverages");
    }

    #[test]
    fn every_builtin_state_produces_bounded_sorted_output() {
        let hours: Vec<_> = (0..6).map(|i| hour(i, Some(35.0))).collect();
        for name in StateName::ALL {
            let out = compute_transitions(
                WeatherStateTable::builtin(),
                &state(name),
                ForecastSeries::Hourly(&hours),
            );
            assert!(!out.is_empty());
            assert!(out.iter().all(|t| (0.0..=1.0).contains(&t.probability)));
            assert!(out.windows(2).all(|w| w[0].probability >= w[1].probability));
        }
    }
}

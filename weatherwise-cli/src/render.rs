//! Plain-text rendering of forecasts and the state table.

use std::fmt::Write;

use chrono::{DateTime, Local, Utc};
use weatherwise_core::{
    CurrentConditions, Language, TransitionForecast, WeatherAlert, WeatherState,
    WeatherStateTable, WeatherTransition, format_probability, probability_bucket, wmo_description,
};

pub fn state_line(state: &WeatherState) -> String {
    format!(
        "{} {} ({} confidence)\n   {}",
        state.name.emoji(),
        state.name,
        format_probability(state.confidence),
        state.description
    )
}

pub fn conditions(current: &CurrentConditions, language: Language) -> String {
    let mut out = format!(
        "{:.1}°C, {}",
        current.temperature,
        wmo_description(current.weather_code, language)
    );
    if let Some(feels) = current.apparent_temperature {
        let _ = write!(out, " (feels like {feels:.1}°C)");
    }
    let _ = write!(
        out,
        "\nHumidity {:.0}%, wind {:.1} km/h, precipitation {:.1} mm ({:.0}% chance)",
        current.humidity, current.wind_speed, current.precipitation, current.precipitation_probability
    );
    out
}

fn transition_block(t: &WeatherTransition) -> String {
    let mut out = format!(
        "{} {:>4}  {} [{}]\n     {}",
        t.to.emoji(),
        format_probability(t.probability),
        t.to,
        probability_bucket(t.probability),
        t.description
    );

    for line in &t.forecast_strings {
        let _ = write!(out, "\n     \"{line}\"");
    }

    for (label, text) in [
        ("Clothing", &t.clothing),
        ("Meals", &t.meal_suggestions),
        ("Activities", &t.activity_suggestions),
        ("Fitness", &t.fitness_suggestions),
    ] {
        if !text.is_empty() {
            let _ = write!(out, "\n     {label}: {text}");
        }
    }
    out
}

pub fn forecast(
    location: &str,
    current: &CurrentConditions,
    forecast: &TransitionForecast,
    alerts: &[WeatherAlert],
    language: Language,
    fetched_at: Option<DateTime<Utc>>,
) -> String {
    let mut out = format!("Weather for {location}");
    if let Some(at) = fetched_at {
        let local: DateTime<Local> = at.into();
        let _ = write!(out, " (cached {})", local.format("%Y-%m-%d %H:%M"));
    }

    let _ = write!(out, "\n{}", conditions(current, language));

    if !alerts.is_empty() {
        out.push_str("\n\nAlerts:");
        for alert in alerts {
            let _ = write!(out, "\n  [{:<7}] {}", alert.severity, alert.message);
        }
    }

    let _ = write!(
        out,
        "\n\nCurrent state: {}\n\nLikely transitions ({}):",
        state_line(&forecast.current_state),
        forecast.timeframe
    );

    if forecast.transitions.is_empty() {
        out.push_str("\n  none known for this state");
    }
    for t in &forecast.transitions {
        let _ = write!(out, "\n  {}", transition_block(t));
    }
    out
}

pub fn table(table: &WeatherStateTable) -> String {
    let mut out = String::new();
    for (name, entry) in table.iter() {
        let _ = writeln!(out, "{} {:<10} {}", name.emoji(), name, entry.description);
        for edge in &entry.transitions {
            let _ = writeln!(
                out,
                "     -> {:<10} {:<10} {}",
                edge.to,
                edge.likelihood.as_str(),
                edge.description
            );
        }
    }
    out
}

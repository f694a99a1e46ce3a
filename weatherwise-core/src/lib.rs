//! Core library for WeatherWise.
//!
//! This crate defines:
//! - The weather state classifier (observations → [`WeatherState`])
//! - The static state transition table and the transition engine
//! - Forecast aggregation over a [`WeatherSnapshot`]
//! - Formatting helpers, WMO code descriptions and threshold alerts
//! - The Open-Meteo provider, configuration and the snapshot cache
//!
//! The classifier and transition engine are pure and synchronous; only the
//! provider performs I/O.
//!
//! ```
//! use weatherwise_core::{StateName, classify};
//!
//! let state = classify(3, 18.0, 50.0, 5.0, 0.0, 0.0);
//! assert_eq!(state.name, StateName::Cloudy);
//! ```

pub mod alerts;
pub mod cache;
pub mod classify;
pub mod config;
pub mod error;
pub mod forecast;
pub mod format;
pub mod model;
pub mod provider;
pub mod state;
pub mod table;
pub mod transition;
pub mod wmo;

pub use alerts::{AlertKind, Severity, WeatherAlert, check_alerts};
pub use cache::{CachedSnapshot, SnapshotCache};
pub use classify::{WeatherObservation, classify, classify_observation, classify_with};
pub use config::{Config, LocationConfig, OpenMeteoConfig};
pub use error::{TableError, UnknownStateName};
pub use forecast::{Timeframe, TransitionForecast, generate_forecast, generate_forecast_with};
pub use format::{ProbabilityBucket, format_probability, probability_bucket, state_emoji};
pub use model::{
    CurrentConditions, DailySlice, ForecastRequest, GeoLocation, HourlySlice, WeatherSnapshot,
};
pub use provider::{WeatherProvider, provider_from_config};
pub use state::{StateName, WeatherState};
pub use table::{Likelihood, StateEntry, StateTransitionEdge, WeatherStateTable};
pub use transition::{ForecastSeries, WeatherTransition, compute_transitions};
pub use wmo::{Language, wmo_description};

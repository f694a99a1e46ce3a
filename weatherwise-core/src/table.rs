//! The static weather state table.
//!
//! Each state carries a description and a list of outgoing transition edges.
//! The table is a directed graph and may contain cycles, but it must be
//! closed: every edge target has to be a key of the same table. This is
//! checked whenever a table is built from TOML.

use serde::Deserialize;
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::Path,
    sync::OnceLock,
};

use crate::{error::TableError, state::StateName};

const BUILTIN_TABLE: &str = include_str!("../data/weather_states.toml");

static BUILTIN: OnceLock<WeatherStateTable> = OnceLock::new();

/// Categorical likelihood attached to a transition edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Likelihood {
    Common,
    Plausible,
    LessLikely,
    /// Missing or unrecognised label.
    Other,
}

impl Likelihood {
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("Common") => Likelihood::Common,
            Some("Plausible") => Likelihood::Plausible,
            Some("Less_Likely") => Likelihood::LessLikely,
            _ => Likelihood::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Likelihood::Common => "Common",
            Likelihood::Plausible => "Plausible",
            Likelihood::LessLikely => "Less_Likely",
            Likelihood::Other => "Other",
        }
    }

    /// Probability a transition starts from before forecast adjustment.
    pub fn base_probability(&self) -> f64 {
        match self {
            Likelihood::Common => 0.6,
            Likelihood::Plausible => 0.3,
            Likelihood::LessLikely => 0.1,
            Likelihood::Other => 0.2,
        }
    }
}

/// One outgoing edge of a state, with its recommendation texts.
#[derive(Debug, Clone, PartialEq)]
pub struct StateTransitionEdge {
    pub to: StateName,
    pub likelihood: Likelihood,
    pub description: String,
    pub clothing: String,
    pub forecast_strings: Vec<String>,
    pub fitness_suggestions: String,
    pub meal_suggestions: String,
    pub activity_suggestions: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StateEntry {
    pub description: String,
    pub transitions: Vec<StateTransitionEdge>,
}

/// Read-only mapping from state name to its description and transitions.
#[derive(Debug, Clone, Default)]
pub struct WeatherStateTable {
    states: HashMap<StateName, StateEntry>,
}

#[derive(Debug, Deserialize)]
struct RawTable {
    states: BTreeMap<String, RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    description: String,
    #[serde(default)]
    transitions: Vec<RawEdge>,
}

#[derive(Debug, Deserialize)]
struct RawEdge {
    to: String,
    likelihood: Option<String>,
    description: String,
    #[serde(default)]
    clothing: String,
    #[serde(default)]
    forecast_strings: Vec<String>,
    #[serde(default)]
    fitness_suggestions: String,
    #[serde(default)]
    meal_suggestions: String,
    #[serde(default)]
    activity_suggestions: String,
}

impl WeatherStateTable {
    /// Shared, process-wide copy of the table embedded in the crate.
    ///
    /// Parsed on first use. If the embedded data ever failed validation the
    /// result is an empty table, so lookups degrade instead of panicking;
    /// binaries should call [`WeatherStateTable::parse_builtin`] at startup
    /// to surface that error.
    pub fn builtin() -> &'static WeatherStateTable {
        BUILTIN.get_or_init(|| match Self::parse_builtin() {
            Ok(table) => table,
            Err(err) => {
                tracing::error!(error = %err, "embedded weather state table is invalid");
                WeatherStateTable::default()
            }
        })
    }

    /// Parse and validate the embedded table.
    pub fn parse_builtin() -> Result<Self, TableError> {
        Self::from_toml_str(BUILTIN_TABLE)
    }

    /// Parse a table from TOML and check the closed-graph invariant.
    ///
    /// Expected layout:
    ///
    /// ```toml
    /// [states.Sunny]
    /// description = "Clear skies"
    ///
    /// [[states.Sunny.transitions]]
    /// to = "Cloudy"
    /// likelihood = "Plausible"
    /// description = "Clouds move in"
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, TableError> {
        let raw: RawTable = toml::from_str(source)?;

        let mut names = HashMap::with_capacity(raw.states.len());
        for key in raw.states.keys() {
            let name = key
                .parse::<StateName>()
                .map_err(|_| TableError::UnknownState { name: key.clone() })?;
            names.insert(key.as_str(), name);
        }

        let mut states = HashMap::with_capacity(raw.states.len());
        for (key, entry) in &raw.states {
            let mut transitions = Vec::with_capacity(entry.transitions.len());
            for edge in &entry.transitions {
                let to = names.get(edge.to.as_str()).copied().ok_or_else(|| {
                    TableError::DanglingTransition {
                        from: key.clone(),
                        to: edge.to.clone(),
                    }
                })?;

                transitions.push(StateTransitionEdge {
                    to,
                    likelihood: Likelihood::from_label(edge.likelihood.as_deref()),
                    description: edge.description.clone(),
                    clothing: edge.clothing.clone(),
                    forecast_strings: edge.forecast_strings.clone(),
                    fitness_suggestions: edge.fitness_suggestions.clone(),
                    meal_suggestions: edge.meal_suggestions.clone(),
                    activity_suggestions: edge.activity_suggestions.clone(),
                });
            }

            states.insert(
                names[key.as_str()],
                StateEntry {
                    description: entry.description.clone(),
                    transitions,
                },
            );
        }

        tracing::debug!(states = states.len(), "weather state table loaded");
        Ok(Self { states })
    }

    /// Load and validate a table from a TOML file on disk.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let contents = fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn get(&self, name: StateName) -> Option<&StateEntry> {
        self.states.get(&name)
    }

    pub fn description(&self, name: StateName) -> Option<&str> {
        self.get(name).map(|entry| entry.description.as_str())
    }

    /// Outgoing edges of `name`, in table order. Empty when the state has no entry.
    pub fn transitions(&self, name: StateName) -> &[StateTransitionEdge] {
        self.get(name)
            .map(|entry| entry.transitions.as_slice())
            .unwrap_or(&[])
    }

    /// Entries in [`StateName::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (StateName, &StateEntry)> {
        StateName::ALL
            .into_iter()
            .filter_map(|name| self.states.get(&name).map(|entry| (name, entry)))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

//! Human-in-the-loop collection of categorical record fields.
//!
//! Category, federal state, and the access/creation flags cannot be derived
//! from the metadata and are supplied by a reviewer per document. The
//! collector is a synchronous capability behind a trait so the pipeline can
//! run non-interactively and be tested with scripted answers.

use dialoguer::{Confirm, MultiSelect, Select};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geo::BUNDESLAENDER;

/// Fixed category choices offered to the reviewer.
pub const CATEGORIES: [&str; 14] = [
    "Gebiet",
    "Gebäude",
    "Klima",
    "Landwirtschaft",
    "Bildung",
    "Gesundheit",
    "Wirtschaft",
    "Bevölkerung",
    "Sicherheit",
    "Umwelt",
    "Energie",
    "Technologie",
    "Transport",
    "anderes",
];

/// Creation type choices; the first is the default.
pub const CREATION_TYPES: [&str; 3] = ["amtlich", "privat", "crowdsourced"];

/// Reviewer-supplied categorical fields, merged verbatim into the record.
///
/// Serialized keys match the output column names so prepared answers can be
/// read from or written to JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalFields {
    /// Selected categories joined with "; ", empty when none chosen.
    #[serde(rename = "Kategorie")]
    pub category: String,

    /// Federal state (or free-text geographic label) confirmed by the reviewer.
    #[serde(rename = "Bundesland")]
    pub federal_state: String,

    /// Record contains synthetic data.
    #[serde(rename = "enthält synthetische Daten")]
    pub synthetic_data: bool,

    /// Data is accessible without payment.
    #[serde(rename = "ist zugänglich ohne Zahlung")]
    pub free_of_charge: bool,

    /// Data is accessible without registration.
    #[serde(rename = "ist zugänglich ohne Registrierung")]
    pub no_registration: bool,

    /// How the data was created (amtlich/privat/crowdsourced).
    #[serde(rename = "Erstellenart")]
    pub creation_type: String,
}

impl CategoricalFields {
    /// The defaults every prompt starts from: no categories, the suggested
    /// geographic label, all access flags "ja", creation type "amtlich".
    #[must_use]
    pub fn defaults(suggested_state: Option<&str>) -> Self {
        Self {
            category: String::new(),
            federal_state: suggested_state.unwrap_or_default().to_string(),
            synthetic_data: true,
            free_of_charge: true,
            no_registration: true,
            creation_type: CREATION_TYPES[0].to_string(),
        }
    }
}

/// Collector capability consumed by the pipeline, one call per document.
pub trait CollectFields {
    /// Collect categorical fields for the record with the given title,
    /// offering the automatically resolved geographic label as default.
    fn collect(
        &self,
        title: Option<&str>,
        suggested_state: Option<&str>,
    ) -> Result<CategoricalFields>;
}

/// Non-interactive collector that accepts every default.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCollector;

impl CollectFields for DefaultCollector {
    fn collect(
        &self,
        _title: Option<&str>,
        suggested_state: Option<&str>,
    ) -> Result<CategoricalFields> {
        Ok(CategoricalFields::defaults(suggested_state))
    }
}

/// Collector replaying one fixed set of answers for every document.
///
/// Useful for scripted batch runs and tests; the federal state falls back
/// to the per-document suggestion when the scripted answer leaves it empty.
#[derive(Debug, Clone)]
pub struct ScriptedCollector {
    pub answers: CategoricalFields,
}

impl CollectFields for ScriptedCollector {
    fn collect(
        &self,
        _title: Option<&str>,
        suggested_state: Option<&str>,
    ) -> Result<CategoricalFields> {
        let mut answers = self.answers.clone();
        if answers.federal_state.is_empty() {
            answers.federal_state = suggested_state.unwrap_or_default().to_string();
        }
        Ok(answers)
    }
}

/// Interactive collector prompting on the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogCollector;

impl CollectFields for DialogCollector {
    fn collect(
        &self,
        title: Option<&str>,
        suggested_state: Option<&str>,
    ) -> Result<CategoricalFields> {
        let defaults = CategoricalFields::defaults(suggested_state);

        let prompt_title = title.unwrap_or("(ohne Titel)");

        let selected = MultiSelect::new()
            .with_prompt(format!("Kategorien für \"{prompt_title}\""))
            .items(&CATEGORIES)
            .interact()?;
        let category = selected
            .into_iter()
            .map(|i| CATEGORIES[i])
            .collect::<Vec<_>>()
            .join("; ");

        // Offer the automatic resolution as first choice when it is not
        // already one of the sixteen states.
        let mut state_items: Vec<&str> = Vec::new();
        if let Some(suggestion) = suggested_state {
            if !BUNDESLAENDER.contains(&suggestion) {
                state_items.push(suggestion);
            }
        }
        state_items.extend(BUNDESLAENDER);
        let default_index = suggested_state
            .and_then(|s| state_items.iter().position(|item| *item == s))
            .unwrap_or(0);
        let state_index = Select::new()
            .with_prompt("Bundesland wählen")
            .items(&state_items)
            .default(default_index)
            .interact()?;

        let synthetic_data = Confirm::new()
            .with_prompt("enthält synthetische Daten")
            .default(defaults.synthetic_data)
            .interact()?;
        let free_of_charge = Confirm::new()
            .with_prompt("ist zugänglich ohne Zahlung")
            .default(defaults.free_of_charge)
            .interact()?;
        let no_registration = Confirm::new()
            .with_prompt("ist zugänglich ohne Registrierung")
            .default(defaults.no_registration)
            .interact()?;

        let creation_index = Select::new()
            .with_prompt("Erstellenart")
            .items(&CREATION_TYPES)
            .default(0)
            .interact()?;

        Ok(CategoricalFields {
            category,
            federal_state: state_items[state_index].to_string(),
            synthetic_data,
            free_of_charge,
            no_registration,
            creation_type: CREATION_TYPES[creation_index].to_string(),
        })
    }
}

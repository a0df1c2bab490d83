// Session itinerary: an ordered list of planned activities

use crate::locale::Locale;
use crate::messages;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ItineraryError {
    #[error("No date selected for the activity")]
    MissingDate,

    #[error("Invalid share link base: {0}")]
    InvalidShareBase(String),
}

impl ItineraryError {
    pub fn user_message(&self, locale: Locale) -> String {
        match self {
            ItineraryError::MissingDate => messages::missing_date(locale).to_string(),
            ItineraryError::InvalidShareBase(_) => messages::invalid_share_link(locale).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryEntry {
    pub activity: String,
    pub date: String,
}

#[derive(Debug, Clone, Default)]
pub struct ItineraryPlanner {
    entries: Vec<ItineraryEntry>,
}

impl ItineraryPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, activity: &str, date: &str) -> Result<(), ItineraryError> {
        let date = date.trim();
        if date.is_empty() {
            return Err(ItineraryError::MissingDate);
        }
        self.entries.push(ItineraryEntry {
            activity: activity.to_string(),
            date: date.to_string(),
        });
        Ok(())
    }

    // Out-of-range indexes are ignored
    pub fn remove(&mut self, index: usize) -> Option<ItineraryEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn entries(&self) -> &[ItineraryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_share_text(&self, locale: Locale) -> String {
        let lines = self
            .entries
            .iter()
            .map(|entry| format!("{} on {}", entry.activity, entry.date))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{}\n{}", messages::itinerary_header(locale), lines)
    }

    // Social share link with the share text in the `text` query parameter
    pub fn share_url(&self, base: &str, locale: Locale) -> Result<Url, ItineraryError> {
        Url::parse_with_params(base, &[("text", self.to_share_text(locale))])
            .map_err(|e| ItineraryError::InvalidShareBase(format!("{}: {}", base, e)))
    }
}

// Traveller experiences, an append-only persisted log

use crate::locale::Locale;
use crate::messages;
use crate::persistence::{append_entry, load_entries, LogKey, LogStore, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExperienceError {
    #[error("Experience text is empty")]
    EmptyText,

    #[error("Experience log error: {0}")]
    Store(#[from] StoreError),
}

impl ExperienceError {
    pub fn user_message(&self, locale: Locale) -> String {
        match self {
            ExperienceError::EmptyText => messages::empty_experience(locale).to_string(),
            ExperienceError::Store(e) => e.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub text: String,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub photo: Option<String>,
}

pub struct ExperienceLog {
    store: Arc<dyn LogStore>,
}

impl ExperienceLog {
    pub fn new(store: Arc<dyn LogStore>) -> Self {
        Self { store }
    }

    pub fn submit(&self, text: &str, photo: Option<&str>) -> Result<Experience, ExperienceError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ExperienceError::EmptyText);
        }

        let experience = Experience {
            text: text.to_string(),
            created_at: Utc::now(),
            photo: photo
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        };
        append_entry(self.store.as_ref(), LogKey::Experiences, &experience)?;
        tracing::info!(has_photo = experience.photo.is_some(), "Experience shared");
        Ok(experience)
    }

    // Oldest first, as stored
    pub fn load(&self) -> Result<Vec<Experience>, ExperienceError> {
        Ok(load_entries(self.store.as_ref(), LogKey::Experiences)?)
    }
}

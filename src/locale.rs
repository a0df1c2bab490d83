// Display language handling and the locale-change signal that drives re-renders

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::watch;

#[derive(Error, Debug, PartialEq)]
pub enum LocaleError {
    #[error("Unknown locale: {0}")]
    Unknown(String),
}

// The two languages the site is published in
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Vi,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Vi];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Vi => "vi",
        }
    }

    // Pick between an English and a Vietnamese variant of the same text
    pub fn pick<'a>(&self, en: &'a str, vi: &'a str) -> &'a str {
        match self {
            Locale::En => en,
            Locale::Vi => vi,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "vi" => Ok(Locale::Vi),
            other => Err(LocaleError::Unknown(other.to_string())),
        }
    }
}

// Identifies one content refresh; only the most recently issued one may commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    generation: u64,
    locale: Locale,
}

impl RefreshTicket {
    pub fn locale(&self) -> Locale {
        self.locale
    }
}

pub struct LocaleController {
    current: watch::Sender<Locale>,
    generation: AtomicU64,
}

impl LocaleController {
    pub fn new(initial: Locale) -> Self {
        let (current, _) = watch::channel(initial);
        Self {
            current,
            generation: AtomicU64::new(0),
        }
    }

    pub fn current(&self) -> Locale {
        *self.current.borrow()
    }

    // Replace the held locale. Returns true if the value actually changed.
    pub fn set_locale(&self, locale: Locale) -> bool {
        let previous = self.current.send_replace(locale);
        if previous != locale {
            tracing::debug!(from = %previous, to = %locale, "Locale changed");
            true
        } else {
            false
        }
    }

    // Observers are woken on every change
    pub fn subscribe(&self) -> watch::Receiver<Locale> {
        self.current.subscribe()
    }

    pub fn issue_ticket(&self) -> RefreshTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        RefreshTicket {
            generation,
            locale: self.current(),
        }
    }

    pub fn is_current(&self, ticket: &RefreshTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }
}

impl Default for LocaleController {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale_codes() {
        assert_eq!("en".parse::<Locale>(), Ok(Locale::En));
        assert_eq!(" VI ".parse::<Locale>(), Ok(Locale::Vi));
        assert_eq!(
            "fr".parse::<Locale>(),
            Err(LocaleError::Unknown("fr".to_string()))
        );
    }

    #[test]
    fn test_locale_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Locale::Vi).unwrap(), "\"vi\"");
        let locale: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(locale, Locale::En);
    }

    #[test]
    fn test_set_locale_reports_change() {
        let controller = LocaleController::new(Locale::En);
        assert!(!controller.set_locale(Locale::En));
        assert!(controller.set_locale(Locale::Vi));
        assert_eq!(controller.current(), Locale::Vi);
    }

    #[test]
    fn test_only_latest_ticket_is_current() {
        let controller = LocaleController::default();
        let first = controller.issue_ticket();
        assert!(controller.is_current(&first));

        controller.set_locale(Locale::Vi);
        let second = controller.issue_ticket();
        assert!(!controller.is_current(&first));
        assert!(controller.is_current(&second));
        assert_eq!(first.locale(), Locale::En);
        assert_eq!(second.locale(), Locale::Vi);
    }

    #[tokio::test]
    async fn test_subscribers_observe_changes() {
        let controller = LocaleController::new(Locale::En);
        let mut rx = controller.subscribe();

        controller.set_locale(Locale::Vi);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), Locale::Vi);
    }
}

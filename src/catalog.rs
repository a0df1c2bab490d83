// Catalog data returned by the content source
use crate::locale::Locale;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum PriceError {
    #[error("Invalid price: {0}")]
    Invalid(String),
}

// Exact decimal amount in the site currency, held as whole cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price {
    cents: u64,
}

impl Price {
    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    pub const fn from_units(units: u64) -> Self {
        Self { cents: units * 100 }
    }

    pub fn cents(&self) -> u64 {
        self.cents
    }

    // None on overflow
    pub fn checked_mul(&self, factor: u32) -> Option<Price> {
        self.cents.checked_mul(factor as u64).map(Price::from_cents)
    }
}

// Whole amounts render without decimals ("50"), others with two ("19.99")
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = self.cents / 100;
        let rest = self.cents % 100;
        if rest == 0 {
            write!(f, "{}", units)
        } else {
            write!(f, "{}.{:02}", units, rest)
        }
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || PriceError::Invalid(s.to_string());
        let (units, fraction) = match raw.split_once('.') {
            Some((units, fraction)) => (units, fraction),
            None => (raw, ""),
        };
        if units.is_empty() || fraction.len() > 2 {
            return Err(invalid());
        }
        if !units.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let units: u64 = units.parse().map_err(|_| invalid())?;
        let fraction: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };
        units
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .map(Price::from_cents)
            .ok_or_else(invalid)
    }
}

// Stored as a plain JSON number so persisted logs stay readable
impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.cents % 100 == 0 {
            serializer.serialize_u64(self.cents / 100)
        } else {
            serializer.serialize_f64(self.cents as f64 / 100.0)
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(serde::de::Error::custom(format!(
                "invalid price amount {}",
                amount
            )));
        }
        Ok(Price::from_cents((amount * 100.0).round() as u64))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Media {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}

// A destination or a dish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(rename = "desc")]
    pub localized_text: BTreeMap<Locale, String>,
    #[serde(default)]
    pub media: Media,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl CatalogItem {
    // Text for the requested locale, falling back to `fallback` when missing
    pub fn text_for(&self, locale: Locale, fallback: Locale) -> Option<&str> {
        self.localized_text
            .get(&locale)
            .or_else(|| self.localized_text.get(&fallback))
            .map(String::as_str)
    }

    // Lowercased name + description, what free-text search runs against
    pub fn flattened_text(&self, locale: Locale, fallback: Locale) -> String {
        let text = self.text_for(locale, fallback).unwrap_or_default();
        format!("{} {}", self.name, text).to_lowercase()
    }

    pub fn tag_list(&self) -> String {
        self.tags.iter().cloned().collect::<Vec<_>>().join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourOffering {
    pub name: String,
    pub price: Price,
    pub available_dates: BTreeSet<NaiveDate>,
}

impl TourOffering {
    pub fn is_available_on(&self, date: NaiveDate) -> bool {
        self.available_dates.contains(&date)
    }

    // Text shown in the tour picker, also used as the itinerary activity label
    pub fn option_label(&self, currency_symbol: &str) -> String {
        format!("{} - {}{}", self.name, currency_symbol, self.price)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub destinations: Vec<CatalogItem>,
    pub cuisine: Vec<CatalogItem>,
    pub tours: Vec<TourOffering>,
}

impl Catalog {
    pub fn find_tour(&self, name: &str) -> Option<&TourOffering> {
        self.tours.iter().find(|tour| tour.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub temp: i32,
    pub condition: String,
    pub humidity: u8,
}

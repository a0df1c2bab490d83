// Tour booking: validation, totals and the persisted booking log

use crate::catalog::{Price, TourOffering};
use crate::locale::Locale;
use crate::messages;
use crate::notification::NotificationGateway;
use crate::persistence::{append_entry, load_entries, LogKey, LogStore, StoreError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("{tour} is not available on {date}")]
    DateUnavailable { tour: String, date: String },

    #[error("Invalid guest count: {0}")]
    InvalidGuestCount(String),

    #[error("Malformed tour selection: {0}")]
    MalformedSelection(String),

    #[error("Booking log error: {0}")]
    Store(#[from] StoreError),
}

impl BookingError {
    // What the booking form shows to the user
    pub fn user_message(&self, locale: Locale) -> String {
        match self {
            BookingError::DateUnavailable { tour, date } => {
                messages::date_unavailable(locale, tour, date)
            }
            BookingError::InvalidGuestCount(raw) => messages::invalid_guest_count(locale, raw),
            BookingError::MalformedSelection(_) => messages::malformed_selection(locale).to_string(),
            BookingError::Store(_) => messages::booking_failed(locale).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub tour: String,
    pub date: NaiveDate,
    pub guests: u32,
    pub total: Price,
    pub timestamp: DateTime<Utc>,
}

// Tour choice as carried by the booking form's option value: `name|price|date,date`
pub struct TourSelection;

impl TourSelection {
    pub fn encode(tour: &TourOffering) -> String {
        let dates = tour
            .available_dates
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect::<Vec<_>>()
            .join(",");
        format!("{}|{}|{}", tour.name, tour.price, dates)
    }

    pub fn decode(value: &str) -> Result<TourOffering, BookingError> {
        let malformed = || BookingError::MalformedSelection(value.to_string());

        // Split from the right so a '|' inside the tour name survives
        let mut parts = value.rsplitn(3, '|');
        let dates = parts.next().ok_or_else(malformed)?;
        let price = parts.next().ok_or_else(malformed)?;
        let name = parts.next().ok_or_else(malformed)?;
        if name.trim().is_empty() {
            return Err(malformed());
        }

        let price: Price = price.parse().map_err(|_| malformed())?;
        let available_dates = dates
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").map_err(|_| malformed()))
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(TourOffering {
            name: name.to_string(),
            price,
            available_dates,
        })
    }
}

pub fn parse_guest_count(raw: &str) -> Result<u32, BookingError> {
    match raw.trim().parse::<u32>() {
        Ok(guests) if guests > 0 => Ok(guests),
        _ => Err(BookingError::InvalidGuestCount(raw.trim().to_string())),
    }
}

pub struct BookingStore {
    store: Arc<dyn LogStore>,
    notifier: Arc<NotificationGateway>,
    currency_symbol: String,
}

impl BookingStore {
    pub fn new(
        store: Arc<dyn LogStore>,
        notifier: Arc<NotificationGateway>,
        currency_symbol: impl Into<String>,
    ) -> Self {
        Self {
            store,
            notifier,
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn submit(
        &self,
        tour: &TourOffering,
        date: &str,
        guests: u32,
        locale: Locale,
    ) -> Result<Booking, BookingError> {
        let date = available_date(tour, date)?;
        if guests == 0 {
            return Err(BookingError::InvalidGuestCount(guests.to_string()));
        }
        self.record(tour, date, guests, locale)
    }

    // Raw form fields; validation still checks the date before the guest count
    pub fn submit_form(
        &self,
        selection: &str,
        date: &str,
        guests: &str,
        locale: Locale,
    ) -> Result<Booking, BookingError> {
        let tour = TourSelection::decode(selection)?;
        let date = available_date(&tour, date)?;
        let guests = parse_guest_count(guests)?;
        self.record(&tour, date, guests, locale)
    }

    pub fn bookings(&self) -> Result<Vec<Booking>, BookingError> {
        Ok(load_entries(self.store.as_ref(), LogKey::Bookings)?)
    }

    pub fn format_total(&self, total: Price) -> String {
        format!("{}{}", self.currency_symbol, total)
    }

    fn record(
        &self,
        tour: &TourOffering,
        date: NaiveDate,
        guests: u32,
        locale: Locale,
    ) -> Result<Booking, BookingError> {
        let total = tour
            .price
            .checked_mul(guests)
            .ok_or_else(|| BookingError::InvalidGuestCount(guests.to_string()))?;

        let booking = Booking {
            tour: tour.name.clone(),
            date,
            guests,
            total,
            timestamp: Utc::now(),
        };
        let count = append_entry(self.store.as_ref(), LogKey::Bookings, &booking)?;
        tracing::info!(
            tour = %booking.tour,
            date = %booking.date,
            guests = booking.guests,
            total = %booking.total,
            log_len = count,
            "Booking recorded"
        );

        let date = booking.date.to_string();
        let total = self.format_total(booking.total);
        self.notifier.notify(
            messages::booking_confirmed_title(locale),
            &messages::booking_confirmed_body(locale, &booking.tour, &date, guests, &total),
        );

        Ok(booking)
    }
}

// Membership check; a date that does not parse cannot be in the set either
fn available_date(tour: &TourOffering, raw: &str) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .filter(|date| tour.is_available_on(*date))
        .ok_or_else(|| BookingError::DateUnavailable {
            tour: tour.name.clone(),
            date: raw.trim().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::testing::RecordingBackend;
    use crate::persistence::MemoryLogStore;
    use test_case::test_case;
    use tokio_test::{assert_err, assert_ok};

    fn snorkeling() -> TourOffering {
        TourOffering {
            name: "Snorkeling Tour".to_string(),
            price: Price::from_units(50),
            available_dates: BTreeSet::from([
                NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 12).unwrap(),
            ]),
        }
    }

    fn booking_store() -> (BookingStore, Arc<MemoryLogStore>, RecordingBackend) {
        let logs = Arc::new(MemoryLogStore::new());
        let backend = RecordingBackend::granted();
        let notifier = Arc::new(NotificationGateway::new(Box::new(backend.clone()), "icon"));
        (BookingStore::new(logs.clone(), notifier, "$"), logs, backend)
    }

    #[test]
    fn test_snorkeling_booking_scenario() {
        let (store, _, _) = booking_store();

        let booking = assert_ok!(store.submit(&snorkeling(), "2025-03-10", 2, Locale::En));
        assert_eq!(booking.tour, "Snorkeling Tour");
        assert_eq!(booking.date, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert_eq!(booking.guests, 2);
        assert_eq!(booking.total, Price::from_units(100));

        let err = assert_err!(store.submit(&snorkeling(), "2025-03-11", 2, Locale::En));
        match err {
            BookingError::DateUnavailable { tour, date } => {
                assert_eq!(tour, "Snorkeling Tour");
                assert_eq!(date, "2025-03-11");
            }
            other => panic!("Expected DateUnavailable, got {:?}", other),
        }
    }

    #[test_case("2025-03-10", true; "first available date")]
    #[test_case("2025-03-12", true; "second available date")]
    #[test_case("2025-03-11", false; "date between")]
    #[test_case("", false; "empty date")]
    #[test_case("10/03/2025", false; "non iso format")]
    fn test_rejected_iff_date_unavailable(date: &str, accepted: bool) {
        let (store, _, _) = booking_store();
        let result = store.submit(&snorkeling(), date, 1, Locale::En);
        assert_eq!(result.is_ok(), accepted, "{:?}", result);
        if !accepted {
            assert!(matches!(result, Err(BookingError::DateUnavailable { .. })));
        }
    }

    #[test]
    fn test_date_checked_before_guest_count() {
        let (store, _, _) = booking_store();
        let err = assert_err!(store.submit(&snorkeling(), "2025-03-11", 0, Locale::En));
        assert!(matches!(err, BookingError::DateUnavailable { .. }));

        let err = assert_err!(store.submit(&snorkeling(), "2025-03-10", 0, Locale::En));
        assert!(matches!(err, BookingError::InvalidGuestCount(_)));
    }

    #[test]
    fn test_log_is_append_only_in_submission_order() {
        let (store, _, _) = booking_store();
        for guests in 1..=4 {
            assert_ok!(store.submit(&snorkeling(), "2025-03-12", guests, Locale::En));
        }
        // Rejections leave the log alone
        assert_err!(store.submit(&snorkeling(), "2025-03-13", 1, Locale::En));

        let bookings = assert_ok!(store.bookings());
        assert_eq!(bookings.len(), 4);
        let guests: Vec<u32> = bookings.iter().map(|b| b.guests).collect();
        assert_eq!(guests, vec![1, 2, 3, 4]);
        let totals: Vec<Price> = bookings.iter().map(|b| b.total).collect();
        assert_eq!(
            totals,
            vec![
                Price::from_units(50),
                Price::from_units(100),
                Price::from_units(150),
                Price::from_units(200)
            ]
        );
    }

    #[test]
    fn test_total_is_exact_for_fractional_prices() {
        let (store, _, _) = booking_store();
        let mut tour = snorkeling();
        tour.price = Price::from_cents(1999);

        let booking = assert_ok!(store.submit(&tour, "2025-03-10", 3, Locale::En));
        assert_eq!(booking.total, Price::from_cents(5997));
    }

    #[test]
    fn test_confirmation_is_localized() {
        let (store, _, backend) = booking_store();
        assert_ok!(store.submit(&snorkeling(), "2025-03-10", 2, Locale::Vi));

        let shown = backend.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "Đặt chỗ thành công!");
        assert_eq!(
            shown[0].body,
            "Tour Snorkeling Tour cho 2 khách vào ngày 2025-03-10 đã được xác nhận. Tổng: $100"
        );
    }

    #[test]
    fn test_selection_encoding() {
        let encoded = TourSelection::encode(&snorkeling());
        assert_eq!(encoded, "Snorkeling Tour|50|2025-03-10,2025-03-12");
        assert_eq!(assert_ok!(TourSelection::decode(&encoded)), snorkeling());
    }

    #[test_case(""; "empty")]
    #[test_case("Snorkeling Tour"; "name only")]
    #[test_case("Snorkeling Tour|fifty|2025-03-10"; "bad price")]
    #[test_case("Snorkeling Tour|50|March 10"; "bad date")]
    #[test_case("|50|2025-03-10"; "missing name")]
    fn test_malformed_selection(value: &str) {
        assert!(matches!(
            TourSelection::decode(value),
            Err(BookingError::MalformedSelection(_))
        ));
    }

    #[test]
    fn test_submit_form_fields() {
        let (store, logs, _) = booking_store();
        let booking = assert_ok!(store.submit_form(
            "Pepper Farm Visit|20|2025-03-10,2025-03-14",
            "2025-03-14",
            " 3 ",
            Locale::En
        ));
        assert_eq!(booking.total, Price::from_units(60));

        let err = assert_err!(store.submit_form(
            "Pepper Farm Visit|20|2025-03-10,2025-03-14",
            "2025-03-14",
            "-1",
            Locale::En
        ));
        assert!(matches!(err, BookingError::InvalidGuestCount(ref raw) if raw == "-1"));
        assert_eq!(logs.load_log(LogKey::Bookings).unwrap().len(), 1);
    }

    #[test]
    fn test_persisted_shape() {
        let (store, logs, _) = booking_store();
        assert_ok!(store.submit(&snorkeling(), "2025-03-10", 2, Locale::En));

        let raw = logs.load_log(LogKey::Bookings).unwrap();
        let entry = raw[0].as_object().unwrap();
        assert_eq!(entry["tour"], "Snorkeling Tour");
        assert_eq!(entry["date"], "2025-03-10");
        assert_eq!(entry["guests"], 2);
        assert_eq!(entry["total"], 100);
        assert!(entry.contains_key("timestamp"));
    }

    #[test]
    fn test_user_messages() {
        let err = BookingError::DateUnavailable {
            tour: "Sunset Boat Tour".to_string(),
            date: "2025-03-10".to_string(),
        };
        assert_eq!(
            err.user_message(Locale::En),
            "Sorry, Sunset Boat Tour is not available on 2025-03-10."
        );
    }
}

// Main library file for the Phú Quốc island guide

pub mod booking;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod content_source;
pub mod experience;
pub mod itinerary;
pub mod locale;
pub mod map;
pub mod messages;
pub mod notification;
pub mod persistence;
pub mod renderer;
pub mod site;

// Re-export key types for convenience
pub use booking::{Booking, BookingError, BookingStore, TourSelection};
pub use catalog::{Catalog, CatalogItem, Price, TourOffering, Weather};
pub use config::{ConfigError, SiteConfig};
pub use content_source::{ContentSource, FetchError, MockContentSource};
pub use experience::{Experience, ExperienceError, ExperienceLog};
pub use itinerary::{ItineraryEntry, ItineraryError, ItineraryPlanner};
pub use locale::{Locale, LocaleController};
pub use notification::{NotificationBackend, NotificationGateway, Permission, TracingBackend};
pub use persistence::{FileLogStore, LogKey, LogStore, MemoryLogStore, StoreError};
pub use renderer::{PageViews, Renderer, SearchQuery, Section};
pub use site::{RefreshOutcome, SearchResults, TouristSite};

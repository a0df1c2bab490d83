// The tourist site: application state and the handlers the page's controls call into

use crate::booking::{Booking, BookingError, BookingStore};
use crate::catalog::{Catalog, CatalogItem};
use crate::chat::ChatSession;
use crate::config::SiteConfig;
use crate::content_source::ContentSource;
use crate::experience::{Experience, ExperienceError, ExperienceLog};
use crate::itinerary::{ItineraryError, ItineraryPlanner};
use crate::locale::{Locale, LocaleController};
use crate::map::MapView;
use crate::notification::{NotificationBackend, NotificationGateway};
use crate::persistence::LogStore;
use crate::renderer::{PageViews, Renderer, SearchQuery, Section};
use parking_lot::RwLock;
use reqwest::Url;
use std::sync::Arc;
use tokio::task::JoinHandle;

// Names of the catalog items left visible by a search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub destinations: Vec<String>,
    pub cuisine: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    // A later refresh was issued while this one was in flight
    Discarded,
}

pub struct TouristSite {
    config: SiteConfig,
    source: Arc<dyn ContentSource>,
    renderer: Renderer,
    locale: LocaleController,
    views: RwLock<PageViews>,
    catalog: RwLock<Option<Arc<Catalog>>>,
    bookings: BookingStore,
    last_booking: RwLock<Option<Booking>>,
    itinerary: RwLock<ItineraryPlanner>,
    experiences: ExperienceLog,
    chat: ChatSession,
}

impl TouristSite {
    // Wire everything up and ask for notification permission. Content is not
    // fetched until `refresh` (or `set_locale`) runs.
    pub fn new(
        config: SiteConfig,
        source: Arc<dyn ContentSource>,
        store: Arc<dyn LogStore>,
        backend: Box<dyn NotificationBackend>,
    ) -> Self {
        let notifier = Arc::new(NotificationGateway::new(
            backend,
            config.notifications.icon.clone(),
        ));
        notifier.request_permission_once();

        let site = Self {
            renderer: Renderer::new(config.fallback_locale, config.currency_symbol.clone()),
            locale: LocaleController::new(config.default_locale),
            views: RwLock::new(PageViews::default()),
            catalog: RwLock::new(None),
            bookings: BookingStore::new(
                store.clone(),
                notifier.clone(),
                config.currency_symbol.clone(),
            ),
            last_booking: RwLock::new(None),
            itinerary: RwLock::new(ItineraryPlanner::new()),
            experiences: ExperienceLog::new(store),
            chat: ChatSession::new(notifier, config.chat_reply_delay()),
            source,
            config,
        };
        site.render_local_views();
        site
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn locale(&self) -> Locale {
        self.locale.current()
    }

    pub fn locale_controller(&self) -> &LocaleController {
        &self.locale
    }

    // The chat is rendered from the live transcript so a support reply shows up
    // as soon as its task has written it
    pub fn views(&self) -> PageViews {
        let mut views = self.views.read().clone();
        views.chat = self
            .renderer
            .render_chat(&self.chat.transcript(), self.locale());
        views
    }

    pub fn catalog(&self) -> Option<Arc<Catalog>> {
        self.catalog.read().clone()
    }

    pub fn page(&self) -> String {
        self.renderer.render_page(&self.views(), self.locale())
    }

    // Switch language and re-render every locale-dependent view
    pub async fn set_locale(&self, locale: Locale) -> RefreshOutcome {
        self.locale.set_locale(locale);
        self.render_local_views();
        self.refresh().await
    }

    // Fetch catalog and weather and re-render the content sections. Fetch failures
    // are logged and leave the affected section empty. If another refresh is issued
    // before this one completes, this one's results are dropped.
    pub async fn refresh(&self) -> RefreshOutcome {
        let ticket = self.locale.issue_ticket();
        let locale = ticket.locale();

        let (catalog, weather) =
            futures::join!(self.source.fetch_catalog(), self.source.fetch_weather());

        if !self.locale.is_current(&ticket) {
            tracing::debug!(%locale, "Discarding stale content refresh");
            return RefreshOutcome::Discarded;
        }

        let catalog = match catalog {
            Ok(catalog) => Some(Arc::new(catalog)),
            Err(e) => {
                tracing::error!(error = %e, "Error loading content");
                None
            }
        };
        let weather = match weather {
            Ok(weather) => Some(weather),
            Err(e) => {
                tracing::error!(error = %e, "Error loading weather");
                None
            }
        };

        {
            let mut views = self.views.write();
            match &catalog {
                Some(catalog) => {
                    views.gallery = self
                        .renderer
                        .render(Section::Destinations(&catalog.destinations), locale);
                    views.cuisine = self.renderer.render(Section::Cuisine(&catalog.cuisine), locale);
                    views.tour_options = self.renderer.render(Section::Tours(&catalog.tours), locale);
                    views.map = self.renderer.render_map(&MapView::from_destinations(
                        &self.config.map,
                        &catalog.destinations,
                    ));
                }
                None => {
                    views.gallery.clear();
                    views.cuisine.clear();
                    views.tour_options.clear();
                    views.map.clear();
                }
            }
            views.weather = weather
                .map(|w| self.renderer.render_weather(&w, locale))
                .unwrap_or_default();
        }
        // Search and booking must see the same catalog as the rendered sections
        *self.catalog.write() = catalog;

        tracing::debug!(%locale, "Content refreshed");
        RefreshOutcome::Applied
    }

    // Views that depend on the locale but not on fetched content
    fn render_local_views(&self) {
        let locale = self.locale();
        let itinerary = self
            .renderer
            .render_itinerary(self.itinerary.read().entries(), locale);
        let booking_summary = self
            .last_booking
            .read()
            .as_ref()
            .map(|booking| self.renderer.render_booking_summary(booking, locale));
        let experiences = match self.experiences.load() {
            Ok(experiences) => self.renderer.render_experiences(&experiences),
            Err(e) => {
                tracing::error!(error = %e, "Error loading experiences");
                String::new()
            }
        };

        let mut views = self.views.write();
        views.itinerary = itinerary;
        views.booking_summary = booking_summary;
        views.experiences = experiences;
    }

    pub fn search(&self, query: &SearchQuery) -> SearchResults {
        let Some(catalog) = self.catalog() else {
            return SearchResults::default();
        };
        let locale = self.locale();
        let fallback = self.renderer.fallback();
        let visible = |items: &[CatalogItem]| {
            items
                .iter()
                .filter(|item| query.matches(item, locale, fallback))
                .map(|item| item.name.clone())
                .collect::<Vec<_>>()
        };

        SearchResults {
            destinations: visible(catalog.destinations.as_slice()),
            cuisine: visible(catalog.cuisine.as_slice()),
        }
    }

    // Booking form submit; on failure the form's previous summary stays as it was
    pub fn submit_booking(
        &self,
        selection: &str,
        date: &str,
        guests: &str,
    ) -> Result<Booking, BookingError> {
        let locale = self.locale();
        let booking = self
            .bookings
            .submit_form(selection, date, guests, locale)
            .inspect_err(|e| tracing::info!(error = %e, "Booking rejected"))?;

        let summary = self.renderer.render_booking_summary(&booking, locale);
        *self.last_booking.write() = Some(booking.clone());
        self.views.write().booking_summary = Some(summary);
        Ok(booking)
    }

    pub fn bookings(&self) -> Result<Vec<Booking>, BookingError> {
        self.bookings.bookings()
    }

    // `activity` is the tour picker's option label, e.g. "Snorkeling Tour - $50"
    pub fn add_to_itinerary(&self, activity: &str, date: &str) -> Result<(), ItineraryError> {
        self.itinerary.write().add(activity, date)?;
        self.rerender_itinerary();
        Ok(())
    }

    pub fn remove_from_itinerary(&self, index: usize) {
        if self.itinerary.write().remove(index).is_some() {
            self.rerender_itinerary();
        }
    }

    pub fn itinerary(&self) -> ItineraryPlanner {
        self.itinerary.read().clone()
    }

    pub fn share_itinerary(&self) -> Result<Url, ItineraryError> {
        self.itinerary
            .read()
            .share_url(&self.config.share_base_url, self.locale())
    }

    fn rerender_itinerary(&self) {
        let html = self
            .renderer
            .render_itinerary(self.itinerary.read().entries(), self.locale());
        self.views.write().itinerary = html;
    }

    pub fn submit_experience(
        &self,
        text: &str,
        photo: Option<&str>,
    ) -> Result<Experience, ExperienceError> {
        let experience = self.experiences.submit(text, photo)?;
        let all = self.experiences.load()?;
        self.views.write().experiences = self.renderer.render_experiences(&all);
        Ok(experience)
    }

    // Post a chat message. The support reply lands in the transcript after the
    // configured delay. Returns `None` for a blank message or when called outside
    // a tokio runtime.
    pub fn send_chat(&self, message: &str) -> Option<JoinHandle<()>> {
        self.chat.send(message, self.locale())
    }
}

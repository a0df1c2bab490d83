// Markup rendering for every locale-dependent view
//
// All functions here are pure: the same inputs and locale give byte-identical
// output. Catalog content is trusted and emitted as-is; anything a visitor typed
// (experiences, chat, itinerary dates) goes through `escape_html`.

use crate::booking::{Booking, TourSelection};
use crate::catalog::{CatalogItem, TourOffering, Weather};
use crate::chat::{ChatAuthor, ChatMessage};
use crate::experience::Experience;
use crate::itinerary::ItineraryEntry;
use crate::locale::Locale;
use crate::map::MapView;
use crate::messages::{self, PageSection};
use std::collections::BTreeSet;
use std::fmt::Write;

#[derive(Debug, Clone, Copy)]
pub enum Section<'a> {
    Destinations(&'a [CatalogItem]),
    Cuisine(&'a [CatalogItem]),
    Tours(&'a [TourOffering]),
}

// Search box text plus the ticked tag checkboxes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub text: String,
    pub tags: BTreeSet<String>,
}

impl SearchQuery {
    pub fn new(text: &str, tags: &[&str]) -> Self {
        Self {
            text: text.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    // Tag filter (any selected tag) AND free-text match
    pub fn matches(&self, item: &CatalogItem, locale: Locale, fallback: Locale) -> bool {
        matches_filter(item, &self.tags) && matches_query(item, &self.text, locale, fallback)
    }
}

pub fn matches_query(item: &CatalogItem, query: &str, locale: Locale, fallback: Locale) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty() || item.flattened_text(locale, fallback).contains(&query)
}

pub fn matches_filter(item: &CatalogItem, tags: &BTreeSet<String>) -> bool {
    tags.is_empty() || tags.iter().any(|tag| item.tags.contains(tag))
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// Rendered fragments for each region of the page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageViews {
    pub gallery: String,
    pub cuisine: String,
    pub tour_options: String,
    pub weather: String,
    pub itinerary: String,
    pub experiences: String,
    pub booking_summary: Option<String>,
    pub chat: String,
    pub map: String,
}

pub struct Renderer {
    fallback: Locale,
    currency_symbol: String,
}

impl Renderer {
    pub fn new(fallback: Locale, currency_symbol: impl Into<String>) -> Self {
        Self {
            fallback,
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn fallback(&self) -> Locale {
        self.fallback
    }

    pub fn render(&self, section: Section<'_>, locale: Locale) -> String {
        match section {
            Section::Destinations(items) => items
                .iter()
                .map(|item| self.render_destination(item, locale))
                .collect(),
            Section::Cuisine(items) => items
                .iter()
                .map(|item| self.render_dish(item, locale))
                .collect(),
            Section::Tours(tours) => tours
                .iter()
                .map(|tour| self.render_tour_option(tour))
                .collect(),
        }
    }

    fn localized_text<'a>(&self, item: &'a CatalogItem, locale: Locale) -> &'a str {
        match item.text_for(locale, self.fallback) {
            Some(text) => text,
            None => {
                tracing::warn!(item = %item.name, %locale, "No localized text for item");
                ""
            }
        }
    }

    fn render_image(&self, src: &str, alt: &str) -> String {
        format!(
            "<img src=\"{src}\" alt=\"{alt}\" data-lightbox=\"{src}\">",
            src = src,
            alt = alt
        )
    }

    fn render_destination(&self, item: &CatalogItem, locale: Locale) -> String {
        let mut html = format!(
            "<div class=\"destination\" data-tags=\"{}\">\n",
            item.tag_list()
        );
        if let Some(image) = &item.media.image {
            let _ = writeln!(html, "    {}", self.render_image(image, &item.name));
        }
        let _ = writeln!(html, "    <h3>{}</h3>", item.name);
        let _ = writeln!(html, "    <p>{}</p>", self.localized_text(item, locale));
        html.push_str("</div>\n");
        html
    }

    fn render_dish(&self, item: &CatalogItem, locale: Locale) -> String {
        let mut html = format!("<div class=\"dish\" data-tags=\"{}\">\n", item.tag_list());
        let _ = writeln!(html, "    <h3>{}</h3>", item.name);
        if item.media.image.is_some() || item.media.video.is_some() {
            html.push_str("    <div class=\"media\">\n");
            if let Some(image) = &item.media.image {
                let _ = writeln!(html, "        {}", self.render_image(image, &item.name));
            }
            if let Some(video) = &item.media.video {
                let _ = writeln!(
                    html,
                    "        <iframe width=\"300\" height=\"200\" src=\"{}\" title=\"Video about {}\" frameborder=\"0\" allowfullscreen></iframe>",
                    video, item.name
                );
            }
            html.push_str("    </div>\n");
        }
        let _ = writeln!(html, "    <p>{}</p>", self.localized_text(item, locale));
        html.push_str("</div>\n");
        html
    }

    fn render_tour_option(&self, tour: &TourOffering) -> String {
        format!(
            "<option value=\"{}\">{}</option>\n",
            TourSelection::encode(tour),
            tour.option_label(&self.currency_symbol)
        )
    }

    pub fn render_weather(&self, weather: &Weather, locale: Locale) -> String {
        format!(
            "<p>{}: {}°C, {}</p>\n<p>{}: {}%</p>\n",
            messages::weather_heading(locale),
            weather.temp,
            weather.condition,
            messages::humidity(locale),
            weather.humidity
        )
    }

    pub fn render_itinerary(&self, entries: &[ItineraryEntry], locale: Locale) -> String {
        let remove = messages::remove(locale);
        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                format!(
                    "<div class=\"itinerary-item\">\n    <span>{} - {}</span>\n    <button data-action=\"remove-itinerary\" data-index=\"{}\" aria-label=\"{}\">{}</button>\n</div>\n",
                    escape_html(&entry.activity),
                    escape_html(&entry.date),
                    index,
                    remove,
                    remove
                )
            })
            .collect()
    }

    // Newest experience first
    pub fn render_experiences(&self, experiences: &[Experience]) -> String {
        experiences
            .iter()
            .rev()
            .map(|exp| {
                let photo = exp
                    .photo
                    .as_deref()
                    .map(|src| format!("<img src=\"{}\" alt=\"User Photo\">", escape_html(src)))
                    .unwrap_or_default();
                format!(
                    "<div class=\"experience\"><p>\"{}\" - {}, {}</p>{}</div>\n",
                    escape_html(&exp.text),
                    messages::experience_author(),
                    exp.created_at.format("%Y"),
                    photo
                )
            })
            .collect()
    }

    pub fn render_booking_summary(&self, booking: &Booking, locale: Locale) -> String {
        let total = format!("{}{}", self.currency_symbol, booking.total);
        format!(
            "<p class=\"notification\">{}</p>\n",
            messages::booking_summary(
                locale,
                &booking.tour,
                &booking.date.to_string(),
                booking.guests,
                &total
            )
        )
    }

    pub fn render_chat(&self, transcript: &[ChatMessage], locale: Locale) -> String {
        transcript
            .iter()
            .map(|message| {
                let (class, author) = match message.author {
                    ChatAuthor::Visitor => ("chat-message", messages::chat_you(locale)),
                    ChatAuthor::Support => {
                        ("chat-message notification", messages::chat_support(locale))
                    }
                };
                format!(
                    "<div class=\"{}\">{}: {}</div>\n",
                    class,
                    author,
                    escape_html(&message.text)
                )
            })
            .collect()
    }

    pub fn render_map(&self, map: &MapView) -> String {
        format!(
            "<div id=\"map\" data-map=\"{}\"></div>\n",
            escape_html(&map.to_json())
        )
    }

    pub fn render_page(&self, views: &PageViews, locale: Locale) -> String {
        let title = |section| messages::section_title(locale, section);
        let mut html = String::new();
        let _ = writeln!(html, "<!DOCTYPE html>\n<html lang=\"{}\">", locale);
        html.push_str("<head><meta charset=\"utf-8\"><title>Phú Quốc</title></head>\n<body>\n");

        let _ = write!(
            html,
            "<section id=\"weather\">\n<h2>{}</h2>\n{}</section>\n",
            title(PageSection::Weather),
            views.weather
        );
        let _ = write!(
            html,
            "<section id=\"destinations\">\n<h2>{}</h2>\n<div id=\"destination-gallery\">\n{}</div>\n</section>\n",
            title(PageSection::Destinations),
            views.gallery
        );
        let _ = write!(
            html,
            "<section id=\"cuisine\">\n<h2>{}</h2>\n<div id=\"cuisine-list\">\n{}</div>\n</section>\n",
            title(PageSection::Cuisine),
            views.cuisine
        );
        let _ = write!(
            html,
            "<section id=\"booking\">\n<h2>{}</h2>\n<select id=\"tour\">\n{}</select>\n<div id=\"booking-summary\">{}</div>\n</section>\n",
            title(PageSection::Booking),
            views.tour_options,
            views.booking_summary.as_deref().unwrap_or_default()
        );
        let _ = write!(
            html,
            "<section id=\"itinerary\">\n<h2>{}</h2>\n<div id=\"itinerary-items\">\n{}</div>\n</section>\n",
            title(PageSection::Itinerary),
            views.itinerary
        );
        let _ = write!(
            html,
            "<section id=\"experiences\">\n<h2>{}</h2>\n<div id=\"experience-list\">\n{}</div>\n</section>\n",
            title(PageSection::Experiences),
            views.experiences
        );
        let _ = write!(
            html,
            "<section id=\"map-section\">\n<h2>{}</h2>\n{}</section>\n",
            title(PageSection::Map),
            views.map
        );
        let _ = write!(
            html,
            "<aside id=\"chat-box\">\n<h2>{}</h2>\n<div id=\"chat-messages\">\n{}</div>\n</aside>\n",
            title(PageSection::Chat),
            views.chat
        );
        html.push_str("</body>\n</html>\n");
        html
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Locale::En, "$")
    }
}

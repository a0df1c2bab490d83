// Content source: where the catalog and weather come from
// The mock stands in for a remote API, so both reads are async even though nothing blocks today.

use crate::catalog::{Catalog, CatalogItem, Coordinates, Media, Price, TourOffering, Weather};
use crate::locale::Locale;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Content source unreachable: {0}")]
    Unreachable(String),
}

#[async_trait]
pub trait ContentSource: Send + Sync + 'static {
    // Destinations, cuisine and tours
    async fn fetch_catalog(&self) -> Result<Catalog, FetchError>;

    // Current conditions on the island
    async fn fetch_weather(&self) -> Result<Weather, FetchError>;
}

// Fixed Phú Quốc content with an optional simulated round trip
pub struct MockContentSource {
    latency: Option<Duration>,
}

impl MockContentSource {
    pub fn new() -> Self {
        Self { latency: None }
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: (!latency.is_zero()).then_some(latency),
        }
    }

    async fn simulate_round_trip(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

impl Default for MockContentSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentSource for MockContentSource {
    async fn fetch_catalog(&self) -> Result<Catalog, FetchError> {
        self.simulate_round_trip().await;
        Ok(phu_quoc_catalog())
    }

    async fn fetch_weather(&self) -> Result<Weather, FetchError> {
        self.simulate_round_trip().await;
        Ok(Weather {
            temp: 28,
            condition: "Sunny".to_string(),
            humidity: 75,
        })
    }
}

fn item(
    name: &str,
    tags: &[&str],
    en: &str,
    vi: &str,
    media: Media,
    coordinates: Option<Coordinates>,
) -> CatalogItem {
    CatalogItem {
        name: name.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        localized_text: BTreeMap::from([
            (Locale::En, en.to_string()),
            (Locale::Vi, vi.to_string()),
        ]),
        media,
        coordinates,
    }
}

fn tour(name: &str, price: u64, dates: &[(i32, u32, u32)]) -> TourOffering {
    TourOffering {
        name: name.to_string(),
        price: Price::from_units(price),
        available_dates: dates
            .iter()
            .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
            .collect::<BTreeSet<_>>(),
    }
}

fn image(url: &str) -> Media {
    Media {
        image: Some(url.to_string()),
        video: None,
    }
}

fn image_and_video(img: &str, video: &str) -> Media {
    Media {
        image: Some(img.to_string()),
        video: Some(video.to_string()),
    }
}

pub fn phu_quoc_catalog() -> Catalog {
    const DISH_VIDEO: &str = "https://www.youtube.com/embed/dQw4w9WgXcQ";

    Catalog {
        destinations: vec![
            item(
                "Sao Beach",
                &["beach"],
                "A serene escape with white sands.",
                "Nơi thư giãn yên bình với cát trắng.",
                image("https://via.placeholder.com/400x300?text=Sao+Beach"),
                Some(Coordinates {
                    lat: 10.1055,
                    lng: 103.9666,
                }),
            ),
            item(
                "An Thoi Islands",
                &["tour"],
                "Perfect for snorkeling and diving.",
                "Hoàn hảo để lặn ngắm san hô.",
                image("https://via.placeholder.com/400x300?text=An+Thoi"),
                Some(Coordinates {
                    lat: 9.9481,
                    lng: 104.0086,
                }),
            ),
        ],
        cuisine: vec![
            item(
                "Gỏi Cá Trích",
                &["food"],
                "Fresh herring with coconut.",
                "Cá trích tươi với dừa.",
                image_and_video(
                    "https://via.placeholder.com/300x200?text=Herring+Salad",
                    DISH_VIDEO,
                ),
                None,
            ),
            item(
                "Phú Quốc Fish Sauce",
                &["food"],
                "Island’s signature condiment.",
                "Nước mắm đặc trưng của đảo.",
                image_and_video(
                    "https://via.placeholder.com/300x200?text=Fish+Sauce",
                    DISH_VIDEO,
                ),
                None,
            ),
        ],
        tours: vec![
            tour("Snorkeling Tour", 50, &[(2025, 3, 10), (2025, 3, 12)]),
            tour("Sunset Boat Tour", 30, &[(2025, 3, 11), (2025, 3, 13)]),
            tour("Pepper Farm Visit", 20, &[(2025, 3, 10), (2025, 3, 14)]),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_mock_catalog_contents() {
        let source = MockContentSource::new();
        let catalog = source.fetch_catalog().await.unwrap();

        assert_eq!(catalog.destinations.len(), 2);
        assert_eq!(catalog.cuisine.len(), 2);
        assert_eq!(catalog.tours.len(), 3);

        let snorkeling = catalog.find_tour("Snorkeling Tour").unwrap();
        assert_eq!(snorkeling.price, Price::from_units(50));
        assert_eq!(snorkeling.available_dates.len(), 2);

        // Every item carries both locales
        for item in catalog.destinations.iter().chain(&catalog.cuisine) {
            for locale in Locale::ALL {
                assert!(item.localized_text.contains_key(&locale), "{}", item.name);
            }
        }
    }

    #[tokio::test]
    async fn test_fetches_are_deterministic() {
        let source = MockContentSource::new();
        assert_eq!(
            source.fetch_catalog().await.unwrap(),
            source.fetch_catalog().await.unwrap()
        );
        assert_eq!(
            source.fetch_weather().await.unwrap(),
            Weather {
                temp: 28,
                condition: "Sunny".to_string(),
                humidity: 75,
            }
        );
    }

    #[tokio::test]
    async fn test_latency_is_simulated() {
        let source = MockContentSource::with_latency(Duration::from_millis(30));
        let start = Instant::now();
        source.fetch_weather().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(30));
    }
}

// Map widget setup: fixed centre, one marker per destination
use crate::catalog::{CatalogItem, Coordinates};
use crate::config::MapConfig;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub title: String,
    pub position: Coordinates,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
}

impl MapView {
    // Destinations without coordinates get no marker
    pub fn from_destinations(config: &MapConfig, destinations: &[CatalogItem]) -> Self {
        let markers = destinations
            .iter()
            .filter_map(|dest| {
                dest.coordinates.map(|position| MapMarker {
                    title: dest.name.clone(),
                    position,
                    icon: config.marker_icon.clone(),
                })
            })
            .collect();

        Self {
            center: config.center,
            zoom: config.zoom,
            markers,
        }
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys, serialization cannot fail
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

//! Configuration for the map engine
//!
//! Every knob has a default matching the wildlife-centre page, so an empty
//! JSON object (or no file at all) gives the stock behaviour. Individual
//! fields can be overridden from a JSON file.

use crate::core::{
    constants::{
        DEFAULT_CENTER, DEFAULT_DATA_SOURCE, DEFAULT_ZOOM, GEOLOCATION_TIMEOUT_MS, LOCATE_ZOOM,
        MARKER_CULL_MARGIN, MAX_ZOOM, MIN_ZOOM, OSM_TILE_URL, TILE_CACHE_FLUSH_THRESHOLD,
        TILE_SIZE,
    },
    geo::LatLng,
};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the tile cache keeps itself from growing without bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum EvictionPolicy {
    /// Empty the whole cache on a zoom change once it holds more than `threshold` tiles.
    FlushAbove { threshold: usize },
    /// Keep at most `capacity` tiles, dropping the least recently used.
    Lru { capacity: usize },
}

impl Default for EvictionPolicy {
    fn default() -> Self {
        Self::FlushAbove {
            threshold: TILE_CACHE_FLUSH_THRESHOLD,
        }
    }
}

/// Options handed to the geolocation provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout_ms: u64,
    pub maximum_age_ms: u64,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout_ms: GEOLOCATION_TIMEOUT_MS,
            maximum_age_ms: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub default_center: LatLng,
    pub default_zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub locate_zoom: u8,
    pub tile_size: u32,
    pub tile_url: String,
    pub user_agent: String,
    pub eviction: EvictionPolicy,
    pub marker_cull_margin: f64,
    pub geolocation: PositionOptions,
    pub data_source: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center: LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            default_zoom: DEFAULT_ZOOM,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            locate_zoom: LOCATE_ZOOM,
            tile_size: TILE_SIZE,
            tile_url: OSM_TILE_URL.to_string(),
            user_agent: format!("wildmap/{}", env!("CARGO_PKG_VERSION")),
            eviction: EvictionPolicy::default(),
            marker_cull_margin: MARKER_CULL_MARGIN,
            geolocation: PositionOptions::default(),
            data_source: DEFAULT_DATA_SOURCE.to_string(),
        }
    }
}

impl MapConfig {
    /// Parses and validates a JSON configuration document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        log::debug!("loaded map config from {}", path.display());
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_zoom > self.max_zoom {
            return Err(MapError::Config(format!(
                "min_zoom {} is above max_zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.max_zoom > 30 {
            return Err(MapError::Config(format!(
                "max_zoom {} is beyond what tile addressing supports",
                self.max_zoom
            )));
        }
        if self.tile_size == 0 {
            return Err(MapError::Config("tile_size must be positive".into()));
        }
        if !self.default_center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "default centre {:?}",
                self.default_center
            )));
        }
        for placeholder in ["{z}", "{x}", "{y}"] {
            if !self.tile_url.contains(placeholder) {
                return Err(MapError::Config(format!(
                    "tile_url is missing {placeholder}"
                )));
            }
        }
        if !self.marker_cull_margin.is_finite() || self.marker_cull_margin < 0.0 {
            return Err(MapError::Config(format!(
                "marker_cull_margin must be a non-negative number, got {}",
                self.marker_cull_margin
            )));
        }
        if let EvictionPolicy::Lru { capacity: 0 } = self.eviction {
            return Err(MapError::Config("LRU capacity must be positive".into()));
        }
        Ok(())
    }
}

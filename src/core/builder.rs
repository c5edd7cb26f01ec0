//! Map builder for fluent API configuration
//!
//! Wires a [`MapConfig`], a tile source, a tile fetcher and a geolocation
//! provider into a ready-to-render [`Map`].

use crate::{
    core::{config::MapConfig, geo::Point, map::Map},
    input::geolocation::{Geolocator, UnsupportedGeolocator},
    layers::tile::TileLayer,
    tiles::{
        cache::TileCache,
        loader::{HttpTileFetcher, TileFetcher, TileLoader},
        source::{TileSource, UrlTemplateSource},
    },
    Result,
};
use std::sync::Arc;

/// Builder for creating and configuring Map instances
pub struct MapBuilder {
    config: MapConfig,
    size: Point,
    device_pixel_ratio: f64,
    tile_source: Option<Arc<dyn TileSource>>,
    fetcher: Option<Arc<dyn TileFetcher>>,
    geolocator: Option<Box<dyn Geolocator>>,
}

impl MapBuilder {
    /// Create a new MapBuilder with default settings
    pub fn new() -> Self {
        Self {
            config: MapConfig::default(),
            size: Point::new(800.0, 600.0),
            device_pixel_ratio: 1.0,
            tile_source: None,
            fetcher: None,
            geolocator: None,
        }
    }

    pub fn config(mut self, config: MapConfig) -> Self {
        self.config = config;
        self
    }

    /// Canvas size in CSS pixels
    pub fn size(mut self, size: Point) -> Self {
        self.size = size;
        self
    }

    pub fn device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    /// Overrides the source built from `config.tile_url`
    pub fn tile_source(mut self, source: Arc<dyn TileSource>) -> Self {
        self.tile_source = Some(source);
        self
    }

    /// Overrides the HTTP fetcher
    pub fn fetcher(mut self, fetcher: Arc<dyn TileFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Defaults to [`UnsupportedGeolocator`]
    pub fn geolocator(mut self, geolocator: Box<dyn Geolocator>) -> Self {
        self.geolocator = Some(geolocator);
        self
    }

    /// Validates the configuration and builds the map. Nothing is rendered yet.
    pub fn build(self) -> Result<Map> {
        self.config.validate()?;

        let source = match self.tile_source {
            Some(source) => source,
            None => Arc::new(UrlTemplateSource::new(self.config.tile_url.clone())),
        };
        let fetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(HttpTileFetcher::with_user_agent(&self.config.user_agent)?),
        };
        let geolocator = self
            .geolocator
            .unwrap_or_else(|| Box::new(UnsupportedGeolocator));

        let (tx, rx) = crossbeam_channel::unbounded();
        let tiles = TileLayer::new(
            TileCache::new(self.config.eviction),
            TileLoader::new(source, fetcher, tx),
        );

        let mut map = Map::from_parts(self.config, self.size, tiles, rx, geolocator);
        map.viewport.set_size(self.size, self.device_pixel_ratio);
        Ok(map)
    }
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::loader::test_support::MemoryFetcher;
    use crate::MapError;

    #[test]
    fn test_defaults() {
        let map = MapBuilder::new()
            .fetcher(Arc::new(MemoryFetcher::default()))
            .build()
            .unwrap();
        assert_eq!(map.zoom(), 14);
        assert_eq!(map.center(), MapConfig::default().default_center);
        assert_eq!(map.frame_count(), 0);
        assert!(map.tiles().cache().is_empty());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = MapConfig {
            min_zoom: 12,
            max_zoom: 4,
            ..MapConfig::default()
        };
        let result = MapBuilder::new()
            .config(config)
            .fetcher(Arc::new(MemoryFetcher::default()))
            .build();
        assert!(matches!(result, Err(MapError::Config(_))));
    }

    #[test]
    fn test_tile_url_from_config() {
        let config = MapConfig {
            tile_url: "http://tiles.local/{z}/{x}/{y}.png".into(),
            ..MapConfig::default()
        };
        let map = MapBuilder::new()
            .config(config)
            .fetcher(Arc::new(MemoryFetcher::default()))
            .build()
            .unwrap();
        assert_eq!(
            map.tiles().url(crate::core::geo::TileCoord::new(1, 2, 3)),
            "http://tiles.local/3/1/2.png"
        );
    }

    #[test]
    fn test_device_pixel_ratio() {
        let map = MapBuilder::new()
            .size(Point::new(400.0, 300.0))
            .device_pixel_ratio(2.0)
            .fetcher(Arc::new(MemoryFetcher::default()))
            .build()
            .unwrap();
        assert_eq!(map.viewport.backing_size(), (800, 600));
    }
}

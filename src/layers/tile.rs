use crate::{
    core::{geo::{Point, TileCoord}, viewport::Viewport},
    rendering::context::{Color, RenderContext},
    tiles::{
        cache::{TileCache, TileState},
        loader::{TileEvent, TileLoader},
    },
};

/// Drawn in place of a tile that has no image (yet)
pub fn placeholder_color() -> Color {
    Color::black_alpha(0.03)
}

/// Per-frame tile counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileDrawStats {
    pub images: usize,
    pub placeholders: usize,
}

/// The raster base layer: owns the tile cache and the loader feeding it
pub struct TileLayer {
    cache: TileCache,
    loader: TileLoader,
}

impl TileLayer {
    pub fn new(cache: TileCache, loader: TileLoader) -> Self {
        Self { cache, loader }
    }

    /// Returns the tile's current state, starting a download on a cache miss.
    /// Never blocks on the network.
    pub fn tile(&mut self, coord: TileCoord) -> TileState {
        let loader = &self.loader;
        self.cache
            .get_or_request(coord, |coord| loader.start_download(coord))
    }

    /// Applies a finished download. Returns true if the cache changed and a redraw is due.
    pub fn apply(&mut self, event: TileEvent) -> bool {
        let image = event.result.ok();
        self.cache.complete(event.coord, image)
    }

    /// Draws every tile intersecting the viewport, image or placeholder
    pub fn draw(&mut self, context: &mut RenderContext, viewport: &Viewport) -> TileDrawStats {
        let size = viewport.tile_size as f64;
        let mut stats = TileDrawStats::default();
        let tiles = viewport.visible_tiles();
        self.cache.reserve(tiles.len());

        for visible in tiles {
            let bounds = (visible.origin, visible.origin.add(&Point::new(size, size)));
            match self.tile(visible.coord).image() {
                Some(image) => {
                    context.render_tile(visible.coord, image.clone(), bounds);
                    stats.images += 1;
                }
                None => {
                    context.render_placeholder(bounds, placeholder_color());
                    stats.placeholders += 1;
                }
            }
        }

        stats
    }

    pub fn cache(&self) -> &TileCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut TileCache {
        &mut self.cache
    }

    pub fn url(&self, coord: TileCoord) -> String {
        self.loader.url(coord)
    }
}

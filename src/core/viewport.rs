use crate::core::{
    constants::{DEFAULT_CENTER, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, TILE_SIZE},
    geo::{LatLng, Point, TileCoord},
};
use serde::{Deserialize, Serialize};

/// What the map is looking at: a centre and an integer zoom
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub center: LatLng,
    pub zoom: u8,
}

impl ViewState {
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self { center, zoom }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1), DEFAULT_ZOOM)
    }
}

/// Inclusive range of raw (unwrapped) tile columns and rows covering the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl TileRange {
    pub fn columns(&self) -> i64 {
        self.max_x - self.min_x + 1
    }

    pub fn rows(&self) -> i64 {
        self.max_y - self.min_y + 1
    }

    pub fn len(&self) -> usize {
        (self.columns().max(0) * self.rows().max(0)) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A tile to draw: where it comes from and where its top-left corner lands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleTile {
    pub coord: TileCoord,
    /// Top-left corner in CSS pixels relative to the canvas
    pub origin: Point,
}

/// Manages the current view of the map: view state plus canvas geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub view: ViewState,
    /// Canvas size in CSS pixels
    pub size: Point,
    pub device_pixel_ratio: f64,
    pub tile_size: u32,
    pub min_zoom: u8,
    pub max_zoom: u8,
}

impl Viewport {
    pub fn new(view: ViewState, size: Point) -> Self {
        Self {
            view,
            size,
            device_pixel_ratio: 1.0,
            tile_size: TILE_SIZE,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }

    pub fn center(&self) -> LatLng {
        self.view.center
    }

    pub fn zoom(&self) -> u8 {
        self.view.zoom
    }

    pub fn set_center(&mut self, center: LatLng) {
        self.view.center = center;
    }

    /// Sets the zoom level, clamping to the configured range
    pub fn set_zoom(&mut self, zoom: u8) {
        self.view.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Steps the zoom by `delta`, saturating at the limits
    pub fn zoom_by(&mut self, delta: i32) {
        let target = (self.view.zoom as i64 + delta as i64)
            .clamp(self.min_zoom as i64, self.max_zoom as i64);
        self.view.zoom = target as u8;
    }

    pub fn set_zoom_limits(&mut self, min_zoom: u8, max_zoom: u8) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.view.zoom = self.view.zoom.clamp(min_zoom, max_zoom);
    }

    /// Sets the canvas size; a non-positive or non-finite ratio falls back to 1
    pub fn set_size(&mut self, size: Point, device_pixel_ratio: f64) {
        self.size = size;
        self.device_pixel_ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
    }

    /// Size of the device-pixel backing store
    pub fn backing_size(&self) -> (u32, u32) {
        let w = (self.size.x * self.device_pixel_ratio).round().max(0.0);
        let h = (self.size.y * self.device_pixel_ratio).round().max(0.0);
        (w as u32, h as u32)
    }

    fn tile_size_f64(&self) -> f64 {
        self.tile_size as f64
    }

    /// World coordinate (in tiles) of the canvas's top-left corner
    pub fn top_left_world(&self) -> Point {
        let ts = self.tile_size_f64();
        let center = self.view.center.project(self.view.zoom);
        Point::new(
            center.x - (self.size.x / ts) / 2.0,
            center.y - (self.size.y / ts) / 2.0,
        )
    }

    /// Raw tile bounds covering the canvas, with one tile of padding on the high end
    pub fn tile_range(&self) -> TileRange {
        let ts = self.tile_size_f64();
        let top_left = self.top_left_world();
        TileRange {
            min_x: top_left.x.floor() as i64,
            min_y: top_left.y.floor() as i64,
            max_x: (top_left.x + self.size.x / ts).floor() as i64 + 1,
            max_y: (top_left.y + self.size.y / ts).floor() as i64 + 1,
        }
    }

    /// Every tile intersecting the canvas, column-major, with addresses wrapped/clamped
    pub fn visible_tiles(&self) -> Vec<VisibleTile> {
        let ts = self.tile_size_f64();
        let top_left = self.top_left_world();
        let range = self.tile_range();
        let mut tiles = Vec::with_capacity(range.len());

        for tx in range.min_x..=range.max_x {
            for ty in range.min_y..=range.max_y {
                tiles.push(VisibleTile {
                    coord: TileCoord::wrapped(tx, ty, self.view.zoom),
                    origin: Point::new(
                        (tx as f64 - top_left.x) * ts,
                        (ty as f64 - top_left.y) * ts,
                    ),
                });
            }
        }

        tiles
    }

    /// Converts a geographical coordinate to canvas pixel coordinates
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let world = lat_lng.project(self.view.zoom);
        world
            .subtract(&self.top_left_world())
            .multiply(self.tile_size_f64())
    }

    /// Converts canvas pixel coordinates back to a geographical coordinate
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        let world = self
            .top_left_world()
            .add(&pixel.multiply(1.0 / self.tile_size_f64()));
        LatLng::unproject(world, self.view.zoom)
    }

    /// Whether a canvas point lies within `margin` pixels of the canvas
    pub fn contains_with_margin(&self, pixel: &Point, margin: f64) -> bool {
        !(pixel.x < -margin
            || pixel.y < -margin
            || pixel.x > self.size.x + margin
            || pixel.y > self.size.y + margin)
    }

    /// Moves the map so content follows a pointer that moved by `delta` pixels
    pub fn pan(&mut self, delta: Point) {
        let zoom = self.view.zoom;
        let world = self.view.center.project(zoom);
        let shifted = world.subtract(&delta.multiply(1.0 / self.tile_size_f64()));
        self.view.center = LatLng::unproject(shifted, zoom);
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewState::default(), Point::new(800.0, 600.0))
    }
}

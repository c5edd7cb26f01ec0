use crate::{
    core::{
        config::MapConfig,
        geo::{LatLng, Point},
        viewport::{ViewState, Viewport},
    },
    input::geolocation::{Geolocator, LocationResult},
    layers::{
        marker::{draw_markers, AnimalMarker},
        tile::{TileDrawStats, TileLayer},
    },
    rendering::context::{Color, RenderContext},
    tiles::loader::TileEvent,
    ui::status::StatusLines,
};
use crossbeam_channel::{Receiver, Sender};

/// Fill painted under the tiles each frame
pub fn background_color() -> Color {
    Color::black_alpha(0.02)
}

/// The map engine for one page: view state, tile cache, markers and the
/// last rendered frame. Every public mutation re-renders before returning.
pub struct Map {
    pub viewport: Viewport,
    config: MapConfig,
    tiles: TileLayer,
    tile_events: Receiver<TileEvent>,
    markers: Vec<AnimalMarker>,
    focused: Option<String>,
    user_location: Option<LatLng>,
    geolocator: Box<dyn Geolocator>,
    location_tx: Sender<LocationResult>,
    location_rx: Receiver<LocationResult>,
    locating: bool,
    status: StatusLines,
    frame: RenderContext,
    frame_count: u64,
}

impl Map {
    /// Use [`crate::core::builder::MapBuilder`] to construct one.
    pub(crate) fn from_parts(
        config: MapConfig,
        size: Point,
        tiles: TileLayer,
        tile_events: Receiver<TileEvent>,
        geolocator: Box<dyn Geolocator>,
    ) -> Self {
        let mut viewport = Viewport::new(
            ViewState::new(config.default_center, config.default_zoom),
            size,
        );
        viewport.tile_size = config.tile_size;
        viewport.set_zoom_limits(config.min_zoom, config.max_zoom);

        let (location_tx, location_rx) = crossbeam_channel::unbounded();
        let status = StatusLines::new(viewport.zoom());

        Self {
            viewport,
            config,
            tiles,
            tile_events,
            markers: Vec::new(),
            focused: None,
            user_location: None,
            geolocator,
            location_tx,
            location_rx,
            locating: false,
            status,
            frame: RenderContext::default(),
            frame_count: 0,
        }
    }

    pub fn view(&self) -> ViewState {
        self.viewport.view
    }

    pub fn center(&self) -> LatLng {
        self.viewport.center()
    }

    pub fn zoom(&self) -> u8 {
        self.viewport.zoom()
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn user_location(&self) -> Option<LatLng> {
        self.user_location
    }

    pub fn markers(&self) -> &[AnimalMarker] {
        &self.markers
    }

    /// True between [`Map::request_location`] and the answer being applied
    pub fn is_locating(&self) -> bool {
        self.locating
    }

    pub fn status(&self) -> &StatusLines {
        &self.status
    }

    pub fn tiles(&self) -> &TileLayer {
        &self.tiles
    }

    pub fn tiles_mut(&mut self) -> &mut TileLayer {
        &mut self.tiles
    }

    /// The most recently rendered frame
    pub fn frame(&self) -> &RenderContext {
        &self.frame
    }

    /// How many times [`Map::render`] has run
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Replaces the marker set
    pub fn set_markers(&mut self, markers: Vec<AnimalMarker>) {
        self.markers = markers;
        self.render();
    }

    /// Centres on the animal with `id` and highlights it, keeping the zoom.
    ///
    /// Unknown ids leave everything untouched; the return value says whether
    /// the animal was found.
    pub fn focus(&mut self, id: &str) -> bool {
        let Some(marker) = self.markers.iter().find(|m| m.id == id) else {
            log::debug!("focus ignored, no animal with id {:?}", id);
            return false;
        };

        self.status.focus_on(&marker.name);
        self.viewport.set_center(marker.position);
        self.focused = Some(marker.id.clone());
        self.render();
        true
    }

    /// Steps the zoom by `delta` within the configured limits
    pub fn zoom_by(&mut self, delta: i32) {
        self.viewport.zoom_by(delta);
        self.tiles.cache_mut().on_zoom_change();
        self.render();
    }

    /// Back to the default centre; zoom and the user's pin stay as they are
    pub fn recenter(&mut self) {
        self.viewport.set_center(self.config.default_center);
        self.focused = None;
        self.status.focus_none();
        self.render();
    }

    /// Asks the geolocator for a position. The answer is applied by
    /// [`Map::pump`] (or directly through [`Map::apply_location`]).
    pub fn request_location(&mut self) {
        if !self.geolocator.is_supported() {
            self.status.location_unsupported();
            return;
        }

        self.status.location_requesting();
        self.locating = true;
        self.geolocator
            .locate(&self.config.geolocation, self.location_tx.clone());
    }

    /// Applies a geolocation answer
    pub fn apply_location(&mut self, result: LocationResult) {
        self.locating = false;
        match result {
            Ok(position) => {
                log::info!("user located at {}", position);
                self.user_location = Some(position);
                self.status.location_found(position);

                self.viewport.set_center(position);
                self.viewport.set_zoom(self.config.locate_zoom);
                self.tiles.cache_mut().clear();
                self.focused = None;
                self.status.focus_user();

                self.render();
            }
            Err(error) => {
                log::warn!("geolocation failed: {}", error);
                self.status.location_failed(&error);
            }
        }
    }

    /// Moves the map as if its content were dragged by `delta` CSS pixels
    pub fn pan_by_pixels(&mut self, delta: Point) {
        self.viewport.pan(delta);
        self.render();
    }

    /// New canvas size in CSS pixels
    pub fn resize(&mut self, size: Point, device_pixel_ratio: f64) {
        self.viewport.set_size(size, device_pixel_ratio);
        self.render();
    }

    /// Drains finished tile downloads and geolocation answers. Renders once if
    /// any tile changed. Returns whether anything was applied.
    pub fn pump(&mut self) -> bool {
        let mut tiles_changed = false;
        while let Ok(event) = self.tile_events.try_recv() {
            tiles_changed |= self.tiles.apply(event);
        }

        let mut located = false;
        while let Ok(result) = self.location_rx.try_recv() {
            self.apply_location(result);
            located = true;
        }

        if tiles_changed {
            self.render();
        }
        tiles_changed || located
    }

    /// Recomposes the frame: background, tiles, then pins
    pub fn render(&mut self) -> TileDrawStats {
        let (width, height) = self.viewport.backing_size();
        self.frame
            .begin_frame(width, height, self.viewport.device_pixel_ratio);

        self.frame.fill_rect(
            Point::new(0.0, 0.0),
            self.viewport.size,
            background_color(),
        );
        let stats = self.tiles.draw(&mut self.frame, &self.viewport);
        draw_markers(
            &mut self.frame,
            &self.viewport,
            &self.markers,
            self.focused.as_deref(),
            self.user_location,
            self.config.marker_cull_margin,
        );

        self.status.set_zoom(self.viewport.zoom());
        self.frame_count += 1;
        stats
    }
}

//! Core constants for the wildlife-centre map.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Lowest zoom the controls can reach.
pub const MIN_ZOOM: u8 = 3;

/// Highest zoom the controls can reach.
pub const MAX_ZOOM: u8 = 18;

/// Zoom the map opens at.
pub const DEFAULT_ZOOM: u8 = 14;

/// Zoom forced after a successful geolocation fix.
pub const LOCATE_ZOOM: u8 = 16;

/// Default centre (Liverpool) as (lat, lng).
pub const DEFAULT_CENTER: (f64, f64) = (53.4084, -2.9916);

/// The tile cache is flushed wholesale on a zoom change once it holds more entries than this.
pub const TILE_CACHE_FLUSH_THRESHOLD: usize = 300;

/// Markers further than this many CSS pixels outside the canvas are not drawn.
pub const MARKER_CULL_MARGIN: f64 = 30.0;

/// Pin radius in CSS pixels.
pub const MARKER_RADIUS: f64 = 7.0;

/// Offset of a pin's label from its centre.
pub const MARKER_LABEL_OFFSET: (f64, f64) = (10.0, -8.0);

/// Label font size in CSS pixels.
pub const MARKER_FONT_SIZE: f32 = 12.0;

/// Public OpenStreetMap tile endpoint.
pub const OSM_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Where the animal document lives when nothing else is configured.
pub const DEFAULT_DATA_SOURCE: &str = "data/animals.json";

/// Geolocation timeout used by the locate button.
pub const GEOLOCATION_TIMEOUT_MS: u64 = 10_000;

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Latitude inside [-90, 90] and both parts finite. Longitude is left unconstrained
    /// since the world wraps horizontally.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite() && (-90.0..=90.0).contains(&self.lat)
    }

    /// Projects onto spherical Web Mercator tile space at zoom `z`.
    ///
    /// The result is measured in tiles: at zoom `z` the world spans `2^z` tiles
    /// on each axis, with (0, 0) at the north-west corner. Latitudes outside
    /// the Mercator range are not checked here.
    pub fn project(&self, zoom: u8) -> Point {
        let sin = (self.lat * PI / 180.0).sin();
        let n = world_size(zoom);
        let x = (self.lng + 180.0) / 360.0 * n;
        let y = (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI)) * n;
        Point::new(x, y)
    }

    /// Inverse of [`LatLng::project`].
    pub fn unproject(world: Point, zoom: u8) -> Self {
        let n = world_size(zoom);
        let lng = world.x / n * 360.0 - 180.0;
        let lat_rad = (PI * (1.0 - 2.0 * world.y / n)).sinh().atan();
        Self::new(lat_rad.to_degrees(), lng)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

/// Number of tiles along one axis at the given zoom.
pub fn world_size(zoom: u8) -> f64 {
    2_f64.powi(zoom as i32)
}

/// Represents a point in screen or tile-space coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn floor(&self) -> Point {
        Point::new(self.x.floor(), self.y.floor())
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Address of a tile in the slippy map tile system.
///
/// Values built through [`TileCoord::wrapped`] always satisfy
/// `x, y < 2^z`: x wraps around the antimeridian, y is clamped at the poles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Normalises a raw tile column/row into a fetchable address.
    pub fn wrapped(x: i64, y: i64, z: u8) -> Self {
        let n = 1_i64 << z;
        let x = x.rem_euclid(n);
        let y = y.clamp(0, n - 1);
        Self::new(x as u32, y as u32, z)
    }

    /// Canonical cache key, `"z/x/y"`.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Checks if the tile is valid for its zoom level
    pub fn is_valid(&self) -> bool {
        let max_coord = 1_u64 << self.z;
        (self.x as u64) < max_coord && (self.y as u64) < max_coord
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(53.4084, -2.9916);
        assert_eq!(coord.lat, 53.4084);
        assert_eq!(coord.lng, -2.9916);
        assert!(coord.is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
        assert!(!LatLng::new(f64::NAN, 0.0).is_valid());
        assert!(LatLng::new(0.0, 540.0).is_valid());
    }

    #[test]
    fn test_projection_round_trip() {
        for zoom in 3..=18u8 {
            for &(lat, lng) in &[
                (0.0, 0.0),
                (53.4084, -2.9916),
                (-84.9, 179.9),
                (84.9, -179.9),
                (-33.8688, 151.2093),
            ] {
                let world = LatLng::new(lat, lng).project(zoom);
                let back = LatLng::unproject(world, zoom);
                assert!((back.lat - lat).abs() < 1e-6, "lat {lat} at z{zoom}");
                assert!((back.lng - lng).abs() < 1e-6, "lng {lng} at z{zoom}");
            }
        }
    }

    #[test]
    fn test_projection_reference_points() {
        let origin = LatLng::new(0.0, 0.0).project(3);
        assert!((origin.x - 4.0).abs() < 1e-12);
        assert!((origin.y - 4.0).abs() < 1e-12);

        let west = LatLng::new(0.0, -180.0).project(5);
        assert!(west.x.abs() < 1e-12);
    }

    #[test]
    fn test_tile_x_wraps() {
        assert_eq!(TileCoord::wrapped(-1, 0, 3).x, 7);
        assert_eq!(TileCoord::wrapped(8, 0, 3).x, 0);
        assert_eq!(TileCoord::wrapped(-17, 0, 3).x, 7);
        assert_eq!(TileCoord::wrapped(1_000_003, 0, 3).x, 3);
    }

    #[test]
    fn test_tile_y_clamps() {
        assert_eq!(TileCoord::wrapped(0, -1, 3).y, 0);
        assert_eq!(TileCoord::wrapped(0, 8, 3).y, 7);
        assert_eq!(TileCoord::wrapped(0, 500, 3).y, 7);
        assert!(TileCoord::wrapped(-40, 40, 18).is_valid());
    }

    #[test]
    fn test_tile_key() {
        let coord = TileCoord::wrapped(-1, 2, 3);
        assert_eq!(coord.key(), "3/7/2");
    }
}

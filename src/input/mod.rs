pub mod events;
pub mod geolocation;
pub mod handler;

// Re-export the essential types
pub use events::{EventHandled, InputEvent};
pub use geolocation::{
    FixedGeolocator, GeolocationError, Geolocator, LocationResult, UnsupportedGeolocator,
};
pub use handler::{DragState, InputHandler};

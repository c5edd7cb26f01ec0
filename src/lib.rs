//! # wildmap
//!
//! A tile-based map engine for a wildlife centre: Web Mercator viewport,
//! OpenStreetMap raster tiles fetched off the UI thread, animal pins with a
//! focus highlight, and a "locate me" flow that drops a pin for the visitor.
//!
//! The engine records each frame as a list of draw commands; the optional
//! `egui` feature adds a widget that paints them.

pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod rendering;
pub mod tiles;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    builder::MapBuilder,
    config::{EvictionPolicy, MapConfig},
    geo::{LatLng, Point, TileCoord},
    map::Map,
    viewport::{ViewState, Viewport},
};

pub use data::{focus_from_url, AnimalDocument, AnimalRecord};

pub use input::{
    events::InputEvent,
    geolocation::{GeolocationError, Geolocator, LocationResult},
    handler::InputHandler,
};

pub use layers::{marker::AnimalMarker, tile::TileLayer};

pub use rendering::{context::RenderContext, DrawCommand};

pub use tiles::{TileCache, TileSource, TileState};

#[cfg(feature = "egui")]
pub use ui::{controls::AnimalList, widget::MapWidget};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Data error: {0}")]
    Data(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Installs an env_logger backend, honouring `RUST_LOG`. Safe to call twice.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

//! Prelude module for common wildmap types and traits
//!
//! Re-exports what an application embedding the map usually needs, for
//! `use wildmap::prelude::*;`

pub use crate::core::{
    builder::MapBuilder,
    config::{EvictionPolicy, MapConfig, PositionOptions},
    geo::{LatLng, Point, TileCoord},
    map::Map,
    viewport::{TileRange, ViewState, Viewport, VisibleTile},
};

pub use crate::data::{focus_from_url, AnimalDocument, AnimalRecord};

pub use crate::input::{
    events::{EventHandled, InputEvent},
    geolocation::{
        FixedGeolocator, GeolocationError, Geolocator, LocationResult, UnsupportedGeolocator,
    },
    handler::{DragState, InputHandler},
};

pub use crate::layers::{
    marker::{AnimalMarker, MarkerKind},
    tile::{TileDrawStats, TileLayer},
};

pub use crate::tiles::{
    cache::{TileCache, TileState},
    loader::{HttpTileFetcher, TileEvent, TileFetcher, TileImage, TileLoader},
    source::{TileSource, UrlTemplateSource},
};

pub use crate::rendering::context::{Color, DrawCommand, PinStyle, RenderContext};

pub use crate::ui::status::StatusLines;

#[cfg(feature = "egui")]
pub use crate::ui::{
    controls::{control_bar, AnimalList},
    widget::MapWidget,
};

pub use crate::{Error as MapError, Result};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};

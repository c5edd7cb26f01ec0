pub mod marker;
pub mod tile;

pub use marker::{draw_markers, AnimalMarker, MarkerKind};
pub use tile::{TileDrawStats, TileLayer};

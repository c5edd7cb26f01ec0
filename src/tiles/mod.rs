pub mod cache;
pub mod loader;
pub mod source;

// Re-exports for convenience
pub use cache::{TileCache, TileState};
pub use loader::{HttpTileFetcher, TileEvent, TileFetcher, TileImage, TileLoader};
pub use source::{TileSource, UrlTemplateSource};

pub mod context;

// Re-export main types
pub use context::{Color, DrawCommand, PinStyle, RenderContext};

use crate::{
    core::geo::{Point, TileCoord},
    tiles::loader::TileImage,
};
use serde::{Deserialize, Serialize};

/// 8-bit RGBA colour, unpremultiplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Black at the given opacity (0.0..=1.0), like CSS `rgba(0,0,0,alpha)`
    pub fn black_alpha(alpha: f32) -> Self {
        Self::rgba(0, 0, 0, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

#[cfg(feature = "egui")]
impl From<Color> for egui::Color32 {
    fn from(c: Color) -> Self {
        egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
    }
}

/// Styles for a map pin
#[derive(Debug, Clone, PartialEq)]
pub struct PinStyle {
    pub fill_color: Color,
    pub stroke_color: Color,
    pub stroke_width: f32,
    pub radius: f32,
    pub label_color: Color,
    pub label_offset: Point,
    pub font_size: f32,
}

/// Commands that can be issued to the render context. Coordinates are CSS
/// pixels; the backend scales by the device pixel ratio.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill {
        min: Point,
        max: Point,
        color: Color,
    },
    Tile {
        coord: TileCoord,
        image: TileImage,
        bounds: (Point, Point), // min, max screen coordinates
    },
    Placeholder {
        bounds: (Point, Point),
        color: Color,
    },
    Pin {
        position: Point,
        label: String,
        style: PinStyle,
    },
}

/// One frame's worth of drawing, recorded for a backend to replay
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    /// Backing store size in device pixels
    pub width: u32,
    pub height: u32,
    pub device_pixel_ratio: f64,
    pub drawing_queue: Vec<DrawCommand>,
}

impl RenderContext {
    pub fn new(width: u32, height: u32, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
            drawing_queue: Vec::new(),
        }
    }

    /// Resizes the backing store and drops the previous frame
    pub fn begin_frame(&mut self, width: u32, height: u32, device_pixel_ratio: f64) {
        self.width = width;
        self.height = height;
        self.device_pixel_ratio = device_pixel_ratio;
        self.drawing_queue.clear();
    }

    pub fn fill_rect(&mut self, min: Point, max: Point, color: Color) {
        self.drawing_queue.push(DrawCommand::Fill { min, max, color });
    }

    pub fn render_tile(&mut self, coord: TileCoord, image: TileImage, bounds: (Point, Point)) {
        self.drawing_queue.push(DrawCommand::Tile {
            coord,
            image,
            bounds,
        });
    }

    pub fn render_placeholder(&mut self, bounds: (Point, Point), color: Color) {
        self.drawing_queue
            .push(DrawCommand::Placeholder { bounds, color });
    }

    pub fn render_pin(&mut self, position: Point, label: &str, style: &PinStyle) {
        self.drawing_queue.push(DrawCommand::Pin {
            position,
            label: label.to_string(),
            style: style.clone(),
        });
    }

    /// Get the current drawing queue
    pub fn get_drawing_queue(&self) -> &[DrawCommand] {
        &self.drawing_queue
    }

    /// Labels of every pin in the frame, in draw order
    pub fn pin_labels(&self) -> Vec<&str> {
        self.drawing_queue
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Pin { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_alpha() {
        assert_eq!(Color::black_alpha(0.35), Color::rgba(0, 0, 0, 89));
        assert_eq!(Color::black_alpha(2.0).a, 255);
    }

    #[test]
    fn test_begin_frame_clears_queue() {
        let mut ctx = RenderContext::new(10, 10, 1.0);
        ctx.fill_rect(Point::new(0.0, 0.0), Point::new(10.0, 10.0), Color::rgb(1, 2, 3));
        assert_eq!(ctx.get_drawing_queue().len(), 1);

        ctx.begin_frame(20, 30, 2.0);
        assert!(ctx.get_drawing_queue().is_empty());
        assert_eq!((ctx.width, ctx.height), (20, 30));
    }
}

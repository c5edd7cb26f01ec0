use crate::{
    core::{
        constants::{MARKER_FONT_SIZE, MARKER_LABEL_OFFSET, MARKER_RADIUS},
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    rendering::context::{Color, PinStyle, RenderContext},
};
use serde::{Deserialize, Serialize};

/// Label drawn next to the user's own position
pub const USER_LABEL: &str = "You";

/// An animal's pin on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalMarker {
    pub id: String,
    pub name: String,
    pub position: LatLng,
}

impl AnimalMarker {
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: LatLng) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
        }
    }
}

/// What a pin represents; decides its fill colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Animal,
    Focused,
    User,
}

impl MarkerKind {
    pub fn fill_color(&self) -> Color {
        match self {
            MarkerKind::Animal => Color::rgb(0x2b, 0x59, 0xff),
            MarkerKind::Focused => Color::rgb(0xef, 0x44, 0x44),
            MarkerKind::User => Color::rgb(0x06, 0xb6, 0xd4),
        }
    }

    pub fn style(&self) -> PinStyle {
        PinStyle {
            fill_color: self.fill_color(),
            stroke_color: Color::black_alpha(0.35),
            stroke_width: 1.0,
            radius: MARKER_RADIUS as f32,
            label_color: Color::black_alpha(0.65),
            label_offset: Point::new(MARKER_LABEL_OFFSET.0, MARKER_LABEL_OFFSET.1),
            font_size: MARKER_FONT_SIZE,
        }
    }
}

/// Draws the animal pins and, on top, the user's pin.
///
/// Pins whose centre lies more than `margin` pixels outside the canvas are
/// skipped. Returns the number of pins drawn.
pub fn draw_markers(
    context: &mut RenderContext,
    viewport: &Viewport,
    markers: &[AnimalMarker],
    focused: Option<&str>,
    user_location: Option<LatLng>,
    margin: f64,
) -> usize {
    let mut drawn = 0;

    for marker in markers {
        let pixel = viewport.lat_lng_to_pixel(&marker.position);
        if !viewport.contains_with_margin(&pixel, margin) {
            continue;
        }
        let kind = if focused == Some(marker.id.as_str()) {
            MarkerKind::Focused
        } else {
            MarkerKind::Animal
        };
        context.render_pin(pixel, &marker.name, &kind.style());
        drawn += 1;
    }

    if let Some(location) = user_location {
        let pixel = viewport.lat_lng_to_pixel(&location);
        if viewport.contains_with_margin(&pixel, margin) {
            context.render_pin(pixel, USER_LABEL, &MarkerKind::User.style());
            drawn += 1;
        }
    }

    drawn
}

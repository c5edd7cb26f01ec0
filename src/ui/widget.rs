//! egui backend: replays a [`Map`] frame onto a painter and feeds pointer
//! gestures back through an [`InputHandler`].

use crate::{
    core::geo::{Point, TileCoord},
    core::map::Map,
    input::{events::InputEvent, handler::InputHandler},
    rendering::context::{DrawCommand, RenderContext},
};
use egui::{
    pos2, Align2, Color32, ColorImage, FontId, Pos2, Rect, Response, Sense, Stroke, TextureHandle,
    TextureOptions, Ui,
};
use fxhash::{FxHashMap, FxHashSet};

/// The map canvas. Keeps one GPU texture per tile currently on screen.
#[derive(Default)]
pub struct MapWidget {
    textures: FxHashMap<TileCoord, TextureHandle>,
}

impl MapWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tile textures currently uploaded
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Lays out the canvas over all available space, routes input, and paints
    pub fn show(&mut self, ui: &mut Ui, map: &mut Map, input: &mut InputHandler) -> Response {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::drag());

        let size = Point::new(rect.width() as f64, rect.height() as f64);
        let ratio = ui.ctx().pixels_per_point() as f64;
        if map.viewport.size != size || map.viewport.device_pixel_ratio != ratio {
            input.handle_event(
                map,
                InputEvent::Resize {
                    size,
                    device_pixel_ratio: ratio,
                },
            );
        }

        let local = |pos: Pos2| Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64);
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                input.handle_event(map, InputEvent::PointerDown { position: local(pos) });
            }
        } else if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                input.handle_event(map, InputEvent::PointerMove { position: local(pos) });
            }
        }
        if response.drag_released() {
            input.handle_event(map, InputEvent::PointerUp);
        }

        self.paint(ui, rect, map.frame());
        response
    }

    fn paint(&mut self, ui: &Ui, rect: Rect, frame: &RenderContext) {
        let painter = ui.painter_at(rect);
        let to_screen = |p: &Point| pos2(rect.min.x + p.x as f32, rect.min.y + p.y as f32);
        let mut used = FxHashSet::default();

        for cmd in frame.get_drawing_queue() {
            match cmd {
                DrawCommand::Fill { min, max, color } => {
                    painter.rect_filled(
                        Rect::from_min_max(to_screen(min), to_screen(max)),
                        0.0,
                        Color32::from(*color),
                    );
                }
                DrawCommand::Tile {
                    coord,
                    image,
                    bounds,
                } => {
                    let texture = self.textures.entry(*coord).or_insert_with(|| {
                        let pixels = ColorImage::from_rgba_unmultiplied(
                            [image.width as usize, image.height as usize],
                            &image.rgba,
                        );
                        ui.ctx()
                            .load_texture(format!("tile-{coord}"), pixels, TextureOptions::LINEAR)
                    });
                    used.insert(*coord);

                    painter.image(
                        texture.id(),
                        Rect::from_min_max(to_screen(&bounds.0), to_screen(&bounds.1)),
                        Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                        Color32::WHITE,
                    );
                }
                DrawCommand::Placeholder { bounds, color } => {
                    painter.rect_filled(
                        Rect::from_min_max(to_screen(&bounds.0), to_screen(&bounds.1)),
                        0.0,
                        Color32::from(*color),
                    );
                }
                DrawCommand::Pin {
                    position,
                    label,
                    style,
                } => {
                    let center = to_screen(position);
                    painter.circle(
                        center,
                        style.radius,
                        Color32::from(style.fill_color),
                        Stroke::new(style.stroke_width, Color32::from(style.stroke_color)),
                    );
                    painter.text(
                        center + egui::vec2(style.label_offset.x as f32, style.label_offset.y as f32),
                        Align2::LEFT_BOTTOM,
                        label,
                        FontId::proportional(style.font_size),
                        Color32::from(style.label_color),
                    );
                }
            }
        }

        // Tiles that scrolled off or were flushed release their textures
        self.textures.retain(|coord, _| used.contains(coord));
    }
}

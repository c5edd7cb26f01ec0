//! Headless egui frames driving the map widget
#![cfg(feature = "egui")]

mod common;

use common::{wait_for_tiles, StubFetcher};
use egui::{vec2, Context, Pos2, RawInput, Rect};
use std::sync::Arc;
use wildmap::{
    rendering::DrawCommand, AnimalMarker, InputHandler, LatLng, Map, MapBuilder, MapWidget,
};

fn raw_input(width: f32, height: f32) -> RawInput {
    RawInput {
        screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(width, height))),
        ..Default::default()
    }
}

fn run_frame(ctx: &Context, input: RawInput, widget: &mut MapWidget, map: &mut Map) {
    let mut handler = InputHandler::new();
    let _ = ctx.run(input, |ctx| {
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                widget.show(ui, map, &mut handler);
            });
    });
}

fn map() -> Map {
    common::init_logging();
    let mut map = MapBuilder::new()
        .fetcher(Arc::new(StubFetcher::default()))
        .build()
        .unwrap();
    map.set_markers(vec![AnimalMarker::new(
        "otter",
        "Otter",
        LatLng::new(53.41, -3.0),
    )]);
    map
}

#[test]
fn test_widget_sizes_the_map_to_its_canvas() {
    let ctx = Context::default();
    let mut widget = MapWidget::new();
    let mut map = map();

    run_frame(&ctx, raw_input(640.0, 480.0), &mut widget, &mut map);

    assert_eq!(map.viewport.size.x, 640.0);
    assert_eq!(map.viewport.size.y, 480.0);
    assert_eq!(map.frame().width, 640);
}

#[test]
fn test_widget_uploads_one_texture_per_loaded_tile() {
    let ctx = Context::default();
    let mut widget = MapWidget::new();
    let mut map = map();

    run_frame(&ctx, raw_input(640.0, 480.0), &mut widget, &mut map);
    assert_eq!(widget.texture_count(), 0);

    wait_for_tiles(&mut map);
    run_frame(&ctx, raw_input(640.0, 480.0), &mut widget, &mut map);

    let tiles = map
        .frame()
        .get_drawing_queue()
        .iter()
        .filter(|cmd| matches!(cmd, DrawCommand::Tile { .. }))
        .count();
    assert!(tiles > 0);
    assert_eq!(widget.texture_count(), tiles);
}

#[test]
fn test_textures_are_released_when_tiles_leave_the_view() {
    let ctx = Context::default();
    let mut widget = MapWidget::new();
    let mut map = map();

    run_frame(&ctx, raw_input(640.0, 480.0), &mut widget, &mut map);
    wait_for_tiles(&mut map);
    run_frame(&ctx, raw_input(640.0, 480.0), &mut widget, &mut map);
    assert!(widget.texture_count() > 0);

    // Nothing at the new zoom has loaded yet, so nothing is drawn from a texture
    map.zoom_by(2);
    run_frame(&ctx, raw_input(640.0, 480.0), &mut widget, &mut map);
    assert_eq!(widget.texture_count(), 0);
}

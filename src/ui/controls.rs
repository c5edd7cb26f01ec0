use crate::{
    core::map::Map,
    data::animals::AnimalRecord,
    input::{events::InputEvent, handler::InputHandler},
};
use egui::{RichText, ScrollArea, Ui};

/// Locate, zoom and recenter buttons plus the three status readouts
pub fn control_bar(ui: &mut Ui, map: &mut Map, input: &mut InputHandler) {
    let mut clicked = None;

    ui.horizontal(|ui| {
        if ui.button("Locate me").clicked() {
            clicked = Some(InputEvent::Locate);
        }
        if ui.button("−").on_hover_text("Zoom out").clicked() {
            clicked = Some(InputEvent::ZoomOut);
        }
        if ui.button("+").on_hover_text("Zoom in").clicked() {
            clicked = Some(InputEvent::ZoomIn);
        }
        if ui.button("Recenter").clicked() {
            clicked = Some(InputEvent::Recenter);
        }
        ui.label(map.status().zoom.as_str());
    });

    ui.horizontal_wrapped(|ui| {
        ui.label(map.status().location.as_str());
        ui.separator();
        ui.label(map.status().focus.as_str());
    });

    if let Some(event) = clicked {
        input.handle_event(map, event);
    }
}

/// Scrollable list of animals, each with a "Focus on map" action
#[derive(Debug, Default)]
pub struct AnimalList {
    pub query: String,
}

impl AnimalList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(
        &mut self,
        ui: &mut Ui,
        records: &[AnimalRecord],
        map: &mut Map,
        input: &mut InputHandler,
    ) {
        ui.horizontal(|ui| {
            ui.label("Search");
            ui.text_edit_singleline(&mut self.query);
        });
        ui.separator();

        let focused = map.focused().map(str::to_owned);
        let mut focus_request = None;

        ScrollArea::vertical().show(ui, |ui| {
            let matching: Vec<&AnimalRecord> =
                records.iter().filter(|r| r.matches(&self.query)).collect();

            if matching.is_empty() {
                ui.label("No matching records");
                return;
            }

            for record in matching {
                let is_focused = focused.as_deref() == Some(record.id.as_str());
                ui.group(|ui| {
                    let name = RichText::new(&record.name).strong();
                    ui.label(if is_focused { name.underline() } else { name });
                    if !record.enclosure.is_empty() || !record.scientific.is_empty() {
                        ui.label(format!("{} • {}", record.enclosure, record.scientific));
                    }
                    if !record.status.is_empty() {
                        ui.small(record.status.as_str());
                    }
                    if ui.button("Focus on map").clicked() {
                        focus_request = Some(record.id.clone());
                    }
                });
            }
        });

        if let Some(id) = focus_request {
            input.handle_event(map, InputEvent::Focus { id });
        }
    }
}

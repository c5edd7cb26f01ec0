mod cli;

use anyhow::{anyhow, Context, Result};
use cli::{Args, USAGE};
use crossbeam_channel::{Receiver, TryRecvError};
use std::{thread, time::Duration};
use wildmap::{
    input::geolocation::{FixedGeolocator, Geolocator, UnsupportedGeolocator},
    ui::controls::control_bar,
    AnimalDocument, AnimalList, AnimalRecord, InputHandler, Map, MapBuilder, MapConfig,
    MapWidget,
};

/// Standalone animal map application
fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let args = Args::parse(&args)?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    wildmap::init_logging();

    let config = match &args.config {
        Some(path) => MapConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => MapConfig::default(),
    };
    let data_source = args
        .data
        .clone()
        .unwrap_or_else(|| config.data_source.clone());

    let geolocator: Box<dyn Geolocator> = match args.location {
        Some(position) => Box::new(FixedGeolocator::at(position)),
        None => Box::new(UnsupportedGeolocator),
    };
    let map = MapBuilder::new()
        .config(config)
        .geolocator(geolocator)
        .build()
        .context("building map")?;

    let app = WildMapApp::new(map, data_source, args.initial_focus());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Wildlife Centre Map"),
        ..Default::default()
    };

    eframe::run_native("wildmap-app", options, Box::new(|_cc| Box::new(app)))
        .map_err(|e| anyhow!("window closed with error: {e}"))
}

enum DataState {
    Loading(Receiver<wildmap::Result<AnimalDocument>>),
    Ready,
    Failed(String),
}

/// The main application struct
struct WildMapApp {
    map: Map,
    input: InputHandler,
    widget: MapWidget,
    list: AnimalList,
    records: Vec<AnimalRecord>,
    data_source: String,
    data: DataState,
    pending_focus: Option<String>,
}

impl WildMapApp {
    fn new(map: Map, data_source: String, focus: Option<String>) -> Self {
        let data = DataState::Loading(spawn_load(data_source.clone()));
        Self {
            map,
            input: InputHandler::new(),
            widget: MapWidget::new(),
            list: AnimalList::new(),
            records: Vec::new(),
            data_source,
            data,
            pending_focus: focus,
        }
    }

    fn poll_data(&mut self) {
        let DataState::Loading(rx) = &self.data else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                self.data = DataState::Failed("loader thread exited".into());
                return;
            }
        };

        match result {
            Ok(doc) => {
                self.map.set_markers(doc.markers());
                self.records = doc.animals;
                self.data = DataState::Ready;

                if let Some(id) = self.pending_focus.take() {
                    if !self.map.focus(&id) {
                        log::warn!("no animal with id {:?} to focus", id);
                    }
                }
            }
            Err(e) => {
                log::error!("could not load animal data from {}: {}", self.data_source, e);
                self.data = DataState::Failed(e.to_string());
            }
        }
    }

    fn animal_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Animals");
        control_bar(ui, &mut self.map, &mut self.input);
        ui.separator();

        match &self.data {
            DataState::Loading(_) => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading animal data…");
                });
            }
            DataState::Failed(message) => {
                ui.label("Could not load animal data.");
                ui.small(message.as_str());
                if ui.button("Retry").clicked() {
                    self.data = DataState::Loading(spawn_load(self.data_source.clone()));
                }
            }
            DataState::Ready => {
                self.list
                    .show(ui, &self.records, &mut self.map, &mut self.input);
            }
        }
    }
}

impl eframe::App for WildMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_data();
        self.map.pump();

        egui::SidePanel::left("animal_panel")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.animal_panel(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.widget.show(ui, &mut self.map, &mut self.input);
            });

        // Completions arrive on channels, so keep polling while work is in flight
        let waiting = self.map.tiles().cache().pending() > 0
            || matches!(self.data, DataState::Loading(_))
            || self.map.is_locating();
        if waiting {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}

fn spawn_load(source: String) -> Receiver<wildmap::Result<AnimalDocument>> {
    let (tx, rx) = crossbeam_channel::bounded(1);
    thread::spawn(move || {
        let _ = tx.send(AnimalDocument::load(&source));
    });
    rx
}

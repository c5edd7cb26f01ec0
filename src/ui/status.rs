use crate::{core::geo::LatLng, input::geolocation::GeolocationError};

/// The three readouts shown next to the map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLines {
    pub location: String,
    pub focus: String,
    pub zoom: String,
}

impl StatusLines {
    pub fn new(zoom: u8) -> Self {
        Self {
            location: "Location: not requested".into(),
            focus: "Focus: none".into(),
            zoom: zoom_text(zoom),
        }
    }

    pub fn location_requesting(&mut self) {
        self.location = "Location: requesting…".into();
    }

    pub fn location_unsupported(&mut self) {
        self.location = "Location: not supported".into();
    }

    pub fn location_found(&mut self, position: LatLng) {
        self.location = format!("Location: {position}");
    }

    pub fn location_failed(&mut self, error: &GeolocationError) {
        self.location = format!("Location: {error}");
    }

    pub fn focus_none(&mut self) {
        self.focus = "Focus: none".into();
    }

    pub fn focus_on(&mut self, name: &str) {
        self.focus = format!("Focus: {name}");
    }

    pub fn focus_user(&mut self) {
        self.focus = "Focus: your location".into();
    }

    pub fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom_text(zoom);
    }
}

fn zoom_text(zoom: u8) -> String {
    format!("Zoom: {zoom}")
}

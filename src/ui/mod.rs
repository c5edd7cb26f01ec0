pub mod status;

#[cfg(feature = "egui")]
pub mod controls;
#[cfg(feature = "egui")]
pub mod widget;

pub use status::StatusLines;

#[cfg(feature = "egui")]
pub use controls::{control_bar, AnimalList};
#[cfg(feature = "egui")]
pub use widget::MapWidget;

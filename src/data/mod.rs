pub mod animals;

pub use animals::{focus_from_url, AnimalDocument, AnimalRecord};

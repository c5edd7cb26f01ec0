//! Animal records: the JSON document that feeds the map's markers and list

use crate::{
    core::geo::LatLng,
    layers::marker::AnimalMarker,
    tiles::loader::HTTP_CLIENT,
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One animal as published in the data document. Only `id`, `name` and
/// `coords` are required; the rest feed the list rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalRecord {
    pub id: String,
    pub name: String,
    pub coords: LatLng,
    #[serde(default)]
    pub scientific: String,
    #[serde(default)]
    pub enclosure: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub help_tip: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

impl AnimalRecord {
    pub fn marker(&self) -> AnimalMarker {
        AnimalMarker::new(self.id.clone(), self.name.clone(), self.coords)
    }

    /// Case-insensitive match against name, scientific name, enclosure and summary
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        [&self.name, &self.scientific, &self.enclosure, &self.summary]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimalDocument {
    #[serde(default)]
    pub animals: Vec<AnimalRecord>,
}

impl AnimalDocument {
    /// Parses and validates a document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: Self = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Reads from a local file
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Downloads from an http(s) URL
    pub fn fetch(url: &str) -> Result<Self> {
        let resp = HTTP_CLIENT.get(url).send()?;
        if !resp.status().is_success() {
            return Err(MapError::Http(format!("{} for {}", resp.status(), url)));
        }
        Self::from_json_str(&resp.text()?)
    }

    /// Loads from a URL when `source` looks like one, otherwise from a file path
    pub fn load(source: &str) -> Result<Self> {
        let doc = if source.starts_with("http://") || source.starts_with("https://") {
            Self::fetch(source)?
        } else {
            Self::load_file(source)?
        };
        log::info!("loaded {} animal records from {}", doc.animals.len(), source);
        Ok(doc)
    }

    /// Rejects out-of-range coordinates and duplicate ids
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for record in &self.animals {
            if !record.coords.is_valid() {
                return Err(MapError::InvalidCoordinates(format!(
                    "animal {:?} has coordinates {}, {}",
                    record.id, record.coords.lat, record.coords.lng
                )));
            }
            if !seen.insert(record.id.as_str()) {
                return Err(MapError::Data(format!("duplicate animal id {:?}", record.id)));
            }
        }
        Ok(())
    }

    pub fn find(&self, id: &str) -> Option<&AnimalRecord> {
        self.animals.iter().find(|a| a.id == id)
    }

    pub fn markers(&self) -> Vec<AnimalMarker> {
        self.animals.iter().map(AnimalRecord::marker).collect()
    }
}

/// Pulls the `focus` query parameter out of a page URL
pub fn focus_from_url(page_url: &str) -> Option<String> {
    let url = reqwest::Url::parse(page_url).ok()?;
    let focus = url
        .query_pairs()
        .find(|(key, _)| key == "focus")
        .map(|(_, value)| value.into_owned())?;
    (!focus.is_empty()).then_some(focus)
}

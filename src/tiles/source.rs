use crate::core::{constants::OSM_TILE_URL, geo::TileCoord};

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;
}

/// Source driven by a `{z}/{x}/{y}` URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplateSource {
    template: String,
}

impl UrlTemplateSource {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// The public OpenStreetMap tile server.
    pub fn openstreetmap() -> Self {
        Self::new(OSM_TILE_URL)
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl Default for UrlTemplateSource {
    fn default() -> Self {
        Self::openstreetmap()
    }
}

impl TileSource for UrlTemplateSource {
    fn url(&self, coord: TileCoord) -> String {
        self.template
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openstreetmap_url() {
        let source = UrlTemplateSource::openstreetmap();
        assert_eq!(
            source.url(TileCoord::new(8141, 5299, 14)),
            "https://tile.openstreetmap.org/14/8141/5299.png"
        );
    }

    #[test]
    fn test_custom_template() {
        let source = UrlTemplateSource::new("http://localhost:8080/{z}-{y}-{x}.webp");
        assert_eq!(
            source.url(TileCoord::new(1, 2, 3)),
            "http://localhost:8080/3-2-1.webp"
        );
    }
}

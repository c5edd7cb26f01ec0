use super::source::TileSource;
use crate::core::geo::TileCoord;
use crate::{MapError, Result};
use crossbeam_channel::Sender;
use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use std::sync::Arc;
use std::thread;

/// Shared blocking HTTP client with a custom User-Agent so that public tile
/// servers (e.g. OpenStreetMap) don't reject the request. Building the client
/// once avoids the cost of TLS and connection pool setup for every tile.
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!("wildmap/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("failed to build reqwest blocking client")
});

/// A decoded tile bitmap, RGBA8, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Arc<Vec<u8>>,
}

impl TileImage {
    /// Decodes PNG/JPEG bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            rgba: Arc::new(rgba.into_raw()),
        })
    }

    /// A zero-sized bitmap decodes fine but has nothing to draw.
    pub fn is_drawable(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Outcome of one tile request, delivered on the loader's channel
#[derive(Debug)]
pub struct TileEvent {
    pub coord: TileCoord,
    pub result: Result<TileImage>,
}

/// Anything that can turn a tile URL into encoded image bytes. Called off the UI thread.
pub trait TileFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Fetches tiles over HTTP(S) with a blocking reqwest client.
pub struct HttpTileFetcher {
    client: Client,
}

impl HttpTileFetcher {
    pub fn new() -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
        }
    }

    pub fn with_user_agent(user_agent: &str) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

impl Default for HttpTileFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TileFetcher for HttpTileFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let resp = self.client.get(url).send()?;
        if !resp.status().is_success() {
            return Err(MapError::Http(format!("{} for {}", resp.status(), url)));
        }
        Ok(resp.bytes()?.to_vec())
    }
}

/// Fire-and-forget tile loader. Each request runs on a detached thread and
/// reports success or failure over a channel; nothing is retried or cancelled.
pub struct TileLoader {
    source: Arc<dyn TileSource>,
    fetcher: Arc<dyn TileFetcher>,
    tx: Sender<TileEvent>,
}

impl TileLoader {
    /// Create a new tile loader given a sender to report completed downloads.
    pub fn new(
        source: Arc<dyn TileSource>,
        fetcher: Arc<dyn TileFetcher>,
        tx: Sender<TileEvent>,
    ) -> Self {
        Self {
            source,
            fetcher,
            tx,
        }
    }

    pub fn url(&self, coord: TileCoord) -> String {
        self.source.url(coord)
    }

    /// Start downloading the specified tile.
    pub fn start_download(&self, coord: TileCoord) {
        let url = self.source.url(coord);
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();

        log::debug!("fetch tile {} from {}", coord, url);
        thread::spawn(move || {
            let result = fetcher
                .fetch(&url)
                .and_then(|bytes| TileImage::decode(&bytes));

            match &result {
                Ok(image) => log::debug!(
                    "loaded tile {} ({}x{})",
                    coord,
                    image.width,
                    image.height
                ),
                Err(e) => log::warn!("tile {} failed: {}", coord, e),
            }

            // The receiver is gone once the map is dropped; nothing left to notify.
            let _ = tx.send(TileEvent { coord, result });
        });
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use image::{ImageOutputFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Encodes a small solid PNG.
    pub fn png_bytes(size: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(size, size, Rgba([120, 200, 120, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageOutputFormat::Png)
            .expect("encode png");
        out.into_inner()
    }

    /// Serves a fixed PNG for every URL and counts requests.
    #[derive(Default)]
    pub struct MemoryFetcher {
        pub fail: bool,
        pub requests: AtomicUsize,
    }

    impl MemoryFetcher {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        pub fn count(&self) -> usize {
            self.requests.load(Ordering::SeqCst)
        }
    }

    impl TileFetcher for MemoryFetcher {
        fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(MapError::Http(format!("404 Not Found for {url}")))
            } else {
                Ok(png_bytes(4))
            }
        }
    }
}

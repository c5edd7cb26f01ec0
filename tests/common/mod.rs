#![allow(dead_code)]

use image::{ImageOutputFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use wildmap::{tiles::TileFetcher, Map, MapError};

/// Answers every tile URL with a tiny PNG, or with a 404 when `fail` is set
#[derive(Default)]
pub struct StubFetcher {
    pub fail: bool,
    pub requests: AtomicUsize,
}

impl TileFetcher for StubFetcher {
    fn fetch(&self, url: &str) -> wildmap::Result<Vec<u8>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(MapError::Http(format!("404 Not Found for {url}")));
        }
        let img = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageOutputFormat::Png)?;
        Ok(out.into_inner())
    }
}

/// Routes `log` output through the test harness; `RUST_LOG` picks the level
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Pumps the map until no tile is loading, or gives up after ten seconds
pub fn wait_for_tiles(map: &mut Map) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while map.tiles().cache().pending() > 0 && Instant::now() < deadline {
        map.pump();
        std::thread::sleep(Duration::from_millis(5));
    }
}

//! The dot overlay
//!
//! Owns the single live [`DotConfig`], computes where the window goes,
//! rasterizes the dot, and pushes the result to an [`OverlayBackend`].
//! Every failure here degrades (fallback shape, log line) instead of
//! propagating to the caller.

pub mod backend;
pub mod raster;
pub mod source;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, error, info, warn};

use crate::common::types::{Dimensions, DotConfig, Rect};

pub use backend::OverlayBackend;
pub use raster::DotBitmap;
pub use source::SourceImage;

/// Decoded custom image, keyed by path and modification time.
/// A failed decode is cached too so slider drags do not re-read a bad file.
struct CachedImage {
    path: PathBuf,
    modified: Option<SystemTime>,
    image: Option<SourceImage>,
}

pub struct OverlayWindow<B: OverlayBackend> {
    backend: B,
    config: DotConfig,
    image: Option<CachedImage>,
    bitmap: DotBitmap,
    display: Rect,
    bounds: Rect,
    visible: bool,
}

impl<B: OverlayBackend> OverlayWindow<B> {
    /// Create the overlay (initially unmapped) and paint `config` into it
    pub fn new(backend: B, config: DotConfig) -> Self {
        let size = Dimensions::square(config.diameter);
        let mut overlay = Self {
            backend,
            config: config.clone(),
            image: None,
            bitmap: DotBitmap::transparent(size),
            display: Rect::default(),
            bounds: Rect::default(),
            visible: false,
        };
        overlay.update_dot(config);
        overlay
    }

    /// Current rendering parameters
    pub fn config(&self) -> &DotConfig {
        &self.config
    }

    /// Window bounds after the last update
    #[cfg(test)]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Contents painted by the last update
    #[cfg(test)]
    pub fn bitmap(&self) -> &DotBitmap {
        &self.bitmap
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Replace the dot, resize the window to `diameter × diameter`,
    /// recenter it on the primary display and repaint.
    pub fn update_dot(&mut self, config: DotConfig) {
        self.config = config;

        match self.backend.primary_display() {
            Ok(display) => self.display = display,
            Err(err) => warn!(error = ?err, "Failed to query primary display, keeping previous geometry"),
        }
        self.bounds = self.display.centered(Dimensions::square(self.config.diameter));

        debug!(
            diameter = self.config.diameter,
            color = %self.config.color,
            shape = %self.config.shape,
            x = self.bounds.origin.x,
            y = self.bounds.origin.y,
            "Updating dot"
        );

        if let Err(err) = self.backend.configure(self.bounds) {
            error!(error = ?err, "Failed to move overlay window");
        }
        self.repaint();
    }

    pub fn show(&mut self) {
        self.set_visible(true);
    }

    pub fn hide(&mut self) {
        self.set_visible(false);
    }

    /// Show if hidden, hide if visible
    pub fn toggle(&mut self) {
        self.set_visible(!self.visible);
    }

    /// Forget the decoded image so the next repaint reads the file again
    pub fn reload_image(&mut self) {
        self.image = None;
    }

    /// Handle pending native events (exposure after being uncovered, etc.)
    pub fn process_events(&mut self) {
        match self.backend.needs_repaint() {
            Ok(true) => self.present(),
            Ok(false) => {}
            Err(err) => error!(error = ?err, "Failed to process overlay events"),
        }
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn set_visible(&mut self, visible: bool) {
        if let Err(err) = self.backend.set_visible(visible) {
            error!(error = ?err, visible, "Failed to change overlay visibility");
            return;
        }
        self.visible = visible;
        info!(visible, "Overlay visibility changed");
        if visible {
            self.present();
        }
    }

    fn repaint(&mut self) {
        let decoded = match self.config.effective_image().cloned() {
            Some(path) => {
                self.load_image(&path);
                self.image.as_ref().and_then(|cache| cache.image.as_ref())
            }
            None => None,
        };
        self.bitmap = raster::rasterize(&self.config, decoded);
        self.present();
    }

    fn present(&mut self) {
        if let Err(err) = self.backend.present(&self.bitmap) {
            error!(error = ?err, "Failed to paint overlay window");
        }
    }

    fn load_image(&mut self, path: &Path) {
        let modified = fs::metadata(path).and_then(|meta| meta.modified()).ok();
        let cached = matches!(
            &self.image,
            Some(cache) if cache.path == path && cache.modified == modified
        );
        if cached {
            return;
        }

        let image = match SourceImage::load(path) {
            Ok(image) => {
                let (width, height) = image.size();
                info!(path = ?path, width, height, "Loaded custom image");
                Some(image)
            }
            Err(err) => {
                warn!(path = ?path, error = ?err, "Error loading image, falling back to circle");
                None
            }
        };
        self.image = Some(CachedImage {
            path: path.to_path_buf(),
            modified,
            image,
        });
    }
}

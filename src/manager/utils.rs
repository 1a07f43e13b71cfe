use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::constants::{app, gui, resources};
use crate::resources::placeholder_icon_rgba;

/// Decoded icon pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconPixels {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl IconPixels {
    /// The generated solid square used when no icon file is usable
    pub fn placeholder() -> Self {
        Self {
            width: resources::ICON_SIZE,
            height: resources::ICON_SIZE,
            rgba: placeholder_icon_rgba(),
        }
    }

    /// Load `path`, or fall back to the placeholder. Never fails.
    pub fn load_or_placeholder(path: &Path) -> Self {
        match load_icon_rgba(path) {
            Ok(icon) => icon,
            Err(err) => {
                warn!(path = ?path, error = ?err, "Using fallback icon");
                Self::placeholder()
            }
        }
    }

    /// Convert RGBA to the ARGB layout of StatusNotifierItem pixmaps
    pub fn to_argb(&self) -> Vec<u8> {
        self.rgba
            .chunks_exact(4)
            .flat_map(|chunk| [chunk[3], chunk[0], chunk[1], chunk[2]]) // RGBA → ARGB
            .collect()
    }
}

/// Decode an icon file into RGBA8 pixels
pub fn load_icon_rgba(path: &Path) -> Result<IconPixels> {
    let image = image::open(path)
        .with_context(|| format!("Failed to decode icon {:?}", path))?
        .to_rgba8();
    Ok(IconPixels {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}

/// Tray icon pixmap from `path`, falling back to the generated square
pub fn load_tray_icon_pixmap(path: &Path) -> ksni::Icon {
    let icon = IconPixels::load_or_placeholder(path);
    ksni::Icon {
        width: icon.width as i32,
        height: icon.height as i32,
        data: icon.to_argb(),
    }
}

/// Window icon from `path` (same file as the tray icon)
pub fn load_window_icon(path: &Path) -> egui::IconData {
    let icon = IconPixels::load_or_placeholder(path);
    info!(
        "Loaded window icon ({} bytes, {}x{})",
        icon.rgba.len(),
        icon.width,
        icon.height
    );
    egui::IconData {
        rgba: icon.rgba,
        width: icon.width,
        height: icon.height,
    }
}

/// Native file picker for the custom image; `None` when dismissed
pub fn pick_image_file() -> Option<PathBuf> {
    let picked = rfd::FileDialog::new()
        .set_title(gui::IMAGE_DIALOG_TITLE)
        .add_filter(gui::IMAGE_FILTER_NAME, gui::IMAGE_EXTENSIONS)
        .pick_file();
    debug!(picked = ?picked, "Image picker closed");
    picked
}

/// Transient user-facing notifications
pub trait Notifier {
    fn notify(&self, summary: &str, body: &str, timeout: Duration);
}

/// Freedesktop notification via the session bus
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, summary: &str, body: &str, timeout: Duration) {
        let result = notify_rust::Notification::new()
            .appname(app::NAME)
            .summary(summary)
            .body(body)
            .icon("dialog-information")
            .timeout(notify_rust::Timeout::Milliseconds(timeout.as_millis() as u32))
            .show();
        if let Err(err) = result {
            warn!(error = %err, "Failed to show desktop notification");
        }
    }
}

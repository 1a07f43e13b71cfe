//! Control panel model
//!
//! Widget values and the window lifecycle, separate from egui so every
//! user action can be driven directly in tests. The live [`DotConfig`]
//! stays inside [`OverlayWindow`]; each action builds a new value and
//! hands it over through `update_dot`.

use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::common::color::HexColor;
use crate::common::types::dot::clamp_diameter;
use crate::common::types::{DotConfig, DotShape};
use crate::config::SettingsStore;
use crate::constants::{app, tray};
use crate::overlay::{OverlayBackend, OverlayWindow};

use super::lifecycle::{PanelEvent, PanelState};
use super::utils::Notifier;

pub struct ControlPanel {
    store: SettingsStore,
    notifier: Box<dyn Notifier>,
    size: u32,
    shape: DotShape,
    /// Last uploaded image, kept while another shape is selected
    remembered_image: Option<PathBuf>,
    color_label: String,
    image_label: String,
    state: PanelState,
}

impl ControlPanel {
    /// Load persisted settings and apply them to the controls and the overlay
    pub fn new<B: OverlayBackend>(
        store: SettingsStore,
        notifier: Box<dyn Notifier>,
        overlay: &mut OverlayWindow<B>,
    ) -> Self {
        let config = store.load();
        info!(
            diameter = config.diameter,
            color = %config.color,
            shape = %config.shape,
            image = ?config.image_path,
            "Applying stored settings"
        );

        let image_label = match &config.image_path {
            Some(path) if path.exists() => image_label_for(path),
            _ => String::new(),
        };

        let panel = Self {
            store,
            notifier,
            size: config.diameter,
            shape: config.shape,
            remembered_image: config.image_path.clone(),
            color_label: color_label_for(config.color),
            image_label,
            state: PanelState::default(),
        };
        overlay.update_dot(config);
        panel
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn shape(&self) -> DotShape {
        self.shape
    }

    pub fn color_label(&self) -> &str {
        &self.color_label
    }

    pub fn image_label(&self) -> &str {
        &self.image_label
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Upload button and filename label are only shown for custom images
    pub fn image_controls_visible(&self) -> bool {
        self.shape == DotShape::CustomImage
    }

    /// Slider moved
    pub fn set_size<B: OverlayBackend>(&mut self, diameter: u32, overlay: &mut OverlayWindow<B>) {
        self.size = clamp_diameter(diameter);
        self.push(overlay);
    }

    /// Shape selector changed
    pub fn select_shape<B: OverlayBackend>(&mut self, shape: DotShape, overlay: &mut OverlayWindow<B>) {
        debug!(shape = %shape, "Shape selected");
        self.shape = shape;
        self.push(overlay);
    }

    /// Color dialog closed; `None` means it was cancelled
    pub fn apply_color<B: OverlayBackend>(
        &mut self,
        color: Option<HexColor>,
        overlay: &mut OverlayWindow<B>,
    ) {
        let Some(color) = color else {
            debug!("Color dialog cancelled");
            return;
        };
        let mut config = overlay.config().clone();
        config.color = color;
        overlay.update_dot(config);
        self.color_label = color_label_for(color);
    }

    /// File picker closed; `None` means it was dismissed
    pub fn choose_image<B: OverlayBackend>(
        &mut self,
        path: Option<PathBuf>,
        overlay: &mut OverlayWindow<B>,
    ) {
        let Some(path) = path else {
            return;
        };
        info!(path = ?path, "Custom image selected");
        self.image_label = image_label_for(&path);
        self.remembered_image = Some(path);
        self.shape = DotShape::CustomImage;
        // Re-choosing the same path must re-read it
        overlay.reload_image();
        self.push(overlay);
    }

    /// "Minimize to Tray" button
    pub fn minimize<B: OverlayBackend>(&mut self, overlay: &OverlayWindow<B>) {
        self.hide_to_tray(PanelEvent::Minimize, overlay);
    }

    /// Window close button; never terminates
    pub fn request_close<B: OverlayBackend>(&mut self, overlay: &OverlayWindow<B>) {
        self.hide_to_tray(PanelEvent::CloseRequested, overlay);
    }

    /// Tray "Show Controls"
    pub fn show(&mut self) {
        self.state = self.state.transition(PanelEvent::Show);
    }

    /// Tray icon activation: restore only when hidden
    pub fn show_if_hidden(&mut self) {
        if self.state == PanelState::Minimized {
            self.show();
        }
    }

    /// Ctrl+H and tray "Toggle Crosshair"
    pub fn toggle_overlay<B: OverlayBackend>(&self, overlay: &mut OverlayWindow<B>) {
        overlay.toggle();
    }

    /// Tray "Exit": persist once and enter the terminal state
    pub fn exit<B: OverlayBackend>(&mut self, overlay: &OverlayWindow<B>) {
        if self.state == PanelState::Terminated {
            return;
        }
        self.save(overlay);
        self.state = self.state.transition(PanelEvent::Exit);
        info!("Exit requested");
    }

    fn hide_to_tray<B: OverlayBackend>(&mut self, event: PanelEvent, overlay: &OverlayWindow<B>) {
        if self.state == PanelState::Terminated {
            return;
        }
        self.save(overlay);
        let was_visible = self.state.is_visible();
        self.state = self.state.transition(event);
        if was_visible {
            self.notifier.notify(
                app::NAME,
                tray::MINIMIZED_MESSAGE,
                Duration::from_millis(tray::NOTIFICATION_TIMEOUT_MS as u64),
            );
        }
        info!(?event, "Control panel minimized to tray");
    }

    /// Build the config the controls describe and hand it to the overlay
    fn push<B: OverlayBackend>(&self, overlay: &mut OverlayWindow<B>) {
        let image_path = if self.shape == DotShape::CustomImage {
            self.remembered_image.clone()
        } else {
            None
        };
        let color = overlay.config().color;
        overlay.update_dot(DotConfig::new(self.size, color, self.shape, image_path));
    }

    /// The stored image path survives switching to another shape
    fn save<B: OverlayBackend>(&self, overlay: &OverlayWindow<B>) {
        let mut config = overlay.config().clone();
        if config.image_path.is_none() {
            config.image_path = self.remembered_image.clone();
        }
        if let Err(err) = self.store.save(&config) {
            error!(path = ?self.store.path(), error = ?err, "Failed to save settings");
        }
    }
}

fn color_label_for(color: HexColor) -> String {
    format!("Current Color: {}", color.name())
}

fn image_label_for(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    format!("Image: {}", name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::Rect;
    use crate::overlay::backend::testing::RecordingBackend;
    use image::{Rgba, RgbaImage};
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct RecordingNotifier {
        sent: Rc<RefCell<Vec<(String, String, Duration)>>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, summary: &str, body: &str, timeout: Duration) {
            self.sent
                .borrow_mut()
                .push((summary.to_string(), body.to_string(), timeout));
        }
    }

    struct Fixture {
        dir: TempDir,
        overlay: OverlayWindow<RecordingBackend>,
        panel: ControlPanel,
        notes: RecordingNotifier,
    }

    impl Fixture {
        fn settings_path(&self) -> PathBuf {
            self.dir.path().join("settings.json")
        }

        fn stored(&self) -> DotConfig {
            SettingsStore::new(self.settings_path()).load()
        }
    }

    fn fixture_with(settings: Option<&str>) -> Fixture {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        if let Some(contents) = settings {
            std::fs::write(&path, contents).unwrap();
        }
        let notes = RecordingNotifier::default();
        let mut overlay = OverlayWindow::new(
            RecordingBackend::with_display(Rect::new(0, 0, 1920, 1080)),
            DotConfig::default(),
        );
        let panel = ControlPanel::new(
            SettingsStore::new(path),
            Box::new(notes.clone()),
            &mut overlay,
        );
        Fixture {
            dir,
            overlay,
            panel,
            notes,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(None)
    }

    #[test]
    fn test_fresh_start_uses_defaults() {
        let f = fixture();

        assert_eq!(f.overlay.config(), &DotConfig::default());
        assert_eq!(f.panel.size(), 5);
        assert_eq!(f.panel.shape(), DotShape::Circle);
        assert_eq!(f.panel.color_label(), "Current Color: #00FFFF");
        assert_eq!(f.panel.image_label(), "");
        assert!(!f.panel.image_controls_visible());
        assert_eq!(f.panel.state(), PanelState::Visible);

        let bounds = f.overlay.bounds();
        assert_eq!((bounds.origin.x, bounds.origin.y), (957, 537));
        assert_eq!(f.overlay.bitmap().pixel(2, 2), [0x00, 0xFF, 0xFF, 0xFF]);
        assert!(!f.settings_path().exists());
    }

    #[test]
    fn test_size_change_updates_without_persisting() {
        let mut f = fixture();
        f.panel.set_size(40, &mut f.overlay);

        assert_eq!(f.overlay.config().diameter, 40);
        let bounds = f.overlay.bounds();
        assert_eq!((bounds.size.width, bounds.size.height), (40, 40));
        assert_eq!((bounds.origin.x, bounds.origin.y), (940, 520));
        assert!(!f.settings_path().exists());
    }

    #[test]
    fn test_size_is_clamped() {
        let mut f = fixture();
        f.panel.set_size(500, &mut f.overlay);
        assert_eq!(f.overlay.config().diameter, 100);
        f.panel.set_size(0, &mut f.overlay);
        assert_eq!(f.overlay.config().diameter, 3);
    }

    #[test]
    fn test_custom_image_without_upload_renders_circle() {
        let mut f = fixture();
        f.panel.set_size(20, &mut f.overlay);
        let circle = f.overlay.bitmap().clone();

        f.panel.select_shape(DotShape::CustomImage, &mut f.overlay);

        assert!(f.panel.image_controls_visible());
        assert_eq!(f.overlay.config().shape, DotShape::CustomImage);
        assert_eq!(f.overlay.bitmap(), &circle);
    }

    #[test]
    fn test_color_dialog_ok_and_cancel() {
        let mut f = fixture();
        let red = HexColor::parse("#FF0000").unwrap();

        f.panel.apply_color(Some(red), &mut f.overlay);
        assert_eq!(f.overlay.config().color, red);
        assert_eq!(f.panel.color_label(), "Current Color: #FF0000");

        let frames = f.overlay.backend().frames.len();
        f.panel.apply_color(None, &mut f.overlay);
        assert_eq!(f.overlay.config().color, red);
        assert_eq!(f.panel.color_label(), "Current Color: #FF0000");
        assert_eq!(f.overlay.backend().frames.len(), frames);
    }

    #[test]
    fn test_image_upload_forces_custom_image() {
        let mut f = fixture();
        let image = f.dir.path().join("reticle.png");
        RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255]))
            .save(&image)
            .unwrap();

        f.panel.choose_image(Some(image.clone()), &mut f.overlay);

        assert_eq!(f.panel.shape(), DotShape::CustomImage);
        assert_eq!(f.panel.image_label(), "Image: reticle.png");
        assert_eq!(f.overlay.config().image_path.as_deref(), Some(image.as_path()));
        assert_eq!(f.overlay.bitmap().pixel(2, 2), [255, 0, 0, 255]);
    }

    #[test]
    fn test_reuploading_same_path_reloads_it() {
        let mut f = fixture();
        let image = f.dir.path().join("reticle.png");
        std::fs::write(&image, b"corrupt").unwrap();
        f.panel.set_size(16, &mut f.overlay);

        f.panel.choose_image(Some(image.clone()), &mut f.overlay);
        assert_eq!(f.overlay.bitmap().pixel(8, 8), [0x00, 0xFF, 0xFF, 0xFF]);

        RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255]))
            .save(&image)
            .unwrap();
        f.panel.choose_image(Some(image), &mut f.overlay);
        assert_eq!(f.overlay.bitmap().pixel(8, 8), [255, 0, 0, 255]);
    }

    #[test]
    fn test_dismissed_picker_changes_nothing() {
        let mut f = fixture();
        let before = f.overlay.config().clone();
        f.panel.choose_image(None, &mut f.overlay);
        assert_eq!(f.overlay.config(), &before);
        assert_eq!(f.panel.shape(), DotShape::Circle);
    }

    #[test]
    fn test_switching_shape_remembers_image() {
        let mut f = fixture();
        let image = f.dir.path().join("reticle.png");
        RgbaImage::from_pixel(4, 4, Rgba([0, 255, 0, 255]))
            .save(&image)
            .unwrap();
        f.panel.choose_image(Some(image.clone()), &mut f.overlay);

        f.panel.select_shape(DotShape::Square, &mut f.overlay);
        assert!(!f.panel.image_controls_visible());
        assert_eq!(f.overlay.config().image_path, None);

        f.panel.select_shape(DotShape::CustomImage, &mut f.overlay);
        assert_eq!(f.overlay.config().image_path, Some(image));
    }

    #[test]
    fn test_close_saves_and_minimizes() {
        let mut f = fixture();
        f.overlay.show();
        f.panel.set_size(12, &mut f.overlay);

        f.panel.request_close(&f.overlay);

        assert_eq!(f.panel.state(), PanelState::Minimized);
        assert!(f.overlay.is_visible());
        assert_eq!(f.stored().diameter, 12);

        let sent = f.notes.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "Aim Dot");
        assert_eq!(sent[0].1, "Application minimized to tray");
        assert_eq!(sent[0].2, Duration::from_millis(2000));
    }

    #[test]
    fn test_minimize_button_saves_and_notifies() {
        let mut f = fixture();
        f.panel.minimize(&f.overlay);
        assert_eq!(f.panel.state(), PanelState::Minimized);
        assert!(f.settings_path().exists());
        assert_eq!(f.notes.sent.borrow().len(), 1);
    }

    #[test]
    fn test_show_and_activation() {
        let mut f = fixture();
        f.panel.show_if_hidden();
        assert_eq!(f.panel.state(), PanelState::Visible);

        f.panel.minimize(&f.overlay);
        f.panel.show_if_hidden();
        assert_eq!(f.panel.state(), PanelState::Visible);

        f.panel.minimize(&f.overlay);
        f.panel.show();
        assert_eq!(f.panel.state(), PanelState::Visible);
    }

    #[test]
    fn test_toggle_overlay() {
        let mut f = fixture();
        f.panel.toggle_overlay(&mut f.overlay);
        assert!(f.overlay.is_visible());
        f.panel.toggle_overlay(&mut f.overlay);
        assert!(!f.overlay.is_visible());
    }

    #[test]
    fn test_exit_saves_once_and_terminates() {
        let mut f = fixture();
        f.panel.set_size(33, &mut f.overlay);
        f.panel.exit(&f.overlay);

        assert_eq!(f.panel.state(), PanelState::Terminated);
        assert_eq!(f.stored().diameter, 33);

        std::fs::remove_file(f.settings_path()).unwrap();
        f.panel.exit(&f.overlay);
        f.panel.request_close(&f.overlay);
        f.panel.show();
        assert_eq!(f.panel.state(), PanelState::Terminated);
        assert!(!f.settings_path().exists());
        assert!(f.notes.sent.borrow().is_empty());
    }

    #[test]
    fn test_settings_round_trip_through_panel() {
        let mut f = fixture();
        let image = f.dir.path().join("reticle.png");
        RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]))
            .save(&image)
            .unwrap();
        f.panel.set_size(25, &mut f.overlay);
        f.panel
            .apply_color(HexColor::parse("#123456"), &mut f.overlay);
        f.panel.choose_image(Some(image.clone()), &mut f.overlay);
        f.panel.exit(&f.overlay);

        let contents = std::fs::read_to_string(f.settings_path()).unwrap();
        let restored = fixture_with(Some(&contents));
        assert_eq!(restored.overlay.config(), f.overlay.config());
        assert_eq!(restored.panel.image_label(), "Image: reticle.png");
        assert!(restored.panel.image_controls_visible());
    }

    #[test]
    fn test_missing_stored_image_keeps_shape_without_label() {
        let f = fixture_with(Some(
            r##"{"size": 9, "color": "#FF00FF", "shape": "Custom Image", "imagePath": "/nonexistent/aim.png"}"##,
        ));

        assert_eq!(f.panel.shape(), DotShape::CustomImage);
        assert!(f.panel.image_controls_visible());
        assert_eq!(f.panel.image_label(), "");
        assert_eq!(
            f.overlay.config().image_path.as_deref(),
            Some(Path::new("/nonexistent/aim.png"))
        );
        // Unreadable image falls back to a magenta circle
        assert_eq!(f.overlay.bitmap().pixel(4, 4), [0xFF, 0x00, 0xFF, 0xFF]);
    }

    #[test]
    fn test_unknown_shape_renders_like_square() {
        let bogus = fixture_with(Some(r#"{"size": 10, "shape": "bogus"}"#));
        let square = fixture_with(Some(r#"{"size": 10, "shape": "Square"}"#));
        assert_eq!(bogus.overlay.bitmap(), square.overlay.bitmap());
        assert_eq!(bogus.panel.shape(), DotShape::Square);
    }

    #[test]
    fn test_save_failure_is_not_fatal() {
        let mut f = fixture();
        // A directory where the settings file should be makes the write fail
        std::fs::create_dir_all(f.settings_path()).unwrap();
        f.panel.minimize(&f.overlay);
        assert_eq!(f.panel.state(), PanelState::Minimized);
    }
}

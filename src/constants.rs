//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Application identity
pub mod app {
    /// Human-readable application name (window titles, notifications, tray)
    pub const NAME: &str = "Aim Dot";

    /// Identifier used for the tray item and WM_CLASS
    pub const ID: &str = "aim-dot";
}

/// X11 protocol and rendering constants
pub mod x11 {
    /// Standard 32-bit color depth required for translucent windows
    pub const ARGB_DEPTH: u8 = 32;

    /// Override redirect flag for unmanaged windows
    pub const OVERRIDE_REDIRECT: u32 = 1;

    /// WM_CLASS value for the overlay window (instance\0class\0)
    pub const WM_CLASS: &[u8] = b"aim-dot\0aim-dot\0";

    /// Window title for the overlay (visible in xprop/xwininfo only)
    pub const OVERLAY_TITLE: &[u8] = b"Aim Dot Overlay";
}

/// Configuration paths and filenames
pub mod config {
    /// Application directory name under XDG config
    pub const APP_DIR: &str = "aim-dot";

    /// Settings filename
    pub const FILENAME: &str = "settings.json";

    /// JSON keys of the persisted settings
    pub mod keys {
        pub const SIZE: &str = "size";
        pub const COLOR: &str = "color";
        pub const SHAPE: &str = "shape";
        pub const IMAGE_PATH: &str = "imagePath";
    }
}

/// Generated resource files
pub mod resources {
    /// Directory holding icons, relative to the working directory
    pub const DIR: &str = "resources";

    /// Tray/window icon filename
    pub const ICON_FILE: &str = "icon.png";

    /// Dropdown arrow glyph filename
    pub const DOWN_ARROW_FILE: &str = "down_arrow.png";

    /// Edge length of the generated icon in pixels
    pub const ICON_SIZE: u32 = 32;

    /// Edge length of the generated arrow glyph in pixels
    pub const DOWN_ARROW_SIZE: u32 = 12;

    /// Placeholder icon fill (RGBA)
    pub const ICON_COLOR: [u8; 4] = [0x00, 0xFF, 0xFF, 0xFF];

    /// Arrow stroke color (RGBA)
    pub const DOWN_ARROW_COLOR: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];

    /// Arrow stroke width in pixels
    pub const DOWN_ARROW_STROKE: f32 = 2.0;
}

/// Desktop notification and tray constants
pub mod tray {
    /// Tooltip shown when hovering the tray icon
    pub const TOOLTIP: &str = "Aim Dot";

    /// Body of the notification shown after minimizing
    pub const MINIMIZED_MESSAGE: &str = "Application minimized to tray";

    /// How long the minimize notification stays up
    pub const NOTIFICATION_TIMEOUT_MS: u32 = 2000;

    pub const MENU_SHOW_CONTROLS: &str = "Show Controls";
    pub const MENU_TOGGLE_CROSSHAIR: &str = "Toggle Crosshair";
    pub const MENU_EXIT: &str = "Exit";
}

/// GUI-specific constants (egui control panel)
pub mod gui {
    /// Control panel window title
    pub const WINDOW_TITLE: &str = "Aim Dot Controls";

    /// Heading shown at the top of the panel
    pub const HEADING: &str = "Aim Dot Customizer";

    /// Control panel window dimensions
    pub const WINDOW_WIDTH: f32 = 360.0;
    pub const WINDOW_HEIGHT: f32 = 460.0;

    /// Layout spacing
    pub const SECTION_SPACING: f32 = 12.0;
    pub const ITEM_SPACING: f32 = 6.0;

    /// Secondary text (shortcut hint)
    pub const COLOR_HINT: egui::Color32 = egui::Color32::from_rgb(0x88, 0x88, 0x88);

    /// Title of the color selection dialog
    pub const COLOR_DIALOG_TITLE: &str = "Choose Crosshair Color";

    /// Title and filter of the image picker
    pub const IMAGE_DIALOG_TITLE: &str = "Select Image or SVG";
    pub const IMAGE_FILTER_NAME: &str = "Images";
    pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "svg"];

    /// Shortcut hint text
    pub const SHORTCUT_HINT: &str = "Shortcut: Press 'Ctrl+H' to show/hide crosshair";

    /// Poll interval for tray commands and overlay X11 events
    pub const EVENT_POLL_INTERVAL_MS: u64 = 100;
}

/// Default configuration values
/// These are used when the settings file or individual entries are missing
pub mod defaults {
    /// Dot appearance
    pub mod dot {
        /// Default diameter in pixels
        pub const DIAMETER: u32 = 5;

        /// Smallest diameter the size control allows
        pub const MIN_DIAMETER: u32 = 3;

        /// Largest diameter the size control allows
        pub const MAX_DIAMETER: u32 = 100;

        /// Default dot color
        pub const COLOR: &str = "#00FFFF";

        /// Default shape name
        pub const SHAPE: &str = "Circle";
    }
}

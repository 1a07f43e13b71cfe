//! Overlay backend abstraction layer
//!
//! `OverlayWindow` decides what to paint and where; a backend owns the
//! actual window. The X11 implementation lives in `crate::x11`.

use anyhow::Result;

use crate::common::types::Rect;

use super::raster::DotBitmap;

/// Native window operations needed by the overlay
pub trait OverlayBackend {
    /// Geometry of the primary display in root coordinates
    fn primary_display(&self) -> Result<Rect>;

    /// Move/resize the window and keep it above other windows
    fn configure(&mut self, bounds: Rect) -> Result<()>;

    /// Replace the window contents
    fn present(&mut self, bitmap: &DotBitmap) -> Result<()>;

    /// Map or unmap the window
    fn set_visible(&mut self, visible: bool) -> Result<()>;

    /// Drain pending native events; returns true when the window needs repainting
    fn needs_repaint(&mut self) -> Result<bool>;
}

//! X11 overlay window
//!
//! An override-redirect ARGB window: the window manager never sees it, so it
//! has no decorations and never shows up in taskbars, pagers or alt-tab
//! lists. An empty SHAPE input region makes it click-through.

use anyhow::{Context, Result, anyhow};
use tracing::{debug, error, info, warn};
use x11rb::connection::{Connection, RequestConnection};
use x11rb::protocol::Event;
use x11rb::protocol::randr::{self, ConnectionExt as RandrExt};
use x11rb::protocol::shape::{self, ConnectionExt as ShapeExt};
use x11rb::protocol::xproto::*;
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as WrapperExt;

use crate::common::types::{Dimensions, Rect};
use crate::constants::x11;
use crate::overlay::{DotBitmap, OverlayBackend};

use super::{CachedAtoms, find_argb_visual};

pub struct X11Overlay {
    conn: RustConnection,
    screen: Screen,
    atoms: CachedAtoms,
    window: Window,
    colormap: Colormap,
    gc: Gcontext,
    /// Server expects ZPixmap pixels least-significant byte first
    lsb_first: bool,
    has_randr: bool,
    size: Dimensions,
}

impl X11Overlay {
    /// Connect to the X server and create the (unmapped) overlay window
    pub fn connect() -> Result<Self> {
        let (conn, screen_num) =
            x11rb::connect(None).context("Failed to connect to X11 server")?;
        let screen = conn.setup().roots[screen_num].clone();
        let lsb_first = conn.setup().image_byte_order == ImageOrder::LSB_FIRST;
        let atoms = CachedAtoms::new(&conn, screen_num)?;

        let visual = find_argb_visual(&screen)
            .ok_or_else(|| anyhow!("No 32-bit TrueColor visual available for a translucent overlay"))?;

        let colormap = conn
            .generate_id()
            .context("Failed to generate ID for overlay colormap")?;
        conn.create_colormap(ColormapAlloc::NONE, colormap, screen.root, visual)
            .context("Failed to create colormap for ARGB visual")?;

        let window = conn
            .generate_id()
            .context("Failed to generate X11 window ID")?;
        conn.create_window(
            x11::ARGB_DEPTH,
            window,
            screen.root,
            0,
            0,
            1,
            1,
            0,
            WindowClass::INPUT_OUTPUT,
            visual,
            &CreateWindowAux::new()
                .background_pixel(0)
                .border_pixel(0)
                .colormap(colormap)
                .override_redirect(x11::OVERRIDE_REDIRECT)
                .event_mask(EventMask::EXPOSURE),
        )
        .context("Failed to create overlay window")?;

        let gc = conn
            .generate_id()
            .context("Failed to generate ID for overlay graphics context")?;
        conn.create_gc(gc, window, &CreateGCAux::new())
            .context("Failed to create overlay graphics context")?;

        let has_randr = conn
            .extension_information(randr::X11_EXTENSION_NAME)
            .context("Failed to query RandR extension")?
            .is_some();

        let overlay = Self {
            conn,
            screen,
            atoms,
            window,
            colormap,
            gc,
            lsb_first,
            has_randr,
            size: Dimensions::square(1),
        };

        overlay.make_click_through()?;
        overlay.setup_window_properties()?;
        overlay.warn_without_compositor();
        overlay
            .conn
            .flush()
            .context("Failed to flush X11 connection after overlay creation")?;

        info!(window = overlay.window, has_randr, "Created overlay window");
        Ok(overlay)
    }

    /// Empty input region: pointer events fall through to whatever is below
    fn make_click_through(&self) -> Result<()> {
        let has_shape = self
            .conn
            .extension_information(shape::X11_EXTENSION_NAME)
            .context("Failed to query SHAPE extension")?
            .is_some();
        if !has_shape {
            warn!("SHAPE extension missing, overlay will intercept clicks");
            return Ok(());
        }

        self.conn
            .shape_rectangles(
                shape::SO::SET,
                shape::SK::INPUT,
                ClipOrdering::UNSORTED,
                self.window,
                0,
                0,
                &[],
            )
            .context("Failed to clear overlay input region")?;
        Ok(())
    }

    /// Setup window properties (PID, WM_CLASS, name, always-on-top, skip taskbar)
    fn setup_window_properties(&self) -> Result<()> {
        self.conn
            .change_property32(
                PropMode::REPLACE,
                self.window,
                self.atoms.net_wm_pid,
                AtomEnum::CARDINAL,
                &[std::process::id()],
            )
            .context("Failed to set _NET_WM_PID on overlay")?;

        self.conn
            .change_property8(
                PropMode::REPLACE,
                self.window,
                self.atoms.wm_class,
                AtomEnum::STRING,
                x11::WM_CLASS,
            )
            .context("Failed to set WM_CLASS on overlay")?;

        self.conn
            .change_property8(
                PropMode::REPLACE,
                self.window,
                self.atoms.net_wm_name,
                self.atoms.utf8_string,
                x11::OVERLAY_TITLE,
            )
            .context("Failed to set _NET_WM_NAME on overlay")?;

        self.conn
            .change_property32(
                PropMode::REPLACE,
                self.window,
                self.atoms.net_wm_state,
                AtomEnum::ATOM,
                &[
                    self.atoms.net_wm_state_above,
                    self.atoms.net_wm_state_skip_taskbar,
                    self.atoms.net_wm_state_skip_pager,
                ],
            )
            .context("Failed to set _NET_WM_STATE on overlay")?;

        Ok(())
    }

    /// Per-pixel alpha needs a compositing manager; without one the
    /// transparent corners of the dot render black.
    fn warn_without_compositor(&self) {
        match self
            .conn
            .get_selection_owner(self.atoms.net_wm_cm)
            .map_err(anyhow::Error::from)
            .and_then(|cookie| cookie.reply().map_err(anyhow::Error::from))
        {
            Ok(reply) if reply.owner == x11rb::NONE => {
                warn!("No compositing manager running, overlay transparency is unavailable")
            }
            Ok(reply) => debug!(owner = reply.owner, "Compositing manager detected"),
            Err(err) => debug!(error = ?err, "Failed to query compositing manager"),
        }
    }

    fn query_primary_monitor(&self) -> Result<Option<Rect>> {
        let primary = self
            .conn
            .randr_get_output_primary(self.screen.root)
            .context("Failed to query RandR primary output")?
            .reply()
            .context("Failed to get RandR primary output reply")?
            .output;
        if primary == x11rb::NONE {
            return Ok(None);
        }

        let output = self
            .conn
            .randr_get_output_info(primary, x11rb::CURRENT_TIME)
            .context("Failed to query RandR output info")?
            .reply()
            .context("Failed to get RandR output info reply")?;
        if output.crtc == x11rb::NONE {
            return Ok(None);
        }

        let crtc = self
            .conn
            .randr_get_crtc_info(output.crtc, x11rb::CURRENT_TIME)
            .context("Failed to query RandR CRTC info")?
            .reply()
            .context("Failed to get RandR CRTC info reply")?;
        if crtc.width == 0 || crtc.height == 0 {
            return Ok(None);
        }

        Ok(Some(Rect::new(
            crtc.x as i32,
            crtc.y as i32,
            crtc.width as u32,
            crtc.height as u32,
        )))
    }
}

impl OverlayBackend for X11Overlay {
    fn primary_display(&self) -> Result<Rect> {
        if self.has_randr {
            match self.query_primary_monitor() {
                Ok(Some(rect)) => return Ok(rect),
                Ok(None) => debug!("No RandR primary output, using root window geometry"),
                Err(err) => debug!(error = ?err, "RandR query failed, using root window geometry"),
            }
        }
        Ok(Rect::new(
            0,
            0,
            self.screen.width_in_pixels as u32,
            self.screen.height_in_pixels as u32,
        ))
    }

    fn configure(&mut self, bounds: Rect) -> Result<()> {
        self.conn
            .configure_window(
                self.window,
                &ConfigureWindowAux::new()
                    .x(bounds.origin.x)
                    .y(bounds.origin.y)
                    .width(bounds.size.width)
                    .height(bounds.size.height)
                    .stack_mode(StackMode::ABOVE),
            )
            .context(format!("Failed to configure overlay window {}", self.window))?;
        self.size = bounds.size;
        self.conn
            .flush()
            .context("Failed to flush X11 connection after overlay configure")?;
        Ok(())
    }

    fn present(&mut self, bitmap: &DotBitmap) -> Result<()> {
        let width = u16::try_from(bitmap.width).context("Overlay bitmap too wide")?;
        let height = u16::try_from(bitmap.height).context("Overlay bitmap too tall")?;

        self.conn
            .put_image(
                ImageFormat::Z_PIXMAP,
                self.window,
                self.gc,
                width,
                height,
                0,
                0,
                0,
                x11::ARGB_DEPTH,
                &bitmap.to_argb32_bytes(self.lsb_first),
            )
            .context("Failed to upload dot image to overlay")?;
        self.conn
            .flush()
            .context("Failed to flush X11 connection after overlay paint")?;
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) -> Result<()> {
        if visible {
            self.conn
                .map_window(self.window)
                .context(format!("Failed to map overlay window {}", self.window))?;
            self.conn
                .configure_window(
                    self.window,
                    &ConfigureWindowAux::new().stack_mode(StackMode::ABOVE),
                )
                .context("Failed to raise overlay window")?;
        } else {
            self.conn
                .unmap_window(self.window)
                .context(format!("Failed to unmap overlay window {}", self.window))?;
        }
        self.conn
            .flush()
            .context("Failed to flush X11 connection after overlay visibility change")?;
        Ok(())
    }

    fn needs_repaint(&mut self) -> Result<bool> {
        let mut exposed = false;
        while let Some(event) = self
            .conn
            .poll_for_event()
            .context("Failed to poll overlay X11 events")?
        {
            match event {
                // Only the last event of an exposure series has count == 0
                Event::Expose(expose) if expose.window == self.window && expose.count == 0 => {
                    exposed = true;
                }
                Event::Error(err) => warn!(error = ?err, "X11 error on overlay connection"),
                _ => {}
            }
        }
        if exposed {
            debug!(width = self.size.width, height = self.size.height, "Overlay exposed");
        }
        Ok(exposed)
    }
}

impl Drop for X11Overlay {
    fn drop(&mut self) {
        if let Err(e) = self.conn.free_gc(self.gc) {
            error!(error = %e, "Failed to free overlay graphics context");
        }
        if let Err(e) = self.conn.destroy_window(self.window) {
            error!(window = self.window, error = %e, "Failed to destroy overlay window");
        }
        if let Err(e) = self.conn.free_colormap(self.colormap) {
            error!(error = %e, "Failed to free overlay colormap");
        }
        let _ = self.conn.flush();
    }
}

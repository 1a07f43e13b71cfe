//! Cached X11 state shared by the overlay window

use anyhow::{Context, Result};
use x11rb::protocol::xproto::*;
use x11rb::rust_connection::RustConnection;

use crate::constants::x11;

/// Pre-cached X11 atoms to avoid repeated roundtrips
pub struct CachedAtoms {
    pub net_wm_pid: Atom,
    pub net_wm_name: Atom,
    pub utf8_string: Atom,
    pub net_wm_state: Atom,
    pub net_wm_state_above: Atom,
    pub net_wm_state_skip_taskbar: Atom,
    pub net_wm_state_skip_pager: Atom,
    pub wm_class: Atom,
    /// `_NET_WM_CM_S<n>`, owned by the compositing manager when one runs
    pub net_wm_cm: Atom,
}

impl CachedAtoms {
    pub fn new(conn: &RustConnection, screen_num: usize) -> Result<Self> {
        let cm_name = format!("_NET_WM_CM_S{}", screen_num);
        Ok(Self {
            net_wm_pid: intern(conn, b"_NET_WM_PID")?,
            net_wm_name: intern(conn, b"_NET_WM_NAME")?,
            utf8_string: intern(conn, b"UTF8_STRING")?,
            net_wm_state: intern(conn, b"_NET_WM_STATE")?,
            net_wm_state_above: intern(conn, b"_NET_WM_STATE_ABOVE")?,
            net_wm_state_skip_taskbar: intern(conn, b"_NET_WM_STATE_SKIP_TASKBAR")?,
            net_wm_state_skip_pager: intern(conn, b"_NET_WM_STATE_SKIP_PAGER")?,
            wm_class: intern(conn, b"WM_CLASS")?,
            net_wm_cm: intern(conn, cm_name.as_bytes())?,
        })
    }
}

fn intern(conn: &RustConnection, name: &[u8]) -> Result<Atom> {
    let display_name = String::from_utf8_lossy(name);
    Ok(conn
        .intern_atom(false, name)
        .with_context(|| format!("Failed to intern {} atom", display_name))?
        .reply()
        .with_context(|| format!("Failed to get reply for {} atom", display_name))?
        .atom)
}

/// Find a 32-bit TrueColor visual so the window can carry per-pixel alpha
pub fn find_argb_visual(screen: &Screen) -> Option<Visualid> {
    screen
        .allowed_depths
        .iter()
        .filter(|depth| depth.depth == x11::ARGB_DEPTH)
        .flat_map(|depth| depth.visuals.iter())
        .find(|visual| visual.class == VisualClass::TRUE_COLOR)
        .map(|visual| visual.visual_id)
}

//! X11 backend for the dot overlay
//!
//! Provides atom caching, ARGB visual lookup, primary-monitor geometry via
//! RandR, and the click-through overlay window itself.

mod context;
mod window;

pub use context::{CachedAtoms, find_argb_visual};
pub use window::X11Overlay;

//! Shared types and helpers used by the overlay, the control panel and the tray

pub mod color;
pub mod debug;
pub mod types;

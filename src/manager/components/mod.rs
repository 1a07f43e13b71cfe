//! Control panel widgets and the tray icon

pub mod color_dialog;
pub mod controls;
pub mod tray;

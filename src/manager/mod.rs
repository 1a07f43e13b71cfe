//! Control panel - egui window, system tray and the window lifecycle

mod app;
pub mod components;
pub mod lifecycle;
pub mod panel;
pub mod utils;

pub use app::run_gui;

//! Configuration management
//!
//! Handles the dot settings with JSON persistence.

pub mod settings;

pub use settings::SettingsStore;

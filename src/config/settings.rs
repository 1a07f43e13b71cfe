//! Persistent dot settings
//!
//! Four scalar entries stored as a small JSON object. Loading is tolerant:
//! a missing file, an unparseable file, or any individually missing or
//! malformed entry falls back to that entry's default.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::common::color::HexColor;
use crate::common::types::dot::clamp_diameter;
use crate::common::types::{DotConfig, DotShape};
use crate::constants::config::keys;

/// On-disk representation written by [`SettingsStore::save`]
#[derive(Debug, Serialize)]
struct StoredSettings<'a> {
    size: u32,
    color: String,
    shape: &'static str,
    #[serde(rename = "imagePath")]
    image_path: Option<&'a Path>,
}

impl<'a> From<&'a DotConfig> for StoredSettings<'a> {
    fn from(config: &'a DotConfig) -> Self {
        Self {
            size: config.diameter,
            color: config.color.name(),
            shape: config.shape.as_str(),
            image_path: config.image_path.as_deref(),
        }
    }
}

/// JSON-file backed settings store
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store at an explicit location
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `$XDG_CONFIG_HOME/aim-dot/settings.json`
    pub fn open_default() -> Self {
        Self::new(Self::default_path())
    }

    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, substituting defaults for anything missing or malformed
    pub fn load(&self) -> DotConfig {
        if !self.path.exists() {
            info!(path = ?self.path, "Settings file not found, using defaults");
            return DotConfig::default();
        }

        let value = match fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {:?}", self.path))
            .and_then(|contents| {
                serde_json::from_str::<Value>(&contents)
                    .with_context(|| format!("Failed to parse JSON from {:?}", self.path))
            }) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = ?err, "Settings unreadable, using defaults");
                return DotConfig::default();
            }
        };

        let config = parse_settings(&value);
        info!(
            size = config.diameter,
            color = %config.color,
            shape = %config.shape,
            image = ?config.image_path,
            "Loaded settings"
        );
        config
    }

    /// Write settings to disk, creating the directory if needed
    pub fn save(&self, config: &DotConfig) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory {:?}", parent))?;
        }

        let json_string = serde_json::to_string_pretty(&StoredSettings::from(config))
            .context("Failed to serialize settings to JSON")?;

        fs::write(&self.path, json_string)
            .with_context(|| format!("Failed to write settings to {:?}", self.path))?;

        info!(path = ?self.path, "Saved settings");
        Ok(())
    }
}

/// Extract each entry independently so one bad field does not discard the rest
fn parse_settings(value: &Value) -> DotConfig {
    let defaults = DotConfig::default();

    let diameter = match value.get(keys::SIZE) {
        None | Some(Value::Null) => defaults.diameter,
        Some(raw) => match parse_size(raw) {
            Some(size) => clamp_diameter(size),
            None => {
                warn!(value = %raw, "Malformed size setting, using default");
                defaults.diameter
            }
        },
    };

    let color = match value.get(keys::COLOR) {
        None | Some(Value::Null) => defaults.color,
        Some(raw) => match raw.as_str().and_then(HexColor::parse) {
            Some(color) => color,
            None => {
                warn!(value = %raw, "Malformed color setting, using default");
                defaults.color
            }
        },
    };

    let shape = match value.get(keys::SHAPE) {
        None | Some(Value::Null) => defaults.shape,
        Some(Value::String(name)) => DotShape::from_name(name),
        Some(raw) => {
            warn!(value = %raw, "Malformed shape setting, using default");
            defaults.shape
        }
    };

    let image_path = match value.get(keys::IMAGE_PATH) {
        Some(Value::String(path)) if !path.is_empty() => Some(PathBuf::from(path)),
        None | Some(Value::Null) | Some(Value::String(_)) => None,
        Some(raw) => {
            warn!(value = %raw, "Malformed imagePath setting, ignoring");
            None
        }
    };

    DotConfig::new(diameter, color, shape, image_path)
}

/// Accept integers and integer-looking strings (older stores wrote strings)
fn parse_size(raw: &Value) -> Option<u32> {
    match raw {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

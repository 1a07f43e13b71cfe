//! Color type conversions and utilities
//!
//! Provides type-safe color handling with conversions between:
//! - Hex strings (#RRGGBB or #AARRGGBB format)
//! - egui Color32 (control panel widgets)
//! - RGBA components (overlay rasterization)

use std::fmt;

/// Dot color stored as ARGB32 (#AARRGGBB)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor(u32);

impl HexColor {
    /// Opaque cyan, the default dot color
    pub const CYAN: Self = Self(0xFF_00_FF_FF);

    /// Parse hex color string supporting multiple formats:
    /// - 6 digits: RRGGBB (full opacity assumed, becomes FFRRGGBB)
    /// - 8 digits: AARRGGBB (explicit alpha)
    /// - Optional '#' prefix supported but not required
    pub fn parse(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(hex, 16).ok()?;

        match hex.len() {
            6 => Some(Self(0xFF_00_00_00 | value)),
            8 => Some(Self(value)),
            _ => None,
        }
    }

    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Unpremultiplied (r, g, b, a) components
    pub fn rgba(self) -> [u8; 4] {
        [
            (self.0 >> 16) as u8,
            (self.0 >> 8) as u8,
            self.0 as u8,
            self.alpha(),
        ]
    }

    /// Canonical name: `#RRGGBB` when opaque, `#AARRGGBB` otherwise
    pub fn name(self) -> String {
        let [r, g, b, a] = self.rgba();
        if a == 0xFF {
            format!("#{:02X}{:02X}{:02X}", r, g, b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", a, r, g, b)
        }
    }

    /// Convert to an egui color for the picker widget
    pub fn to_color32(self) -> egui::Color32 {
        let [r, g, b, a] = self.rgba();
        egui::Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    /// Convert back from the picker widget
    pub fn from_color32(color: egui::Color32) -> Self {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::CYAN
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

//! The dot's rendering parameters

use std::fmt;
use std::path::PathBuf;

use crate::common::color::HexColor;
use crate::constants::defaults::dot;

/// Marker shape offered by the shape selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DotShape {
    #[default]
    Circle,
    Square,
    CustomImage,
}

impl DotShape {
    /// All selectable shapes, in selector order
    pub const ALL: [DotShape; 3] = [DotShape::Circle, DotShape::Square, DotShape::CustomImage];

    /// Display and persistence name
    pub fn as_str(self) -> &'static str {
        match self {
            DotShape::Circle => "Circle",
            DotShape::Square => "Square",
            DotShape::CustomImage => "Custom Image",
        }
    }

    /// Parse a stored shape name.
    ///
    /// Anything that is not a circle or a custom image renders as a square,
    /// so unknown names resolve to `Square` rather than failing.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "Circle" => DotShape::Circle,
            "Custom Image" | "CustomImage" => DotShape::CustomImage,
            "Square" => DotShape::Square,
            other => {
                tracing::warn!(shape = %other, "Unrecognized shape name, rendering as square");
                DotShape::Square
            }
        }
    }
}

impl fmt::Display for DotShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the overlay needs to paint the dot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotConfig {
    /// Edge length of the square bounding box in pixels (always > 0)
    pub diameter: u32,
    pub color: HexColor,
    pub shape: DotShape,
    /// Only consulted when `shape` is `CustomImage`
    pub image_path: Option<PathBuf>,
}

impl DotConfig {
    pub fn new(diameter: u32, color: HexColor, shape: DotShape, image_path: Option<PathBuf>) -> Self {
        Self {
            diameter: diameter.max(1),
            color,
            shape,
            image_path,
        }
    }

    /// Image path the renderer should try, if any
    pub fn effective_image(&self) -> Option<&PathBuf> {
        match self.shape {
            DotShape::CustomImage => self.image_path.as_ref(),
            _ => None,
        }
    }
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            diameter: dot::DIAMETER,
            color: HexColor::CYAN,
            shape: DotShape::Circle,
            image_path: None,
        }
    }
}

/// Clamp a diameter to the range the size control allows
pub fn clamp_diameter(diameter: u32) -> u32 {
    diameter.clamp(dot::MIN_DIAMETER, dot::MAX_DIAMETER)
}

//! Geometric types for X11 coordinates and dimensions
//!
//! Provides type-safe wrappers for positions and sizes to avoid
//! common integer confusion (e.g., swapping width/height or x/y).

/// A position in 2D space (X11 root coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width × height in pixels
/// Using a newtype prevents accidentally swapping width and height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Square box with the given edge length
    pub fn square(edge: u32) -> Self {
        Self::new(edge, edge)
    }

    /// Largest size with this aspect ratio that fits inside `bounds`
    ///
    /// Never returns a zero dimension for a non-empty input.
    pub fn fit_within(self, bounds: Dimensions) -> Dimensions {
        if self.width == 0 || self.height == 0 {
            return Dimensions::default();
        }
        let scale = f64::min(
            bounds.width as f64 / self.width as f64,
            bounds.height as f64 / self.height as f64,
        );
        Dimensions {
            width: ((self.width as f64 * scale).round() as u32).clamp(1, bounds.width.max(1)),
            height: ((self.height as f64 * scale).round() as u32).clamp(1, bounds.height.max(1)),
        }
    }
}

/// A rectangle on the X11 root window (monitor or window bounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub origin: Position,
    pub size: Dimensions,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            origin: Position::new(x, y),
            size: Dimensions::new(width, height),
        }
    }

    /// Center point, rounded toward the origin
    #[cfg(test)]
    pub fn center(&self) -> Position {
        Position::new(
            self.origin.x + (self.size.width / 2) as i32,
            self.origin.y + (self.size.height / 2) as i32,
        )
    }

    /// A rectangle of `size` whose center matches this rectangle's center
    pub fn centered(&self, size: Dimensions) -> Rect {
        let x = self.origin.x + (self.size.width as i32 - size.width as i32) / 2;
        let y = self.origin.y + (self.size.height as i32 - size.height as i32) / 2;
        Rect {
            origin: Position::new(x, y),
            size,
        }
    }
}

//! Domain types for type safety and clarity

pub mod dot;
pub mod geometry;

pub use dot::{DotConfig, DotShape};
pub use geometry::{Dimensions, Position, Rect};

//! Decoding of user-supplied dot images
//!
//! Raster formats go through `image`; SVG documents are parsed once with
//! `usvg` and rendered at whatever size the dot currently has.

use anyhow::{Context, Result};
use image::DynamicImage;
use resvg::usvg;
use std::fs;
use std::path::Path;

/// A decoded custom image, ready to be drawn into the dot box
pub enum SourceImage {
    Raster(DynamicImage),
    Svg(usvg::Tree),
}

impl SourceImage {
    /// Decode `path`, choosing the decoder from the file extension
    pub fn load(path: &Path) -> Result<Self> {
        if is_svg(path) {
            let data =
                fs::read(path).with_context(|| format!("Failed to read SVG {:?}", path))?;
            let tree = usvg::Tree::from_data(&data, &usvg::Options::default())
                .with_context(|| format!("Failed to parse SVG {:?}", path))?;
            Ok(Self::Svg(tree))
        } else {
            let image =
                image::open(path).with_context(|| format!("Failed to decode image {:?}", path))?;
            Ok(Self::Raster(image))
        }
    }

    /// Intrinsic size in pixels (SVG sizes rounded up)
    pub fn size(&self) -> (u32, u32) {
        match self {
            Self::Raster(image) => (image.width(), image.height()),
            Self::Svg(tree) => {
                let size = tree.size();
                (size.width().ceil() as u32, size.height().ceil() as u32)
            }
        }
    }
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

//! Icon resources generated on first start
//!
//! The tray/window icon and the dropdown arrow glyph live in `resources/`
//! next to the working directory. Missing files are regenerated as simple
//! placeholders; existing files are never touched.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};
use tracing::{info, warn};

use crate::constants::resources::*;

/// Locations of the resource files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePaths {
    pub icon: PathBuf,
    pub down_arrow: PathBuf,
}

impl ResourcePaths {
    pub fn under(base: &Path) -> Self {
        let dir = base.join(DIR);
        Self {
            icon: dir.join(ICON_FILE),
            down_arrow: dir.join(DOWN_ARROW_FILE),
        }
    }
}

/// Create any missing resource file under `base/resources`.
///
/// Failures are logged; the tray and window fall back to in-memory icons.
pub fn ensure_resources(base: &Path) -> ResourcePaths {
    let paths = ResourcePaths::under(base);

    if let Some(dir) = paths.icon.parent()
        && let Err(err) = fs::create_dir_all(dir)
    {
        warn!(dir = ?dir, error = %err, "Failed to create resources directory");
        return paths;
    }

    ensure_file(&paths.icon, ICON_SIZE, &placeholder_icon_rgba());
    ensure_file(&paths.down_arrow, DOWN_ARROW_SIZE, &down_arrow_rgba());
    paths
}

fn ensure_file(path: &Path, size: u32, rgba: &[u8]) {
    if path.exists() {
        return;
    }
    match write_png(path, size, size, rgba) {
        Ok(()) => info!(path = ?path, "Generated placeholder resource"),
        Err(err) => warn!(path = ?path, error = ?err, "Failed to generate resource"),
    }
}

/// Solid cyan square used when no icon file can be read
pub fn placeholder_icon_rgba() -> Vec<u8> {
    ICON_COLOR.repeat((ICON_SIZE * ICON_SIZE) as usize)
}

/// Transparent square with a white chevron from (2,4) to (6,8) to (10,4),
/// returned as straight (unpremultiplied) RGBA
fn down_arrow_rgba() -> Vec<u8> {
    let Some(mut pixmap) = Pixmap::new(DOWN_ARROW_SIZE, DOWN_ARROW_SIZE) else {
        return Vec::new();
    };

    let mut pb = PathBuilder::new();
    pb.move_to(2.0, 4.0);
    pb.line_to(6.0, 8.0);
    pb.line_to(10.0, 4.0);

    if let Some(path) = pb.finish() {
        let [r, g, b, a] = DOWN_ARROW_COLOR;
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        let stroke = Stroke {
            width: DOWN_ARROW_STROKE,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    pixmap
        .pixels()
        .iter()
        .flat_map(|px| {
            let c = px.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect()
}

fn write_png(path: &Path, width: u32, height: u32, rgba: &[u8]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .with_context(|| format!("Failed to write PNG header to {:?}", path))?;
    writer
        .write_image_data(rgba)
        .with_context(|| format!("Failed to write PNG data to {:?}", path))?;
    Ok(())
}

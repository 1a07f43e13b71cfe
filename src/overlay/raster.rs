//! Rasterization of the dot into a premultiplied RGBA bitmap

use image::DynamicImage;
use image::imageops::FilterType;
use resvg::{tiny_skia as svg_skia, usvg};
use tiny_skia::{Color, ColorU8, FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Transform};

use crate::common::color::HexColor;
use crate::common::types::{Dimensions, DotConfig, DotShape};

use super::source::SourceImage;

/// Premultiplied RGBA pixels, row-major, `width * height * 4` bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotBitmap {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl DotBitmap {
    /// Fully transparent bitmap
    pub fn transparent(size: Dimensions) -> Self {
        Self {
            width: size.width,
            height: size.height,
            data: vec![0; size.width as usize * size.height as usize * 4],
        }
    }

    fn from_pixmap(pixmap: Pixmap) -> Self {
        Self {
            width: pixmap.width(),
            height: pixmap.height(),
            data: pixmap.take(),
        }
    }

    #[cfg(test)]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Premultiplied RGBA at (x, y)
    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Bytes in the layout of a 32-bit ZPixmap (ARGB32 in server byte order)
    pub fn to_argb32_bytes(&self, lsb_first: bool) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            let [r, g, b, a] = [px[0], px[1], px[2], px[3]];
            if lsb_first {
                out.extend_from_slice(&[b, g, r, a]);
            } else {
                out.extend_from_slice(&[a, r, g, b]);
            }
        }
        out
    }
}

/// Paint `config` into a `diameter × diameter` bitmap.
///
/// `image` is the decoded custom image, if the config asks for one and it
/// could be read. Without it, a custom-image config renders as a circle.
pub fn rasterize(config: &DotConfig, image: Option<&SourceImage>) -> DotBitmap {
    let size = Dimensions::square(config.diameter.max(1));
    let Some(mut pixmap) = Pixmap::new(size.width, size.height) else {
        return DotBitmap::transparent(size);
    };

    match (config.shape, image) {
        (DotShape::CustomImage, Some(SourceImage::Raster(image))) => draw_raster(&mut pixmap, image),
        (DotShape::CustomImage, Some(SourceImage::Svg(tree))) => draw_svg(&mut pixmap, tree),
        (DotShape::Circle, _) | (DotShape::CustomImage, None) => fill_circle(&mut pixmap, config.color),
        (DotShape::Square, _) => fill_square(&mut pixmap, config.color),
    }
    DotBitmap::from_pixmap(pixmap)
}

fn fill_square(pixmap: &mut Pixmap, color: HexColor) {
    let [r, g, b, a] = color.rgba();
    pixmap.fill(Color::from_rgba8(r, g, b, a));
}

/// Filled circle inscribed in the box, anti-aliased edges
fn fill_circle(pixmap: &mut Pixmap, color: HexColor) {
    let radius = pixmap.width() as f32 / 2.0;
    let Some(path) = PathBuilder::from_circle(radius, radius, radius) else {
        return;
    };

    let [r, g, b, a] = color.rgba();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
}

/// Scale the image to fit the box (aspect preserved) and center it
fn draw_raster(pixmap: &mut Pixmap, image: &DynamicImage) {
    let size = Dimensions::new(pixmap.width(), pixmap.height());
    let fitted = Dimensions::new(image.width(), image.height()).fit_within(size);
    let Some(mut scaled) = Pixmap::new(fitted.width, fitted.height) else {
        return;
    };

    let resized = image
        .resize_exact(fitted.width, fitted.height, FilterType::Lanczos3)
        .to_rgba8();
    for (dst, src) in scaled.pixels_mut().iter_mut().zip(resized.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }

    pixmap.draw_pixmap(
        ((size.width - fitted.width) / 2) as i32,
        ((size.height - fitted.height) / 2) as i32,
        scaled.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
}

/// Render the SVG at the box size, aspect preserved and centered
fn draw_svg(pixmap: &mut Pixmap, tree: &usvg::Tree) {
    let (width, height) = (pixmap.width() as f32, pixmap.height() as f32);
    let tree_size = tree.size();
    let scale = (width / tree_size.width()).min(height / tree_size.height());
    if !scale.is_finite() || scale <= 0.0 {
        return;
    }
    let dx = (width - tree_size.width() * scale) / 2.0;
    let dy = (height - tree_size.height() * scale) / 2.0;

    // resvg renders into its own tiny-skia types; both are premultiplied RGBA
    let Some(mut canvas) = svg_skia::Pixmap::new(pixmap.width(), pixmap.height()) else {
        return;
    };
    resvg::render(
        tree,
        svg_skia::Transform::from_row(scale, 0.0, 0.0, scale, dx, dy),
        &mut canvas.as_mut(),
    );
    pixmap.data_mut().copy_from_slice(canvas.data());
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn config(diameter: u32, shape: DotShape) -> DotConfig {
        DotConfig::new(diameter, HexColor::CYAN, shape, None)
    }

    fn svg(markup: &str) -> SourceImage {
        let tree = usvg::Tree::from_data(markup.as_bytes(), &usvg::Options::default()).unwrap();
        SourceImage::Svg(tree)
    }

    #[test]
    fn test_bitmap_matches_diameter() {
        for d in [3, 5, 40, 100] {
            let bitmap = rasterize(&config(d, DotShape::Circle), None);
            assert_eq!(bitmap.dimensions(), Dimensions::square(d));
            assert_eq!(bitmap.data.len(), (d * d * 4) as usize);
        }
    }

    #[test]
    fn test_square_fills_every_pixel() {
        let bitmap = rasterize(&config(7, DotShape::Square), None);
        for y in 0..7 {
            for x in 0..7 {
                assert_eq!(bitmap.pixel(x, y), [0, 255, 255, 255]);
            }
        }
    }

    #[test]
    fn test_circle_center_opaque_corners_clear() {
        let bitmap = rasterize(&config(20, DotShape::Circle), None);
        assert_eq!(bitmap.pixel(10, 10), [0, 255, 255, 255]);
        assert_eq!(bitmap.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(bitmap.pixel(19, 19), [0, 0, 0, 0]);
        // Pixels crossing the rim are partially covered
        let edge = bitmap.pixel(2, 3);
        assert!(edge[3] > 0 && edge[3] < 255, "edge alpha {}", edge[3]);
    }

    #[test]
    fn test_custom_image_without_image_renders_circle() {
        let fallback = rasterize(&config(25, DotShape::CustomImage), None);
        let circle = rasterize(&config(25, DotShape::Circle), None);
        assert_eq!(fallback, circle);
    }

    #[test]
    fn test_unknown_shape_renders_like_square() {
        let bogus = DotConfig::new(9, HexColor::CYAN, DotShape::from_name("bogus"), None);
        let square = DotConfig::new(9, HexColor::CYAN, DotShape::from_name("Square"), None);
        assert_eq!(rasterize(&bogus, None), rasterize(&square, None));
    }

    #[test]
    fn test_image_is_ignored_unless_custom_image() {
        let image = SourceImage::Raster(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            4,
            4,
            Rgba([255, 0, 0, 255]),
        )));
        let circle = rasterize(&config(12, DotShape::Circle), Some(&image));
        assert_eq!(circle, rasterize(&config(12, DotShape::Circle), None));
    }

    #[test]
    fn test_wide_image_is_letterboxed() {
        let image = SourceImage::Raster(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            40,
            20,
            Rgba([255, 0, 0, 255]),
        )));
        let bitmap = rasterize(&config(20, DotShape::CustomImage), Some(&image));

        // Scaled to 20x10, centered vertically at rows 5..15
        assert_eq!(bitmap.pixel(10, 10), [255, 0, 0, 255]);
        assert_eq!(bitmap.pixel(0, 5), [255, 0, 0, 255]);
        assert_eq!(bitmap.pixel(10, 0), [0, 0, 0, 0]);
        assert_eq!(bitmap.pixel(10, 19), [0, 0, 0, 0]);
    }

    #[test]
    fn test_translucent_image_is_premultiplied() {
        let image = SourceImage::Raster(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            4,
            4,
            Rgba([255, 255, 255, 0]),
        )));
        let bitmap = rasterize(&config(4, DotShape::CustomImage), Some(&image));
        assert_eq!(bitmap.pixel(1, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn test_svg_is_rendered_at_box_size() {
        let image = svg(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"><rect width="4" height="4" fill="#ff0000"/></svg>"##,
        );
        let bitmap = rasterize(&config(16, DotShape::CustomImage), Some(&image));
        assert_eq!(bitmap.pixel(8, 8), [255, 0, 0, 255]);
        assert_eq!(bitmap.pixel(2, 13), [255, 0, 0, 255]);
    }

    #[test]
    fn test_wide_svg_is_letterboxed() {
        let image = svg(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10"><rect width="20" height="10" fill="#0000ff"/></svg>"##,
        );
        let bitmap = rasterize(&config(20, DotShape::CustomImage), Some(&image));
        assert_eq!(bitmap.pixel(10, 10), [0, 0, 255, 255]);
        assert_eq!(bitmap.pixel(10, 1), [0, 0, 0, 0]);
        assert_eq!(bitmap.pixel(10, 18), [0, 0, 0, 0]);
    }

    #[test]
    fn test_argb32_byte_order() {
        let bitmap = rasterize(&DotConfig::new(3, HexColor::parse("#102030").unwrap(), DotShape::Square, None), None);
        assert_eq!(&bitmap.to_argb32_bytes(true)[..4], &[0x30, 0x20, 0x10, 0xFF]);
        assert_eq!(&bitmap.to_argb32_bytes(false)[..4], &[0xFF, 0x10, 0x20, 0x30]);
    }
}

//! A small raster canvas with a data-to-pixel mapping.

use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{Rgb, RgbImage};

/// Side of one glyph cell before scaling.
pub const GLYPH_SIZE: i64 = 8;

/// RGB drawing surface. Every primitive clips to the image bounds.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Canvas {
            image: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64 {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Fills the half-open pixel rectangle `[x0, x1) × [y0, y1)`.
    pub fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
        let (x0, x1) = (x0.max(0), x1.min(self.width() as i64));
        let (y0, y1) = (y0.max(0), y1.min(self.height() as i64));
        for y in y0..y1 {
            for x in x0..x1 {
                self.image.put_pixel(x as u32, y as u32, color);
            }
        }
    }

    /// Outline of the rectangle spanned by two corners, `thickness` pixels wide, drawn inwards.
    pub fn stroke_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, thickness: i64, color: Rgb<u8>) {
        self.fill_rect(x0, y0, x1 + 1, y0 + thickness, color);
        self.fill_rect(x0, y1 - thickness + 1, x1 + 1, y1 + 1, color);
        self.fill_rect(x0, y0, x0 + thickness, y1 + 1, color);
        self.fill_rect(x1 - thickness + 1, y0, x1 + 1, y1 + 1, color);
    }

    /// Bresenham line stamped with a square brush of side `thickness`.
    pub fn draw_line(&mut self, from: (i64, i64), to: (i64, i64), thickness: i64, color: Rgb<u8>) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        let half = thickness.max(1) / 2;
        let extent = thickness.max(1);

        loop {
            self.fill_rect(x - half, y - half, x - half + extent, y - half + extent, color);
            if x == to.0 && y == to.1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn fill_circle(&mut self, center: (i64, i64), radius: i64, color: Rgb<u8>) {
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r2 {
                    self.put(center.0 + dx, center.1 + dy, color);
                }
            }
        }
    }

    /// Draws `text` with its top-left corner at `origin`, each glyph pixel scaled to `scale × scale`.
    /// Characters outside basic Latin are left blank.
    pub fn draw_text(&mut self, origin: (i64, i64), text: &str, scale: i64, color: Rgb<u8>) {
        for (i, ch) in text.chars().enumerate() {
            let Some(glyph) = BASIC_FONTS.get(ch) else { continue };
            let glyph_left = origin.0 + i as i64 * GLYPH_SIZE * scale;
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..GLYPH_SIZE {
                    if (bits >> col) & 1 != 0 {
                        let x = glyph_left + col * scale;
                        let y = origin.1 + row as i64 * scale;
                        self.fill_rect(x, y, x + scale, y + scale, color);
                    }
                }
            }
        }
    }

    /// Same as [`Canvas::draw_text`], rotated a quarter turn counter-clockwise so it reads bottom-up.
    /// `origin` is the bottom-left corner of the rotated run.
    pub fn draw_text_vertical(&mut self, origin: (i64, i64), text: &str, scale: i64, color: Rgb<u8>) {
        for (i, ch) in text.chars().enumerate() {
            let Some(glyph) = BASIC_FONTS.get(ch) else { continue };
            let glyph_bottom = origin.1 - i as i64 * GLYPH_SIZE * scale;
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..GLYPH_SIZE {
                    if (bits >> col) & 1 != 0 {
                        let x = origin.0 + row as i64 * scale;
                        let y = glyph_bottom - (col + 1) * scale;
                        self.fill_rect(x, y, x + scale, y + scale, color);
                    }
                }
            }
        }
    }

    /// Draws `text` horizontally centred on `center.0`, vertically centred on `center.1`.
    pub fn draw_text_centered(&mut self, center: (i64, i64), text: &str, scale: i64, color: Rgb<u8>) {
        let origin = (center.0 - text_width(text, scale) / 2, center.1 - GLYPH_SIZE * scale / 2);
        self.draw_text(origin, text, scale, color);
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

/// Pixel width of `text` at `scale`.
pub fn text_width(text: &str, scale: i64) -> i64 {
    text.chars().count() as i64 * GLYPH_SIZE * scale
}

/// The rectangle of the canvas reserved for data, with the data ranges it displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl PlotArea {
    /// Plot area inside `margins = (left, top, right, bottom)` of a `width × height` canvas.
    pub fn new(
        width: u32,
        height: u32,
        margins: (i64, i64, i64, i64),
        x_range: (f64, f64),
        y_range: (f64, f64),
    ) -> Self {
        PlotArea {
            left: margins.0,
            top: margins.1,
            right: width as i64 - 1 - margins.2,
            bottom: height as i64 - 1 - margins.3,
            x_range,
            y_range,
        }
    }

    pub fn x_to_pixel(&self, x: f64) -> i64 {
        let t = Self::clamp_fraction((x - self.x_range.0) / (self.x_range.1 - self.x_range.0));
        self.left + (t * (self.right - self.left) as f64).round() as i64
    }

    /// Pixel rows grow downwards, so larger `y` maps closer to `top`.
    pub fn y_to_pixel(&self, y: f64) -> i64 {
        let t = Self::clamp_fraction((y - self.y_range.0) / (self.y_range.1 - self.y_range.0));
        self.bottom - (t * (self.bottom - self.top) as f64).round() as i64
    }

    /// Values far outside the data range land one plot-width past the edge, where drawing clips them.
    /// NaN maps to the range start.
    fn clamp_fraction(t: f64) -> f64 {
        if t.is_nan() { 0.0 } else { t.clamp(-1.0, 2.0) }
    }

    pub fn to_pixel(&self, x: f64, y: f64) -> (i64, i64) {
        (self.x_to_pixel(x), self.y_to_pixel(y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, WHITE};

    #[test]
    fn test_primitives_clip_to_bounds() {
        let mut canvas = Canvas::new(10, 10, WHITE);
        canvas.put(-1, 3, BLACK);
        canvas.put(10, 3, BLACK);
        canvas.fill_rect(-5, -5, 2, 2, BLACK);
        canvas.fill_circle((9, 9), 3, BLACK);

        let image = canvas.into_image();
        assert_eq!(*image.get_pixel(0, 0), BLACK);
        assert_eq!(*image.get_pixel(1, 1), BLACK);
        assert_eq!(*image.get_pixel(2, 2), WHITE);
        assert_eq!(*image.get_pixel(9, 9), BLACK);
    }

    #[test]
    fn test_draw_line_covers_endpoints() {
        let mut canvas = Canvas::new(20, 20, WHITE);
        canvas.draw_line((2, 3), (17, 11), 1, BLACK);
        let image = canvas.into_image();
        assert_eq!(*image.get_pixel(2, 3), BLACK);
        assert_eq!(*image.get_pixel(17, 11), BLACK);
        assert_eq!(*image.get_pixel(17, 3), WHITE);
    }

    #[test]
    fn test_stroke_rect_leaves_interior() {
        let mut canvas = Canvas::new(10, 10, WHITE);
        canvas.stroke_rect(1, 1, 8, 8, 1, BLACK);
        let image = canvas.into_image();
        assert_eq!(*image.get_pixel(1, 1), BLACK);
        assert_eq!(*image.get_pixel(8, 8), BLACK);
        assert_eq!(*image.get_pixel(1, 5), BLACK);
        assert_eq!(*image.get_pixel(5, 5), WHITE);
    }

    #[test]
    fn test_plot_area_clamps_extreme_values() {
        let area = PlotArea::new(100, 50, (10, 5, 9, 4), (0.0, 1.0), (0.0, 1.0));
        assert_eq!(area.x_to_pixel(1e300), 170);
        assert_eq!(area.x_to_pixel(f64::INFINITY), 170);
        assert_eq!(area.x_to_pixel(f64::NEG_INFINITY), -70);
        assert_eq!(area.y_to_pixel(1e300), -35);
        assert_eq!(area.to_pixel(f64::NAN, f64::NAN), (10, 45));
    }

    #[test]
    fn test_draw_text_marks_glyph_pixels() {
        let mut canvas = Canvas::new(40, 20, WHITE);
        canvas.draw_text((2, 2), "I", 2, BLACK);
        let image = canvas.into_image();
        let inked = image.pixels().filter(|p| **p == BLACK).count();
        assert!(inked > 0);
        // Glyph stays inside its 16x16 cell.
        for (x, y, p) in image.enumerate_pixels() {
            if *p == BLACK {
                assert!((2..18).contains(&x) && (2..18).contains(&y), "stray pixel at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_vertical_text_stays_above_origin() {
        let mut canvas = Canvas::new(20, 40, WHITE);
        canvas.draw_text_vertical((2, 30), "I", 1, BLACK);
        let image = canvas.into_image();
        assert!(image.pixels().any(|p| *p == BLACK));
        for (x, y, p) in image.enumerate_pixels() {
            if *p == BLACK {
                assert!((2..10).contains(&x) && (22..30).contains(&y), "stray pixel at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_text_width_scales() {
        assert_eq!(text_width("k=10", 2), 64);
        assert_eq!(text_width("", 3), 0);
    }

    #[test]
    fn test_plot_area_maps_corners() {
        let area = PlotArea::new(100, 50, (10, 5, 9, 4), (0.0, 1.0), (0.0, 1.0));
        assert_eq!(area.to_pixel(0.0, 0.0), (10, 45));
        assert_eq!(area.to_pixel(1.0, 1.0), (90, 5));
        assert_eq!(area.to_pixel(0.5, 0.5), (50, 25));
    }
}

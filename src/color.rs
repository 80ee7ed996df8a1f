use std::collections::BTreeMap;

use image::Rgb;
use palette::{Hsl, IntoColor, Srgb};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
pub const GRID_GRAY: Rgb<u8> = Rgb([220, 220, 220]);
pub const FALLBACK_GRAY: Rgb<u8> = Rgb([128, 128, 128]);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb<u8>> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Rgb([
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            ])
        })
        .collect()
}

/// Alpha-composites `fg` over `bg`.
pub fn blend(fg: Rgb<u8>, bg: Rgb<u8>, alpha: f32) -> Rgb<u8> {
    let alpha = alpha.clamp(0.0, 1.0);
    let mix = |f: u8, b: u8| (f as f32 * alpha + b as f32 * (1.0 - alpha)).round() as u8;
    Rgb([mix(fg[0], bg[0]), mix(fg[1], bg[1]), mix(fg[2], bg[2])])
}

// ---------------------------------------------------------------------------
// Class label → colour
// ---------------------------------------------------------------------------

/// Maps each class label to a distinct colour.
#[derive(Debug, Clone)]
pub struct ClassColors<L> {
    mapping: BTreeMap<L, Rgb<u8>>,
    default_color: Rgb<u8>,
}

impl<L: Ord + Clone> ClassColors<L> {
    /// Build the map from sorted, distinct class labels.
    pub fn new(classes: &[L]) -> Self {
        let palette = generate_palette(classes.len());
        let mapping = classes.iter().cloned().zip(palette).collect();
        ClassColors {
            mapping,
            default_color: FALLBACK_GRAY,
        }
    }

    pub fn color_for(&self, label: &L) -> Rgb<u8> {
        self.mapping.get(label).copied().unwrap_or(self.default_color)
    }
}

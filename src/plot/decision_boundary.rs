use std::path::Path;

use image::RgbImage;
use log::info;

use super::canvas::{Canvas, GLYPH_SIZE, PlotArea, text_width};
use crate::color::{BLACK, ClassColors, GRID_GRAY, WHITE, blend};
use crate::common_types::Dataset;
use crate::error::{KnnError, PlotError};
use crate::knn::KnnClassifier;

pub const WIDTH: u32 = 1000;
pub const HEIGHT: u32 = 600;
const MARGINS: (i64, i64, i64, i64) = (90, 50, 40, 70);
const REGION_ALPHA: f32 = 0.8;
const SAMPLE_RADIUS: i64 = 5;
const X_LABEL: &str = "Feature 1";
const Y_LABEL: &str = "Feature 2";
const LABEL_SCALE: i64 = 2;
const TICK_SCALE: i64 = 1;

/// `min, min + step, ...` strictly below `max`: `ceil((max - min) / step)` values.
pub fn grid_axis(min: f64, max: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || max <= min {
        return Vec::new();
    }
    let count = ((max - min) / step).ceil() as usize;
    (0..count).map(|i| min + i as f64 * step).collect()
}

/// Predicted class at every point of a uniform 2D grid.
///
/// `labels` is row-major: `ys` is the outer index and `xs` the inner one.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionGrid<L> {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub step: f64,
    pub labels: Vec<L>,
}

impl<L: Clone + Ord> DecisionGrid<L> {
    /// Classifies every point of the grid over `bounds × bounds` with spacing `step`.
    pub fn predict(
        classifier: &KnnClassifier<f64, L>,
        bounds: (f64, f64),
        step: f64,
    ) -> Result<Self, KnnError> {
        let xs = grid_axis(bounds.0, bounds.1, step);
        let ys = grid_axis(bounds.0, bounds.1, step);
        let points: Vec<Vec<f64>> = ys
            .iter()
            .flat_map(|&y| xs.iter().map(move |&x| vec![x, y]))
            .collect();
        let labels = classifier.predict(&points)?;
        Ok(DecisionGrid { xs, ys, step, labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label_at(&self, ix: usize, iy: usize) -> Option<&L> {
        if ix >= self.xs.len() {
            return None;
        }
        self.labels.get(iy * self.xs.len() + ix)
    }
}

/// Filled class regions from `grid`, overlaid with the training samples coloured by true label.
/// `k` only feeds the title.
pub fn render_decision_boundary<L: Clone + Ord>(
    grid: &DecisionGrid<L>,
    training: &Dataset<f64, L>,
    bounds: (f64, f64),
    k: usize,
) -> Result<RgbImage, PlotError> {
    if grid.is_empty() {
        return Err(PlotError::EmptyInput("empty decision grid"));
    }

    let colors = ClassColors::new(&training.classes());
    let mut canvas = Canvas::new(WIDTH, HEIGHT, WHITE);
    let area = PlotArea::new(WIDTH, HEIGHT, MARGINS, bounds, bounds);

    for (iy, &y) in grid.ys.iter().enumerate() {
        for (ix, &x) in grid.xs.iter().enumerate() {
            let Some(label) = grid.label_at(ix, iy) else { continue };
            let x1 = (x + grid.step).min(bounds.1);
            let y1 = (y + grid.step).min(bounds.1);
            let fill = blend(colors.color_for(label), WHITE, REGION_ALPHA);
            canvas.fill_rect(
                area.x_to_pixel(x),
                area.y_to_pixel(y1),
                area.x_to_pixel(x1) + 1,
                area.y_to_pixel(y) + 1,
                fill,
            );
        }
    }

    let tick_height = GLYPH_SIZE * TICK_SCALE;
    for fifth in 0..=5 {
        let t = bounds.0 + (bounds.1 - bounds.0) * fifth as f64 / 5.0;
        let (px, py) = area.to_pixel(t, t);
        if fifth > 0 && fifth < 5 {
            canvas.draw_line((px, area.top), (px, area.bottom), 1, GRID_GRAY);
            canvas.draw_line((area.left, py), (area.right, py), 1, GRID_GRAY);
        }
        canvas.draw_line((px, area.bottom), (px, area.bottom + 6), 1, BLACK);
        canvas.draw_line((area.left - 6, py), (area.left, py), 1, BLACK);

        let label = format!("{t:.1}");
        let width = text_width(&label, TICK_SCALE);
        canvas.draw_text((px - width / 2, area.bottom + 10), &label, TICK_SCALE, BLACK);
        canvas.draw_text((area.left - 10 - width, py - tick_height / 2), &label, TICK_SCALE, BLACK);
    }
    canvas.stroke_rect(area.left, area.top, area.right, area.bottom, 1, BLACK);

    let center_x = (area.left + area.right) / 2;
    let center_y = (area.top + area.bottom) / 2;
    let title = format!("Decision Boundary with k={k}");
    canvas.draw_text_centered((center_x, area.top / 2), &title, LABEL_SCALE, BLACK);
    canvas.draw_text_centered((center_x, HEIGHT as i64 - MARGINS.3 / 3), X_LABEL, LABEL_SCALE, BLACK);
    canvas.draw_text_vertical(
        (16, center_y + text_width(Y_LABEL, LABEL_SCALE) / 2),
        Y_LABEL,
        LABEL_SCALE,
        BLACK,
    );

    for sample in &training.samples {
        let &[x, y, ..] = &sample.features[..] else { continue };
        let center = area.to_pixel(x, y);
        canvas.fill_circle(center, SAMPLE_RADIUS + 1, BLACK);
        canvas.fill_circle(center, SAMPLE_RADIUS, colors.color_for(&sample.label));
    }

    Ok(canvas.into_image())
}

/// Predicts the grid with `classifier`, renders it and writes it to `path`.
pub fn save_decision_boundary<L: Clone + Ord>(
    classifier: &KnnClassifier<f64, L>,
    training: &Dataset<f64, L>,
    bounds: (f64, f64),
    step: f64,
    path: &Path,
) -> Result<(), PlotError> {
    let grid = DecisionGrid::predict(classifier, bounds, step)?;
    info!(
        "classified {}x{} decision grid with k={}",
        grid.xs.len(),
        grid.ys.len(),
        classifier.k()
    );
    let image = render_decision_boundary(&grid, training, bounds, classifier.k())?;
    image.save(path)?;
    info!("decision boundary saved as {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::generate_palette;
    use crate::common_types::DataPoint;
    use crate::evaluation::fit_classifier;

    fn split_halves() -> Dataset<f64, String> {
        let mut samples = Vec::new();
        for i in 0..5 {
            let y = 0.1 + i as f64 * 0.2;
            samples.push(DataPoint::new(vec![0.1, y], "left".to_string()));
            samples.push(DataPoint::new(vec![0.9, y], "right".to_string()));
        }
        Dataset::new(samples)
    }

    #[test]
    fn test_grid_axis_matches_step_count() {
        let axis = grid_axis(0.0, 1.0, 0.02);
        assert_eq!(axis.len(), 50);
        assert_eq!(axis[0], 0.0);
        assert!((axis[49] - 0.98).abs() < 1e-12);
        assert!(axis.iter().all(|&v| v < 1.0));

        assert_eq!(grid_axis(0.0, 1.0, 0.3).len(), 4);
        assert!(grid_axis(0.0, 1.0, 0.0).is_empty());
        assert!(grid_axis(1.0, 0.0, 0.1).is_empty());
    }

    #[test]
    fn test_grid_has_expected_point_count() {
        let training = split_halves();
        let classifier = fit_classifier(3, &training).unwrap();
        let grid = DecisionGrid::predict(&classifier, (0.0, 1.0), 0.02).unwrap();
        let per_axis = (1.0_f64 / 0.02).ceil() as usize;
        assert_eq!(grid.len(), per_axis * per_axis);
        assert_eq!(grid.xs.len(), per_axis);
        assert_eq!(grid.ys.len(), per_axis);
    }

    #[test]
    fn test_grid_follows_separated_regions() {
        let training = split_halves();
        let classifier = fit_classifier(1, &training).unwrap();
        let grid = DecisionGrid::predict(&classifier, (0.0, 1.0), 0.02).unwrap();

        // x = 0.1 and x = 0.9 sit at indices 5 and 45.
        for iy in [0, 10, 25, 49] {
            assert_eq!(grid.label_at(5, iy).map(String::as_str), Some("left"));
            assert_eq!(grid.label_at(45, iy).map(String::as_str), Some("right"));
        }
        assert_eq!(grid.label_at(50, 0), None);
    }

    #[test]
    fn test_render_colors_regions_and_samples() {
        let training = split_halves();
        let classifier = fit_classifier(1, &training).unwrap();
        let grid = DecisionGrid::predict(&classifier, (0.0, 1.0), 0.02).unwrap();
        let image = render_decision_boundary(&grid, &training, (0.0, 1.0), 1).unwrap();
        assert_eq!(image.dimensions(), (WIDTH, HEIGHT));

        let palette = generate_palette(2);
        let area = PlotArea::new(WIDTH, HEIGHT, MARGINS, (0.0, 1.0), (0.0, 1.0));

        // Region away from samples and grid lines.
        let (x, y) = area.to_pixel(0.05, 0.5);
        assert_eq!(*image.get_pixel(x as u32, y as u32), blend(palette[0], WHITE, REGION_ALPHA));
        let (x, y) = area.to_pixel(0.95, 0.5);
        assert_eq!(*image.get_pixel(x as u32, y as u32), blend(palette[1], WHITE, REGION_ALPHA));

        // Training sample centre carries the unblended class colour.
        let (x, y) = area.to_pixel(0.9, 0.1);
        assert_eq!(*image.get_pixel(x as u32, y as u32), palette[1]);
    }

    fn ink_in(image: &RgbImage, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>) -> usize {
        ys.flat_map(|y| xs.clone().map(move |x| (x, y)))
            .filter(|&(x, y)| *image.get_pixel(x, y) == BLACK)
            .count()
    }

    #[test]
    fn test_title_carries_k_and_axes_are_labelled() {
        let training = split_halves();
        let classifier = fit_classifier(1, &training).unwrap();
        let grid = DecisionGrid::predict(&classifier, (0.0, 1.0), 0.02).unwrap();
        let area = PlotArea::new(WIDTH, HEIGHT, MARGINS, (0.0, 1.0), (0.0, 1.0));
        let (top, bottom, left) = (area.top as u32, area.bottom as u32, area.left as u32);

        let k1 = render_decision_boundary(&grid, &training, (0.0, 1.0), 1).unwrap();
        let k10 = render_decision_boundary(&grid, &training, (0.0, 1.0), 10).unwrap();
        // One extra digit widens the centred title.
        assert!(ink_in(&k10, 0..WIDTH, 0..top - 5) > ink_in(&k1, 0..WIDTH, 0..top - 5));

        assert!(ink_in(&k1, 400..600, bottom + 25..HEIGHT) > 0, "missing x label");
        assert!(ink_in(&k1, 0..40, top..bottom) > 0, "missing y label");
        assert!(ink_in(&k1, left - 40..left - 8, bottom - 4..bottom + 4) > 0, "missing y ticks");
        assert!(ink_in(&k1, left - 12..left + 12, bottom + 10..bottom + 18) > 0, "missing x ticks");
    }

    #[test]
    fn test_far_away_sample_is_clipped() {
        let training = Dataset::new(vec![
            DataPoint::new(vec![0.1, 0.1], "a".to_string()),
            DataPoint::new(vec![1e300, 0.5], "b".to_string()),
        ]);
        let classifier = fit_classifier(1, &training).unwrap();
        let grid = DecisionGrid::predict(&classifier, (0.0, 1.0), 0.02).unwrap();

        let image = render_decision_boundary(&grid, &training, (0.0, 1.0), 1).unwrap();
        assert_eq!(image.dimensions(), (WIDTH, HEIGHT));

        let infinite = Dataset::new(vec![
            DataPoint::new(vec![0.1, 0.1], "a".to_string()),
            DataPoint::new(vec![f64::NEG_INFINITY, f64::INFINITY], "b".to_string()),
        ]);
        assert!(render_decision_boundary(&grid, &infinite, (0.0, 1.0), 1).is_ok());
    }

    #[test]
    fn test_save_writes_png() {
        let training = split_halves();
        let classifier = fit_classifier(3, &training).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decision_boundary.png");

        save_decision_boundary(&classifier, &training, (0.0, 1.0), 0.02, &path).unwrap();
        let written = image::open(&path).unwrap();
        assert_eq!((written.width(), written.height()), (WIDTH, HEIGHT));
    }

    #[test]
    fn test_empty_grid_rejected() {
        let grid: DecisionGrid<String> = DecisionGrid {
            xs: Vec::new(),
            ys: Vec::new(),
            step: 0.02,
            labels: Vec::new(),
        };
        let result = render_decision_boundary(&grid, &split_halves(), (0.0, 1.0), 1);
        assert!(matches!(result, Err(PlotError::EmptyInput(_))));
    }
}

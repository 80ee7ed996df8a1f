use std::path::Path;

use image::RgbImage;
use log::info;

use super::canvas::{Canvas, GLYPH_SIZE, PlotArea, text_width};
use crate::color::{BLACK, BLUE, GRID_GRAY, WHITE};
use crate::common_types::EvaluationResult;
use crate::error::PlotError;

pub const WIDTH: u32 = 1000;
pub const HEIGHT: u32 = 600;
const MARGINS: (i64, i64, i64, i64) = (90, 50, 40, 70);
const MARKER_RADIUS: i64 = 5;
const LINE_THICKNESS: i64 = 2;
const TITLE: &str = "Accuracy vs. k";
const X_LABEL: &str = "k Value";
const Y_LABEL: &str = "Accuracy";
const LABEL_SCALE: i64 = 2;
const TICK_SCALE: i64 = 1;

/// Line-and-marker plot of accuracy against `k`, in the order of `results`.
///
/// The x axis spans the smallest to the largest `k`; the y axis is fixed to `[0, 1]`.
pub fn render_accuracy_chart(results: &[EvaluationResult]) -> Result<RgbImage, PlotError> {
    if results.is_empty() {
        return Err(PlotError::EmptyInput("no evaluation results"));
    }

    let k_min = results.iter().map(|r| r.k).min().unwrap_or(0) as f64;
    let k_max = results.iter().map(|r| r.k).max().unwrap_or(0) as f64;
    let x_range = if k_max > k_min { (k_min, k_max) } else { (k_min - 1.0, k_max + 1.0) };

    let mut canvas = Canvas::new(WIDTH, HEIGHT, WHITE);
    let area = PlotArea::new(WIDTH, HEIGHT, MARGINS, x_range, (0.0, 1.0));

    // Horizontal grid every 0.1, vertical grid at each evaluated k.
    let tick_height = GLYPH_SIZE * TICK_SCALE;
    for tenth in 0..=10 {
        let y = area.y_to_pixel(tenth as f64 / 10.0);
        canvas.draw_line((area.left, y), (area.right, y), 1, GRID_GRAY);
        canvas.draw_line((area.left - 6, y), (area.left, y), 1, BLACK);

        let label = format!("{:.1}", tenth as f64 / 10.0);
        let x = area.left - 10 - text_width(&label, TICK_SCALE);
        canvas.draw_text((x, y - tick_height / 2), &label, TICK_SCALE, BLACK);
    }
    // Tick labels that would run into the previous one are dropped.
    let mut last_label_end = i64::MIN;
    for r in results {
        let x = area.x_to_pixel(r.k as f64);
        canvas.draw_line((x, area.top), (x, area.bottom), 1, GRID_GRAY);
        canvas.draw_line((x, area.bottom), (x, area.bottom + 6), 1, BLACK);

        let label = r.k.to_string();
        let start = x - text_width(&label, TICK_SCALE) / 2;
        if start > last_label_end + 2 {
            canvas.draw_text((start, area.bottom + 10), &label, TICK_SCALE, BLACK);
            last_label_end = start + text_width(&label, TICK_SCALE);
        }
    }
    canvas.stroke_rect(area.left, area.top, area.right, area.bottom, 1, BLACK);

    let center_x = (area.left + area.right) / 2;
    let center_y = (area.top + area.bottom) / 2;
    canvas.draw_text_centered((center_x, area.top / 2), TITLE, LABEL_SCALE, BLACK);
    canvas.draw_text_centered((center_x, HEIGHT as i64 - MARGINS.3 / 3), X_LABEL, LABEL_SCALE, BLACK);
    canvas.draw_text_vertical(
        (16, center_y + text_width(Y_LABEL, LABEL_SCALE) / 2),
        Y_LABEL,
        LABEL_SCALE,
        BLACK,
    );

    let points: Vec<(i64, i64)> = results
        .iter()
        .map(|r| area.to_pixel(r.k as f64, r.accuracy))
        .collect();
    for segment in points.windows(2) {
        canvas.draw_line(segment[0], segment[1], LINE_THICKNESS, BLUE);
    }
    for &point in &points {
        canvas.fill_circle(point, MARKER_RADIUS, BLUE);
    }

    Ok(canvas.into_image())
}

/// Renders the accuracy chart and writes it to `path` (format from the extension).
pub fn save_accuracy_chart(results: &[EvaluationResult], path: &Path) -> Result<(), PlotError> {
    let image = render_accuracy_chart(results)?;
    image.save(path)?;
    info!("accuracy chart saved as {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results() -> Vec<EvaluationResult> {
        vec![
            EvaluationResult::new(1, 0.5),
            EvaluationResult::new(3, 0.75),
            EvaluationResult::new(5, 1.0),
        ]
    }

    #[test]
    fn test_markers_drawn_at_data_points() {
        let image = render_accuracy_chart(&results()).unwrap();
        assert_eq!(image.dimensions(), (WIDTH, HEIGHT));

        let area = PlotArea::new(WIDTH, HEIGHT, MARGINS, (1.0, 5.0), (0.0, 1.0));
        for r in results() {
            let (x, y) = area.to_pixel(r.k as f64, r.accuracy);
            assert_eq!(*image.get_pixel(x as u32, y as u32), BLUE, "no marker for k={}", r.k);
        }
        // Margin stays blank.
        assert_eq!(*image.get_pixel(5, 5), WHITE);
    }

    fn has_ink(image: &RgbImage, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>) -> bool {
        ys.clone().any(|y| xs.clone().any(|x| *image.get_pixel(x, y) == BLACK))
    }

    #[test]
    fn test_title_and_axis_labels_drawn() {
        let image = render_accuracy_chart(&results()).unwrap();
        let area = PlotArea::new(WIDTH, HEIGHT, MARGINS, (1.0, 5.0), (0.0, 1.0));
        let (top, bottom, left) = (area.top as u32, area.bottom as u32, area.left as u32);

        assert!(has_ink(&image, 400..600, 0..top - 5), "missing title");
        assert!(has_ink(&image, 400..600, bottom + 25..HEIGHT), "missing x label");
        assert!(has_ink(&image, 0..40, top..bottom), "missing y label");
        // "0.0" and "1.0" right-aligned against the y ticks.
        assert!(has_ink(&image, left - 40..left - 8, bottom - 4..bottom + 4));
        assert!(has_ink(&image, left - 40..left - 8, top - 4..top + 4));
        // k tick labels under the axis.
        assert!(has_ink(&image, left - 8..left + 8, bottom + 10..bottom + 18));
    }

    #[test]
    fn test_crowded_tick_labels_keep_first_label() {
        let dense: Vec<EvaluationResult> = (1..=200).map(|k| EvaluationResult::new(k, 0.5)).collect();
        let image = render_accuracy_chart(&dense).unwrap();
        let area = PlotArea::new(WIDTH, HEIGHT, MARGINS, (1.0, 200.0), (0.0, 1.0));
        let (left, bottom) = (area.left as u32, area.bottom as u32);

        assert!(has_ink(&image, left - 4..left + 4, bottom + 10..bottom + 18));
        // A skipped label leaves its slot blank right after the first one.
        assert!(!has_ink(&image, left + 5..left + 6, bottom + 10..bottom + 18));
    }

    #[test]
    fn test_single_result_is_centered() {
        let image = render_accuracy_chart(&[EvaluationResult::new(7, 0.5)]).unwrap();
        let area = PlotArea::new(WIDTH, HEIGHT, MARGINS, (6.0, 8.0), (0.0, 1.0));
        let (x, y) = area.to_pixel(7.0, 0.5);
        assert_eq!(*image.get_pixel(x as u32, y as u32), BLUE);
    }

    #[test]
    fn test_empty_results_rejected() {
        assert!(matches!(render_accuracy_chart(&[]), Err(PlotError::EmptyInput(_))));
    }

    #[test]
    fn test_save_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accuracy_chart.png");
        save_accuracy_chart(&results(), &path).unwrap();

        let written = image::open(&path).unwrap();
        assert_eq!((written.width(), written.height()), (WIDTH, HEIGHT));
    }
}

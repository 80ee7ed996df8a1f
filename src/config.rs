//! Fixed settings for an evaluation run.

use std::path::PathBuf;

/// Inputs, candidate neighbor counts and outputs for one run of the evaluation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationConfig {
    pub training_path: PathBuf,
    pub testing_path: PathBuf,
    pub k_values: Vec<usize>,
    pub accuracy_chart_path: PathBuf,
    pub decision_boundary_path: PathBuf,
    /// Bounds of the decision-boundary grid, `(min, max)` on both axes.
    pub grid_bounds: (f64, f64),
    pub grid_step: f64,
}

impl EvaluationConfig {
    pub const DATASET_DIR: &'static str = "data/dataset";
    pub const DEFAULT_K_VALUES: [usize; 9] = [1, 3, 5, 10, 20, 30, 50, 75, 100];
    pub const DEFAULT_GRID_STEP: f64 = 0.02;
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        let dataset_dir = PathBuf::from(Self::DATASET_DIR);
        EvaluationConfig {
            training_path: dataset_dir.join("training.csv"),
            testing_path: dataset_dir.join("testing.csv"),
            k_values: Self::DEFAULT_K_VALUES.to_vec(),
            accuracy_chart_path: PathBuf::from("accuracy_chart.png"),
            decision_boundary_path: PathBuf::from("decision_boundary.png"),
            grid_bounds: (0.0, 1.0),
            grid_step: Self::DEFAULT_GRID_STEP,
        }
    }
}

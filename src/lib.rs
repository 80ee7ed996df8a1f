// Declare the pipeline modules
pub mod color;
pub mod common_types;
pub mod config;
pub mod data;
pub mod error;
pub mod evaluation;
pub mod knn;
pub mod pipeline;
pub mod plot;

#[cfg(feature = "python")]
mod python;

pub use common_types::{DataPoint, Dataset, EvaluationResult};
pub use config::EvaluationConfig;
pub use error::{FeatureFileError, KnnError, PlotError};
pub use evaluation::{accuracy_score, evaluate_k_values, select_best};
pub use knn::{KnnClassifier, KnnDistance, Weights};

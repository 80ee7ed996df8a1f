//! Error types returned by the library.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while fitting or querying a [`crate::knn::KnnClassifier`], or scoring its output.
#[derive(Debug, Error, PartialEq)]
pub enum KnnError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("classifier has not been fitted; call fit() first")]
    NotFitted,

    #[error("cannot fit a classifier on an empty training set")]
    EmptyTrainingSet,

    #[error("dimension mismatch: expected {expected} features, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("length mismatch: {left} predictions vs {right} labels")]
    LengthMismatch { left: usize, right: usize },

    #[error("cannot compute a score over empty input")]
    EmptyInput,
}

/// Errors raised while reading a feature file.
#[derive(Debug, Error)]
pub enum FeatureFileError {
    #[error("failed to read {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path}, row {row}: expected at least one feature and a label, found {found} field(s)")]
    TooFewFields { path: PathBuf, row: usize, found: usize },

    #[error("{path}, row {row}: '{value}' is not a number")]
    InvalidFeature { path: PathBuf, row: usize, value: String },

    #[error("{path}, row {row}: expected {expected} features, found {found}")]
    RaggedRow {
        path: PathBuf,
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Errors raised while rendering a plot.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("nothing to plot: {0}")]
    EmptyInput(&'static str),

    #[error("failed to classify plot grid: {0}")]
    Classifier(#[from] KnnError),

    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

//! This module contains the data structures shared by the loader, the classifier and the evaluator.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents a single data point, with features and a label.
///
/// - `F`: The type of the features (e.g., `f64`, `f32`).
/// - `L`: The type of the label (e.g., `i32`, `String`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DataPoint<F, L> {
    pub features: Vec<F>,
    pub label: L,
}

impl<F, L> DataPoint<F, L> {
    pub fn new(features: Vec<F>, label: L) -> Self {
        DataPoint { features, label }
    }

    pub fn dimensions(&self) -> usize {
        self.features.len()
    }
}

/// An ordered collection of samples, e.g. the training or the testing split.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<F, L> {
    pub samples: Vec<DataPoint<F, L>>,
}

impl<F: Clone, L: Clone + Ord> Dataset<F, L> {
    pub fn new(samples: Vec<DataPoint<F, L>>) -> Self {
        Dataset { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of features per sample, taken from the first sample (0 when empty).
    pub fn dimensions(&self) -> usize {
        self.samples.first().map_or(0, |dp| dp.dimensions())
    }

    /// The feature matrix, one row per sample.
    pub fn features(&self) -> Vec<Vec<F>> {
        self.samples.iter().map(|dp| dp.features.clone()).collect()
    }

    pub fn labels(&self) -> Vec<L> {
        self.samples.iter().map(|dp| dp.label.clone()).collect()
    }

    /// Distinct labels in ascending order.
    pub fn classes(&self) -> Vec<L> {
        let mut classes = self.labels();
        classes.sort();
        classes.dedup();
        classes
    }
}

/// Test accuracy obtained for one candidate neighbor count.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvaluationResult {
    pub k: usize,
    pub accuracy: f64,
}

impl EvaluationResult {
    pub fn new(k: usize, accuracy: f64) -> Self {
        EvaluationResult { k, accuracy }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_accessors() {
        let dataset = Dataset::new(vec![
            DataPoint::new(vec![0.1, 0.2], "b".to_string()),
            DataPoint::new(vec![0.3, 0.4], "a".to_string()),
            DataPoint::new(vec![0.5, 0.6], "b".to_string()),
        ]);

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.dimensions(), 2);
        assert_eq!(dataset.features()[1], vec![0.3, 0.4]);
        assert_eq!(dataset.labels(), vec!["b", "a", "b"]);
        assert_eq!(dataset.classes(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_empty_dataset_has_zero_dimensions() {
        let dataset: Dataset<f64, i32> = Dataset::new(Vec::new());
        assert!(dataset.is_empty());
        assert_eq!(dataset.dimensions(), 0);
        assert!(dataset.classes().is_empty());
    }
}

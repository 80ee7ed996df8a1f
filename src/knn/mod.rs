//! Brute-force k-nearest-neighbors classification.

pub mod heap_utils;

use std::collections::BTreeMap;

use log::debug;
use num_traits::{AsPrimitive, Float};

use crate::common_types::DataPoint;
use crate::error::KnnError;
use crate::evaluation::accuracy_score;
use heap_utils::KBestNeighbors;

/// Distance metric used to rank training samples against a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KnnDistance {
    #[default]
    Euclidean,
    Manhattan,
    Minkowski { p: u32 }, // p is the order for Minkowski distance
}

/// How the k nearest neighbors contribute to the vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weights {
    /// Every neighbor contributes one vote.
    #[default]
    Uniform,
    /// Every neighbor contributes the inverse of its distance.
    Distance,
}

/// The K-Nearest Neighbors Classifier.
///
/// Every query is answered by an exhaustive scan of the training set; there is no spatial index.
/// Neighbors at equal distance are ranked by their position in the training set and vote ties
/// go to the smallest label, so predictions are fully deterministic.
#[derive(Debug, Clone)]
pub struct KnnClassifier<F, L> {
    k: usize,
    training_data: Vec<DataPoint<F, L>>,
    dimensions: usize,
    pub distance_metric: KnnDistance,
    pub weights: Weights,
}

impl<F, L> KnnClassifier<F, L>
where
    F: Float + AsPrimitive<f64>,
    L: Clone + Ord,
{
    pub fn new(k: usize, distance_metric: KnnDistance, weights: Weights) -> Self {
        Self {
            k,
            training_data: Vec::new(),
            dimensions: 0,
            distance_metric,
            weights,
        }
    }

    /// Uniform-vote Euclidean classifier.
    pub fn with_k(k: usize) -> Self {
        Self::new(k, KnnDistance::default(), Weights::default())
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn is_fitted(&self) -> bool {
        !self.training_data.is_empty()
    }

    /// Trains the classifier by validating and storing the training data.
    ///
    /// Fails when `k` is 0 or larger than the number of training samples, when the
    /// training set is empty, when samples disagree on dimensionality, or when a
    /// Minkowski order below 1 was requested. Any previous training data is replaced.
    pub fn fit(&mut self, training_data: Vec<DataPoint<F, L>>) -> Result<(), KnnError> {
        if let KnnDistance::Minkowski { p } = self.distance_metric {
            if p == 0 {
                return Err(KnnError::InvalidParameter(
                    "Minkowski order p must be at least 1".to_string(),
                ));
            }
        }
        if self.k == 0 {
            return Err(KnnError::InvalidParameter(
                "n_neighbors must be greater than 0".to_string(),
            ));
        }
        if training_data.is_empty() {
            return Err(KnnError::EmptyTrainingSet);
        }
        if self.k > training_data.len() {
            return Err(KnnError::InvalidParameter(format!(
                "expected n_neighbors <= n_samples_fit, but n_neighbors = {}, n_samples_fit = {}",
                self.k,
                training_data.len()
            )));
        }

        let dimensions = training_data[0].features.len();
        if let Some(ragged) = training_data.iter().find(|dp| dp.features.len() != dimensions) {
            return Err(KnnError::DimensionMismatch {
                expected: dimensions,
                found: ragged.features.len(),
            });
        }

        debug!(
            "fitted k-NN (k={}, metric={:?}, weights={:?}) on {} samples with {} features",
            self.k,
            self.distance_metric,
            self.weights,
            training_data.len(),
            dimensions
        );
        self.training_data = training_data;
        self.dimensions = dimensions;
        Ok(())
    }

    pub fn minkowski_distance(a: &[F], b: &[F], p_val: u32) -> f64 {
        let sum_of_powers: f64 = a
            .iter()
            .zip(b.iter())
            .map(|(x, y)| {
                let diff: f64 = (*x - *y).abs().as_();
                diff.powi(p_val as i32)
            })
            .sum();
        sum_of_powers.powf(1.0 / (p_val as f64))
    }

    pub fn euclidean_distance(a: &[F], b: &[F]) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| {
                let diff: f64 = (*x - *y).as_();
                diff * diff
            })
            .sum::<f64>()
            .sqrt()
    }

    pub fn manhattan_distance(a: &[F], b: &[F]) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| -> f64 { (*x - *y).abs().as_() })
            .sum()
    }

    fn distance(&self, a: &[F], b: &[F]) -> f64 {
        match self.distance_metric {
            KnnDistance::Euclidean => Self::euclidean_distance(a, b),
            KnnDistance::Manhattan => Self::manhattan_distance(a, b),
            KnnDistance::Minkowski { p } => Self::minkowski_distance(a, b, p),
        }
    }

    fn check_query(&self, query: &[F]) -> Result<(), KnnError> {
        if !self.is_fitted() {
            return Err(KnnError::NotFitted);
        }
        if query.len() != self.dimensions {
            return Err(KnnError::DimensionMismatch {
                expected: self.dimensions,
                found: query.len(),
            });
        }
        Ok(())
    }

    /// Returns the `k` nearest training samples to `query` with their distances, nearest first.
    pub fn nearest_neighbors(&self, query: &[F]) -> Result<Vec<(f64, &DataPoint<F, L>)>, KnnError> {
        self.check_query(query)?;

        let mut best = KBestNeighbors::new(self.k);
        for (index, train_sample) in self.training_data.iter().enumerate() {
            let distance = self.distance(query, &train_sample.features);
            best.add(distance, index, train_sample);
        }
        Ok(best.into_sorted_vec())
    }

    /// Majority (or distance-weighted) vote among the nearest neighbors.
    fn vote(&self, neighbors: &[(f64, &DataPoint<F, L>)]) -> Result<L, KnnError> {
        let mut tally: BTreeMap<&L, f64> = BTreeMap::new();

        match self.weights {
            Weights::Uniform => {
                for (_, neighbor) in neighbors {
                    *tally.entry(&neighbor.label).or_insert(0.0) += 1.0;
                }
            }
            Weights::Distance => {
                let has_exact_match = neighbors.iter().any(|(d, _)| *d == 0.0);
                for (d, neighbor) in neighbors {
                    let weight = if has_exact_match {
                        if *d == 0.0 { 1.0 } else { 0.0 }
                    } else {
                        1.0 / d
                    };
                    *tally.entry(&neighbor.label).or_insert(0.0) += weight;
                }
            }
        }

        // BTreeMap iterates labels in ascending order; strict `>` keeps the smallest on ties.
        let mut winner: Option<(&L, f64)> = None;
        for (label, total) in tally {
            let is_better = match winner {
                Some((_, best_total)) => total > best_total,
                None => true,
            };
            if is_better {
                winner = Some((label, total));
            }
        }
        winner.map(|(label, _)| label.clone()).ok_or_else(|| {
            KnnError::InvalidParameter(format!("no neighbors to vote on (k={})", self.k))
        })
    }

    /// Predicts the label for a single test sample.
    pub fn predict_single(&self, test_sample_features: &[F]) -> Result<L, KnnError> {
        let neighbors = self.nearest_neighbors(test_sample_features)?;
        self.vote(&neighbors)
    }

    /// Predicts labels for a batch of test samples.
    pub fn predict(&self, test_data: &[Vec<F>]) -> Result<Vec<L>, KnnError> {
        if !self.is_fitted() {
            return Err(KnnError::NotFitted);
        }
        test_data
            .iter()
            .map(|sample| self.predict_single(sample))
            .collect()
    }

    /// Mean accuracy on the given test features and labels.
    pub fn score(&self, test_features: &[Vec<F>], test_labels: &[L]) -> Result<f64, KnnError> {
        let predictions = self.predict(test_features)?;
        accuracy_score(&predictions, test_labels)
    }
}

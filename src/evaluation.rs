//! Sweeping candidate neighbor counts and picking the best one.

use log::info;
use num_traits::{AsPrimitive, Float};

use crate::common_types::{Dataset, EvaluationResult};
use crate::error::KnnError;
use crate::knn::{KnnClassifier, KnnDistance, Weights};

/// Fraction of positions where `predicted` equals `truth`.
pub fn accuracy_score<L: PartialEq>(predicted: &[L], truth: &[L]) -> Result<f64, KnnError> {
    if predicted.len() != truth.len() {
        return Err(KnnError::LengthMismatch {
            left: predicted.len(),
            right: truth.len(),
        });
    }
    if truth.is_empty() {
        return Err(KnnError::EmptyInput);
    }
    let correct = predicted
        .iter()
        .zip(truth.iter())
        .filter(|(p, t)| p == t)
        .count();
    Ok(correct as f64 / truth.len() as f64)
}

/// Builds the classifier used throughout the sweep: brute-force search, Euclidean distance,
/// uniform vote weighting, fitted on the whole training split.
pub fn fit_classifier<F, L>(k: usize, training: &Dataset<F, L>) -> Result<KnnClassifier<F, L>, KnnError>
where
    F: Float + AsPrimitive<f64>,
    L: Clone + Ord,
{
    let mut classifier = KnnClassifier::new(k, KnnDistance::Euclidean, Weights::Uniform);
    classifier.fit(training.samples.clone())?;
    Ok(classifier)
}

/// Fits one classifier per candidate `k` and scores it on the testing split.
///
/// Results keep the order of `k_values`. The first `k` that cannot be fitted (for
/// instance one larger than the training set) aborts the sweep with its error.
pub fn evaluate_k_values<F, L>(
    k_values: &[usize],
    training: &Dataset<F, L>,
    testing: &Dataset<F, L>,
) -> Result<Vec<EvaluationResult>, KnnError>
where
    F: Float + AsPrimitive<f64>,
    L: Clone + Ord,
{
    let test_features = testing.features();
    let test_labels = testing.labels();

    let mut results = Vec::with_capacity(k_values.len());
    for &k in k_values {
        let classifier = fit_classifier(k, training)?;
        let accuracy = classifier.score(&test_features, &test_labels)?;
        info!("k={}, accuracy={:.4}", k, accuracy);
        results.push(EvaluationResult::new(k, accuracy));
    }
    Ok(results)
}

/// Returns the result with the highest accuracy; the earliest one wins a tie.
pub fn select_best(results: &[EvaluationResult]) -> Option<EvaluationResult> {
    results.iter().copied().fold(None, |best, current| match best {
        Some(b) if b.accuracy >= current.accuracy => Some(b),
        _ => Some(current),
    })
}

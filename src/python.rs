//! Python bindings, built with `--features python` (e.g. through maturin).

use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::common_types::{DataPoint, Dataset, EvaluationResult};
use crate::error::KnnError;
use crate::evaluation;
use crate::knn::{KnnClassifier, KnnDistance, Weights};

impl From<KnnError> for PyErr {
    fn from(err: KnnError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Python-friendly representation of KnnDistance
#[pyclass(name = "KnnDistance")]
#[derive(Clone)]
enum PyKnnDistance {
    Euclidean,
    Manhattan,
    // Minkowski needs its order; not exposed yet.
}

impl From<PyKnnDistance> for KnnDistance {
    fn from(val: PyKnnDistance) -> Self {
        match val {
            PyKnnDistance::Euclidean => KnnDistance::Euclidean,
            PyKnnDistance::Manhattan => KnnDistance::Manhattan,
        }
    }
}

/// Python-friendly representation of Weights
#[pyclass(name = "Weights")]
#[derive(Clone)]
enum PyWeights {
    Uniform,
    Distance,
}

impl From<PyWeights> for Weights {
    fn from(val: PyWeights) -> Self {
        match val {
            PyWeights::Uniform => Weights::Uniform,
            PyWeights::Distance => Weights::Distance,
        }
    }
}

fn to_dataset(features: Vec<Vec<f64>>, labels: Vec<String>) -> PyResult<Dataset<f64, String>> {
    if features.len() != labels.len() {
        return Err(PyValueError::new_err(format!(
            "got {} feature rows but {} labels",
            features.len(),
            labels.len()
        )));
    }
    Ok(Dataset::new(
        features
            .into_iter()
            .zip(labels)
            .map(|(f, l)| DataPoint::new(f, l))
            .collect(),
    ))
}

#[pyclass(name = "KnnClassifier")]
struct PyKnnClassifier {
    classifier: KnnClassifier<f64, String>,
}

#[pymethods]
impl PyKnnClassifier {
    #[new]
    #[pyo3(signature = (k, distance_metric = None, weights = None))]
    fn new(k: usize, distance_metric: Option<PyKnnDistance>, weights: Option<PyWeights>) -> Self {
        PyKnnClassifier {
            classifier: KnnClassifier::new(
                k,
                distance_metric.map(Into::into).unwrap_or_default(),
                weights.map(Into::into).unwrap_or_default(),
            ),
        }
    }

    /// Accepts a list of `{'features': [...], 'label': '...'}` dicts or `([...], '...')` tuples.
    fn fit(&mut self, training_data_py: &Bound<'_, PyList>) -> PyResult<()> {
        let mut training_data: Vec<DataPoint<f64, String>> = Vec::with_capacity(training_data_py.len());

        for item_py in training_data_py {
            if let Ok(dict) = item_py.downcast::<PyDict>() {
                let features = dict
                    .get_item("features")?
                    .ok_or_else(|| PyValueError::new_err("Missing 'features' key"))?
                    .extract::<Vec<f64>>()?;
                let label = dict
                    .get_item("label")?
                    .ok_or_else(|| PyValueError::new_err("Missing 'label' key"))?
                    .extract::<String>()?;
                training_data.push(DataPoint::new(features, label));
            } else if let Ok((features, label)) = item_py.extract::<(Vec<f64>, String)>() {
                training_data.push(DataPoint::new(features, label));
            } else {
                return Err(PyTypeError::new_err(
                    "Training data items must be dictionaries {'features': [...], 'label': '...'} or tuples ([...], '...')",
                ));
            }
        }

        self.classifier.fit(training_data)?;
        Ok(())
    }

    fn predict_single(&self, test_sample_features: Vec<f64>) -> PyResult<String> {
        Ok(self.classifier.predict_single(&test_sample_features)?)
    }

    fn predict(&self, test_data: Vec<Vec<f64>>) -> PyResult<Vec<String>> {
        Ok(self.classifier.predict(&test_data)?)
    }

    fn score(&self, test_features: Vec<Vec<f64>>, test_labels: Vec<String>) -> PyResult<f64> {
        Ok(self.classifier.score(&test_features, &test_labels)?)
    }

    #[getter]
    fn k(&self) -> usize {
        self.classifier.k()
    }
}

/// Returns `[(k, accuracy), ...]` in the order of `k_values`.
#[pyfunction]
fn evaluate_k_values(
    k_values: Vec<usize>,
    x_train: Vec<Vec<f64>>,
    y_train: Vec<String>,
    x_test: Vec<Vec<f64>>,
    y_test: Vec<String>,
) -> PyResult<Vec<(usize, f64)>> {
    let training = to_dataset(x_train, y_train)?;
    let testing = to_dataset(x_test, y_test)?;
    let results = evaluation::evaluate_k_values(&k_values, &training, &testing)?;
    Ok(results.into_iter().map(|r| (r.k, r.accuracy)).collect())
}

#[pyfunction]
fn select_best(results: Vec<(usize, f64)>) -> Option<(usize, f64)> {
    let results: Vec<EvaluationResult> = results
        .into_iter()
        .map(|(k, accuracy)| EvaluationResult::new(k, accuracy))
        .collect();
    evaluation::select_best(&results).map(|r| (r.k, r.accuracy))
}

/// A Python module implemented in Rust. The name of this function must match
/// the `lib.name` in `Cargo.toml`.
#[pymodule]
fn knn_evaluation(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(evaluate_k_values, m)?)?;
    m.add_function(wrap_pyfunction!(select_best, m)?)?;
    m.add_class::<PyKnnDistance>()?;
    m.add_class::<PyWeights>()?;
    m.add_class::<PyKnnClassifier>()?;
    Ok(())
}

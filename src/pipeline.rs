//! The end-to-end evaluation run: load, sweep, select, plot.

use anyhow::{Context, Result};
use log::{info, warn};

use crate::common_types::EvaluationResult;
use crate::config::EvaluationConfig;
use crate::data::loader::load_feature_file;
use crate::evaluation::{evaluate_k_values, fit_classifier, select_best};
use crate::plot::{save_accuracy_chart, save_decision_boundary};

/// Runs the whole evaluation described by `config` and returns the best `(k, accuracy)`.
///
/// Prints one `k=<k>, Accuracy=<accuracy>` line per candidate and a final
/// `Best k value: ...` line, then writes both plots. Any failure aborts the run.
pub fn run(config: &EvaluationConfig) -> Result<EvaluationResult> {
    let training = load_feature_file(&config.training_path)
        .with_context(|| format!("loading training set {}", config.training_path.display()))?;
    let testing = load_feature_file(&config.testing_path)
        .with_context(|| format!("loading testing set {}", config.testing_path.display()))?;
    info!(
        "loaded {} training and {} testing samples",
        training.len(),
        testing.len()
    );
    if training.classes().len() < 2 {
        warn!("training set contains fewer than two classes; every prediction will be the same");
    }

    let results = evaluate_k_values(&config.k_values, &training, &testing)
        .context("evaluating candidate k values")?;
    for r in &results {
        println!("{}", format_result(r));
    }

    let best = select_best(&results).context("no k values to evaluate")?;
    println!("{}", format_best(&best));

    save_accuracy_chart(&results, &config.accuracy_chart_path)
        .with_context(|| format!("writing {}", config.accuracy_chart_path.display()))?;

    let best_model = fit_classifier(best.k, &training)
        .with_context(|| format!("training the k={} model", best.k))?;
    save_decision_boundary(
        &best_model,
        &training,
        config.grid_bounds,
        config.grid_step,
        &config.decision_boundary_path,
    )
    .with_context(|| format!("writing {}", config.decision_boundary_path.display()))?;

    Ok(best)
}

/// Console line for one candidate. `{:?}` keeps the fractional part, so `1.0` prints as `1.0`.
pub fn format_result(result: &EvaluationResult) -> String {
    format!("k={}, Accuracy={:?}", result.k, result.accuracy)
}

pub fn format_best(best: &EvaluationResult) -> String {
    format!("Best k value: {} with accuracy: {:?}", best.k, best.accuracy)
}

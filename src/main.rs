use anyhow::Result;
use log::info;

use knn_evaluation::EvaluationConfig;
use knn_evaluation::pipeline;

fn main() -> Result<()> {
    env_logger::init();

    let config = EvaluationConfig::default();
    info!("evaluating k values {:?}", config.k_values);
    let best = pipeline::run(&config)?;
    info!("done, best k={}", best.k);
    Ok(())
}

//! Writes a synthetic `training.csv` / `testing.csv` pair for the evaluation binary.
//!
//! Usage: `generate_dataset [out_dir]` (defaults to `data/dataset`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use knn_evaluation::EvaluationConfig;

/// Class label and cluster centre, in normalized feature space.
const CLASSES: [(&str, (f64, f64)); 4] = [
    ("car", (0.25, 0.3)),
    ("fish", (0.7, 0.25)),
    ("house", (0.3, 0.75)),
    ("tree", (0.75, 0.7)),
];
const SPREAD: f64 = 0.18;
const TRAINING_PER_CLASS: usize = 60;
const TESTING_PER_CLASS: usize = 20;
const SEED: u64 = 42;

fn sample_class(rng: &mut StdRng, center: (f64, f64), n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|_| {
            let x = center.0 + rng.gen_range(-SPREAD..SPREAD);
            let y = center.1 + rng.gen_range(-SPREAD..SPREAD);
            (x.clamp(0.0, 1.0), y.clamp(0.0, 1.0))
        })
        .collect()
}

fn write_split(path: &Path, rng: &mut StdRng, per_class: usize) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["feature_1", "feature_2", "label"])?;

    let mut rows = 0;
    for (label, center) in CLASSES {
        for (x, y) in sample_class(rng, center, per_class) {
            writer.write_record([format!("{x:.4}"), format!("{y:.4}"), label.to_string()])?;
            rows += 1;
        }
    }
    writer.flush()?;
    Ok(rows)
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(EvaluationConfig::DATASET_DIR));
    fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = StdRng::seed_from_u64(SEED);
    for (name, per_class) in [("training.csv", TRAINING_PER_CLASS), ("testing.csv", TESTING_PER_CLASS)] {
        let path = out_dir.join(name);
        let rows = write_split(&path, &mut rng, per_class)?;
        info!("wrote {} samples to {}", rows, path.display());
    }
    Ok(())
}

use std::io;
use std::path::Path;

use log::debug;

use crate::common_types::{DataPoint, Dataset};
use crate::error::FeatureFileError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a feature file from disk.
///
/// Layout: one sample per row, the feature values followed by a trailing label:
///
/// ```text
/// feature_1,feature_2,label
/// 0.12,0.80,car
/// 0.55,0.31,fish
/// ```
///
/// The header row is optional; a first row in which no feature field is a number is skipped.
pub fn load_feature_file(path: &Path) -> Result<Dataset<f64, String>, FeatureFileError> {
    let reader = csv_builder()
        .from_path(path)
        .map_err(|source| FeatureFileError::Csv { path: path.to_path_buf(), source })?;
    let dataset = parse_records(reader, path)?;
    debug!(
        "loaded {} samples with {} features from {}",
        dataset.len(),
        dataset.dimensions(),
        path.display()
    );
    Ok(dataset)
}

/// Parse feature rows from any reader. `source` only labels error messages.
pub fn read_features<R: io::Read>(
    reader: R,
    source: &Path,
) -> Result<Dataset<f64, String>, FeatureFileError> {
    parse_records(csv_builder().from_reader(reader), source)
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

fn csv_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(false).flexible(true).trim(csv::Trim::All);
    builder
}

fn parse_records<R: io::Read>(
    mut reader: csv::Reader<R>,
    path: &Path,
) -> Result<Dataset<f64, String>, FeatureFileError> {
    let mut samples: Vec<DataPoint<f64, String>> = Vec::new();
    let mut expected_features: Option<usize> = None;

    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|source| FeatureFileError::Csv { path: path.to_path_buf(), source })?;
        let row = record.position().map_or(idx + 1, |p| p.line() as usize);

        if idx == 0 && is_header(&record) {
            continue;
        }
        if record.len() < 2 {
            return Err(FeatureFileError::TooFewFields {
                path: path.to_path_buf(),
                row,
                found: record.len(),
            });
        }

        let n_features = record.len() - 1;
        let features = record
            .iter()
            .take(n_features)
            .map(|value| {
                value.parse::<f64>().map_err(|_| FeatureFileError::InvalidFeature {
                    path: path.to_path_buf(),
                    row,
                    value: value.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        match expected_features {
            None => expected_features = Some(n_features),
            Some(expected) if expected != n_features => {
                return Err(FeatureFileError::RaggedRow {
                    path: path.to_path_buf(),
                    row,
                    expected,
                    found: n_features,
                });
            }
            Some(_) => {}
        }

        let label = record.get(n_features).unwrap_or_default().to_string();
        samples.push(DataPoint::new(features, label));
    }

    Ok(Dataset::new(samples))
}

/// A header names every feature column, so none of them parse as a number.
/// A single mistyped value in an otherwise numeric row is a data error, not a header.
fn is_header(record: &csv::StringRecord) -> bool {
    let n_features = record.len().saturating_sub(1).max(1);
    !record.is_empty()
        && record
            .iter()
            .take(n_features)
            .all(|field| field.parse::<f64>().is_err())
}

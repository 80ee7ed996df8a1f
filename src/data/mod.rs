/// Data layer: reading feature files into datasets.
///
/// ```text
///  training.csv / testing.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → Dataset<f64, String>
///   └──────────┘
/// ```

pub mod loader;

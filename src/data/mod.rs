/// Data layer: the label table and how it is read.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → InputTable (missing cells → "")
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ InputTable  │  Vec<Column>, one column per spiral
///   └────────────┘
/// ```

pub mod loader;
pub mod model;

use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, StringArray};
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{Column, InputTable};
use crate::error::VslError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the label table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row of column names, one label per cell (recommended)
/// * `.json`    – `[{ "name": "...", "cells": ["...", null, ...] }, ...]`
/// * `.parquet` – any columns; every cell is rendered to text
///
/// Any failure to find, open or parse the file is reported as
/// [`VslError::MissingInput`]; nothing is returned partially.
pub fn load_table(path: &Path) -> Result<InputTable, VslError> {
    if !path.is_file() {
        return Err(VslError::missing_input(path, "file not found"));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let loaded = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(anyhow::anyhow!("Unsupported file extension: .{other}")),
    };

    loaded.map_err(|e| VslError::missing_input(path, format!("{e:#}")))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then one row per slot.
/// Rows may be shorter than the header; the missing cells are empty labels.
fn load_csv(path: &Path) -> Result<InputTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    Ok(InputTable::from_rows(headers, rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct JsonColumn {
    name: String,
    #[serde(default)]
    cells: Vec<Option<String>>,
}

/// Expected JSON schema (column-oriented, order preserved):
///
/// ```json
/// [
///   { "name": "基礎", "cells": ["發音", null, "語法"] },
///   { "name": "進階", "cells": ["", "閱讀"] }
/// ]
/// ```
fn load_json(path: &Path) -> Result<InputTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let raw: Vec<JsonColumn> = serde_json::from_str(&text).context("parsing JSON")?;

    let columns = raw
        .into_iter()
        .map(|c| {
            let cells = c.cells.into_iter().map(Option::unwrap_or_default).collect();
            Column::new(c.name, cells)
        })
        .collect();

    Ok(InputTable::from_columns(columns))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file. Every column becomes one spiral's labels; string
/// columns are taken verbatim, other types are rendered with Arrow's display
/// formatting, nulls become empty labels.
///
/// Works with files written by **Pandas** (`df.to_parquet()`), **Polars** and
/// the bundled `generate_sample` tool.
fn load_parquet(path: &Path) -> Result<InputTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;

    let mut columns: Vec<Column> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| Column::new(f.name().clone(), Vec::new()))
        .collect();

    let reader = builder.build().context("building parquet reader")?;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        if batch.num_columns() != columns.len() {
            bail!(
                "record batch has {} columns, schema has {}",
                batch.num_columns(),
                columns.len()
            );
        }
        for (col_idx, column) in columns.iter_mut().enumerate() {
            let array = batch.column(col_idx);
            for row in 0..batch.num_rows() {
                let cell = extract_cell_text(array.as_ref(), row)
                    .with_context(|| format!("column '{}', row {row}", column.name))?;
                column.cells.push(cell);
            }
        }
    }

    Ok(InputTable::from_columns(columns))
}

/// Render a single Arrow cell as label text.
fn extract_cell_text(col: &dyn Array, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    match col.data_type() {
        DataType::Utf8 => {
            let s = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(s.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        _ => Ok(array_value_to_string(col, row)?),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use arrow::array::Int64Array;
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vsl-loader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_is_missing_input() {
        let path = std::env::temp_dir().join("vsl-does-not-exist/spiral_data.csv");
        let err = load_table(&path).unwrap_err();
        assert!(matches!(err, VslError::MissingInput { .. }));
    }

    #[test]
    fn csv_columns_become_spirals() {
        let path = temp_file("basic.csv", "a,b\nA,x\n,y\nB,\n");
        let table = load_table(&path).unwrap();
        assert_eq!(table.column_names(), vec!["a", "b"]);
        assert_eq!(table.columns[0].cells, vec!["A", "", "B"]);
        assert_eq!(table.columns[1].cells, vec!["x", "y", ""]);
    }

    #[test]
    fn csv_short_rows_are_padded() {
        let path = temp_file("ragged.csv", "a,b,c\n1\n2,3\n");
        let table = load_table(&path).unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(table.columns[2].cells, vec!["", ""]);
    }

    #[test]
    fn csv_keeps_numeric_cells_as_text() {
        let path = temp_file("numbers.csv", "a\n1\n2.5\n");
        let table = load_table(&path).unwrap();
        assert_eq!(table.columns[0].cells, vec!["1", "2.5"]);
    }

    #[test]
    fn json_nulls_and_short_columns() {
        let path = temp_file(
            "cols.json",
            r#"[{"name":"基礎","cells":["發音",null,"語法"]},{"name":"進階","cells":["閱讀"]}]"#,
        );
        let table = load_table(&path).unwrap();
        assert_eq!(table.column_names(), vec!["基礎", "進階"]);
        assert_eq!(table.columns[0].cells, vec!["發音", "", "語法"]);
        assert_eq!(table.columns[1].cells, vec!["閱讀", "", ""]);
    }

    #[test]
    fn malformed_json_is_missing_input() {
        let path = temp_file("broken.json", "{ not json");
        let err = load_table(&path).unwrap_err();
        assert!(matches!(err, VslError::MissingInput { .. }));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let path = temp_file("labels.txt", "a\nb\n");
        let err = load_table(&path).unwrap_err();
        match err {
            VslError::MissingInput { reason, .. } => assert!(reason.contains(".txt")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parquet_string_and_numeric_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("labels", DataType::Utf8, true),
            Field::new("ids", DataType::Int64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec![Some("A"), None, Some("B")])),
                Arc::new(Int64Array::from(vec![Some(1), Some(2), None])),
            ],
        )
        .unwrap();

        let path = temp_file("table.parquet", "");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_table(&path).unwrap();
        assert_eq!(table.column_names(), vec!["labels", "ids"]);
        assert_eq!(table.columns[0].cells, vec!["A", "", "B"]);
        assert_eq!(table.columns[1].cells, vec!["1", "2", ""]);
    }
}

// ---------------------------------------------------------------------------
// Blank predicate
// ---------------------------------------------------------------------------

/// A cell is blank when nothing but whitespace remains after trimming.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

// ---------------------------------------------------------------------------
// Column – one spiral's worth of label slots
// ---------------------------------------------------------------------------

/// A named column of the input table. Each cell is one label slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    /// Raw cell text; missing cells are stored as `""`.
    pub cells: Vec<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<String>) -> Self {
        Column {
            name: name.into(),
            cells,
        }
    }

    /// Number of label slots offered by this column (blank cells included).
    pub fn slot_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of cells that will actually produce a node.
    pub fn label_count(&self) -> usize {
        self.cells.iter().filter(|c| !is_blank(c)).count()
    }
}

// ---------------------------------------------------------------------------
// InputTable – the complete loaded table
// ---------------------------------------------------------------------------

/// Rectangular table of label text. Column `i` feeds spiral `i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputTable {
    pub columns: Vec<Column>,
}

impl InputTable {
    /// Build a table, padding short columns with empty cells so every
    /// column has the same number of slots.
    pub fn from_columns(mut columns: Vec<Column>) -> Self {
        let rows = columns.iter().map(Column::slot_count).max().unwrap_or(0);
        for col in &mut columns {
            col.cells.resize(rows, String::new());
        }
        InputTable { columns }
    }

    /// Build a table from header names and row-major records. Rows may be
    /// ragged; missing cells become `""` and cells past the header are dropped.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|h| Column::new(h, Vec::with_capacity(rows.len())))
            .collect();
        for row in rows {
            let mut cells = row.into_iter();
            for col in &mut columns {
                col.cells.push(cells.next().unwrap_or_default());
            }
        }
        InputTable { columns }
    }

    /// Number of columns (spirals fed).
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows (slots per column).
    pub fn height(&self) -> usize {
        self.columns.first().map(Column::slot_count).unwrap_or(0)
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn blank_detection_trims_whitespace() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\t\n"));
        assert!(!is_blank(" A "));
        assert!(!is_blank("單元"));
    }

    #[test]
    fn from_columns_pads_to_rectangle() {
        let table = InputTable::from_columns(vec![
            Column::new("a", cells(&["1", "2", "3"])),
            Column::new("b", cells(&["x"])),
        ]);
        assert_eq!(table.height(), 3);
        assert_eq!(table.columns[1].cells, cells(&["x", "", ""]));
    }

    #[test]
    fn from_rows_handles_ragged_records() {
        let table = InputTable::from_rows(
            cells(&["a", "b"]),
            vec![cells(&["1"]), cells(&["2", "y", "extra"])],
        );
        assert_eq!(table.width(), 2);
        assert_eq!(table.columns[0].cells, cells(&["1", "2"]));
        assert_eq!(table.columns[1].cells, cells(&["", "y"]));
    }

    #[test]
    fn label_count_ignores_blank_slots() {
        let col = Column::new("a", cells(&["A", "", " ", "B"]));
        assert_eq!(col.slot_count(), 4);
        assert_eq!(col.label_count(), 2);
    }

    #[test]
    fn empty_table() {
        let table = InputTable::default();
        assert_eq!(table.height(), 0);
        assert_eq!(table.width(), 0);
        assert!(table.column(0).is_none());
    }
}

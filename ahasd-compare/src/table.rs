//! Tables handed from the derivations to the output writers.

use serde::Serialize;

/// One named numeric cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
	/// Column label.
	pub name: String,
	/// Cell value.
	pub value: f64,
}

/// One labelled row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
	/// Row label.
	pub label: String,
	/// One cell per column, in column order.
	pub cells: Vec<Cell>,
}

impl TableRow {
	/// Value of the cell in `column`.
	pub fn value(&self, column: &str) -> Option<f64> {
		self.cells.iter().find(|c| c.name == column).map(|c| c.value)
	}
}

/// Derived tabular view handed to renderers.
///
/// Every row carries one cell per column, in column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonTable {
	/// Heading, e.g. `Throughput Comparison`.
	pub title: String,
	/// Row labels in insertion order.
	pub row_labels: Vec<String>,
	/// Column labels.
	pub column_labels: Vec<String>,
	/// Rows in insertion order.
	pub rows: Vec<TableRow>,
}

impl ComparisonTable {
	/// Empty table with fixed columns.
	pub fn new(title: impl Into<String>, column_labels: Vec<String>) -> Self {
		Self { title: title.into(), row_labels: Vec::new(), column_labels, rows: Vec::new() }
	}

	/// Append a row; `values` are matched to the column labels by position.
	pub fn push_row(&mut self, label: impl Into<String>, values: impl IntoIterator<Item = f64>) {
		let label = label.into();
		let cells = self
			.column_labels
			.iter()
			.zip(values)
			.map(|(name, value)| Cell { name: name.clone(), value })
			.collect();
		self.row_labels.push(label.clone());
		self.rows.push(TableRow { label, cells });
	}

	/// Row labelled `label`.
	pub fn row(&self, label: &str) -> Option<&TableRow> { self.rows.iter().find(|r| r.label == label) }

	/// Value at (`row`, `column`).
	pub fn value(&self, row: &str, column: &str) -> Option<f64> { self.row(row).and_then(|r| r.value(column)) }

	/// Number of rows.
	pub fn len(&self) -> usize { self.rows.len() }

	/// True when no row was pushed.
	pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rows_follow_column_order() {
		let mut t = ComparisonTable::new("t", vec!["a".into(), "b".into()]);
		t.push_row("r1", [1.0, 2.0]);
		t.push_row("r2", [3.0, 4.0]);
		assert_eq!(t.len(), 2);
		assert_eq!(t.row_labels, vec!["r1", "r2"]);
		assert_eq!(t.value("r2", "a"), Some(3.0));
		assert_eq!(t.value("r1", "b"), Some(2.0));
		assert_eq!(t.value("r3", "a"), None);
	}
}

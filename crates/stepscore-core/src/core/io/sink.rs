use crate::core::models::ids::TableId;
use std::fmt;
use thiserror::Error;

/// The value type a table column accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Int,
    Real,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

/// Name and typed column layout of a row-oriented table.
///
/// Columns are addressed by their position in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
}

impl TableSchema {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
        }
    }

    pub fn int_column(mut self, name: &str) -> Self {
        self.columns.push(ColumnSpec {
            name: name.to_string(),
            kind: ColumnKind::Int,
        });
        self
    }

    pub fn real_column(mut self, name: &str) -> Self {
        self.columns.push(ColumnSpec {
            name: name.to_string(),
            kind: ColumnKind::Real,
        });
        self
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

/// A single cell of a committed row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue {
    Int(i32),
    Real(f64),
}

impl CellValue {
    pub fn zero(kind: ColumnKind) -> Self {
        match kind {
            ColumnKind::Int => CellValue::Int(0),
            ColumnKind::Real => CellValue::Real(0.0),
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            CellValue::Int(_) => ColumnKind::Int,
            CellValue::Real(_) => ColumnKind::Real,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            CellValue::Int(v) => Some(*v),
            CellValue::Real(_) => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            CellValue::Real(v) => Some(*v),
            CellValue::Int(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(v) => write!(f, "{}", v),
            CellValue::Real(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Table {0:?} is not registered with this sink")]
    UnknownTable(TableId),

    #[error("Column {column} is out of range for table '{table}' with {width} columns")]
    ColumnOutOfRange {
        table: String,
        column: usize,
        width: usize,
    },

    #[error("Column {column} of table '{table}' expects {expected:?} values")]
    ColumnKind {
        table: String,
        column: usize,
        expected: ColumnKind,
    },

    #[error("CSV write error for table '{table}': {source}")]
    Csv { table: String, source: csv::Error },

    #[error("I/O error for table '{table}': {source}")]
    Io {
        table: String,
        source: std::io::Error,
    },
}

/// Row-oriented output for step data.
///
/// Cells of the current row are filled column by column; [`TableSink::add_row`]
/// commits the row and clears the buffer for the next one. Together the fills
/// and the commit form one row-producing operation.
pub trait TableSink {
    fn fill_int_column(
        &mut self,
        table: TableId,
        column: usize,
        value: i32,
    ) -> Result<(), SinkError>;

    fn fill_real_column(
        &mut self,
        table: TableId,
        column: usize,
        value: f64,
    ) -> Result<(), SinkError>;

    fn add_row(&mut self, table: TableId) -> Result<(), SinkError>;
}

impl<T: TableSink + ?Sized> TableSink for &mut T {
    fn fill_int_column(
        &mut self,
        table: TableId,
        column: usize,
        value: i32,
    ) -> Result<(), SinkError> {
        (**self).fill_int_column(table, column, value)
    }

    fn fill_real_column(
        &mut self,
        table: TableId,
        column: usize,
        value: f64,
    ) -> Result<(), SinkError> {
        (**self).fill_real_column(table, column, value)
    }

    fn add_row(&mut self, table: TableId) -> Result<(), SinkError> {
        (**self).add_row(table)
    }
}

/// Buffer for the row currently being filled. Unfilled cells commit as zero.
#[derive(Debug, Clone)]
pub(crate) struct RowBuffer {
    schema: TableSchema,
    cells: Vec<Option<CellValue>>,
}

impl RowBuffer {
    pub(crate) fn new(schema: TableSchema) -> Self {
        let cells = vec![None; schema.width()];
        Self { schema, cells }
    }

    pub(crate) fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub(crate) fn fill(&mut self, column: usize, value: CellValue) -> Result<(), SinkError> {
        let spec = self
            .schema
            .columns
            .get(column)
            .ok_or_else(|| SinkError::ColumnOutOfRange {
                table: self.schema.name.clone(),
                column,
                width: self.schema.width(),
            })?;
        if spec.kind != value.kind() {
            return Err(SinkError::ColumnKind {
                table: self.schema.name.clone(),
                column,
                expected: spec.kind,
            });
        }
        self.cells[column] = Some(value);
        Ok(())
    }

    pub(crate) fn take_row(&mut self) -> Vec<CellValue> {
        self.cells
            .iter_mut()
            .zip(&self.schema.columns)
            .map(|(cell, spec)| cell.take().unwrap_or(CellValue::zero(spec.kind)))
            .collect()
    }
}

#[derive(Debug, Clone)]
struct MemoryTable {
    buffer: RowBuffer,
    rows: Vec<Vec<CellValue>>,
}

/// A [`TableSink`] that keeps every committed row in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryTableSink {
    tables: Vec<MemoryTable>,
}

impl MemoryTableSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_table(&mut self, schema: TableSchema) -> TableId {
        self.tables.push(MemoryTable {
            buffer: RowBuffer::new(schema),
            rows: Vec::new(),
        });
        TableId(self.tables.len() - 1)
    }

    pub fn schema(&self, table: TableId) -> Option<&TableSchema> {
        self.tables.get(table.0).map(|t| t.buffer.schema())
    }

    pub fn rows(&self, table: TableId) -> Option<&[Vec<CellValue>]> {
        self.tables.get(table.0).map(|t| t.rows.as_slice())
    }

    pub fn row_count(&self, table: TableId) -> usize {
        self.tables.get(table.0).map_or(0, |t| t.rows.len())
    }

    fn table_mut(&mut self, table: TableId) -> Result<&mut MemoryTable, SinkError> {
        self.tables
            .get_mut(table.0)
            .ok_or(SinkError::UnknownTable(table))
    }
}

impl TableSink for MemoryTableSink {
    fn fill_int_column(
        &mut self,
        table: TableId,
        column: usize,
        value: i32,
    ) -> Result<(), SinkError> {
        self.table_mut(table)?
            .buffer
            .fill(column, CellValue::Int(value))
    }

    fn fill_real_column(
        &mut self,
        table: TableId,
        column: usize,
        value: f64,
    ) -> Result<(), SinkError> {
        self.table_mut(table)?
            .buffer
            .fill(column, CellValue::Real(value))
    }

    fn add_row(&mut self, table: TableId) -> Result<(), SinkError> {
        let table = self.table_mut(table)?;
        let row = table.buffer.take_row();
        table.rows.push(row);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> TableSchema {
        TableSchema::new("t").real_column("x").int_column("n")
    }

    #[test]
    fn schema_builder_preserves_column_order() {
        let schema = schema();
        assert_eq!(schema.width(), 2);
        assert_eq!(schema.column_names().collect::<Vec<_>>(), vec!["x", "n"]);
        assert_eq!(schema.columns[0].kind, ColumnKind::Real);
        assert_eq!(schema.columns[1].kind, ColumnKind::Int);
    }

    #[test]
    fn filled_row_is_committed_in_column_order() {
        let mut sink = MemoryTableSink::new();
        let table = sink.create_table(schema());

        sink.fill_int_column(table, 1, 42).unwrap();
        sink.fill_real_column(table, 0, 1.5).unwrap();
        sink.add_row(table).unwrap();

        let rows = sink.rows(table).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], vec![CellValue::Real(1.5), CellValue::Int(42)]);
    }

    #[test]
    fn add_row_clears_buffer_and_unfilled_cells_commit_as_zero() {
        let mut sink = MemoryTableSink::new();
        let table = sink.create_table(schema());

        sink.fill_real_column(table, 0, 2.0).unwrap();
        sink.fill_int_column(table, 1, 3).unwrap();
        sink.add_row(table).unwrap();
        sink.add_row(table).unwrap();

        let rows = sink.rows(table).unwrap();
        assert_eq!(rows[1], vec![CellValue::Real(0.0), CellValue::Int(0)]);
    }

    #[test]
    fn fill_rejects_out_of_range_column() {
        let mut sink = MemoryTableSink::new();
        let table = sink.create_table(schema());
        let result = sink.fill_real_column(table, 5, 1.0);
        assert!(matches!(
            result,
            Err(SinkError::ColumnOutOfRange {
                column: 5,
                width: 2,
                ..
            })
        ));
    }

    #[test]
    fn fill_rejects_wrong_column_kind() {
        let mut sink = MemoryTableSink::new();
        let table = sink.create_table(schema());
        let result = sink.fill_int_column(table, 0, 1);
        assert!(matches!(
            result,
            Err(SinkError::ColumnKind {
                column: 0,
                expected: ColumnKind::Real,
                ..
            })
        ));
    }

    #[test]
    fn unknown_table_is_reported() {
        let mut sink = MemoryTableSink::new();
        let result = sink.add_row(TableId(3));
        assert!(matches!(result, Err(SinkError::UnknownTable(TableId(3)))));
        assert_eq!(sink.row_count(TableId(3)), 0);
    }

    #[test]
    fn tables_are_independent() {
        let mut sink = MemoryTableSink::new();
        let a = sink.create_table(schema());
        let b = sink.create_table(TableSchema::new("other").int_column("k"));

        sink.fill_int_column(b, 0, 9).unwrap();
        sink.add_row(b).unwrap();

        assert_eq!(sink.row_count(a), 0);
        assert_eq!(sink.row_count(b), 1);
        assert_eq!(sink.schema(b).unwrap().name, "other");
    }

    #[test]
    fn sink_is_usable_through_mutable_reference() {
        fn commit_one(mut sink: impl TableSink, table: TableId) {
            sink.fill_int_column(table, 1, 7).unwrap();
            sink.add_row(table).unwrap();
        }

        let mut sink = MemoryTableSink::new();
        let table = sink.create_table(schema());
        commit_one(&mut sink, table);
        assert_eq!(sink.row_count(table), 1);
    }

    #[test]
    fn cell_value_accessors_and_display() {
        assert_eq!(CellValue::Int(4).as_int(), Some(4));
        assert_eq!(CellValue::Int(4).as_real(), None);
        assert_eq!(CellValue::Real(0.5).as_real(), Some(0.5));
        assert_eq!(CellValue::Real(-2.0).to_string(), "-2");
        assert_eq!(CellValue::Int(12).to_string(), "12");
    }
}

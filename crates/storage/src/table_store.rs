//! Row storage for a single table.
//!
//! A `TableStore` holds the rows of one table in insertion order and
//! validates every inserted row against the table's column schema.

use alloc::format;
use alloc::rc::Rc;
use alloc::vec::Vec;
use tern_core::schema::Table;
use tern_core::{Error, Result, Row};

/// Row storage for a single table.
///
/// Rows are shared behind `Rc` so query snapshots can hold them without
/// copying cell data.
pub struct TableStore {
    /// Table schema.
    schema: Table,
    /// Rows in insertion order.
    rows: Vec<Rc<Row>>,
}

impl TableStore {
    /// Creates a new empty store for the given schema.
    pub fn new(schema: Table) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    /// Returns the table schema.
    #[inline]
    pub fn schema(&self) -> &Table {
        &self.schema
    }

    /// Returns the number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Validates a row against the schema: arity, declared column types,
    /// and NOT NULL constraints.
    fn validate(&self, row: &Row) -> Result<()> {
        let columns = self.schema.columns();
        if row.len() != columns.len() {
            return Err(Error::schema_violation(
                self.schema.name(),
                format!(
                    "Expected {} values, got {}",
                    columns.len(),
                    row.len()
                ),
            ));
        }
        for (value, column) in row.values().iter().zip(columns) {
            if value.is_null() {
                if !column.is_nullable() {
                    return Err(Error::schema_violation(
                        self.schema.name(),
                        format!("Null in NOT NULL column {}", column.name()),
                    ));
                }
                continue;
            }
            if !value.conforms_to(column.data_type()) {
                return Err(Error::schema_violation(
                    self.schema.name(),
                    format!(
                        "Column {} expects {}",
                        column.name(),
                        column.data_type().name()
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Inserts a row after validating it against the schema.
    pub fn insert(&mut self, row: Row) -> Result<()> {
        self.validate(&row)?;
        self.rows.push(Rc::new(row));
        Ok(())
    }

    /// Inserts a batch of rows. Fails on the first invalid row; rows
    /// before it stay inserted.
    pub fn insert_many(&mut self, rows: Vec<Row>) -> Result<()> {
        for row in rows {
            self.insert(row)?;
        }
        Ok(())
    }

    /// Returns the rows in insertion order.
    #[inline]
    pub fn rows(&self) -> &[Rc<Row>] {
        &self.rows
    }

    /// Returns a snapshot of the current rows. The snapshot is unaffected
    /// by later inserts into this store.
    pub fn snapshot(&self) -> Vec<Rc<Row>> {
        self.rows.clone()
    }

    /// Removes all rows, keeping the schema.
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

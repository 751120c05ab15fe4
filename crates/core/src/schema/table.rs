//! Table definition for catalog schemas.

use super::column::Column;
use crate::error::{Error, Result};
use crate::types::DataType;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// A table definition: a name plus an ordered list of columns.
#[derive(Clone, Debug)]
pub struct Table {
    /// Table name.
    name: String,
    /// Column definitions, positionally ordered.
    columns: Vec<Column>,
}

impl Table {
    /// Creates a new table with the given name and columns. Prefer
    /// `TableBuilder`, which also validates names and duplicates.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        let columns: Vec<Column> = columns
            .into_iter()
            .enumerate()
            .map(|(i, c)| c.with_index(i))
            .collect();
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Returns the table name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the columns.
    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Gets a column by name.
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Gets a column index by name.
    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }
}

/// Builder for creating table definitions.
pub struct TableBuilder {
    name: String,
    columns: Vec<Column>,
}

impl TableBuilder {
    /// Creates a new table builder.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        Self::check_naming_rules(&name)?;
        Ok(Self {
            name,
            columns: Vec::new(),
        })
    }

    /// Validates a name follows identifier naming rules.
    fn check_naming_rules(name: &str) -> Result<()> {
        let first = match name.chars().next() {
            Some(c) => c,
            None => return Err(Error::invalid_schema("Name cannot be empty")),
        };
        if !first.is_ascii_alphabetic() && first != '_' {
            return Err(Error::invalid_schema(format!(
                "Name must start with letter or underscore: {}",
                name
            )));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(Error::invalid_schema(format!(
                "Name contains invalid characters: {}",
                name
            )));
        }
        Ok(())
    }

    /// Adds a nullable column to the table.
    pub fn add_column(mut self, name: impl Into<String>, data_type: DataType) -> Result<Self> {
        let name = name.into();
        Self::check_naming_rules(&name)?;
        if self.columns.iter().any(|c| c.name() == name) {
            return Err(Error::invalid_schema(format!(
                "Duplicate column name: {}",
                name
            )));
        }
        self.columns.push(Column::new(name, data_type));
        Ok(self)
    }

    /// Adds a NOT NULL column to the table.
    pub fn add_not_null_column(
        self,
        name: impl Into<String>,
        data_type: DataType,
    ) -> Result<Self> {
        let mut builder = self.add_column(name, data_type)?;
        if let Some(col) = builder.columns.pop() {
            builder.columns.push(col.nullable(false));
        }
        Ok(builder)
    }

    /// Builds the table definition.
    pub fn build(self) -> Result<Table> {
        if self.columns.is_empty() {
            return Err(Error::invalid_schema(format!(
                "Table {} has no columns",
                self.name
            )));
        }
        Ok(Table::new(self.name, self.columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_builder() {
        let table = TableBuilder::new("users")
            .unwrap()
            .add_not_null_column("id", DataType::Integer)
            .unwrap()
            .add_column("name", DataType::Text)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(table.name(), "users");
        assert_eq!(table.columns().len(), 2);
        assert_eq!(table.get_column_index("name"), Some(1));
        assert!(!table.get_column("id").unwrap().is_nullable());
        assert!(table.get_column("name").unwrap().is_nullable());
    }

    #[test]
    fn test_naming_rules() {
        assert!(TableBuilder::new("").is_err());
        assert!(TableBuilder::new("1abc").is_err());
        assert!(TableBuilder::new("a-b").is_err());
        assert!(TableBuilder::new("_ok").is_ok());
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let result = TableBuilder::new("t")
            .unwrap()
            .add_column("x", DataType::Integer)
            .unwrap()
            .add_column("x", DataType::Text);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(TableBuilder::new("t").unwrap().build().is_err());
    }

    #[test]
    fn test_column_indices_assigned() {
        let table = TableBuilder::new("t")
            .unwrap()
            .add_column("a", DataType::Integer)
            .unwrap()
            .add_column("b", DataType::Integer)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(table.columns()[0].index(), 0);
        assert_eq!(table.columns()[1].index(), 1);
    }
}

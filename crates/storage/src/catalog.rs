//! Catalog for managing multiple table stores.

use crate::table_store::TableStore;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use tern_core::schema::Table;
use tern_core::{Error, Result, Row};

/// Catalog mapping table names to their stores.
pub struct Catalog {
    tables: BTreeMap<String, TableStore>,
}

impl Catalog {
    /// Creates a new empty catalog.
    pub fn new() -> Self {
        Self {
            tables: BTreeMap::new(),
        }
    }

    /// Creates a table in the catalog.
    pub fn create_table(&mut self, schema: Table) -> Result<()> {
        let name = schema.name().to_string();
        if self.tables.contains_key(&name) {
            return Err(Error::table_exists(name));
        }
        self.tables.insert(name, TableStore::new(schema));
        Ok(())
    }

    /// Drops a table from the catalog.
    pub fn drop_table(&mut self, name: &str) -> Result<()> {
        if self.tables.remove(name).is_none() {
            return Err(Error::table_not_found(name));
        }
        Ok(())
    }

    /// Inserts rows into a named table.
    pub fn insert_rows(&mut self, name: &str, rows: Vec<Row>) -> Result<()> {
        let store = self
            .tables
            .get_mut(name)
            .ok_or_else(|| Error::table_not_found(name))?;
        store.insert_many(rows)
    }

    /// Gets a table store by name.
    pub fn get(&self, name: &str) -> Result<&TableStore> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::table_not_found(name))
    }

    /// Checks if a table exists.
    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Returns all table names.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(|s| s.as_str()).collect()
    }

    /// Returns the number of tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use tern_core::schema::TableBuilder;
    use tern_core::{DataType, Value};

    fn test_schema(name: &str) -> Table {
        TableBuilder::new(name)
            .unwrap()
            .add_not_null_column("id", DataType::Integer)
            .unwrap()
            .add_column("name", DataType::Text)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_create_and_get() {
        let mut catalog = Catalog::new();
        catalog.create_table(test_schema("users")).unwrap();
        assert!(catalog.has_table("users"));
        assert_eq!(catalog.get("users").unwrap().len(), 0);
    }

    #[test]
    fn test_duplicate_table_rejected() {
        let mut catalog = Catalog::new();
        catalog.create_table(test_schema("users")).unwrap();
        let err = catalog.create_table(test_schema("users"));
        assert!(matches!(err, Err(Error::TableExists { .. })));
    }

    #[test]
    fn test_missing_table() {
        let catalog = Catalog::new();
        let err = catalog.get("ghost");
        assert!(matches!(err, Err(Error::TableNotFound { .. })));
    }

    #[test]
    fn test_insert_rows() {
        let mut catalog = Catalog::new();
        catalog.create_table(test_schema("users")).unwrap();
        catalog
            .insert_rows(
                "users",
                vec![
                    Row::new(vec![Value::Integer(1), Value::Text("Alice".into())]),
                    Row::new(vec![Value::Integer(2), Value::Null]),
                ],
            )
            .unwrap();
        assert_eq!(catalog.get("users").unwrap().len(), 2);
    }

    #[test]
    fn test_drop_table() {
        let mut catalog = Catalog::new();
        catalog.create_table(test_schema("users")).unwrap();
        catalog.drop_table("users").unwrap();
        assert!(!catalog.has_table("users"));
        assert!(catalog.drop_table("users").is_err());
    }
}

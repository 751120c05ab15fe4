//! Output schemas and column name resolution.
//!
//! Every bound plan node carries a `Schema`: the ordered output column
//! names of that node. Scan schemas qualify columns as `alias.column`;
//! resolution accepts either the exact name or an unqualified suffix
//! when it is unambiguous.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use tern_core::{Error, Result};

/// Outcome of resolving a column name against one schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Resolved to the column at this index.
    Found(usize),
    /// No candidate in this schema; callers may consult outer scopes.
    NotFound,
}

/// Ordered, unique output column names of a plan node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    /// Creates a schema, rejecting duplicate column names.
    pub fn new(columns: Vec<String>) -> Result<Self> {
        for (i, name) in columns.iter().enumerate() {
            if columns[..i].contains(name) {
                return Err(Error::invalid_plan(format!(
                    "Duplicate output column: {}",
                    name
                )));
            }
        }
        Ok(Self { columns })
    }

    /// Concatenates two schemas, as a join output does.
    pub fn join(left: &Schema, right: &Schema) -> Result<Self> {
        let mut columns = left.columns.clone();
        columns.extend(right.columns.iter().cloned());
        Schema::new(columns)
    }

    /// Returns the column names in order.
    #[inline]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the schema has no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Resolves a column name.
    ///
    /// An exact match wins. Otherwise an unqualified name matches a
    /// qualified column whose `.name` suffix equals it; two such
    /// candidates make the reference ambiguous.
    pub fn resolve(&self, name: &str) -> Result<Resolution> {
        if let Some(idx) = self.columns.iter().position(|c| c == name) {
            return Ok(Resolution::Found(idx));
        }
        let mut found: Option<usize> = None;
        for (idx, column) in self.columns.iter().enumerate() {
            if let Some(prefix) = column.strip_suffix(name) {
                if prefix.ends_with('.') {
                    if found.is_some() {
                        return Err(Error::ambiguous_column(name));
                    }
                    found = Some(idx);
                }
            }
        }
        Ok(match found {
            Some(idx) => Resolution::Found(idx),
            None => Resolution::NotFound,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn schema(names: &[&str]) -> Schema {
        Schema::new(names.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_exact_match() {
        let s = schema(&["users.id", "users.name"]);
        assert_eq!(s.resolve("users.id").unwrap(), Resolution::Found(0));
    }

    #[test]
    fn test_suffix_match() {
        let s = schema(&["users.id", "users.name"]);
        assert_eq!(s.resolve("name").unwrap(), Resolution::Found(1));
    }

    #[test]
    fn test_ambiguous_suffix() {
        let s = schema(&["users.id", "orders.id"]);
        let err = s.resolve("id");
        assert!(matches!(err, Err(Error::AmbiguousColumn { .. })));
    }

    #[test]
    fn test_not_found() {
        let s = schema(&["users.id"]);
        assert_eq!(s.resolve("ghost").unwrap(), Resolution::NotFound);
    }

    #[test]
    fn test_suffix_requires_dot_boundary() {
        // "users.uid" must not match an unqualified "id"
        let s = schema(&["users.uid"]);
        assert_eq!(s.resolve("id").unwrap(), Resolution::NotFound);
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let err = Schema::new(vec!["a".to_string(), "a".to_string()]);
        assert!(matches!(err, Err(Error::InvalidPlan { .. })));
    }

    #[test]
    fn test_join_schemas() {
        let l = schema(&["a.x"]);
        let r = schema(&["b.y"]);
        let joined = Schema::join(&l, &r).unwrap();
        assert_eq!(joined.columns(), &["a.x".to_string(), "b.y".to_string()]);
    }
}

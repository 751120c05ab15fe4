//! Row structure for the Tern query engine.
//!
//! A `Row` is an immutable ordered sequence of values. Operators never
//! mutate a row in place; computing new columns produces a new row.

use crate::value::Value;
use alloc::vec::Vec;

/// A row flowing through the engine, positionally aligned with the schema
/// of the operator that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    /// Creates a row from its values.
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Returns a reference to the values.
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Consumes the row, returning its values.
    #[inline]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Gets a value at the given column index.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Returns the number of values in this row.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if this row has no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Produces a new row with the other row's values appended, as a join
    /// result does.
    pub fn concat(&self, other: &Row) -> Row {
        let mut values = Vec::with_capacity(self.values.len() + other.values.len());
        values.extend(self.values.iter().cloned());
        values.extend(other.values.iter().cloned());
        Row::new(values)
    }

    /// Produces a new row padded on the right with `count` Nulls, as the
    /// unmatched side of an outer join does.
    pub fn pad_right(&self, count: usize) -> Row {
        let mut values = Vec::with_capacity(self.values.len() + count);
        values.extend(self.values.iter().cloned());
        values.resize(self.values.len() + count, Value::Null);
        Row::new(values)
    }

    /// Produces a new row padded on the left with `count` Nulls.
    pub fn pad_left(&self, count: usize) -> Row {
        let mut values = Vec::with_capacity(self.values.len() + count);
        values.resize(count, Value::Null);
        values.extend(self.values.iter().cloned());
        Row::new(values)
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Row::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_row_get() {
        let row = Row::new(vec![Value::Integer(1), Value::Text("Alice".into())]);
        assert_eq!(row.get(0), Some(&Value::Integer(1)));
        assert_eq!(row.get(1), Some(&Value::Text("Alice".into())));
        assert_eq!(row.get(2), None);
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_row_concat() {
        let a = Row::new(vec![Value::Integer(1)]);
        let b = Row::new(vec![Value::Integer(2), Value::Integer(3)]);
        let joined = a.concat(&b);
        assert_eq!(
            joined.values(),
            &[Value::Integer(1), Value::Integer(2), Value::Integer(3)]
        );
    }

    #[test]
    fn test_row_padding() {
        let row = Row::new(vec![Value::Integer(1)]);
        let padded = row.pad_right(2);
        assert_eq!(
            padded.values(),
            &[Value::Integer(1), Value::Null, Value::Null]
        );
        let padded = row.pad_left(1);
        assert_eq!(padded.values(), &[Value::Null, Value::Integer(1)]);
    }

    #[test]
    fn test_row_equality() {
        let a = Row::new(vec![Value::Integer(42)]);
        let b = Row::new(vec![Value::Integer(42)]);
        let c = Row::new(vec![Value::Integer(7)]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}

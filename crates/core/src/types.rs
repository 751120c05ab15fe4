//! Data type definitions for the Tern query engine.
//!
//! This module defines the scalar types a table column can declare.

/// Supported column data types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Boolean type (true/false)
    Boolean,
    /// 64-bit signed integer
    Integer,
    /// 64-bit floating point number
    Float,
    /// UTF-8 string
    Text,
    /// Calendar date stored as days since the Unix epoch
    Date,
}

impl DataType {
    /// Returns true if this type participates in numeric arithmetic.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Integer | DataType::Float)
    }

    /// Returns a short lowercase name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Boolean => "boolean",
            DataType::Integer => "integer",
            DataType::Float => "float",
            DataType::Text => "text",
            DataType::Date => "date",
        }
    }
}

//! Tern Core - foundational types for the Tern in-memory query engine.
//!
//! This crate provides:
//!
//! - `DataType`: Supported data types (Boolean, Integer, Float, Text, Date)
//! - `Value`: Runtime scalar values with SQL Null semantics
//! - `Truth`: Three-valued logic for predicate evaluation
//! - `Row`: An immutable ordered sequence of values
//! - `schema`: Schema definitions (Column, Table, TableBuilder)
//! - `Error`: Error taxonomy for catalog, planning, and execution
//!
//! # Example
//!
//! ```rust
//! use tern_core::{DataType, Value, Row};
//! use tern_core::schema::TableBuilder;
//!
//! let table = TableBuilder::new("users")
//!     .unwrap()
//!     .add_not_null_column("id", DataType::Integer)
//!     .unwrap()
//!     .add_column("name", DataType::Text)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let row = Row::new(vec![Value::Integer(1), Value::Text("Alice".into())]);
//!
//! assert_eq!(table.get_column_index("name"), Some(1));
//! assert_eq!(row.get(1), Some(&Value::Text("Alice".into())));
//! ```

#![no_std]

extern crate alloc;

mod error;
pub mod pattern_match;
mod row;
pub mod schema;
mod truth;
mod types;
mod value;

pub use error::{Error, Result};
pub use row::Row;
pub use truth::Truth;
pub use types::DataType;
pub use value::{ArithOp, Comparison, Value};

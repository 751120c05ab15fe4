//! Tern Storage - table storage and catalog for the Tern query engine.
//!
//! This crate provides:
//!
//! - `TableStore`: Row storage for a single table with schema validation
//! - `Catalog`: Name-to-store mapping for query resolution
//!
//! # Example
//!
//! ```rust
//! use tern_storage::Catalog;
//! use tern_core::schema::TableBuilder;
//! use tern_core::{DataType, Row, Value};
//!
//! let mut catalog = Catalog::new();
//! let schema = TableBuilder::new("users")
//!     .unwrap()
//!     .add_not_null_column("id", DataType::Integer)
//!     .unwrap()
//!     .add_column("name", DataType::Text)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//! catalog.create_table(schema).unwrap();
//!
//! let row = Row::new(vec![Value::Integer(1), Value::Text("Alice".into())]);
//! catalog.insert_rows("users", vec![row]).unwrap();
//!
//! assert_eq!(catalog.get("users").unwrap().len(), 1);
//! ```

#![no_std]

extern crate alloc;

pub mod catalog;
pub mod table_store;

pub use catalog::Catalog;
pub use table_store::TableStore;

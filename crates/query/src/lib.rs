//! Query planning and execution for the tern engine.
//!
//! Plans are built programmatically as [`ast::PlanNode`] trees, bound
//! against a [`tern_storage::Catalog`] into typed plans with resolved
//! column indices, and executed by a pull-based operator pipeline.
//! Expression evaluation follows SQL three-valued logic throughout.
//!
//! ```
//! use tern_core::schema::TableBuilder;
//! use tern_core::{DataType, Row, Value};
//! use tern_query::ast::{Expr, PlanNode};
//! use tern_query::PlanRunner;
//! use tern_storage::Catalog;
//!
//! let mut catalog = Catalog::new();
//! let table = TableBuilder::new("users")?
//!     .add_column("id", DataType::Integer)?
//!     .add_column("name", DataType::Text)?
//!     .build()?;
//! catalog.create_table(table)?;
//! catalog.insert_rows(
//!     "users",
//!     vec![
//!         Row::new(vec![Value::Integer(1), Value::from("ada")]),
//!         Row::new(vec![Value::Integer(2), Value::from("kay")]),
//!     ],
//! )?;
//!
//! let plan = PlanNode::scan("users").filter(Expr::col("id").gt(Expr::lit(1)));
//! let result = PlanRunner::new(&catalog).execute(&plan)?;
//! assert_eq!(result.len(), 1);
//! # Ok::<(), tern_core::Error>(())
//! ```

#![no_std]

extern crate alloc;

pub mod ast;
pub mod bind;
pub mod context;
mod cte;
pub mod eval;
pub mod executor;
pub mod schema;

pub use context::{ExecCtx, ExecOptions};
pub use executor::{Operator, PlanRunner, ResultSet};
pub use schema::Schema;

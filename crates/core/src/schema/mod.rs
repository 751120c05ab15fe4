//! Schema definitions: columns and table shapes.

mod column;
mod table;

pub use column::Column;
pub use table::{Table, TableBuilder};

//! Duplicate elimination operator.

use crate::executor::Operator;
use alloc::boxed::Box;
use hashbrown::HashSet;
use tern_core::{Result, Row};

/// Emits the first occurrence of each row, in input order. Rows compare
/// by grouping equality, so Null cells and NaN cells deduplicate.
pub struct DistinctOp {
    input: Box<dyn Operator>,
    seen: HashSet<Row>,
}

impl DistinctOp {
    pub fn new(input: Box<dyn Operator>) -> Self {
        Self {
            input,
            seen: HashSet::new(),
        }
    }
}

impl Operator for DistinctOp {
    fn open(&mut self) -> Result<()> {
        self.seen.clear();
        self.input.open()
    }

    fn next(&mut self) -> Result<Option<Row>> {
        while let Some(row) = self.input.next()? {
            if self.seen.insert(row.clone()) {
                return Ok(Some(row));
            }
        }
        Ok(None)
    }

    fn close(&mut self) {
        self.seen.clear();
        self.input.close();
    }
}

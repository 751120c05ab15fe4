//! Limit and offset operator.

use crate::executor::Operator;
use alloc::boxed::Box;
use tern_core::{Result, Row};

/// Skips `offset` rows, then emits at most `limit` rows.
pub struct LimitOp {
    input: Box<dyn Operator>,
    limit: Option<usize>,
    offset: usize,
    skipped: usize,
    emitted: usize,
}

impl LimitOp {
    pub fn new(input: Box<dyn Operator>, limit: Option<usize>, offset: usize) -> Self {
        Self {
            input,
            limit,
            offset,
            skipped: 0,
            emitted: 0,
        }
    }
}

impl Operator for LimitOp {
    fn open(&mut self) -> Result<()> {
        self.skipped = 0;
        self.emitted = 0;
        self.input.open()
    }

    fn next(&mut self) -> Result<Option<Row>> {
        if let Some(limit) = self.limit {
            if self.emitted >= limit {
                return Ok(None);
            }
        }
        while self.skipped < self.offset {
            if self.input.next()?.is_none() {
                return Ok(None);
            }
            self.skipped += 1;
        }
        match self.input.next()? {
            Some(row) => {
                self.emitted += 1;
                Ok(Some(row))
            }
            None => Ok(None),
        }
    }

    fn close(&mut self) {
        self.input.close();
    }
}

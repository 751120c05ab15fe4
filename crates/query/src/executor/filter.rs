//! Filter operator.

use crate::bind::BoundExpr;
use crate::context::ExecCtx;
use crate::eval::eval_truth;
use crate::executor::Operator;
use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use tern_core::{Result, Row};

/// Emits input rows whose predicate evaluates to True. Unknown rows are
/// dropped along with False ones.
pub struct FilterOp {
    input: Box<dyn Operator>,
    predicate: BoundExpr,
    outer: Rc<Vec<Row>>,
    ctx: Rc<ExecCtx>,
}

impl FilterOp {
    pub fn new(
        input: Box<dyn Operator>,
        predicate: BoundExpr,
        outer: Rc<Vec<Row>>,
        ctx: Rc<ExecCtx>,
    ) -> Self {
        Self {
            input,
            predicate,
            outer,
            ctx,
        }
    }
}

impl Operator for FilterOp {
    fn open(&mut self) -> Result<()> {
        self.input.open()
    }

    fn next(&mut self) -> Result<Option<Row>> {
        while let Some(row) = self.input.next()? {
            if eval_truth(&self.predicate, &row, &self.outer, &self.ctx)?.is_true() {
                return Ok(Some(row));
            }
        }
        Ok(None)
    }

    fn close(&mut self) {
        self.input.close();
    }
}

//! Projection operator.

use crate::bind::BoundExpr;
use crate::context::ExecCtx;
use crate::eval::eval;
use crate::executor::Operator;
use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use tern_core::{Result, Row};

/// Computes the output columns of each input row.
pub struct ProjectOp {
    input: Box<dyn Operator>,
    exprs: Vec<BoundExpr>,
    outer: Rc<Vec<Row>>,
    ctx: Rc<ExecCtx>,
}

impl ProjectOp {
    pub fn new(
        input: Box<dyn Operator>,
        exprs: Vec<BoundExpr>,
        outer: Rc<Vec<Row>>,
        ctx: Rc<ExecCtx>,
    ) -> Self {
        Self {
            input,
            exprs,
            outer,
            ctx,
        }
    }
}

impl Operator for ProjectOp {
    fn open(&mut self) -> Result<()> {
        self.input.open()
    }

    fn next(&mut self) -> Result<Option<Row>> {
        match self.input.next()? {
            Some(row) => {
                let mut values = Vec::with_capacity(self.exprs.len());
                for expr in &self.exprs {
                    values.push(eval(expr, &row, &self.outer, &self.ctx)?);
                }
                Ok(Some(Row::new(values)))
            }
            None => Ok(None),
        }
    }

    fn close(&mut self) {
        self.input.close();
    }
}

//! Nested-loop join.

use crate::ast::JoinKind;
use crate::bind::BoundExpr;
use crate::context::ExecCtx;
use crate::eval::eval_truth;
use crate::executor::Operator;
use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use tern_core::{Result, Row};

/// Evaluates the join condition per row pair.
///
/// One side streams while the other is materialized at open: the right
/// side for Inner, Left, Semi, and Anti, the left side for Right. Output
/// order follows the streamed side.
pub struct NestedLoopJoin {
    left: Box<dyn Operator>,
    right: Box<dyn Operator>,
    kind: JoinKind,
    condition: Option<BoundExpr>,
    left_width: usize,
    right_width: usize,
    outer: Rc<Vec<Row>>,
    ctx: Rc<ExecCtx>,
    inner_rows: Vec<Row>,
    current: Option<Row>,
    pos: usize,
    matched: bool,
}

impl NestedLoopJoin {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        left: Box<dyn Operator>,
        right: Box<dyn Operator>,
        kind: JoinKind,
        condition: Option<BoundExpr>,
        left_width: usize,
        right_width: usize,
        outer: Rc<Vec<Row>>,
        ctx: Rc<ExecCtx>,
    ) -> Self {
        Self {
            left,
            right,
            kind,
            condition,
            left_width,
            right_width,
            outer,
            ctx,
            inner_rows: Vec::new(),
            current: None,
            pos: 0,
            matched: false,
        }
    }

    fn matches(&self, combined: &Row) -> Result<bool> {
        match &self.condition {
            None => Ok(true),
            Some(cond) => Ok(eval_truth(cond, combined, &self.outer, &self.ctx)?.is_true()),
        }
    }

    fn pull_streamed(&mut self) -> Result<Option<Row>> {
        match self.kind {
            JoinKind::Right => self.right.next(),
            _ => self.left.next(),
        }
    }
}

impl Operator for NestedLoopJoin {
    fn open(&mut self) -> Result<()> {
        self.left.open()?;
        self.right.open()?;
        self.inner_rows.clear();
        match self.kind {
            JoinKind::Right => {
                while let Some(row) = self.left.next()? {
                    self.inner_rows.push(row);
                }
            }
            _ => {
                while let Some(row) = self.right.next()? {
                    self.inner_rows.push(row);
                }
            }
        }
        self.current = None;
        self.pos = 0;
        self.matched = false;
        Ok(())
    }

    fn next(&mut self) -> Result<Option<Row>> {
        loop {
            if self.current.is_none() {
                self.current = self.pull_streamed()?;
                self.pos = 0;
                self.matched = false;
                if self.current.is_none() {
                    return Ok(None);
                }
            }
            let streamed = match &self.current {
                Some(row) => row.clone(),
                None => return Ok(None),
            };

            while self.pos < self.inner_rows.len() {
                let inner = &self.inner_rows[self.pos];
                self.pos += 1;
                let combined = match self.kind {
                    JoinKind::Right => inner.concat(&streamed),
                    _ => streamed.concat(inner),
                };
                if !self.matches(&combined)? {
                    continue;
                }
                match self.kind {
                    JoinKind::Inner | JoinKind::Left | JoinKind::Right => {
                        self.matched = true;
                        return Ok(Some(combined));
                    }
                    JoinKind::Semi => {
                        self.current = None;
                        return Ok(Some(streamed));
                    }
                    JoinKind::Anti => {
                        self.matched = true;
                        break;
                    }
                }
            }

            let emit = match self.kind {
                JoinKind::Left if !self.matched => Some(streamed.pad_right(self.right_width)),
                JoinKind::Right if !self.matched => Some(streamed.pad_left(self.left_width)),
                JoinKind::Anti if !self.matched => Some(streamed),
                _ => None,
            };
            self.current = None;
            if let Some(row) = emit {
                return Ok(Some(row));
            }
        }
    }

    fn close(&mut self) {
        self.inner_rows.clear();
        self.current = None;
        self.pos = 0;
        self.matched = false;
        self.left.close();
        self.right.close();
    }
}

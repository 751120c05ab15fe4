//! Scan operators for base tables and CTEs.

use crate::context::ExecCtx;
use crate::cte;
use crate::executor::Operator;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use tern_core::{Result, Row};

/// Scans a snapshotted base table in insertion order.
pub struct TableScan {
    table: String,
    ctx: Rc<ExecCtx>,
    rows: Option<Rc<Vec<Rc<Row>>>>,
    pos: usize,
}

impl TableScan {
    pub fn new(table: String, ctx: Rc<ExecCtx>) -> Self {
        Self {
            table,
            ctx,
            rows: None,
            pos: 0,
        }
    }
}

impl Operator for TableScan {
    fn open(&mut self) -> Result<()> {
        self.rows = Some(self.ctx.table(&self.table)?);
        self.pos = 0;
        Ok(())
    }

    fn next(&mut self) -> Result<Option<Row>> {
        let rows = match &self.rows {
            Some(rows) => rows,
            None => return Ok(None),
        };
        match rows.get(self.pos) {
            Some(row) => {
                self.pos += 1;
                Ok(Some((**row).clone()))
            }
            None => Ok(None),
        }
    }

    fn close(&mut self) {
        self.rows = None;
        self.pos = 0;
    }
}

/// Scans a CTE: the materialized result, or, inside a recursive step,
/// the previous iteration's frontier rows.
pub struct CteScan {
    id: usize,
    frontier: bool,
    ctx: Rc<ExecCtx>,
    rows: Option<Rc<Vec<Row>>>,
    pos: usize,
}

impl CteScan {
    pub fn new(id: usize, frontier: bool, ctx: Rc<ExecCtx>) -> Self {
        Self {
            id,
            frontier,
            ctx,
            rows: None,
            pos: 0,
        }
    }
}

impl Operator for CteScan {
    fn open(&mut self) -> Result<()> {
        self.rows = Some(if self.frontier {
            self.ctx.frontier(self.id)?
        } else {
            cte::materialize(&self.ctx, self.id)?
        });
        self.pos = 0;
        Ok(())
    }

    fn next(&mut self) -> Result<Option<Row>> {
        let rows = match &self.rows {
            Some(rows) => rows,
            None => return Ok(None),
        };
        match rows.get(self.pos) {
            Some(row) => {
                self.pos += 1;
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    fn close(&mut self) {
        self.rows = None;
        self.pos = 0;
    }
}

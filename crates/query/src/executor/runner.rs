//! Top-level query execution.

use crate::ast::PlanNode;
use crate::bind::bind;
use crate::context::{ExecCtx, ExecOptions};
use crate::executor;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::AtomicBool;
use tern_core::{Result, Row};
use tern_storage::Catalog;

/// Materialized query result: output column names plus rows.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl ResultSet {
    /// Returns the output column names, in schema order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the result rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Consumes the result, returning its rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Returns the number of result rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the result has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Binds and runs query plans against a catalog.
///
/// Each `execute` call snapshots the catalog, so concurrent mutation
/// between calls is visible but mutation during a call is not. The
/// cancel flag is checked between root-level rows; a raised flag fails
/// the query with `Cancelled` after the operator tree is closed.
pub struct PlanRunner<'a> {
    catalog: &'a Catalog,
    options: ExecOptions,
}

impl<'a> PlanRunner<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            options: ExecOptions::default(),
        }
    }

    /// Overrides the recursive CTE iteration cap. Zero restores the
    /// default.
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.options.recursion_limit = limit;
        self
    }

    /// Attaches a cooperative cancellation flag.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.options.cancel = Some(flag);
        self
    }

    /// Binds, executes, and fully materializes a plan.
    pub fn execute(&self, plan: &PlanNode) -> Result<ResultSet> {
        let bound = Rc::new(bind(self.catalog, plan)?);
        let columns = bound.schema().columns().to_vec();
        let ctx = Rc::new(ExecCtx::new(self.catalog, self.options.clone()));
        let outer = Rc::new(Vec::new());
        let mut op = executor::build(&bound, &ctx, &outer)?;
        let result = drain(op.as_mut(), &ctx);
        op.close();
        Ok(ResultSet {
            columns,
            rows: result?,
        })
    }
}

fn drain(op: &mut dyn executor::Operator, ctx: &ExecCtx) -> Result<Vec<Row>> {
    op.open()?;
    let mut rows = Vec::new();
    loop {
        ctx.check_cancelled()?;
        match op.next()? {
            Some(row) => rows.push(row),
            None => return Ok(rows),
        }
    }
}

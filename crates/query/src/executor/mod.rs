//! Pull-based operator pipeline.
//!
//! A bound plan compiles into a tree of [`Operator`]s. Each operator
//! follows the open, next, close protocol: open prepares or restarts
//! the stream, next pulls one row, close releases state and is
//! idempotent. Reopening after close restarts from the beginning, which
//! is how correlated subqueries re-execute per outer row.

mod aggregate;
mod distinct;
mod filter;
mod join;
mod limit;
mod operator;
mod project;
mod runner;
mod scan;
mod set_op;
mod sort;
mod window;

pub use operator::Operator;
pub use runner::{PlanRunner, ResultSet};

use crate::bind::{BoundPlan, JoinStrategy};
use crate::context::ExecCtx;
use aggregate::AggregateOp;
use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::ToString;
use alloc::vec::Vec;
use distinct::DistinctOp;
use filter::FilterOp;
use join::{HashJoin, NestedLoopJoin};
use limit::LimitOp;
use project::ProjectOp;
use scan::{CteScan, TableScan};
use set_op::SetOpOp;
use sort::SortOp;
use tern_core::{Result, Row};
use window::WindowOp;

/// Compiles a bound plan into an operator tree.
pub(crate) fn build(
    plan: &Rc<BoundPlan>,
    ctx: &Rc<ExecCtx>,
    outer: &Rc<Vec<Row>>,
) -> Result<Box<dyn Operator>> {
    Ok(match plan.as_ref() {
        BoundPlan::Scan { table, .. } => Box::new(TableScan::new(table.to_string(), ctx.clone())),
        BoundPlan::CteRef { id, frontier, .. } => {
            Box::new(CteScan::new(*id, *frontier, ctx.clone()))
        }
        BoundPlan::Filter { input, predicate } => Box::new(FilterOp::new(
            build(input, ctx, outer)?,
            predicate.clone(),
            outer.clone(),
            ctx.clone(),
        )),
        BoundPlan::Project { input, exprs, .. } => Box::new(ProjectOp::new(
            build(input, ctx, outer)?,
            exprs.clone(),
            outer.clone(),
            ctx.clone(),
        )),
        BoundPlan::Join {
            left,
            right,
            kind,
            strategy,
            condition,
            ..
        } => {
            let left_width = left.schema().len();
            let right_width = right.schema().len();
            let left_op = build(left, ctx, outer)?;
            let right_op = build(right, ctx, outer)?;
            match strategy {
                JoinStrategy::Hash {
                    left_keys,
                    right_keys,
                } => Box::new(HashJoin::new(
                    left_op,
                    right_op,
                    *kind,
                    left_keys.clone(),
                    right_keys.clone(),
                    left_width,
                    right_width,
                )),
                JoinStrategy::NestedLoop => Box::new(NestedLoopJoin::new(
                    left_op,
                    right_op,
                    *kind,
                    condition.clone(),
                    left_width,
                    right_width,
                    outer.clone(),
                    ctx.clone(),
                )),
            }
        }
        BoundPlan::Aggregate {
            input,
            group_by,
            aggregates,
            having,
            ..
        } => Box::new(AggregateOp::new(
            build(input, ctx, outer)?,
            group_by.clone(),
            aggregates.clone(),
            having.clone(),
            outer.clone(),
            ctx.clone(),
        )),
        BoundPlan::Window { input, calls, .. } => Box::new(WindowOp::new(
            build(input, ctx, outer)?,
            calls.clone(),
            outer.clone(),
            ctx.clone(),
        )),
        BoundPlan::Sort { input, keys } => Box::new(SortOp::new(
            build(input, ctx, outer)?,
            keys.clone(),
            outer.clone(),
            ctx.clone(),
        )),
        BoundPlan::Limit {
            input,
            limit,
            offset,
        } => Box::new(LimitOp::new(build(input, ctx, outer)?, *limit, *offset)),
        BoundPlan::Distinct { input } => Box::new(DistinctOp::new(build(input, ctx, outer)?)),
        BoundPlan::SetOp {
            left,
            right,
            kind,
            all,
        } => Box::new(SetOpOp::new(
            build(left, ctx, outer)?,
            build(right, ctx, outer)?,
            *kind,
            *all,
        )),
        BoundPlan::With { ctes, body } => {
            ctx.register_ctes(ctes, outer);
            build(body, ctx, outer)?
        }
    })
}

/// Builds and drains a plan, optionally stopping after `limit` rows.
/// The operator tree is always closed, draining errors included.
pub(crate) fn run_subplan(
    plan: &Rc<BoundPlan>,
    ctx: &Rc<ExecCtx>,
    outer: &Rc<Vec<Row>>,
    limit: Option<usize>,
) -> Result<Vec<Row>> {
    let mut op = build(plan, ctx, outer)?;
    let result = collect(op.as_mut(), limit);
    op.close();
    result
}

fn collect(op: &mut dyn Operator, limit: Option<usize>) -> Result<Vec<Row>> {
    op.open()?;
    let mut rows = Vec::new();
    loop {
        if let Some(limit) = limit {
            if rows.len() >= limit {
                return Ok(rows);
            }
        }
        match op.next()? {
            Some(row) => rows.push(row),
            None => return Ok(rows),
        }
    }
}

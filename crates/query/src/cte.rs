//! CTE materialization and recursive fixed-point evaluation.

use crate::bind::{BoundCte, BoundPlan, CtePlan};
use crate::context::ExecCtx;
use crate::executor;
use alloc::rc::Rc;
use alloc::vec::Vec;
use hashbrown::HashSet;
use tern_core::{Error, Result, Row};

/// Materializes a registered CTE, caching the result in the context so
/// later references share the same rows.
pub(crate) fn materialize(ctx: &Rc<ExecCtx>, id: usize) -> Result<Rc<Vec<Row>>> {
    if let Some(cached) = ctx.cte_cache(id) {
        return Ok(cached);
    }
    let (def, outer) = ctx.cte_def(id)?;
    let rows = match &def.plan {
        CtePlan::Materialized(plan) => executor::run_subplan(plan, ctx, &outer, None)?,
        CtePlan::Recursive {
            base,
            step,
            distinct,
        } => fixed_point(ctx, &def, base, step, *distinct, &outer)?.0,
    };
    let rows = Rc::new(rows);
    ctx.store_cte(id, rows.clone());
    Ok(rows)
}

/// Runs base-then-step evaluation to a fixed point.
///
/// The step term sees only the previous iteration's frontier rows, not
/// the accumulated result. Under distinct semantics already-seen rows
/// leave the frontier, so cyclic step output converges. Returns the
/// accumulated rows and the number of step evaluations, counting the
/// final one that produced no new rows. The iteration cap bounds step
/// evaluations; exceeding it fails the query.
pub(crate) fn fixed_point(
    ctx: &Rc<ExecCtx>,
    def: &BoundCte,
    base: &Rc<BoundPlan>,
    step: &Rc<BoundPlan>,
    distinct: bool,
    outer: &Rc<Vec<Row>>,
) -> Result<(Vec<Row>, usize)> {
    let limit = ctx.recursion_limit();
    let mut seen: HashSet<Row> = HashSet::new();
    let mut acc: Vec<Row> = Vec::new();
    let mut frontier: Vec<Row> = Vec::new();

    for row in executor::run_subplan(base, ctx, outer, None)? {
        if distinct && !seen.insert(row.clone()) {
            continue;
        }
        acc.push(row.clone());
        frontier.push(row);
    }

    let mut iterations = 0usize;
    let result = loop {
        if frontier.is_empty() {
            break Ok(());
        }
        iterations += 1;
        if iterations > limit {
            break Err(Error::recursion_limit(def.name.clone(), limit));
        }
        ctx.set_frontier(def.id, Rc::new(frontier));
        frontier = Vec::new();
        let produced = match executor::run_subplan(step, ctx, outer, None) {
            Ok(rows) => rows,
            Err(err) => break Err(err),
        };
        for row in produced {
            if distinct && !seen.insert(row.clone()) {
                continue;
            }
            acc.push(row.clone());
            frontier.push(row);
        }
    };
    // The frontier slot must not leak into sibling evaluations.
    ctx.clear_frontier(def.id);
    result.map(|()| (acc, iterations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CteDef, Expr, PlanNode};
    use crate::bind::bind;
    use crate::context::ExecOptions;
    use alloc::vec;
    use tern_core::schema::TableBuilder;
    use tern_core::{DataType, Value};
    use tern_storage::Catalog;

    fn seed_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .create_table(
                TableBuilder::new("seed")
                    .unwrap()
                    .add_column("x", DataType::Integer)
                    .unwrap()
                    .build()
                    .unwrap(),
            )
            .unwrap();
        catalog
            .insert_rows("seed", vec![Row::new(vec![Value::Integer(0)])])
            .unwrap();
        catalog
    }

    fn counting_chain(catalog: &Catalog, depth: i64) -> (Rc<BoundCte>, Rc<BoundPlan>, Rc<BoundPlan>, bool) {
        let base = PlanNode::scan("seed").project(vec![(Expr::lit(1i64), "n")]);
        let step = PlanNode::scan("chain")
            .filter(Expr::col("n").lt(Expr::lit(depth)))
            .project(vec![(Expr::col("n").add(Expr::lit(1i64)), "n")]);
        let plan = PlanNode::with(
            vec![CteDef::recursive("chain", base.union(step))],
            PlanNode::scan("chain"),
        );
        let bound = bind(catalog, &plan).unwrap();
        let def = match bound {
            BoundPlan::With { ctes, .. } => ctes[0].clone(),
            _ => panic!("expected with"),
        };
        let (base, step, distinct) = match &def.plan {
            CtePlan::Recursive {
                base,
                step,
                distinct,
            } => (base.clone(), step.clone(), *distinct),
            _ => panic!("expected recursive"),
        };
        (def, base, step, distinct)
    }

    #[test]
    fn test_depth_five_chain_takes_five_step_evaluations() {
        let catalog = seed_catalog();
        let (def, base, step, distinct) = counting_chain(&catalog, 5);
        let ctx = Rc::new(ExecCtx::new(&catalog, ExecOptions::default()));
        let outer: Rc<Vec<Row>> = Rc::new(Vec::new());

        let (rows, iterations) =
            fixed_point(&ctx, &def, &base, &step, distinct, &outer).unwrap();
        assert_eq!(rows.len(), 5);
        // Four productive steps plus the final one that comes back empty.
        assert_eq!(iterations, 5);
    }

    #[test]
    fn test_base_only_chain_takes_one_step_evaluation() {
        let catalog = seed_catalog();
        let (def, base, step, distinct) = counting_chain(&catalog, 1);
        let ctx = Rc::new(ExecCtx::new(&catalog, ExecOptions::default()));
        let outer: Rc<Vec<Row>> = Rc::new(Vec::new());

        // The step filter rejects the base row immediately, but that
        // empty evaluation still counts.
        let (rows, iterations) =
            fixed_point(&ctx, &def, &base, &step, distinct, &outer).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(iterations, 1);
    }
}

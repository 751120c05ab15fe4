//! Expression evaluation over bound expressions.
//!
//! Predicates evaluate to a three-valued `Truth`; only filters and
//! HAVING collapse Unknown, via `Truth::is_true`. Subquery expressions
//! build a fresh operator pipeline per evaluation with the current row
//! pushed onto the outer-row stack, which is what makes correlated
//! subqueries see the row under test.

use crate::ast::CmpOp;
use crate::bind::{BoundExpr, BoundPlan};
use crate::context::ExecCtx;
use crate::executor::run_subplan;
use alloc::rc::Rc;
use alloc::vec::Vec;
use tern_core::pattern_match::like;
use tern_core::{Comparison, Error, Result, Row, Truth, Value};

/// Evaluates an expression to a value.
pub fn eval(
    expr: &BoundExpr,
    row: &Row,
    outer: &Rc<Vec<Row>>,
    ctx: &Rc<ExecCtx>,
) -> Result<Value> {
    match expr {
        BoundExpr::Column(index) => row
            .get(*index)
            .cloned()
            .ok_or_else(|| Error::invalid_plan("column index out of range")),
        BoundExpr::Outer { levels_up, index } => outer
            .len()
            .checked_sub(*levels_up)
            .and_then(|i| outer.get(i))
            .and_then(|r| r.get(*index))
            .cloned()
            .ok_or_else(|| Error::invalid_plan("outer reference out of range")),
        BoundExpr::Literal(v) => Ok(v.clone()),
        BoundExpr::Arith { op, left, right } => {
            let l = eval(left, row, outer, ctx)?;
            let r = eval(right, row, outer, ctx)?;
            Value::arithmetic(*op, &l, &r)
        }
        BoundExpr::Neg(e) => eval(e, row, outer, ctx)?.negate(),
        BoundExpr::Case {
            branches,
            otherwise,
        } => {
            for (cond, value) in branches {
                if eval_truth(cond, row, outer, ctx)?.is_true() {
                    return eval(value, row, outer, ctx);
                }
            }
            match otherwise {
                Some(e) => eval(e, row, outer, ctx),
                None => Ok(Value::Null),
            }
        }
        BoundExpr::ScalarSubquery(plan) => {
            let rows = run_correlated(plan, row, outer, ctx, Some(2))?;
            match rows.len() {
                0 => Ok(Value::Null),
                1 => rows[0]
                    .get(0)
                    .cloned()
                    .ok_or_else(|| Error::invalid_plan("empty scalar subquery row")),
                _ => Err(Error::cardinality_violation(
                    "scalar subquery produced more than one row",
                )),
            }
        }
        // Predicate forms surface as values through Truth.
        _ => Ok(eval_truth(expr, row, outer, ctx)?.into_value()),
    }
}

/// Evaluates a predicate expression to a three-valued truth.
pub fn eval_truth(
    expr: &BoundExpr,
    row: &Row,
    outer: &Rc<Vec<Row>>,
    ctx: &Rc<ExecCtx>,
) -> Result<Truth> {
    match expr {
        BoundExpr::And(l, r) => {
            let lt = eval_truth(l, row, outer, ctx)?;
            if lt == Truth::False {
                return Ok(Truth::False);
            }
            Ok(lt.and(eval_truth(r, row, outer, ctx)?))
        }
        BoundExpr::Or(l, r) => {
            let lt = eval_truth(l, row, outer, ctx)?;
            if lt == Truth::True {
                return Ok(Truth::True);
            }
            Ok(lt.or(eval_truth(r, row, outer, ctx)?))
        }
        BoundExpr::Not(e) => Ok(eval_truth(e, row, outer, ctx)?.not()),
        BoundExpr::Compare { op, left, right } => {
            let l = eval(left, row, outer, ctx)?;
            let r = eval(right, row, outer, ctx)?;
            Ok(compare_truth(*op, l.compare(&r)?))
        }
        BoundExpr::IsNull { expr, negated } => {
            let v = eval(expr, row, outer, ctx)?;
            Ok(Truth::from(v.is_null() != *negated))
        }
        BoundExpr::Like {
            expr,
            pattern,
            negated,
        } => {
            let v = eval(expr, row, outer, ctx)?;
            let p = eval(pattern, row, outer, ctx)?;
            if v.is_null() || p.is_null() {
                return Ok(Truth::Unknown);
            }
            match (v.as_str(), p.as_str()) {
                (Some(s), Some(pat)) => Ok(Truth::from(like(s, pat) != *negated)),
                _ => Err(Error::type_mismatch("LIKE", v.data_type(), p.data_type())),
            }
        }
        BoundExpr::InList {
            expr,
            list,
            negated,
        } => {
            let v = eval(expr, row, outer, ctx)?;
            if v.is_null() {
                return Ok(Truth::Unknown);
            }
            let mut membership = Truth::False;
            for item in list {
                let candidate = eval(item, row, outer, ctx)?;
                match v.compare(&candidate)? {
                    Comparison::Equal => {
                        membership = Truth::True;
                        break;
                    }
                    Comparison::Unknown => membership = Truth::Unknown,
                    _ => {}
                }
            }
            Ok(if *negated { membership.not() } else { membership })
        }
        BoundExpr::InSubquery {
            expr,
            plan,
            negated,
        } => {
            let v = eval(expr, row, outer, ctx)?;
            if v.is_null() {
                return Ok(Truth::Unknown);
            }
            let rows = run_correlated(plan, row, outer, ctx, None)?;
            let mut membership = Truth::False;
            for sub_row in &rows {
                let candidate = sub_row
                    .get(0)
                    .ok_or_else(|| Error::invalid_plan("empty subquery row"))?;
                match v.compare(candidate)? {
                    Comparison::Equal => {
                        membership = Truth::True;
                        break;
                    }
                    Comparison::Unknown => membership = Truth::Unknown,
                    _ => {}
                }
            }
            Ok(if *negated { membership.not() } else { membership })
        }
        BoundExpr::Exists { plan, negated } => {
            let rows = run_correlated(plan, row, outer, ctx, Some(1))?;
            Ok(Truth::from(!rows.is_empty() != *negated))
        }
        other => Truth::from_value(&eval(other, row, outer, ctx)?),
    }
}

/// Truth of a comparison outcome under the given operator.
fn compare_truth(op: CmpOp, cmp: Comparison) -> Truth {
    if cmp == Comparison::Unknown {
        return Truth::Unknown;
    }
    let holds = match op {
        CmpOp::Eq => cmp == Comparison::Equal,
        CmpOp::Ne => cmp != Comparison::Equal,
        CmpOp::Lt => cmp == Comparison::Less,
        CmpOp::Le => matches!(cmp, Comparison::Less | Comparison::Equal),
        CmpOp::Gt => cmp == Comparison::Greater,
        CmpOp::Ge => matches!(cmp, Comparison::Greater | Comparison::Equal),
    };
    Truth::from(holds)
}

/// Runs a subquery plan with the current row pushed onto the outer stack.
fn run_correlated(
    plan: &Rc<BoundPlan>,
    row: &Row,
    outer: &Rc<Vec<Row>>,
    ctx: &Rc<ExecCtx>,
    limit: Option<usize>,
) -> Result<Vec<Row>> {
    let mut stack = (**outer).clone();
    stack.push(row.clone());
    run_subplan(plan, ctx, &Rc::new(stack), limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expr;
    use crate::bind::bind;
    use crate::ast::PlanNode;
    use alloc::boxed::Box;
    use alloc::vec;
    use tern_core::ArithOp;
    use tern_storage::Catalog;

    fn empty_ctx() -> Rc<ExecCtx> {
        Rc::new(ExecCtx::new(&Catalog::new(), Default::default()))
    }

    fn no_outer() -> Rc<Vec<Row>> {
        Rc::new(Vec::new())
    }

    #[test]
    fn test_column_and_literal() {
        let ctx = empty_ctx();
        let row = Row::new(vec![Value::Integer(7)]);
        let v = eval(&BoundExpr::Column(0), &row, &no_outer(), &ctx).unwrap();
        assert_eq!(v, Value::Integer(7));
    }

    #[test]
    fn test_arith() {
        let ctx = empty_ctx();
        let row = Row::new(vec![Value::Integer(6)]);
        let expr = BoundExpr::Arith {
            op: ArithOp::Mul,
            left: Box::new(BoundExpr::Column(0)),
            right: Box::new(BoundExpr::Literal(Value::Integer(7))),
        };
        assert_eq!(
            eval(&expr, &row, &no_outer(), &ctx).unwrap(),
            Value::Integer(42)
        );
    }

    #[test]
    fn test_null_comparison_is_unknown() {
        let ctx = empty_ctx();
        let row = Row::new(vec![Value::Null]);
        let expr = BoundExpr::Compare {
            op: CmpOp::Eq,
            left: Box::new(BoundExpr::Column(0)),
            right: Box::new(BoundExpr::Literal(Value::Integer(1))),
        };
        assert_eq!(
            eval_truth(&expr, &row, &no_outer(), &ctx).unwrap(),
            Truth::Unknown
        );
    }

    #[test]
    fn test_in_list_with_null_member() {
        let ctx = empty_ctx();
        let row = Row::new(vec![Value::Integer(5)]);
        // 5 IN (1, NULL) is Unknown; NOT IN flips to Unknown too.
        let expr = BoundExpr::InList {
            expr: Box::new(BoundExpr::Column(0)),
            list: vec![
                BoundExpr::Literal(Value::Integer(1)),
                BoundExpr::Literal(Value::Null),
            ],
            negated: false,
        };
        assert_eq!(
            eval_truth(&expr, &row, &no_outer(), &ctx).unwrap(),
            Truth::Unknown
        );
    }

    #[test]
    fn test_in_list_found_despite_null() {
        let ctx = empty_ctx();
        let row = Row::new(vec![Value::Integer(1)]);
        let expr = BoundExpr::InList {
            expr: Box::new(BoundExpr::Column(0)),
            list: vec![
                BoundExpr::Literal(Value::Null),
                BoundExpr::Literal(Value::Integer(1)),
            ],
            negated: false,
        };
        assert_eq!(
            eval_truth(&expr, &row, &no_outer(), &ctx).unwrap(),
            Truth::True
        );
    }

    #[test]
    fn test_null_candidate_in_empty_list_is_unknown() {
        let ctx = empty_ctx();
        let row = Row::new(vec![Value::Null]);
        let expr = BoundExpr::InList {
            expr: Box::new(BoundExpr::Column(0)),
            list: vec![],
            negated: false,
        };
        assert_eq!(
            eval_truth(&expr, &row, &no_outer(), &ctx).unwrap(),
            Truth::Unknown
        );
    }

    #[test]
    fn test_case_falls_through_to_null() {
        let ctx = empty_ctx();
        let row = Row::new(vec![Value::Integer(0)]);
        let expr = BoundExpr::Case {
            branches: vec![(
                BoundExpr::Compare {
                    op: CmpOp::Gt,
                    left: Box::new(BoundExpr::Column(0)),
                    right: Box::new(BoundExpr::Literal(Value::Integer(10))),
                },
                BoundExpr::Literal(Value::Text("big".into())),
            )],
            otherwise: None,
        };
        assert!(eval(&expr, &row, &no_outer(), &ctx).unwrap().is_null());
    }

    #[test]
    fn test_like_truth() {
        let ctx = empty_ctx();
        let row = Row::new(vec![Value::Text("hello".into())]);
        let expr = BoundExpr::Like {
            expr: Box::new(BoundExpr::Column(0)),
            pattern: Box::new(BoundExpr::Literal(Value::Text("h%".into()))),
            negated: false,
        };
        assert_eq!(
            eval_truth(&expr, &row, &no_outer(), &ctx).unwrap(),
            Truth::True
        );
    }

    #[test]
    fn test_scalar_subquery_cardinality() {
        let mut catalog = Catalog::new();
        catalog
            .create_table(
                tern_core::schema::TableBuilder::new("t")
                    .unwrap()
                    .add_column("x", tern_core::DataType::Integer)
                    .unwrap()
                    .build()
                    .unwrap(),
            )
            .unwrap();
        catalog
            .insert_rows(
                "t",
                vec![
                    Row::new(vec![Value::Integer(1)]),
                    Row::new(vec![Value::Integer(2)]),
                ],
            )
            .unwrap();
        let bound = bind(
            &catalog,
            &PlanNode::scan("t").project(vec![(Expr::col("x"), "x")]),
        )
        .unwrap();
        let ctx = Rc::new(ExecCtx::new(&catalog, Default::default()));
        let expr = BoundExpr::ScalarSubquery(Rc::new(bound));
        let row = Row::new(vec![]);
        let err = eval(&expr, &row, &no_outer(), &ctx);
        assert!(matches!(err, Err(Error::CardinalityViolation { .. })));
    }
}

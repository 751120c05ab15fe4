//! Plan binding: name resolution and plan validation.
//!
//! The binder walks an unbound `PlanNode` tree, resolves every column
//! name to a positional index against the producing node's schema, picks
//! a join strategy, and validates the plan shape. All name errors
//! (`UnresolvedColumn`, `AmbiguousColumn`), arity mismatches, and
//! malformed plans are reported here, before any row is pulled.
//!
//! Column references that resolve in an enclosing query rather than the
//! current one become `BoundExpr::Outer` with the number of scopes to
//! walk up, which is how correlated subqueries reach their outer row.

use crate::ast::{
    AggregateCall, AggregateFunc, CmpOp, CteDef, Expr, Frame, JoinKind, NullOrdering, PlanNode,
    SetOpKind, SortKey, SortOrder, WindowCall, WindowFunc,
};
use crate::schema::{Resolution, Schema};
use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use tern_core::{ArithOp, Error, Result, Value};
use tern_storage::Catalog;

/// Expression with all column references resolved to indices.
#[derive(Clone, Debug)]
pub enum BoundExpr {
    /// Column of the current row by index.
    Column(usize),
    /// Column of an enclosing query's row. `levels_up` is 1 for the
    /// immediately enclosing query.
    Outer { levels_up: usize, index: usize },
    Literal(Value),
    Arith {
        op: ArithOp,
        left: Box<BoundExpr>,
        right: Box<BoundExpr>,
    },
    Compare {
        op: CmpOp,
        left: Box<BoundExpr>,
        right: Box<BoundExpr>,
    },
    And(Box<BoundExpr>, Box<BoundExpr>),
    Or(Box<BoundExpr>, Box<BoundExpr>),
    Not(Box<BoundExpr>),
    Neg(Box<BoundExpr>),
    IsNull {
        expr: Box<BoundExpr>,
        negated: bool,
    },
    Case {
        branches: Vec<(BoundExpr, BoundExpr)>,
        otherwise: Option<Box<BoundExpr>>,
    },
    Like {
        expr: Box<BoundExpr>,
        pattern: Box<BoundExpr>,
        negated: bool,
    },
    InList {
        expr: Box<BoundExpr>,
        list: Vec<BoundExpr>,
        negated: bool,
    },
    InSubquery {
        expr: Box<BoundExpr>,
        plan: Rc<BoundPlan>,
        negated: bool,
    },
    ScalarSubquery(Rc<BoundPlan>),
    Exists {
        plan: Rc<BoundPlan>,
        negated: bool,
    },
}

/// How a join will be executed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JoinStrategy {
    /// Build-and-probe on equality key columns. Chosen when the whole
    /// condition is a conjunction of left-column = right-column tests.
    Hash {
        left_keys: Vec<usize>,
        right_keys: Vec<usize>,
    },
    /// Evaluate the condition per row pair.
    NestedLoop,
}

/// Bound aggregate call.
#[derive(Clone, Debug)]
pub struct BoundAggregateCall {
    pub func: AggregateFunc,
    pub arg: Option<BoundExpr>,
    pub distinct: bool,
    pub filter: Option<BoundExpr>,
}

/// Bound sort key.
#[derive(Clone, Debug)]
pub struct BoundSortKey {
    pub expr: BoundExpr,
    pub order: SortOrder,
    pub nulls: NullOrdering,
}

/// Bound window function.
#[derive(Clone, Debug)]
pub enum BoundWindowFunc {
    RowNumber,
    Rank,
    DenseRank,
    PercentRank,
    Ntile(usize),
    Lag { expr: BoundExpr, offset: usize },
    Lead { expr: BoundExpr, offset: usize },
    FirstValue(BoundExpr),
    LastValue(BoundExpr),
    Aggregate {
        func: AggregateFunc,
        arg: Option<BoundExpr>,
    },
}

/// Bound window call with its frame resolved.
#[derive(Clone, Debug)]
pub struct BoundWindowCall {
    pub func: BoundWindowFunc,
    pub partition_by: Vec<BoundExpr>,
    pub order_by: Vec<BoundSortKey>,
    pub frame: Frame,
}

/// Body of a bound CTE.
#[derive(Clone, Debug)]
pub enum CtePlan {
    /// Evaluated once on first reference, then shared.
    Materialized(Rc<BoundPlan>),
    /// Fixed-point evaluation: base term, then the step until no new rows.
    Recursive {
        base: Rc<BoundPlan>,
        step: Rc<BoundPlan>,
        distinct: bool,
    },
}

/// A bound CTE definition.
#[derive(Clone, Debug)]
pub struct BoundCte {
    pub id: usize,
    pub name: String,
    pub plan: CtePlan,
    pub schema: Rc<Schema>,
}

/// Bound plan node. Every node knows its output schema.
#[derive(Clone, Debug)]
pub enum BoundPlan {
    Scan {
        table: String,
        schema: Rc<Schema>,
    },
    /// Reference to an in-scope CTE. Inside a recursive CTE's step term
    /// the self-reference reads the previous iteration's frontier rows
    /// instead of the accumulated result.
    CteRef {
        id: usize,
        name: String,
        frontier: bool,
        schema: Rc<Schema>,
    },
    Filter {
        input: Rc<BoundPlan>,
        predicate: BoundExpr,
    },
    Project {
        input: Rc<BoundPlan>,
        exprs: Vec<BoundExpr>,
        schema: Rc<Schema>,
    },
    Join {
        left: Rc<BoundPlan>,
        right: Rc<BoundPlan>,
        kind: JoinKind,
        strategy: JoinStrategy,
        condition: Option<BoundExpr>,
        schema: Rc<Schema>,
    },
    Aggregate {
        input: Rc<BoundPlan>,
        group_by: Vec<BoundExpr>,
        aggregates: Vec<BoundAggregateCall>,
        having: Option<BoundExpr>,
        schema: Rc<Schema>,
    },
    Window {
        input: Rc<BoundPlan>,
        calls: Vec<BoundWindowCall>,
        schema: Rc<Schema>,
    },
    Sort {
        input: Rc<BoundPlan>,
        keys: Vec<BoundSortKey>,
    },
    Limit {
        input: Rc<BoundPlan>,
        limit: Option<usize>,
        offset: usize,
    },
    Distinct {
        input: Rc<BoundPlan>,
    },
    SetOp {
        left: Rc<BoundPlan>,
        right: Rc<BoundPlan>,
        kind: SetOpKind,
        all: bool,
    },
    With {
        ctes: Vec<Rc<BoundCte>>,
        body: Rc<BoundPlan>,
    },
}

impl BoundPlan {
    /// Returns the output schema of this node.
    pub fn schema(&self) -> &Rc<Schema> {
        match self {
            BoundPlan::Scan { schema, .. }
            | BoundPlan::CteRef { schema, .. }
            | BoundPlan::Project { schema, .. }
            | BoundPlan::Join { schema, .. }
            | BoundPlan::Aggregate { schema, .. }
            | BoundPlan::Window { schema, .. } => schema,
            BoundPlan::Filter { input, .. }
            | BoundPlan::Sort { input, .. }
            | BoundPlan::Limit { input, .. }
            | BoundPlan::Distinct { input } => input.schema(),
            BoundPlan::SetOp { left, .. } => left.schema(),
            BoundPlan::With { body, .. } => body.schema(),
        }
    }
}

/// Binds a plan against a catalog.
pub fn bind(catalog: &Catalog, plan: &PlanNode) -> Result<BoundPlan> {
    let mut binder = Binder {
        catalog,
        outer: Vec::new(),
        ctes: Vec::new(),
        next_cte_id: 0,
    };
    binder.bind_plan(plan)
}

struct CteScope {
    name: String,
    id: usize,
    schema: Rc<Schema>,
    frontier: bool,
}

struct Binder<'a> {
    catalog: &'a Catalog,
    /// Schemas of enclosing queries, innermost last.
    outer: Vec<Rc<Schema>>,
    /// CTEs in scope, innermost last.
    ctes: Vec<CteScope>,
    next_cte_id: usize,
}

impl<'a> Binder<'a> {
    fn bind_plan(&mut self, plan: &PlanNode) -> Result<BoundPlan> {
        match plan {
            PlanNode::Scan { table, alias } => self.bind_scan(table, alias.as_deref()),
            PlanNode::Filter { input, predicate } => {
                let input = Rc::new(self.bind_plan(input)?);
                let predicate = self.bind_expr(predicate, &input.schema().clone())?;
                Ok(BoundPlan::Filter { input, predicate })
            }
            PlanNode::Project { input, exprs } => {
                let input = Rc::new(self.bind_plan(input)?);
                let schema = input.schema().clone();
                let mut bound = Vec::with_capacity(exprs.len());
                let mut names = Vec::with_capacity(exprs.len());
                for (expr, name) in exprs {
                    bound.push(self.bind_expr(expr, &schema)?);
                    names.push(name.clone());
                }
                Ok(BoundPlan::Project {
                    input,
                    exprs: bound,
                    schema: Rc::new(Schema::new(names)?),
                })
            }
            PlanNode::Join {
                left,
                right,
                kind,
                condition,
            } => self.bind_join(left, right, *kind, condition.as_ref()),
            PlanNode::Aggregate {
                input,
                group_by,
                aggregates,
                having,
            } => self.bind_aggregate(input, group_by, aggregates, having.as_ref()),
            PlanNode::Window { input, calls } => self.bind_window(input, calls),
            PlanNode::Sort { input, keys } => {
                let input = Rc::new(self.bind_plan(input)?);
                let schema = input.schema().clone();
                let keys = keys
                    .iter()
                    .map(|k| self.bind_sort_key(k, &schema))
                    .collect::<Result<Vec<_>>>()?;
                Ok(BoundPlan::Sort { input, keys })
            }
            PlanNode::Limit {
                input,
                limit,
                offset,
            } => {
                let input = Rc::new(self.bind_plan(input)?);
                Ok(BoundPlan::Limit {
                    input,
                    limit: *limit,
                    offset: *offset,
                })
            }
            PlanNode::Distinct { input } => {
                let input = Rc::new(self.bind_plan(input)?);
                Ok(BoundPlan::Distinct { input })
            }
            PlanNode::SetOp {
                left,
                right,
                kind,
                all,
            } => {
                let left = Rc::new(self.bind_plan(left)?);
                let right = Rc::new(self.bind_plan(right)?);
                if left.schema().len() != right.schema().len() {
                    return Err(Error::set_op_arity(
                        left.schema().len(),
                        right.schema().len(),
                    ));
                }
                Ok(BoundPlan::SetOp {
                    left,
                    right,
                    kind: *kind,
                    all: *all,
                })
            }
            PlanNode::With { ctes, body } => self.bind_with(ctes, body),
        }
    }

    fn bind_scan(&mut self, table: &str, alias: Option<&str>) -> Result<BoundPlan> {
        // CTEs shadow catalog tables, innermost scope first.
        if let Some(scope) = self.ctes.iter().rev().find(|c| c.name == table) {
            let alias = alias.unwrap_or(table);
            let columns = scope
                .schema
                .columns()
                .iter()
                .map(|c| {
                    let base = c.rsplit('.').next().unwrap_or(c);
                    format!("{}.{}", alias, base)
                })
                .collect();
            return Ok(BoundPlan::CteRef {
                id: scope.id,
                name: scope.name.clone(),
                frontier: scope.frontier,
                schema: Rc::new(Schema::new(columns)?),
            });
        }
        let store = self.catalog.get(table)?;
        let alias = alias.unwrap_or(table);
        let columns = store
            .schema()
            .columns()
            .iter()
            .map(|c| format!("{}.{}", alias, c.name()))
            .collect();
        Ok(BoundPlan::Scan {
            table: table.to_string(),
            schema: Rc::new(Schema::new(columns)?),
        })
    }

    fn bind_join(
        &mut self,
        left: &PlanNode,
        right: &PlanNode,
        kind: JoinKind,
        condition: Option<&Expr>,
    ) -> Result<BoundPlan> {
        let left = Rc::new(self.bind_plan(left)?);
        let right = Rc::new(self.bind_plan(right)?);
        let combined = Rc::new(Schema::join(left.schema(), right.schema())?);
        let condition = condition
            .map(|c| self.bind_expr(c, &combined))
            .transpose()?;
        let strategy = match &condition {
            Some(cond) => hash_strategy(cond, left.schema().len()).unwrap_or(JoinStrategy::NestedLoop),
            None => JoinStrategy::NestedLoop,
        };
        // Semi and Anti joins emit only the left side.
        let schema = match kind {
            JoinKind::Semi | JoinKind::Anti => left.schema().clone(),
            _ => combined,
        };
        Ok(BoundPlan::Join {
            left,
            right,
            kind,
            strategy,
            condition,
            schema,
        })
    }

    fn bind_aggregate(
        &mut self,
        input: &PlanNode,
        group_by: &[(Expr, String)],
        aggregates: &[AggregateCall],
        having: Option<&Expr>,
    ) -> Result<BoundPlan> {
        let input = Rc::new(self.bind_plan(input)?);
        let in_schema = input.schema().clone();

        let mut names = Vec::with_capacity(group_by.len() + aggregates.len());
        let mut keys = Vec::with_capacity(group_by.len());
        for (expr, name) in group_by {
            keys.push(self.bind_expr(expr, &in_schema)?);
            names.push(name.clone());
        }
        let mut calls = Vec::with_capacity(aggregates.len());
        for call in aggregates {
            if call.arg.is_none() && !matches!(call.func, AggregateFunc::Count) {
                return Err(Error::invalid_plan(format!(
                    "Aggregate {} requires an argument",
                    call.name
                )));
            }
            calls.push(BoundAggregateCall {
                func: call.func.clone(),
                arg: call
                    .arg
                    .as_ref()
                    .map(|a| self.bind_expr(a, &in_schema))
                    .transpose()?,
                distinct: call.distinct,
                filter: call
                    .filter
                    .as_ref()
                    .map(|f| self.bind_expr(f, &in_schema))
                    .transpose()?,
            });
            names.push(call.name.clone());
        }
        let schema = Rc::new(Schema::new(names)?);
        // HAVING sees the aggregate's output columns, not the input's.
        let having = having.map(|h| self.bind_expr(h, &schema)).transpose()?;
        Ok(BoundPlan::Aggregate {
            input,
            group_by: keys,
            aggregates: calls,
            having,
            schema,
        })
    }

    fn bind_window(&mut self, input: &PlanNode, calls: &[WindowCall]) -> Result<BoundPlan> {
        let input = Rc::new(self.bind_plan(input)?);
        let in_schema = input.schema().clone();
        let mut names: Vec<String> = in_schema.columns().to_vec();
        let mut bound_calls = Vec::with_capacity(calls.len());
        for call in calls {
            let func = match &call.func {
                WindowFunc::RowNumber => BoundWindowFunc::RowNumber,
                WindowFunc::Rank => BoundWindowFunc::Rank,
                WindowFunc::DenseRank => BoundWindowFunc::DenseRank,
                WindowFunc::PercentRank => BoundWindowFunc::PercentRank,
                WindowFunc::Ntile(n) => {
                    if *n == 0 {
                        return Err(Error::invalid_plan("NTILE bucket count must be positive"));
                    }
                    BoundWindowFunc::Ntile(*n)
                }
                WindowFunc::Lag { expr, offset } => BoundWindowFunc::Lag {
                    expr: self.bind_expr(expr, &in_schema)?,
                    offset: *offset,
                },
                WindowFunc::Lead { expr, offset } => BoundWindowFunc::Lead {
                    expr: self.bind_expr(expr, &in_schema)?,
                    offset: *offset,
                },
                WindowFunc::FirstValue(expr) => {
                    BoundWindowFunc::FirstValue(self.bind_expr(expr, &in_schema)?)
                }
                WindowFunc::LastValue(expr) => {
                    BoundWindowFunc::LastValue(self.bind_expr(expr, &in_schema)?)
                }
                WindowFunc::Aggregate { func, arg } => BoundWindowFunc::Aggregate {
                    func: func.clone(),
                    arg: arg
                        .as_ref()
                        .map(|a| self.bind_expr(a, &in_schema))
                        .transpose()?,
                },
            };
            bound_calls.push(BoundWindowCall {
                func,
                partition_by: call
                    .partition_by
                    .iter()
                    .map(|e| self.bind_expr(e, &in_schema))
                    .collect::<Result<Vec<_>>>()?,
                order_by: call
                    .order_by
                    .iter()
                    .map(|k| self.bind_sort_key(k, &in_schema))
                    .collect::<Result<Vec<_>>>()?,
                frame: call.frame.unwrap_or_default(),
            });
            names.push(call.name.clone());
        }
        Ok(BoundPlan::Window {
            input,
            calls: bound_calls,
            schema: Rc::new(Schema::new(names)?),
        })
    }

    fn bind_with(&mut self, ctes: &[CteDef], body: &PlanNode) -> Result<BoundPlan> {
        let scope_base = self.ctes.len();
        let mut bound = Vec::with_capacity(ctes.len());
        for def in ctes {
            let id = self.next_cte_id;
            self.next_cte_id += 1;
            if def.recursive {
                let (base_ast, step_ast, all) = match &def.plan {
                    PlanNode::SetOp {
                        left,
                        right,
                        kind: SetOpKind::Union,
                        all,
                    } => (left.as_ref(), right.as_ref(), *all),
                    _ => {
                        return Err(Error::invalid_plan(format!(
                            "Recursive CTE {} must be a union of base and step",
                            def.name
                        )))
                    }
                };
                let base = Rc::new(self.bind_plan(base_ast)?);
                let schema = base.schema().clone();
                // The step term sees the CTE itself as the frontier.
                self.ctes.push(CteScope {
                    name: def.name.clone(),
                    id,
                    schema: schema.clone(),
                    frontier: true,
                });
                let step = self.bind_plan(step_ast);
                self.ctes.pop();
                let step = Rc::new(step?);
                if step.schema().len() != schema.len() {
                    return Err(Error::set_op_arity(schema.len(), step.schema().len()));
                }
                self.ctes.push(CteScope {
                    name: def.name.clone(),
                    id,
                    schema: schema.clone(),
                    frontier: false,
                });
                bound.push(Rc::new(BoundCte {
                    id,
                    name: def.name.clone(),
                    plan: CtePlan::Recursive {
                        base,
                        step,
                        distinct: !all,
                    },
                    schema,
                }));
            } else {
                let plan = Rc::new(self.bind_plan(&def.plan)?);
                let schema = plan.schema().clone();
                self.ctes.push(CteScope {
                    name: def.name.clone(),
                    id,
                    schema: schema.clone(),
                    frontier: false,
                });
                bound.push(Rc::new(BoundCte {
                    id,
                    name: def.name.clone(),
                    plan: CtePlan::Materialized(plan),
                    schema,
                }));
            }
        }
        let body = self.bind_plan(body);
        self.ctes.truncate(scope_base);
        Ok(BoundPlan::With {
            ctes: bound,
            body: Rc::new(body?),
        })
    }

    fn bind_sort_key(&mut self, key: &SortKey, schema: &Rc<Schema>) -> Result<BoundSortKey> {
        Ok(BoundSortKey {
            expr: self.bind_expr(&key.expr, schema)?,
            order: key.order,
            nulls: key.nulls,
        })
    }

    fn bind_expr(&mut self, expr: &Expr, schema: &Rc<Schema>) -> Result<BoundExpr> {
        match expr {
            Expr::Column(name) => self.resolve_column(name, schema),
            Expr::Literal(v) => Ok(BoundExpr::Literal(v.clone())),
            Expr::Arith { op, left, right } => Ok(BoundExpr::Arith {
                op: *op,
                left: Box::new(self.bind_expr(left, schema)?),
                right: Box::new(self.bind_expr(right, schema)?),
            }),
            Expr::Compare { op, left, right } => Ok(BoundExpr::Compare {
                op: *op,
                left: Box::new(self.bind_expr(left, schema)?),
                right: Box::new(self.bind_expr(right, schema)?),
            }),
            Expr::And(l, r) => Ok(BoundExpr::And(
                Box::new(self.bind_expr(l, schema)?),
                Box::new(self.bind_expr(r, schema)?),
            )),
            Expr::Or(l, r) => Ok(BoundExpr::Or(
                Box::new(self.bind_expr(l, schema)?),
                Box::new(self.bind_expr(r, schema)?),
            )),
            Expr::Not(e) => Ok(BoundExpr::Not(Box::new(self.bind_expr(e, schema)?))),
            Expr::Neg(e) => Ok(BoundExpr::Neg(Box::new(self.bind_expr(e, schema)?))),
            Expr::IsNull(e) => Ok(BoundExpr::IsNull {
                expr: Box::new(self.bind_expr(e, schema)?),
                negated: false,
            }),
            Expr::IsNotNull(e) => Ok(BoundExpr::IsNull {
                expr: Box::new(self.bind_expr(e, schema)?),
                negated: true,
            }),
            Expr::Case {
                branches,
                otherwise,
            } => {
                let branches = branches
                    .iter()
                    .map(|(c, v)| {
                        Ok((self.bind_expr(c, schema)?, self.bind_expr(v, schema)?))
                    })
                    .collect::<Result<Vec<_>>>()?;
                let otherwise = otherwise
                    .as_ref()
                    .map(|e| self.bind_expr(e, schema).map(Box::new))
                    .transpose()?;
                Ok(BoundExpr::Case {
                    branches,
                    otherwise,
                })
            }
            Expr::Like {
                expr,
                pattern,
                negated,
            } => Ok(BoundExpr::Like {
                expr: Box::new(self.bind_expr(expr, schema)?),
                pattern: Box::new(self.bind_expr(pattern, schema)?),
                negated: *negated,
            }),
            Expr::InList {
                expr,
                list,
                negated,
            } => Ok(BoundExpr::InList {
                expr: Box::new(self.bind_expr(expr, schema)?),
                list: list
                    .iter()
                    .map(|e| self.bind_expr(e, schema))
                    .collect::<Result<Vec<_>>>()?,
                negated: *negated,
            }),
            Expr::InSubquery {
                expr,
                subquery,
                negated,
            } => {
                let expr = Box::new(self.bind_expr(expr, schema)?);
                let plan = self.bind_subquery(subquery, schema)?;
                if plan.schema().len() != 1 {
                    return Err(Error::invalid_plan(format!(
                        "IN subquery must produce one column, got {}",
                        plan.schema().len()
                    )));
                }
                Ok(BoundExpr::InSubquery {
                    expr,
                    plan,
                    negated: *negated,
                })
            }
            Expr::ScalarSubquery(subquery) => {
                let plan = self.bind_subquery(subquery, schema)?;
                // Width violations are cardinality errors, like the
                // more-than-one-row case caught at evaluation time.
                if plan.schema().len() != 1 {
                    return Err(Error::cardinality_violation(format!(
                        "scalar subquery produced {} columns",
                        plan.schema().len()
                    )));
                }
                Ok(BoundExpr::ScalarSubquery(plan))
            }
            Expr::Exists { subquery, negated } => Ok(BoundExpr::Exists {
                plan: self.bind_subquery(subquery, schema)?,
                negated: *negated,
            }),
        }
    }

    fn bind_subquery(&mut self, plan: &PlanNode, schema: &Rc<Schema>) -> Result<Rc<BoundPlan>> {
        self.outer.push(schema.clone());
        let bound = self.bind_plan(plan);
        self.outer.pop();
        Ok(Rc::new(bound?))
    }

    fn resolve_column(&self, name: &str, schema: &Schema) -> Result<BoundExpr> {
        if let Resolution::Found(index) = schema.resolve(name)? {
            return Ok(BoundExpr::Column(index));
        }
        for (up, outer) in self.outer.iter().rev().enumerate() {
            if let Resolution::Found(index) = outer.resolve(name)? {
                return Ok(BoundExpr::Outer {
                    levels_up: up + 1,
                    index,
                });
            }
        }
        Err(Error::unresolved_column(name))
    }
}

/// Detects a pure equi-join condition: a conjunction where every conjunct
/// compares one left column with one right column for equality. Returns
/// None when any conjunct falls outside that shape.
fn hash_strategy(cond: &BoundExpr, left_len: usize) -> Option<JoinStrategy> {
    let mut left_keys = Vec::new();
    let mut right_keys = Vec::new();
    if collect_equi_keys(cond, left_len, &mut left_keys, &mut right_keys) {
        Some(JoinStrategy::Hash {
            left_keys,
            right_keys,
        })
    } else {
        None
    }
}

fn collect_equi_keys(
    cond: &BoundExpr,
    left_len: usize,
    left_keys: &mut Vec<usize>,
    right_keys: &mut Vec<usize>,
) -> bool {
    match cond {
        BoundExpr::And(l, r) => {
            collect_equi_keys(l, left_len, left_keys, right_keys)
                && collect_equi_keys(r, left_len, left_keys, right_keys)
        }
        BoundExpr::Compare {
            op: CmpOp::Eq,
            left,
            right,
        } => match (left.as_ref(), right.as_ref()) {
            (BoundExpr::Column(a), BoundExpr::Column(b)) => {
                if *a < left_len && *b >= left_len {
                    left_keys.push(*a);
                    right_keys.push(*b - left_len);
                    true
                } else if *b < left_len && *a >= left_len {
                    left_keys.push(*b);
                    right_keys.push(*a - left_len);
                    true
                } else {
                    false
                }
            }
            _ => false,
        },
        _ => false,
    }
}

//! Relational plan AST.
//!
//! A `PlanNode` tree describes a query over named tables and CTEs. Plans
//! are built programmatically, bound against a catalog, and then executed
//! by the pull-based operator pipeline.

use crate::ast::expr::Expr;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

/// Join kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    /// Emits each left row once if any right row matches.
    Semi,
    /// Emits each left row with no matching right row.
    Anti,
}

/// Set operation kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetOpKind {
    Union,
    Intersect,
    Except,
}

/// Sort direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Null placement in a sort, independent of direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NullOrdering {
    First,
    #[default]
    Last,
}

/// One sort key: an expression plus direction and null placement.
#[derive(Clone, Debug)]
pub struct SortKey {
    pub expr: Expr,
    pub order: SortOrder,
    pub nulls: NullOrdering,
}

impl SortKey {
    /// Ascending sort key with nulls last.
    pub fn asc(expr: Expr) -> Self {
        Self {
            expr,
            order: SortOrder::Asc,
            nulls: NullOrdering::Last,
        }
    }

    /// Descending sort key with nulls last.
    pub fn desc(expr: Expr) -> Self {
        Self {
            expr,
            order: SortOrder::Desc,
            nulls: NullOrdering::Last,
        }
    }

    /// Overrides null placement.
    pub fn nulls(mut self, nulls: NullOrdering) -> Self {
        self.nulls = nulls;
        self
    }
}

/// Aggregate functions.
#[derive(Clone, Debug, PartialEq)]
pub enum AggregateFunc {
    Count,
    Sum,
    Avg,
    Min,
    Max,
    /// Concatenates non-null text values with the separator.
    StringAgg { separator: String },
    BoolAnd,
    BoolOr,
}

/// One aggregate in an Aggregate node.
///
/// `arg` is None only for COUNT(*). `filter` keeps a row out of this
/// aggregate (not out of the group) unless it evaluates to True.
#[derive(Clone, Debug)]
pub struct AggregateCall {
    pub func: AggregateFunc,
    pub arg: Option<Expr>,
    pub distinct: bool,
    pub filter: Option<Expr>,
    pub name: String,
}

impl AggregateCall {
    /// Creates an aggregate over an argument expression.
    pub fn new(func: AggregateFunc, arg: Expr, name: impl Into<String>) -> Self {
        Self {
            func,
            arg: Some(arg),
            distinct: false,
            filter: None,
            name: name.into(),
        }
    }

    /// Creates a COUNT(*) aggregate.
    pub fn count_star(name: impl Into<String>) -> Self {
        Self {
            func: AggregateFunc::Count,
            arg: None,
            distinct: false,
            filter: None,
            name: name.into(),
        }
    }

    /// Marks the aggregate as DISTINCT.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Attaches a FILTER predicate.
    pub fn filter(mut self, predicate: Expr) -> Self {
        self.filter = Some(predicate);
        self
    }
}

/// Window functions.
#[derive(Clone, Debug)]
pub enum WindowFunc {
    RowNumber,
    Rank,
    DenseRank,
    PercentRank,
    /// Splits the partition into `n` buckets as evenly as possible,
    /// earlier buckets taking the extra rows.
    Ntile(usize),
    /// Value of `expr` from the row `offset` back in the partition.
    Lag { expr: Expr, offset: usize },
    /// Value of `expr` from the row `offset` ahead in the partition.
    Lead { expr: Expr, offset: usize },
    FirstValue(Expr),
    LastValue(Expr),
    /// Any aggregate applied over the window frame.
    Aggregate { func: AggregateFunc, arg: Option<Expr> },
}

/// Frame bound for ROWS frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameBound {
    UnboundedPreceding,
    Preceding(usize),
    CurrentRow,
    Following(usize),
    UnboundedFollowing,
}

/// ROWS frame: physical row offsets around the current row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub start: FrameBound,
    pub end: FrameBound,
}

impl Default for Frame {
    /// The default frame runs from the partition start to the current
    /// row, which makes LAST_VALUE return the current row's value
    /// unless a wider frame is given.
    fn default() -> Self {
        Self {
            start: FrameBound::UnboundedPreceding,
            end: FrameBound::CurrentRow,
        }
    }
}

/// One window function call in a Window node.
#[derive(Clone, Debug)]
pub struct WindowCall {
    pub func: WindowFunc,
    pub partition_by: Vec<Expr>,
    pub order_by: Vec<SortKey>,
    pub frame: Option<Frame>,
    pub name: String,
}

impl WindowCall {
    /// Creates a window call with no partitioning or ordering.
    pub fn new(func: WindowFunc, name: impl Into<String>) -> Self {
        Self {
            func,
            partition_by: Vec::new(),
            order_by: Vec::new(),
            frame: None,
            name: name.into(),
        }
    }

    /// Sets the PARTITION BY expressions.
    pub fn partition_by(mut self, exprs: Vec<Expr>) -> Self {
        self.partition_by = exprs;
        self
    }

    /// Sets the ORDER BY keys.
    pub fn order_by(mut self, keys: Vec<SortKey>) -> Self {
        self.order_by = keys;
        self
    }

    /// Sets an explicit ROWS frame.
    pub fn frame(mut self, frame: Frame) -> Self {
        self.frame = Some(frame);
        self
    }
}

/// One CTE definition in a With node.
///
/// A recursive CTE's plan must be a Union set operation; its left side is
/// the base term and its right side the recursive step.
#[derive(Clone, Debug)]
pub struct CteDef {
    pub name: String,
    pub plan: PlanNode,
    pub recursive: bool,
}

impl CteDef {
    /// Creates a non-recursive CTE.
    pub fn new(name: impl Into<String>, plan: PlanNode) -> Self {
        Self {
            name: name.into(),
            plan,
            recursive: false,
        }
    }

    /// Creates a recursive CTE. `plan` must be a Union of the base term
    /// and the recursive step.
    pub fn recursive(name: impl Into<String>, plan: PlanNode) -> Self {
        Self {
            name: name.into(),
            plan,
            recursive: true,
        }
    }
}

/// Relational plan node.
#[derive(Clone, Debug)]
pub enum PlanNode {
    /// Scans a base table or an in-scope CTE by name.
    Scan {
        table: String,
        alias: Option<String>,
    },
    /// Keeps rows whose predicate evaluates to True.
    Filter {
        input: Box<PlanNode>,
        predicate: Expr,
    },
    /// Computes named output columns.
    Project {
        input: Box<PlanNode>,
        exprs: Vec<(Expr, String)>,
    },
    /// Joins two inputs.
    Join {
        left: Box<PlanNode>,
        right: Box<PlanNode>,
        kind: JoinKind,
        condition: Option<Expr>,
    },
    /// Groups rows and computes aggregates. Output columns are the group
    /// keys followed by the aggregates; HAVING sees that output schema.
    Aggregate {
        input: Box<PlanNode>,
        group_by: Vec<(Expr, String)>,
        aggregates: Vec<AggregateCall>,
        having: Option<Expr>,
    },
    /// Appends window function columns without collapsing rows.
    Window {
        input: Box<PlanNode>,
        calls: Vec<WindowCall>,
    },
    /// Stable sort by the given keys.
    Sort {
        input: Box<PlanNode>,
        keys: Vec<SortKey>,
    },
    /// Skips `offset` rows, then emits at most `limit`.
    Limit {
        input: Box<PlanNode>,
        limit: Option<usize>,
        offset: usize,
    },
    /// Removes duplicate rows, keeping first occurrences in order.
    Distinct { input: Box<PlanNode> },
    /// Union, Intersect, or Except of two arity-compatible inputs.
    SetOp {
        left: Box<PlanNode>,
        right: Box<PlanNode>,
        kind: SetOpKind,
        all: bool,
    },
    /// Introduces CTEs visible inside `body`.
    With {
        ctes: Vec<CteDef>,
        body: Box<PlanNode>,
    },
}

impl PlanNode {
    /// Scans a table or CTE.
    pub fn scan(table: impl Into<String>) -> Self {
        PlanNode::Scan {
            table: table.into(),
            alias: None,
        }
    }

    /// Scans a table or CTE under an alias.
    pub fn scan_as(table: impl Into<String>, alias: impl Into<String>) -> Self {
        PlanNode::Scan {
            table: table.into(),
            alias: Some(alias.into()),
        }
    }

    /// Filters rows by a predicate.
    pub fn filter(self, predicate: Expr) -> Self {
        PlanNode::Filter {
            input: Box::new(self),
            predicate,
        }
    }

    /// Projects named output columns.
    pub fn project(self, exprs: Vec<(Expr, &str)>) -> Self {
        PlanNode::Project {
            input: Box::new(self),
            exprs: exprs
                .into_iter()
                .map(|(e, n)| (e, String::from(n)))
                .collect(),
        }
    }

    /// Joins with another plan.
    pub fn join(self, right: PlanNode, kind: JoinKind, condition: Option<Expr>) -> Self {
        PlanNode::Join {
            left: Box::new(self),
            right: Box::new(right),
            kind,
            condition,
        }
    }

    /// Groups and aggregates.
    pub fn aggregate(
        self,
        group_by: Vec<(Expr, &str)>,
        aggregates: Vec<AggregateCall>,
    ) -> Self {
        PlanNode::Aggregate {
            input: Box::new(self),
            group_by: group_by
                .into_iter()
                .map(|(e, n)| (e, String::from(n)))
                .collect(),
            aggregates,
            having: None,
        }
    }

    /// Attaches a HAVING predicate to an Aggregate node.
    pub fn having(self, predicate: Expr) -> Self {
        match self {
            PlanNode::Aggregate {
                input,
                group_by,
                aggregates,
                ..
            } => PlanNode::Aggregate {
                input,
                group_by,
                aggregates,
                having: Some(predicate),
            },
            other => PlanNode::Filter {
                input: Box::new(other),
                predicate,
            },
        }
    }

    /// Appends window function columns.
    pub fn window(self, calls: Vec<WindowCall>) -> Self {
        PlanNode::Window {
            input: Box::new(self),
            calls,
        }
    }

    /// Sorts by the given keys.
    pub fn sort(self, keys: Vec<SortKey>) -> Self {
        PlanNode::Sort {
            input: Box::new(self),
            keys,
        }
    }

    /// Limits output to at most `limit` rows.
    pub fn limit(self, limit: usize) -> Self {
        PlanNode::Limit {
            input: Box::new(self),
            limit: Some(limit),
            offset: 0,
        }
    }

    /// Skips `offset` rows, then emits at most `limit`.
    pub fn limit_offset(self, limit: Option<usize>, offset: usize) -> Self {
        PlanNode::Limit {
            input: Box::new(self),
            limit,
            offset,
        }
    }

    /// Removes duplicate rows.
    pub fn distinct(self) -> Self {
        PlanNode::Distinct {
            input: Box::new(self),
        }
    }

    /// Combines with another plan by a set operation.
    pub fn set_op(self, right: PlanNode, kind: SetOpKind, all: bool) -> Self {
        PlanNode::SetOp {
            left: Box::new(self),
            right: Box::new(right),
            kind,
            all,
        }
    }

    /// UNION (distinct) with another plan.
    pub fn union(self, right: PlanNode) -> Self {
        self.set_op(right, SetOpKind::Union, false)
    }

    /// UNION ALL with another plan.
    pub fn union_all(self, right: PlanNode) -> Self {
        self.set_op(right, SetOpKind::Union, true)
    }

    /// Wraps this plan in a WITH scope.
    pub fn with(ctes: Vec<CteDef>, body: PlanNode) -> Self {
        PlanNode::With {
            ctes,
            body: Box::new(body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_plan_builders() {
        let plan = PlanNode::scan("users")
            .filter(Expr::col("age").ge(Expr::lit(18i64)))
            .project(vec![(Expr::col("name"), "name")])
            .sort(vec![SortKey::asc(Expr::col("name"))])
            .limit(10);

        assert!(matches!(plan, PlanNode::Limit { .. }));
    }

    #[test]
    fn test_having_attaches_to_aggregate() {
        let plan = PlanNode::scan("orders")
            .aggregate(
                vec![(Expr::col("user_id"), "user_id")],
                vec![AggregateCall::count_star("n")],
            )
            .having(Expr::col("n").ge(Expr::lit(2i64)));

        assert!(matches!(
            plan,
            PlanNode::Aggregate {
                having: Some(_),
                ..
            }
        ));
    }

    #[test]
    fn test_default_frame() {
        let frame = Frame::default();
        assert_eq!(frame.start, FrameBound::UnboundedPreceding);
        assert_eq!(frame.end, FrameBound::CurrentRow);
    }
}

//! AST module for query plans and expressions.

mod expr;
mod plan;

pub use expr::{CmpOp, Expr};
pub use plan::{
    AggregateCall, AggregateFunc, CteDef, Frame, FrameBound, JoinKind, NullOrdering, PlanNode,
    SetOpKind, SortKey, SortOrder, WindowCall, WindowFunc,
};

//! Expression AST definitions.
//!
//! Expressions here are unbound: columns are referenced by name and
//! subqueries are full plan trees. The binder resolves names to indices
//! and produces `BoundExpr` for evaluation.

use crate::ast::plan::PlanNode;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use tern_core::{ArithOp, Value};

/// Comparison operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Expression AST node.
#[derive(Clone, Debug)]
pub enum Expr {
    /// Column reference by name, optionally qualified (`alias.column`).
    Column(String),
    /// Literal value.
    Literal(Value),
    /// Arithmetic operation.
    Arith {
        op: ArithOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Comparison producing a three-valued truth.
    Compare {
        op: CmpOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Logical AND (Kleene).
    And(Box<Expr>, Box<Expr>),
    /// Logical OR (Kleene).
    Or(Box<Expr>, Box<Expr>),
    /// Logical NOT (Kleene).
    Not(Box<Expr>),
    /// Arithmetic negation.
    Neg(Box<Expr>),
    /// IS NULL test. Always definite: never Unknown.
    IsNull(Box<Expr>),
    /// IS NOT NULL test.
    IsNotNull(Box<Expr>),
    /// Searched CASE: first branch whose condition is True wins.
    Case {
        branches: Vec<(Expr, Expr)>,
        otherwise: Option<Box<Expr>>,
    },
    /// LIKE pattern match with `%` and `_` wildcards.
    Like {
        expr: Box<Expr>,
        pattern: Box<Expr>,
        negated: bool,
    },
    /// IN with an explicit value list.
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
    },
    /// IN against a single-column subquery.
    InSubquery {
        expr: Box<Expr>,
        subquery: Box<PlanNode>,
        negated: bool,
    },
    /// Scalar subquery: one column, at most one row.
    ScalarSubquery(Box<PlanNode>),
    /// EXISTS test over a subquery.
    Exists {
        subquery: Box<PlanNode>,
        negated: bool,
    },
}

impl Expr {
    /// Creates a column reference expression.
    pub fn col(name: impl Into<String>) -> Self {
        Expr::Column(name.into())
    }

    /// Creates a literal expression.
    pub fn lit(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    /// Creates a Null literal.
    pub fn null() -> Self {
        Expr::Literal(Value::Null)
    }

    fn compare(op: CmpOp, left: Expr, right: Expr) -> Self {
        Expr::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Creates an equality comparison.
    pub fn eq(self, other: Expr) -> Self {
        Expr::compare(CmpOp::Eq, self, other)
    }

    /// Creates a not-equal comparison.
    pub fn ne(self, other: Expr) -> Self {
        Expr::compare(CmpOp::Ne, self, other)
    }

    /// Creates a less-than comparison.
    pub fn lt(self, other: Expr) -> Self {
        Expr::compare(CmpOp::Lt, self, other)
    }

    /// Creates a less-than-or-equal comparison.
    pub fn le(self, other: Expr) -> Self {
        Expr::compare(CmpOp::Le, self, other)
    }

    /// Creates a greater-than comparison.
    pub fn gt(self, other: Expr) -> Self {
        Expr::compare(CmpOp::Gt, self, other)
    }

    /// Creates a greater-than-or-equal comparison.
    pub fn ge(self, other: Expr) -> Self {
        Expr::compare(CmpOp::Ge, self, other)
    }

    /// Creates an AND expression.
    pub fn and(self, other: Expr) -> Self {
        Expr::And(Box::new(self), Box::new(other))
    }

    /// Creates an OR expression.
    pub fn or(self, other: Expr) -> Self {
        Expr::Or(Box::new(self), Box::new(other))
    }

    /// Creates a NOT expression.
    pub fn not(self) -> Self {
        Expr::Not(Box::new(self))
    }

    /// Creates an arithmetic negation.
    pub fn neg(self) -> Self {
        Expr::Neg(Box::new(self))
    }

    /// Creates an IS NULL test.
    pub fn is_null(self) -> Self {
        Expr::IsNull(Box::new(self))
    }

    /// Creates an IS NOT NULL test.
    pub fn is_not_null(self) -> Self {
        Expr::IsNotNull(Box::new(self))
    }

    fn arith(op: ArithOp, left: Expr, right: Expr) -> Self {
        Expr::Arith {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Creates an addition expression.
    pub fn add(self, other: Expr) -> Self {
        Expr::arith(ArithOp::Add, self, other)
    }

    /// Creates a subtraction expression.
    pub fn sub(self, other: Expr) -> Self {
        Expr::arith(ArithOp::Sub, self, other)
    }

    /// Creates a multiplication expression.
    pub fn mul(self, other: Expr) -> Self {
        Expr::arith(ArithOp::Mul, self, other)
    }

    /// Creates a division expression.
    pub fn div(self, other: Expr) -> Self {
        Expr::arith(ArithOp::Div, self, other)
    }

    /// Creates a modulo expression.
    pub fn rem(self, other: Expr) -> Self {
        Expr::arith(ArithOp::Mod, self, other)
    }

    /// Creates a searched CASE expression.
    pub fn case(branches: Vec<(Expr, Expr)>, otherwise: Option<Expr>) -> Self {
        Expr::Case {
            branches,
            otherwise: otherwise.map(Box::new),
        }
    }

    /// Creates a LIKE expression.
    pub fn like(self, pattern: Expr) -> Self {
        Expr::Like {
            expr: Box::new(self),
            pattern: Box::new(pattern),
            negated: false,
        }
    }

    /// Creates a NOT LIKE expression.
    pub fn not_like(self, pattern: Expr) -> Self {
        Expr::Like {
            expr: Box::new(self),
            pattern: Box::new(pattern),
            negated: true,
        }
    }

    /// Creates an IN expression over a value list.
    pub fn in_list(self, list: Vec<Expr>) -> Self {
        Expr::InList {
            expr: Box::new(self),
            list,
            negated: false,
        }
    }

    /// Creates a NOT IN expression over a value list.
    pub fn not_in_list(self, list: Vec<Expr>) -> Self {
        Expr::InList {
            expr: Box::new(self),
            list,
            negated: true,
        }
    }

    /// Creates an IN expression over a single-column subquery.
    pub fn in_subquery(self, subquery: PlanNode) -> Self {
        Expr::InSubquery {
            expr: Box::new(self),
            subquery: Box::new(subquery),
            negated: false,
        }
    }

    /// Creates a NOT IN expression over a single-column subquery.
    pub fn not_in_subquery(self, subquery: PlanNode) -> Self {
        Expr::InSubquery {
            expr: Box::new(self),
            subquery: Box::new(subquery),
            negated: true,
        }
    }

    /// Creates a scalar subquery expression.
    pub fn scalar_subquery(subquery: PlanNode) -> Self {
        Expr::ScalarSubquery(Box::new(subquery))
    }

    /// Creates an EXISTS expression.
    pub fn exists(subquery: PlanNode) -> Self {
        Expr::Exists {
            subquery: Box::new(subquery),
            negated: false,
        }
    }

    /// Creates a NOT EXISTS expression.
    pub fn not_exists(subquery: PlanNode) -> Self {
        Expr::Exists {
            subquery: Box::new(subquery),
            negated: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr_builders() {
        let col = Expr::col("users.id");
        assert!(matches!(col, Expr::Column(_)));

        let lit = Expr::lit(42i64);
        assert!(matches!(lit, Expr::Literal(Value::Integer(42))));

        let cmp = Expr::col("a").eq(Expr::col("b"));
        assert!(matches!(cmp, Expr::Compare { op: CmpOp::Eq, .. }));

        let pred = Expr::col("a")
            .gt(Expr::lit(1i64))
            .and(Expr::col("b").is_null());
        assert!(matches!(pred, Expr::And(..)));
    }

    #[test]
    fn test_negated_variants() {
        let e = Expr::col("name").not_like(Expr::lit("A%"));
        assert!(matches!(e, Expr::Like { negated: true, .. }));

        let e = Expr::col("id").not_in_list(alloc::vec![Expr::lit(1i64)]);
        assert!(matches!(e, Expr::InList { negated: true, .. }));
    }
}

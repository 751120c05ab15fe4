//! Error types for the Tern query engine.

use crate::types::DataType;
use alloc::string::String;
use core::fmt;

/// Result type alias for Tern operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error taxonomy for catalog construction, plan building, and execution.
///
/// Plan-build errors (`AmbiguousColumn`, `UnresolvedColumn`, `InvalidPlan`,
/// `SetOpArityMismatch`) are reported before any row is pulled. The rest
/// abort an in-flight query and close every open operator on the way out.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// Row does not conform to the table's column schema.
    SchemaViolation { table: String, message: String },
    /// Incompatible operand kinds in an expression.
    TypeMismatch {
        op: String,
        left: Option<DataType>,
        right: Option<DataType>,
    },
    /// Scalar subquery yielded more than one row or column.
    CardinalityViolation { message: String },
    /// A column name matched more than one candidate.
    AmbiguousColumn { name: String },
    /// A column name matched nothing in scope.
    UnresolvedColumn { name: String },
    /// Recursive CTE evaluation did not converge within the iteration cap.
    RecursionLimitExceeded { cte: String, limit: usize },
    /// Set operation inputs have different column counts.
    SetOpArityMismatch { left: usize, right: usize },
    /// Table not found in the catalog.
    TableNotFound { name: String },
    /// Table already exists in the catalog.
    TableExists { name: String },
    /// Invalid schema definition.
    InvalidSchema { message: String },
    /// Malformed query plan.
    InvalidPlan { message: String },
    /// Invalid runtime operation (division by zero, overflow).
    InvalidOperation { message: String },
    /// Execution was cancelled between root pulls.
    Cancelled,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SchemaViolation { table, message } => {
                write!(f, "Schema violation on table {}: {}", table, message)
            }
            Error::TypeMismatch { op, left, right } => {
                write!(f, "Type mismatch in {}: ", op)?;
                match (left, right) {
                    (Some(l), Some(r)) => write!(f, "{} vs {}", l.name(), r.name()),
                    (Some(l), None) => write!(f, "{}", l.name()),
                    (None, Some(r)) => write!(f, "{}", r.name()),
                    (None, None) => write!(f, "null operands"),
                }
            }
            Error::CardinalityViolation { message } => {
                write!(f, "Cardinality violation: {}", message)
            }
            Error::AmbiguousColumn { name } => write!(f, "Ambiguous column: {}", name),
            Error::UnresolvedColumn { name } => write!(f, "Unresolved column: {}", name),
            Error::RecursionLimitExceeded { cte, limit } => {
                write!(
                    f,
                    "Recursive CTE {} did not converge within {} iterations",
                    cte, limit
                )
            }
            Error::SetOpArityMismatch { left, right } => {
                write!(
                    f,
                    "Set operation arity mismatch: {} vs {} columns",
                    left, right
                )
            }
            Error::TableNotFound { name } => write!(f, "Table not found: {}", name),
            Error::TableExists { name } => write!(f, "Table already exists: {}", name),
            Error::InvalidSchema { message } => write!(f, "Invalid schema: {}", message),
            Error::InvalidPlan { message } => write!(f, "Invalid plan: {}", message),
            Error::InvalidOperation { message } => write!(f, "Invalid operation: {}", message),
            Error::Cancelled => write!(f, "Query cancelled"),
        }
    }
}

impl Error {
    /// Creates a schema violation error.
    pub fn schema_violation(table: impl Into<String>, message: impl Into<String>) -> Self {
        Error::SchemaViolation {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(
        op: impl Into<String>,
        left: Option<DataType>,
        right: Option<DataType>,
    ) -> Self {
        Error::TypeMismatch {
            op: op.into(),
            left,
            right,
        }
    }

    /// Creates a cardinality violation error.
    pub fn cardinality_violation(message: impl Into<String>) -> Self {
        Error::CardinalityViolation {
            message: message.into(),
        }
    }

    /// Creates an ambiguous column error.
    pub fn ambiguous_column(name: impl Into<String>) -> Self {
        Error::AmbiguousColumn { name: name.into() }
    }

    /// Creates an unresolved column error.
    pub fn unresolved_column(name: impl Into<String>) -> Self {
        Error::UnresolvedColumn { name: name.into() }
    }

    /// Creates a recursion limit error.
    pub fn recursion_limit(cte: impl Into<String>, limit: usize) -> Self {
        Error::RecursionLimitExceeded {
            cte: cte.into(),
            limit,
        }
    }

    /// Creates a set-operation arity mismatch error.
    pub fn set_op_arity(left: usize, right: usize) -> Self {
        Error::SetOpArityMismatch { left, right }
    }

    /// Creates a table not found error.
    pub fn table_not_found(name: impl Into<String>) -> Self {
        Error::TableNotFound { name: name.into() }
    }

    /// Creates a table already exists error.
    pub fn table_exists(name: impl Into<String>) -> Self {
        Error::TableExists { name: name.into() }
    }

    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Error::InvalidSchema {
            message: message.into(),
        }
    }

    /// Creates an invalid plan error.
    pub fn invalid_plan(message: impl Into<String>) -> Self {
        Error::InvalidPlan {
            message: message.into(),
        }
    }

    /// Creates an invalid operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Error::InvalidOperation {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_display() {
        let err = Error::type_mismatch("+", Some(DataType::Text), Some(DataType::Integer));
        assert!(err.to_string().contains("Type mismatch"));
        assert!(err.to_string().contains("text"));

        let err = Error::table_not_found("users");
        assert!(err.to_string().contains("users"));

        let err = Error::recursion_limit("org_chart", 100);
        assert!(err.to_string().contains("org_chart"));
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn test_error_constructors() {
        let err = Error::set_op_arity(2, 3);
        assert_eq!(err, Error::SetOpArityMismatch { left: 2, right: 3 });

        let err = Error::ambiguous_column("id");
        match err {
            Error::AmbiguousColumn { name } => assert_eq!(name, "id"),
            _ => panic!("wrong error kind"),
        }
    }
}

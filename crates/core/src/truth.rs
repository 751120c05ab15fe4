//! Three-valued logic for Null-aware boolean evaluation.
//!
//! SQL comparisons against Null produce Unknown rather than false. `Truth`
//! carries that third state explicitly through filters, join conditions,
//! and HAVING so it is never collapsed too early.

use crate::error::{Error, Result};
use crate::value::{Comparison, Value};

/// A three-valued boolean: the result of evaluating a predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Truth {
    True,
    False,
    Unknown,
}

impl Truth {
    /// Kleene AND: False dominates, then Unknown.
    pub fn and(self, other: Truth) -> Truth {
        match (self, other) {
            (Truth::False, _) | (_, Truth::False) => Truth::False,
            (Truth::True, Truth::True) => Truth::True,
            _ => Truth::Unknown,
        }
    }

    /// Kleene OR: True dominates, then Unknown.
    pub fn or(self, other: Truth) -> Truth {
        match (self, other) {
            (Truth::True, _) | (_, Truth::True) => Truth::True,
            (Truth::False, Truth::False) => Truth::False,
            _ => Truth::Unknown,
        }
    }

    /// Kleene NOT: Unknown stays Unknown.
    pub fn not(self) -> Truth {
        match self {
            Truth::True => Truth::False,
            Truth::False => Truth::True,
            Truth::Unknown => Truth::Unknown,
        }
    }

    /// Returns true only for `True`; Unknown is not a pass. This is the
    /// single point where filters and HAVING collapse three-valued logic.
    #[inline]
    pub fn is_true(self) -> bool {
        matches!(self, Truth::True)
    }

    /// Converts a value into a truth state. Null is Unknown; non-boolean
    /// values are a type error.
    pub fn from_value(value: &Value) -> Result<Truth> {
        match value {
            Value::Null => Ok(Truth::Unknown),
            Value::Boolean(true) => Ok(Truth::True),
            Value::Boolean(false) => Ok(Truth::False),
            other => Err(Error::type_mismatch("boolean test", other.data_type(), None)),
        }
    }

    /// Converts back to a value: Unknown becomes Null.
    pub fn into_value(self) -> Value {
        match self {
            Truth::True => Value::Boolean(true),
            Truth::False => Value::Boolean(false),
            Truth::Unknown => Value::Null,
        }
    }
}

impl From<bool> for Truth {
    fn from(b: bool) -> Self {
        if b {
            Truth::True
        } else {
            Truth::False
        }
    }
}

impl From<Comparison> for Truth {
    /// Truth of an equality test; callers pick the comparison first.
    fn from(cmp: Comparison) -> Self {
        match cmp {
            Comparison::Equal => Truth::True,
            Comparison::Unknown => Truth::Unknown,
            _ => Truth::False,
        }
    }
}

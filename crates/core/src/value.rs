//! Value type definitions for the Tern query engine.
//!
//! This module defines the `Value` enum representing any scalar a table cell
//! or expression can hold, together with the two comparison notions the
//! engine needs: SQL comparison (Null-aware, may be Unknown) and a total
//! ordering used by sort and grouping working state.

use crate::error::{Error, Result};
use crate::types::DataType;
use alloc::string::{String, ToString};
use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

/// Outcome of a SQL comparison between two values.
///
/// Any comparison involving Null is `Unknown`; it is never silently folded
/// into true or false here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    Less,
    Equal,
    Greater,
    Unknown,
}

impl Comparison {
    /// Converts a definite ordering into a comparison result.
    pub fn from_ordering(ord: Ordering) -> Self {
        match ord {
            Ordering::Less => Comparison::Less,
            Ordering::Equal => Comparison::Equal,
            Ordering::Greater => Comparison::Greater,
        }
    }
}

/// Arithmetic operators understood by `Value::arithmetic`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl ArithOp {
    /// Returns the operator symbol for diagnostics.
    pub fn symbol(&self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Mod => "%",
        }
    }
}

/// A scalar value held by a table cell or produced by an expression.
#[derive(Clone, Debug)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Boolean(bool),
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point
    Float(f64),
    /// UTF-8 string
    Text(String),
    /// Calendar date stored as days since the Unix epoch
    Date(i64),
}

impl Value {
    /// Returns the data type of this value, or None if it's Null.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Boolean(_) => Some(DataType::Boolean),
            Value::Integer(_) => Some(DataType::Integer),
            Value::Float(_) => Some(DataType::Float),
            Value::Text(_) => Some(DataType::Text),
            Value::Date(_) => Some(DataType::Date),
        }
    }

    /// Returns true if this value is Null.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean value if this is a Boolean, None otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the i64 value if this is an Integer, None otherwise.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the f64 value if this is a Float, None otherwise.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns a reference to the string if this is Text, None otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Returns the day number if this is a Date, None otherwise.
    pub fn as_date(&self) -> Option<i64> {
        match self {
            Value::Date(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns true if this value matches the declared column type.
    /// Null matches every type; the nullable check lives in the schema layer.
    pub fn conforms_to(&self, data_type: DataType) -> bool {
        match self.data_type() {
            None => true,
            Some(dt) => dt == data_type,
        }
    }

    /// SQL comparison: Null compares Unknown to everything including itself;
    /// Integer and Float compare numerically; comparing incompatible kinds
    /// (e.g. Text against Integer) is a type error, not a quiet Unknown.
    pub fn compare(&self, other: &Value) -> Result<Comparison> {
        match (self, other) {
            (Value::Null, _) | (_, Value::Null) => Ok(Comparison::Unknown),
            (Value::Boolean(a), Value::Boolean(b)) => Ok(Comparison::from_ordering(a.cmp(b))),
            (Value::Integer(a), Value::Integer(b)) => Ok(Comparison::from_ordering(a.cmp(b))),
            (Value::Integer(a), Value::Float(b)) => {
                Ok(Comparison::from_ordering(float_cmp(*a as f64, *b)))
            }
            (Value::Float(a), Value::Integer(b)) => {
                Ok(Comparison::from_ordering(float_cmp(*a, *b as f64)))
            }
            (Value::Float(a), Value::Float(b)) => {
                Ok(Comparison::from_ordering(float_cmp(*a, *b)))
            }
            (Value::Text(a), Value::Text(b)) => Ok(Comparison::from_ordering(a.cmp(b))),
            (Value::Date(a), Value::Date(b)) => Ok(Comparison::from_ordering(a.cmp(b))),
            _ => Err(Error::type_mismatch(
                "compare",
                self.data_type(),
                other.data_type(),
            )),
        }
    }

    /// SQL arithmetic. Null propagates; Integer op Integer stays Integer
    /// (checked, overflow is an error); any Float operand widens to Float;
    /// Date supports Date ± Integer and Date - Date (day difference).
    pub fn arithmetic(op: ArithOp, a: &Value, b: &Value) -> Result<Value> {
        if a.is_null() || b.is_null() {
            return Ok(Value::Null);
        }
        match (a, b) {
            (Value::Integer(x), Value::Integer(y)) => integer_arith(op, *x, *y),
            (Value::Integer(x), Value::Float(y)) => float_arith(op, *x as f64, *y),
            (Value::Float(x), Value::Integer(y)) => float_arith(op, *x, *y as f64),
            (Value::Float(x), Value::Float(y)) => float_arith(op, *x, *y),
            (Value::Date(d), Value::Integer(n)) if matches!(op, ArithOp::Add | ArithOp::Sub) => {
                let days = match op {
                    ArithOp::Add => d.checked_add(*n),
                    _ => d.checked_sub(*n),
                };
                days.map(Value::Date)
                    .ok_or_else(|| Error::invalid_operation("date arithmetic overflow"))
            }
            (Value::Integer(n), Value::Date(d)) if op == ArithOp::Add => n
                .checked_add(*d)
                .map(Value::Date)
                .ok_or_else(|| Error::invalid_operation("date arithmetic overflow")),
            (Value::Date(x), Value::Date(y)) if op == ArithOp::Sub => x
                .checked_sub(*y)
                .map(Value::Integer)
                .ok_or_else(|| Error::invalid_operation("date arithmetic overflow")),
            _ => Err(Error::type_mismatch(
                op.symbol(),
                a.data_type(),
                b.data_type(),
            )),
        }
    }

    /// Arithmetic negation.
    pub fn negate(&self) -> Result<Value> {
        match self {
            Value::Null => Ok(Value::Null),
            Value::Integer(v) => v
                .checked_neg()
                .map(Value::Integer)
                .ok_or_else(|| Error::invalid_operation("integer overflow in negation")),
            Value::Float(v) => Ok(Value::Float(-v)),
            _ => Err(Error::type_mismatch("-", self.data_type(), None)),
        }
    }

    /// Total ordering for sort and grouping working state. Unlike
    /// `compare`, every pair of values orders deterministically: Null sorts
    /// first, NaN sorts after every other float, and distinct kinds order
    /// by type tag. Null placement policies are applied by the Sort layer
    /// on top of this.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Less,
            (_, Value::Null) => Ordering::Greater,
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Integer(a), Value::Float(b)) => float_cmp(*a as f64, *b),
            (Value::Float(a), Value::Integer(b)) => float_cmp(*a, *b as f64),
            (Value::Float(a), Value::Float(b)) => float_cmp(*a, *b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            _ => self.type_order().cmp(&other.type_order()),
        }
    }

    /// Returns a type ordering tag for comparing values of different kinds.
    fn type_order(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Boolean(_) => 1,
            Value::Integer(_) => 2,
            Value::Float(_) => 2,
            Value::Text(_) => 3,
            Value::Date(_) => 4,
        }
    }
}

/// Float ordering with NaN greater than every other value.
fn float_cmp(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

fn integer_arith(op: ArithOp, x: i64, y: i64) -> Result<Value> {
    let out = match op {
        ArithOp::Add => x.checked_add(y),
        ArithOp::Sub => x.checked_sub(y),
        ArithOp::Mul => x.checked_mul(y),
        ArithOp::Div => {
            if y == 0 {
                return Err(Error::invalid_operation("division by zero"));
            }
            x.checked_div(y)
        }
        ArithOp::Mod => {
            if y == 0 {
                return Err(Error::invalid_operation("division by zero"));
            }
            x.checked_rem(y)
        }
    };
    out.map(Value::Integer)
        .ok_or_else(|| Error::invalid_operation("integer overflow"))
}

fn float_arith(op: ArithOp, x: f64, y: f64) -> Result<Value> {
    let out = match op {
        ArithOp::Add => x + y,
        ArithOp::Sub => x - y,
        ArithOp::Mul => x * y,
        ArithOp::Div => {
            if y == 0.0 {
                return Err(Error::invalid_operation("division by zero"));
            }
            x / y
        }
        ArithOp::Mod => {
            if y == 0.0 {
                return Err(Error::invalid_operation("division by zero"));
            }
            x % y
        }
    };
    Ok(Value::Float(out))
}

/// Grouping equality: Null equals Null and NaN equals NaN, so values can
/// key GROUP BY partitions, DISTINCT passes, and hash join maps. SQL
/// comparison semantics live in `compare`, not here.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => {
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Boolean(b) => b.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Text(s) => s.hash(state),
            Value::Date(d) => d.hash(state),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_check() {
        assert_eq!(Value::Integer(42).data_type(), Some(DataType::Integer));
        assert_eq!(Value::Null.data_type(), None);
        assert!(Value::Null.is_null());
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Boolean(true).as_bool(), Some(true));
        assert_eq!(Value::Integer(100).as_i64(), Some(100));
        assert_eq!(Value::Float(3.25).as_f64(), Some(3.25));
        assert_eq!(Value::Text("hello".into()).as_str(), Some("hello"));
        assert_eq!(Value::Date(19723).as_date(), Some(19723));
        assert_eq!(Value::Text("x".into()).as_i64(), None);
    }

    #[test]
    fn test_compare_null_is_unknown() {
        assert_eq!(
            Value::Null.compare(&Value::Integer(1)).unwrap(),
            Comparison::Unknown
        );
        assert_eq!(
            Value::Null.compare(&Value::Null).unwrap(),
            Comparison::Unknown
        );
    }

    #[test]
    fn test_compare_numeric_cross_kind() {
        assert_eq!(
            Value::Integer(2).compare(&Value::Float(2.5)).unwrap(),
            Comparison::Less
        );
        assert_eq!(
            Value::Float(3.0).compare(&Value::Integer(3)).unwrap(),
            Comparison::Equal
        );
    }

    #[test]
    fn test_compare_incompatible_kinds() {
        let err = Value::Text("a".into()).compare(&Value::Integer(1));
        assert!(matches!(err, Err(Error::TypeMismatch { .. })));
    }

    #[test]
    fn test_arithmetic_integer() {
        let v = Value::arithmetic(ArithOp::Add, &Value::Integer(2), &Value::Integer(3)).unwrap();
        assert_eq!(v, Value::Integer(5));
        let v = Value::arithmetic(ArithOp::Div, &Value::Integer(7), &Value::Integer(2)).unwrap();
        assert_eq!(v, Value::Integer(3));
        let v = Value::arithmetic(ArithOp::Mod, &Value::Integer(7), &Value::Integer(2)).unwrap();
        assert_eq!(v, Value::Integer(1));
    }

    #[test]
    fn test_arithmetic_widens_to_float() {
        let v = Value::arithmetic(ArithOp::Mul, &Value::Integer(2), &Value::Float(1.5)).unwrap();
        assert_eq!(v, Value::Float(3.0));
    }

    #[test]
    fn test_arithmetic_null_propagates() {
        let v = Value::arithmetic(ArithOp::Add, &Value::Null, &Value::Integer(1)).unwrap();
        assert!(v.is_null());
    }

    #[test]
    fn test_arithmetic_type_mismatch() {
        let err = Value::arithmetic(ArithOp::Add, &Value::Text("a".into()), &Value::Integer(1));
        assert!(matches!(err, Err(Error::TypeMismatch { .. })));
    }

    #[test]
    fn test_division_by_zero() {
        let err = Value::arithmetic(ArithOp::Div, &Value::Integer(1), &Value::Integer(0));
        assert!(matches!(err, Err(Error::InvalidOperation { .. })));
    }

    #[test]
    fn test_date_arithmetic() {
        let v = Value::arithmetic(ArithOp::Add, &Value::Date(100), &Value::Integer(7)).unwrap();
        assert_eq!(v, Value::Date(107));
        let v = Value::arithmetic(ArithOp::Sub, &Value::Date(107), &Value::Date(100)).unwrap();
        assert_eq!(v, Value::Integer(7));
    }

    #[test]
    fn test_grouping_equality() {
        assert_eq!(Value::Null, Value::Null);
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_ne!(Value::Integer(1), Value::Float(1.0));
    }

    #[test]
    fn test_total_cmp() {
        assert_eq!(
            Value::Null.total_cmp(&Value::Integer(0)),
            Ordering::Less
        );
        assert_eq!(
            Value::Integer(1).total_cmp(&Value::Float(1.5)),
            Ordering::Less
        );
        assert_eq!(
            Value::Text("b".into()).total_cmp(&Value::Text("a".into())),
            Ordering::Greater
        );
    }

    #[test]
    fn test_negate() {
        assert_eq!(Value::Integer(5).negate().unwrap(), Value::Integer(-5));
        assert!(Value::Null.negate().unwrap().is_null());
        assert!(Value::Text("x".into()).negate().is_err());
    }
}

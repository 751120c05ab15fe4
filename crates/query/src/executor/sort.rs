//! Sort operator.

use crate::ast::{NullOrdering, SortOrder};
use crate::bind::BoundSortKey;
use crate::context::ExecCtx;
use crate::eval::eval;
use crate::executor::Operator;
use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cmp::Ordering;
use tern_core::{Result, Row, Value};

/// Stable sort over the fully materialized input.
///
/// Ties keep their input order, so sorting twice by the same keys is a
/// no-op and secondary orderings survive a later sort on other keys.
pub struct SortOp {
    input: Box<dyn Operator>,
    keys: Vec<BoundSortKey>,
    outer: Rc<Vec<Row>>,
    ctx: Rc<ExecCtx>,
    sorted: Vec<Row>,
    pos: usize,
}

impl SortOp {
    pub fn new(
        input: Box<dyn Operator>,
        keys: Vec<BoundSortKey>,
        outer: Rc<Vec<Row>>,
        ctx: Rc<ExecCtx>,
    ) -> Self {
        Self {
            input,
            keys,
            outer,
            ctx,
            sorted: Vec::new(),
            pos: 0,
        }
    }
}

/// Orders two key values under one sort key. Null placement is
/// absolute: a `nulls` choice applies the same way for Asc and Desc.
pub(crate) fn compare_key_values(key: &BoundSortKey, a: &Value, b: &Value) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => {
            return match key.nulls {
                NullOrdering::First => Ordering::Less,
                NullOrdering::Last => Ordering::Greater,
            }
        }
        (false, true) => {
            return match key.nulls {
                NullOrdering::First => Ordering::Greater,
                NullOrdering::Last => Ordering::Less,
            }
        }
        (false, false) => {}
    }
    let ord = a.total_cmp(b);
    match key.order {
        SortOrder::Asc => ord,
        SortOrder::Desc => ord.reverse(),
    }
}

/// Orders two precomputed key vectors lexicographically.
pub(crate) fn compare_key_vecs(keys: &[BoundSortKey], a: &[Value], b: &[Value]) -> Ordering {
    for (key, (va, vb)) in keys.iter().zip(a.iter().zip(b.iter())) {
        let ord = compare_key_values(key, va, vb);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

impl Operator for SortOp {
    fn open(&mut self) -> Result<()> {
        self.input.open()?;
        let mut decorated: Vec<(Vec<Value>, Row)> = Vec::new();
        while let Some(row) = self.input.next()? {
            let mut key_values = Vec::with_capacity(self.keys.len());
            for key in &self.keys {
                key_values.push(eval(&key.expr, &row, &self.outer, &self.ctx)?);
            }
            decorated.push((key_values, row));
        }
        decorated.sort_by(|(a, _), (b, _)| compare_key_vecs(&self.keys, a, b));
        self.sorted = decorated.into_iter().map(|(_, row)| row).collect();
        self.pos = 0;
        Ok(())
    }

    fn next(&mut self) -> Result<Option<Row>> {
        match self.sorted.get(self.pos) {
            Some(row) => {
                self.pos += 1;
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    fn close(&mut self) {
        self.sorted.clear();
        self.pos = 0;
        self.input.close();
    }
}

//! Window function operator.

use crate::ast::{Frame, FrameBound};
use crate::bind::{BoundWindowCall, BoundWindowFunc};
use crate::context::ExecCtx;
use crate::eval::eval;
use crate::executor::aggregate::compute_aggregate;
use crate::executor::sort::compare_key_vecs;
use crate::executor::Operator;
use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use hashbrown::HashMap;
use tern_core::{Result, Row, Value};

/// Appends one column per window call without collapsing rows.
///
/// The input is fully materialized. Output rows keep the input order;
/// partitioning and ordering only affect the computed values.
pub struct WindowOp {
    input: Box<dyn Operator>,
    calls: Vec<BoundWindowCall>,
    outer: Rc<Vec<Row>>,
    ctx: Rc<ExecCtx>,
    output: Vec<Row>,
    pos: usize,
}

impl WindowOp {
    pub fn new(
        input: Box<dyn Operator>,
        calls: Vec<BoundWindowCall>,
        outer: Rc<Vec<Row>>,
        ctx: Rc<ExecCtx>,
    ) -> Self {
        Self {
            input,
            calls,
            outer,
            ctx,
            output: Vec::new(),
            pos: 0,
        }
    }

    fn compute_call(&self, call: &BoundWindowCall, rows: &[Row]) -> Result<Vec<Value>> {
        // Partitions in first-seen order; keys use grouping equality.
        let mut index: HashMap<Vec<Value>, usize> = HashMap::new();
        let mut partitions: Vec<Vec<usize>> = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            let mut key = Vec::with_capacity(call.partition_by.len());
            for expr in &call.partition_by {
                key.push(eval(expr, row, &self.outer, &self.ctx)?);
            }
            match index.get(&key) {
                Some(&p) => partitions[p].push(i),
                None => {
                    index.insert(key, partitions.len());
                    partitions.push(alloc::vec![i]);
                }
            }
        }

        let mut out = alloc::vec![Value::Null; rows.len()];
        for partition in &partitions {
            // Stable sort of the partition by the call's ORDER BY keys.
            let mut decorated: Vec<(Vec<Value>, usize)> = Vec::with_capacity(partition.len());
            for &i in partition {
                let mut key = Vec::with_capacity(call.order_by.len());
                for sk in &call.order_by {
                    key.push(eval(&sk.expr, &rows[i], &self.outer, &self.ctx)?);
                }
                decorated.push((key, i));
            }
            decorated.sort_by(|(a, _), (b, _)| compare_key_vecs(&call.order_by, a, b));
            self.fill_partition(call, rows, &decorated, &mut out)?;
        }
        Ok(out)
    }

    fn fill_partition(
        &self,
        call: &BoundWindowCall,
        rows: &[Row],
        sorted: &[(Vec<Value>, usize)],
        out: &mut [Value],
    ) -> Result<()> {
        let m = sorted.len();
        match &call.func {
            BoundWindowFunc::RowNumber => {
                for (p, (_, i)) in sorted.iter().enumerate() {
                    out[*i] = Value::Integer(p as i64 + 1);
                }
            }
            BoundWindowFunc::Rank => {
                for (p, rank) in ranks(sorted, &call.order_by).into_iter().enumerate() {
                    out[sorted[p].1] = Value::Integer(rank as i64);
                }
            }
            BoundWindowFunc::DenseRank => {
                let mut dense = 0usize;
                for p in 0..m {
                    if p == 0 || !peers(sorted, &call.order_by, p, p - 1) {
                        dense += 1;
                    }
                    out[sorted[p].1] = Value::Integer(dense as i64);
                }
            }
            BoundWindowFunc::PercentRank => {
                for (p, rank) in ranks(sorted, &call.order_by).into_iter().enumerate() {
                    let v = if m <= 1 {
                        0.0
                    } else {
                        (rank - 1) as f64 / (m - 1) as f64
                    };
                    out[sorted[p].1] = Value::Float(v);
                }
            }
            BoundWindowFunc::Ntile(buckets) => {
                // Earlier buckets absorb the remainder rows.
                let q = m / buckets;
                let r = m % buckets;
                for p in 0..m {
                    let bucket = if p < r * (q + 1) {
                        p / (q + 1)
                    } else {
                        r + (p - r * (q + 1)) / q.max(1)
                    };
                    out[sorted[p].1] = Value::Integer(bucket as i64 + 1);
                }
            }
            BoundWindowFunc::Lag { expr, offset } => {
                for p in 0..m {
                    out[sorted[p].1] = match p.checked_sub(*offset) {
                        Some(src) => eval(expr, &rows[sorted[src].1], &self.outer, &self.ctx)?,
                        None => Value::Null,
                    };
                }
            }
            BoundWindowFunc::Lead { expr, offset } => {
                for p in 0..m {
                    let src = p + offset;
                    out[sorted[p].1] = if src < m {
                        eval(expr, &rows[sorted[src].1], &self.outer, &self.ctx)?
                    } else {
                        Value::Null
                    };
                }
            }
            BoundWindowFunc::FirstValue(expr) => {
                for p in 0..m {
                    out[sorted[p].1] = match frame_range(&call.frame, p, m) {
                        Some((start, _)) => {
                            eval(expr, &rows[sorted[start].1], &self.outer, &self.ctx)?
                        }
                        None => Value::Null,
                    };
                }
            }
            BoundWindowFunc::LastValue(expr) => {
                for p in 0..m {
                    out[sorted[p].1] = match frame_range(&call.frame, p, m) {
                        Some((_, end)) => {
                            eval(expr, &rows[sorted[end].1], &self.outer, &self.ctx)?
                        }
                        None => Value::Null,
                    };
                }
            }
            BoundWindowFunc::Aggregate { func, arg } => {
                for p in 0..m {
                    let frame_rows: Vec<Row> = match frame_range(&call.frame, p, m) {
                        Some((start, end)) => (start..=end)
                            .map(|q| rows[sorted[q].1].clone())
                            .collect(),
                        None => Vec::new(),
                    };
                    out[sorted[p].1] = compute_aggregate(
                        func,
                        arg.as_ref(),
                        false,
                        None,
                        &frame_rows,
                        &self.outer,
                        &self.ctx,
                    )?;
                }
            }
        }
        Ok(())
    }
}

/// True when the sorted rows at positions `a` and `b` are ORDER BY peers.
fn peers(
    sorted: &[(Vec<Value>, usize)],
    keys: &[crate::bind::BoundSortKey],
    a: usize,
    b: usize,
) -> bool {
    compare_key_vecs(keys, &sorted[a].0, &sorted[b].0) == core::cmp::Ordering::Equal
}

/// Standard competition ranks: peers share a rank, the next distinct
/// value jumps past them.
fn ranks(sorted: &[(Vec<Value>, usize)], keys: &[crate::bind::BoundSortKey]) -> Vec<usize> {
    let mut out = Vec::with_capacity(sorted.len());
    for p in 0..sorted.len() {
        if p > 0 && peers(sorted, keys, p, p - 1) {
            let prev = out[p - 1];
            out.push(prev);
        } else {
            out.push(p + 1);
        }
    }
    out
}

/// Resolves a ROWS frame to inclusive sorted-partition positions, or
/// None for an empty frame.
fn frame_range(frame: &Frame, p: usize, m: usize) -> Option<(usize, usize)> {
    if m == 0 {
        return None;
    }
    let start = match frame.start {
        FrameBound::UnboundedPreceding => 0,
        FrameBound::Preceding(k) => p.saturating_sub(k),
        FrameBound::CurrentRow => p,
        FrameBound::Following(k) => p + k,
        FrameBound::UnboundedFollowing => m,
    };
    let end = match frame.end {
        FrameBound::UnboundedPreceding => return None,
        FrameBound::Preceding(k) => p.checked_sub(k)?,
        FrameBound::CurrentRow => p,
        FrameBound::Following(k) => (p + k).min(m - 1),
        FrameBound::UnboundedFollowing => m - 1,
    };
    if start >= m || start > end {
        return None;
    }
    Some((start, end))
}

impl Operator for WindowOp {
    fn open(&mut self) -> Result<()> {
        self.input.open()?;
        let mut rows = Vec::new();
        while let Some(row) = self.input.next()? {
            rows.push(row);
        }
        let mut columns = Vec::with_capacity(self.calls.len());
        for call in &self.calls {
            columns.push(self.compute_call(call, &rows)?);
        }
        self.output = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                let mut values = row.into_values();
                for col in &columns {
                    values.push(col[i].clone());
                }
                Row::new(values)
            })
            .collect();
        self.pos = 0;
        Ok(())
    }

    fn next(&mut self) -> Result<Option<Row>> {
        match self.output.get(self.pos) {
            Some(row) => {
                self.pos += 1;
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    fn close(&mut self) {
        self.output.clear();
        self.pos = 0;
        self.input.close();
    }
}

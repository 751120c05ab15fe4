//! Grouping and aggregation operator.

use crate::ast::AggregateFunc;
use crate::bind::{BoundAggregateCall, BoundExpr};
use crate::context::ExecCtx;
use crate::eval::{eval, eval_truth};
use crate::executor::Operator;
use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::{HashMap, HashSet};
use tern_core::{ArithOp, Comparison, Error, Result, Row, Value};

/// Hash aggregation over the fully materialized input.
///
/// Groups appear in first-seen input order. Group keys use grouping
/// equality, so Null keys form one group and NaN keys another. Without
/// group keys the operator always emits exactly one row, even for empty
/// input. HAVING is applied to the output rows, after aggregation.
pub struct AggregateOp {
    input: Box<dyn Operator>,
    group_by: Vec<BoundExpr>,
    aggregates: Vec<BoundAggregateCall>,
    having: Option<BoundExpr>,
    outer: Rc<Vec<Row>>,
    ctx: Rc<ExecCtx>,
    output: Vec<Row>,
    pos: usize,
}

impl AggregateOp {
    pub fn new(
        input: Box<dyn Operator>,
        group_by: Vec<BoundExpr>,
        aggregates: Vec<BoundAggregateCall>,
        having: Option<BoundExpr>,
        outer: Rc<Vec<Row>>,
        ctx: Rc<ExecCtx>,
    ) -> Self {
        Self {
            input,
            group_by,
            aggregates,
            having,
            outer,
            ctx,
            output: Vec::new(),
            pos: 0,
        }
    }

    fn compute(&mut self) -> Result<Vec<Row>> {
        let mut index: HashMap<Vec<Value>, usize> = HashMap::new();
        let mut groups: Vec<(Vec<Value>, Vec<Row>)> = Vec::new();

        while let Some(row) = self.input.next()? {
            let mut key = Vec::with_capacity(self.group_by.len());
            for expr in &self.group_by {
                key.push(eval(expr, &row, &self.outer, &self.ctx)?);
            }
            match index.get(&key) {
                Some(&i) => groups[i].1.push(row),
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push((key, alloc::vec![row]));
                }
            }
        }
        // A global aggregate emits one row even over no input.
        if groups.is_empty() && self.group_by.is_empty() {
            groups.push((Vec::new(), Vec::new()));
        }

        let mut output = Vec::with_capacity(groups.len());
        for (key, rows) in groups {
            let mut values = key;
            for call in &self.aggregates {
                values.push(compute_aggregate(
                    &call.func,
                    call.arg.as_ref(),
                    call.distinct,
                    call.filter.as_ref(),
                    &rows,
                    &self.outer,
                    &self.ctx,
                )?);
            }
            let out_row = Row::new(values);
            if let Some(having) = &self.having {
                if !eval_truth(having, &out_row, &self.outer, &self.ctx)?.is_true() {
                    continue;
                }
            }
            output.push(out_row);
        }
        Ok(output)
    }
}

impl Operator for AggregateOp {
    fn open(&mut self) -> Result<()> {
        self.input.open()?;
        self.output = self.compute()?;
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

/// Computes one aggregate over a slice of rows. Shared by the Aggregate
/// operator and aggregate-as-window evaluation.
pub(crate) fn compute_aggregate(
    func: &AggregateFunc,
    arg: Option<&BoundExpr>,
    distinct: bool,
    filter: Option<&BoundExpr>,
    rows: &[Row],
    outer: &Rc<Vec<Row>>,
    ctx: &Rc<ExecCtx>,
) -> Result<Value> {
    let mut star_count: i64 = 0;
    let mut values: Vec<Value> = Vec::new();
    let mut seen: HashSet<Value> = HashSet::new();

    for row in rows {
        if let Some(predicate) = filter {
            if !eval_truth(predicate, row, outer, ctx)?.is_true() {
                continue;
            }
        }
        match arg {
            None => star_count += 1,
            Some(expr) => {
                let v = eval(expr, row, outer, ctx)?;
                if v.is_null() {
                    continue;
                }
                if distinct && !seen.insert(v.clone()) {
                    continue;
                }
                values.push(v);
            }
        }
    }

    match func {
        AggregateFunc::Count => Ok(Value::Integer(if arg.is_none() {
            star_count
        } else {
            values.len() as i64
        })),
        AggregateFunc::Sum => {
            let mut acc: Option<Value> = None;
            for v in &values {
                acc = Some(match acc {
                    None => v.clone(),
                    Some(prev) => Value::arithmetic(ArithOp::Add, &prev, v)?,
                });
            }
            Ok(acc.unwrap_or(Value::Null))
        }
        AggregateFunc::Avg => {
            if values.is_empty() {
                return Ok(Value::Null);
            }
            let mut sum = 0.0f64;
            for v in &values {
                sum += numeric(v, "AVG")?;
            }
            Ok(Value::Float(sum / values.len() as f64))
        }
        AggregateFunc::Min => fold_extreme(&values, Comparison::Less),
        AggregateFunc::Max => fold_extreme(&values, Comparison::Greater),
        AggregateFunc::StringAgg { separator } => {
            if values.is_empty() {
                return Ok(Value::Null);
            }
            let mut out = String::new();
            for (i, v) in values.iter().enumerate() {
                let s = v.as_str().ok_or_else(|| {
                    Error::type_mismatch("STRING_AGG", v.data_type(), None)
                })?;
                if i > 0 {
                    out.push_str(separator);
                }
                out.push_str(s);
            }
            Ok(Value::Text(out))
        }
        AggregateFunc::BoolAnd => fold_bool(&values, "BOOL_AND", |acc, b| acc && b),
        AggregateFunc::BoolOr => fold_bool(&values, "BOOL_OR", |acc, b| acc || b),
    }
}

fn numeric(v: &Value, op: &str) -> Result<f64> {
    match v {
        Value::Integer(i) => Ok(*i as f64),
        Value::Float(f) => Ok(*f),
        other => Err(Error::type_mismatch(op, other.data_type(), None)),
    }
}

fn fold_extreme(values: &[Value], keep: Comparison) -> Result<Value> {
    let mut best: Option<Value> = None;
    for v in values {
        best = Some(match best {
            None => v.clone(),
            Some(current) => {
                if v.compare(&current)? == keep {
                    v.clone()
                } else {
                    current
                }
            }
        });
    }
    Ok(best.unwrap_or(Value::Null))
}

fn fold_bool(values: &[Value], op: &str, combine: fn(bool, bool) -> bool) -> Result<Value> {
    let mut acc: Option<bool> = None;
    for v in values {
        let b = v
            .as_bool()
            .ok_or_else(|| Error::type_mismatch(op, v.data_type(), None))?;
        acc = Some(match acc {
            None => b,
            Some(prev) => combine(prev, b),
        });
    }
    Ok(acc.map(Value::Boolean).unwrap_or(Value::Null))
}

//! Union, intersect, and except operators.

use crate::ast::SetOpKind;
use crate::executor::Operator;
use alloc::boxed::Box;
use alloc::vec::Vec;
use hashbrown::{HashMap, HashSet};
use tern_core::{Result, Row};

/// Combines two inputs of matching arity.
///
/// Both sides are materialized at open. Rows compare by grouping
/// equality. Distinct variants emit first occurrences in left-then-right
/// order; ALL variants use bag semantics with multiplicity counts.
pub struct SetOpOp {
    left: Box<dyn Operator>,
    right: Box<dyn Operator>,
    kind: SetOpKind,
    all: bool,
    output: Vec<Row>,
    pos: usize,
}

impl SetOpOp {
    pub fn new(
        left: Box<dyn Operator>,
        right: Box<dyn Operator>,
        kind: SetOpKind,
        all: bool,
    ) -> Self {
        Self {
            left,
            right,
            kind,
            all,
            output: Vec::new(),
            pos: 0,
        }
    }

    fn compute(&mut self) -> Result<Vec<Row>> {
        let mut left_rows = Vec::new();
        while let Some(row) = self.left.next()? {
            left_rows.push(row);
        }
        let mut right_rows = Vec::new();
        while let Some(row) = self.right.next()? {
            right_rows.push(row);
        }

        let output = match (self.kind, self.all) {
            (SetOpKind::Union, true) => {
                left_rows.extend(right_rows);
                left_rows
            }
            (SetOpKind::Union, false) => {
                let mut seen = HashSet::new();
                left_rows
                    .into_iter()
                    .chain(right_rows)
                    .filter(|row| seen.insert(row.clone()))
                    .collect()
            }
            (SetOpKind::Intersect, true) => {
                let mut counts = multiplicities(right_rows);
                let mut out = Vec::new();
                for row in left_rows {
                    if let Some(count) = counts.get_mut(&row) {
                        if *count > 0 {
                            *count -= 1;
                            out.push(row);
                        }
                    }
                }
                out
            }
            (SetOpKind::Intersect, false) => {
                let members: HashSet<Row> = right_rows.into_iter().collect();
                let mut seen = HashSet::new();
                left_rows
                    .into_iter()
                    .filter(|row| members.contains(row) && seen.insert(row.clone()))
                    .collect()
            }
            (SetOpKind::Except, true) => {
                let mut counts = multiplicities(right_rows);
                let mut out = Vec::new();
                for row in left_rows {
                    match counts.get_mut(&row) {
                        Some(count) if *count > 0 => *count -= 1,
                        _ => out.push(row),
                    }
                }
                out
            }
            (SetOpKind::Except, false) => {
                let members: HashSet<Row> = right_rows.into_iter().collect();
                let mut seen = HashSet::new();
                left_rows
                    .into_iter()
                    .filter(|row| !members.contains(row) && seen.insert(row.clone()))
                    .collect()
            }
        };
        Ok(output)
    }
}

fn multiplicities(rows: Vec<Row>) -> HashMap<Row, usize> {
    let mut counts: HashMap<Row, usize> = HashMap::new();
    for row in rows {
        *counts.entry(row).or_insert(0) += 1;
    }
    counts
}

impl Operator for SetOpOp {
    fn open(&mut self) -> Result<()> {
        self.left.open()?;
        self.right.open()?;
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
        self.left.close();
        self.right.close();
    }
}

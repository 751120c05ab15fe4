//! Hash join for equi-join conditions.

use crate::ast::JoinKind;
use crate::executor::join::key_of;
use crate::executor::Operator;
use alloc::boxed::Box;
use alloc::vec::Vec;
use hashbrown::HashMap;
use tern_core::{Result, Row, Value};

/// Build-and-probe join on equality key columns.
///
/// The build side is materialized into a hash table at open: the right
/// side for Inner, Left, Semi, and Anti, the left side for Right. Rows
/// with a Null key cell are left out of the table and never match a
/// probe, and a Null probe key matches nothing.
pub struct HashJoin {
    left: Box<dyn Operator>,
    right: Box<dyn Operator>,
    kind: JoinKind,
    left_keys: Vec<usize>,
    right_keys: Vec<usize>,
    left_width: usize,
    right_width: usize,
    table: HashMap<Vec<Value>, Vec<Row>>,
    pending: Vec<Row>,
    pending_pos: usize,
}

impl HashJoin {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        left: Box<dyn Operator>,
        right: Box<dyn Operator>,
        kind: JoinKind,
        left_keys: Vec<usize>,
        right_keys: Vec<usize>,
        left_width: usize,
        right_width: usize,
    ) -> Self {
        Self {
            left,
            right,
            kind,
            left_keys,
            right_keys,
            left_width,
            right_width,
            table: HashMap::new(),
            pending: Vec::new(),
            pending_pos: 0,
        }
    }

    fn build_side(&mut self) -> Result<()> {
        self.table.clear();
        match self.kind {
            JoinKind::Right => {
                while let Some(row) = self.left.next()? {
                    if let Some(key) = key_of(&row, &self.left_keys) {
                        self.table.entry(key).or_default().push(row);
                    }
                }
            }
            _ => {
                while let Some(row) = self.right.next()? {
                    if let Some(key) = key_of(&row, &self.right_keys) {
                        self.table.entry(key).or_default().push(row);
                    }
                }
            }
        }
        Ok(())
    }

    fn probe_key(&self, row: &Row) -> Option<Vec<Value>> {
        match self.kind {
            JoinKind::Right => key_of(row, &self.right_keys),
            _ => key_of(row, &self.left_keys),
        }
    }
}

impl Operator for HashJoin {
    fn open(&mut self) -> Result<()> {
        self.left.open()?;
        self.right.open()?;
        self.build_side()?;
        self.pending.clear();
        self.pending_pos = 0;
        Ok(())
    }

    fn next(&mut self) -> Result<Option<Row>> {
        loop {
            if self.pending_pos < self.pending.len() {
                let row = self.pending[self.pending_pos].clone();
                self.pending_pos += 1;
                return Ok(Some(row));
            }
            self.pending.clear();
            self.pending_pos = 0;

            let streamed = match self.kind {
                JoinKind::Right => self.right.next()?,
                _ => self.left.next()?,
            };
            let streamed = match streamed {
                Some(row) => row,
                None => return Ok(None),
            };

            let key = self.probe_key(&streamed);
            let matches = match &key {
                Some(key) => self.table.get(key),
                None => None,
            };
            match self.kind {
                JoinKind::Inner => {
                    if let Some(rows) = matches {
                        self.pending = rows.iter().map(|r| streamed.concat(r)).collect();
                    }
                }
                JoinKind::Left => match matches {
                    Some(rows) => {
                        self.pending = rows.iter().map(|r| streamed.concat(r)).collect();
                    }
                    None => return Ok(Some(streamed.pad_right(self.right_width))),
                },
                JoinKind::Right => match matches {
                    Some(rows) => {
                        self.pending = rows.iter().map(|r| r.concat(&streamed)).collect();
                    }
                    None => return Ok(Some(streamed.pad_left(self.left_width))),
                },
                JoinKind::Semi => {
                    if matches.is_some() {
                        return Ok(Some(streamed));
                    }
                }
                JoinKind::Anti => {
                    if matches.is_none() {
                        return Ok(Some(streamed));
                    }
                }
            }
        }
    }

    fn close(&mut self) {
        self.table.clear();
        self.pending.clear();
        self.pending_pos = 0;
        self.left.close();
        self.right.close();
    }
}

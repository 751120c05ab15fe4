//! Join operators.
//!
//! Inner, Left, and Right joins emit the concatenated left-then-right
//! row; Semi and Anti joins emit only the left row. A key containing
//! Null never matches, so an Anti join emits left rows whose keys are
//! Null, mirroring three-valued comparison semantics.

mod hash;
mod nested;

pub use hash::HashJoin;
pub use nested::NestedLoopJoin;

use alloc::vec::Vec;
use tern_core::{Row, Value};

/// Extracts the join key columns of a row, or None when any key cell is
/// Null. Null keys are excluded from both build and probe.
fn key_of(row: &Row, keys: &[usize]) -> Option<Vec<Value>> {
    let mut out = Vec::with_capacity(keys.len());
    for &i in keys {
        let v = row.get(i)?;
        if v.is_null() {
            return None;
        }
        out.push(v.clone());
    }
    Some(out)
}

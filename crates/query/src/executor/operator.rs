//! Pull-based operator interface.

use tern_core::{Result, Row};

/// A query operator in a pull-based pipeline.
///
/// Lifecycle: `open` acquires state, `next` yields rows until `None`,
/// `close` releases state. `open` after `close` restarts the operator
/// from the beginning, which subquery re-execution relies on. Callers
/// must invoke `close` on every exit path, including errors.
pub trait Operator {
    /// Prepares the operator for producing rows.
    fn open(&mut self) -> Result<()>;

    /// Produces the next row, or `None` when exhausted.
    fn next(&mut self) -> Result<Option<Row>>;

    /// Releases state. Infallible, and safe to call more than once.
    fn close(&mut self);
}

//! Execution context: table snapshots, CTE state, and run options.
//!
//! An `ExecCtx` is created per query execution and shared by every
//! operator in the pipeline, including the fresh pipelines built for
//! subquery evaluation. Table contents are snapshotted up front so a
//! query sees one consistent state however many times a scan reopens.

use crate::bind::BoundCte;
use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::sync::atomic::{AtomicBool, Ordering};
use tern_core::{Error, Result, Row};
use tern_storage::Catalog;

/// Options controlling query execution.
#[derive(Clone, Default)]
pub struct ExecOptions {
    /// Iteration cap for recursive CTE evaluation. Zero means the
    /// default of [`ExecOptions::DEFAULT_RECURSION_LIMIT`].
    pub recursion_limit: usize,
    /// Cooperative cancellation flag, checked between root-level rows.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl ExecOptions {
    /// Default recursive CTE iteration cap.
    pub const DEFAULT_RECURSION_LIMIT: usize = 1000;

    /// Returns the effective recursion limit.
    pub fn effective_recursion_limit(&self) -> usize {
        if self.recursion_limit == 0 {
            Self::DEFAULT_RECURSION_LIMIT
        } else {
            self.recursion_limit
        }
    }
}

struct CteEntry {
    def: Rc<BoundCte>,
    /// Outer rows captured where the defining With scope was built, so
    /// a CTE under a correlated subquery sees the right outer row.
    outer: Rc<Vec<Row>>,
    cache: Option<Rc<Vec<Row>>>,
}

/// Shared state for one query execution.
pub struct ExecCtx {
    tables: BTreeMap<String, Rc<Vec<Rc<Row>>>>,
    ctes: RefCell<BTreeMap<usize, CteEntry>>,
    /// Per-iteration frontier rows of recursive CTEs being evaluated.
    frontier: RefCell<BTreeMap<usize, Rc<Vec<Row>>>>,
    options: ExecOptions,
}

impl ExecCtx {
    /// Snapshots the catalog and creates a context.
    pub fn new(catalog: &Catalog, options: ExecOptions) -> Self {
        let tables = catalog
            .table_names()
            .iter()
            .filter_map(|name| {
                catalog
                    .get(name)
                    .ok()
                    .map(|store| (name.to_string(), Rc::new(store.snapshot())))
            })
            .collect();
        Self {
            tables,
            ctes: RefCell::new(BTreeMap::new()),
            frontier: RefCell::new(BTreeMap::new()),
            options,
        }
    }

    /// Returns the snapshot of a table.
    pub fn table(&self, name: &str) -> Result<Rc<Vec<Rc<Row>>>> {
        self.tables
            .get(name)
            .cloned()
            .ok_or_else(|| Error::table_not_found(name))
    }

    /// Returns the effective recursion limit.
    pub fn recursion_limit(&self) -> usize {
        self.options.effective_recursion_limit()
    }

    /// Fails with `Cancelled` if the cancel flag has been raised.
    pub fn check_cancelled(&self) -> Result<()> {
        if let Some(flag) = &self.options.cancel {
            if flag.load(Ordering::Relaxed) {
                return Err(Error::Cancelled);
            }
        }
        Ok(())
    }

    /// Registers CTE definitions from a With scope. Re-registration
    /// (a With scope rebuilt per subquery invocation) resets any cached
    /// materialization so correlated CTEs re-evaluate.
    pub(crate) fn register_ctes(&self, defs: &[Rc<BoundCte>], outer: &Rc<Vec<Row>>) {
        let mut ctes = self.ctes.borrow_mut();
        for def in defs {
            ctes.insert(
                def.id,
                CteEntry {
                    def: def.clone(),
                    outer: outer.clone(),
                    cache: None,
                },
            );
        }
    }

    /// Returns the definition and captured outer rows of a registered CTE.
    pub(crate) fn cte_def(&self, id: usize) -> Result<(Rc<BoundCte>, Rc<Vec<Row>>)> {
        let ctes = self.ctes.borrow();
        let entry = ctes
            .get(&id)
            .ok_or_else(|| Error::invalid_plan("CTE referenced outside its scope"))?;
        Ok((entry.def.clone(), entry.outer.clone()))
    }

    /// Returns cached materialized rows of a CTE, if present.
    pub(crate) fn cte_cache(&self, id: usize) -> Option<Rc<Vec<Row>>> {
        self.ctes.borrow().get(&id).and_then(|e| e.cache.clone())
    }

    /// Stores materialized rows of a CTE.
    pub(crate) fn store_cte(&self, id: usize, rows: Rc<Vec<Row>>) {
        if let Some(entry) = self.ctes.borrow_mut().get_mut(&id) {
            entry.cache = Some(rows);
        }
    }

    /// Sets the frontier rows of a recursive CTE for the next step.
    pub(crate) fn set_frontier(&self, id: usize, rows: Rc<Vec<Row>>) {
        self.frontier.borrow_mut().insert(id, rows);
    }

    /// Clears the frontier slot after the fixed point is reached.
    pub(crate) fn clear_frontier(&self, id: usize) {
        self.frontier.borrow_mut().remove(&id);
    }

    /// Returns the current frontier rows of a recursive CTE.
    pub(crate) fn frontier(&self, id: usize) -> Result<Rc<Vec<Row>>> {
        self.frontier
            .borrow()
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::invalid_plan("recursive CTE step evaluated outside fixed point"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use tern_core::schema::TableBuilder;
    use tern_core::{DataType, Value};

    #[test]
    fn test_snapshot_is_stable() {
        let mut catalog = Catalog::new();
        catalog
            .create_table(
                TableBuilder::new("t")
                    .unwrap()
                    .add_column("x", DataType::Integer)
                    .unwrap()
                    .build()
                    .unwrap(),
            )
            .unwrap();
        catalog
            .insert_rows("t", vec![Row::new(vec![Value::Integer(1)])])
            .unwrap();

        let ctx = ExecCtx::new(&catalog, ExecOptions::default());
        catalog
            .insert_rows("t", vec![Row::new(vec![Value::Integer(2)])])
            .unwrap();

        assert_eq!(ctx.table("t").unwrap().len(), 1);
    }

    #[test]
    fn test_cancellation_flag() {
        let catalog = Catalog::new();
        let flag = Arc::new(AtomicBool::new(false));
        let ctx = ExecCtx::new(
            &catalog,
            ExecOptions {
                recursion_limit: 0,
                cancel: Some(flag.clone()),
            },
        );
        assert!(ctx.check_cancelled().is_ok());
        flag.store(true, Ordering::Relaxed);
        assert!(matches!(ctx.check_cancelled(), Err(Error::Cancelled)));
    }

    #[test]
    fn test_default_recursion_limit() {
        let options = ExecOptions::default();
        assert_eq!(
            options.effective_recursion_limit(),
            ExecOptions::DEFAULT_RECURSION_LIMIT
        );
    }
}

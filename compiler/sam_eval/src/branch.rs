//! Threads created by `FORK`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::Mutex;

use crate::interpreter::Outcome;

#[derive(Default)]
struct Registry {
    last_id: AtomicU64,
    running: Mutex<Vec<(u64, JoinHandle<Outcome>)>>,
}

/// Process-wide record of live branches. Clones share the record.
#[derive(Clone, Default)]
pub struct BranchRegistry {
    inner: Arc<Registry>,
}

impl BranchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the identifier for a new branch. Identifiers start at 1.
    pub fn next_id(&self) -> u64 {
        self.inner.last_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub(crate) fn register(&self, id: u64, handle: JoinHandle<Outcome>) {
        self.inner.running.lock().push((id, handle));
    }

    /// Wait for every branch, including branches started while waiting.
    ///
    /// Returns each branch's identifier and final outcome in start order.
    /// A branch that panicked is logged and left out.
    pub fn join_all(&self) -> Vec<(u64, Outcome)> {
        let mut finished = Vec::new();
        loop {
            let batch = std::mem::take(&mut *self.inner.running.lock());
            if batch.is_empty() {
                return finished;
            }
            for (id, handle) in batch {
                match handle.join() {
                    Ok(outcome) => finished.push((id, outcome)),
                    Err(_) => tracing::warn!(branch = id, "branch panicked"),
                }
            }
        }
    }
}

impl std::fmt::Debug for BranchRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BranchRegistry")
            .field("started", &self.inner.last_id.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

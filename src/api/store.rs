//! Published result snapshots addressable by handle.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::search::ResultSet;

/// Default number of result sets kept alive.
pub const DEFAULT_CAPACITY: usize = 16;

/// A bounded store of immutable result snapshots.
///
/// `/query` publishes each result set under a fresh handle that
/// `/export` redeems later. Snapshots are shared read-only, so a
/// concurrent query can never mutate a set an export is reading. Once
/// capacity is exceeded the oldest handle is dropped.
pub struct ResultStore {
    capacity: usize,
    inner: RwLock<VecDeque<(Uuid, Arc<ResultSet>)>>,
}

impl ResultStore {
    /// Create a store keeping at most `capacity` snapshots.
    pub fn new(capacity: usize) -> Self {
        ResultStore {
            capacity: capacity.max(1),
            inner: RwLock::new(VecDeque::new()),
        }
    }

    /// Publish a result set, returning its handle and the shared
    /// snapshot.
    pub fn publish(&self, results: ResultSet) -> (Uuid, Arc<ResultSet>) {
        let id = Uuid::new_v4();
        let results = Arc::new(results);

        let mut inner = self.inner.write();
        inner.push_back((id, Arc::clone(&results)));
        while inner.len() > self.capacity {
            inner.pop_front();
        }

        (id, results)
    }

    /// Look up a snapshot by handle.
    pub fn get(&self, id: Uuid) -> Option<Arc<ResultSet>> {
        self.inner
            .read()
            .iter()
            .find(|(stored, _)| *stored == id)
            .map(|(_, results)| Arc::clone(results))
    }

    /// The most recently published snapshot.
    pub fn latest(&self) -> Option<Arc<ResultSet>> {
        self.inner
            .read()
            .back()
            .map(|(_, results)| Arc::clone(results))
    }

    /// Number of live snapshots.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether nothing has been published yet.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl Default for ResultStore {
    fn default() -> Self {
        ResultStore::new(DEFAULT_CAPACITY)
    }
}

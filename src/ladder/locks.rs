//! Per-player mutexes with ordered pair acquisition.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

type LockTable = DashMap<Uuid, Arc<Mutex<()>>>;

/// One async mutex per player id. Entries exist only while some caller holds
/// or waits on them; the last guard to release a player evicts its entry.
#[derive(Debug, Default)]
pub struct PlayerLocks {
    locks: Arc<LockTable>,
}

/// Holds both players' locks until dropped.
#[derive(Debug)]
pub struct PairGuard {
    table: Arc<LockTable>,
    held: Vec<(Uuid, OwnedMutexGuard<()>)>,
}

impl Drop for PairGuard {
    fn drop(&mut self) {
        for (id, guard) in self.held.drain(..).rev() {
            drop(guard);
            // Only the table's own handle left: nobody holds or waits on it.
            self.table
                .remove_if(&id, |_, lock| Arc::strong_count(lock) == 1);
        }
    }
}

impl PlayerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&self, id: Uuid) -> Arc<Mutex<()>> {
        self.locks.entry(id).or_default().clone()
    }

    /// Lock a single player.
    pub async fn lock(&self, id: Uuid) -> PairGuard {
        self.lock_pair(id, id).await
    }

    /// Lock an unordered pair. Ids are always taken lowest first so two
    /// callers naming the same pair in opposite order cannot deadlock.
    pub async fn lock_pair(&self, a: Uuid, b: Uuid) -> PairGuard {
        let mut guard = PairGuard {
            table: Arc::clone(&self.locks),
            held: Vec::with_capacity(2),
        };

        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        guard.held.push((low, self.handle(low).lock_owned().await));
        if high != low {
            guard.held.push((high, self.handle(high).lock_owned().await));
        }
        guard
    }

    /// Whether a player's lock is currently held by someone.
    pub fn is_locked(&self, id: Uuid) -> bool {
        self.locks
            .get(&id)
            .map(|m| m.try_lock().is_err())
            .unwrap_or(false)
    }

    /// Number of players with a live lock entry.
    pub fn tracked(&self) -> usize {
        self.locks.len()
    }
}

//! `SharedRoster` — the registry's reader/writer lock.
//!
//! # Lock contract
//!
//! - Snapshots and other reads take the shared lock; any mutation of
//!   position, liveness, or membership takes the exclusive lock.
//! - The lock is **never** held across a wait on the encounter queue; the
//!   two locks are independent and acquired one at a time.
//! - Guards recover from poisoning: a worker that panicked mid-tick has
//!   already been caught and logged at its loop boundary, and every roster
//!   mutation leaves the invariants intact between statements, so the data
//!   under a poisoned lock is still coherent.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{Npc, Roster};

/// Cheaply clonable handle to the one roster shared by all workers.
#[derive(Clone)]
pub struct SharedRoster {
    inner: Arc<RwLock<Roster>>,
}

impl SharedRoster {
    pub fn new(roster: Roster) -> Self {
        Self { inner: Arc::new(RwLock::new(roster)) }
    }

    /// Shared (read) access.  Multiple concurrent readers are fine.
    pub fn read(&self) -> RwLockReadGuard<'_, Roster> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Exclusive (write) access.
    pub fn write(&self) -> RwLockWriteGuard<'_, Roster> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Point-in-time copy of the living roster, taken under the shared lock
    /// and valid after it is released.
    pub fn snapshot_alive(&self) -> Vec<Npc> {
        self.read().snapshot_alive()
    }
}

//! The producer/consumer channel between movement and combat.
//!
//! A plain FIFO under its own mutex, with a condition variable raised on
//! every push.  The consumer's wait is always time-bounded, so a stop
//! request is observed within one interval even if no producer ever signals
//! again; [`EncounterQueue::wake_all`] lets the driver cut the final wait
//! short at shutdown.
//!
//! The queue's lock is independent of the roster lock and is never held
//! while the roster lock is taken (or vice versa).

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::Duration;

use fray_core::NpcId;

/// A pending resolution: who attacks whom.
///
/// Transient by design — by the time it is popped, either side may have died
/// or moved on, and the resolver re-validates before acting.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Encounter {
    pub attacker: NpcId,
    pub defender: NpcId,
}

/// FIFO encounter channel with a bounded-wait consumer side.
#[derive(Default)]
pub struct EncounterQueue {
    inner:  Mutex<VecDeque<Encounter>>,
    signal: Condvar,
}

impl EncounterQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Encounter>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append an encounter and wake one waiting consumer.
    pub fn push(&self, encounter: Encounter) {
        self.lock().push_back(encounter);
        self.signal.notify_one();
    }

    /// Pop the oldest encounter, waiting up to `max_wait` for one to arrive.
    ///
    /// Returns `None` on timeout; the caller re-checks its stop flag and
    /// calls again.  The wait is bounded even if no push ever happens, which
    /// caps shutdown latency at one `max_wait` interval.
    pub fn pop_timeout(&self, max_wait: Duration) -> Option<Encounter> {
        let guard = self.lock();
        let (mut guard, _timeout) = self
            .signal
            .wait_timeout_while(guard, max_wait, |q| q.is_empty())
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.pop_front()
    }

    /// Pop without waiting.  Used to drain remaining entries in tests.
    pub fn try_pop(&self) -> Option<Encounter> {
        self.lock().pop_front()
    }

    /// Wake every waiter regardless of queue contents.  The driver calls
    /// this right after setting the stop flag.
    pub fn wake_all(&self) {
        self.signal.notify_all();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

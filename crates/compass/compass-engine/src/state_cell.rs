//! Copy-on-write snapshot cell with a single-writer gate.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use compass_adaptation::AdaptiveState;

pub(crate) struct StateCell {
    current: RwLock<Arc<AdaptiveState>>,
    write_gate: Mutex<()>,
}

impl StateCell {
    pub(crate) fn new(state: AdaptiveState) -> Self {
        Self {
            current: RwLock::new(Arc::new(state)),
            write_gate: Mutex::new(()),
        }
    }

    /// The committed state. Never blocks on a running writer.
    pub(crate) fn snapshot(&self) -> Arc<AdaptiveState> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Serialize writers. Hold the guard across read-modify-swap.
    pub(crate) fn gate(&self) -> MutexGuard<'_, ()> {
        self.write_gate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Commit `next`. Callers must hold the gate.
    pub(crate) fn swap(&self, _gate: &MutexGuard<'_, ()>, next: AdaptiveState) -> Arc<AdaptiveState> {
        let next = Arc::new(next);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::clone(&next);
        next
    }

    /// Clone the committed state, mutate the clone, and commit it.
    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut AdaptiveState) -> R) -> R {
        let gate = self.gate();
        let mut next = (*self.snapshot()).clone();
        let result = f(&mut next);
        self.swap(&gate, next);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_core::config::CompassConfig;

    #[test]
    fn snapshots_are_isolated_from_later_writes() {
        let cell = StateCell::new(AdaptiveState::empty(&CompassConfig::default()));
        let before = cell.snapshot();
        cell.write(|state| {
            state.bump();
        });
        assert_eq!(before.version, 0);
        assert_eq!(cell.snapshot().version, 1);
    }
}

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

use crate::{ReadinessError, ReadinessMode, ReporterKey};

/// Point-in-time copy of the readiness state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReadinessSnapshot {
    pub ready: bool,
    pub reporters: BTreeMap<String, bool>,
}

#[derive(Debug)]
struct ReadinessState {
    ready: bool,
    reporters: BTreeMap<String, bool>,
}

impl ReadinessState {
    fn new() -> Self {
        Self {
            ready: true,
            reporters: BTreeMap::new(),
        }
    }

    fn snapshot(&self) -> ReadinessSnapshot {
        ReadinessSnapshot {
            ready: self.ready,
            reporters: self.reporters.clone(),
        }
    }
}

/// Shared readiness state.
///
/// Clones share the same underlying state. Every read and every
/// read-modify-write goes through one mutex, so `ready` is always the AND of
/// the `reporters` map it was computed from (in [`ReadinessMode::WithKeys`]).
/// The lock is never held across I/O.
#[derive(Debug, Clone)]
pub struct ReadinessStore {
    mode: ReadinessMode,
    inner: Arc<Mutex<ReadinessState>>,
}

impl ReadinessStore {
    /// Create a store that starts ready with no reporters.
    pub fn new(mode: ReadinessMode) -> Self {
        Self {
            mode,
            inner: Arc::new(Mutex::new(ReadinessState::new())),
        }
    }

    pub fn with_keys() -> Self {
        Self::new(ReadinessMode::WithKeys)
    }

    pub fn direct() -> Self {
        Self::new(ReadinessMode::Direct)
    }

    pub fn mode(&self) -> ReadinessMode {
        self.mode
    }

    pub fn snapshot(&self) -> ReadinessSnapshot {
        self.inner.lock().snapshot()
    }

    pub fn is_ready(&self) -> bool {
        self.inner.lock().ready
    }

    /// Record `value` under `key` and recompute the aggregate.
    fn set_reporter(&self, key: ReporterKey, value: bool) -> ReadinessSnapshot {
        let (before, snapshot) = {
            let mut state = self.inner.lock();
            let before = state.ready;
            state.reporters.insert(key.as_str().to_owned(), value);
            state.ready = state.reporters.values().all(|ready| *ready);
            (before, state.snapshot())
        };

        debug!(key = %key, value, ready = snapshot.ready, "reporter updated");
        log_transition(before, snapshot.ready);
        snapshot
    }

    /// Overwrite the aggregate flag. Only reachable in [`ReadinessMode::Direct`],
    /// where the reporter map is never written.
    fn set_aggregate_directly(&self, value: bool) -> ReadinessSnapshot {
        let (before, snapshot) = {
            let mut state = self.inner.lock();
            let before = state.ready;
            state.ready = value;
            (before, state.snapshot())
        };

        debug!(value, "aggregate set directly");
        log_transition(before, snapshot.ready);
        snapshot
    }

    /// Apply a write according to the store's mode.
    ///
    /// This is the only way to change the state, so the mode chosen at
    /// construction decides how every write is folded in. In
    /// [`ReadinessMode::Direct`] the key is ignored.
    pub fn report(&self, key: ReporterKey, value: bool) -> ReadinessSnapshot {
        match self.mode {
            ReadinessMode::WithKeys => self.set_reporter(key, value),
            ReadinessMode::Direct => self.set_aggregate_directly(value),
        }
    }

    /// Hand out a reporter bound to `name` for in-process callers.
    pub fn reporter(&self, name: impl Into<String>) -> Result<Reporter, ReadinessError> {
        Ok(Reporter {
            key: ReporterKey::new(name)?,
            store: self.clone(),
        })
    }
}

impl Default for ReadinessStore {
    fn default() -> Self {
        Self::with_keys()
    }
}

fn log_transition(before: bool, after: bool) {
    if before != after {
        info!(ready = after, "aggregate readiness changed");
    }
}

/// Writes readiness under a single fixed key.
#[derive(Debug, Clone)]
pub struct Reporter {
    key: ReporterKey,
    store: ReadinessStore,
}

impl Reporter {
    pub fn key(&self) -> &ReporterKey {
        &self.key
    }

    pub fn set_ready(&self, value: bool) -> ReadinessSnapshot {
        self.store.report(self.key.clone(), value)
    }
}

//! Thread-safe handle for callers that run inference and training in
//! different execution contexts.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::agent::{Decision, TetrisAgent};
use crate::error::Result;
use crate::game::{ActionKind, GameSnapshot};

/// Cloneable handle serializing all access to one agent through a mutex.
///
/// The approximator's weights are shared mutable state between decisions
/// (read) and training updates (read-write); routing both through one lock
/// gives the required mutual exclusion, and a sample never observes a
/// half-written transition because replay access sits behind the same lock.
#[derive(Clone)]
pub struct SharedAgent {
    inner: Arc<Mutex<TetrisAgent>>,
}

impl SharedAgent {
    pub fn new(agent: TetrisAgent) -> Self {
        SharedAgent {
            inner: Arc::new(Mutex::new(agent)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TetrisAgent> {
        // A panicked holder cannot leave the model numerically torn: every
        // mutation completes before the guard drops, so poison is recoverable.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn decide(&self, snapshot: &GameSnapshot) -> Decision {
        self.lock().decide(snapshot)
    }

    pub fn observe(
        &self,
        previous: &GameSnapshot,
        action: ActionKind,
        next: &GameSnapshot,
    ) -> Result<f32> {
        self.lock().observe(previous, action, next)
    }

    pub fn train_step(&self) -> Result<Option<f32>> {
        self.lock().train_step()
    }

    pub fn save_checkpoint(&self, path: &Path) -> Result<()> {
        self.lock().save_checkpoint(path)
    }

    pub fn exploration_rate(&self) -> f32 {
        self.lock().exploration_rate()
    }

    pub fn memory_len(&self) -> usize {
        self.lock().memory_len()
    }
}

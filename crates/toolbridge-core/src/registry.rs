//! Process-wide default runner.
//!
//! Generated wrapper code asks the registry for a runner instead of being
//! handed one explicitly. The slot starts unset, is lazily filled with a
//! [`DryRunner`] on first read, and can be overwritten at any time; only
//! future reads see a new value. Intended use is single-threaded setup
//! before concurrent work begins, but the slot is lock-guarded so readers
//! never race with a late `set_default_runner`.

use crate::dry::DryRunner;
use crate::execution::Runner;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

static DEFAULT_RUNNER: RwLock<Option<Arc<dyn Runner>>> = RwLock::new(None);

/// Current default runner, installing the dry backend on first use.
/// Idempotent after the first call.
pub fn default_runner() -> Arc<dyn Runner> {
    {
        let slot = DEFAULT_RUNNER
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(runner) = slot.as_ref() {
            return Arc::clone(runner);
        }
    }

    let mut slot = DEFAULT_RUNNER
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    // Another thread may have filled the slot between the read and here.
    Arc::clone(slot.get_or_insert_with(|| {
        debug!("no default runner set, installing dry backend");
        Arc::new(DryRunner::new()) as Arc<dyn Runner>
    }))
}

/// Replace the default runner. Executions already started from a previously
/// retrieved runner are unaffected; last write wins.
pub fn set_default_runner(runner: Arc<dyn Runner>) {
    debug!(runner = runner.name(), "default runner replaced");
    let mut slot = DEFAULT_RUNNER
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *slot = Some(runner);
}

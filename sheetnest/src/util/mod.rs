pub mod assertions;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Clonable handle for cooperative cancellation of long-running searches.
///
/// Strategies poll the token between units of work (parts, iterations,
/// generations) and return the best result found so far when it fires;
/// cancellation is never surfaced as an error.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

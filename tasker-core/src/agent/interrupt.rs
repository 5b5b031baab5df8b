//! External interruption signal for the run loop

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag that asks a running agent to stop between tasks
///
/// Clones share the same flag, so a handle can be moved into a signal
/// handler while the agent keeps its own copy.
#[derive(Debug, Clone, Default)]
pub struct InterruptHandle {
    raised: Arc<AtomicBool>,
}

impl InterruptHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the loop exits before picking up the next task
    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }

    /// Clear the flag so the agent can be run again
    pub fn reset(&self) {
        self.raised.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let handle = InterruptHandle::new();
        let remote = handle.clone();
        assert!(!handle.is_raised());

        remote.raise();
        assert!(handle.is_raised());

        handle.reset();
        assert!(!remote.is_raised());
    }

    #[test]
    fn raise_is_visible_across_threads() {
        let handle = InterruptHandle::new();
        let remote = handle.clone();

        std::thread::spawn(move || remote.raise()).join().unwrap();

        assert!(handle.is_raised());
    }
}

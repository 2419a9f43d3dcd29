//! One outstanding save per edit form

use std::sync::Arc;

use tokio::sync::OwnedSemaphorePermit;
use tokio::sync::Semaphore;

/// Lets at most one save through at a time.
///
/// Wraps a single-permit `tokio::sync::Semaphore`. A second submission
/// while the first is in flight is refused outright rather than queued, so
/// duplicate submit events never reach the server.
///
/// # Example
///
/// ```
/// use edittable_lib::interaction::SaveLatch;
///
/// let latch = SaveLatch::new();
/// let guard = latch.try_begin().unwrap();
/// assert!(latch.try_begin().is_none());
/// drop(guard);
/// assert!(latch.try_begin().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct SaveLatch {
    semaphore: Arc<Semaphore>,
}

/// Held for the duration of a save; releases the latch when dropped.
#[derive(Debug)]
pub struct SaveGuard {
    _permit: OwnedSemaphorePermit,
}

impl SaveLatch {
    pub fn new() -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(1)),
        }
    }

    /// Claims the latch, or returns `None` when a save is in flight.
    pub fn try_begin(&self) -> Option<SaveGuard> {
        self.semaphore
            .clone()
            .try_acquire_owned()
            .ok()
            .map(|permit| SaveGuard { _permit: permit })
    }

    pub fn is_busy(&self) -> bool {
        self.semaphore.available_permits() == 0
    }
}

impl Default for SaveLatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_latch() {
        let latch = SaveLatch::new();
        let other = latch.clone();
        let guard = latch.try_begin().unwrap();
        assert!(other.is_busy());
        assert!(other.try_begin().is_none());
        drop(guard);
        assert!(!other.is_busy());
    }
}

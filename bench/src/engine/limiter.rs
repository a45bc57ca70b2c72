use std::sync::Arc;
use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};

/// Caps the number of sends in flight at once.
///
/// Slots are handed out as [`Slot`] guards, a slot is released when its guard is
/// dropped. Waiters are served in FIFO order by the underlying semaphore.
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    max_concurrency: usize,
}

/// One occupied unit of concurrency capacity.
#[derive(Debug)]
pub struct Slot {
    _permit: OwnedSemaphorePermit,
}

impl Slot {
    pub fn release(self) {}
}

impl ConcurrencyLimiter {
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrency)),
            max_concurrency,
        }
    }

    /// Waits until fewer than `max_concurrency` slots are occupied, then occupies one.
    ///
    /// The semaphore is never closed while the limiter is alive, so the error is
    /// only reachable if that invariant is broken.
    pub async fn acquire(&self) -> Result<Slot, AcquireError> {
        let permit = self.semaphore.clone().acquire_owned().await?;
        Ok(Slot { _permit: permit })
    }

    pub fn in_flight(&self) -> usize {
        self.max_concurrency - self.semaphore.available_permits()
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }
}

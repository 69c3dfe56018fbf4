#[cfg(test)]
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation signal shared between a caller and a running validation
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    /// Checks left before the token cancels itself
    #[cfg(test)]
    trip_after: Option<Arc<AtomicUsize>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        #[cfg(test)]
        self.count_check();
        self.cancelled.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    fn count_check(&self) {
        if let Some(remaining) = &self.trip_after {
            let exhausted = remaining
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_err();
            if exhausted {
                self.cancel();
            }
        }
    }

    /// Token that reports "not cancelled" for `checks` calls, then cancels
    #[cfg(test)]
    pub(crate) fn cancelled_after(checks: usize) -> Self {
        Self {
            trip_after: Some(Arc::new(AtomicUsize::new(checks))),
            ..Self::default()
        }
    }
}

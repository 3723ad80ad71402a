use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Guards page state against out-of-order load results.
///
/// Every load takes a ticket before its first network call; results are
/// committed only if the ticket is still current when they arrive. Starting
/// a newer load (or tearing the page down) invalidates every outstanding
/// ticket, so a slow earlier request can never clobber a newer load's
/// results. The in-flight request itself is not aborted; only its result
/// is discarded.
#[derive(Debug, Default, Clone)]
pub struct LoadState {
    current: Arc<AtomicU64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

impl LoadState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load, superseding any still in flight.
    pub fn begin(&self) -> LoadTicket {
        LoadTicket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }

    /// Teardown: void every outstanding ticket without starting a load.
    pub fn invalidate_all(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}

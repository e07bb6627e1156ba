use std::sync::atomic::{AtomicU64, Ordering};

/// Sequence numbers of the lookups issued for one input.
///
/// Only the response of the latest issued request may be rendered.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: AtomicU64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next sequence number, superseding every earlier one.
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, sequence: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == sequence
    }

    /// Hands `response` back as `Ok` only when `sequence` is still the latest request.
    ///
    /// A stale response comes back as `Err` so the caller can still inspect it before dropping it.
    pub fn accept<T>(&self, sequence: u64, response: T) -> Result<T, T> {
        if self.is_current(sequence) {
            Ok(response)
        } else {
            tracing::debug!(sequence, latest = self.latest.load(Ordering::SeqCst), "Discarding stale lookup response");
            Err(response)
        }
    }
}

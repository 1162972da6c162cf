//! Upload progress reporting.

use std::sync::atomic::{AtomicI16, AtomicU64, Ordering};
use std::sync::Arc;

/// Receives the upload progress as a whole percent in `0..=100`.
pub type ProgressCallback = Arc<dyn Fn(u8) + Send + Sync>;

struct Tracker {
    total: u64,
    sent: AtomicU64,
    last: AtomicI16,
    callback: ProgressCallback,
}

/// Turns bytes-sent counts into percent callbacks for a single upload.
///
/// Only strictly increasing percents are reported, so a caller sees a
/// non-decreasing sequence. Nothing is reported when the total is unknown.
#[derive(Clone, Default)]
pub struct UploadProgress {
    tracker: Option<Arc<Tracker>>,
}

impl UploadProgress {
    pub fn new(callback: Option<ProgressCallback>, total: u64) -> Self {
        let tracker = callback.filter(|_| total > 0).map(|callback| {
            Arc::new(Tracker {
                total,
                sent: AtomicU64::new(0),
                last: AtomicI16::new(-1),
                callback,
            })
        });
        Self { tracker }
    }

    /// No-op tracker.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn total(&self) -> Option<u64> {
        self.tracker.as_ref().map(|t| t.total)
    }

    /// Record `bytes` more sent.
    pub fn advance(&self, bytes: u64) {
        let Some(tracker) = &self.tracker else {
            return;
        };
        let sent = tracker.sent.fetch_add(bytes, Ordering::SeqCst) + bytes;
        let percent = (sent.saturating_mul(100) / tracker.total).min(100) as i16;
        Self::report(tracker, percent);
    }

    /// Mark the upload as fully sent.
    pub fn complete(&self) {
        if let Some(tracker) = &self.tracker {
            Self::report(tracker, 100);
        }
    }

    fn report(tracker: &Tracker, percent: i16) {
        let previous = tracker.last.fetch_max(percent, Ordering::SeqCst);
        if percent > previous {
            (tracker.callback)(percent as u8);
        }
    }
}

impl std::fmt::Debug for UploadProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadProgress")
            .field("total", &self.total())
            .finish()
    }
}

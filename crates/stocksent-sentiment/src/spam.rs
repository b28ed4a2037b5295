//! Time-windowed fuzzy duplicate suppression.
//!
//! The filter holds the only process-wide state in the pipeline: a bounded
//! window of recently seen normalized messages. "Spam" is a rolling
//! property — the window clears itself on a fixed cadence so long-running
//! processes neither grow without bound nor flag a phrase forever.

use std::collections::{HashSet, VecDeque};

use chrono::{DateTime, Duration, Utc};

/// Messages shorter than this are never flagged: too little information to
/// judge similarity.
const MIN_MESSAGE_CHARS: usize = 5;

/// Bounded, time-windowed cache of recently seen message texts.
///
/// Each candidate is fuzzy-matched against every entry in the window; the
/// scan is O(window size) per call, which is fine at the small fixed cap.
/// When pipelines run concurrently the filter sits behind a mutex so the
/// check-and-insert is atomic.
pub struct SpamFilter {
    threshold: f64,
    capacity: usize,
    reset_interval: Duration,
    seen: HashSet<String>,
    order: VecDeque<String>,
    reset_deadline: DateTime<Utc>,
}

impl SpamFilter {
    #[must_use]
    pub fn new(threshold: f64, capacity: usize, reset_hours: i64) -> Self {
        let reset_interval = Duration::hours(reset_hours);
        Self {
            threshold,
            capacity,
            reset_interval,
            seen: HashSet::new(),
            order: VecDeque::new(),
            reset_deadline: Utc::now() + reset_interval,
        }
    }

    /// Check a cleaned message against the window using the current time.
    pub fn is_spam(&mut self, text: &str) -> bool {
        self.check(text, Utc::now())
    }

    /// Check a cleaned message against the window at an explicit instant.
    ///
    /// Returns `true` for spam. A spam candidate is NOT added to the window,
    /// so duplicates never pollute future comparisons. A non-spam candidate
    /// is recorded, evicting the oldest entry when the window is full.
    pub fn check(&mut self, text: &str, now: DateTime<Utc>) -> bool {
        if now > self.reset_deadline {
            tracing::info!(window = self.order.len(), "spam window reset");
            self.seen.clear();
            self.order.clear();
            self.reset_deadline = now + self.reset_interval;
        }

        if text.chars().count() < MIN_MESSAGE_CHARS {
            return false;
        }

        for recent in &self.order {
            if strsim::normalized_levenshtein(text, recent) > self.threshold {
                return true;
            }
        }

        if !self.seen.contains(text) {
            self.seen.insert(text.to_string());
            self.order.push_back(text.to_string());
        }
        if self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.seen.remove(&oldest);
            }
        }
        false
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

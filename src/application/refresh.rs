//! Refresh scheduling state.
//!
//! Ticks start fetches, completions return to idle. Every fetch carries a sequence
//! number and a completion older than the last applied one is never rendered.

use std::time::Duration;

use tracing::debug;

/// Fixed polling period of the state endpoint.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPhase {
    Idle,
    Fetching,
}

/// Handle for one outstanding fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
pub struct RefreshScheduler {
    allow_overlap: bool,
    outstanding: usize,
    next_sequence: u64,
    last_applied: Option<u64>,
    skipped_ticks: u64,
}

impl RefreshScheduler {
    pub fn new() -> Self {
        Self {
            allow_overlap: false,
            outstanding: 0,
            next_sequence: 1,
            last_applied: None,
            skipped_ticks: 0,
        }
    }

    /// Lets a tick start a fetch while another is still outstanding. Ordering is
    /// then guarded only by the sequence numbers.
    pub fn with_overlap(mut self, allow: bool) -> Self {
        self.allow_overlap = allow;
        self
    }

    pub fn phase(&self) -> RefreshPhase {
        if self.outstanding > 0 {
            RefreshPhase::Fetching
        } else {
            RefreshPhase::Idle
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.phase() == RefreshPhase::Fetching
    }

    /// Starts a fetch, or returns `None` if one is outstanding and overlap is off.
    pub fn begin(&mut self) -> Option<FetchTicket> {
        if self.is_fetching() && !self.allow_overlap {
            self.skipped_ticks += 1;
            debug!(
                "Refresh skipped: fetch still outstanding ({} skipped so far)",
                self.skipped_ticks
            );
            return None;
        }

        let ticket = FetchTicket(self.next_sequence);
        self.next_sequence += 1;
        self.outstanding += 1;
        Some(ticket)
    }

    /// Records the completion of `ticket` and reports whether its snapshot should
    /// be rendered. Failed fetches still return the scheduler to idle.
    pub fn complete(&mut self, ticket: FetchTicket, succeeded: bool) -> bool {
        self.outstanding = self.outstanding.saturating_sub(1);

        if !succeeded {
            return false;
        }

        if self.last_applied.is_some_and(|last| ticket.0 <= last) {
            debug!(
                "Discarding stale snapshot #{} (already applied #{:?})",
                ticket.0, self.last_applied
            );
            return false;
        }

        self.last_applied = Some(ticket.0);
        true
    }

    pub fn last_applied(&self) -> Option<u64> {
        self.last_applied
    }

    pub fn skipped_ticks(&self) -> u64 {
        self.skipped_ticks
    }
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new()
    }
}

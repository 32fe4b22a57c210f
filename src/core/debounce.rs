// Debounce gate - rejects reps that follow the previous one too closely

use crate::models::session::{PostureAlert, PostureFeedback, SessionState};

/// Default minimum spacing between two accepted reps
pub const MIN_REP_INTERVAL_MS: i64 = 1_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateVerdict {
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Copy)]
pub struct DebounceGate {
    min_interval_ms: i64,
}

impl DebounceGate {
    pub fn new(min_interval_ms: i64) -> Self {
        Self { min_interval_ms }
    }

    pub fn min_interval_ms(&self) -> i64 {
        self.min_interval_ms
    }

    /// Apply the gate to a rep the state machine just counted.
    ///
    /// On acceptance the counter and `last_rep_at` move forward and the
    /// feedback is left untouched. On rejection only the feedback changes.
    pub fn admit(
        &self,
        state: &mut SessionState,
        now: i64,
        feedback: &mut PostureFeedback,
    ) -> GateVerdict {
        // Stream timestamps are untrusted; a backwards jump reads as too fast
        if now.saturating_sub(state.last_rep_at) < self.min_interval_ms {
            *feedback = PostureFeedback::invalid(PostureAlert::TooFast);
            return GateVerdict::Rejected;
        }

        state.reps += 1;
        state.last_rep_at = now;
        GateVerdict::Accepted
    }
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new(MIN_REP_INTERVAL_MS)
    }
}

// Milestone prompt - pauses every N reps to ask whether to keep going

use crate::models::input::KeyCommand;
use crate::models::session::{MilestoneDecision, MilestonePolicy, MilestoneState};
use std::time::Duration;
use tokio::sync::mpsc;

pub const DEFAULT_MILESTONE_INTERVAL: u32 = 12;
pub const DEFAULT_MILESTONE_INCREMENT: u32 = 12;
pub const DEFAULT_PROMPT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy)]
pub struct MilestoneRules {
    pub policy: MilestonePolicy,
    pub increment: u32,
}

impl Default for MilestoneRules {
    fn default() -> Self {
        Self {
            policy: MilestonePolicy::Fixed,
            increment: DEFAULT_MILESTONE_INCREMENT,
        }
    }
}

impl MilestoneRules {
    /// Whether the prompt should be shown for the current count
    pub fn is_due(&self, milestone: &MilestoneState, reps: u32) -> bool {
        milestone.interval > 0 && reps > 0 && reps == milestone.next_at
    }

    /// Record the user's answer. Returns true if the session should end.
    ///
    /// Continuing moves the next prompt one interval past the milestone just
    /// answered; under the growing policy the interval widens first.
    pub fn resolve(&self, milestone: &mut MilestoneState, decision: MilestoneDecision) -> bool {
        if decision.ends_session() {
            return true;
        }

        milestone.answered_at = Some(milestone.next_at);
        if self.policy == MilestonePolicy::Growing {
            milestone.interval = milestone.interval.saturating_add(self.increment);
        }
        milestone.next_at = milestone.next_at.saturating_add(milestone.interval);
        false
    }

    /// True while the count still sits on the milestone the user continued past
    pub fn is_continuing(&self, milestone: &MilestoneState, reps: u32) -> bool {
        reps > 0 && milestone.answered_at == Some(reps)
    }
}

/// Wait for a continue/finish key, falling back to continue after `timeout`.
///
/// Quit and unrelated keys are ignored while the prompt is up. A closed input
/// channel can never answer, so it resolves immediately as a timeout.
pub async fn await_decision(
    keys: &mut mpsc::Receiver<KeyCommand>,
    timeout: Duration,
) -> MilestoneDecision {
    let wait_for_answer = async {
        loop {
            match keys.recv().await {
                Some(KeyCommand::Continue) => return MilestoneDecision::Continue,
                Some(KeyCommand::Finish) => return MilestoneDecision::Finish,
                Some(KeyCommand::Quit) => continue,
                None => return MilestoneDecision::TimedOut,
            }
        }
    };

    tokio::time::timeout(timeout, wait_for_answer)
        .await
        .unwrap_or(MilestoneDecision::TimedOut)
}

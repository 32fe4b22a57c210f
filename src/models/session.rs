// Data models for a single workout session

use super::exercise::ExerciseKind;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==============================================================================
// Rep Stage
// ==============================================================================

/// Coarse phase of a repetition cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Unset,
    Up,
    Down,
}

// ==============================================================================
// Posture Feedback
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostureAlert {
    NotDeepEnough,
    LockedOut,
    TooFast,
}

impl PostureAlert {
    pub fn message(&self) -> &'static str {
        match self {
            PostureAlert::NotDeepEnough => "movement not deep enough",
            PostureAlert::LockedOut => "avoid locking out completely",
            PostureAlert::TooFast => "too fast, slow down",
        }
    }
}

impl fmt::Display for PostureAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Per-frame posture verdict. Never carried over between frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostureFeedback {
    pub alert: Option<PostureAlert>,
}

impl PostureFeedback {
    pub fn ok() -> Self {
        Self { alert: None }
    }

    pub fn invalid(alert: PostureAlert) -> Self {
        Self { alert: Some(alert) }
    }

    pub fn is_valid(&self) -> bool {
        self.alert.is_none()
    }
}

// ==============================================================================
// Milestones
// ==============================================================================

/// What happens to the milestone interval after the user chooses to continue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestonePolicy {
    /// Prompt at every multiple of the configured interval
    #[default]
    Fixed,
    /// Widen the gap to the next prompt by a fixed increment after each continue
    Growing,
}

impl std::str::FromStr for MilestonePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(MilestonePolicy::Fixed),
            "growing" => Ok(MilestonePolicy::Growing),
            other => Err(format!(
                "Invalid milestone policy: {}. Must be one of: fixed, growing",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneState {
    /// Reps between the last milestone and the next one
    pub interval: u32,
    /// Rep count at which the next prompt fires
    pub next_at: u32,
    /// Most recent milestone the user chose to continue past
    pub answered_at: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneDecision {
    Continue,
    Finish,
    TimedOut,
}

impl MilestoneDecision {
    pub fn ends_session(&self) -> bool {
        matches!(self, MilestoneDecision::Finish)
    }
}

// ==============================================================================
// Session State
// ==============================================================================

/// All mutable state of one workout. Passed explicitly into every frame update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub exercise: ExerciseKind,
    pub stage: Stage,
    pub reps: u32,
    /// Timestamp (ms) of the last accepted rep, seeded with the session start
    pub last_rep_at: i64,
    pub milestone: MilestoneState,
}

impl SessionState {
    pub fn new(exercise: ExerciseKind, started_at: i64, milestone_interval: u32) -> Self {
        Self {
            exercise,
            stage: Stage::Unset,
            reps: 0,
            last_rep_at: started_at,
            milestone: MilestoneState {
                interval: milestone_interval,
                next_at: milestone_interval,
                answered_at: None,
            },
        }
    }
}

/// Result of feeding one detected pose into the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutcome {
    pub angle: f32,
    pub stage: Stage,
    pub reps: u32,
    pub feedback: PostureFeedback,
    pub rep_accepted: bool,
    pub rep_rejected: bool,
    pub milestone_due: bool,
}

// ==============================================================================
// Session Summary
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum EndReason {
    Quit,
    Finished,
    StreamEnded,
    CaptureFailed(String),
    DetectionFailed(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub exercise: ExerciseKind,
    pub reps: u32,
    pub rejected_reps: u32,
    pub frames: u64,
    pub frames_without_pose: u64,
    pub started_at: Option<i64>,
    pub ended_at: Option<i64>,
    pub end_reason: EndReason,
}

use crate::core::config::Config;
use crate::core::debounce::{DebounceGate, GateVerdict};
use crate::core::milestone::MilestoneRules;
use crate::core::rep_counter::{advance, tracked_angle};
use crate::models::exercise::ExerciseKind;
use crate::models::pose::BodyPose;
use crate::models::session::{
    EndReason, FrameOutcome, MilestoneDecision, SessionState, SessionSummary,
};
use uuid::Uuid;

pub const DEFAULT_MIN_VISIBILITY: f32 = 0.5;

// ==============================================================================
// Frame Processing
// ==============================================================================

/// Fixed rules a session is evaluated against
#[derive(Debug, Clone, Copy)]
pub struct SessionRules {
    pub gate: DebounceGate,
    pub milestones: MilestoneRules,
    /// Landmark visibility below which a tracked joint is treated as missing
    pub min_visibility: f32,
}

impl SessionRules {
    pub fn from_config(config: &Config) -> Self {
        Self {
            gate: DebounceGate::new(config.min_rep_interval_ms),
            milestones: MilestoneRules {
                policy: config.milestone_policy,
                increment: config.milestone_increment,
            },
            min_visibility: config.min_tracking_confidence,
        }
    }
}

impl Default for SessionRules {
    fn default() -> Self {
        Self {
            gate: DebounceGate::default(),
            milestones: MilestoneRules::default(),
            min_visibility: DEFAULT_MIN_VISIBILITY,
        }
    }
}

/// Run one frame's joint angle through the state machine, debounce gate and
/// milestone check, in that order.
pub fn process_angle(
    state: &mut SessionState,
    angle: f32,
    now: i64,
    rules: &SessionRules,
) -> FrameOutcome {
    let step = advance(state.stage, angle, state.exercise);
    state.stage = step.stage;

    let mut feedback = step.feedback;
    let mut rep_accepted = false;
    let mut rep_rejected = false;

    if step.counted {
        match rules.gate.admit(state, now, &mut feedback) {
            GateVerdict::Accepted => rep_accepted = true,
            GateVerdict::Rejected => rep_rejected = true,
        }
    }

    FrameOutcome {
        angle,
        stage: state.stage,
        reps: state.reps,
        feedback,
        rep_accepted,
        rep_rejected,
        milestone_due: rules.milestones.is_due(&state.milestone, state.reps),
    }
}

// ==============================================================================
// Workout Session
// ==============================================================================

/// One workout from first frame to end, with its bookkeeping
pub struct WorkoutSession {
    id: String,
    rules: SessionRules,
    state: Option<SessionState>,
    exercise: ExerciseKind,
    milestone_interval: u32,
    started_at: Option<i64>,
    last_frame_at: Option<i64>,
    frames: u64,
    frames_without_pose: u64,
    rejected_reps: u32,
}

impl WorkoutSession {
    pub fn new(exercise: ExerciseKind, milestone_interval: u32, rules: SessionRules) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            rules,
            state: None,
            exercise,
            milestone_interval,
            started_at: None,
            last_frame_at: None,
            frames: 0,
            frames_without_pose: 0,
            rejected_reps: 0,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.exercise,
            config.milestone_interval,
            SessionRules::from_config(config),
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn exercise(&self) -> ExerciseKind {
        self.exercise
    }

    pub fn reps(&self) -> u32 {
        self.state.as_ref().map_or(0, |s| s.reps)
    }

    pub fn state(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    /// Count a frame. The first frame's timestamp starts the session clock.
    pub fn begin_frame(&mut self, timestamp: i64) {
        self.frames += 1;
        self.last_frame_at = Some(timestamp);
        if self.started_at.is_none() {
            self.started_at = Some(timestamp);
        }
    }

    /// Feed a detected pose. `None` when the pose lacks the exercise's landmarks,
    /// which is handled like a frame without a pose.
    pub fn process_pose(&mut self, pose: &BodyPose, timestamp: i64) -> Option<FrameOutcome> {
        let Some(angle) = tracked_angle(pose, self.exercise, self.rules.min_visibility) else {
            self.frames_without_pose += 1;
            return None;
        };

        let exercise = self.exercise;
        let interval = self.milestone_interval;
        let started_at = self.started_at.unwrap_or(timestamp);
        let state = self
            .state
            .get_or_insert_with(|| SessionState::new(exercise, started_at, interval));

        let outcome = process_angle(state, angle, timestamp, &self.rules);
        if outcome.rep_rejected {
            self.rejected_reps += 1;
        }
        Some(outcome)
    }

    pub fn skip_frame(&mut self) {
        self.frames_without_pose += 1;
    }

    /// Apply the user's milestone answer. Returns true if the session should end.
    pub fn resolve_milestone(&mut self, decision: MilestoneDecision) -> bool {
        match self.state.as_mut() {
            Some(state) => self.rules.milestones.resolve(&mut state.milestone, decision),
            None => decision.ends_session(),
        }
    }

    /// True when the current count sits on a milestone that was already answered
    pub fn is_continuing(&self) -> bool {
        self.state
            .as_ref()
            .map_or(false, |s| self.rules.milestones.is_continuing(&s.milestone, s.reps))
    }

    pub fn finish(self, end_reason: EndReason) -> SessionSummary {
        SessionSummary {
            session_id: self.id,
            exercise: self.exercise,
            reps: self.state.as_ref().map_or(0, |s| s.reps),
            rejected_reps: self.rejected_reps,
            frames: self.frames,
            frames_without_pose: self.frames_without_pose,
            started_at: self.started_at,
            ended_at: self.last_frame_at,
            end_reason,
        }
    }
}

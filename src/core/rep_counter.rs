// Rep state machine: stage tracking, rep detection and posture feedback

use crate::core::angle::joint_angle;
use crate::models::exercise::ExerciseKind;
use crate::models::pose::BodyPose;
use crate::models::session::{PostureAlert, PostureFeedback, Stage};

/// Result of advancing the state machine by one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    pub stage: Stage,
    /// True when this frame completed an up→down transition
    pub counted: bool,
    pub feedback: PostureFeedback,
}

/// Advance the stage for one frame's joint angle.
///
/// Crossing above the exercise's max angle always moves to `Up`. Dropping
/// below the min angle from `Up` moves to `Down` and counts a rep; that frame
/// skips the posture check. Every other frame reports posture against the
/// same two thresholds.
pub fn advance(stage: Stage, angle: f32, exercise: ExerciseKind) -> Advance {
    let profile = exercise.profile();
    let mut stage = stage;

    if angle > profile.max_angle {
        stage = Stage::Up;
    }

    if angle < profile.min_angle && stage == Stage::Up {
        return Advance {
            stage: Stage::Down,
            counted: true,
            feedback: PostureFeedback::ok(),
        };
    }

    let feedback = if angle < profile.min_angle {
        PostureFeedback::invalid(PostureAlert::NotDeepEnough)
    } else if angle > profile.max_angle {
        PostureFeedback::invalid(PostureAlert::LockedOut)
    } else {
        PostureFeedback::ok()
    };

    Advance {
        stage,
        counted: false,
        feedback,
    }
}

/// Angle of the exercise's tracked joint. `None` if the pose lacks one of the
/// three landmarks or any of them is less visible than `min_visibility`.
pub fn tracked_angle(pose: &BodyPose, exercise: ExerciseKind, min_visibility: f32) -> Option<f32> {
    let profile = exercise.profile();

    let point = |landmark| {
        pose.landmark(landmark)
            .filter(|kp| kp.is_visible(min_visibility))
            .map(|kp| (kp.x, kp.y))
    };

    Some(joint_angle(
        point(profile.joint_a)?,
        point(profile.vertex)?,
        point(profile.joint_c)?,
    ))
}

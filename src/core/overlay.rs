// Overlay text composed for each rendered frame

use crate::models::exercise::ExerciseKind;
use crate::models::session::PostureAlert;
use serde::Serialize;

/// Text shown on top of a frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overlay {
    pub reps_line: String,
    pub posture_alert: Option<String>,
    pub guideline: &'static str,
    pub milestone_line: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneBanner {
    None,
    Prompt,
    Continuing,
}

impl Overlay {
    pub fn compose(
        exercise: ExerciseKind,
        reps: u32,
        alert: Option<PostureAlert>,
        banner: MilestoneBanner,
    ) -> Self {
        let milestone_line = match banner {
            MilestoneBanner::None => None,
            MilestoneBanner::Prompt => Some(format!(
                "Complete {} reps! Continue or finish? (y/n)",
                reps
            )),
            MilestoneBanner::Continuing => Some(format!("Continuing... Reps: {}", reps)),
        };

        Self {
            reps_line: format!("Reps: {}", reps),
            posture_alert: alert.map(|a| format!("Posture Alert: {}", a)),
            guideline: exercise.profile().guideline,
            milestone_line,
        }
    }
}

use std::path::{Path, PathBuf};

use repcount_lib::core::overlay::Overlay;
use repcount_lib::models::capture::RawFrame;
use repcount_lib::models::exercise::ExerciseKind;
use repcount_lib::models::input::KeyCommand;
use repcount_lib::models::pose::BodyPose;
use repcount_lib::platform::display::OverlaySink;
use tokio::sync::mpsc;

/// Pose whose tracked joint for `exercise` sits at `degrees`
pub fn pose_at(exercise: ExerciseKind, degrees: f32) -> BodyPose {
    let profile = exercise.profile();
    let vertex = (0.5_f32, 0.5_f32);
    let heading = (degrees - 90.0).to_radians();
    BodyPose::from_landmarks(&[
        (profile.joint_a, (0.5, 0.2)),
        (profile.vertex, vertex),
        (
            profile.joint_c,
            (vertex.0 + 0.3 * heading.cos(), vertex.1 + 0.3 * heading.sin()),
        ),
    ])
}

pub fn frame_line(timestamp: i64, pose: Option<&BodyPose>) -> String {
    serde_json::json!({
        "timestamp": timestamp,
        "width": 640,
        "height": 480,
        "body_pose": pose,
    })
    .to_string()
}

/// A lead-in frame at t=0, then `count` full reps `spacing_ms` apart
pub fn rep_stream(exercise: ExerciseKind, count: i64, spacing_ms: i64) -> Vec<String> {
    let profile = exercise.profile();
    let top = profile.max_angle + 10.0;
    let bottom = profile.min_angle - 10.0;

    let mut lines = vec![frame_line(0, Some(&pose_at(exercise, top)))];
    for i in 1..=count {
        let at = i * spacing_ms;
        lines.push(frame_line(at, Some(&pose_at(exercise, top))));
        lines.push(frame_line(at + 33, Some(&pose_at(exercise, bottom))));
    }
    lines
}

pub fn write_stream(dir: &Path, lines: &[String]) -> PathBuf {
    let path = dir.join("session.jsonl");
    std::fs::write(&path, lines.join("\n") + "\n").expect("write stream");
    path
}

/// Overlay sink that keeps every render and can answer the milestone prompt
#[derive(Default)]
pub struct RecordingSink {
    pub rendered: Vec<Option<Overlay>>,
    pub answer: Option<(mpsc::Sender<KeyCommand>, KeyCommand)>,
}

impl RecordingSink {
    pub fn answering(tx: mpsc::Sender<KeyCommand>, key: KeyCommand) -> Self {
        Self {
            rendered: Vec::new(),
            answer: Some((tx, key)),
        }
    }

    pub fn milestone_lines(&self) -> Vec<String> {
        self.rendered
            .iter()
            .flatten()
            .filter_map(|o| o.milestone_line.clone())
            .collect()
    }

    pub fn prompts(&self) -> usize {
        self.milestone_lines()
            .iter()
            .filter(|l| l.starts_with("Complete"))
            .count()
    }
}

impl OverlaySink for &mut RecordingSink {
    fn render(&mut self, _frame: &RawFrame, overlay: Option<&Overlay>) {
        let prompted = overlay
            .and_then(|o| o.milestone_line.as_deref())
            .map_or(false, |line| line.starts_with("Complete"));
        if let (true, Some((tx, key))) = (prompted, &self.answer) {
            tx.try_send(*key).expect("answer prompt");
        }
        self.rendered.push(overlay.cloned());
    }
}

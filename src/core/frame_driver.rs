// Frame loop: acquire → detect → count → render → poll keys

use crate::core::milestone::await_decision;
use crate::core::overlay::{MilestoneBanner, Overlay};
use crate::core::session_manager::WorkoutSession;
use crate::models::input::KeyCommand;
use crate::models::session::{EndReason, FrameOutcome, SessionSummary};
use crate::platform::capture::FrameSource;
use crate::platform::display::OverlaySink;
use crate::platform::pose::MediaPipeBridge;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, info_span, warn, Instrument};

pub struct FrameDriver<S, P, O> {
    source: S,
    pose: P,
    sink: O,
    keys: mpsc::Receiver<KeyCommand>,
    session: WorkoutSession,
    prompt_timeout: Duration,
}

impl<S, P, O> FrameDriver<S, P, O>
where
    S: FrameSource,
    P: MediaPipeBridge,
    O: OverlaySink,
{
    pub fn new(
        source: S,
        pose: P,
        sink: O,
        keys: mpsc::Receiver<KeyCommand>,
        session: WorkoutSession,
        prompt_timeout: Duration,
    ) -> Self {
        Self {
            source,
            pose,
            sink,
            keys,
            session,
            prompt_timeout,
        }
    }

    /// Run until the user quits or finishes, or the source stops delivering frames
    pub async fn run(mut self) -> SessionSummary {
        let span = info_span!(
            "session",
            id = %self.session.id(),
            exercise = %self.session.exercise()
        );

        async move {
            info!(source = %self.source.describe(), backend = %self.pose.get_model_info(), "session started");

            let end_reason = self.run_loop().await;
            let summary = self.session.finish(end_reason);

            info!(
                reps = summary.reps,
                rejected = summary.rejected_reps,
                frames = summary.frames,
                reason = ?summary.end_reason,
                "session ended"
            );
            summary
        }
        .instrument(span)
        .await
    }

    async fn run_loop(&mut self) -> EndReason {
        loop {
            let frame = match self.source.next_frame().await {
                Ok(Some(frame)) => frame,
                Ok(None) => return EndReason::StreamEnded,
                Err(e) => {
                    warn!(error = %e, "frame acquisition failed");
                    return EndReason::CaptureFailed(e.to_string());
                }
            };
            self.session.begin_frame(frame.timestamp);

            let pose = match self.pose.process_frame(&frame) {
                Ok(pose) => pose,
                Err(e) => {
                    error!(error = %e, "pose detection failed");
                    return EndReason::DetectionFailed(e.to_string());
                }
            };

            let outcome = match pose {
                Some(body) => self.session.process_pose(&body, frame.timestamp),
                None => {
                    self.session.skip_frame();
                    None
                }
            };

            match outcome {
                Some(outcome) => {
                    self.log_outcome(&outcome);

                    if outcome.milestone_due {
                        let prompt = self.overlay_for(&outcome, MilestoneBanner::Prompt);
                        self.sink.render(&frame, Some(&prompt));

                        let decision = await_decision(&mut self.keys, self.prompt_timeout).await;
                        info!(reps = outcome.reps, ?decision, "milestone answered");

                        if self.session.resolve_milestone(decision) {
                            return EndReason::Finished;
                        }
                    }

                    let banner = if self.session.is_continuing() {
                        MilestoneBanner::Continuing
                    } else {
                        MilestoneBanner::None
                    };
                    let overlay = self.overlay_for(&outcome, banner);
                    self.sink.render(&frame, Some(&overlay));
                }
                None => self.sink.render(&frame, None),
            }

            if self.quit_requested() {
                return EndReason::Quit;
            }

            tokio::task::yield_now().await;
        }
    }

    fn overlay_for(&self, outcome: &FrameOutcome, banner: MilestoneBanner) -> Overlay {
        Overlay::compose(
            self.session.exercise(),
            outcome.reps,
            outcome.feedback.alert,
            banner,
        )
    }

    /// Drain pending keys without waiting. Keys other than quit are stale here.
    fn quit_requested(&mut self) -> bool {
        let mut quit = false;
        while let Ok(key) = self.keys.try_recv() {
            if key == KeyCommand::Quit {
                quit = true;
            }
        }
        quit
    }

    fn log_outcome(&self, outcome: &FrameOutcome) {
        if outcome.rep_accepted {
            info!(reps = outcome.reps, angle = outcome.angle, "rep counted");
        } else if outcome.rep_rejected {
            debug!(reps = outcome.reps, angle = outcome.angle, "rep rejected, too fast");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session_manager::SessionRules;
    use crate::models::capture::{CaptureError, CaptureResult, FrameFormat, RawFrame};
    use crate::models::exercise::ExerciseKind;
    use crate::models::pose::{BodyLandmark, BodyPose, PoseConfig, PoseError, PoseResult};
    use async_trait::async_trait;
    use std::collections::VecDeque;

    /// Frames whose payload is a bare joint angle, or empty for "no pose"
    struct AngleFrames {
        frames: VecDeque<(i64, Option<f32>)>,
        fail_at_end: bool,
    }

    #[async_trait]
    impl FrameSource for AngleFrames {
        async fn next_frame(&mut self) -> CaptureResult<Option<RawFrame>> {
            match self.frames.pop_front() {
                Some((timestamp, angle)) => Ok(Some(RawFrame {
                    timestamp,
                    width: 0,
                    height: 0,
                    data: angle.map(|a| a.to_le_bytes().to_vec()).unwrap_or_default(),
                    format: FrameFormat::LandmarkJson,
                })),
                None if self.fail_at_end => {
                    Err(CaptureError::CaptureFailed("camera unplugged".to_string()))
                }
                None => Ok(None),
            }
        }

        fn describe(&self) -> String {
            "angles".to_string()
        }
    }

    /// Builds a shoulder/elbow/wrist pose with the requested elbow angle
    struct AnglePose;

    impl MediaPipeBridge for AnglePose {
        fn new(_config: &PoseConfig) -> PoseResult<Self> {
            Ok(Self)
        }

        fn process_frame(&self, frame: &RawFrame) -> PoseResult<Option<BodyPose>> {
            if frame.data.is_empty() {
                return Ok(None);
            }
            let bytes: [u8; 4] = frame
                .data
                .as_slice()
                .try_into()
                .map_err(|_| PoseError::MalformedPayload("bad test frame".to_string()))?;
            Ok(Some(elbow_pose(f32::from_le_bytes(bytes))))
        }

        fn get_model_info(&self) -> String {
            "angle".to_string()
        }
    }

    fn elbow_pose(degrees: f32) -> BodyPose {
        let vertex = (0.5, 0.5);
        let heading = (degrees - 90.0).to_radians();
        BodyPose::from_landmarks(&[
            (BodyLandmark::LeftShoulder, (0.5, 0.2)),
            (BodyLandmark::LeftElbow, vertex),
            (
                BodyLandmark::LeftWrist,
                (vertex.0 + 0.3 * heading.cos(), vertex.1 + 0.3 * heading.sin()),
            ),
        ])
    }

    /// Records overlays and, optionally, presses a key whenever the milestone
    /// prompt appears
    #[derive(Default)]
    struct RecordingSink {
        rendered: Vec<Option<Overlay>>,
        answer: Option<(mpsc::Sender<KeyCommand>, KeyCommand)>,
    }

    impl OverlaySink for &mut RecordingSink {
        fn render(&mut self, _frame: &RawFrame, overlay: Option<&Overlay>) {
            let prompted = overlay
                .and_then(|o| o.milestone_line.as_deref())
                .map_or(false, |line| line.starts_with("Complete"));
            if let (true, Some((tx, key))) = (prompted, &self.answer) {
                tx.try_send(*key).unwrap();
            }
            self.rendered.push(overlay.cloned());
        }
    }

    /// A lead-in frame at t=0, then `count` curls spaced `spacing_ms` apart
    fn curls(count: i64, spacing_ms: i64) -> VecDeque<(i64, Option<f32>)> {
        let mut frames = VecDeque::from(vec![(0, Some(160.0))]);
        for i in 1..=count {
            frames.push_back((i * spacing_ms, Some(160.0)));
            frames.push_back((i * spacing_ms + 10, Some(30.0)));
        }
        frames
    }

    fn session() -> WorkoutSession {
        WorkoutSession::new(ExerciseKind::BicepCurl, 12, SessionRules::default())
    }

    #[tokio::test]
    async fn test_counts_until_stream_ends() {
        let (_tx, rx) = mpsc::channel(4);
        let mut sink = RecordingSink::default();
        let source = AngleFrames {
            frames: curls(3, 2_000),
            fail_at_end: false,
        };

        let summary = FrameDriver::new(source, AnglePose, &mut sink, rx, session(), Duration::from_secs(5))
            .run()
            .await;

        assert_eq!(summary.reps, 3);
        assert_eq!(summary.frames, 7);
        assert_eq!(summary.end_reason, EndReason::StreamEnded);
        let last = sink.rendered.last().unwrap().as_ref().unwrap();
        assert_eq!(last.reps_line, "Reps: 3");
    }

    #[tokio::test]
    async fn test_no_pose_frames_render_plain() {
        let (_tx, rx) = mpsc::channel(4);
        let mut sink = RecordingSink::default();
        let source = AngleFrames {
            frames: VecDeque::from(vec![(0, None), (40, Some(160.0)), (80, None)]),
            fail_at_end: false,
        };

        let summary = FrameDriver::new(source, AnglePose, &mut sink, rx, session(), Duration::from_secs(5))
            .run()
            .await;

        assert_eq!(summary.frames_without_pose, 2);
        assert!(sink.rendered[0].is_none());
        assert!(sink.rendered[1].is_some());
        assert!(sink.rendered[2].is_none());
    }

    #[tokio::test]
    async fn test_first_rep_inside_interval_from_start_is_rejected() {
        let (_tx, rx) = mpsc::channel(4);
        let mut sink = RecordingSink::default();
        let source = AngleFrames {
            frames: VecDeque::from(vec![(1_000, Some(160.0)), (1_400, Some(30.0))]),
            fail_at_end: false,
        };

        let summary = FrameDriver::new(source, AnglePose, &mut sink, rx, session(), Duration::from_secs(5))
            .run()
            .await;

        assert_eq!(summary.reps, 0);
        assert_eq!(summary.rejected_reps, 1);
        let last = sink.rendered.last().unwrap().as_ref().unwrap();
        assert_eq!(last.posture_alert.as_deref(), Some("Posture Alert: too fast, slow down"));
    }

    #[tokio::test]
    async fn test_capture_failure_reports_count() {
        let (_tx, rx) = mpsc::channel(4);
        let mut sink = RecordingSink::default();
        let source = AngleFrames {
            frames: curls(2, 2_000),
            fail_at_end: true,
        };

        let summary = FrameDriver::new(source, AnglePose, &mut sink, rx, session(), Duration::from_secs(5))
            .run()
            .await;

        assert_eq!(summary.reps, 2);
        assert!(matches!(summary.end_reason, EndReason::CaptureFailed(_)));
    }

    #[tokio::test]
    async fn test_quit_key_stops_after_frame() {
        let (tx, rx) = mpsc::channel(4);
        tx.send(KeyCommand::Quit).await.unwrap();
        let mut sink = RecordingSink::default();
        let source = AngleFrames {
            frames: curls(5, 2_000),
            fail_at_end: false,
        };

        let summary = FrameDriver::new(source, AnglePose, &mut sink, rx, session(), Duration::from_secs(5))
            .run()
            .await;

        assert_eq!(summary.frames, 1);
        assert_eq!(summary.end_reason, EndReason::Quit);
    }

    #[tokio::test]
    async fn test_finish_at_milestone_ends_with_twelve() {
        let (tx, rx) = mpsc::channel(4);
        let mut sink = RecordingSink {
            answer: Some((tx, KeyCommand::Finish)),
            ..Default::default()
        };
        let source = AngleFrames {
            frames: curls(15, 2_000),
            fail_at_end: false,
        };

        let summary = FrameDriver::new(source, AnglePose, &mut sink, rx, session(), Duration::from_secs(5))
            .run()
            .await;

        assert_eq!(summary.reps, 12);
        assert_eq!(summary.end_reason, EndReason::Finished);
        let prompt = sink.rendered.last().unwrap().as_ref().unwrap();
        assert_eq!(
            prompt.milestone_line.as_deref(),
            Some("Complete 12 reps! Continue or finish? (y/n)")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_at_milestone_keeps_counting() {
        let (_tx, rx) = mpsc::channel(4);
        let mut sink = RecordingSink::default();
        let source = AngleFrames {
            frames: curls(14, 2_000),
            fail_at_end: false,
        };

        let summary = FrameDriver::new(source, AnglePose, &mut sink, rx, session(), Duration::from_secs(5))
            .run()
            .await;

        assert_eq!(summary.reps, 14);
        assert_eq!(summary.end_reason, EndReason::StreamEnded);

        let prompts = sink
            .rendered
            .iter()
            .flatten()
            .filter(|o| o.milestone_line.as_deref().map_or(false, |l| l.starts_with("Complete")))
            .count();
        assert_eq!(prompts, 1);
        assert!(sink
            .rendered
            .iter()
            .flatten()
            .any(|o| o.milestone_line.as_deref() == Some("Continuing... Reps: 12")));
    }
}

// Pose estimation platform integration
// Provides the MediaPipe bridge and its landmark-stream backend

pub mod mediapipe_bridge;

pub use mediapipe_bridge::{DefaultMediaPipe, JsonMediaPipe, MediaPipeBridge};

// Data models for body pose landmarks consumed by the rep counter

use serde::{Deserialize, Serialize};

// ==============================================================================
// Body Pose (33 keypoints)
// ==============================================================================

/// Body pose tracking result in the MediaPipe Pose layout (33 keypoints)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyPose {
    pub keypoints: Vec<Keypoint3D>,      // 33 body landmarks
    pub score: Option<f32>,              // Whole-pose detection confidence, if the detector reports one
}

impl BodyPose {
    pub fn new(keypoints: Vec<Keypoint3D>) -> Self {
        Self {
            keypoints,
            score: None,
        }
    }

    /// Full 33-point pose with only the given landmarks placed; the rest sit at
    /// the origin with zero visibility
    pub fn from_landmarks(points: &[(BodyLandmark, (f32, f32))]) -> Self {
        let mut keypoints = vec![Keypoint3D::new(0.0, 0.0, 0.0, 0.0); BodyLandmark::COUNT];
        for &(landmark, (x, y)) in points {
            keypoints[landmark as usize] = Keypoint3D::new(x, y, 0.0, 1.0);
        }
        Self::new(keypoints)
    }

    /// Look up a single landmark, `None` when the detector returned too few points
    pub fn landmark(&self, landmark: BodyLandmark) -> Option<&Keypoint3D> {
        self.keypoints.get(landmark as usize)
    }

    /// 2D image-space position of a landmark
    pub fn point(&self, landmark: BodyLandmark) -> Option<(f32, f32)> {
        self.landmark(landmark).map(|kp| (kp.x, kp.y))
    }
}

/// MediaPipe Pose Landmark indices (33 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BodyLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl BodyLandmark {
    pub const COUNT: usize = 33;
}

// ==============================================================================
// Shared: 3D Keypoint
// ==============================================================================

/// A 3D keypoint with visibility score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint3D {
    pub x: f32, // Normalized [0, 1] for image coordinates
    pub y: f32, // Normalized [0, 1] for image coordinates
    pub z: f32, // Depth relative to the hip midpoint, unused by the counter
    pub visibility: f32, // Landmark visibility [0, 1]
}

impl Keypoint3D {
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self { x, y, z, visibility }
    }

    pub fn is_visible(&self, threshold: f32) -> bool {
        self.visibility >= threshold
    }
}

// ==============================================================================
// Configuration
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseConfig {
    pub min_detection_confidence: f32,          // Minimum pose score to accept a detection (default: 0.5)
}

impl Default for PoseConfig {
    fn default() -> Self {
        Self {
            min_detection_confidence: 0.5,
        }
    }
}

// ==============================================================================
// Error Types
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PoseError {
    #[error("Malformed landmark payload: {0}")]
    MalformedPayload(String),

    #[error("Frame format not supported by this pose backend")]
    NotSupported,
}

pub type PoseResult<T> = Result<T, PoseError>;

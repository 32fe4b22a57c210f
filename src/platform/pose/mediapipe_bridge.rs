// MediaPipe integration bridge
// Abstracts over where body landmarks come from. The bundled backend decodes
// landmark JSON produced by an external MediaPipe Pose process.

use crate::models::capture::{FrameFormat, RawFrame};
use crate::models::pose::{BodyPose, Keypoint3D, PoseConfig, PoseError, PoseResult};
use serde_json::Value;

/// MediaPipe bridge trait
pub trait MediaPipeBridge: Send {
    /// Initialize the backend
    fn new(config: &PoseConfig) -> PoseResult<Self>
    where
        Self: Sized;

    /// Detect the body pose in a frame. `Ok(None)` means no person was found.
    fn process_frame(&self, frame: &RawFrame) -> PoseResult<Option<BodyPose>>;

    /// Get model info
    fn get_model_info(&self) -> String;
}

// ==============================================================================
// JSON Landmark Implementation
// ==============================================================================

/// Decodes `{"body_pose": {"score": .., "keypoints": [{x, y, z, visibility}, ..]}}`
pub struct JsonMediaPipe {
    config: PoseConfig,
}

impl MediaPipeBridge for JsonMediaPipe {
    fn new(config: &PoseConfig) -> PoseResult<Self> {
        Ok(Self {
            config: config.clone(),
        })
    }

    fn process_frame(&self, frame: &RawFrame) -> PoseResult<Option<BodyPose>> {
        if frame.format != FrameFormat::LandmarkJson {
            return Err(PoseError::NotSupported);
        }

        let result: Value = serde_json::from_slice(&frame.data)
            .map_err(|e| PoseError::MalformedPayload(format!("Failed to parse JSON: {}", e)))?;

        let pose_data = match result.get("body_pose") {
            Some(data) if !data.is_null() => data,
            _ => return Ok(None),
        };

        let body_pose = Self::parse_body_pose(pose_data)?;

        match body_pose.score {
            Some(score) if score < self.config.min_detection_confidence => Ok(None),
            _ => Ok(Some(body_pose)),
        }
    }

    fn get_model_info(&self) -> String {
        format!(
            "MediaPipe landmark stream (JSON) - min detection confidence {}",
            self.config.min_detection_confidence
        )
    }
}

impl JsonMediaPipe {
    fn parse_body_pose(data: &Value) -> PoseResult<BodyPose> {
        let keypoints = data
            .get("keypoints")
            .and_then(|k| k.as_array())
            .ok_or_else(|| PoseError::MalformedPayload("Missing body keypoints".to_string()))?;

        let keypoints = keypoints
            .iter()
            .enumerate()
            .map(|(i, kp)| Self::parse_keypoint(i, kp))
            .collect::<PoseResult<Vec<_>>>()?;

        let score = data.get("score").and_then(|v| v.as_f64()).map(|v| v as f32);

        Ok(BodyPose { keypoints, score })
    }

    fn parse_keypoint(index: usize, kp: &Value) -> PoseResult<Keypoint3D> {
        let coord = |name: &str| kp.get(name).and_then(|v| v.as_f64()).map(|v| v as f32);

        let (x, y) = coord("x").zip(coord("y")).ok_or_else(|| {
            PoseError::MalformedPayload(format!("Keypoint {} lacks x/y coordinates", index))
        })?;

        Ok(Keypoint3D {
            x,
            y,
            z: coord("z").unwrap_or(0.0),
            visibility: coord("visibility").unwrap_or(1.0),
        })
    }
}

pub type DefaultMediaPipe = JsonMediaPipe;

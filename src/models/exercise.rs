// Exercise definitions: one fixed lookup table for landmarks, thresholds and guidance

use super::pose::BodyLandmark;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Pushup,
    Squat,
    Situp,
    #[serde(rename = "bicepcurl")]
    BicepCurl,
}

/// Everything the counter needs to know about one exercise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExerciseProfile {
    pub joint_a: BodyLandmark,
    pub vertex: BodyLandmark,
    pub joint_c: BodyLandmark,
    /// Below this angle the rep is at the bottom of its range
    pub min_angle: f32,
    /// Above this angle the rep is at the top of its range
    pub max_angle: f32,
    /// Camera placement hint shown in the overlay
    pub guideline: &'static str,
}

const PROFILES: [(ExerciseKind, ExerciseProfile); 4] = [
    (
        ExerciseKind::Pushup,
        ExerciseProfile {
            joint_a: BodyLandmark::LeftShoulder,
            vertex: BodyLandmark::LeftElbow,
            joint_c: BodyLandmark::LeftWrist,
            min_angle: 90.0,
            max_angle: 160.0,
            guideline: "Camera level with the elbow and shoulder.",
        },
    ),
    (
        ExerciseKind::Squat,
        ExerciseProfile {
            joint_a: BodyLandmark::LeftHip,
            vertex: BodyLandmark::LeftKnee,
            joint_c: BodyLandmark::LeftAnkle,
            min_angle: 90.0,
            max_angle: 160.0,
            guideline: "Camera level with the hip and knee.",
        },
    ),
    (
        ExerciseKind::Situp,
        ExerciseProfile {
            joint_a: BodyLandmark::LeftShoulder,
            vertex: BodyLandmark::LeftHip,
            joint_c: BodyLandmark::LeftKnee,
            min_angle: 90.0,
            max_angle: 140.0,
            guideline: "Camera focused on the waist and shoulder.",
        },
    ),
    (
        ExerciseKind::BicepCurl,
        ExerciseProfile {
            joint_a: BodyLandmark::LeftShoulder,
            vertex: BodyLandmark::LeftElbow,
            joint_c: BodyLandmark::LeftWrist,
            min_angle: 50.0,
            max_angle: 70.0,
            guideline: "Camera in front or to the side, focused on the elbow and shoulder.",
        },
    ),
];

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 4] = [
        ExerciseKind::Pushup,
        ExerciseKind::Squat,
        ExerciseKind::Situp,
        ExerciseKind::BicepCurl,
    ];

    pub fn profile(&self) -> &'static ExerciseProfile {
        // PROFILES is indexed in declaration order of the enum
        &PROFILES[*self as usize].1
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseKind::Pushup => "pushup",
            ExerciseKind::Squat => "squat",
            ExerciseKind::Situp => "situp",
            ExerciseKind::BicepCurl => "bicepcurl",
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown exercise: {0}. Must be one of: pushup, squat, situp, bicepcurl")]
pub struct UnknownExercise(pub String);

impl FromStr for ExerciseKind {
    type Err = UnknownExercise;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pushup" => Ok(ExerciseKind::Pushup),
            "squat" => Ok(ExerciseKind::Squat),
            "situp" => Ok(ExerciseKind::Situp),
            "bicepcurl" | "bicep_curl" => Ok(ExerciseKind::BicepCurl),
            other => Err(UnknownExercise(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_table_matches_kind() {
        for (kind, profile) in PROFILES.iter() {
            assert_eq!(kind.profile(), profile);
        }
    }

    #[test]
    fn test_thresholds() {
        let curl = ExerciseKind::BicepCurl.profile();
        assert_eq!((curl.min_angle, curl.max_angle), (50.0, 70.0));

        let situp = ExerciseKind::Situp.profile();
        assert_eq!((situp.min_angle, situp.max_angle), (90.0, 140.0));
        assert_eq!(situp.vertex, BodyLandmark::LeftHip);

        let squat = ExerciseKind::Squat.profile();
        assert_eq!(squat.joint_c, BodyLandmark::LeftAnkle);
    }

    #[test]
    fn test_min_below_max_everywhere() {
        for kind in ExerciseKind::ALL {
            let profile = kind.profile();
            assert!(profile.min_angle < profile.max_angle, "{kind}");
        }
    }

    #[test]
    fn test_parse_round_trips_display() {
        for kind in ExerciseKind::ALL {
            assert_eq!(kind.as_str().parse::<ExerciseKind>().unwrap(), kind);
        }
        assert!("plank".parse::<ExerciseKind>().is_err());
    }
}
